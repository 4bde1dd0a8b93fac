use crate::filter::FilterAttribute;
use crate::filter::names::{
    EVENT_TIME, FROM_SEVERITY, SEVERITY, TO_SEVERITY, is_range_value_name,
};
use crate::translate::Translate;
use crate::visibility::{VisibilityConfiguration, VisibilityError, VisibilityNode};
use log::warn;

/// A control inside an accordion; `name` is the browse name of its checkbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    CheckBox {
        name: String,
        label: String,
    },
    /// Checkbox followed by a labelled date-time picker
    DateTimeRow {
        name: String,
        label: String,
    },
    /// Checkbox followed by the from/to severity text boxes
    SeverityRow {
        name: String,
        from_label: String,
        to_label: String,
    },
}

impl Control {
    pub fn name(&self) -> &str {
        match self {
            Control::CheckBox { name, .. }
            | Control::DateTimeRow { name, .. }
            | Control::SeverityRow { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    pub attribute: FilterAttribute,
    pub label: String,
    pub expanded: bool,
    pub controls: Vec<Control>,
}

/// Accordions and controls of the filter panel, generated from the filters configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelLayout {
    pub accordions: Vec<Accordion>,
}

impl PanelLayout {
    pub fn generate(
        configuration: &VisibilityConfiguration,
        translator: &dyn Translate,
    ) -> Result<Self, VisibilityError> {
        let mut accordions = Vec::new();

        for node in &configuration.attributes {
            // Hidden attributes get no accordion
            if !configuration.is_attribute_enabled(&node.name) {
                continue;
            }

            let attribute = match node.name.parse::<FilterAttribute>() {
                Ok(attribute) => attribute,
                Err(_) => {
                    warn!(
                        "Accordion {} browse name is not a valid FilterAttribute.",
                        node.name
                    );
                    continue;
                }
            };

            let controls = match node.name.as_str() {
                EVENT_TIME => event_time_controls(node, configuration, translator),
                SEVERITY => severity_controls(node, configuration, translator)?,
                _ => check_box_controls(node, configuration, translator),
            };

            accordions.push(Accordion {
                attribute,
                label: translator.translate(&node.name),
                expanded: false,
                controls,
            });
        }

        Ok(Self { accordions })
    }

    pub fn accordion(&self, attribute: FilterAttribute) -> Option<&Accordion> {
        self.accordions
            .iter()
            .find(|accordion| accordion.attribute == attribute)
    }

    /// Every control with the attribute of its accordion, in panel order
    pub fn controls(&self) -> impl Iterator<Item = (FilterAttribute, &Control)> {
        self.accordions.iter().flat_map(|accordion| {
            accordion
                .controls
                .iter()
                .map(move |control| (accordion.attribute, control))
        })
    }
}

fn enabled_children<'a>(
    node: &'a VisibilityNode,
    configuration: &'a VisibilityConfiguration,
) -> impl Iterator<Item = &'a VisibilityNode> {
    node.children
        .iter()
        .filter(|child| !is_range_value_name(&child.name))
        .filter(move |child| configuration.is_criterion_enabled(&node.name, &child.name))
}

fn check_box_controls(
    node: &VisibilityNode,
    configuration: &VisibilityConfiguration,
    translator: &dyn Translate,
) -> Vec<Control> {
    enabled_children(node, configuration)
        .map(|child| Control::CheckBox {
            name: child.name.clone(),
            label: translator.translate(&child.name),
        })
        .collect()
}

fn event_time_controls(
    node: &VisibilityNode,
    configuration: &VisibilityConfiguration,
    translator: &dyn Translate,
) -> Vec<Control> {
    enabled_children(node, configuration)
        .map(|child| Control::DateTimeRow {
            name: child.name.clone(),
            label: translator.translate(&child.name),
        })
        .collect()
}

fn severity_controls(
    node: &VisibilityNode,
    configuration: &VisibilityConfiguration,
    translator: &dyn Translate,
) -> Result<Vec<Control>, VisibilityError> {
    let child = node
        .child(SEVERITY)
        .ok_or_else(|| VisibilityError::MissingChild {
            attribute: node.name.clone(),
            name: SEVERITY.to_string(),
        })?;

    if !configuration.is_criterion_enabled(&node.name, &child.name) {
        return Ok(Vec::new());
    }

    Ok(vec![Control::SeverityRow {
        name: child.name.clone(),
        from_label: translator.translate(FROM_SEVERITY),
        to_label: translator.translate(TO_SEVERITY),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{NoTranslation, TranslationTable};

    #[test]
    fn test_layout_skips_disabled_attributes_and_criteria() {
        let mut configuration = VisibilityConfiguration::builtin();
        configuration
            .set_enabled("Priority", Some("Low"), false)
            .unwrap();

        let layout = PanelLayout::generate(&configuration, &NoTranslation).unwrap();

        assert!(layout.accordion(FilterAttribute::Class).is_none());
        let priority = layout.accordion(FilterAttribute::Priority).unwrap();
        let names: Vec<&str> = priority.controls.iter().map(Control::name).collect();
        assert_eq!(names, vec!["Urgent", "High", "Medium"]);
    }

    #[test]
    fn test_range_attributes_get_range_controls() {
        let layout =
            PanelLayout::generate(&VisibilityConfiguration::builtin(), &NoTranslation).unwrap();

        let event_time = layout.accordion(FilterAttribute::EventTime).unwrap();
        assert!(
            event_time
                .controls
                .iter()
                .all(|control| matches!(control, Control::DateTimeRow { .. }))
        );
        let severity = layout.accordion(FilterAttribute::Severity).unwrap();
        assert!(matches!(
            severity.controls.as_slice(),
            [Control::SeverityRow { .. }]
        ));
    }

    #[test]
    fn test_unknown_attributes_are_skipped() {
        let mut configuration = VisibilityConfiguration::builtin();
        configuration
            .attributes
            .push(VisibilityNode::with_children("Bogus", true, ["A"]));

        let layout = PanelLayout::generate(&configuration, &NoTranslation).unwrap();
        assert_eq!(
            layout.accordions.len(),
            configuration
                .attributes
                .iter()
                .filter(|node| node.enabled)
                .count()
                - 1
        );
    }

    #[test]
    fn test_labels_are_translated() {
        let mut table = TranslationTable::default();
        table.insert("Priority", "Priorità");
        table.insert("Urgent", "Urgente");

        let layout = PanelLayout::generate(&VisibilityConfiguration::builtin(), &table).unwrap();
        let priority = layout.accordion(FilterAttribute::Priority).unwrap();
        assert_eq!(priority.label, "Priorità");
        assert!(matches!(
            &priority.controls[0],
            Control::CheckBox { label, .. } if label == "Urgente"
        ));
    }
}
