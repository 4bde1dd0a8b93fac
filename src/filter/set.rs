use super::attribute::FilterAttribute;
use super::model::Filter;
use super::names::{
    FROM_EVENT_TIME_DATE_TIME, FROM_SEVERITY, TO_EVENT_TIME_DATE_TIME, TO_SEVERITY,
    is_range_value_name,
};
use crate::edit_model::{InstanceTree, PropertyValue};
use crate::translate::Translate;
use chrono::{DateTime, Utc};
use log::warn;

pub const DEFAULT_FROM_SEVERITY: i32 = 1;
pub const DEFAULT_TO_SEVERITY: i32 = 1000;

/// Live values of the event time and severity ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeInputs {
    pub from_event_time: DateTime<Utc>,
    pub to_event_time: DateTime<Utc>,
    pub from_severity: i32,
    pub to_severity: i32,
}

impl RangeInputs {
    /// Defaults used when no value is available: both times at `now`, full severity scale
    pub fn defaults_at(now: DateTime<Utc>) -> Self {
        Self {
            from_event_time: now,
            to_event_time: now,
            from_severity: DEFAULT_FROM_SEVERITY,
            to_severity: DEFAULT_TO_SEVERITY,
        }
    }
}

impl Default for RangeInputs {
    fn default() -> Self {
        Self::defaults_at(Utc::now())
    }
}

/// Ordered filters of the panel plus the range inputs they are compiled with
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
    pub ranges: RangeInputs,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild filters and ranges from the values stored in an edit model instance.
    ///
    /// Attribute nodes that do not name a [`FilterAttribute`] are skipped.
    pub fn from_edit_model(instance: &InstanceTree, translator: &dyn Translate) -> Self {
        let mut set = FilterSet::new();

        for attribute_node in &instance.root.children {
            let attribute = match attribute_node.name.parse::<FilterAttribute>() {
                Ok(attribute) => attribute,
                Err(_) => {
                    warn!(
                        "Accordion {} browse name is not a valid FilterAttribute.",
                        attribute_node.name
                    );
                    continue;
                }
            };

            for child in &attribute_node.children {
                match (child.name.as_str(), &child.value) {
                    (FROM_EVENT_TIME_DATE_TIME, Some(PropertyValue::DateTime(value))) => {
                        set.ranges.from_event_time = *value
                    }
                    (TO_EVENT_TIME_DATE_TIME, Some(PropertyValue::DateTime(value))) => {
                        set.ranges.to_event_time = *value
                    }
                    (FROM_SEVERITY, Some(PropertyValue::UInt16(value))) => {
                        set.ranges.from_severity = i32::from(*value)
                    }
                    (TO_SEVERITY, Some(PropertyValue::UInt16(value))) => {
                        set.ranges.to_severity = i32::from(*value)
                    }
                    (name, value) if is_range_value_name(name) => {
                        warn!(
                            "FilterModel variable: {}/{} holds {:?}, keeping the default range",
                            attribute, name, value
                        );
                    }
                    (name, value) => {
                        let checked = match value {
                            Some(PropertyValue::Boolean(checked)) => *checked,
                            other => {
                                warn!(
                                    "FilterModel variable: {}/{} holds {:?} instead of a checked state",
                                    attribute, name, other
                                );
                                false
                            }
                        };
                        set.push(Filter::new(attribute, name, checked, translator));
                    }
                }
            }
        }

        set
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut [Filter] {
        &mut self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn checked(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(|filter| filter.checked)
    }

    /// Attributes with at least one checked filter, in first-checked order
    pub fn active_attributes(&self) -> Vec<FilterAttribute> {
        let mut attributes = Vec::new();
        for filter in self.checked() {
            if !attributes.contains(&filter.attribute) {
                attributes.push(filter.attribute);
            }
        }
        attributes
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.filters.iter().any(|filter| filter.name == name)
    }

    pub fn find(&self, attribute: FilterAttribute, name: &str) -> Option<&Filter> {
        self.filters
            .iter()
            .find(|filter| filter.attribute == attribute && filter.name == name)
    }

    pub fn find_mut(&mut self, attribute: FilterAttribute, name: &str) -> Option<&mut Filter> {
        self.filters
            .iter_mut()
            .find(|filter| filter.attribute == attribute && filter.name == name)
    }

    pub fn clear_checked(&mut self) {
        for filter in &mut self.filters {
            filter.checked = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_model::PropertyNode;
    use crate::translate::NoTranslation;

    #[test]
    fn test_active_attributes_follow_first_checked_order() {
        let mut set = FilterSet::new();
        for (attribute, name, checked) in [
            (FilterAttribute::AlarmState, "HighState", false),
            (FilterAttribute::Priority, "Urgent", true),
            (FilterAttribute::Inhibit, "Enabled", true),
            (FilterAttribute::Priority, "Low", true),
            (FilterAttribute::AlarmState, "LowState", true),
        ] {
            set.push(Filter::new(attribute, name, checked, &NoTranslation));
        }

        assert_eq!(
            set.active_attributes(),
            vec![
                FilterAttribute::Priority,
                FilterAttribute::Inhibit,
                FilterAttribute::AlarmState
            ]
        );

        set.clear_checked();
        assert!(set.active_attributes().is_empty());
    }

    #[test]
    fn test_from_edit_model_reads_checked_states_and_ranges() {
        let mut instance = InstanceTree::new("DefaultFiltersToggle");
        let severity = instance.root.add(PropertyNode::object("Severity"));
        severity.add(PropertyNode::variable("Severity", PropertyValue::Boolean(true)));
        severity.add(PropertyNode::variable("FromSeverity", PropertyValue::UInt16(200)));
        severity.add(PropertyNode::variable("ToSeverity", PropertyValue::UInt16(800)));
        instance.root.add(PropertyNode::object("NotAnAttribute"));
        let priority = instance.root.add(PropertyNode::object("Priority"));
        priority.add(PropertyNode::variable("Urgent", PropertyValue::Boolean(false)));

        let set = FilterSet::from_edit_model(&instance, &NoTranslation);

        assert_eq!(set.len(), 2);
        assert!(set.find(FilterAttribute::Severity, "Severity").unwrap().checked);
        assert!(!set.find(FilterAttribute::Priority, "Urgent").unwrap().checked);
        assert_eq!(set.ranges.from_severity, 200);
        assert_eq!(set.ranges.to_severity, 800);
    }
}
