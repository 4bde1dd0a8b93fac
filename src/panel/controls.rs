use super::layout::{Control, PanelLayout};
use crate::filter::names::{FROM_EVENT_TIME, FROM_SEVERITY, TO_EVENT_TIME, TO_SEVERITY};
use crate::filter::{DEFAULT_FROM_SEVERITY, DEFAULT_TO_SEVERITY, RangeInputs};
use chrono::{DateTime, Utc};
use log::warn;
use std::collections::BTreeMap;

/// Live values of the panel's date-time pickers and text boxes, by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlValues {
    date_time_pickers: BTreeMap<String, DateTime<Utc>>,
    text_boxes: BTreeMap<String, String>,
}

impl ControlValues {
    /// Register the pickers and text boxes present in `layout`
    pub fn from_layout(layout: &PanelLayout, now: DateTime<Utc>) -> Self {
        let mut controls = Self::default();
        for (_, control) in layout.controls() {
            match control {
                Control::DateTimeRow { name, .. } => {
                    controls.date_time_pickers.insert(name.clone(), now);
                }
                Control::SeverityRow { .. } => {
                    for name in [FROM_SEVERITY, TO_SEVERITY] {
                        controls.text_boxes.insert(name.to_string(), String::new());
                    }
                }
                Control::CheckBox { .. } => {}
            }
        }
        controls
    }

    pub fn date_time(&self, name: &str) -> Option<DateTime<Utc>> {
        self.date_time_pickers.get(name).copied()
    }

    /// Returns false when the panel has no picker with that name
    pub fn set_date_time(&mut self, name: &str, value: DateTime<Utc>) -> bool {
        match self.date_time_pickers.get_mut(name) {
            Some(picker) => {
                *picker = value;
                true
            }
            None => false,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.text_boxes.get(name).map(String::as_str)
    }

    /// Returns false when the panel has no text box with that name
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> bool {
        match self.text_boxes.get_mut(name) {
            Some(text_box) => {
                *text_box = text.into();
                true
            }
            None => false,
        }
    }

    /// Severity in a text box, or the bound's default when it is not a `u16`.
    ///
    /// The edit model stores severities as `UInt16`, so the compiled and the
    /// saved value are the same.
    pub fn severity(&self, name: &str) -> u16 {
        let default = if name == TO_SEVERITY {
            DEFAULT_TO_SEVERITY
        } else {
            DEFAULT_FROM_SEVERITY
        };

        match self.text(name).map(str::trim).map(str::parse::<u16>) {
            Some(Ok(value)) => value,
            _ => {
                warn!(
                    "TextBox \"{}\" should contain an integer value between 0 and {}",
                    name,
                    u16::MAX
                );
                default as u16
            }
        }
    }

    pub fn range_inputs(&self) -> RangeInputs {
        let now = Utc::now();
        RangeInputs {
            from_event_time: self.date_time(FROM_EVENT_TIME).unwrap_or(now),
            to_event_time: self.date_time(TO_EVENT_TIME).unwrap_or(now),
            from_severity: i32::from(self.severity(FROM_SEVERITY)),
            to_severity: i32::from(self.severity(TO_SEVERITY)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::NoTranslation;
    use crate::visibility::VisibilityConfiguration;

    fn controls() -> ControlValues {
        let layout =
            PanelLayout::generate(&VisibilityConfiguration::builtin(), &NoTranslation).unwrap();
        ControlValues::from_layout(&layout, "2024-01-01T00:00:00Z".parse().unwrap())
    }

    #[test]
    fn test_unparsable_severity_falls_back_to_defaults() {
        let mut controls = controls();
        assert!(controls.set_text(FROM_SEVERITY, "abc"));
        assert!(controls.set_text(TO_SEVERITY, ""));

        let ranges = controls.range_inputs();
        assert_eq!(ranges.from_severity, 1);
        assert_eq!(ranges.to_severity, 1000);
    }

    #[test]
    fn test_out_of_range_severity_falls_back_to_defaults() {
        let mut controls = controls();
        controls.set_text(FROM_SEVERITY, "-5");
        controls.set_text(TO_SEVERITY, "70000");

        assert_eq!(controls.severity(FROM_SEVERITY), 1);
        assert_eq!(controls.severity(TO_SEVERITY), 1000);
        assert_eq!(controls.range_inputs().to_severity, 1000);
    }

    #[test]
    fn test_severity_text_is_trimmed() {
        let mut controls = controls();
        controls.set_text(FROM_SEVERITY, " 250 ");
        assert_eq!(controls.severity(FROM_SEVERITY), 250);
    }

    #[test]
    fn test_unknown_controls_are_rejected() {
        let mut controls = controls();
        assert!(!controls.set_text("Bogus", "1"));
        assert!(!controls.set_date_time("Bogus", Utc::now()));
        assert!(controls.set_date_time(TO_EVENT_TIME, Utc::now()));
    }
}
