use super::attribute::FilterAttribute;
use super::names::{FROM_EVENT_TIME, SEVERITY, TO_EVENT_TIME};
use crate::translate::Translate;

/// Filters whose condition is built from live range values at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    FromEventTime,
    ToEventTime,
    Severity,
}

impl RangeBound {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            FROM_EVENT_TIME => Some(RangeBound::FromEventTime),
            TO_EVENT_TIME => Some(RangeBound::ToEventTime),
            SEVERITY => Some(RangeBound::Severity),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RangeBound::FromEventTime => FROM_EVENT_TIME,
            RangeBound::ToEventTime => TO_EVENT_TIME,
            RangeBound::Severity => SEVERITY,
        }
    }
}

/// How a filter contributes its condition to the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// Static condition computed once when the filter is built
    Toggle { fragment: String },
    /// Condition resolved by the compiler from the range inputs
    Range(RangeBound),
}

/// One named filter criterion of the alarm filter panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub attribute: FilterAttribute,
    pub name: String,
    pub kind: FilterKind,
    pub checked: bool,
}

impl Filter {
    pub fn new(
        attribute: FilterAttribute,
        name: impl Into<String>,
        checked: bool,
        translator: &dyn Translate,
    ) -> Self {
        let name = name.into();
        let kind = match RangeBound::from_name(&name) {
            Some(bound) => FilterKind::Range(bound),
            None => FilterKind::Toggle {
                fragment: preset_fragment(&name)
                    .map(str::to_string)
                    .unwrap_or_else(|| generate_fragment(attribute, &name, translator)),
            },
        };

        Self {
            attribute,
            name,
            kind,
            checked,
        }
    }

    /// Static condition of a toggle filter, `None` for range filters
    pub fn fragment(&self) -> Option<&str> {
        match &self.kind {
            FilterKind::Toggle { fragment } => Some(fragment),
            FilterKind::Range(_) => None,
        }
    }

    pub fn range_bound(&self) -> Option<RangeBound> {
        match self.kind {
            FilterKind::Range(bound) => Some(bound),
            FilterKind::Toggle { .. } => None,
        }
    }
}

/// Well-known conditions looked up by filter name regardless of attribute
pub fn preset_fragment(name: &str) -> Option<&'static str> {
    let fragment = match name {
        "Urgent" => "(Severity >= 751 AND Severity <= 1000)",
        "High" => "(Severity >= 501 AND Severity <= 750)",
        "Medium" => "(Severity >= 251 AND Severity <= 500)",
        "Low" => "(Severity >= 1 AND Severity <= 250)",
        "NormalUnacked" => "(ActiveState.Id = 0 AND AckedState.Id = 0)",
        "InAlarm" => "ActiveState.Id = 1",
        "InAlarmAcked" => "(ActiveState.Id = 1 AND AckedState.Id = 1)",
        "InAlarmUnacked" => "(ActiveState.Id = 1 AND AckedState.Id = 0)",
        "InAlarmConfirmed" => "(ActiveState.Id = 1 AND ConfirmedState.Id = 1)",
        "InAlarmUnconfirmed" => "(ActiveState.Id = 1 AND ConfirmedState.Id = 0)",
        "Enabled" => "EnabledState.Id = 1",
        "Disabled" => "EnabledState.Id = 0",
        "Suppressed" => "SuppressedState.Id = 1",
        "Unsuppressed" => "SuppressedState.Id = 0",
        _ => return None,
    };
    Some(fragment)
}

fn generate_fragment(attribute: FilterAttribute, name: &str, translator: &dyn Translate) -> String {
    match attribute {
        FilterAttribute::Inhibit => format!(
            "ShelvingState.CurrentState = '{}'",
            translator.translate(name)
        ),
        FilterAttribute::Class => format!(
            "RAAlarmData.AlarmClass LIKE '%{}%'",
            translator.translate(name)
        ),
        FilterAttribute::Group => format!(
            "RAAlarmData.AlarmGroup LIKE '%{}%'",
            translator.translate(name)
        ),
        FilterAttribute::Name => format!("BrowseName LIKE '%{}%'", translator.translate(name)),
        FilterAttribute::AlarmState => alarm_state_fragment(name, translator),
        _ => format!("{} LIKE '%{}%'", attribute, translator.translate(name)),
    }
}

/// Membership conditions for the alarm state checkboxes.
///
/// The digital active checkbox is named `ActiveStateDigital` while its
/// translated state text is `ActiveState`.
fn alarm_state_fragment(name: &str, translator: &dyn Translate) -> String {
    let state = |id: &str| translator.translate(id);

    match name {
        "HighHighState" => format!(
            "CurrentState IN ('{hh}','{hh} {h}')",
            hh = state("HighHighState"),
            h = state("HighState")
        ),
        "HighState" => format!(
            "CurrentState IN ('{h}','{hh} {h}')",
            hh = state("HighHighState"),
            h = state("HighState")
        ),
        "LowLowState" => format!(
            "CurrentState IN ('{ll}','{l} {ll}')",
            ll = state("LowLowState"),
            l = state("LowState")
        ),
        "LowState" => format!(
            "CurrentState IN ('{l}','{l} {ll}')",
            ll = state("LowLowState"),
            l = state("LowState")
        ),
        "ActiveStateDigital" => format!("CurrentState IN ('{}')", state("ActiveState")),
        "InactiveState" => format!("CurrentState IN ('{}')", state("InactiveState")),
        _ => String::new(),
    }
}
