use super::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attribute groups of the alarm filter panel.
///
/// Filters sharing an attribute are combined with OR; distinct attributes
/// are combined with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterAttribute {
    AlarmState,
    Name,
    Class,
    EventTime,
    Group,
    Inhibit,
    Message,
    Priority,
    Severity,
    AlarmStatus,
}

impl FilterAttribute {
    pub const ALL: [FilterAttribute; 10] = [
        FilterAttribute::AlarmState,
        FilterAttribute::Name,
        FilterAttribute::Class,
        FilterAttribute::EventTime,
        FilterAttribute::Group,
        FilterAttribute::Inhibit,
        FilterAttribute::Message,
        FilterAttribute::Priority,
        FilterAttribute::Severity,
        FilterAttribute::AlarmStatus,
    ];

    /// Browse name of the attribute, as used in configuration and edit model trees
    pub fn canonical_name(&self) -> &'static str {
        match self {
            FilterAttribute::AlarmState => "AlarmState",
            FilterAttribute::Name => "Name",
            FilterAttribute::Class => "Class",
            FilterAttribute::EventTime => "EventTime",
            FilterAttribute::Group => "Group",
            FilterAttribute::Inhibit => "Inhibit",
            FilterAttribute::Message => "Message",
            FilterAttribute::Priority => "Priority",
            FilterAttribute::Severity => "Severity",
            FilterAttribute::AlarmStatus => "AlarmStatus",
        }
    }
}

impl fmt::Display for FilterAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for FilterAttribute {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterAttribute::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.canonical_name() == s)
            .ok_or_else(|| FilterError::UnknownAttribute(s.to_string()))
    }
}
