use thiserror::Error;

/// Errors raised while building or compiling alarm filters
#[derive(Debug, Error)]
pub enum FilterError {
    #[error(
        "Unknown filter attribute: '{0}'. Valid attributes are: AlarmState, Name, Class, EventTime, Group, Inhibit, Message, Priority, Severity, AlarmStatus"
    )]
    UnknownAttribute(String),

    #[error("SQL condition cannot be empty for filter '{name}' of attribute {attribute}")]
    EmptyFragment { attribute: String, name: String },

    #[error("Range filter '{0}' is checked but its range is disabled in the filters configuration")]
    RangeDisabled(String),

    #[error("Filter {attribute}/{name} not found")]
    NotFound { attribute: String, name: String },

    #[error("Invalid filter reference '{0}'. Expected 'Attribute/Name'")]
    InvalidReference(String),
}
