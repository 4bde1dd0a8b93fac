//! Browse names shared by the filters configuration, the edit model and the panel

pub const EVENT_TIME: &str = "EventTime";
pub const FROM_EVENT_TIME: &str = "FromEventTime";
pub const TO_EVENT_TIME: &str = "ToEventTime";
pub const FROM_EVENT_TIME_DATE_TIME: &str = "FromEventTimeDateTime";
pub const TO_EVENT_TIME_DATE_TIME: &str = "ToEventTimeDateTime";
pub const DATE_TIME_SUFFIX: &str = "DateTime";
pub const SEVERITY: &str = "Severity";
pub const FROM_SEVERITY: &str = "FromSeverity";
pub const TO_SEVERITY: &str = "ToSeverity";

/// Names of the edit model leaves holding range values rather than checked states
pub fn is_range_value_name(name: &str) -> bool {
    matches!(
        name,
        FROM_EVENT_TIME_DATE_TIME | TO_EVENT_TIME_DATE_TIME | FROM_SEVERITY | TO_SEVERITY
    )
}
