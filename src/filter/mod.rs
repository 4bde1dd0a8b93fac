//! Alarm filter criteria
//!
//! A [`Filter`] is one named criterion of the alarm filter panel. Filters
//! are grouped by [`FilterAttribute`]: checked filters of the same attribute
//! combine with OR, and distinct attributes combine with AND.
//!
//! # Conditions
//!
//! Each filter carries either a static SQL condition or a range bound:
//!
//! ```text
//! Urgent                  (Severity >= 751 AND Severity <= 1000)   preset
//! Class/Process           RAAlarmData.AlarmClass LIKE '%Process%'  generated
//! AlarmState/HighState    CurrentState IN ('HighState','HighHighState HighState')
//! EventTime/FromEventTime resolved from the live time range
//! Severity/Severity       resolved from the live severity range
//! ```

pub mod attribute;
pub mod error;
pub mod model;
pub mod names;
pub mod set;

pub use attribute::FilterAttribute;
pub use error::FilterError;
pub use model::{Filter, FilterKind, RangeBound, preset_fragment};
pub use set::{DEFAULT_FROM_SEVERITY, DEFAULT_TO_SEVERITY, FilterSet, RangeInputs};

/// Parse an `Attribute/Name` reference, e.g. `Priority/Urgent`
pub fn parse_reference(reference: &str) -> Result<(FilterAttribute, String), FilterError> {
    let (attribute, name) = reference
        .split_once('/')
        .ok_or_else(|| FilterError::InvalidReference(reference.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(FilterError::InvalidReference(reference.to_string()));
    }
    Ok((attribute.trim().parse()?, name.to_string()))
}
