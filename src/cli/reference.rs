use crate::filter::{FilterAttribute, FilterError, parse_reference};
use std::fmt;
use std::str::FromStr;

/// `Attribute/Name` reference to one checkbox of the filter panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReference {
    pub attribute: FilterAttribute,
    pub name: String,
}

impl FromStr for FilterReference {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (attribute, name) = parse_reference(s)?;
        Ok(Self { attribute, name })
    }
}

impl fmt::Display for FilterReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.attribute, self.name)
    }
}
