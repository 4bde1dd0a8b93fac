use super::error::EditModelError;
use super::tree::{PropertyNode, PropertyType, PropertyValue, join_path};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value-bearing mirror of an edit model schema.
///
/// Values of nodes dropped by reconciliation are kept in `retained`, keyed by
/// their path, so that re-enabling a criterion restores what the user had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTree {
    pub root: PropertyNode,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) retained: BTreeMap<String, PropertyValue>,
}

impl InstanceTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            root: PropertyNode::object(name),
            retained: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Value kept from a node that reconciliation removed
    pub fn retained_value(&self, path: &str) -> Option<&PropertyValue> {
        self.retained.get(path)
    }

    pub fn attribute(&self, attribute: &str) -> Result<&PropertyNode, EditModelError> {
        self.root
            .get(attribute)
            .ok_or_else(|| EditModelError::MissingAttribute(attribute.to_string()))
    }

    pub fn variable(&self, attribute: &str, name: &str) -> Result<&PropertyNode, EditModelError> {
        self.attribute(attribute)?
            .get(name)
            .ok_or_else(|| missing_variable(attribute, name))
    }

    pub fn bool_value(&self, attribute: &str, name: &str) -> Result<bool, EditModelError> {
        self.typed_value(attribute, name, PropertyType::Boolean, PropertyValue::as_bool)
    }

    pub fn date_time_value(
        &self,
        attribute: &str,
        name: &str,
    ) -> Result<DateTime<Utc>, EditModelError> {
        self.typed_value(
            attribute,
            name,
            PropertyType::DateTime,
            PropertyValue::as_date_time,
        )
    }

    pub fn u16_value(&self, attribute: &str, name: &str) -> Result<u16, EditModelError> {
        self.typed_value(attribute, name, PropertyType::UInt16, PropertyValue::as_u16)
    }

    /// Overwrite the value of an existing variable; the declared type must match
    pub fn set_value(
        &mut self,
        attribute: &str,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), EditModelError> {
        let node = self
            .root
            .get_mut(attribute)
            .ok_or_else(|| EditModelError::MissingAttribute(attribute.to_string()))?
            .get_mut(name)
            .ok_or_else(|| missing_variable(attribute, name))?;

        if node.property_type != value.property_type() {
            return Err(EditModelError::TypeMismatch {
                path: join_path(attribute, name),
                expected: node.property_type,
                found: value.property_type(),
            });
        }
        node.value = Some(value);
        Ok(())
    }

    fn typed_value<T>(
        &self,
        attribute: &str,
        name: &str,
        expected: PropertyType,
        extract: fn(&PropertyValue) -> Option<T>,
    ) -> Result<T, EditModelError> {
        let node = self.variable(attribute, name)?;
        node.value
            .as_ref()
            .and_then(extract)
            .ok_or_else(|| EditModelError::TypeMismatch {
                path: join_path(attribute, name),
                expected,
                found: node.property_type,
            })
    }
}

fn missing_variable(attribute: &str, name: &str) -> EditModelError {
    EditModelError::MissingVariable {
        attribute: attribute.to_string(),
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> InstanceTree {
        let mut tree = InstanceTree::new("DefaultFiltersToggle");
        let severity = tree.root.add(PropertyNode::object("Severity"));
        severity.add(PropertyNode::variable("Severity", PropertyValue::Boolean(true)));
        severity.add(PropertyNode::variable("FromSeverity", PropertyValue::UInt16(1)));
        tree
    }

    #[test]
    fn test_typed_reads() {
        let tree = instance();
        assert!(tree.bool_value("Severity", "Severity").unwrap());
        assert_eq!(tree.u16_value("Severity", "FromSeverity").unwrap(), 1);
        assert!(matches!(
            tree.bool_value("Severity", "FromSeverity"),
            Err(EditModelError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_nodes_are_errors() {
        let tree = instance();
        assert!(matches!(
            tree.bool_value("Priority", "Urgent"),
            Err(EditModelError::MissingAttribute(_))
        ));
        assert!(matches!(
            tree.u16_value("Severity", "ToSeverity"),
            Err(EditModelError::MissingVariable { .. })
        ));
    }

    #[test]
    fn test_set_value_checks_declared_type() {
        let mut tree = instance();
        tree.set_value("Severity", "FromSeverity", PropertyValue::UInt16(300))
            .unwrap();
        assert_eq!(tree.u16_value("Severity", "FromSeverity").unwrap(), 300);

        let result = tree.set_value("Severity", "FromSeverity", PropertyValue::Boolean(true));
        assert!(matches!(result, Err(EditModelError::TypeMismatch { .. })));
    }
}
