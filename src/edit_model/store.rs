use super::error::EditModelError;
use super::instance::InstanceTree;
use super::reconcile::{ReconcileReport, reconcile_in_place};
use super::tree::PropertyNode;
use crate::visibility::VisibilityConfiguration;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Names identifying one edit model: the instance is stored under
/// `edit_model`, its schema type under `edit_model + widget`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditModelNames {
    pub edit_model: String,
    pub widget: String,
}

impl EditModelNames {
    pub fn new(edit_model: impl Into<String>, widget: impl Into<String>) -> Self {
        Self {
            edit_model: edit_model.into(),
            widget: widget.into(),
        }
    }

    pub fn type_name(&self) -> String {
        format!("{}{}", self.edit_model, self.widget)
    }
}

/// Persisted schema types and instances of filter edit models
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditModelStore {
    #[serde(default)]
    types: BTreeMap<String, PropertyNode>,
    #[serde(default)]
    instances: BTreeMap<String, InstanceTree>,
}

impl EditModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the edit model if needed and bring it in line with `configuration`.
    ///
    /// Calling this again with an unchanged configuration is a no-op.
    pub fn create(
        &mut self,
        names: &EditModelNames,
        configuration: &VisibilityConfiguration,
    ) -> Result<ReconcileReport, EditModelError> {
        let type_name = names.type_name();
        let schema = self
            .types
            .entry(type_name.clone())
            .or_insert_with(|| PropertyNode::object(&type_name));
        let instance = self
            .instances
            .entry(names.edit_model.clone())
            .or_insert_with(|| InstanceTree::new(&names.edit_model));

        let report = reconcile_in_place(schema, instance, configuration, Utc::now())?;

        if report.is_empty() {
            debug!("Edit model {} is up to date", names.edit_model);
        } else {
            info!(
                "Edit model {} reconciled: {} schema node(s) added, {} removed; {} instance node(s) added, {} removed, {} restored",
                names.edit_model,
                report.schema.added.len(),
                report.schema.removed.len(),
                report.instance.added.len(),
                report.instance.removed.len(),
                report.instance.restored.len()
            );
        }
        Ok(report)
    }

    pub fn get(&self, edit_model: &str) -> Result<&InstanceTree, EditModelError> {
        self.instances
            .get(edit_model)
            .ok_or_else(|| EditModelError::NotFound(edit_model.to_string()))
    }

    pub fn get_mut(&mut self, edit_model: &str) -> Result<&mut InstanceTree, EditModelError> {
        self.instances
            .get_mut(edit_model)
            .ok_or_else(|| EditModelError::NotFound(edit_model.to_string()))
    }

    pub fn schema(&self, names: &EditModelNames) -> Option<&PropertyNode> {
        self.types.get(&names.type_name())
    }

    /// Remove the instance and its schema type, discarding every stored value
    pub fn delete(&mut self, names: &EditModelNames) -> bool {
        let instance = self.instances.remove(&names.edit_model).is_some();
        let schema = self.types.remove(&names.type_name()).is_some();
        instance || schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_model::tree::PropertyValue;

    fn names() -> EditModelNames {
        EditModelNames::new("DefaultFiltersToggle", "AlarmWidget")
    }

    #[test]
    fn test_get_before_create_is_an_error() {
        let store = EditModelStore::new();
        assert!(matches!(
            store.get("DefaultFiltersToggle"),
            Err(EditModelError::NotFound(_))
        ));
    }

    #[test]
    fn test_create_builds_type_and_instance() {
        let mut store = EditModelStore::new();
        store
            .create(&names(), &VisibilityConfiguration::builtin())
            .unwrap();

        let schema = store.schema(&names()).unwrap();
        assert_eq!(schema.name, "DefaultFiltersToggleAlarmWidget");
        let instance = store.get("DefaultFiltersToggle").unwrap();
        assert_eq!(instance.root.children.len(), schema.children.len());
    }

    #[test]
    fn test_delete_then_create_resets_values() {
        let configuration = VisibilityConfiguration::builtin();
        let mut store = EditModelStore::new();
        store.create(&names(), &configuration).unwrap();
        store
            .get_mut("DefaultFiltersToggle")
            .unwrap()
            .set_value("Priority", "Urgent", PropertyValue::Boolean(true))
            .unwrap();

        assert!(store.delete(&names()));
        store.create(&names(), &configuration).unwrap();

        let instance = store.get("DefaultFiltersToggle").unwrap();
        assert!(!instance.bool_value("Priority", "Urgent").unwrap());
        assert!(!store.delete(&EditModelNames::new("Other", "AlarmWidget")));
    }
}
