//! Schema/instance reconciliation of the filters edit model
//!
//! The schema pass walks the filters configuration and adds or removes schema
//! properties so that exactly the enabled attributes and criteria exist. The
//! instance pass then walks the schema and prunes instance nodes without a
//! schema counterpart before adding the missing ones. Existing instance values
//! are never overwritten, and values of pruned nodes are retained so they come
//! back when their node does.

use super::instance::InstanceTree;
use super::tree::{PropertyNode, PropertyValue, join_path};
use crate::filter::names::{
    EVENT_TIME, FROM_EVENT_TIME, FROM_EVENT_TIME_DATE_TIME, FROM_SEVERITY, SEVERITY,
    TO_EVENT_TIME, TO_EVENT_TIME_DATE_TIME, TO_SEVERITY, is_range_value_name,
};
use crate::filter::set::{DEFAULT_FROM_SEVERITY, DEFAULT_TO_SEVERITY};
use crate::visibility::{VisibilityConfiguration, VisibilityError, VisibilityNode};
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;

/// Paths touched by one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Changes {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    /// Instance paths whose value came back from a previously removed node
    pub restored: Vec<String>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.restored.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub schema: Changes,
    pub instance: Changes,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.schema.is_empty() && self.instance.is_empty()
    }
}

/// Reconcile copies of `schema` and `instance` against `configuration`
pub fn reconcile(
    schema: &PropertyNode,
    instance: &InstanceTree,
    configuration: &VisibilityConfiguration,
) -> Result<(PropertyNode, InstanceTree), VisibilityError> {
    let mut schema = schema.clone();
    let mut instance = instance.clone();
    reconcile_in_place(&mut schema, &mut instance, configuration, Utc::now())?;
    Ok((schema, instance))
}

/// Reconcile both trees in place; `now` seeds newly created event time values
pub fn reconcile_in_place(
    schema: &mut PropertyNode,
    instance: &mut InstanceTree,
    configuration: &VisibilityConfiguration,
    now: DateTime<Utc>,
) -> Result<ReconcileReport, VisibilityError> {
    let schema_changes = update_schema(schema, configuration, now)?;
    let instance_changes = update_instance(instance, schema);
    Ok(ReconcileReport {
        schema: schema_changes,
        instance: instance_changes,
    })
}

/// Schema pass: mirror the enabled parts of the configuration
pub fn update_schema(
    schema: &mut PropertyNode,
    configuration: &VisibilityConfiguration,
    now: DateTime<Utc>,
) -> Result<Changes, VisibilityError> {
    // Structural attributes are required even when disabled
    configuration.event_time_flags()?;
    configuration.severity_enabled()?;

    let mut changes = Changes::default();

    for attribute in &configuration.attributes {
        if !attribute.enabled {
            if schema.remove(&attribute.name).is_some() {
                changes.removed.push(attribute.name.clone());
            }
            continue;
        }

        let setting = ensure_child(schema, "", &attribute.name, &mut changes, || {
            PropertyNode::object(&attribute.name)
        });

        match attribute.name.as_str() {
            EVENT_TIME => update_event_time(setting, attribute, now, &mut changes),
            SEVERITY => update_severity(setting, attribute, &mut changes),
            _ => {
                for child in &attribute.children {
                    update_flag(setting, child, &mut changes);
                }
            }
        }
    }

    Ok(changes)
}

fn update_event_time(
    setting: &mut PropertyNode,
    attribute: &VisibilityNode,
    now: DateTime<Utc>,
    changes: &mut Changes,
) {
    for child in &attribute.children {
        update_flag(setting, child, changes);

        let value_name = match child.name.as_str() {
            FROM_EVENT_TIME => FROM_EVENT_TIME_DATE_TIME,
            TO_EVENT_TIME => TO_EVENT_TIME_DATE_TIME,
            _ => continue,
        };
        sync_value(
            setting,
            value_name,
            child.enabled,
            PropertyValue::DateTime(now),
            changes,
        );
    }
}

fn update_severity(setting: &mut PropertyNode, attribute: &VisibilityNode, changes: &mut Changes) {
    for child in &attribute.children {
        update_flag(setting, child, changes);

        if child.name == SEVERITY {
            sync_value(
                setting,
                FROM_SEVERITY,
                child.enabled,
                PropertyValue::UInt16(DEFAULT_FROM_SEVERITY as u16),
                changes,
            );
            sync_value(
                setting,
                TO_SEVERITY,
                child.enabled,
                PropertyValue::UInt16(DEFAULT_TO_SEVERITY as u16),
                changes,
            );
        }
    }
}

fn update_flag(setting: &mut PropertyNode, child: &VisibilityNode, changes: &mut Changes) {
    // Range value leaves are owned by their gating criterion
    if is_range_value_name(&child.name) {
        warn!(
            "Filters configuration criterion {}/{} collides with a range value and is ignored",
            setting.name, child.name
        );
        return;
    }
    sync_value(
        setting,
        &child.name,
        child.enabled,
        PropertyValue::Boolean(false),
        changes,
    );
}

fn sync_value(
    setting: &mut PropertyNode,
    name: &str,
    visible: bool,
    default: PropertyValue,
    changes: &mut Changes,
) {
    if !visible {
        if setting.remove(name).is_some() {
            changes.removed.push(join_path(&setting.name, name));
        }
    } else {
        let prefix = setting.name.clone();
        ensure_child(setting, &prefix, name, changes, || {
            PropertyNode::variable(name, default)
        });
    }
}

fn ensure_child<'a>(
    parent: &'a mut PropertyNode,
    prefix: &str,
    name: &str,
    changes: &mut Changes,
    make: impl FnOnce() -> PropertyNode,
) -> &'a mut PropertyNode {
    let index = match parent.children.iter().position(|child| child.name == name) {
        Some(index) => index,
        None => {
            parent.children.push(make());
            changes.added.push(join_path(prefix, name));
            parent.children.len() - 1
        }
    };
    &mut parent.children[index]
}

/// Instance pass: prune nodes missing from the schema, then add the missing ones
pub fn update_instance(instance: &mut InstanceTree, schema: &PropertyNode) -> Changes {
    let mut changes = Changes::default();
    remove_unnecessary(
        &mut instance.root,
        schema,
        "",
        &mut instance.retained,
        &mut changes,
    );
    add_missing(
        &mut instance.root,
        schema,
        "",
        &mut instance.retained,
        &mut changes,
    );
    changes
}

fn remove_unnecessary(
    instance: &mut PropertyNode,
    schema: &PropertyNode,
    prefix: &str,
    retained: &mut BTreeMap<String, PropertyValue>,
    changes: &mut Changes,
) {
    instance.children.retain_mut(|child| {
        let path = join_path(prefix, &child.name);
        match schema.get(&child.name) {
            Some(schema_child) if schema_child.property_type == child.property_type => {
                remove_unnecessary(child, schema_child, &path, retained, changes);
                true
            }
            _ => {
                child.for_each_value(prefix, &mut |value_path, value| {
                    retained.insert(value_path.to_string(), value.clone());
                });
                changes.removed.push(path);
                false
            }
        }
    });
}

fn add_missing(
    instance: &mut PropertyNode,
    schema: &PropertyNode,
    prefix: &str,
    retained: &mut BTreeMap<String, PropertyValue>,
    changes: &mut Changes,
) {
    for schema_child in &schema.children {
        let path = join_path(prefix, &schema_child.name);
        match instance.get_mut(&schema_child.name) {
            Some(instance_child) => {
                add_missing(instance_child, schema_child, &path, retained, changes)
            }
            None => {
                let node = instantiate(schema_child, &path, retained, changes);
                instance.add(node);
                changes.added.push(path);
            }
        }
    }
}

/// Copy a schema subtree, preferring retained values over schema defaults
fn instantiate(
    schema: &PropertyNode,
    path: &str,
    retained: &mut BTreeMap<String, PropertyValue>,
    changes: &mut Changes,
) -> PropertyNode {
    let value = match retained.remove(path) {
        Some(value) if value.property_type() == schema.property_type => {
            changes.restored.push(path.to_string());
            Some(value)
        }
        _ => schema.value.clone(),
    };

    PropertyNode {
        name: schema.name.clone(),
        property_type: schema.property_type,
        value,
        children: schema
            .children
            .iter()
            .map(|child| instantiate(child, &join_path(path, &child.name), retained, changes))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_model::tree::PropertyType;

    fn now() -> DateTime<Utc> {
        "2024-03-01T08:00:00Z".parse().unwrap()
    }

    fn reconciled(configuration: &VisibilityConfiguration) -> (PropertyNode, InstanceTree) {
        let mut schema = PropertyNode::object("DefaultFiltersToggleAlarmWidget");
        let mut instance = InstanceTree::new("DefaultFiltersToggle");
        reconcile_in_place(&mut schema, &mut instance, configuration, now()).unwrap();
        (schema, instance)
    }

    #[test]
    fn test_schema_follows_enabled_flags() {
        let (schema, _) = reconciled(&VisibilityConfiguration::builtin());

        assert!(schema.get("Class").is_none(), "disabled attribute");
        let priority = schema.get("Priority").unwrap();
        assert_eq!(priority.property_type, PropertyType::Object);
        assert_eq!(
            priority.get("Urgent").unwrap().value,
            Some(PropertyValue::Boolean(false))
        );
    }

    #[test]
    fn test_structural_attributes_get_value_nodes() {
        let (schema, _) = reconciled(&VisibilityConfiguration::builtin());

        let event_time = schema.get(EVENT_TIME).unwrap();
        assert_eq!(
            event_time.get(FROM_EVENT_TIME_DATE_TIME).unwrap().value,
            Some(PropertyValue::DateTime(now()))
        );
        assert!(event_time.get(TO_EVENT_TIME_DATE_TIME).is_some());

        let severity = schema.get(SEVERITY).unwrap();
        assert_eq!(
            severity.get(FROM_SEVERITY).unwrap().value,
            Some(PropertyValue::UInt16(1))
        );
        assert_eq!(
            severity.get(TO_SEVERITY).unwrap().value,
            Some(PropertyValue::UInt16(1000))
        );
    }

    #[test]
    fn test_disabling_a_bound_drops_its_value_node() {
        let mut configuration = VisibilityConfiguration::builtin();
        let (mut schema, mut instance) = reconciled(&configuration);

        configuration
            .set_enabled(EVENT_TIME, Some(TO_EVENT_TIME), false)
            .unwrap();
        configuration
            .set_enabled(SEVERITY, Some(SEVERITY), false)
            .unwrap();
        reconcile_in_place(&mut schema, &mut instance, &configuration, now()).unwrap();

        let event_time = instance.attribute(EVENT_TIME).unwrap();
        assert!(event_time.get(TO_EVENT_TIME).is_none());
        assert!(event_time.get(TO_EVENT_TIME_DATE_TIME).is_none());
        assert!(event_time.get(FROM_EVENT_TIME_DATE_TIME).is_some());

        let severity = instance.attribute(SEVERITY).unwrap();
        assert!(severity.children.is_empty());
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let configuration = VisibilityConfiguration::builtin();
        let (mut schema, mut instance) = reconciled(&configuration);

        let report =
            reconcile_in_place(&mut schema, &mut instance, &configuration, Utc::now()).unwrap();
        assert!(report.is_empty(), "unexpected changes: {report:?}");
    }

    #[test]
    fn test_criteria_named_like_range_values_are_ignored() {
        let mut configuration = VisibilityConfiguration::builtin();
        configuration
            .get_mut(SEVERITY)
            .unwrap()
            .children
            .push(VisibilityNode::new(FROM_SEVERITY, false));
        configuration
            .get_mut(EVENT_TIME)
            .unwrap()
            .children
            .push(VisibilityNode::new(TO_EVENT_TIME_DATE_TIME, true));
        let (mut schema, mut instance) = reconciled(&configuration);

        let report =
            reconcile_in_place(&mut schema, &mut instance, &configuration, now()).unwrap();
        assert!(report.is_empty(), "unexpected changes: {report:?}");
        assert_eq!(instance.u16_value(SEVERITY, FROM_SEVERITY).unwrap(), 1);
        assert_eq!(
            instance
                .date_time_value(EVENT_TIME, TO_EVENT_TIME_DATE_TIME)
                .unwrap(),
            now()
        );
    }

    #[test]
    fn test_orphaned_subtrees_are_pruned_and_retained() {
        let mut configuration = VisibilityConfiguration::builtin();
        let (mut schema, mut instance) = reconciled(&configuration);
        instance
            .set_value("Priority", "High", PropertyValue::Boolean(true))
            .unwrap();

        configuration.set_enabled("Priority", None, false).unwrap();
        let report =
            reconcile_in_place(&mut schema, &mut instance, &configuration, now()).unwrap();

        assert_eq!(report.instance.removed, vec!["Priority".to_string()]);
        assert!(instance.root.get("Priority").is_none());
        assert_eq!(
            instance.retained_value("Priority/High"),
            Some(&PropertyValue::Boolean(true))
        );
    }

    #[test]
    fn test_missing_structural_attribute_is_fatal() {
        let mut configuration = VisibilityConfiguration::builtin();
        configuration.attributes.retain(|node| node.name != SEVERITY);

        let mut schema = PropertyNode::object("Type");
        let mut instance = InstanceTree::new("Instance");
        let result = reconcile_in_place(&mut schema, &mut instance, &configuration, now());
        assert!(matches!(
            result,
            Err(VisibilityError::MissingAttribute(name)) if name == SEVERITY
        ));
    }
}
