//! Filters configuration: which attributes and criteria the alarm filter shows
//!
//! The configuration is a two-level tree. Top-level nodes are keyed by
//! attribute name and carry an "attribute enabled" flag; their children are
//! the criteria of that attribute, each with its own enabled flag.
//!
//! Two attributes are structural: `EventTime` holds the `FromEventTime` and
//! `ToEventTime` bounds, and `Severity` holds a single `Severity` child gating
//! the numeric bounds.

use crate::filter::FilterAttribute;
use crate::filter::names::{
    EVENT_TIME, FROM_EVENT_TIME, SEVERITY, TO_EVENT_TIME, is_range_value_name,
};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisibilityError {
    #[error("Filters configuration does not contain attribute '{0}'")]
    MissingAttribute(String),

    #[error("Filters configuration attribute '{attribute}' does not contain '{name}'")]
    MissingChild { attribute: String, name: String },

    #[error("'{name}' holds a range value of attribute '{attribute}' and cannot be a criterion")]
    ReservedName { attribute: String, name: String },
}

/// A single configuration flag with optional children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityNode {
    pub name: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VisibilityNode>,
}

impl VisibilityNode {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
            children: Vec::new(),
        }
    }

    pub fn with_children<I, S>(name: impl Into<String>, enabled: bool, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            enabled,
            children: children
                .into_iter()
                .map(|child| VisibilityNode::new(child, true))
                .collect(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&VisibilityNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut VisibilityNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    fn require_child(&self, name: &str) -> Result<&VisibilityNode, VisibilityError> {
        self.child(name).ok_or_else(|| VisibilityError::MissingChild {
            attribute: self.name.clone(),
            name: name.to_string(),
        })
    }
}

/// Which event time bounds are currently usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventTimeFlags {
    pub from: bool,
    pub to: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityConfiguration {
    pub attributes: Vec<VisibilityNode>,
}

impl VisibilityConfiguration {
    pub fn new(attributes: Vec<VisibilityNode>) -> Self {
        Self { attributes }
    }

    /// Configuration shipped with the alarm widget: every attribute with its
    /// well-known criteria. Free-text attributes start disabled and empty.
    pub fn builtin() -> Self {
        Self::new(vec![
            VisibilityNode::with_children(
                FilterAttribute::AlarmState.canonical_name(),
                true,
                [
                    "HighHighState",
                    "HighState",
                    "LowState",
                    "LowLowState",
                    "ActiveStateDigital",
                    "InactiveState",
                ],
            ),
            VisibilityNode::new(FilterAttribute::Name.canonical_name(), false),
            VisibilityNode::new(FilterAttribute::Class.canonical_name(), false),
            VisibilityNode::with_children(EVENT_TIME, true, [FROM_EVENT_TIME, TO_EVENT_TIME]),
            VisibilityNode::new(FilterAttribute::Group.canonical_name(), false),
            VisibilityNode::with_children(
                FilterAttribute::Inhibit.canonical_name(),
                true,
                [
                    "Unshelved",
                    "OneShotShelved",
                    "TimedShelved",
                    "Enabled",
                    "Disabled",
                    "Suppressed",
                    "Unsuppressed",
                ],
            ),
            VisibilityNode::new(FilterAttribute::Message.canonical_name(), false),
            VisibilityNode::with_children(
                FilterAttribute::Priority.canonical_name(),
                true,
                ["Urgent", "High", "Medium", "Low"],
            ),
            VisibilityNode::with_children(SEVERITY, true, [SEVERITY]),
            VisibilityNode::with_children(
                FilterAttribute::AlarmStatus.canonical_name(),
                true,
                [
                    "InAlarm",
                    "InAlarmAcked",
                    "InAlarmUnacked",
                    "InAlarmConfirmed",
                    "InAlarmUnconfirmed",
                    "NormalUnacked",
                ],
            ),
        ])
    }

    pub fn get(&self, attribute: &str) -> Option<&VisibilityNode> {
        self.attributes.iter().find(|node| node.name == attribute)
    }

    pub fn get_mut(&mut self, attribute: &str) -> Option<&mut VisibilityNode> {
        self.attributes.iter_mut().find(|node| node.name == attribute)
    }

    /// Attribute node that must exist; its absence is a configuration error
    pub fn attribute(&self, attribute: &str) -> Result<&VisibilityNode, VisibilityError> {
        self.get(attribute)
            .ok_or_else(|| VisibilityError::MissingAttribute(attribute.to_string()))
    }

    /// Lenient lookup used when building the panel: a missing attribute is hidden
    pub fn is_attribute_enabled(&self, attribute: &str) -> bool {
        match self.get(attribute) {
            Some(node) => node.enabled,
            None => {
                warn!(
                    "Filters configuration does not contain configuration for accordion: {}",
                    attribute
                );
                false
            }
        }
    }

    /// Lenient lookup used when building the panel: a missing criterion is hidden
    pub fn is_criterion_enabled(&self, attribute: &str, name: &str) -> bool {
        match self.get(attribute).and_then(|node| node.child(name)) {
            Some(node) => node.enabled,
            None => {
                warn!(
                    "Filters configuration does not contain configuration for checkbox: {} for attribute {}",
                    name, attribute
                );
                false
            }
        }
    }

    /// Event time bounds enabled both at attribute and at criterion level
    pub fn event_time_flags(&self) -> Result<EventTimeFlags, VisibilityError> {
        let event_time = self.attribute(EVENT_TIME)?;
        if !event_time.enabled {
            return Ok(EventTimeFlags::default());
        }

        Ok(EventTimeFlags {
            from: event_time.require_child(FROM_EVENT_TIME)?.enabled,
            to: event_time.require_child(TO_EVENT_TIME)?.enabled,
        })
    }

    /// Whether the severity range is enabled both at attribute and at criterion level
    pub fn severity_enabled(&self) -> Result<bool, VisibilityError> {
        let severity = self.attribute(SEVERITY)?;
        let child = severity.require_child(SEVERITY)?;
        Ok(severity.enabled && child.enabled)
    }

    /// Enable or disable an attribute, or one of its criteria.
    ///
    /// Unknown criteria are appended to the attribute, so new criteria can be
    /// introduced by enabling them. Range value names are rejected.
    pub fn set_enabled(
        &mut self,
        attribute: &str,
        criterion: Option<&str>,
        enabled: bool,
    ) -> Result<(), VisibilityError> {
        let node = self
            .get_mut(attribute)
            .ok_or_else(|| VisibilityError::MissingAttribute(attribute.to_string()))?;

        if let Some(name) = criterion
            && is_range_value_name(name)
        {
            return Err(VisibilityError::ReservedName {
                attribute: attribute.to_string(),
                name: name.to_string(),
            });
        }

        match criterion {
            None => node.enabled = enabled,
            Some(name) => match node.child_mut(name) {
                Some(child) => child.enabled = enabled,
                None => node.children.push(VisibilityNode::new(name, enabled)),
            },
        }
        Ok(())
    }
}
