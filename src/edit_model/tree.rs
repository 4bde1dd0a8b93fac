use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared data type of an edit model property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    /// Container node without a value of its own
    Object,
    Boolean,
    DateTime,
    UInt16,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyType::Object => "Object",
            PropertyType::Boolean => "Boolean",
            PropertyType::DateTime => "DateTime",
            PropertyType::UInt16 => "UInt16",
        };
        f.write_str(name)
    }
}

/// Value stored in an edit model property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PropertyValue {
    Boolean(bool),
    DateTime(DateTime<Utc>),
    UInt16(u16),
}

impl PropertyValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::DateTime(_) => PropertyType::DateTime,
            PropertyValue::UInt16(_) => PropertyType::UInt16,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            PropertyValue::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            PropertyValue::UInt16(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(value) => write!(f, "{value}"),
            PropertyValue::DateTime(value) => write!(f, "{}", value.to_rfc3339()),
            PropertyValue::UInt16(value) => write!(f, "{value}"),
        }
    }
}

/// Node of a schema or instance tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyNode {
    pub name: String,
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PropertyNode>,
}

impl PropertyNode {
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: PropertyType::Object,
            value: None,
            children: Vec::new(),
        }
    }

    pub fn variable(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            property_type: value.property_type(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PropertyNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a child and return a reference to it
    pub fn add(&mut self, node: PropertyNode) -> &mut PropertyNode {
        self.children.push(node);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Remove a child together with all of its descendants
    pub fn remove(&mut self, name: &str) -> Option<PropertyNode> {
        let index = self.children.iter().position(|child| child.name == name)?;
        Some(self.children.remove(index))
    }

    /// Visit every valued node below this one with its path relative to `prefix`
    pub fn for_each_value<F>(&self, prefix: &str, visit: &mut F)
    where
        F: FnMut(&str, &PropertyValue),
    {
        let path = join_path(prefix, &self.name);
        if let Some(value) = &self.value {
            visit(&path, value);
        }
        for child in &self.children {
            child.for_each_value(&path, visit);
        }
    }
}

pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_cascades_to_descendants() {
        let mut root = PropertyNode::object("Root");
        let attribute = root.add(PropertyNode::object("Priority"));
        attribute.add(PropertyNode::variable("Urgent", PropertyValue::Boolean(true)));

        let removed = root.remove("Priority").unwrap();
        assert_eq!(removed.children.len(), 1);
        assert!(root.children.is_empty());
        assert!(root.remove("Priority").is_none());
    }

    #[test]
    fn test_for_each_value_reports_paths() {
        let mut attribute = PropertyNode::object("Severity");
        attribute.add(PropertyNode::variable("Severity", PropertyValue::Boolean(false)));
        attribute.add(PropertyNode::variable("FromSeverity", PropertyValue::UInt16(1)));

        let mut seen = Vec::new();
        attribute.for_each_value("", &mut |path, value| {
            seen.push((path.to_string(), value.clone()))
        });

        assert_eq!(
            seen,
            vec![
                ("Severity/Severity".to_string(), PropertyValue::Boolean(false)),
                ("Severity/FromSeverity".to_string(), PropertyValue::UInt16(1)),
            ]
        );
    }
}
