//! Schema document model.
//!
//! A form schema is a recursive tree of [`SchemaNode`]s covering a
//! practical subset of JSON Schema: objects with ordered properties,
//! strings (with `email`/`date` formats, `pattern`, length bounds),
//! numbers and integers (with range bounds), booleans, enumerations,
//! and arrays of enumerated values. A node's `required` list applies to
//! its own children only; a child's required-ness is always decided by
//! its immediate parent.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::path::split_path;

/// The `type` keyword of a schema node.
///
/// Unrecognized type strings deserialize to [`NodeType::Unknown`] and
/// fall through to the plain-text widget instead of failing the whole
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A nested group of named child nodes.
    Object,
    /// A text value.
    String,
    /// A floating point value.
    Number,
    /// A whole number value.
    Integer,
    /// A yes/no value.
    Boolean,
    /// A list value; only arrays of enumerated values are rendered.
    Array,
    /// Any type keyword this engine does not recognize.
    #[serde(other)]
    Unknown,
}

/// A single node of the schema tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaNode {
    /// The node type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer display description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Named child nodes, in declaration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Names of children that must have a value. Scoped to this node.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Fixed set of allowed scalar values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Element schema for array nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// String format ("email" and "date" are recognized).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Regular expression a string value must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Legacy single-rule override for pattern failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_error_message: Option<String>,
    /// Lower bound for numeric values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Upper bound for numeric values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Minimum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Per-rule error message overrides, keyed by rule name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, String>,
}

impl SchemaNode {
    /// Parses a schema node from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parses a schema node from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns whether this node is an object with at least one child.
    pub fn is_group(&self) -> bool {
        self.node_type == Some(NodeType::Object)
            && self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Returns the override message for a rule, if one is declared.
    pub fn message(&self, rule: &str) -> Option<&str> {
        self.messages.get(rule).map(String::as_str)
    }
}

/// Resolves the schema node addressed by a dotted answer path.
///
/// Traversal descends through `properties` one segment at a time, with
/// the same empty-segment filtering as value paths. The empty path
/// resolves to the root node. Returns `None` when a segment is missing
/// or traversal would continue through a node without properties.
pub fn schema_at_path<'a>(root: &'a SchemaNode, path: &str) -> Option<&'a SchemaNode> {
    let mut node = root;
    for segment in split_path(path) {
        node = node.properties.as_ref()?.get(segment)?;
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person_schema() -> SchemaNode {
        SchemaNode::from_value(json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "minLength": 2},
                "contact": {
                    "type": "object",
                    "required": ["email"],
                    "properties": {
                        "email": {
                            "type": "string",
                            "format": "email",
                            "messages": {"required": "We need a way to reach you"}
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_camel_case_keywords() {
        let node = SchemaNode::from_value(json!({
            "type": "string",
            "minLength": 2,
            "maxLength": 10,
            "patternErrorMessage": "Letters only"
        }))
        .unwrap();
        assert_eq!(node.min_length, Some(2));
        assert_eq!(node.max_length, Some(10));
        assert_eq!(node.pattern_error_message.as_deref(), Some("Letters only"));
    }

    #[test]
    fn test_unknown_type_does_not_fail() {
        let node = SchemaNode::from_value(json!({"type": "widgety"})).unwrap();
        assert_eq!(node.node_type, Some(NodeType::Unknown));
    }

    #[test]
    fn test_schema_at_path() {
        let schema = person_schema();
        let email = schema_at_path(&schema, "contact.email").unwrap();
        assert_eq!(email.format.as_deref(), Some("email"));
        assert_eq!(
            email.message("required"),
            Some("We need a way to reach you")
        );
    }

    #[test]
    fn test_schema_at_path_empty_is_root() {
        let schema = person_schema();
        let root = schema_at_path(&schema, "").unwrap();
        assert!(root.is_group());
    }

    #[test]
    fn test_schema_at_path_misses() {
        let schema = person_schema();
        assert!(schema_at_path(&schema, "contact.phone").is_none());
        // descending through a leaf is a miss, not a panic
        assert!(schema_at_path(&schema, "name.anything").is_none());
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let schema = person_schema();
        let names: Vec<&String> = schema.properties.as_ref().unwrap().keys().collect();
        assert_eq!(names, ["name", "contact"]);
    }
}
