//! Recursive schema validation.
//!
//! [`validate`] walks the schema tree alongside the answers, producing a
//! flat map of dotted path to error message. Rules run in a fixed order
//! and stop at the first failure per field, so a field never carries
//! more than one message. The walk is bounded by [`MAX_DEPTH`] to guard
//! against schema authoring mistakes; a too-deep branch is skipped with
//! a warning rather than failing the whole pass.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::node::{schema_at_path, NodeType, SchemaNode};
use crate::path::{get_nested_value, join_path};
use crate::widget::scalar_text;

/// Ceiling for schema descent, shared with the view builder.
pub const MAX_DEPTH: usize = 10;

/// Flat collection of validation errors keyed by dotted path.
///
/// Rebuilt in full by every validation pass; absence of a key means the
/// field is currently valid. Iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    /// Creates an empty error collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for a field, replacing any previous one.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(path.into(), message.into());
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the message for a field.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    /// Drops the message for a field; returns whether one was present.
    pub fn clear_path(&mut self, path: &str) -> bool {
        self.errors.remove(path).is_some()
    }

    /// Drops all messages.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterates over `(path, message)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(path, message)| (path.as_str(), message.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (path, message) in &self.errors {
            writeln!(f, "{path}: {message}")?;
        }
        Ok(())
    }
}

/// Looks up a schema-embedded override message for a failed rule.
///
/// The answer path is resolved against the schema tree and the node's
/// `messages` map is consulted for the rule name. Any miss along the way
/// yields `None`; callers fall back to the built-in default.
pub fn custom_message<'a>(schema: &'a SchemaNode, field_path: &str, rule: &str) -> Option<&'a str> {
    schema_at_path(schema, field_path)?.message(rule)
}

/// Validates answers against a schema, returning the full error map.
///
/// An empty result means the submission is valid. Fields never visited
/// because an ancestor path is absent are implicitly valid.
pub fn validate(schema: &SchemaNode, answers: &Value) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(properties) = &schema.properties {
        validate_node(
            schema,
            properties,
            &schema.required,
            "",
            0,
            answers,
            &mut errors,
        );
    }
    errors
}

fn validate_node(
    schema: &SchemaNode,
    properties: &IndexMap<String, SchemaNode>,
    required: &[String],
    base_path: &str,
    depth: usize,
    answers: &Value,
    errors: &mut FieldErrors,
) {
    if depth > MAX_DEPTH {
        warn!(path = base_path, "schema nesting exceeds ceiling, skipping branch");
        return;
    }

    for name in required {
        let path = join_path(base_path, name);
        if is_blank(get_nested_value(answers, &path)) {
            let message = custom_message(schema, &path, "required")
                .unwrap_or("This field is required")
                .to_string();
            errors.add(path, message);
        }
    }

    for (name, child) in properties {
        let path = join_path(base_path, name);

        // Object nodes recurse with their own required list and never
        // take leaf-level rules themselves.
        if child.node_type == Some(NodeType::Object) {
            if let Some(child_properties) = &child.properties {
                validate_node(
                    schema,
                    child_properties,
                    &child.required,
                    &path,
                    depth + 1,
                    answers,
                    errors,
                );
            }
            continue;
        }

        let Some(value) = get_nested_value(answers, &path) else {
            continue;
        };
        if is_blank(Some(value)) {
            continue;
        }
        if let Some(message) = check_leaf(schema, child, &path, value) {
            errors.add(path, message);
        }
    }
}

/// Applies leaf rules in order, returning the first failure.
fn check_leaf(schema: &SchemaNode, node: &SchemaNode, path: &str, value: &Value) -> Option<String> {
    if node.format.as_deref() == Some("email") && !email_regex().is_match(&scalar_text(value)) {
        return Some(
            custom_message(schema, path, "email")
                .unwrap_or("Invalid email address")
                .to_string(),
        );
    }

    if let Some(pattern) = &node.pattern {
        match Regex::new(pattern) {
            Ok(regex) => {
                if !regex.is_match(&scalar_text(value)) {
                    let message = node
                        .pattern_error_message
                        .clone()
                        .or_else(|| custom_message(schema, path, "pattern").map(str::to_string))
                        .unwrap_or_else(|| "Invalid format".to_string());
                    return Some(message);
                }
            }
            Err(err) => {
                warn!(path, error = %err, "unparsable pattern in schema, skipping rule");
            }
        }
    }

    match node.node_type {
        Some(NodeType::Number | NodeType::Integer) => {
            let Some(number) = numeric_value(value) else {
                return Some(
                    custom_message(schema, path, "type")
                        .unwrap_or("Must be a number")
                        .to_string(),
                );
            };
            if let Some(minimum) = node.minimum {
                if number < minimum {
                    return Some(
                        custom_message(schema, path, "min")
                            .map_or_else(|| format!("Must be at least {minimum}"), str::to_string),
                    );
                }
            }
            if let Some(maximum) = node.maximum {
                if number > maximum {
                    return Some(
                        custom_message(schema, path, "max")
                            .map_or_else(|| format!("Must be at most {maximum}"), str::to_string),
                    );
                }
            }
        }
        Some(NodeType::String) => {
            if let Some(text) = value.as_str() {
                let length = text.chars().count();
                if let Some(min_length) = node.min_length {
                    if length < min_length {
                        return Some(custom_message(schema, path, "minLength").map_or_else(
                            || format!("Must be at least {min_length} characters"),
                            str::to_string,
                        ));
                    }
                }
                if let Some(max_length) = node.max_length {
                    if length > max_length {
                        return Some(custom_message(schema, path, "maxLength").map_or_else(
                            || format!("Must be at most {max_length} characters"),
                            str::to_string,
                        ));
                    }
                }
            }
        }
        _ => {}
    }

    None
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn email_regex() -> Regex {
    // Standard local@domain.tld shape.
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
}
