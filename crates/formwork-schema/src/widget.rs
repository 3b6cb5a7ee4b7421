//! Widget selection.
//!
//! Decides which input representation a schema node renders as. The
//! rules form a closed, ordered dispatch with a plain-text fallback, so
//! selection is total over any node the parser accepts.

use serde_json::Value;

use crate::hints::{HintWidget, UiHint};
use crate::node::{NodeType, SchemaNode};

/// The input representation chosen for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Single-line text input.
    Text,
    /// Email input.
    Email,
    /// Date input.
    Date,
    /// Multiline text input.
    Textarea,
    /// Numeric input; `step` is fixed to 1 for integers.
    Number {
        /// Step attribute, when constrained.
        step: Option<u32>,
    },
    /// Single checkbox.
    Checkbox,
    /// Single select with a blank placeholder option prepended.
    Select {
        /// Allowed values.
        options: Vec<String>,
    },
    /// One radio input per option.
    RadioGroup {
        /// Allowed values.
        options: Vec<String>,
        /// Inline layout.
        inline: bool,
    },
    /// One checkbox per option; binds to a list value.
    CheckboxGroup {
        /// Allowed values.
        options: Vec<String>,
        /// Inline layout.
        inline: bool,
    },
    /// Multi-select list; binds to a list value.
    MultiSelect {
        /// Allowed values.
        options: Vec<String>,
    },
    /// Non-interactive informational label. No input, no name attribute.
    Static,
}

impl WidgetKind {
    /// Returns whether this widget renders a group of choice inputs.
    pub fn is_grouped_choice(&self) -> bool {
        matches!(self, Self::RadioGroup { .. } | Self::CheckboxGroup { .. })
    }

    /// Returns whether this widget renders no input at all.
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static)
    }
}

/// Renders a scalar JSON value as display text.
///
/// Strings come through unquoted; any other scalar uses its JSON
/// rendering.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Chooses the widget for a leaf schema node and its resolved hint.
///
/// Object nodes with children never reach this function; the view
/// builder renders them as nested groups.
pub fn select_widget(node: &SchemaNode, hint: &UiHint) -> WidgetKind {
    if node.node_type == Some(NodeType::Array) {
        if let Some(values) = node.items.as_ref().and_then(|items| items.enum_values.as_ref()) {
            let options = scalar_options(values);
            return if hint.widget == Some(HintWidget::Checkboxes) {
                WidgetKind::CheckboxGroup {
                    options,
                    inline: hint.inline,
                }
            } else {
                WidgetKind::MultiSelect { options }
            };
        }
    }

    if let Some(values) = &node.enum_values {
        // A one-member enum states a fixed fact, not a decision.
        if values.len() == 1 {
            return WidgetKind::Static;
        }
        if hint.widget == Some(HintWidget::Radio) {
            return WidgetKind::RadioGroup {
                options: scalar_options(values),
                inline: hint.inline,
            };
        }
        return WidgetKind::Select {
            options: scalar_options(values),
        };
    }

    match node.node_type {
        Some(NodeType::Boolean) => WidgetKind::Checkbox,
        Some(NodeType::String) => match node.format.as_deref() {
            Some("email") => WidgetKind::Email,
            Some("date") => WidgetKind::Date,
            _ if hint.widget == Some(HintWidget::Textarea) => WidgetKind::Textarea,
            _ => WidgetKind::Text,
        },
        Some(NodeType::Integer) => WidgetKind::Number { step: Some(1) },
        Some(NodeType::Number) => WidgetKind::Number { step: None },
        _ => WidgetKind::Text,
    }
}

fn scalar_options(values: &[Value]) -> Vec<String> {
    values.iter().map(scalar_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> SchemaNode {
        SchemaNode::from_value(value).unwrap()
    }

    #[test]
    fn test_checkbox_group_needs_hint() {
        let schema = node(json!({
            "type": "array",
            "items": {"enum": ["red", "green", "blue"]}
        }));
        let hinted = UiHint {
            widget: Some(HintWidget::Checkboxes),
            inline: true,
        };

        assert_eq!(
            select_widget(&schema, &hinted),
            WidgetKind::CheckboxGroup {
                options: vec!["red".into(), "green".into(), "blue".into()],
                inline: true,
            }
        );
        assert_eq!(
            select_widget(&schema, &UiHint::default()),
            WidgetKind::MultiSelect {
                options: vec!["red".into(), "green".into(), "blue".into()],
            }
        );
    }

    #[test]
    fn test_enum_radio_hint() {
        let schema = node(json!({"type": "string", "enum": ["yes", "no"]}));
        let hinted = UiHint {
            widget: Some(HintWidget::Radio),
            inline: false,
        };
        assert_eq!(
            select_widget(&schema, &hinted),
            WidgetKind::RadioGroup {
                options: vec!["yes".into(), "no".into()],
                inline: false,
            }
        );
    }

    #[test]
    fn test_single_member_enum_is_static() {
        let schema = node(json!({"type": "string", "enum": ["only-choice"]}));
        let hinted = UiHint {
            widget: Some(HintWidget::Radio),
            inline: false,
        };
        assert_eq!(select_widget(&schema, &hinted), WidgetKind::Static);
        // the hint makes no difference: one choice is never an input
        assert_eq!(select_widget(&schema, &UiHint::default()), WidgetKind::Static);
    }

    #[test]
    fn test_enum_defaults_to_select() {
        let schema = node(json!({"type": "integer", "enum": [1, 2, 3]}));
        assert_eq!(
            select_widget(&schema, &UiHint::default()),
            WidgetKind::Select {
                options: vec!["1".into(), "2".into(), "3".into()],
            }
        );
    }

    #[test]
    fn test_string_formats() {
        let email = node(json!({"type": "string", "format": "email"}));
        assert_eq!(select_widget(&email, &UiHint::default()), WidgetKind::Email);

        let date = node(json!({"type": "string", "format": "date"}));
        assert_eq!(select_widget(&date, &UiHint::default()), WidgetKind::Date);

        let plain = node(json!({"type": "string"}));
        let textarea_hint = UiHint {
            widget: Some(HintWidget::Textarea),
            inline: false,
        };
        assert_eq!(select_widget(&plain, &textarea_hint), WidgetKind::Textarea);
        assert_eq!(select_widget(&plain, &UiHint::default()), WidgetKind::Text);
    }

    #[test]
    fn test_numbers_and_booleans() {
        let boolean = node(json!({"type": "boolean"}));
        assert_eq!(
            select_widget(&boolean, &UiHint::default()),
            WidgetKind::Checkbox
        );

        let integer = node(json!({"type": "integer"}));
        assert_eq!(
            select_widget(&integer, &UiHint::default()),
            WidgetKind::Number { step: Some(1) }
        );

        let number = node(json!({"type": "number"}));
        assert_eq!(
            select_widget(&number, &UiHint::default()),
            WidgetKind::Number { step: None }
        );
    }

    #[test]
    fn test_fallback_is_text() {
        let unknown = node(json!({"type": "widgety"}));
        assert_eq!(select_widget(&unknown, &UiHint::default()), WidgetKind::Text);

        let untyped = node(json!({}));
        assert_eq!(select_widget(&untyped, &UiHint::default()), WidgetKind::Text);
    }
}
