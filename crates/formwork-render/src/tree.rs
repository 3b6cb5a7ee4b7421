//! View tree construction.
//!
//! Turns schema + hints + answers + errors into a tree of groups and
//! fields ready for rendering. Group boundaries are purely visual; field
//! paths stay flat dotted strings, so data binding and validation agree
//! on addressing regardless of nesting.

use formwork_schema::{
    get_nested_value, join_path, select_widget, FieldErrors, NodeType, SchemaNode, UiHints,
    WidgetKind, MAX_DEPTH,
};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

/// One renderable input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    /// Flat dotted path binding this field to the answers.
    pub path: String,
    /// The field's own property name (last path segment).
    pub name: String,
    /// Display label; falls back to the property name.
    pub label: String,
    /// Optional help text.
    pub description: Option<String>,
    /// Whether the immediate parent lists this field as required.
    pub required: bool,
    /// The chosen input representation.
    pub widget: WidgetKind,
    /// Current value, if any.
    pub value: Option<Value>,
    /// Current validation message, if any.
    pub error: Option<String>,
}

impl FieldView {
    /// Returns whether this field renders a focusable input.
    pub fn is_input(&self) -> bool {
        !self.widget.is_static()
    }
}

/// A nested visual group of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    /// Dotted path prefix of the group.
    pub path: String,
    /// Group heading.
    pub title: Option<String>,
    /// Group description.
    pub description: Option<String>,
    /// Child nodes in schema order.
    pub children: Vec<ViewNode>,
}

/// A node of the view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    /// A nested group.
    Group(GroupView),
    /// A single field.
    Field(FieldView),
}

/// The whole form view.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    /// Form heading.
    pub title: Option<String>,
    /// Form description.
    pub description: Option<String>,
    /// Whether the form is a pure notice: no controls, no submit/reset.
    pub notice_only: bool,
    /// Top-level nodes in schema order.
    pub children: Vec<ViewNode>,
}

impl FormView {
    /// Counts fields currently carrying an error.
    pub fn error_count(&self) -> usize {
        fn count(nodes: &[ViewNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    ViewNode::Group(group) => count(&group.children),
                    ViewNode::Field(field) => usize::from(field.error.is_some()),
                })
                .sum()
        }
        count(&self.children)
    }
}

/// Builds the view tree for a form.
///
/// A root without properties produces a notice-only view: title and
/// description are shown and no controls are emitted.
pub fn build_view(
    schema: &SchemaNode,
    hints: &UiHints,
    answers: &Value,
    errors: &FieldErrors,
) -> FormView {
    let children = schema.properties.as_ref().map_or_else(Vec::new, |properties| {
        build_children(properties, &schema.required, "", 0, hints, answers, errors)
    });

    FormView {
        title: schema.title.clone(),
        description: schema.description.clone(),
        notice_only: children.is_empty(),
        children,
    }
}

fn build_children(
    properties: &IndexMap<String, SchemaNode>,
    required: &[String],
    base_path: &str,
    depth: usize,
    hints: &UiHints,
    answers: &Value,
    errors: &FieldErrors,
) -> Vec<ViewNode> {
    if depth > MAX_DEPTH {
        warn!(path = base_path, "schema nesting exceeds ceiling, skipping branch");
        return Vec::new();
    }

    let mut nodes = Vec::new();
    for (name, child) in properties {
        let path = join_path(base_path, name);

        if child.node_type == Some(NodeType::Object) {
            if let Some(child_properties) = &child.properties {
                if !child_properties.is_empty() {
                    nodes.push(ViewNode::Group(GroupView {
                        title: child.title.clone(),
                        description: child.description.clone(),
                        children: build_children(
                            child_properties,
                            &child.required,
                            &path,
                            depth + 1,
                            hints,
                            answers,
                            errors,
                        ),
                        path,
                    }));
                }
            }
            continue;
        }

        let hint = hints.at(&path);
        nodes.push(ViewNode::Field(FieldView {
            name: name.clone(),
            label: child.title.clone().unwrap_or_else(|| name.clone()),
            description: child.description.clone(),
            required: required.iter().any(|r| r == name),
            widget: select_widget(child, &hint),
            value: get_nested_value(answers, &path).cloned(),
            error: errors.get(&path).map(str::to_string),
            path,
        }));
    }
    nodes
}
