//! UI hint metadata.
//!
//! The schema document carries a `metadata` tree mirroring the schema's
//! shape. A node of that tree may select a non-default widget and
//! display options for the field at the same path; every other key at a
//! node is the name of a child entry. The tree is kept as raw JSON and
//! resolved per path, so hosts can pass the document through untouched.

use serde_json::Value;

use crate::path::split_path;

/// Widget selections a hint can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintWidget {
    /// Multiline text entry.
    Textarea,
    /// One radio input per enumerated value.
    Radio,
    /// One checkbox per enumerated value.
    Checkboxes,
}

/// The resolved hint for one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiHint {
    /// Requested widget, if any.
    pub widget: Option<HintWidget>,
    /// Whether grouped choices lay out inline.
    pub inline: bool,
}

/// The hint tree for one form.
#[derive(Debug, Clone)]
pub struct UiHints {
    tree: Value,
}

impl Default for UiHints {
    fn default() -> Self {
        Self { tree: Value::Null }
    }
}

impl UiHints {
    /// Wraps a metadata tree.
    pub fn new(metadata: Value) -> Self {
        Self { tree: metadata }
    }

    /// An empty hint tree; every lookup yields the default hint.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolves the hint for a dotted field path.
    ///
    /// Missing entries anywhere along the path yield the default hint
    /// (no widget selection, block layout).
    pub fn at(&self, path: &str) -> UiHint {
        let mut node = &self.tree;
        for segment in split_path(path) {
            match node.get(segment) {
                Some(child) => node = child,
                None => return UiHint::default(),
            }
        }

        UiHint {
            widget: node
                .get("widget")
                .and_then(Value::as_str)
                .and_then(parse_widget),
            inline: node
                .get("options")
                .and_then(|options| options.get("inline"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

fn parse_widget(name: &str) -> Option<HintWidget> {
    match name {
        "textarea" => Some(HintWidget::Textarea),
        "radio" => Some(HintWidget::Radio),
        "checkboxes" => Some(HintWidget::Checkboxes),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hint_lookup() {
        let hints = UiHints::new(json!({
            "bio": {"widget": "textarea"},
            "contact": {
                "preferred": {"widget": "radio", "options": {"inline": true}}
            }
        }));

        assert_eq!(hints.at("bio").widget, Some(HintWidget::Textarea));
        let preferred = hints.at("contact.preferred");
        assert_eq!(preferred.widget, Some(HintWidget::Radio));
        assert!(preferred.inline);
    }

    #[test]
    fn test_missing_entries_default() {
        let hints = UiHints::new(json!({"bio": {"widget": "textarea"}}));
        assert_eq!(hints.at("name"), UiHint::default());
        assert_eq!(hints.at("contact.email"), UiHint::default());
        assert_eq!(UiHints::empty().at("anything"), UiHint::default());
    }

    #[test]
    fn test_unrecognized_widget_name_ignored() {
        let hints = UiHints::new(json!({"bio": {"widget": "carousel"}}));
        assert_eq!(hints.at("bio").widget, None);
    }
}
