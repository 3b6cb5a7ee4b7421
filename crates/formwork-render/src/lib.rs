//! # formwork-render
//!
//! View tree construction and Bootstrap 5 rendering for schema-driven
//! forms.
//!
//! This crate provides:
//! - [`build_view`] — schema + hints + answers + errors → a [`FormView`]
//!   tree of groups and fields
//! - Bootstrap 5 widget fragments per [`formwork_schema::WidgetKind`]
//! - [`render_form`] — the complete form with validation summary and
//!   submit/reset controls
//! - Success and failure notice fragments
//!
//! ## Quick Start
//!
//! ```rust
//! use formwork_render::{build_view, render_form};
//! use formwork_schema::{FieldErrors, SchemaNode, UiHints};
//! use serde_json::json;
//!
//! let schema = SchemaNode::from_value(json!({
//!     "type": "object",
//!     "title": "Signup",
//!     "required": ["name"],
//!     "properties": {"name": {"type": "string", "title": "Name"}}
//! }))
//! .unwrap();
//!
//! let view = build_view(&schema, &UiHints::empty(), &json!({}), &FieldErrors::new());
//! let html = render_form(&view, "/submit", "POST");
//! assert!(html.contains("Signup"));
//! ```

mod html;
mod tree;
mod widgets;

pub use html::{
    render_error_notice, render_field, render_form, render_group, render_node,
    render_success_notice, SUBMIT_SUCCESS_NOTICE, VALIDATION_SUMMARY,
};
pub use tree::{build_view, FieldView, FormView, GroupView, ViewNode};
pub use widgets::{field_id, html_escape, render_widget};
