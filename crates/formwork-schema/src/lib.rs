//! # formwork-schema
//!
//! Schema model and validation core for schema-driven forms.
//!
//! This crate provides:
//! - A recursive [`SchemaNode`] model for a practical JSON-Schema subset
//! - Dotted-path addressing over nested answer values and the schema tree
//! - UI hint resolution ([`UiHints`])
//! - Widget selection ([`select_widget`])
//! - The recursive validator ([`validate`]) with per-rule message overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use formwork_schema::{validate, SchemaNode};
//! use serde_json::json;
//!
//! let schema = SchemaNode::from_value(json!({
//!     "type": "object",
//!     "required": ["name"],
//!     "properties": {
//!         "name": {"type": "string"},
//!         "email": {"type": "string", "format": "email"}
//!     }
//! }))
//! .unwrap();
//!
//! let errors = validate(&schema, &json!({"email": "ada@example.com"}));
//! assert_eq!(errors.get("name"), Some("This field is required"));
//! assert!(errors.get("email").is_none());
//! ```
//!
//! ## Path addressing
//!
//! Answers live in a nested `serde_json::Value`; fields are addressed by
//! dotted paths. Writes are copy-on-write: [`set_nested_value`] returns a
//! new root and never mutates its input, so a render pass holding the old
//! root always observes a consistent snapshot.

mod error;
mod hints;
mod node;
mod path;
mod validate;
mod widget;

pub use error::{Result, SchemaError};
pub use hints::{HintWidget, UiHint, UiHints};
pub use node::{schema_at_path, NodeType, SchemaNode};
pub use path::{get_nested_value, join_path, set_nested_value};
pub use validate::{custom_message, validate, FieldErrors, MAX_DEPTH};
pub use widget::{scalar_text, select_widget, WidgetKind};
