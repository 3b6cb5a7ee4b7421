//! The live form session.

use serde_json::{Map, Value};

use formwork_render::{build_view, FormView};
use formwork_schema::{
    get_nested_value, schema_at_path, set_nested_value, validate, FieldErrors, SchemaNode, UiHints,
};

use crate::transport::FormDocument;

/// The active form: schema, hints, answers, and errors for one form
/// name and version.
///
/// A session is created whole on load or forward-navigation and
/// discarded whole when the client moves on; answers are never merged
/// across sessions.
#[derive(Debug, Clone)]
pub struct FormSession {
    form_fname: String,
    form_version: String,
    schema: SchemaNode,
    hints: UiHints,
    answers: Value,
    initial_answers: Value,
    errors: FieldErrors,
}

impl FormSession {
    /// Creates a session from a fetched document and optional prior
    /// answers.
    pub fn new(form_fname: impl Into<String>, document: FormDocument, answers: Option<Value>) -> Self {
        let answers = answers.unwrap_or_else(|| Value::Object(Map::new()));
        Self {
            form_fname: form_fname.into(),
            form_version: document.version,
            schema: document.schema,
            hints: UiHints::new(document.metadata),
            initial_answers: answers.clone(),
            answers,
            errors: FieldErrors::new(),
        }
    }

    /// The form name this session was loaded for.
    pub fn form_fname(&self) -> &str {
        &self.form_fname
    }

    /// The schema version this session was loaded with.
    pub fn form_version(&self) -> &str {
        &self.form_version
    }

    /// The session's schema root.
    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    /// The current answers tree.
    pub fn answers(&self) -> &Value {
        &self.answers
    }

    /// The current field errors.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Reads the value at a dotted path.
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        get_nested_value(&self.answers, path)
    }

    /// Resolves the schema node at a dotted path.
    pub fn schema_at(&self, path: &str) -> Option<&SchemaNode> {
        schema_at_path(&self.schema, path)
    }

    /// Writes a value at a dotted path.
    ///
    /// The answers root is replaced copy-on-write, and any error shown
    /// for that path is cleared immediately, before any async work can
    /// observe it.
    pub fn set_value(&mut self, path: &str, value: Value) {
        self.answers = set_nested_value(&self.answers, path, value);
        self.errors.clear_path(path);
    }

    /// Runs a full validation pass, replacing the error map.
    ///
    /// Returns whether the answers are valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.schema, &self.answers);
        self.errors.is_empty()
    }

    /// Restores the answers captured at load time and clears errors.
    pub fn reset(&mut self) {
        self.answers = self.initial_answers.clone();
        self.errors.clear();
    }

    /// Builds the renderable view of the current state.
    pub fn view(&self) -> FormView {
        build_view(&self.schema, &self.hints, &self.answers, &self.errors)
    }
}
