//! Renders a small registration form to stdout.
//!
//! ```bash
//! cargo run -p formwork-render --example registration_form
//! ```

use formwork_render::{build_view, render_form};
use formwork_schema::{validate, SchemaNode, UiHints};
use serde_json::json;

fn main() {
    let schema = SchemaNode::from_value(json!({
        "type": "object",
        "title": "Registration",
        "description": "Tell us who you are.",
        "required": ["name", "email"],
        "properties": {
            "name": {"type": "string", "title": "Full name", "minLength": 2},
            "email": {"type": "string", "title": "Email", "format": "email"},
            "bio": {"type": "string", "title": "About you"},
            "contact": {
                "type": "object",
                "title": "Preferences",
                "properties": {
                    "channel": {
                        "type": "string",
                        "title": "Preferred channel",
                        "enum": ["mail", "phone", "none"]
                    },
                    "topics": {
                        "type": "array",
                        "title": "Topics",
                        "items": {"enum": ["news", "events", "offers"]}
                    }
                }
            }
        }
    }))
    .expect("schema parses");

    let hints = UiHints::new(json!({
        "bio": {"widget": "textarea"},
        "contact": {
            "channel": {"widget": "radio", "options": {"inline": true}},
            "topics": {"widget": "checkboxes"}
        }
    }));

    let answers = json!({"name": "A", "contact": {"topics": ["news"]}});
    let errors = validate(&schema, &answers);

    let view = build_view(&schema, &hints, &answers, &errors);
    println!("{}", render_form(&view, "/submit", "POST"));
}
