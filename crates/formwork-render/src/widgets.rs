//! Bootstrap 5 widget fragments.
//!
//! Each widget renders the bare input markup for one field; wrapping
//! labels, help text, and error feedback are handled by the form
//! renderer. The `name` attribute is always the field's flat dotted
//! path, which is what ties an input back to its place in the answers.

use formwork_schema::{scalar_text, WidgetKind};
use serde_json::Value;

use crate::tree::FieldView;

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Derives the element id for a field path.
pub fn field_id(path: &str) -> String {
    format!("id_{}", path.replace('.', "_"))
}

/// Renders the input markup for a field.
///
/// Static fields render nothing here; the form renderer emits their
/// label-only representation.
pub fn render_widget(field: &FieldView) -> String {
    match &field.widget {
        WidgetKind::Text => text_input(field, "text", None),
        WidgetKind::Email => text_input(field, "email", None),
        WidgetKind::Date => text_input(field, "date", None),
        WidgetKind::Number { step } => text_input(field, "number", *step),
        WidgetKind::Textarea => textarea(field),
        WidgetKind::Checkbox => checkbox(field),
        WidgetKind::Select { options } => select(field, options, false),
        WidgetKind::MultiSelect { options } => select(field, options, true),
        WidgetKind::RadioGroup { options, inline } => choice_group(field, options, "radio", *inline),
        WidgetKind::CheckboxGroup { options, inline } => {
            choice_group(field, options, "checkbox", *inline)
        }
        WidgetKind::Static => String::new(),
    }
}

fn control_class(base: &str, field: &FieldView) -> String {
    if field.error.is_some() {
        format!("{base} is-invalid")
    } else {
        base.to_string()
    }
}

fn value_text(field: &FieldView) -> Option<String> {
    field.value.as_ref().map(scalar_text)
}

fn required_attr(field: &FieldView) -> &'static str {
    if field.required {
        r#" required="required""#
    } else {
        ""
    }
}

fn text_input(field: &FieldView, input_type: &str, step: Option<u32>) -> String {
    let id = field_id(&field.path);
    let class = control_class("form-control", field);

    let value_attr = value_text(field)
        .map(|v| format!(r#" value="{}""#, html_escape(&v)))
        .unwrap_or_default();

    let step_attr = step.map(|s| format!(r#" step="{s}""#)).unwrap_or_default();

    format!(
        r#"<input type="{}" class="{}" id="{}" name="{}"{}{}{}>"#,
        input_type,
        class,
        id,
        html_escape(&field.path),
        value_attr,
        step_attr,
        required_attr(field)
    )
}

fn textarea(field: &FieldView) -> String {
    let id = field_id(&field.path);
    let class = control_class("form-control", field);
    let content = value_text(field).map(|v| html_escape(&v)).unwrap_or_default();

    format!(
        r#"<textarea class="{}" id="{}" name="{}" rows="4"{}>{}</textarea>"#,
        class,
        id,
        html_escape(&field.path),
        required_attr(field),
        content
    )
}

fn checkbox(field: &FieldView) -> String {
    let id = field_id(&field.path);
    let class = control_class("form-check-input", field);
    let checked = matches!(&field.value, Some(Value::Bool(true)))
        || value_text(field).is_some_and(|v| v == "true" || v == "on" || v == "1");
    let checked_attr = if checked { " checked" } else { "" };

    format!(
        r#"<div class="form-check">
  <input class="{}" type="checkbox" id="{}" name="{}" value="true"{checked_attr}>
  <label class="form-check-label" for="{}">{}</label>
</div>"#,
        class,
        id,
        html_escape(&field.path),
        id,
        html_escape(&field.label)
    )
}

fn select(field: &FieldView, options: &[String], multiple: bool) -> String {
    let id = field_id(&field.path);
    let class = control_class("form-select", field);

    let mut rendered = String::new();
    if !multiple {
        // blank placeholder so an untouched select binds no value
        rendered.push_str(r#"<option value=""></option>"#);
    }
    for option in options {
        let selected = if is_selected(field, option, multiple) {
            " selected"
        } else {
            ""
        };
        rendered.push_str(&format!(
            r#"<option value="{}"{selected}>{}</option>"#,
            html_escape(option),
            html_escape(option)
        ));
    }

    let multiple_attr = if multiple { r#" multiple="multiple""# } else { "" };
    format!(
        r#"<select class="{}" id="{}" name="{}"{multiple_attr}>{}</select>"#,
        class,
        id,
        html_escape(&field.path),
        rendered
    )
}

fn choice_group(field: &FieldView, options: &[String], input_type: &str, inline: bool) -> String {
    let wrapper_class = if inline {
        "form-check form-check-inline"
    } else {
        "form-check"
    };
    let class = control_class("form-check-input", field);
    let multiple = input_type == "checkbox";

    let mut html = String::new();
    for (i, option) in options.iter().enumerate() {
        let id = format!("{}_{i}", field_id(&field.path));
        let checked = if is_selected(field, option, multiple) {
            " checked"
        } else {
            ""
        };

        html.push_str(&format!(
            r#"<div class="{}">
  <input class="{}" type="{}" id="{}" name="{}" value="{}"{checked}>
  <label class="form-check-label" for="{}">{}</label>
</div>
"#,
            wrapper_class,
            class,
            input_type,
            id,
            html_escape(&field.path),
            html_escape(option),
            id,
            html_escape(option)
        ));
    }
    html
}

fn is_selected(field: &FieldView, option: &str, multiple: bool) -> bool {
    if multiple {
        field
            .value
            .as_ref()
            .and_then(Value::as_array)
            .is_some_and(|items| items.iter().any(|item| scalar_text(item) == option))
    } else {
        value_text(field).is_some_and(|v| v == option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_schema::WidgetKind;
    use serde_json::json;

    fn field(widget: WidgetKind) -> FieldView {
        FieldView {
            path: "contact.email".to_string(),
            name: "email".to_string(),
            label: "Email".to_string(),
            description: None,
            required: false,
            widget,
            value: None,
            error: None,
        }
    }

    #[test]
    fn test_text_input_binds_path_as_name() {
        let html = render_widget(&field(WidgetKind::Text));
        assert!(html.contains(r#"name="contact.email""#));
        assert!(html.contains(r#"id="id_contact_email""#));
        assert!(html.contains(r#"class="form-control""#));
    }

    #[test]
    fn test_email_and_date_types() {
        assert!(render_widget(&field(WidgetKind::Email)).contains(r#"type="email""#));
        assert!(render_widget(&field(WidgetKind::Date)).contains(r#"type="date""#));
    }

    #[test]
    fn test_integer_step() {
        let html = render_widget(&field(WidgetKind::Number { step: Some(1) }));
        assert!(html.contains(r#"step="1""#));
        let html = render_widget(&field(WidgetKind::Number { step: None }));
        assert!(!html.contains("step="));
    }

    #[test]
    fn test_error_marks_invalid() {
        let mut f = field(WidgetKind::Text);
        f.error = Some("Invalid email address".to_string());
        assert!(render_widget(&f).contains("is-invalid"));
    }

    #[test]
    fn test_value_is_escaped() {
        let mut f = field(WidgetKind::Text);
        f.value = Some(json!("a<b>\"c\""));
        let html = render_widget(&f);
        assert!(html.contains("a&lt;b&gt;&quot;c&quot;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_checkbox_checked_states() {
        let mut f = field(WidgetKind::Checkbox);
        f.value = Some(json!(true));
        assert!(render_widget(&f).contains("checked"));
        f.value = Some(json!("on"));
        assert!(render_widget(&f).contains("checked"));
        f.value = Some(json!(false));
        assert!(!render_widget(&f).contains("checked"));
    }

    #[test]
    fn test_select_prepends_blank_and_selects() {
        let mut f = field(WidgetKind::Select {
            options: vec!["mail".into(), "phone".into()],
        });
        f.value = Some(json!("phone"));
        let html = render_widget(&f);
        assert!(html.starts_with("<select"));
        assert!(html.contains(r#"<option value=""></option>"#));
        assert!(html.contains(r#"<option value="phone" selected>"#));
    }

    #[test]
    fn test_multiselect_has_no_blank() {
        let mut f = field(WidgetKind::MultiSelect {
            options: vec!["red".into(), "blue".into()],
        });
        f.value = Some(json!(["blue"]));
        let html = render_widget(&f);
        assert!(html.contains(r#"multiple="multiple""#));
        assert!(!html.contains(r#"<option value=""></option>"#));
        assert!(html.contains(r#"<option value="blue" selected>"#));
    }

    #[test]
    fn test_radio_group_one_input_per_option() {
        let f = field(WidgetKind::RadioGroup {
            options: vec!["yes".into(), "no".into()],
            inline: false,
        });
        let html = render_widget(&f);
        assert_eq!(html.matches(r#"type="radio""#).count(), 2);
        assert!(html.contains(r#"id="id_contact_email_0""#));
    }

    #[test]
    fn test_checkbox_group_inline_and_membership() {
        let mut f = field(WidgetKind::CheckboxGroup {
            options: vec!["red".into(), "blue".into()],
            inline: true,
        });
        f.value = Some(json!(["red"]));
        let html = render_widget(&f);
        assert!(html.contains("form-check-inline"));
        assert_eq!(html.matches(" checked").count(), 1);
    }

    #[test]
    fn test_static_renders_nothing() {
        assert!(render_widget(&field(WidgetKind::Static)).is_empty());
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }
}
