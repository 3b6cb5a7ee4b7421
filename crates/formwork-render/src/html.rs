//! Whole-form HTML rendering.
//!
//! Assembles the view tree into Bootstrap 5 markup: a validation summary
//! before the first field when any error is present, labels and help
//! text per field, fieldset/legend framing for grouped choices and
//! nested groups, and submit/reset buttons. Notice-only views render
//! their heading and description with no controls at all.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Li, Ul};

use crate::tree::{FieldView, FormView, GroupView, ViewNode};
use crate::widgets::{field_id, html_escape, render_widget};

/// Notice shown above the fields when validation fails.
pub const VALIDATION_SUMMARY: &str = "Please correct the errors below.";

/// Default success notice when the server sends no messages.
pub const SUBMIT_SUCCESS_NOTICE: &str = "Form submitted successfully.";

/// Renders a complete form.
///
/// The returned fragment carries the heading, the summary notice when
/// errors are present, every field and group in schema order, and the
/// submit/reset buttons. A notice-only view gets heading and
/// description only.
pub fn render_form(view: &FormView, action: &str, method: &str) -> String {
    let mut out = String::new();
    if let Some(title) = &view.title {
        out.push_str(&format!("<h2>{}</h2>", html_escape(title)));
    }
    if let Some(description) = &view.description {
        out.push_str(&format!(
            r#"<p class="form-description">{}</p>"#,
            html_escape(description)
        ));
    }
    if view.notice_only {
        return out;
    }

    let mut form = html! {
        form.action(#action).method(#method)
    };

    if view.error_count() > 0 {
        form = form.child::<Div, _>(|d| {
            d.class("alert alert-danger")
                .attr("role", "alert")
                .text(VALIDATION_SUMMARY)
        });
    }

    for node in &view.children {
        let node_html = render_node(node);
        form = form.child::<Div, _>(|d| d.raw(&node_html));
    }

    form = form.child::<Div, _>(|d| {
        let submit = html! {
            button.type_("submit").class("btn btn-primary") {
                "Submit"
            }
        };
        let reset = html! {
            button.type_("reset").class("btn btn-secondary ms-2") {
                "Reset"
            }
        };
        d.class("form-actions")
            .raw(submit.render())
            .raw(reset.render())
    });

    out.push_str(&form.render());
    out
}

/// Renders one node of the view tree.
pub fn render_node(node: &ViewNode) -> String {
    match node {
        ViewNode::Group(group) => render_group(group),
        ViewNode::Field(field) => render_field(field),
    }
}

/// Renders a nested group as a fieldset with its own heading.
pub fn render_group(group: &GroupView) -> String {
    let legend = group
        .title
        .as_ref()
        .map(|title| format!("<legend>{}</legend>", html_escape(title)))
        .unwrap_or_default();
    let description = group
        .description
        .as_ref()
        .map(|text| format!(r#"<p class="form-text">{}</p>"#, html_escape(text)))
        .unwrap_or_default();

    let children: String = group.children.iter().map(render_node).collect();

    format!(r#"<fieldset class="form-group mb-3">{legend}{description}{children}</fieldset>"#)
}

/// Renders a single field with its label, help text, and error.
pub fn render_field(field: &FieldView) -> String {
    // Informational fields are a plain label: no input, no name.
    if field.widget.is_static() {
        return format!(
            r#"<div class="mb-3"><label class="form-label">{}</label></div>"#,
            html_escape(&field.label)
        );
    }

    let error_html = field
        .error
        .as_ref()
        .map(|message| format!(r#"<div class="invalid-feedback">{}</div>"#, html_escape(message)))
        .unwrap_or_default();
    let description_html = field
        .description
        .as_ref()
        .map(|text| format!(r#"<div class="form-text">{}</div>"#, html_escape(text)))
        .unwrap_or_default();
    let widget_html = render_widget(field);

    // Grouped choices take their title as a legend; the per-input labels
    // come from the widget itself.
    if field.widget.is_grouped_choice() {
        let legend = format!(
            r#"<legend class="form-label">{}{}</legend>"#,
            html_escape(&field.label),
            required_marker(field)
        );
        return format!(
            r#"<fieldset class="mb-3">{legend}{description_html}{widget_html}{error_html}</fieldset>"#
        );
    }

    // The checkbox widget carries its own trailing label.
    if matches!(field.widget, formwork_schema::WidgetKind::Checkbox) {
        return format!(r#"<div class="mb-3">{widget_html}{error_html}{description_html}</div>"#);
    }

    let id = field_id(&field.path);
    let label_text = format!("{}{}", field.label, required_marker(field));
    let label = html! {
        label.for_(#id).class("form-label") { #label_text }
    };

    html! { div.class("mb-3") }
        .raw(label.render())
        .raw(&widget_html)
        .raw(&error_html)
        .raw(&description_html)
        .render()
}

fn required_marker(field: &FieldView) -> &'static str {
    if field.required {
        " *"
    } else {
        ""
    }
}

/// Renders the success notice, with any server-supplied messages.
pub fn render_success_notice(messages: &[String]) -> String {
    let notice = html! { div.class("alert alert-success") }
        .attr("role", "alert")
        .text(SUBMIT_SUCCESS_NOTICE);

    if messages.is_empty() {
        return notice.render();
    }

    notice
        .child::<Ul, _>(|ul| {
            ul.class("mb-0")
                .children(messages.iter(), |message, li: Element<Li>| li.text(message))
        })
        .render()
}

/// Renders the submission-failure notice.
pub fn render_error_notice(message: &str) -> String {
    html! { div.class("alert alert-danger") }
        .attr("role", "alert")
        .text(message)
        .render()
}
