use dioxus::prelude::*;

/// Form wrapper that suppresses the browser's own submission.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            class: "ui-form",
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            {children}
        }
    }
}

/// Label, control and optional validation message stacked vertically.
#[component]
pub fn FormField(
    label: String,
    #[props(default)] html_for: String,
    #[props(default)] required: bool,
    #[props(default)] error: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "ui-form-field",
            "data-invalid": if error.is_some() { "true" } else { "false" },
            label { class: "ui-form-label", r#for: "{html_for}",
                "{label}"
                if required {
                    span { class: "ui-form-required", " *" }
                }
            }
            {children}
            if let Some(message) = error {
                p { class: "ui-form-error", role: "alert", "{message}" }
            }
        }
    }
}
