use dioxus::prelude::*;

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] value: String,
    #[props(default)] placeholder: String,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] required: bool,
    #[props(default)] on_input: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        input {
            class: "ui-input",
            r#type: "text",
            id: "{id}",
            value: value,
            placeholder: placeholder,
            disabled: disabled,
            required: required,
            oninput: move |evt| on_input.call(evt),
        }
    }
}
