use dioxus::prelude::*;

/// Slide-in side panel used for create and edit forms.
///
/// Renders nothing while closed. Clicking the backdrop or pressing the
/// close button calls `on_close`.
#[component]
pub fn Sheet(open: bool, on_close: EventHandler<()>, children: Element) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "ui-sheet-backdrop",
            onclick: move |_| on_close.call(()),
            aside {
                class: "ui-sheet",
                role: "dialog",
                "aria-modal": "true",
                onclick: move |evt| evt.stop_propagation(),
                button {
                    class: "ui-sheet-close",
                    r#type: "button",
                    "aria-label": "Close",
                    onclick: move |_| on_close.call(()),
                    "\u{2715}"
                }
                {children}
            }
        }
    }
}

#[component]
pub fn SheetHeader(title: String, #[props(default)] description: String) -> Element {
    rsx! {
        header { class: "ui-sheet-header",
            h2 { class: "ui-sheet-title", "{title}" }
            if !description.is_empty() {
                p { class: "ui-sheet-description", "{description}" }
            }
        }
    }
}

#[component]
pub fn SheetBody(children: Element) -> Element {
    rsx! {
        div { class: "ui-sheet-body", {children} }
    }
}

#[component]
pub fn SheetFooter(children: Element) -> Element {
    rsx! {
        footer { class: "ui-sheet-footer", {children} }
    }
}
