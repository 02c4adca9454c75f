use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// Previous / "Page N" / Next controls for lists that do not know their
/// total size. Both buttons are always rendered and disabled as needed so
/// the bar does not shift while pages load.
#[component]
pub fn Pagination(
    page: u32,
    has_previous: bool,
    has_next: bool,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "ui-pagination",
            "data-has-previous": if has_previous { "true" } else { "false" },
            "data-has-next": if has_next { "true" } else { "false" },
            Button {
                variant: ButtonVariant::Outline,
                disabled: !has_previous,
                onclick: move |_| on_previous.call(()),
                "Previous"
            }
            span { class: "ui-pagination-info", "Page {page}" }
            Button {
                variant: ButtonVariant::Outline,
                disabled: !has_next,
                onclick: move |_| on_next.call(()),
                "Next"
            }
        }
    }
}
