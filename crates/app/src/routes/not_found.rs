use dioxus::prelude::*;
use shared_types::PageIndex;

use crate::routes::Route;

/// 404 page for any path the router does not know.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "Page Not Found" }
                p { class: "not-found-message",
                    "Nothing lives at "
                    code { "{path}" }
                    "."
                }
                Link { to: Route::Polls { page: PageIndex::FIRST },
                    class: "not-found-link",
                    "Back to polls"
                }
            }
        }
    }
}
