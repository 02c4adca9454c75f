use client::config::load_config;
use client::{PageCache, PollsClient};
use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{Card, CardContent, CardHeader, CardTitle};

mod query;
mod routes;
use query::PollsQuery;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = load_config();
    let cache = use_signal(|| PageCache::from_settings(&config.cache));

    // The query context exists only when the client could be built.
    let query = use_hook(|| {
        PollsClient::new(&config.api).map(|client| provide_context(PollsQuery { client, cache }))
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        match query {
            Ok(_) => rsx! {
                shared_ui::ToastProvider {
                    Router::<Route> {}
                }
            },
            Err(err) => rsx! {
                ConfigError { error: err }
            },
        }
    }
}

#[component]
fn ConfigError(error: AppError) -> Element {
    tracing::error!(error = %error, "polls client could not be created");

    rsx! {
        div { class: "container",
            Card {
                CardHeader {
                    CardTitle { "Configuration error" }
                }
                CardContent {
                    p { "{error}" }
                }
            }
        }
    }
}
