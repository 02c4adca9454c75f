pub mod not_found;
pub mod polls;

use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdLayoutDashboard;
use dioxus_free_icons::Icon;
use shared_types::PageIndex;

use not_found::NotFound;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(AppLayout)]
    #[route("/polls?:page")]
    Polls { page: PageIndex },
    #[end_layout]
    #[redirect("/", || Route::Polls { page: PageIndex::FIRST })]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Top bar plus the routed page.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "app-shell",
            header { class: "app-navbar",
                div { class: "app-brand",
                    Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 20, height: 20 }
                    span { class: "app-brand-name", "Polls Admin" }
                }
                nav { class: "app-nav",
                    Link {
                        to: Route::Polls { page: PageIndex::FIRST },
                        class: if matches!(route, Route::Polls { .. }) { "app-nav-link active" } else { "app-nav-link" },
                        "Polls"
                    }
                }
            }
            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Polls(page: PageIndex) -> Element {
    rsx! {
        polls::list::PollListPage { page }
    }
}
