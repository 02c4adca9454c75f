use client::PageView;
use dioxus::prelude::*;
use shared_types::{AppError, PageIndex, Poll, EMPTY_DESCRIPTION, PAGE_SIZE};
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, CardFooter, CardHeader, CardTitle, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableHeader, DataTableRow, PageActions,
    PageHeader, PageTitle, Pagination, SkeletonRows,
};

use super::actions_menu::PollActionsMenu;
use super::form_sheet::{FormMode, PollFormSheet};
use crate::query::{use_polls_page, PollsQuery};
use crate::routes::Route;

const TABLE_COLUMNS: usize = 4;

#[component]
pub fn PollListPage(page: PageIndex) -> Element {
    let query = use_context::<PollsQuery>();
    let state = use_polls_page(page);
    let mut show_create = use_signal(|| false);

    let view = state.view.read().clone();
    let has_next = (state.has_next)();
    let has_previous = !page.is_first();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./polls.css") }

        div { class: "container",
            PageHeader {
                PageTitle { "Poll Management" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_create.set(true),
                        "Add Poll"
                    }
                }
            }

            match view {
                PageView::Failed(error) => rsx! {
                    PollsError {
                        error,
                        on_retry: move |_| query.retry(page),
                    }
                },
                view => rsx! {
                    PollsTable { view, page }
                },
            }

            Pagination {
                page: page.get(),
                has_previous,
                has_next,
                on_previous: move |_| {
                    navigator().push(Route::Polls { page: page.previous() });
                },
                on_next: move |_| {
                    navigator().push(Route::Polls { page: page.next() });
                },
            }

            PollFormSheet {
                mode: FormMode::Create,
                initial: None,
                open: show_create(),
                page,
                on_close: move |_| show_create.set(false),
            }
        }
    }
}

/// Table of polls. Rows standing in for a page still in flight are dimmed;
/// with nothing to show yet the body is a skeleton grid.
#[component]
pub fn PollsTable(view: PageView<Poll>, page: PageIndex) -> Element {
    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "ID" }
                DataTableColumn { "Title" }
                DataTableColumn { "Description" }
                DataTableColumn { "Actions" }
            }
            DataTableBody {
                match view {
                    PageView::Loaded { rows, placeholder, .. } => rsx! {
                        for poll in rows {
                            PollRow { key: "{poll.id}", poll: poll.clone(), dimmed: placeholder, page }
                        }
                    },
                    _ => rsx! {
                        SkeletonRows { rows: PAGE_SIZE as usize, columns: TABLE_COLUMNS }
                    },
                }
            }
        }
    }
}

#[component]
fn PollRow(poll: Poll, dimmed: bool, page: PageIndex) -> Element {
    let description = poll.display_description().map(str::to_string);

    rsx! {
        DataTableRow { dimmed,
            DataTableCell { "{poll.id}" }
            DataTableCell { "{poll.title}" }
            match description {
                Some(text) => rsx! {
                    DataTableCell { "{text}" }
                },
                None => rsx! {
                    DataTableCell { muted: true, "{EMPTY_DESCRIPTION}" }
                },
            }
            DataTableCell {
                PollActionsMenu { poll: poll.clone(), page }
            }
        }
    }
}

#[component]
fn PollsError(error: AppError, on_retry: EventHandler<()>) -> Element {
    let message = error.friendly_message();

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Could not load polls" }
            }
            CardContent {
                p { class: "polls-error-message", "{message}" }
            }
            if error.is_retryable() {
                CardFooter {
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_retry.call(()),
                        "Retry"
                    }
                }
            }
        }
    }
}
