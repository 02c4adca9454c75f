use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdEllipsis;
use dioxus_free_icons::Icon;
use shared_types::{PageIndex, Poll};
use shared_ui::components::{
    AlertDialogAction, AlertDialogActions, AlertDialogCancel, AlertDialogContent,
    AlertDialogDescription, AlertDialogRoot, AlertDialogTitle, DropdownMenu, DropdownMenuContent,
    DropdownMenuItem, DropdownMenuTrigger,
};
use shared_ui::{use_toast, ToastOptions};
use tracing::{info, warn};

use super::form_sheet::{FormMode, PollFormSheet};
use crate::query::PollsQuery;

/// Per-row "…" menu with Edit and Delete.
#[component]
pub fn PollActionsMenu(poll: Poll, page: PageIndex) -> Element {
    let query = use_context::<PollsQuery>();
    let toast = use_toast();

    let mut show_edit = use_signal(|| false);
    let mut show_delete = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let poll_id = poll.id.clone();
    let handle_delete = move |_: MouseEvent| {
        if deleting() {
            return;
        }
        let query = query.clone();
        let id = poll_id.clone();
        spawn(async move {
            deleting.set(true);
            match query.client.delete_poll(&id).await {
                Ok(msg) => {
                    info!(%id, "poll deleted");
                    query.refresh(page);
                    toast.success(msg.message, ToastOptions::new());
                }
                Err(err) => {
                    warn!(%id, error = %err, "failed to delete poll");
                    toast.error(err.friendly_message(), ToastOptions::new());
                }
            }
            deleting.set(false);
            show_delete.set(false);
        });
    };

    let title = poll.title.clone();

    rsx! {
        DropdownMenu {
            DropdownMenuTrigger {
                div { class: "poll-actions-trigger", "aria-label": "Actions",
                    Icon::<LdEllipsis> { icon: LdEllipsis, width: 18, height: 18 }
                }
            }
            DropdownMenuContent {
                DropdownMenuItem::<String> {
                    value: "edit".to_string(),
                    index: 0usize,
                    on_select: move |_: String| show_edit.set(true),
                    "Edit Poll"
                }
                DropdownMenuItem::<String> {
                    value: "delete".to_string(),
                    index: 1usize,
                    on_select: move |_: String| show_delete.set(true),
                    span { class: "poll-actions-danger", "Delete Poll" }
                }
            }
        }

        PollFormSheet {
            mode: FormMode::Edit,
            initial: Some(poll.clone()),
            open: show_edit(),
            page,
            on_close: move |_| show_edit.set(false),
        }

        AlertDialogRoot {
            open: show_delete(),
            on_open_change: move |open: bool| show_delete.set(open),
            AlertDialogContent {
                AlertDialogTitle { "Delete Poll" }
                AlertDialogDescription {
                    "\"{title}\" will be permanently deleted. This action cannot be undone."
                }
                AlertDialogActions {
                    AlertDialogCancel { "Cancel" }
                    AlertDialogAction {
                        on_click: handle_delete,
                        if deleting() { "Deleting..." } else { "Delete" }
                    }
                }
            }
        }
    }
}
