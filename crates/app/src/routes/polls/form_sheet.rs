use dioxus::prelude::*;
use shared_types::{AppError, PageIndex, Poll, PollCreate, PollUpdate};
use shared_ui::components::{
    Button, ButtonVariant, Form, FormField, Input, Sheet, SheetBody, SheetFooter, SheetHeader,
    Textarea,
};
use shared_ui::{use_toast, ToastOptions};
use tracing::{info, warn};

use crate::query::PollsQuery;

/// Longest title the backend accepts.
pub const TITLE_MAX_LEN: usize = 255;

/// Controls whether the form is in Create or Edit mode.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FormMode {
    Create,
    Edit,
}

/// Trimmed form values ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PollDraft {
    pub title: String,
    pub description: Option<String>,
}

impl PollDraft {
    pub fn into_create(self) -> PollCreate {
        PollCreate {
            title: self.title,
            description: self.description,
        }
    }

    /// An edit always sends the title. A cleared description is sent as an
    /// empty string so the backend overwrites the old one.
    pub fn into_update(self) -> PollUpdate {
        PollUpdate {
            title: Some(self.title),
            description: Some(self.description.unwrap_or_default()),
        }
    }
}

/// Validate raw form input. On failure returns the message for the title field.
pub fn validate_poll_form(title: &str, description: &str) -> Result<PollDraft, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(format!("Title must be at most {TITLE_MAX_LEN} characters"));
    }
    let description = description.trim();
    Ok(PollDraft {
        title: title.to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

/// Unified create/edit form for polls, rendered inside a Sheet.
#[component]
pub fn PollFormSheet(
    mode: FormMode,
    initial: Option<Poll>,
    open: bool,
    page: PageIndex,
    on_close: EventHandler<()>,
) -> Element {
    let query = use_context::<PollsQuery>();
    let toast = use_toast();

    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut title_error = use_signal(|| None::<String>);
    let mut description_error = use_signal(|| None::<String>);
    let mut in_flight = use_signal(|| false);

    // Reset the fields each time the sheet opens.
    let initial_for_reset = initial.clone();
    use_effect(use_reactive!(|open| {
        if !open {
            return;
        }
        let (t, d) = match &initial_for_reset {
            Some(poll) => (
                poll.title.clone(),
                poll.description.clone().unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };
        title.set(t);
        description.set(d);
        title_error.set(None);
        description_error.set(None);
    }));

    let poll_id = initial.as_ref().map(|p| p.id.clone()).unwrap_or_default();

    let handle_save = move |_: FormEvent| {
        if in_flight() {
            return;
        }
        let draft = match validate_poll_form(&title.read(), &description.read()) {
            Ok(draft) => draft,
            Err(message) => {
                title_error.set(Some(message));
                return;
            }
        };
        title_error.set(None);
        description_error.set(None);

        let query = query.clone();
        let id = poll_id.clone();
        spawn(async move {
            in_flight.set(true);
            let result = match mode {
                FormMode::Create => query.client.create_poll(&draft.into_create()).await,
                FormMode::Edit => query.client.update_poll(&id, &draft.into_update()).await,
            };
            match result {
                Ok(poll) => {
                    info!(id = %poll.id, ?mode, "poll saved");
                    query.refresh(page);
                    on_close.call(());
                    let msg = match mode {
                        FormMode::Create => "Poll created successfully",
                        FormMode::Edit => "Poll updated successfully",
                    };
                    toast.success(msg.to_string(), ToastOptions::new());
                }
                Err(err) => {
                    warn!(error = %err, ?mode, "failed to save poll");
                    apply_field_errors(&err, &mut title_error, &mut description_error);
                    toast.error(err.friendly_message(), ToastOptions::new());
                }
            }
            in_flight.set(false);
        });
    };

    let (sheet_title, sheet_description, submit_label) = match mode {
        FormMode::Create => ("Add Poll", "Fill in the details of the new poll.", "Create Poll"),
        FormMode::Edit => ("Edit Poll", "Update the poll details.", "Save Changes"),
    };

    rsx! {
        Sheet {
            open,
            on_close: move |_| on_close.call(()),
            SheetHeader { title: sheet_title, description: sheet_description }
            SheetBody {
                Form { onsubmit: handle_save,
                    FormField {
                        label: "Title",
                        html_for: "poll-title",
                        required: true,
                        error: title_error(),
                        Input {
                            id: "poll-title",
                            value: title(),
                            placeholder: "Title",
                            on_input: move |evt: FormEvent| title.set(evt.value()),
                        }
                    }
                    FormField {
                        label: "Description",
                        html_for: "poll-description",
                        error: description_error(),
                        Textarea {
                            id: "poll-description",
                            value: description(),
                            placeholder: "Description",
                            on_input: move |evt: FormEvent| description.set(evt.value()),
                        }
                    }
                    SheetFooter {
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| on_close.call(()),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            submit: true,
                            disabled: in_flight(),
                            "{submit_label}"
                        }
                    }
                }
            }
        }
    }
}

/// Surface backend validation messages next to the matching fields.
fn apply_field_errors(
    err: &AppError,
    title_error: &mut Signal<Option<String>>,
    description_error: &mut Signal<Option<String>>,
) {
    if let Some(message) = err.field_errors.get("title") {
        title_error.set(Some(message.clone()));
    }
    if let Some(message) = err.field_errors.get("description") {
        description_error.set(Some(message.clone()));
    }
}
