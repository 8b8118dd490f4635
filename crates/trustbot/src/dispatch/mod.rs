//! Transport-independent update and directive model
//!
//! Inbound events from either transport are normalized into [`Update`];
//! the router turns an update into exactly one [`ResponseDirective`],
//! which the delivery client executes. Keyboards here are render data
//! only; a button carries no behavior beyond its dispatch key or URL.

mod router;

pub use router::dispatch;

use teloxide::types::{ChatId, MessageId, UserId};

/// One inbound event, constructed once per event and owned by the router
/// while it is processed.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// A command invocation such as `/start`.
    Command {
        name: String,
        chat_id: ChatId,
        user_id: Option<UserId>,
    },
    /// An inline-button press. `has_photo` records whether the message
    /// the button is attached to carries an image; a photo message's
    /// body cannot be edited into plain text, so the router must answer
    /// with a new message instead of an edit.
    CallbackQuery {
        data: String,
        chat_id: ChatId,
        message_id: MessageId,
        has_photo: bool,
    },
}

/// An outbound action, produced by the router and consumed exactly once
/// by the delivery client.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseDirective {
    SendText {
        chat_id: ChatId,
        body: String,
        keyboard: Keyboard,
    },
    EditText {
        chat_id: ChatId,
        message_id: MessageId,
        body: String,
        keyboard: Keyboard,
    },
    SendPhoto {
        chat_id: ChatId,
        photo: std::path::PathBuf,
        caption: String,
        keyboard: Keyboard,
    },
}

impl ResponseDirective {
    /// Body text of the directive, whatever its shape.
    pub fn body(&self) -> &str {
        match self {
            ResponseDirective::SendText { body, .. } => body,
            ResponseDirective::EditText { body, .. } => body,
            ResponseDirective::SendPhoto { caption, .. } => caption,
        }
    }

    pub fn keyboard(&self) -> &Keyboard {
        match self {
            ResponseDirective::SendText { keyboard, .. } => keyboard,
            ResponseDirective::EditText { keyboard, .. } => keyboard,
            ResponseDirective::SendPhoto { keyboard, .. } => keyboard,
        }
    }
}

/// What pressing a button does: fire a dispatch key back at the bot, or
/// open an external URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Callback(String),
    OpenUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn callback(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(key.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::OpenUrl(url.into()),
        }
    }
}

/// Ordered rows of buttons. Callback keys must be unique within one
/// keyboard; layout carries no behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    /// Every callback key on the keyboard, in layout order.
    pub fn callback_keys(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .filter_map(|button| match &button.action {
                ButtonAction::Callback(key) => Some(key.as_str()),
                ButtonAction::OpenUrl(_) => None,
            })
            .collect()
    }
}
