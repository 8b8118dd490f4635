//! The dispatch router
//!
//! A pure function from `(Update, ContentTable)` to `ResponseDirective`.
//! Acknowledging the callback query is the caller's job and happens
//! before dispatch; nothing here touches the network.

use crate::content::{ContentTable, MenuKey};
use crate::dispatch::{ResponseDirective, Update};

/// Routes one update to its response directive.
///
/// Total over well-formed updates: unknown callback data resolves to the
/// localized invalid-option directive carrying the root keyboard, so the
/// user can never end up without a way back to the main menu.
pub fn dispatch(update: &Update, content: &ContentTable) -> ResponseDirective {
    match update {
        Update::Command { chat_id, .. } => start_directive(*chat_id, content),
        Update::CallbackQuery {
            data,
            chat_id,
            message_id,
            has_photo,
        } => {
            let (body, keyboard) = match MenuKey::parse(data) {
                Some(key) => content.render(key),
                None => content.invalid_option(),
            };

            // A photo message's caption cannot be edited into a plain
            // text body, so answer with a fresh message instead.
            if *has_photo {
                ResponseDirective::SendText {
                    chat_id: *chat_id,
                    body,
                    keyboard,
                }
            } else {
                ResponseDirective::EditText {
                    chat_id: *chat_id,
                    message_id: *message_id,
                    body,
                    keyboard,
                }
            }
        }
    }
}

/// The root-menu directive for `/start`.
///
/// Sends the branding logo with the welcome text as its caption when the
/// asset is readable; otherwise degrades to the same text and keyboard
/// without surfacing anything to the user.
fn start_directive(chat_id: teloxide::types::ChatId, content: &ContentTable) -> ResponseDirective {
    let body = content.welcome();
    let keyboard = content.main_menu();

    match content.logo() {
        Some(path) if std::fs::metadata(path).is_ok() => ResponseDirective::SendPhoto {
            chat_id,
            photo: path.to_path_buf(),
            caption: body,
            keyboard,
        },
        Some(path) => {
            log::warn!(
                "[{}] branding logo {} is not readable, falling back to text welcome",
                content.lang_tag(),
                path.display()
            );
            ResponseDirective::SendText { chat_id, body, keyboard }
        }
        None => ResponseDirective::SendText { chat_id, body, keyboard },
    }
}
