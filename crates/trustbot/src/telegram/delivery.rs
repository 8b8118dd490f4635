//! Delivery client
//!
//! Exclusively owns the outbound credentialed session for one bot
//! instance. `send` performs a single attempt with no automatic retries;
//! and surfaces errors to the caller; re-invoking it for the same
//! directive can produce duplicate visible messages.

use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId, ParseMode,
};
use thiserror::Error;
use url::Url;

use crate::dispatch::{ButtonAction, Keyboard, ResponseDirective};

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),

    #[error("invalid webhook URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Reference to a delivered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat: ChatId,
    pub message: MessageId,
}

pub struct DeliveryClient {
    bot: Bot,
    lang: &'static str,
}

impl DeliveryClient {
    pub fn new(bot: Bot, lang: &'static str) -> Self {
        Self { bot, lang }
    }

    /// The underlying session, for the polling listener and webhook
    /// registration. Outbound sends still go through this client only.
    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    /// Executes one directive against the Bot API. Single attempt.
    pub async fn send(&self, directive: &ResponseDirective) -> Result<MessageRef, DeliveryError> {
        match directive {
            ResponseDirective::SendText { chat_id, body, keyboard } => {
                let msg = self
                    .bot
                    .send_message(*chat_id, body)
                    .parse_mode(ParseMode::Markdown)
                    .reply_markup(markup(keyboard))
                    .await?;
                Ok(MessageRef {
                    chat: msg.chat.id,
                    message: msg.id,
                })
            }
            ResponseDirective::EditText {
                chat_id,
                message_id,
                body,
                keyboard,
            } => {
                let msg = self
                    .bot
                    .edit_message_text(*chat_id, *message_id, body)
                    .parse_mode(ParseMode::Markdown)
                    .reply_markup(markup(keyboard))
                    .await?;
                Ok(MessageRef {
                    chat: msg.chat.id,
                    message: msg.id,
                })
            }
            ResponseDirective::SendPhoto {
                chat_id,
                photo,
                caption,
                keyboard,
            } => {
                // The asset is read here, at send time; a read failure is
                // recovered locally by degrading to the text rendition
                // with the same caption and keyboard.
                match tokio::fs::read(photo).await {
                    Ok(bytes) => {
                        let msg = self
                            .bot
                            .send_photo(*chat_id, InputFile::memory(bytes).file_name("logo.png"))
                            .caption(caption.clone())
                            .parse_mode(ParseMode::Markdown)
                            .reply_markup(markup(keyboard))
                            .await?;
                        Ok(MessageRef {
                            chat: msg.chat.id,
                            message: msg.id,
                        })
                    }
                    Err(e) => {
                        log::warn!(
                            "[{}] failed to read logo {}: {}, sending text instead",
                            self.lang,
                            photo.display(),
                            e
                        );
                        let msg = self
                            .bot
                            .send_message(*chat_id, caption)
                            .parse_mode(ParseMode::Markdown)
                            .reply_markup(markup(keyboard))
                            .await?;
                        Ok(MessageRef {
                            chat: msg.chat.id,
                            message: msg.id,
                        })
                    }
                }
            }
        }
    }

    /// Acknowledges a callback query. Failing to answer within the Bot
    /// API's timeout leaves the user staring at a loading spinner, so
    /// this is fired before any other processing; errors are only logged.
    pub async fn answer_callback(&self, id: CallbackQueryId) {
        if let Err(e) = self.bot.answer_callback_query(id).await {
            log::warn!("[{}] failed to answer callback query: {}", self.lang, e);
        }
    }

    /// Registers the public endpoint with the platform, replacing any
    /// previously configured webhook.
    pub async fn register_webhook(&self, url: &str) -> Result<(), DeliveryError> {
        let parsed = Url::parse(url)?;
        // Delete any stale registration first so the platform starts
        // from a clean state.
        let _ = self.bot.delete_webhook().await;
        self.bot.set_webhook(parsed).await?;
        Ok(())
    }

    /// Removes the webhook registration during shutdown.
    pub async fn remove_webhook(&self) {
        if let Err(e) = self.bot.delete_webhook().await {
            log::warn!("[{}] failed to delete webhook: {}", self.lang, e);
        }
    }
}

/// Renders a keyboard into the wire representation.
fn markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    let rows = keyboard.rows.iter().map(|row| {
        row.iter()
            .filter_map(|button| match &button.action {
                ButtonAction::Callback(key) => {
                    Some(InlineKeyboardButton::callback(button.label.clone(), key.clone()))
                }
                ButtonAction::OpenUrl(raw) => match Url::parse(raw) {
                    Ok(url) => Some(InlineKeyboardButton::url(button.label.clone(), url)),
                    Err(e) => {
                        log::warn!("skipping button with invalid URL {}: {}", raw, e);
                        None
                    }
                },
            })
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Button;

    #[test]
    fn markup_preserves_layout() {
        let keyboard = Keyboard::new(vec![
            vec![Button::callback("Overview", "overview")],
            vec![Button::url("Website", "https://www.trust-coin.site")],
        ]);

        let rendered = markup(&keyboard);
        assert_eq!(rendered.inline_keyboard.len(), 2);
        assert_eq!(rendered.inline_keyboard[0][0].text, "Overview");
        assert_eq!(rendered.inline_keyboard[1][0].text, "Website");
    }

    #[test]
    fn markup_drops_unparseable_urls() {
        let keyboard = Keyboard::new(vec![vec![Button::url("Broken", "not a url")]]);
        let rendered = markup(&keyboard);
        assert!(rendered.inline_keyboard[0].is_empty());
    }
}
