//! Dispatcher schema for polling mode
//!
//! The handler tree normalizes teloxide updates and hands them to the
//! instance; the same processing path serves the webhook worker, so the
//! two transports cannot drift apart.

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use crate::telegram::bot::Command;
use crate::telegram::instance::BotInstance;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Creates the dispatcher handler tree for one bot instance.
pub fn schema(instance: Arc<BotInstance>) -> UpdateHandler<HandlerError> {
    let instance_commands = Arc::clone(&instance);

    dptree::entry()
        .branch(command_handler(instance_commands))
        .branch(callback_handler(instance))
}

/// Handler for bot commands (only /start exists).
fn command_handler(instance: Arc<BotInstance>) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |msg: Message, cmd: Command| {
            let instance = Arc::clone(&instance);
            async move {
                match cmd {
                    Command::Start => instance.handle_start(&msg).await,
                }
                Ok(())
            }
        },
    ))
}

/// Handler for callback queries (inline keyboard buttons).
fn callback_handler(instance: Arc<BotInstance>) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |q: CallbackQuery| {
        let instance = Arc::clone(&instance);
        async move {
            instance.handle_callback(q).await;
            Ok(())
        }
    })
}
