//! Telegram transport: bot creation, delivery and the polling schema

pub mod bot;
pub mod delivery;
pub mod instance;
pub mod schema;

// Re-exports for convenience
pub use bot::{create_bot, Command};
pub use delivery::{DeliveryClient, DeliveryError, MessageRef};
pub use instance::BotInstance;
