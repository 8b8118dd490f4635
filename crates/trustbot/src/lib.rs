//! TrustCoin promotion bots for Telegram
//!
//! This library contains everything shared by the Arabic, English and
//! French bot instances: the update source adapters (long polling and
//! webhook push), the pure dispatch router, the delivery client and the
//! lifecycle supervisor.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging and the lifecycle supervisor
//! - `dispatch`: transport-independent update/directive model and router
//! - `content`: the localized menu content table
//! - `telegram`: bot creation, delivery client and the polling schema
//! - `web`: the axum server for webhook ingestion and health probes

pub mod cli;
pub mod content;
pub mod core;
pub mod diagnostics;
pub mod dispatch;
pub mod i18n;
pub mod telegram;
pub mod web;

// Re-export commonly used types for convenience
pub use self::core::{config, AppError, LivenessState, Supervisor};
pub use dispatch::{dispatch, ResponseDirective, Update};
pub use telegram::{BotInstance, DeliveryClient};
