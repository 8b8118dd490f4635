//! Core utilities: configuration, errors, logging, lifecycle

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logging;

pub use error::{AppError, AppResult};
pub use lifecycle::{shutdown_signal, LivenessState, Supervisor};
pub use logging::{init_logger, log_startup_configuration};
