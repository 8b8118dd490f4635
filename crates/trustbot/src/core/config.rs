use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

/// Configuration constants for the bots
///
/// Everything is resolved from environment variables once at startup.
/// Per-language variables follow the original deployment's naming
/// (`BOT_TOKEN_ENG`, `BOT_TOKEN_ARA`, `BOT_TOKEN_FR`).

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Branding logo shown with the /start welcome message
/// Read from LOGO_PATH environment variable
/// Default: assets/logo.png
pub static LOGO_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOGO_PATH").unwrap_or_else(|_| "assets/logo.png".to_string()));

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for outbound Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Environment variable names and defaults for one language instance.
struct InstanceVars {
    lang: &'static str,
    token: &'static str,
    webhook_url: &'static str,
    port: &'static str,
    default_port: u16,
}

const INSTANCES: &[InstanceVars] = &[
    InstanceVars {
        lang: "en",
        token: "BOT_TOKEN_ENG",
        webhook_url: "WEBHOOK_URL_ENG",
        port: "PORT_ENG",
        default_port: 8443,
    },
    InstanceVars {
        lang: "ar",
        token: "BOT_TOKEN_ARA",
        webhook_url: "WEBHOOK_URL_ARA",
        port: "PORT_ARA",
        default_port: 8444,
    },
    InstanceVars {
        lang: "fr",
        token: "BOT_TOKEN_FR",
        webhook_url: "WEBHOOK_URL_FR",
        port: "PORT_FR",
        default_port: 8445,
    },
];

/// Resolved startup configuration for one bot instance.
///
/// The webhook URL selects the transport: present means push mode,
/// absent means long polling. The decision is made once at startup.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    pub lang: &'static str,
    pub token: String,
    pub webhook_url: Option<String>,
    pub port: u16,
}

impl InstanceConfig {
    pub fn push_mode(&self) -> bool {
        self.webhook_url.is_some()
    }
}

/// Languages this binary knows how to serve.
pub fn declared_languages() -> impl Iterator<Item = &'static str> {
    INSTANCES.iter().map(|vars| vars.lang)
}

/// Name of the token variable for a language, for diagnostics output.
pub fn token_variable(lang: &str) -> Option<&'static str> {
    INSTANCES.iter().find(|vars| vars.lang == lang).map(|vars| vars.token)
}

/// Resolves the configuration for one language.
///
/// A missing token is a fatal configuration error: a selected instance
/// must never start without its credential.
pub fn instance_config(lang: &str) -> AppResult<InstanceConfig> {
    let vars = INSTANCES
        .iter()
        .find(|vars| vars.lang == lang)
        .ok_or_else(|| AppError::Config(format!("unknown language '{}' (expected en, ar or fr)", lang)))?;

    let token = env::var(vars.token)
        .map_err(|_| AppError::Config(format!("{} not set, cannot start the '{}' bot", vars.token, vars.lang)))?;

    let webhook_url = env::var(vars.webhook_url).ok().filter(|url| !url.is_empty());

    let port = match env::var(vars.port) {
        Ok(raw) => raw
            .parse::<u16>()
            .map_err(|_| AppError::Config(format!("{} is not a valid port: {}", vars.port, raw)))?,
        Err(_) => vars.default_port,
    };

    Ok(InstanceConfig {
        lang: vars.lang,
        token,
        webhook_url,
        port,
    })
}

/// Resolves every language whose token is present in the environment.
pub fn configured_instances() -> Vec<InstanceConfig> {
    INSTANCES
        .iter()
        .filter(|vars| env::var(vars.token).is_ok())
        .filter_map(|vars| instance_config(vars.lang).ok())
        .collect()
}
