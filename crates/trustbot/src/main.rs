use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;

use trustbot::cli::{Cli, Commands};
use trustbot::core::{config, init_logger, log_startup_configuration};
use trustbot::diagnostics;
use trustbot::telegram::BotInstance;

/// Main entry point for the TrustCoin bots
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, bot
/// creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    // Load environment variables from .env if present
    let _ = dotenv();

    match cli.command {
        Some(Commands::Run { lang }) => run_bots(lang).await,
        Some(Commands::CheckTokens) => diagnostics::check_tokens().await,
        Some(Commands::ClearWebhooks) => diagnostics::clear_webhooks().await,
        None => {
            // No command specified - run every configured instance
            run_bots(Vec::new()).await
        }
    }
}

/// Resolves the requested instances and runs them as independent tasks.
async fn run_bots(langs: Vec<String>) -> Result<()> {
    log_startup_configuration();

    let configs = if langs.is_empty() {
        let configs = config::configured_instances();
        if configs.is_empty() {
            anyhow::bail!(
                "no bot tokens configured. Set BOT_TOKEN_ENG, BOT_TOKEN_ARA or BOT_TOKEN_FR (see .env.example)"
            );
        }
        configs
    } else {
        // Explicitly requested languages must all be configured.
        langs
            .iter()
            .map(|lang| config::instance_config(lang))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut handles = Vec::new();
    for cfg in configs {
        let lang = cfg.lang;
        let instance = Arc::new(BotInstance::new(cfg)?);
        log::info!("Starting '{}' bot instance", lang);
        handles.push((lang, tokio::spawn(instance.run())));
    }

    // Instances are independent failure domains: one going down must not
    // take the others with it.
    for (lang, handle) in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::error!("[{}] instance terminated with error: {:#}", lang, e),
            Err(e) => log::error!("[{}] instance task panicked: {}", lang, e),
        }
    }

    Ok(())
}
