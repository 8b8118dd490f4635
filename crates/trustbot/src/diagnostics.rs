//! CLI diagnostics for deployments
//!
//! `check-tokens` verifies each configured credential against the Bot
//! API; `clear-webhooks` removes stale webhook registrations and drops
//! pending updates, which resolves the "terminated by other getUpdates
//! request" conflict after a crashed or duplicated deployment.

use teloxide::prelude::*;

use crate::core::config;
use crate::telegram::create_bot;

/// Reports which tokens are configured and whether they authenticate.
pub async fn check_tokens() -> anyhow::Result<()> {
    log::info!("=== Testing bot tokens ===");

    for lang in config::declared_languages() {
        let var = config::token_variable(lang).unwrap_or("?");
        match config::instance_config(lang) {
            Ok(cfg) => {
                let bot = create_bot(&cfg.token)?;
                match bot.get_me().await {
                    Ok(me) => log::info!(
                        "✅ [{}] @{}: token valid",
                        lang,
                        me.username.as_deref().unwrap_or("<unknown>")
                    ),
                    Err(e) => log::error!("❌ [{}] token rejected by the Bot API: {}", lang, e),
                }
            }
            Err(_) => log::warn!("⚠️  [{}] {} not set", lang, var),
        }
    }

    Ok(())
}

/// Deletes the webhook and drops pending updates for every configured bot.
pub async fn clear_webhooks() -> anyhow::Result<()> {
    let configs = config::configured_instances();
    if configs.is_empty() {
        anyhow::bail!("no bot tokens configured, nothing to clear");
    }

    for cfg in configs {
        let bot = create_bot(&cfg.token)?;
        match bot.delete_webhook().drop_pending_updates(true).await {
            Ok(_) => log::info!("✅ [{}] webhook deleted, pending updates dropped", cfg.lang),
            Err(e) => log::error!("❌ [{}] failed to delete webhook: {}", cfg.lang, e),
        }
    }

    Ok(())
}
