//! External health monitor for the TrustCoin bots
//!
//! Polls each instance's `/health` endpoint on an interval and logs
//! liveness transitions, so orchestration (or a human tailing the log)
//! can tell a clean shutdown from a crash. Runs as its own process and
//! shares nothing with the bots it watches.

use std::collections::HashMap;
use std::time::Duration;

/// One observed probe outcome for an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Probe {
    Healthy(String),
    Stopping(String),
    Unreachable,
}

fn targets() -> Vec<String> {
    std::env::var("HEALTH_URLS")
        .unwrap_or_else(|_| {
            "http://127.0.0.1:8443,http://127.0.0.1:8444,http://127.0.0.1:8445".to_string()
        })
        .split(',')
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

fn interval() -> Duration {
    let secs = std::env::var("CHECK_INTERVAL_SECS")
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(30);
    Duration::from_secs(secs)
}

async fn probe(client: &reqwest::Client, base: &str) -> Probe {
    let url = format!("{}/health", base);
    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            log::debug!("{}: {}", url, e);
            return Probe::Unreachable;
        }
    };

    let body: serde_json::Value = match response.json().await {
        Ok(body) => body,
        Err(_) => return Probe::Unreachable,
    };

    let bot = body["bot"].as_str().unwrap_or("?").to_string();
    match body["status"].as_str() {
        Some("healthy") => Probe::Healthy(bot),
        Some("stopping") => Probe::Stopping(bot),
        _ => Probe::Unreachable,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let targets = targets();
    if targets.is_empty() {
        log::error!("HEALTH_URLS resolved to an empty target list");
        std::process::exit(1);
    }

    let client = match reqwest::Client::builder().timeout(Duration::from_secs(5)).build() {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Monitoring {} endpoint(s) every {:?}", targets.len(), interval());

    let mut last: HashMap<String, Probe> = HashMap::new();
    let mut ticker = tokio::time::interval(interval());

    loop {
        ticker.tick().await;

        for base in &targets {
            let state = probe(&client, base).await;
            let previous = last.get(base);

            if previous != Some(&state) {
                match &state {
                    Probe::Healthy(bot) => log::info!("[{}] {} is healthy", bot, base),
                    Probe::Stopping(bot) => log::warn!("[{}] {} is shutting down", bot, base),
                    Probe::Unreachable => log::error!("{} is unreachable", base),
                }
                last.insert(base.clone(), state);
            }
        }
    }
}
