use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trustbot")]
#[command(author, version, about = "TrustCoin promotion bots for Telegram", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the configured bot instances
    Run {
        /// Restrict to specific languages (en, ar, fr); defaults to every
        /// language with a configured token
        #[arg(long)]
        lang: Vec<String>,
    },

    /// Check the configured bot tokens against the Bot API
    CheckTokens,

    /// Delete webhooks and drop pending updates for every configured bot
    ClearWebhooks,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
