//! One bot instance per language
//!
//! A `BotInstance` owns its credential, content table, delivery client
//! and supervisor. Instances share no mutable state; the three language
//! bots run as fully independent tasks within one process.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{MaybeInaccessibleMessage, Update as TgUpdate, UpdateKind};
use teloxide::update_listeners::Polling;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::content::ContentTable;
use crate::core::config::{self, InstanceConfig};
use crate::core::{shutdown_signal, LivenessState, Supervisor};
use crate::dispatch;
use crate::telegram::bot::create_bot;
use crate::telegram::delivery::DeliveryClient;
use crate::telegram::schema;
use crate::web::{self, WebState};

pub struct BotInstance {
    config: InstanceConfig,
    content: ContentTable,
    delivery: DeliveryClient,
    supervisor: Arc<Supervisor>,
}

impl BotInstance {
    pub fn new(config: InstanceConfig) -> anyhow::Result<Self> {
        let bot = create_bot(&config.token)?;
        let delivery = DeliveryClient::new(bot, config.lang);
        let content = ContentTable::new(config.lang, Some(PathBuf::from(config::LOGO_PATH.as_str())));
        let supervisor = Arc::new(Supervisor::new(config.lang));

        Ok(Self {
            config,
            content,
            delivery,
            supervisor,
        })
    }

    pub fn lang(&self) -> &'static str {
        self.config.lang
    }

    pub fn supervisor(&self) -> Arc<Supervisor> {
        Arc::clone(&self.supervisor)
    }

    /// Runs the instance until the process is asked to stop.
    ///
    /// The transport was fixed at startup: a configured webhook URL
    /// selects push mode, otherwise the instance long-polls. The HTTP
    /// server (health probes, and the webhook route in push mode) runs
    /// in both modes.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        let lang = self.config.lang;

        // Establish the transport session before reporting Running.
        let me = self
            .delivery
            .bot()
            .get_me()
            .await
            .map_err(|e| anyhow::anyhow!("[{}] failed to connect to the Bot API: {}", lang, e))?;
        log::info!("[{}] connected as @{}", lang, me.username.as_deref().unwrap_or("<unknown>"));

        match self.config.webhook_url.clone() {
            Some(url) => self.run_webhook(&url).await,
            None => self.run_polling().await,
        }
    }

    /// Push mode: axum receives updates and hands them to a single
    /// worker over an unbounded queue, so the HTTP response returns
    /// immediately regardless of handler latency.
    async fn run_webhook(self: Arc<Self>, url: &str) -> anyhow::Result<()> {
        let lang = self.config.lang;
        let (tx, mut rx) = mpsc::unbounded_channel::<TgUpdate>();

        let worker = {
            let instance = Arc::clone(&self);
            tokio::spawn(async move {
                // Each update runs in its own task so a panicking handler
                // is caught via the JoinHandle and cannot kill the worker;
                // awaiting it keeps processing single-flow.
                while let Some(update) = rx.recv().await {
                    let handler = Arc::clone(&instance);
                    if let Err(e) = tokio::spawn(async move { handler.handle_update(update).await }).await {
                        log::error!("[{}] update handler panicked: {}", lang, e);
                    }
                }
            })
        };

        let app = web::router(WebState {
            lang,
            supervisor: Arc::clone(&self.supervisor),
            updates: Some(tx),
        });

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = TcpListener::bind(&addr).await?;

        self.delivery.register_webhook(url).await?;
        self.supervisor.advance(LivenessState::Running);
        log::info!("[{}] webhook mode: {} -> http://{}", lang, url, addr);

        let supervisor = Arc::clone(&self.supervisor);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                // Flush the liveness transition before the listener goes
                // away so orchestration sees a clean shutdown.
                supervisor.advance(LivenessState::Stopping);
            })
            .await?;

        self.delivery.remove_webhook().await;
        // The sender went away with the server; let the worker drain
        // whatever is still queued.
        if let Err(e) = worker.await {
            log::warn!("[{}] update worker ended abnormally: {}", lang, e);
        }
        log::info!("[{}] shutdown complete", lang);
        Ok(())
    }

    /// Poll mode: the teloxide dispatcher pulls updates; the HTTP server
    /// only serves the health probes.
    async fn run_polling(self: Arc<Self>) -> anyhow::Result<()> {
        let lang = self.config.lang;

        let app = web::router(WebState {
            lang,
            supervisor: Arc::clone(&self.supervisor),
            updates: None,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = TcpListener::bind(&addr).await?;
        let http = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                log::error!("Health server error: {}", e);
            }
        });

        let bot = self.delivery.bot();
        let handler = schema::schema(Arc::clone(&self));
        let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
            .dependencies(DependencyMap::new())
            .build();

        self.supervisor.advance(LivenessState::Running);
        log::info!("[{}] polling mode, health on http://{}", lang, addr);

        let polling = Polling::builder(bot).drop_pending_updates().build();
        tokio::select! {
            _ = dispatcher.dispatch_with_listener(
                polling,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            ) => {}
            _ = shutdown_signal() => {}
        }

        self.supervisor.advance(LivenessState::Stopping);
        http.abort();
        log::info!("[{}] shutdown complete", lang);
        Ok(())
    }

    /// Entry point for raw updates coming off the webhook queue.
    pub async fn handle_update(&self, update: TgUpdate) {
        match update.kind {
            UpdateKind::Message(msg) => {
                if is_start_command(&msg) {
                    self.handle_start(&msg).await;
                } else {
                    log::debug!("[{}] ignoring non-command message", self.config.lang);
                }
            }
            UpdateKind::CallbackQuery(q) => self.handle_callback(q).await,
            UpdateKind::Error(value) => {
                log::warn!("[{}] skipping unrecognized update payload: {}", self.config.lang, value);
            }
            _ => log::debug!("[{}] ignoring unsupported update kind", self.config.lang),
        }
    }

    /// Shows the root menu for `/start`.
    pub async fn handle_start(&self, msg: &Message) {
        let update = dispatch::Update::Command {
            name: "start".to_string(),
            chat_id: msg.chat.id,
            user_id: msg.from.as_ref().map(|user| user.id),
        };
        self.dispatch_and_send(update).await;
    }

    /// An inline-button press.
    pub async fn handle_callback(&self, q: CallbackQuery) {
        // Answer the callback before anything else; a late answer shows
        // the user a stuck loading spinner.
        self.delivery.answer_callback(q.id.clone()).await;

        match normalize_callback(&q) {
            Some(update) => self.dispatch_and_send(update).await,
            None => log::debug!("[{}] callback without data or message, dropped", self.config.lang),
        }
    }

    async fn dispatch_and_send(&self, update: dispatch::Update) {
        let directive = dispatch::dispatch(&update, &self.content);
        if let Err(e) = self.delivery.send(&directive).await {
            log::error!("[{}] delivery failed: {}", self.config.lang, e);
        }
    }
}

/// `/start`, optionally with a bot mention or deep-link payload.
fn is_start_command(msg: &Message) -> bool {
    msg.text()
        .map(|text| text == "/start" || text.starts_with("/start ") || text.starts_with("/start@"))
        .unwrap_or(false)
}

/// Normalizes a callback query into the router's update model. Queries
/// without data or an attached message carry nothing to dispatch on.
fn normalize_callback(q: &CallbackQuery) -> Option<dispatch::Update> {
    let data = q.data.clone()?;
    let message = q.message.as_ref()?;

    let has_photo = match message {
        MaybeInaccessibleMessage::Regular(msg) => msg.photo().is_some(),
        MaybeInaccessibleMessage::Inaccessible(_) => false,
    };

    Some(dispatch::Update::CallbackQuery {
        data,
        chat_id: message.chat().id,
        message_id: message.id(),
        has_photo,
    })
}
