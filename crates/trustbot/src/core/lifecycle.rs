//! Lifecycle supervisor
//!
//! Tracks one instance's liveness through `Starting → Running → Stopping`
//! and exposes it to the health endpoints. Transitions only move forward;
//! a restarted process begins again at `Starting`.

use std::sync::atomic::{AtomicU8, Ordering};

use tokio::signal;

/// Process-wide liveness, written only by the supervisor and read by
/// concurrent health-probe requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LivenessState {
    Starting = 0,
    Running = 1,
    Stopping = 2,
}

impl LivenessState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LivenessState::Starting,
            1 => LivenessState::Running,
            _ => LivenessState::Stopping,
        }
    }

    /// The value reported by the health endpoint.
    pub fn as_health_str(self) -> &'static str {
        match self {
            LivenessState::Stopping => "stopping",
            _ => "healthy",
        }
    }
}

/// Single-writer state machine for one bot instance.
pub struct Supervisor {
    lang: &'static str,
    state: AtomicU8,
}

impl Supervisor {
    pub fn new(lang: &'static str) -> Self {
        Self {
            lang,
            state: AtomicU8::new(LivenessState::Starting as u8),
        }
    }

    pub fn state(&self) -> LivenessState {
        LivenessState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Advances the state machine. Backward transitions are ignored;
    /// once an instance stops, only a fresh process returns to Starting.
    pub fn advance(&self, next: LivenessState) {
        let previous = LivenessState::from_u8(self.state.fetch_max(next as u8, Ordering::SeqCst));
        if previous < next {
            log::info!("[{}] lifecycle: {:?} -> {:?}", self.lang, previous, next);
        } else if previous > next {
            log::warn!(
                "[{}] ignoring backward lifecycle transition {:?} -> {:?}",
                self.lang,
                previous,
                next
            );
        }
    }
}

/// Completes when the hosting environment asks the process to stop
/// (SIGINT or, on unix, SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
