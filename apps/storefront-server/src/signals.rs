//! Process signals that end the serve loop.

use anyhow::{Context, Result};
use tokio::signal;

/// What ended the serve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Interrupt,
    Terminate,
}

impl Trigger {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::Interrupt => "SIGINT",
            Trigger::Terminate => "SIGTERM",
        }
    }
}

/// Signal handlers registered up front, so a registration failure stops
/// startup instead of surfacing after the listener is bound.
pub struct ShutdownListener {
    #[cfg(unix)]
    terminate: signal::unix::Signal,
}

impl ShutdownListener {
    /// # Errors
    /// Returns an error when the SIGTERM handler cannot be registered.
    pub fn install() -> Result<Self> {
        #[cfg(unix)]
        {
            let terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
                .context("failed to register SIGTERM handler")?;
            Ok(Self { terminate })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Resolve on the first interrupt or terminate signal.
    ///
    /// A broken Ctrl+C stream is logged and ignored; SIGTERM still ends the loop.
    pub async fn wait(mut self) -> Trigger {
        let trigger = tokio::select! {
            () = interrupt() => Trigger::Interrupt,
            () = self.terminate() => Trigger::Terminate,
        };
        tracing::info!(signal = trigger.as_str(), "Shutdown requested, draining connections");
        trigger
    }

    #[cfg(unix)]
    async fn terminate(&mut self) {
        if self.terminate.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }

    #[cfg(not(unix))]
    async fn terminate(&mut self) {
        std::future::pending::<()>().await;
    }
}

async fn interrupt() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}
