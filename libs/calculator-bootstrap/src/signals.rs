//! Shutdown signal handling.
//!
//! The server owns a root [`CancellationToken`]; [`cancel_on_shutdown`] ties it
//! to process signals so that `axum::serve` can drain in-flight requests.

use anyhow::Result;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Process signal that ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    CtrlC,
    #[cfg(unix)]
    Sigterm,
}

impl ShutdownSignal {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CtrlC => "SIGINT",
            #[cfg(unix)]
            Self::Sigterm => "SIGTERM",
        }
    }
}

/// Waits for Ctrl+C or SIGTERM, whichever comes first.
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<ShutdownSignal> {
    let received = tokio::select! {
        result = wait_ctrl_c() => result?,
        result = wait_sigterm() => result?,
    };

    tracing::info!(
        signal = received.as_str(),
        "Shutdown signal received, initiating graceful shutdown"
    );
    Ok(received)
}

/// Spawns a task that cancels `token` once a shutdown signal arrives.
///
/// If the signal handlers cannot be installed the task falls back to plain
/// `ctrl_c()`, so the server can always be stopped from a terminal.
#[must_use]
pub fn cancel_on_shutdown(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            () = token.cancelled() => {}
            result = wait_for_shutdown() => {
                if let Err(e) = result {
                    tracing::warn!(
                        error = %e,
                        "shutdown: signal waiter failed, falling back to ctrl_c()"
                    );
                    let _ = signal::ctrl_c().await;
                }
                token.cancel();
            }
        }
    })
}

async fn wait_ctrl_c() -> Result<ShutdownSignal> {
    signal::ctrl_c().await.map_err(|e| {
        tracing::error!(%e, "Error handling Ctrl+C signal");
        e
    })?;
    Ok(ShutdownSignal::CtrlC)
}

#[cfg(unix)]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    let mut sigterm =
        signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(|e| {
            tracing::error!(%e, "Failed to install SIGTERM handler");
            e
        })?;
    sigterm.recv().await;
    Ok(ShutdownSignal::Sigterm)
}

#[cfg(not(unix))]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    std::future::pending::<Result<ShutdownSignal>>().await
}
