//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

/// In-flight checkouts get this long to finish once a signal arrives.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("ctrl_c"),
            Self::Terminate => f.write_str("terminate"),
        }
    }
}

async fn wait_for_signal() -> Result<ShutdownSignal, ShutdownSignalError> {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .map_err(ShutdownSignalError::CtrlC)
            .map(|()| ShutdownSignal::Interrupt)
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok(ShutdownSignal::Terminate)
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<ShutdownSignal, ShutdownSignalError>>();

    tokio::select! {
        result = ctrl_c => result,
        result = terminate => result,
    }
}

/// Stop accepting connections once a shutdown signal is received.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let received = wait_for_signal().await?;

    info!(signal = %received, "shutdown signal received, draining connections");

    handle.stop_graceful(Some(DRAIN_TIMEOUT));

    Ok(())
}
