//! Listener setup and the serve loop.

use axum::Router;
use cadence_error::{ServerError, ServerErrorKind};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Bind the listening socket.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Bind`] if the address is unusable or taken.
#[instrument]
pub async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(format!("{}: {}", addr, e))))
}

/// Serve `router` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish; new connections are refused
/// once shutdown starts.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Serve`] if the accept loop fails.
#[instrument(skip_all)]
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Listening");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Server stopped");
    Ok(())
}
