//! `cadence serve`: wire config, upstream client, worker and HTTP surface.

use cadence::{
    AppState, CadenceConfig, GeminiClient, ObservabilityConfig, SerializedWorker, create_router,
    init_observability_with_config,
};
use cadence_server::{bind, serve};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Run until Ctrl-C.
///
/// On shutdown the server stops accepting connections, then the worker is
/// stopped; anything still queued is abandoned.
pub async fn run_server(
    config_path: Option<&Path>,
    bind_override: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => CadenceConfig::load_with_override(path)?,
        None => CadenceConfig::load()?,
    };
    if let Some(addr) = bind_override {
        config.server.bind = addr;
    }

    let mut observability = ObservabilityConfig::from(&config.logging);
    if verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    serve_with_config(config).await
}

#[instrument(skip_all, fields(bind = %config.server.bind, model = %config.gemini.model))]
async fn serve_with_config(config: CadenceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::from_settings(&config.gemini)?;
    let mut worker = SerializedWorker::new(client, config.worker, config.prompt);
    let queue = worker.start()?;

    let state = AppState::new(queue, &config.gates, config.server.wait_timeout())?;
    let listener = bind(&config.server.bind).await?;

    info!(
        generation_gate = config.gates.generation,
        analysis_gate = config.gates.analysis,
        pacing_delay_ms = config.worker.pacing_delay_ms,
        "Cadence ready"
    );
    let served = serve(listener, create_router(state), shutdown_signal()).await;

    worker.stop().await?;
    served?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => warn!(error = %e, "Could not listen for Ctrl-C; shutting down"),
    }
}
