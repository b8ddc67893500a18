//! Server runner: loads the dataset, binds the listener and serves requests.

use std::future::Future;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::routes::{self, AppState};
use crate::source;

/// Load the dataset and serve until Ctrl-C.
///
/// The dataset is fully loaded before the listener binds; a load failure
/// returns an error and nothing is served.
pub async fn run(config: &ServerConfig) -> crate::Result<()> {
    let source = source::from_location(&config.source);
    info!(source = %source.describe(), "loading dataset");

    let dataset = source.load().await?;
    info!(
        rows = dataset.len(),
        columns = ?dataset.schema().names(),
        "dataset loaded"
    );

    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|e| crate::ServerError::Bind {
            addr: config.listen,
            source: e,
        })?;
    info!(addr = %config.listen, "DNS log API listening");

    let state = AppState::new(dataset).with_double_encode(config.double_encode);
    serve(listener, state, shutdown_signal()).await
}

/// Serve requests on an already bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> crate::Result<()> {
    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(crate::ServerError::Serve)?;

    info!("DNS log API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
