//! HTTP server setup and lifecycle.
//!
//! Configures the axum server with:
//! - Item routes backed by a shared [`ItemService`]
//! - Graceful shutdown on a watch signal

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::service::ItemService;

/// Bind the listener for the configured address.
///
/// Port 0 binds an ephemeral port; read it back with `local_addr`.
pub async fn bind(config: &Config) -> Result<TcpListener, Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    Ok(listener)
}

/// Serve the items API on an already bound listener.
///
/// # Arguments
///
/// * `listener` - Bound TCP listener
/// * `service` - Request handlers over the opened store
/// * `shutdown_rx` - Receiver for shutdown signal
///
/// # Returns
///
/// Returns when the server has shut down.
pub async fn serve(
    listener: TcpListener,
    service: ItemService,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(AppState::new(service));

    tracing::info!(address = %listener.local_addr()?, "Starting lostfound HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // A dropped sender also ends the wait
            let _ = shutdown_rx.wait_for(|stop| *stop).await;
            tracing::info!("Shutdown signal received, stopping server");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Bind and run the lostfound HTTP server.
pub async fn run_server(
    config: Config,
    service: ItemService,
    shutdown_rx: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = bind(&config).await?;
    serve(listener, service, shutdown_rx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ItemStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_server_stops_on_shutdown_signal() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::test_config(temp_dir.path().to_path_buf());
        let store = ItemStore::open(config.db_path(), config.pool_size).unwrap();

        let listener = bind(&config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(serve(listener, ItemService::new(store), shutdown_rx));

        shutdown_tx.send(true).unwrap();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_server_serves_until_shutdown() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::test_config(temp_dir.path().to_path_buf());
        let store = ItemStore::open(config.db_path(), config.pool_size).unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_server(config, ItemService::new(store), shutdown_rx));

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!handle.is_finished(), "server exited before shutdown");

        shutdown_tx.send(true).unwrap();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_server_rejects_bad_host() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::test_config(temp_dir.path().to_path_buf());
        config.host = "not a host".into();
        let store = ItemStore::open(config.db_path(), config.pool_size).unwrap();

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let result = run_server(config, ItemService::new(store), shutdown_rx).await;
        assert!(result.is_err());
    }
}
