//! Lostfound: a lost-and-found item registry.
//!
//! # Usage
//!
//! ```bash
//! lostfound --port 8000 --data-dir ./data --log-level info
//! ```
//!
//! Environment variables can also be used:
//! - `LOSTFOUND_PORT`: Port to listen on
//! - `LOSTFOUND_DATA_DIR`: Data directory for SQLite
//! - `LOSTFOUND_NO_MENU`: Serve HTTP only
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

use anyhow::{anyhow, Context, Result};
use lostfound::config::Config;
use lostfound::menu;
use lostfound::observability::tracing::init_tracing;
use lostfound::server::{bind, serve};
use lostfound::service::ItemService;
use lostfound::storage::ItemStore;
use tokio::sync::watch;

/// Print startup banner with version and configuration.
fn print_banner(config: &Config, address: &str) {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        r#"
  Lostfound v{} - Lost & Found Registry

  Configuration:
    Address:    http://{}
    Database:   {}
    Menu:       {}

  Press Ctrl+C to shutdown gracefully.
"#,
        version,
        address,
        config.db_path().display(),
        if config.no_menu { "disabled" } else { "enabled" }
    );
}

/// Resolve when SIGINT or SIGTERM arrives.
async fn wait_for_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {
                        tracing::info!("Received SIGINT (Ctrl+C), initiating shutdown...");
                    }
                    _ = sigterm.recv() => {
                        tracing::info!("Received SIGTERM, initiating shutdown...");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                let _ = ctrl_c.await;
                tracing::info!("Received SIGINT (Ctrl+C), initiating shutdown...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = ctrl_c.await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        tracing::info!("Received Ctrl+C, initiating shutdown...");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration from CLI arguments and environment
    let config = Config::parse_args();

    init_tracing(&config.log_level);

    // Open the store once; every handler shares this handle
    let store = ItemStore::open(config.db_path(), config.pool_size)
        .with_context(|| format!("failed to open {}", config.db_path().display()))?;
    let service = ItemService::new(store);

    let listener = bind(&config)
        .await
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    print_banner(&config, &listener.local_addr()?.to_string());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        let _ = signal_tx.send(true);
    });

    // The menu blocks on stdin, so it gets a plain thread that is never joined
    if !config.no_menu {
        let menu_service = service.clone();
        let menu_tx = shutdown_tx.clone();
        std::thread::Builder::new()
            .name("menu".into())
            .spawn(move || {
                if let Err(e) = menu::run_stdio(&menu_service) {
                    tracing::error!(error = %e, "Console menu failed");
                }
                let _ = menu_tx.send(true);
            })
            .context("failed to start console menu")?;
    }

    serve(listener, service, shutdown_rx)
        .await
        .map_err(|e| anyhow!(e))?;

    tracing::info!("Lostfound shutdown complete");
    Ok(())
}
