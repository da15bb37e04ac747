//! Configuration parsing for the lostfound service.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Sensible defaults for quick start

use clap::Parser;
use std::path::PathBuf;

/// Lostfound: a lost-and-found item registry with HTTP and console access.
#[derive(Parser, Debug, Clone)]
#[command(name = "lostfound")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "LOSTFOUND_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "LOSTFOUND_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Data directory for the SQLite database
    #[arg(short, long, env = "LOSTFOUND_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Database file name inside the data directory
    #[arg(long, env = "LOSTFOUND_DB_FILE", default_value = "lost_and_found.db")]
    pub db_file: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Maximum number of pooled SQLite connections
    #[arg(long, env = "LOSTFOUND_POOL_SIZE", default_value_t = 4)]
    pub pool_size: u32,

    /// Serve HTTP only, without the interactive menu
    #[arg(long, env = "LOSTFOUND_NO_MENU")]
    pub no_menu: bool,
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Full path of the database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    /// Create a configuration suitable for tests.
    pub fn test_config(data_dir: PathBuf) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0, // Random port
            data_dir,
            db_file: "test.db".into(),
            log_level: "debug".into(),
            pool_size: 2,
            no_menu: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            data_dir: PathBuf::from("./data"),
            db_file: "lost_and_found.db".into(),
            log_level: "info".into(),
            pool_size: 4,
            no_menu: false,
        }
    }
}
