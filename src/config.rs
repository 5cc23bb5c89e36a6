use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

use crate::state::DEFAULT_ERROR_SOURCE;

/// Log directives used when neither `RUST_LOG` nor `--log-filter` is given.
pub const DEFAULT_LOG_FILTER: &str = "account_management=debug,tower_http=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatabaseBackend {
    /// Process-local tables, lost on shutdown.
    Memory,
    /// SQLite database addressed by `--database-url`.
    Sqlite,
}

/// Runtime configuration. Every flag can also be supplied through its
/// environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "account-management")]
#[command(about = "HTTP service for managing accounts and their phone numbers")]
pub struct AppConfig {
    #[arg(long, env = "ACCOUNTS_BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind_addr: SocketAddr,

    #[arg(
        long,
        env = "ACCOUNTS_DATABASE_BACKEND",
        value_enum,
        ignore_case = true,
        default_value = "sqlite"
    )]
    pub database_backend: DatabaseBackend,

    #[arg(long, env = "ACCOUNTS_DATABASE_URL", default_value = "sqlite::memory:")]
    pub database_url: String,

    #[arg(long, env = "ACCOUNTS_DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub db_max_connections: u32,

    /// Tag written to the `source` field of error bodies.
    #[arg(long, env = "ACCOUNTS_ERROR_SOURCE", default_value = DEFAULT_ERROR_SOURCE)]
    pub error_source: String,

    /// `tracing` filter directives. `RUST_LOG` takes precedence when set.
    #[arg(long, env = "ACCOUNTS_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}
