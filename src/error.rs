//! Error types and result handling for pg-lag-check.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate. Every variant is fatal
//! for a check: the binary prints it as `ERROR: <message>` to stderr and
//! exits with status 1.
//!
//! # Example
//!
//! ```rust
//! use pg_lag_check::{Error, Result};
//!
//! fn require_host() -> Result<String> {
//!     Err(Error::MissingEnv { name: "PGHOST".to_string() })
//! }
//!
//! match require_host() {
//!     Ok(host) => println!("Using {}", host),
//!     Err(e) => eprintln!("ERROR: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for pg-lag-check operations.
///
/// A standby that has not replayed anything is not represented here; that
/// outcome is a `None` reading, see [`crate::lag::fetch_lag`].
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment variable is absent and has no default.
    #[error("environment variable {name} is not set and no default provided.")]
    MissingEnv {
        /// Name of the missing variable
        name: String,
    },

    /// Configuration value present but unusable, e.g. a non-numeric port.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Opening the database connection failed (auth, network, unknown database).
    #[error("could not connect to PostgreSQL: {0}")]
    Connect(#[source] tokio_postgres::Error),

    /// PostgreSQL error raised after the connection was established.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// The lag query returned a result of unexpected shape.
    #[error("Query error: {0}")]
    Query(String),

    /// Background connection task panicked or was cancelled.
    #[error("Task error: {0}")]
    Task(String),

    /// I/O error, typically from writing the report to stdout.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for errors raised before any database contact.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::MissingEnv { .. } | Error::Config(_))
    }
}

/// A convenient Result type alias for pg-lag-check operations.
pub type Result<T> = std::result::Result<T, Error>;
