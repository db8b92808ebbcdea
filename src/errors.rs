//! Unified error type for the crate.
//!
//! Expected domain outcomes (validation failures, quota exhaustion, missing
//! rows) are dedicated variants so callers can match on them; infrastructure
//! failures convert via `#[from]` and propagate with `?`.

use thiserror::Error;

/// All the ways an operation in this crate can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected by a domain rule.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The requested hours do not fit the remaining quota.
    #[error("Quota exceeded: requested {requested}h with {remaining}h remaining")]
    QuotaExceeded { requested: i32, remaining: i32 },

    /// A referenced row does not exist.
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    /// Registration attempted with an email already on file.
    #[error("Email already registered: {email}")]
    EmailTaken { email: String },

    /// A clock-in was attempted while a previous one is still open.
    #[error("An active time clock record already exists for holiday {holiday_id}")]
    ClockAlreadyActive { holiday_id: i64 },

    /// Proof document with a MIME type outside the allow-list.
    #[error("Unsupported proof document type: {mime}")]
    UnsupportedProofType { mime: String },

    /// A time string that does not parse as "HH:MM".
    #[error("Invalid time value: {value}")]
    InvalidTime { value: String },

    /// config.toml could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Anything the database layer reports.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON (de)serialization failure at the wire boundary.
    #[error("Wire format error: {0}")]
    WireFormat(#[from] serde_json::Error),

    /// Filesystem failure during bootstrap.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
