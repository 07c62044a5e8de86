//! Error types

use thiserror::Error;

/// Main error type for Syntax & Sips
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Platform API error: {0}")]
    Platform(String),

    #[error("Invalid session token")]
    InvalidSession,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
