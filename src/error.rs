//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JWT signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Transport error (status {status}): {reason}")]
    Transport {
        status: reqwest::StatusCode,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
