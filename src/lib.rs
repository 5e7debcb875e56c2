//! Google Cloud Vision client authenticated with service-account credentials
//!
//! Handles the OAuth2 JWT-bearer flow (credential loading, token exchange,
//! token caching) and the Vision `images:annotate` request/response cycle,
//! turning the JSON reply into typed annotation objects.

pub mod auth;
pub mod error;
pub mod platform;
pub mod vision;

pub use error::{Error, Result};
