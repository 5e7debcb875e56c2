//! Service-account authentication for Google Cloud Platform
//!
//! Covers the OAuth2 JWT-bearer flow: parsing service-account key files,
//! exchanging a signed assertion for a bearer token, and caching that token
//! across outgoing requests.

pub mod credentials;
pub mod exchanger;
pub mod filter;
pub mod token;

pub use credentials::ServiceAccountCredentials;
pub use exchanger::TokenExchanger;
pub use filter::TokenFilter;
pub use token::AccessToken;

/// Default scope requested for Google Cloud Platform tokens.
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
