//! Bearer tokens returned by the OAuth2 token endpoint.

use chrono::Utc;
use serde_json::Value;

/// OAuth2 access token plus the local time it was captured.
///
/// The issuance timestamp is stamped when the token is constructed, not taken
/// from the server, so expiry is judged against the caller's clock. The
/// zero-value token is always expired; a token is never partially populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessToken {
    token_type: String,
    access_token: String,
    expires_in: u64,
    issued_time: u64,
}

fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

impl AccessToken {
    /// Construct a token issued now.
    pub fn new(token_type: &str, access_token: &str, expires_in: u64) -> Self {
        Self {
            token_type: token_type.to_string(),
            access_token: access_token.to_string(),
            expires_in,
            issued_time: unix_now(),
        }
    }

    /// Parse a token-endpoint response body.
    ///
    /// A well-formed grant yields a full token; anything else logs the
    /// endpoint's `error`/`error_description` diagnostics and returns the
    /// zero-value, which reads as already expired.
    pub fn from_json(json: &Value) -> Self {
        let access_token = json.get("access_token").and_then(Value::as_str);
        let token_type = json.get("token_type").and_then(Value::as_str);
        let expires_in = json.get("expires_in").and_then(Value::as_u64);

        if let (Some(access_token), Some(token_type), Some(expires_in)) =
            (access_token, token_type, expires_in)
        {
            return Self::new(token_type, access_token, expires_in);
        }

        let error = json
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        let description = json
            .get("error_description")
            .and_then(Value::as_str)
            .unwrap_or("no description");
        tracing::error!("Token exchange rejected: {}: {}", error, description);

        Self::default()
    }

    /// Whether the token's lifetime has elapsed on the local clock.
    ///
    /// Exactly at the lifetime boundary the token still counts as usable.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(unix_now())
    }

    fn is_expired_at(&self, now: u64) -> bool {
        now.saturating_sub(self.issued_time) > self.expires_in
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Lifetime in seconds as reported by the token endpoint.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    /// Unix timestamp at which this token was captured locally.
    pub fn issued_time(&self) -> u64 {
        self.issued_time
    }
}
