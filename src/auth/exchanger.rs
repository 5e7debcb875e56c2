//! JWT-bearer token exchange against the credential's token endpoint.

use crate::auth::{AccessToken, ServiceAccountCredentials, DEFAULT_SCOPE};
use crate::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::Value;

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime; Google rejects anything above one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claims asserted by the signed JWT.
#[derive(Debug, Serialize)]
struct Claims {
    /// Issuer: the service account's email address.
    iss: String,
    /// Requested API scope.
    scope: String,
    /// Audience: the token endpoint itself.
    aud: String,
    /// Issued-at, unix seconds.
    iat: i64,
    /// Expiration, unix seconds.
    exp: i64,
}

/// Builds a signed JWT assertion and exchanges it for a bearer access token.
pub struct TokenExchanger {
    client: reqwest::Client,
    scope: String,
}

impl Default for TokenExchanger {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenExchanger {
    pub fn new() -> Self {
        Self::new_with_client(reqwest::Client::new())
    }

    pub fn new_with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    /// Override the requested scope (defaults to the cloud-platform scope).
    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }

    fn build_assertion(&self, credentials: &ServiceAccountCredentials) -> Result<String> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(credentials.private_key_id().to_string());

        let iat = Utc::now().timestamp();
        let claims = Claims {
            iss: credentials.client_email().to_string(),
            scope: self.scope.clone(),
            aud: credentials.token_uri().to_string(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(credentials.private_key().as_bytes())?;
        Ok(encode(&header, &claims, &key)?)
    }

    /// Perform one token exchange round trip.
    ///
    /// HTTP failures surface as [`Error::Authentication`]; a 2xx reply with an
    /// OAuth error payload produces the zero-value token (see
    /// [`AccessToken::from_json`]).
    pub async fn exchange(
        &self,
        credentials: &ServiceAccountCredentials,
    ) -> Result<AccessToken> {
        tracing::debug!(
            "Exchanging JWT assertion for {} at {}",
            credentials.client_email(),
            credentials.token_uri()
        );

        let assertion = self.build_assertion(credentials)?;
        let params = [("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())];

        let response = self
            .client
            .post(credentials.token_uri())
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Token endpoint returned {}: {}", status, body);
            return Err(Error::Authentication(format!(
                "token exchange failed (status {}): {}",
                status, body
            )));
        }

        let json: Value = response.json().await?;
        Ok(AccessToken::from_json(&json))
    }
}
