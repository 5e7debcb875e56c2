//! Token cache and `Authorization` header injection.

use crate::auth::{AccessToken, ServiceAccountCredentials, TokenExchanger};
use crate::platform::RequestFilter;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tokio::sync::Mutex;

struct TokenState {
    credentials: ServiceAccountCredentials,
    token: AccessToken,
}

/// Outbound filter that keeps one cached bearer token fresh and injects the
/// `Authorization` header into every request.
///
/// The whole check-expiry / refresh / inject sequence runs under one mutex,
/// so tasks sharing a client trigger at most one exchange per expiry; later
/// callers observe the token refreshed by the first. Swapping credentials
/// does not invalidate a token already cached.
pub struct TokenFilter {
    exchanger: TokenExchanger,
    state: Mutex<TokenState>,
}

impl TokenFilter {
    pub fn new(credentials: ServiceAccountCredentials) -> Self {
        Self::new_with_exchanger(credentials, TokenExchanger::new())
    }

    pub fn new_with_exchanger(
        credentials: ServiceAccountCredentials,
        exchanger: TokenExchanger,
    ) -> Self {
        Self {
            exchanger,
            state: Mutex::new(TokenState {
                credentials,
                token: AccessToken::default(),
            }),
        }
    }

    pub async fn set_credentials(&self, credentials: ServiceAccountCredentials) {
        self.state.lock().await.credentials = credentials;
    }

    pub async fn credentials(&self) -> ServiceAccountCredentials {
        self.state.lock().await.credentials.clone()
    }

    /// Seed or replace the cached token. Replaced wholesale, never mutated.
    pub async fn set_token(&self, token: AccessToken) {
        self.state.lock().await.token = token;
    }

    pub async fn token(&self) -> AccessToken {
        self.state.lock().await.token.clone()
    }
}

#[async_trait]
impl RequestFilter for TokenFilter {
    async fn apply(&self, request: &mut reqwest::Request) -> Result<()> {
        let mut state = self.state.lock().await;

        if state.token.is_expired() {
            tracing::debug!("Cached access token expired, refreshing");
            let token = self.exchanger.exchange(&state.credentials).await?;

            if token.is_expired() {
                return Err(Error::Authentication(
                    "refreshed access token is already expired".to_string(),
                ));
            }
            state.token = token;
        }

        let header = format!("{} {}", state.token.token_type(), state.token.access_token());
        let header = header.parse().map_err(|_| {
            Error::Authentication("access token is not a valid header value".to_string())
        })?;
        request.headers_mut().insert(AUTHORIZATION, header);

        Ok(())
    }
}
