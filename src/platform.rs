//! Generic Google Cloud Platform REST client
//!
//! Pairs a `reqwest::Client` with an ordered chain of outbound request
//! filters. The token filter installed at construction is the first link;
//! service-specific clients (Vision) build on top of this.

use crate::auth::{ServiceAccountCredentials, TokenFilter};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Outbound request mutator applied before a request is sent.
#[async_trait]
pub trait RequestFilter: Send + Sync {
    async fn apply(&self, request: &mut reqwest::Request) -> Result<()>;
}

/// Base client for Google Cloud REST services.
///
/// Safe to share across tasks: filter state carries its own synchronization
/// and `reqwest::Client` is internally pooled.
pub struct PlatformClient {
    client: reqwest::Client,
    token_filter: Arc<TokenFilter>,
    filters: Vec<Arc<dyn RequestFilter>>,
}

impl PlatformClient {
    pub fn new(credentials: ServiceAccountCredentials) -> Self {
        Self::new_with_client(credentials, reqwest::Client::new())
    }

    /// Construct with a caller-supplied `reqwest::Client`, letting several
    /// clients share one connection pool.
    pub fn new_with_client(
        credentials: ServiceAccountCredentials,
        client: reqwest::Client,
    ) -> Self {
        let token_filter = Arc::new(TokenFilter::new_with_exchanger(
            credentials,
            crate::auth::TokenExchanger::new_with_client(client.clone()),
        ));

        Self {
            client,
            filters: vec![token_filter.clone()],
            token_filter,
        }
    }

    /// Append an outbound filter; filters run in insertion order.
    pub fn add_filter(&mut self, filter: Arc<dyn RequestFilter>) {
        self.filters.push(filter);
    }

    pub async fn set_credentials(&self, credentials: ServiceAccountCredentials) {
        self.token_filter.set_credentials(credentials).await;
    }

    pub async fn credentials(&self) -> ServiceAccountCredentials {
        self.token_filter.credentials().await
    }

    /// The token filter guarding this client's cached bearer token.
    pub fn token_filter(&self) -> &TokenFilter {
        &self.token_filter
    }

    /// The underlying HTTP client, for building requests to execute.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Run the filter chain over `request`, send it, and map non-2xx replies
    /// to [`Error::Transport`]. No retries at this layer.
    pub async fn execute(&self, mut request: reqwest::Request) -> Result<reqwest::Response> {
        for filter in &self.filters {
            filter.apply(&mut request).await?;
        }

        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let reason = response.text().await.unwrap_or_default();
            tracing::error!("GCP request failed (status {}): {}", status, reason);
            return Err(Error::Transport { status, reason });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::credentials_with_token_uri;
    use crate::auth::AccessToken;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct TraceHeaderFilter;

    #[async_trait]
    impl RequestFilter for TraceHeaderFilter {
        async fn apply(&self, request: &mut reqwest::Request) -> Result<()> {
            request
                .headers_mut()
                .insert("x-trace", "on".parse().unwrap());
            Ok(())
        }
    }

    async fn seeded_client(server: &MockServer) -> PlatformClient {
        let client =
            PlatformClient::new(credentials_with_token_uri(&format!("{}/token", server.uri())));
        client
            .token_filter()
            .set_token(AccessToken::new("Bearer", "seeded", 3600))
            .await;
        client
    }

    #[tokio::test]
    async fn test_execute_runs_filter_chain_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resource"))
            .and(header("authorization", "Bearer seeded"))
            .and(header("x-trace", "on"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let mut client = seeded_client(&server).await;
        client.add_filter(Arc::new(TraceHeaderFilter));

        let request = client
            .http_client()
            .get(format!("{}/resource", server.uri()))
            .build()
            .unwrap();
        let response = client.execute(request).await.unwrap();

        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_execute_maps_http_failure_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resource"))
            .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
            .mount(&server)
            .await;

        let client = seeded_client(&server).await;
        let request = client
            .http_client()
            .get(format!("{}/resource", server.uri()))
            .build()
            .unwrap();

        let err = client.execute(request).await.unwrap_err();
        match err {
            Error::Transport { status, reason } => {
                assert_eq!(status, reqwest::StatusCode::FORBIDDEN);
                assert_eq!(reason, "PERMISSION_DENIED");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_set_credentials_delegates_to_token_filter() {
        let server = MockServer::start().await;
        let client = seeded_client(&server).await;

        let swapped = credentials_with_token_uri("http://127.0.0.1:1/token");
        client.set_credentials(swapped.clone()).await;

        assert_eq!(client.credentials().await, swapped);
    }
}
