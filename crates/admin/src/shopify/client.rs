//! Shopify Admin GraphQL API client.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;

use super::AdminShopifyError;
use crate::config::ShopifyConfig;

/// Shopify Admin GraphQL API client.
///
/// Cheap to clone; all clones share the underlying HTTP client and token.
/// Every operation issues exactly one outbound request and waits for its
/// result - failures are returned to the caller, never retried here.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    http: reqwest::Client,
    endpoint: String,
    access_token: SecretString,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
}

impl AdminClient {
    /// Create a client for the configured store and API version.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self {
            inner: Arc::new(AdminClientInner {
                http,
                endpoint,
                access_token: config.access_token.clone(),
            }),
        }
    }

    /// Execute a GraphQL document against the Admin API.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::RateLimited` on HTTP 429.
    /// Returns `AdminShopifyError::Unauthorized` if the token is rejected.
    /// Returns `AdminShopifyError::GraphQL` if the response carries errors.
    /// Returns `AdminShopifyError::Http` on network failures.
    #[instrument(skip(self, query, variables))]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T, AdminShopifyError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or(serde_json::Value::Null),
        });

        let response = self
            .inner
            .http
            .post(&self.inner.endpoint)
            .header(
                "X-Shopify-Access-Token",
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if let Some(err) = status_error(response.status(), response.headers()) {
            return Err(err);
        }

        let graphql_response: GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let messages = errors.into_iter().map(|e| e.message).collect();
            return Err(AdminShopifyError::GraphQL(messages));
        }

        graphql_response
            .data
            .ok_or_else(|| AdminShopifyError::GraphQL(vec!["No data in response".to_string()]))
    }
}

/// Map a response status to its client error, if any.
///
/// HTTP 429 becomes `RateLimited`, honoring a `Retry-After` header and
/// falling back to 60 seconds without one. 401 and 403 both become
/// `Unauthorized`. Anything else is left for the GraphQL layer.
fn status_error(
    status: reqwest::StatusCode,
    headers: &reqwest::header::HeaderMap,
) -> Option<AdminShopifyError> {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = headers
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return Some(AdminShopifyError::RateLimited(retry_after));
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Some(AdminShopifyError::Unauthorized);
    }

    None
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue};

    use super::*;

    fn test_config() -> ShopifyConfig {
        ShopifyConfig {
            store: "example.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            access_token: SecretString::from("shpat_test_token"),
        }
    }

    #[test]
    fn test_endpoint_uses_store_and_version() {
        let client = AdminClient::new(&test_config());
        assert_eq!(
            client.inner.endpoint,
            "https://example.myshopify.com/admin/api/2026-01/graphql.json"
        );
    }

    #[test]
    fn test_rate_limit_honors_retry_after_header() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("30"));
        let err = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, &headers);
        assert!(matches!(err, Some(AdminShopifyError::RateLimited(30))));
    }

    #[test]
    fn test_rate_limit_defaults_to_sixty_seconds() {
        let err = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, &HeaderMap::new());
        assert!(matches!(err, Some(AdminShopifyError::RateLimited(60))));
    }

    #[test]
    fn test_unauthorized_and_forbidden_map_to_unauthorized() {
        for status in [
            reqwest::StatusCode::UNAUTHORIZED,
            reqwest::StatusCode::FORBIDDEN,
        ] {
            let err = status_error(status, &HeaderMap::new());
            assert!(matches!(err, Some(AdminShopifyError::Unauthorized)));
        }
    }

    #[test]
    fn test_success_statuses_pass_through() {
        assert!(status_error(reqwest::StatusCode::OK, &HeaderMap::new()).is_none());
        assert!(status_error(reqwest::StatusCode::BAD_REQUEST, &HeaderMap::new()).is_none());
    }

    #[test]
    fn test_graphql_response_parses_errors() {
        let raw = r#"{"data": null, "errors": [{"message": "boom", "locations": [{"line": 1, "column": 2}]}]}"#;
        let parsed: GraphQLResponse<serde_json::Value> =
            serde_json::from_str(raw).expect("parse");
        let errors = parsed.errors.expect("errors present");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().map(|e| e.message.as_str()), Some("boom"));
    }
}
