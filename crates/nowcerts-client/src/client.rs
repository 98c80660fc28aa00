//! HTTP implementation of [`InsuredApi`].
//!
//! Every request carries the configured timeout and is sent exactly once.
//! The API key travels as the `apiKey` query parameter of the token
//! exchange; all other calls use `Authorization: Bearer <token>`.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;

use nowcerts_common::{AccessToken, ApiConfig, InsuredPayload, ListQuery};

use crate::InsuredApi;
use crate::error::ClientError;

const TOKEN_PATH: &str = "api/token/exchange-api-key";
const LIST_PATH: &str = "api/odata/InsuredDetailList";
const INSERT_PATH: &str = "api/Insured/Insert";

/// Fixed ordering for the list endpoint.
const LIST_ORDER_BY: &str = "changeDate DESC";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ODataPage {
    value: Option<Vec<Value>>,
    /// Only logged. OData may send it as a number or as a string.
    #[serde(rename = "@odata.count")]
    count: Option<Value>,
}

/// Client for the NowCerts API.
///
/// Cheaply cloneable; clones share the connection pool.
///
/// # Examples
///
/// ```no_run
/// use nowcerts_client::NowCertsClient;
/// use nowcerts_common::ApiConfig;
///
/// let config = ApiConfig::new("amp_ai_...").with_timeout_seconds(4);
/// let client = NowCertsClient::new(config)?;
/// # Ok::<(), nowcerts_client::ClientError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NowCertsClient {
    client: Client,
    config: Arc<ApiConfig>,
}

impl NowCertsClient {
    /// Create a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        // Reject a bad base URL at construction.
        config.endpoint(TOKEN_PATH)?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Get the client's configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, builder: RequestBuilder) -> Result<String, ClientError> {
        let timeout_secs = self.config.timeout_seconds;

        let response = builder
            .timeout(self.config.timeout())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, timeout_secs))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read response body: {e}");
            ClientError::from_reqwest(e, timeout_secs)
        })?;

        if !status.is_success() {
            error!(
                "NowCerts request failed with status {}: {}",
                status.as_u16(),
                body
            );
            return Err(ClientError::StatusError { status, body });
        }

        Ok(body)
    }
}

#[async_trait]
impl InsuredApi for NowCertsClient {
    async fn obtain_token(&self) -> Result<AccessToken, ClientError> {
        let url = self.config.endpoint(TOKEN_PATH)?;
        debug!("Exchanging API key for access token");

        let request = self
            .client
            .post(url)
            .query(&[("apiKey", self.config.api_key.expose_secret())]);

        let body = self.send(request).await?;
        let parsed: TokenResponse = serde_json::from_str(&body)?;

        parsed
            .access_token
            .filter(|token| !token.is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| {
                ClientError::InvalidResponse("token response has no accessToken".to_string())
            })
    }

    async fn list_insureds(
        &self,
        token: &AccessToken,
        query: ListQuery,
    ) -> Result<Vec<Value>, ClientError> {
        let url = self.config.endpoint(LIST_PATH)?;

        let params = [
            ("$count", "true".to_string()),
            ("$orderby", LIST_ORDER_BY.to_string()),
            ("$skip", query.skip.to_string()),
            ("$top", query.top.to_string()),
        ];

        let request = self
            .client
            .get(url)
            .query(&params)
            .header(AUTHORIZATION, token.authorization());

        let body = self.send(request).await?;
        let page: ODataPage = serde_json::from_str(&body)?;
        let items = page.value.unwrap_or_default();

        debug!(
            "Insured list page: {} item(s), upstream count {:?}",
            items.len(),
            page.count
        );

        Ok(items)
    }

    async fn insert_insured(
        &self,
        token: &AccessToken,
        payload: &InsuredPayload,
    ) -> Result<Value, ClientError> {
        let url = self.config.endpoint(INSERT_PATH)?;

        let request = self
            .client
            .post(url)
            .header(AUTHORIZATION, token.authorization())
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(payload)?);

        let body = self.send(request).await?;

        // The insert endpoint echoes the created record; keep non-JSON bodies verbatim.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use std::time::Duration;

    use super::*;
    use nowcerts_common::InsuredRecord;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(base_url: &str) -> NowCertsClient {
        NowCertsClient::new(ApiConfig::new("test-api-key").with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_new_keeps_config() {
        let client = NowCertsClient::new(
            ApiConfig::new("k")
                .with_base_url("http://localhost:8080")
                .with_timeout_seconds(2),
        )
        .unwrap();

        assert_eq!(client.config().base_url, "http://localhost:8080");
        assert_eq!(client.config().timeout_seconds, 2);
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = NowCertsClient::new(ApiConfig::new("k").with_base_url("no scheme here"));
        assert!(matches!(result, Err(ClientError::ConfigurationError(_))));
    }

    #[tokio::test]
    async fn test_obtain_token_sends_api_key_as_query_param() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token/exchange-api-key"))
            .and(query_param("apiKey", "test-api-key"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "token-123",
                "refreshToken": "ignored"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let token = client.obtain_token().await.unwrap();

        assert_eq!(token.authorization(), "Bearer token-123");
    }

    #[tokio::test]
    async fn test_obtain_token_missing_access_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token/exchange-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.obtain_token().await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_obtain_token_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token/exchange-api-key"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.obtain_token().await.unwrap_err();

        assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[tokio::test]
    async fn test_obtain_token_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token/exchange-api-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"accessToken": "late"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = NowCertsClient::new(
            ApiConfig::new("k")
                .with_base_url(mock_server.uri())
                .with_timeout_seconds(1),
        )
        .unwrap();

        let err = client.obtain_token().await.unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {err:?}");
    }

    #[tokio::test]
    async fn test_list_insureds_sends_odata_params_and_bearer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/odata/InsuredDetailList"))
            .and(query_param("$count", "true"))
            .and(query_param("$orderby", "changeDate DESC"))
            .and(query_param("$skip", "10"))
            .and(query_param("$top", "2"))
            .and(header("authorization", "Bearer token-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "@odata.count": 12,
                "value": [
                    {"id": "a", "firstName": "Ann"},
                    {"id": "b", "firstName": "Bob"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let token = AccessToken::new("token-123");
        let items = client
            .list_insureds(&token, ListQuery { top: 2, skip: 10 })
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["firstName"], json!("Ann"));
    }

    #[tokio::test]
    async fn test_list_insureds_missing_value_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/odata/InsuredDetailList"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"@odata.count": 0})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let items = client
            .list_insureds(&AccessToken::new("t"), ListQuery::default())
            .await
            .unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_list_insureds_accepts_string_count() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/odata/InsuredDetailList"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"@odata.count": "7", "value": [{"id": 1}]})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let items = client
            .list_insureds(&AccessToken::new("t"), ListQuery::default())
            .await
            .unwrap();

        assert_eq!(items, vec![json!({"id": 1})]);
    }

    #[tokio::test]
    async fn test_list_insureds_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/odata/InsuredDetailList"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .list_insureds(&AccessToken::new("t"), ListQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_list_insureds_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/odata/InsuredDetailList"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client
            .list_insureds(&AccessToken::new("t"), ListQuery::default())
            .await
            .unwrap_err();

        assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    }

    #[tokio::test]
    async fn test_insert_insured_posts_mapped_payload() {
        let mock_server = MockServer::start().await;

        let record = InsuredRecord::builder()
            .database_id("db-1")
            .first_name("Jane")
            .last_name("Doe")
            .custom_id("C-7")
            .build();
        let payload = InsuredPayload::from(&record);

        Mock::given(method("POST"))
            .and(path("/api/Insured/Insert"))
            .and(header("authorization", "Bearer token-123"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::to_value(&payload).unwrap()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "new-1", "status": "ok"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let response = client
            .insert_insured(&AccessToken::new("token-123"), &payload)
            .await
            .unwrap();

        assert_eq!(response, json!({"id": "new-1", "status": "ok"}));
    }

    #[tokio::test]
    async fn test_insert_insured_keeps_plain_text_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/Insured/Insert"))
            .respond_with(ResponseTemplate::new(200).set_body_string("created"))
            .mount(&mock_server)
            .await;

        let record = InsuredRecord::builder()
            .database_id("db-1")
            .first_name("Jane")
            .last_name("Doe")
            .build();

        let client = create_test_client(&mock_server.uri());
        let response = client
            .insert_insured(&AccessToken::new("t"), &InsuredPayload::from(&record))
            .await
            .unwrap();

        assert_eq!(response, json!("created"));
    }

    #[tokio::test]
    async fn test_insert_insured_bad_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/Insured/Insert"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "databaseId invalid"})),
            )
            .mount(&mock_server)
            .await;

        let record = InsuredRecord::builder()
            .database_id("bad")
            .first_name("Jane")
            .last_name("Doe")
            .build();

        let client = create_test_client(&mock_server.uri());
        let err = client
            .insert_insured(&AccessToken::new("t"), &InsuredPayload::from(&record))
            .await
            .unwrap_err();

        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
        assert!(err.to_string().contains("databaseId invalid"));
    }
}
