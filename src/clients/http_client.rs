//! HTTP client for Akeneo API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! GET requests to the Akeneo REST API.

use std::collections::HashMap;

use serde_json::Value;

use crate::auth::Session;
use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::AkeneoConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base path of Akeneo's REST API.
pub const REST_BASE_PATH: &str = "/api/rest/v1";

/// HTTP client for making requests to the Akeneo REST API.
///
/// The client handles:
/// - Base URI construction from the configured server URL
/// - Default headers including User-Agent and the bearer token
/// - Logging of failed requests at the transport boundary
///
/// Requests are never retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use akeneo_api::clients::{HttpClient, HttpRequest};
///
/// let client = HttpClient::new(&config, session)?;
///
/// let request = HttpRequest::builder("products")
///     .query_param("limit", "10")
///     .build()?;
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://pim.example.com`).
    base_uri: String,
    /// Base path (e.g., "/api/rest/v1").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// The session whose token authenticates requests.
    session: Session,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client authenticated by `session`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &AkeneoConfig, session: Session) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Akeneo API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        if !session.access_token.is_empty() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", session.access_token),
            );
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri: config.server().as_ref().to_string(),
            base_path: REST_BASE_PATH.to_string(),
            default_headers,
            session,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the session authenticating this client.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Sends a GET request to the Akeneo REST API.
    ///
    /// Failures are logged before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - A 2xx body is empty or not JSON (`InvalidBody`)
    /// - The body could not be read (`Network`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path);

        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = self.client.get(&url);
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        let res = match req_builder.send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Request to {} failed: {}", request.path, e);
                return Err(HttpError::Network(e));
            }
        };

        let code = res.status().as_u16();
        let reason = res.status().canonical_reason().unwrap_or_default();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = match res.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Reading response from {} failed: {}", request.path, e);
                return Err(HttpError::Network(e));
            }
        };

        let parsed = serde_json::from_str::<Value>(&body_text);

        if !(200..=299).contains(&code) {
            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                parsed.unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };
            let response = HttpResponse::new(code, res_headers, body);
            let message = Self::serialize_error(&response);
            tracing::error!(
                "Request returned status \"{}\" with message \"{}\"",
                code,
                reason
            );
            return Err(HttpError::Response(HttpResponseError { code, message }));
        }

        // An empty success body is a failure, not an empty record.
        let body = parsed.map_err(|e| {
            tracing::error!("Response from {} is not valid JSON: {}", request.path, e);
            HttpError::InvalidBody {
                path: request.path.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Serializes the error fields of an Akeneo error body to JSON.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for key in ["code", "message", "errors", "raw_body"] {
            if let Some(value) = response.body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Transport for HttpClient {
    async fn authenticated_get(
        &self,
        path: &str,
        query: HashMap<String, String>,
    ) -> Result<Value, HttpError> {
        let mut builder = HttpRequest::builder(path);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let request = builder.build()?;

        self.request(request).await.map(|response| response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, Password, ServerUrl, Username};

    fn create_config(prefix: Option<&str>) -> AkeneoConfig {
        let mut builder = AkeneoConfig::builder()
            .server(ServerUrl::new("https://pim.example.com").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .username(Username::new("admin").unwrap())
            .password(Password::new("admin").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    fn create_session(token: &str) -> Session {
        Session::new(token.to_string(), None, None)
    }

    #[test]
    fn test_client_construction() {
        let client = HttpClient::new(&create_config(None), create_session("token")).unwrap();

        assert_eq!(client.base_uri(), "https://pim.example.com");
        assert_eq!(client.base_path(), "/api/rest/v1");
        assert_eq!(client.session().access_token, "token");
    }

    #[test]
    fn test_bearer_token_header_injection() {
        let client = HttpClient::new(&create_config(None), create_session("abc")).unwrap();

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer abc".to_string())
        );
    }

    #[test]
    fn test_no_authorization_header_when_token_empty() {
        let client = HttpClient::new(&create_config(None), create_session("")).unwrap();
        assert!(client.default_headers().get("Authorization").is_none());
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_config(None), create_session("abc")).unwrap();
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client =
            HttpClient::new(&create_config(Some("MyApp/1.0")), create_session("abc")).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Akeneo API Library"));
    }

    #[test]
    fn test_serialize_error_keeps_akeneo_fields() {
        let response = HttpResponse::new(
            404,
            HashMap::new(),
            serde_json::json!({
                "code": 404,
                "message": "Resource `unknown` does not exist.",
                "_links": {}
            }),
        );

        let message = HttpClient::serialize_error(&response);
        assert!(message.contains("\"code\":404"));
        assert!(message.contains("does not exist"));
        assert!(!message.contains("_links"));
    }
}
