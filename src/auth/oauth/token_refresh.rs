//! Token refresh for Akeneo access tokens.
//!
//! Akeneo access tokens expire (one hour by default) while the refresh token
//! issued alongside lives much longer. Posting `grant_type = "refresh_token"`
//! to the token endpoint yields a new access token and, usually, a new
//! refresh token.
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::auth::oauth::refresh_access_token;
//!
//! if session.expired() {
//!     if let Some(refresh_token) = &session.refresh_token {
//!         let new_session = refresh_access_token(&config, refresh_token).await?;
//!     }
//! }
//! ```

use serde::Serialize;

use super::{request_token, OAuthError};
use crate::auth::Session;
use crate::config::AkeneoConfig;

/// Grant type for refresh token requests.
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Request body for token refresh.
#[derive(Debug, Serialize)]
struct TokenRefreshRequest<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
}

/// Refreshes an access token using a refresh token.
///
/// # Errors
///
/// - [`OAuthError::MissingRefreshToken`] if `refresh_token` is empty
/// - [`OAuthError::TokenRefreshFailed`] if the refresh request fails
pub async fn refresh_access_token(
    config: &AkeneoConfig,
    refresh_token: &str,
) -> Result<Session, OAuthError> {
    if refresh_token.is_empty() {
        return Err(OAuthError::MissingRefreshToken);
    }

    let request_body = TokenRefreshRequest {
        grant_type: REFRESH_TOKEN_GRANT_TYPE,
        refresh_token,
    };

    let token_response = request_token(config, &request_body)
        .await
        .map_err(|e| OAuthError::TokenRefreshFailed {
            status: e.status,
            message: e.message,
        })?;

    tracing::debug!("OAuth token refreshed");

    Ok(Session::from_access_token_response(&token_response))
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenRefreshRequest<'_>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, Password, ServerUrl, Username};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(server: &str) -> AkeneoConfig {
        AkeneoConfig::builder()
            .server(ServerUrl::new(server).unwrap())
            .client_id(ClientId::new("test-client").unwrap())
            .client_secret(ClientSecret::new("test-secret").unwrap())
            .username(Username::new("api-user").unwrap())
            .password(Password::new("api-pass").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_token_refresh_request_serializes_with_correct_grant_type() {
        let request = TokenRefreshRequest {
            grant_type: REFRESH_TOKEN_GRANT_TYPE,
            refresh_token: "test-refresh-token",
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"grant_type\":\"refresh_token\""));
        assert!(json.contains("\"refresh_token\":\"test-refresh-token\""));
    }

    #[tokio::test]
    async fn test_empty_refresh_token_is_rejected_without_request() {
        let config = create_config("http://127.0.0.1:9");
        let result = refresh_access_token(&config, "").await;
        assert!(matches!(result, Err(OAuthError::MissingRefreshToken)));
    }

    #[tokio::test]
    async fn test_refresh_returns_new_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/oauth/v1/token"))
            .and(body_json(serde_json::json!({
                "grant_type": "refresh_token",
                "refresh_token": "refresh-1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access-2",
                "expires_in": 3600,
                "token_type": "bearer",
                "scope": null,
                "refresh_token": "refresh-2"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_config(&mock_server.uri());
        let session = refresh_access_token(&config, "refresh-1").await.unwrap();

        assert_eq!(session.access_token, "access-2");
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-2"));
    }

    #[tokio::test]
    async fn test_refresh_failure_maps_to_token_refresh_failed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/oauth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&mock_server)
            .await;

        let config = create_config(&mock_server.uri());
        let result = refresh_access_token(&config, "expired").await;

        match result {
            Err(OAuthError::TokenRefreshFailed { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid_grant");
            }
            other => panic!("Expected TokenRefreshFailed error, got {other:?}"),
        }
    }
}
