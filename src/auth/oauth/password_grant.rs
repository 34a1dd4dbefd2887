//! OAuth 2.0 Resource Owner Password Credentials Grant for Akeneo.
//!
//! Akeneo API connections authenticate as an API user: the connection's
//! client id and secret go into the Basic `Authorization` header and the
//! user's credentials into the JSON body with `grant_type = "password"`.
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::auth::oauth::authenticate;
//!
//! let session = authenticate(&config).await?;
//! println!("Access token: {}", session.access_token);
//! ```

use serde::Serialize;

use super::{request_token, OAuthError};
use crate::auth::Session;
use crate::config::AkeneoConfig;

/// Grant type for the password grant.
const PASSWORD_GRANT_TYPE: &str = "password";

/// Request body for the password grant.
#[derive(Debug, Serialize)]
struct PasswordGrantRequest<'a> {
    username: &'a str,
    password: &'a str,
    grant_type: &'a str,
}

/// Authenticates the configured API user and returns a fresh session.
///
/// # Errors
///
/// Returns [`OAuthError::AuthenticationFailed`] if the request fails or the
/// PIM rejects the credentials.
pub async fn authenticate(config: &AkeneoConfig) -> Result<Session, OAuthError> {
    let request_body = PasswordGrantRequest {
        username: config.username().as_ref(),
        password: config.password().as_ref(),
        grant_type: PASSWORD_GRANT_TYPE,
    };

    let token_response = request_token(config, &request_body).await.map_err(|e| {
        tracing::warn!("OAuth authentication failed");
        OAuthError::AuthenticationFailed {
            status: e.status,
            message: e.message,
        }
    })?;

    tracing::debug!("OAuth authentication successful");

    Ok(Session::from_access_token_response(&token_response))
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PasswordGrantRequest<'_>>();
};
