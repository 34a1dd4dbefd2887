//! OAuth 2.0 token acquisition for Akeneo PIM.
//!
//! Akeneo issues tokens from `POST {server}/api/oauth/v1/token`. The request
//! is authenticated with HTTP Basic credentials built from the API
//! connection's client id and secret, and carries a JSON body naming the
//! grant.
//!
//! - [`authenticate`]: Password grant with the configured API user
//! - [`refresh_access_token`]: Refresh-token grant
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::auth::oauth::authenticate;
//!
//! let session = authenticate(&config).await?;
//! println!("Token expires at {:?}", session.expires);
//! ```

mod error;
mod password_grant;
mod token_refresh;

pub use error::OAuthError;
pub use password_grant::authenticate;
pub use token_refresh::refresh_access_token;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::auth::session::AccessTokenResponse;
use crate::config::AkeneoConfig;

/// Path of the token endpoint, relative to the server URL.
pub const TOKEN_PATH: &str = "/api/oauth/v1/token";

/// A failed token request before it is mapped to a grant-specific error.
#[derive(Debug)]
struct TokenRequestFailure {
    status: u16,
    message: String,
}

/// Builds the `Authorization: Basic ...` header value for the token endpoint.
fn basic_authorization(config: &AkeneoConfig) -> String {
    let credentials = format!(
        "{}:{}",
        config.client_id().as_ref(),
        config.client_secret().as_ref()
    );
    format!("Basic {}", STANDARD.encode(credentials))
}

/// Posts a grant body to the token endpoint and parses the token response.
async fn request_token<B: Serialize + Sync>(
    config: &AkeneoConfig,
    body: &B,
) -> Result<AccessTokenResponse, TokenRequestFailure> {
    let token_url = config.server().join(TOKEN_PATH);

    let client = reqwest::Client::new();
    let response = client
        .post(&token_url)
        .header("Authorization", basic_authorization(config))
        .json(body)
        .send()
        .await
        .map_err(|e| TokenRequestFailure {
            status: 0,
            message: format!("Network error: {e}"),
        })?;

    let status = response.status().as_u16();

    if !response.status().is_success() {
        let error_body = response.text().await.unwrap_or_default();
        tracing::error!("Token request returned status \"{}\"", status);
        return Err(TokenRequestFailure {
            status,
            message: error_body,
        });
    }

    response.json().await.map_err(|e| TokenRequestFailure {
        status,
        message: format!("Failed to parse token response: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, Password, ServerUrl, Username};

    #[test]
    fn test_basic_authorization_encodes_client_credentials() {
        let config = AkeneoConfig::builder()
            .server(ServerUrl::new("https://pim.example.com").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .username(Username::new("admin").unwrap())
            .password(Password::new("admin").unwrap())
            .build()
            .unwrap();

        assert_eq!(basic_authorization(&config), "Basic Y2xpZW50OnNlY3JldA==");
    }
}
