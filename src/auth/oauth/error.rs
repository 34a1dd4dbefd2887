//! OAuth-specific error types for the Akeneo API SDK.
//!
//! # Error Types
//!
//! - [`OAuthError::AuthenticationFailed`]: The password grant was rejected
//! - [`OAuthError::TokenRefreshFailed`]: The refresh-token grant was rejected
//! - [`OAuthError::MissingRefreshToken`]: No refresh token is available
//!
//! # Example
//!
//! ```rust
//! use akeneo_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::AuthenticationFailed {
//!     status: 422,
//!     message: "No user found for the given username and password".to_string(),
//! };
//! assert!(error.to_string().contains("422"));
//! ```

use thiserror::Error;

/// Errors that can occur while obtaining or refreshing access tokens.
///
/// A `status` of `0` means the request never produced an HTTP response
/// (network failure).
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The password grant request failed.
    #[error("Authentication failed with status {status}: {message}")]
    AuthenticationFailed {
        /// The HTTP status code returned, or `0` for network errors.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// The refresh-token grant request failed.
    #[error("Token refresh failed with status {status}: {message}")]
    TokenRefreshFailed {
        /// The HTTP status code returned, or `0` for network errors.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// A refresh was requested but the session holds no refresh token.
    #[error("Session has no refresh token")]
    MissingRefreshToken,
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failed_includes_status_and_message() {
        let error = OAuthError::AuthenticationFailed {
            status: 401,
            message: "Invalid client credentials".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("Invalid client credentials"));
    }

    #[test]
    fn test_token_refresh_failed_includes_status() {
        let error = OAuthError::TokenRefreshFailed {
            status: 400,
            message: "Invalid refresh token".to_string(),
        };
        assert!(error.to_string().starts_with("Token refresh failed with status 400"));
    }

    #[test]
    fn test_oauth_error_implements_std_error() {
        let error: &dyn std::error::Error = &OAuthError::MissingRefreshToken;
        let _ = error;
    }

    #[test]
    fn test_oauth_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OAuthError>();
    }
}
