//! Session management for Akeneo API authentication.
//!
//! This module provides the [`Session`] type holding the tokens issued by the
//! PIM's OAuth endpoint, and [`AccessTokenResponse`], the body of that
//! endpoint's successful responses.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Body returned by `POST /api/oauth/v1/token`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AccessTokenResponse {
    /// The bearer token for REST calls.
    pub access_token: String,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Token type, `"bearer"` in practice.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Granted scope, usually `null`.
    #[serde(default)]
    pub scope: Option<String>,
    /// Token usable with the `refresh_token` grant.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Represents an authenticated session against an Akeneo PIM server.
///
/// # Example
///
/// ```rust
/// use akeneo_api::Session;
///
/// let session = Session::new("access-token".to_string(), None, None);
///
/// assert!(session.is_active());
/// assert!(!session.expired());
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    /// The access token for API authentication.
    pub access_token: String,

    /// The refresh token, if one was issued.
    pub refresh_token: Option<String>,

    /// When the access token expires, if known.
    pub expires: Option<DateTime<Utc>>,

    /// The granted scope, if reported.
    pub scope: Option<String>,
}

impl Session {
    /// Creates a new session with the specified parameters.
    #[must_use]
    pub const fn new(
        access_token: String,
        refresh_token: Option<String>,
        expires: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires,
            scope: None,
        }
    }

    /// Builds a session from a token endpoint response.
    ///
    /// The expiry is computed from `expires_in` relative to now. Lifetimes
    /// beyond the representable range saturate to the earliest or latest
    /// representable instant.
    #[must_use]
    pub fn from_access_token_response(response: &AccessTokenResponse) -> Self {
        let expires = response.expires_in.map(|seconds| {
            Duration::try_seconds(seconds)
                .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
                .unwrap_or(if seconds < 0 {
                    DateTime::<Utc>::MIN_UTC
                } else {
                    DateTime::<Utc>::MAX_UTC
                })
        });

        Self {
            access_token: response.access_token.clone(),
            refresh_token: response.refresh_token.clone(),
            expires,
            scope: response.scope.clone(),
        }
    }

    /// Returns `true` if this session has expired.
    ///
    /// Sessions without an expiration time are considered never expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns `true` if this session is active (not expired and has access token).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
