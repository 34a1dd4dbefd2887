//! Configuration types for the Akeneo API SDK.
//!
//! This module provides the configuration used to authenticate against an
//! Akeneo PIM server and to scope which REST endpoints the client may reach.
//!
//! # Overview
//!
//! - [`AkeneoConfig`]: The main configuration struct holding all SDK settings
//! - [`AkeneoConfigBuilder`]: A builder for constructing [`AkeneoConfig`] instances
//! - [`ServerUrl`]: A validated PIM server URL
//! - [`ClientId`], [`ClientSecret`]: Credentials of an API connection
//! - [`Username`], [`Password`]: The API user for the password grant
//!
//! # Example
//!
//! ```rust
//! use akeneo_api::{AkeneoConfig, ClientId, ClientSecret, Password, ServerUrl, Username};
//!
//! let config = AkeneoConfig::builder()
//!     .server(ServerUrl::new("https://pim.example.com").unwrap())
//!     .client_id(ClientId::new("client").unwrap())
//!     .client_secret(ClientSecret::new("secret").unwrap())
//!     .username(Username::new("admin").unwrap())
//!     .password(Password::new("admin").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.allows_endpoint("products"));
//! ```

mod newtypes;

pub use newtypes::{ClientId, ClientSecret, Password, ServerUrl, Username};

use crate::error::ConfigError;

/// Endpoints reachable when no allow-list is configured.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "products",
    "product-models",
    "categories",
    "families",
    "attributes",
    "channels",
    "locales",
    "groups",
];

/// Locale used by attribute lookups when the caller names none.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Number of items requested per page when the caller names no page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Configuration for the Akeneo API SDK.
///
/// # Thread Safety
///
/// `AkeneoConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct AkeneoConfig {
    server: ServerUrl,
    client_id: ClientId,
    client_secret: ClientSecret,
    username: Username,
    password: Password,
    endpoints: Vec<String>,
    default_locale: String,
    page_size: u32,
    user_agent_prefix: Option<String>,
}

impl AkeneoConfig {
    /// Creates a new builder for constructing an `AkeneoConfig`.
    #[must_use]
    pub fn builder() -> AkeneoConfigBuilder {
        AkeneoConfigBuilder::new()
    }

    /// Returns the PIM server URL.
    #[must_use]
    pub const fn server(&self) -> &ServerUrl {
        &self.server
    }

    /// Returns the API connection client id.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the API connection secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the API username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the API user password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the endpoint allow-list.
    #[must_use]
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Returns `true` if `endpoint` is in the allow-list.
    #[must_use]
    pub fn allows_endpoint(&self, endpoint: &str) -> bool {
        self.endpoints.iter().any(|e| e == endpoint)
    }

    /// Returns the locale used when attribute lookups name none.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Returns the default cursor page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify AkeneoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AkeneoConfig>();
};

/// Builder for constructing [`AkeneoConfig`] instances.
///
/// Required fields are `server`, `client_id`, `client_secret`, `username`
/// and `password`.
///
/// # Defaults
///
/// - `endpoints`: [`DEFAULT_ENDPOINTS`]
/// - `default_locale`: [`DEFAULT_LOCALE`]
/// - `page_size`: [`DEFAULT_PAGE_SIZE`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct AkeneoConfigBuilder {
    server: Option<ServerUrl>,
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    username: Option<Username>,
    password: Option<Password>,
    endpoints: Option<Vec<String>>,
    default_locale: Option<String>,
    page_size: Option<u32>,
    user_agent_prefix: Option<String>,
}

impl AkeneoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the PIM server URL (required).
    #[must_use]
    pub fn server(mut self, server: ServerUrl) -> Self {
        self.server = Some(server);
        self
    }

    /// Sets the API connection client id (required).
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the API connection secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the API username (required).
    #[must_use]
    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the API user password (required).
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Replaces the endpoint allow-list.
    #[must_use]
    pub fn endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = Some(endpoints.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the locale used when attribute lookups name none.
    #[must_use]
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Sets the default cursor page size.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`AkeneoConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] for an unset required
    /// field, [`ConfigError::InvalidPageSize`] for a zero page size and
    /// [`ConfigError::InvalidEndpoint`] for an unusable endpoint name.
    pub fn build(self) -> Result<AkeneoConfig, ConfigError> {
        let server = self
            .server
            .ok_or(ConfigError::MissingRequiredField { field: "server" })?;
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self.client_secret.ok_or(ConfigError::MissingRequiredField {
            field: "client_secret",
        })?;
        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize { size: page_size });
        }

        let endpoints = self
            .endpoints
            .unwrap_or_else(|| DEFAULT_ENDPOINTS.iter().map(|e| (*e).to_string()).collect());
        if let Some(bad) = endpoints.iter().find(|e| e.is_empty() || e.contains('/')) {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: bad.clone(),
            });
        }

        Ok(AkeneoConfig {
            server,
            client_id,
            client_secret,
            username,
            password,
            endpoints,
            default_locale: self
                .default_locale
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            page_size,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
