//! The Akeneo client.
//!
//! [`AkeneoClient`] owns the configuration, the transport and the optional
//! storage backend. It enforces the endpoint allow-list and hands out
//! [`Cursor`]s and [`Entity`]s that borrow it.
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::{AkeneoClient, AkeneoConfig};
//!
//! let mut client = AkeneoClient::connect(config).await?;
//!
//! let mut products = client.cursor("products", None)?;
//! products.get().await?;
//!
//! // Later, once the access token may have expired:
//! client.ensure_authenticated().await?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use serde_json::Value;

use crate::auth::oauth::{authenticate, refresh_access_token};
use crate::auth::Session;
use crate::clients::{HttpClient, Transport};
use crate::config::AkeneoConfig;
use crate::error::ClientError;
use crate::rest::{Cursor, Entity, ResourceError};
use crate::storage::Storage;

/// Endpoint of [`AkeneoClient::product`].
pub const PRODUCTS_ENDPOINT: &str = "products";

/// Client for an Akeneo PIM server.
///
/// Generic over its [`Transport`]; [`AkeneoClient::connect`] builds one
/// backed by [`HttpClient`].
pub struct AkeneoClient<T: Transport = HttpClient> {
    config: AkeneoConfig,
    transport: T,
    storage: Option<Arc<dyn Storage>>,
}

impl<T: Transport + fmt::Debug> fmt::Debug for AkeneoClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AkeneoClient")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("storage", &self.storage.as_ref().map(|_| "<storage>"))
            .finish()
    }
}

impl<T: Transport> AkeneoClient<T> {
    /// Creates a client over an existing transport.
    #[must_use]
    pub const fn new(config: AkeneoConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            storage: None,
        }
    }

    /// Sets the storage backend used by [`Entity::blob`].
    #[must_use]
    pub fn with_storage(mut self, storage: impl Storage + 'static) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &AkeneoConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the storage backend, if one is configured.
    #[must_use]
    pub fn storage(&self) -> Option<&dyn Storage> {
        self.storage.as_deref()
    }

    /// Fails unless `endpoint` is in the allow-list.
    fn check_endpoint(&self, endpoint: &str) -> Result<(), ResourceError> {
        if self.config.allows_endpoint(endpoint) {
            Ok(())
        } else {
            Err(ResourceError::UnknownEndpoint {
                endpoint: endpoint.to_string(),
            })
        }
    }

    /// Sends a raw GET to an allowed endpoint and returns the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownEndpoint`] before any request if the
    /// endpoint is not allowed, and [`ResourceError::Http`] if the request
    /// fails.
    pub async fn get(
        &self,
        endpoint: &str,
        query: HashMap<String, String>,
    ) -> Result<Value, ResourceError> {
        self.check_endpoint(endpoint)?;
        Ok(self.transport.authenticated_get(endpoint, query).await?)
    }

    /// Creates a cursor over a collection endpoint.
    ///
    /// `page_size` defaults to the configured page size.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownEndpoint`] if the endpoint is not
    /// allowed.
    pub fn cursor(
        &self,
        endpoint: &str,
        page_size: Option<NonZeroU32>,
    ) -> Result<Cursor<'_, T>, ResourceError> {
        self.check_endpoint(endpoint)?;
        let page_size = page_size.map_or(self.config.page_size(), NonZeroU32::get);
        Ok(Cursor::new(self, endpoint.to_string(), page_size))
    }

    /// Creates an unfetched entity for record `id` of `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownEndpoint`] if the endpoint is not
    /// allowed.
    pub fn entity(&self, endpoint: &str, id: &str) -> Result<Entity<'_, T>, ResourceError> {
        self.check_endpoint(endpoint)?;
        Ok(Entity::new(self, endpoint.to_string(), id.to_string()))
    }

    /// Creates an unfetched product entity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownEndpoint`] if `products` is not
    /// allowed.
    pub fn product(&self, identifier: &str) -> Result<Entity<'_, T>, ResourceError> {
        self.entity(PRODUCTS_ENDPOINT, identifier)
    }
}

impl AkeneoClient<HttpClient> {
    /// Authenticates with the password grant and builds an HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::OAuth`] if authentication fails and
    /// [`ClientError::Http`] if the HTTP client cannot be created.
    pub async fn connect(config: AkeneoConfig) -> Result<Self, ClientError> {
        let session = authenticate(&config).await?;
        let transport = HttpClient::new(&config, session)?;
        Ok(Self::new(config, transport))
    }

    /// Returns the current session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        self.transport.session()
    }

    /// Renews the session if it has expired.
    ///
    /// Uses the refresh token when one was issued, and the password grant
    /// otherwise or when the refresh is refused. Returns `true` if a new
    /// session was obtained.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::OAuth`] if no new token could be obtained and
    /// [`ClientError::Http`] if the HTTP client cannot be rebuilt. The
    /// previous session is kept on error.
    pub async fn ensure_authenticated(&mut self) -> Result<bool, ClientError> {
        if self.session().is_active() {
            return Ok(false);
        }

        let refreshed = match self.session().refresh_token.as_deref() {
            Some(refresh_token) => match refresh_access_token(&self.config, refresh_token).await {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("Token refresh failed, falling back to password grant: {}", e);
                    None
                }
            },
            None => None,
        };

        let session = match refreshed {
            Some(session) => session,
            None => authenticate(&self.config).await?,
        };

        self.transport = HttpClient::new(&self.config, session)?;
        Ok(true)
    }
}

// Verify AkeneoClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AkeneoClient>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpError;
    use crate::config::{ClientId, ClientSecret, Password, ServerUrl, Username};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingTransport {
        calls: AtomicUsize,
    }

    impl Transport for CountingTransport {
        async fn authenticated_get(
            &self,
            path: &str,
            _query: HashMap<String, String>,
        ) -> Result<Value, HttpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::json!({ "path": path }))
        }
    }

    fn config() -> AkeneoConfig {
        AkeneoConfig::builder()
            .server(ServerUrl::new("https://pim.example.com").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .username(Username::new("admin").unwrap())
            .password(Password::new("admin").unwrap())
            .endpoints(["products", "categories"])
            .page_size(25)
            .build()
            .unwrap()
    }

    #[test]
    fn test_unknown_endpoint_is_rejected_synchronously() {
        let client = AkeneoClient::new(config(), CountingTransport::default());

        assert!(matches!(
            client.cursor("families", None),
            Err(ResourceError::UnknownEndpoint { ref endpoint }) if endpoint == "families"
        ));
        assert!(matches!(
            client.entity("families", "shoes"),
            Err(ResourceError::UnknownEndpoint { .. })
        ));
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_raw_get_checks_allow_list() {
        let client = AkeneoClient::new(config(), CountingTransport::default());

        let body = client.get("categories", HashMap::new()).await.unwrap();
        assert_eq!(body["path"], "categories");

        let result = client.get("channels", HashMap::new()).await;
        assert!(matches!(result, Err(ResourceError::UnknownEndpoint { .. })));
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cursor_page_size_defaults_to_config() {
        let client = AkeneoClient::new(config(), CountingTransport::default());

        assert_eq!(client.cursor("products", None).unwrap().page_size(), 25);
        assert_eq!(
            client
                .cursor("products", NonZeroU32::new(100))
                .unwrap()
                .page_size(),
            100
        );
    }

    #[test]
    fn test_product_is_entity_on_products() {
        let client = AkeneoClient::new(config(), CountingTransport::default());
        let product = client.product("1111111171").unwrap();

        assert_eq!(product.endpoint(), "products");
        assert_eq!(product.id(), "1111111171");
        assert!(!product.is_fetched());
    }

    #[test]
    fn test_storage_is_optional() {
        let client = AkeneoClient::new(config(), CountingTransport::default());
        assert!(client.storage().is_none());

        let client = client.with_storage(crate::storage::MemoryStorage::new());
        assert!(client.storage().is_some());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let client = AkeneoClient::new(config(), CountingTransport::default());
        let debug = format!("{client:?}");
        assert!(debug.contains("AkeneoClient"));
        assert!(!debug.contains("\"secret\""));
    }
}
