//! # Akeneo API Rust SDK
//!
//! A Rust SDK for the Akeneo PIM REST API, providing type-safe configuration,
//! OAuth authentication, paginated collection access and normalization of
//! Akeneo's localization-aware records into flat attribute maps.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`AkeneoConfig`] and [`AkeneoConfigBuilder`]
//! - Validated newtypes for the server URL and API credentials
//! - OAuth password and refresh-token grants via [`auth::oauth`]
//! - Session management for authenticated API calls
//! - Async HTTP transport behind the [`Transport`](clients::Transport) seam
//! - Paginated collections via [`Cursor`](rest::Cursor)
//! - Single records via [`Entity`](rest::Entity), with locale-aware
//!   attribute lookup and lazily resolved associations
//! - Binary retrieval of media attributes via [`storage`]
//!
//! ## Quick Start
//!
//! ```rust
//! use akeneo_api::{AkeneoConfig, ClientId, ClientSecret, Password, ServerUrl, Username};
//!
//! // Create configuration using the builder pattern
//! let config = AkeneoConfig::builder()
//!     .server(ServerUrl::new("https://pim.example.com").unwrap())
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .client_secret(ClientSecret::new("your-secret").unwrap())
//!     .username(Username::new("api-user").unwrap())
//!     .password(Password::new("api-password").unwrap())
//!     .default_locale("fr_FR")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Connecting
//!
//! ```rust,ignore
//! use akeneo_api::AkeneoClient;
//!
//! // Password grant, then an HTTP client carrying the bearer token
//! let mut client = AkeneoClient::connect(config).await?;
//!
//! // Renew the token once it has expired
//! client.ensure_authenticated().await?;
//! ```
//!
//! ## Walking a Collection
//!
//! ```rust,ignore
//! use akeneo_api::rest::PageOutcome;
//!
//! let mut cursor = client.cursor("products", None)?;
//! let mut outcome = cursor.get().await?;
//! println!("{:?} products", cursor.total_count());
//!
//! while outcome.is_fetched() {
//!     for product in cursor.page_items() {
//!         println!("{:?}", product.identifier());
//!     }
//!     outcome = cursor.next().await?;
//! }
//! ```
//!
//! ## Reading a Record
//!
//! ```rust,ignore
//! use akeneo_api::rest::AssociationKind;
//! use akeneo_api::storage::FileStorage;
//!
//! let client = client.with_storage(FileStorage::new("/var/pim/file_storage/catalog"));
//!
//! let mut product = client.product("1111111171")?;
//! product.fetch().await?;
//!
//! let name = product.attribute("name", Some("en_US"))?;
//! let pack = product.associations("PACK", AssociationKind::Products).await?;
//! let picture = product.blob("picture").await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Read-only**: The SDK never writes to the PIM
//! - **No retries**: Failures are logged and returned to the caller
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod auth;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod storage;

// Re-export public types at crate root for convenience
pub use auth::Session;
pub use client::AkeneoClient;
pub use config::{
    AkeneoConfig, AkeneoConfigBuilder, ClientId, ClientSecret, Password, ServerUrl, Username,
};
pub use error::{ClientError, ConfigError};

// Re-export HTTP client types
pub use clients::{HttpClient, HttpError, HttpResponseError, Transport};

// Re-export resource types
pub use rest::{
    AssociationKind, AttributeRef, Cursor, Entity, NormalizedRecord, PageOutcome, ResourceError,
};

// Re-export OAuth types
pub use auth::oauth::OAuthError;
