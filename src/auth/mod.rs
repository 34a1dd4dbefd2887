//! Authentication types for the Akeneo API SDK.
//!
//! Akeneo's REST API is protected by OAuth 2.0. An API connection (client id
//! and secret) plus an API user (username and password) are exchanged for a
//! short-lived access token and a refresh token.
//!
//! # Overview
//!
//! - [`Session`]: Tokens and expiry of an authenticated connection
//! - [`oauth`]: Password grant and refresh-token grant
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::auth::oauth::{authenticate, refresh_access_token};
//!
//! let session = authenticate(&config).await?;
//!
//! if session.expired() {
//!     if let Some(refresh_token) = &session.refresh_token {
//!         let session = refresh_access_token(&config, refresh_token).await?;
//!     }
//! }
//! ```

pub mod oauth;
pub mod session;

pub use session::{AccessTokenResponse, Session};
