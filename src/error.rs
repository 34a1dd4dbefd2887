//! Error types for the Akeneo API SDK.
//!
//! This module contains the configuration error type used throughout the SDK
//! and [`ClientError`], returned while connecting a client.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use akeneo_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

use crate::auth::oauth::OAuthError;
use crate::clients::HttpError;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client id cannot be empty.
    #[error("Client id cannot be empty. Please provide the id of an Akeneo API connection.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the secret of an Akeneo API connection.")]
    EmptyClientSecret,

    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide the API user of the connection.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the password of the API user.")]
    EmptyPassword,

    /// Server URL is invalid.
    #[error("Invalid server URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://pim.example.com').")]
    InvalidServerUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Page size must be at least one.
    #[error("Invalid page size {size}. Page size must be at least 1.")]
    InvalidPageSize {
        /// The rejected page size.
        size: u32,
    },

    /// The endpoint allow-list contains an unusable name.
    #[error("Invalid endpoint name '{endpoint}'. Endpoint names must be non-empty and contain no '/'.")]
    InvalidEndpoint {
        /// The rejected endpoint name.
        endpoint: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// Errors raised while connecting or re-authenticating a client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The token endpoint refused to issue a token.
    #[error(transparent)]
    OAuth(#[from] OAuthError),

    /// The HTTP client could not be created.
    #[error(transparent)]
    Http(#[from] HttpError),
}
