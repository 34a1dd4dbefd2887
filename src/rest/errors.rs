//! Error types for REST resource operations.
//!
//! - [`NormalizeError`]: a raw record does not have the shape the
//!   normalizer expects
//! - [`ResourceError`]: everything that can go wrong while building,
//!   fetching or reading a cursor or an entity
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::rest::ResourceError;
//!
//! match entity.attribute("name", Some("fr_FR")) {
//!     Ok(value) => println!("Name: {:?}", value),
//!     Err(ResourceError::MissingAttribute { key }) => println!("No {key}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::storage::StorageError;

/// Error returned when a raw record cannot be normalized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A field does not have the expected structure.
    #[error("Malformed field '{field}': {reason}")]
    Structural {
        /// The offending field (`record`, `values` or `associations`).
        field: String,
        /// Why decoding failed.
        reason: String,
    },
}

impl NormalizeError {
    pub(crate) fn structural(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::Structural {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

/// Error type for cursor and entity operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The endpoint is not in the configured allow-list.
    ///
    /// Raised before any network call is attempted.
    #[error("Endpoint '{endpoint}' is not allowed by the client configuration")]
    UnknownEndpoint {
        /// The rejected endpoint name.
        endpoint: String,
    },

    /// The requested attribute or association type is not present.
    #[error("Attribute '{key}' is not present on the record")]
    MissingAttribute {
        /// The requested key.
        key: String,
    },

    /// A collection item carries neither `identifier` nor `code`.
    #[error("Item on page {page} of '{endpoint}' has no identifier or code")]
    MissingItemIdentifier {
        /// The collection endpoint.
        endpoint: String,
        /// The page that was being fetched.
        page: u32,
    },

    /// The attribute read by a blob lookup is not a non-empty string path.
    #[error("Attribute '{key}' does not hold a file path")]
    NotAFilePath {
        /// The attribute key.
        key: String,
    },

    /// A fetched record could not be normalized.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ResourceError {
    /// Returns the HTTP status code, when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if the remote service answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_unknown_endpoint_message_names_endpoint() {
        let error = ResourceError::UnknownEndpoint {
            endpoint: "media-files".to_string(),
        };
        assert!(error.to_string().contains("media-files"));
    }

    #[test]
    fn test_missing_attribute_message_names_key() {
        let error = ResourceError::MissingAttribute {
            key: "color".to_string(),
        };
        assert_eq!(error.to_string(), "Attribute 'color' is not present on the record");
    }

    #[test]
    fn test_normalize_error_converts() {
        let error: ResourceError = NormalizeError::structural("values", "expected a map").into();
        assert!(matches!(error, ResourceError::Normalize(_)));
        assert!(error.to_string().contains("values"));
    }

    #[test]
    fn test_not_found_is_detected_from_http_status() {
        let error: ResourceError = HttpError::Response(HttpResponseError {
            code: 404,
            message: String::new(),
        })
        .into();
        assert!(error.is_not_found());
        assert_eq!(error.status(), Some(404));

        let error = ResourceError::MissingAttribute {
            key: "sku".to_string(),
        };
        assert!(!error.is_not_found());
    }
}
