//! HTTP request types for the Akeneo API SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder. The SDK
//! only reads from the PIM, so every request is a GET relative to the REST
//! base path.

use std::collections::HashMap;

use crate::clients::errors::InvalidHttpRequestError;

/// A GET request to be sent to the Akeneo REST API.
///
/// # Example
///
/// ```rust
/// use akeneo_api::clients::HttpRequest;
///
/// let request = HttpRequest::builder("products")
///     .query_param("limit", "10")
///     .query_param("with_count", "true")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path, "products");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The path (relative to the REST base path) for this request.
    pub path: String,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for a request to `path`.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyPath`] for an empty path and
    /// [`InvalidHttpRequestError::InvalidPath`] for a path with `..` segments.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        if self.path.split('/').any(|segment| segment == "..") {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    query: Option<HashMap<String, String>>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    /// Creates a new builder. Leading and trailing slashes are stripped.
    fn new(path: impl Into<String>) -> Self {
        let path: String = path.into();
        Self {
            path: path.trim_matches('/').to_string(),
            query: None,
            extra_headers: None,
        }
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            path: self.path,
            query: self.query,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_valid_request() {
        let request = HttpRequest::builder("products/my-sku").build().unwrap();

        assert_eq!(request.path, "products/my-sku");
        assert!(request.query.is_none());
        assert!(request.extra_headers.is_none());
    }

    #[test]
    fn test_builder_strips_surrounding_slashes() {
        let request = HttpRequest::builder("/categories/").build().unwrap();
        assert_eq!(request.path, "categories");
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert!(matches!(
            HttpRequest::builder("/").build(),
            Err(InvalidHttpRequestError::EmptyPath)
        ));
    }

    #[test]
    fn test_parent_segments_are_rejected() {
        assert!(matches!(
            HttpRequest::builder("products/../../oauth").build(),
            Err(InvalidHttpRequestError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_builder_with_query_params() {
        let request = HttpRequest::builder("products")
            .query_param("limit", "50")
            .query_param("page", "2")
            .build()
            .unwrap();

        let query = request.query.unwrap();
        assert_eq!(query.get("limit"), Some(&"50".to_string()));
        assert_eq!(query.get("page"), Some(&"2".to_string()));
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = HttpRequest::builder("products")
            .header("X-Custom-Header", "custom-value")
            .build()
            .unwrap();

        let headers = request.extra_headers.unwrap();
        assert_eq!(
            headers.get("X-Custom-Header"),
            Some(&"custom-value".to_string())
        );
    }
}
