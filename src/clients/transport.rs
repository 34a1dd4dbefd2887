//! The transport seam between the REST layer and HTTP.
//!
//! [`Transport`] is the single operation the cursor and entity layers need
//! from the network: an authenticated GET returning parsed JSON. The
//! production implementation is [`HttpClient`](crate::clients::HttpClient);
//! other implementations can serve canned responses.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::HttpError;

/// Performs authenticated GET requests against the REST namespace.
///
/// `path` is relative to the REST base path (e.g. `products/my-sku`).
/// A failure is always an `Err`; an empty collection is a successful `Value`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Fetches `path` with the given query parameters.
    async fn authenticated_get(
        &self,
        path: &str,
        query: HashMap<String, String>,
    ) -> Result<Value, HttpError>;
}
