//! HTTP client types for Akeneo API communication.
//!
//! This module provides the transport layer for making authenticated
//! requests to the Akeneo REST API.
//!
//! # Overview
//!
//! - [`Transport`]: The authenticated-GET seam used by cursors and entities
//! - [`HttpClient`]: The reqwest-backed [`Transport`]
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpError`]: Transport failures
//!
//! # Failure Behavior
//!
//! Non-2xx responses and network errors are logged with `tracing` and
//! returned as [`HttpError`]. There is no automatic retry.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, REST_BASE_PATH, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use transport::Transport;
