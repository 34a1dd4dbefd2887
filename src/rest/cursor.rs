//! Paginated access to collection endpoints.
//!
//! A [`Cursor`] walks a collection such as `products` one page at a time.
//! It starts unfetched (page 0); [`Cursor::get`] loads page 1, and
//! [`Cursor::next`] / [`Cursor::prev`] move one page forward or back.
//!
//! The PIM only reports the collection size when asked with
//! `with_count=true`, which the cursor does on page 1 only. The known total
//! is therefore whatever page 1 reported last; later pages never refresh it.
//!
//! # Bounds
//!
//! - Page 0 is never valid.
//! - Page 1 is always valid, so an unfetched cursor can always start.
//! - While the total is unknown no other page is valid.
//! - With a known total `t`, page `p` is rejected when `p > t / page_size`,
//!   evaluated exactly as `p * page_size > t`.
//!
//! A page outside these bounds yields [`PageOutcome::OutOfBounds`] without
//! a request being sent.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cursor = client.cursor("products", None)?;
//!
//! let mut outcome = cursor.get().await?;
//! while let PageOutcome::Fetched { items, .. } = outcome {
//!     for item in &items {
//!         println!("{:?}", item.identifier());
//!     }
//!     outcome = cursor.next().await?;
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::client::AkeneoClient;
use crate::clients::{HttpClient, Transport};
use crate::rest::errors::{NormalizeError, ResourceError};
use crate::rest::normalize::{normalize_record, NormalizedRecord};

/// Result of a page transition that did not fail.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub enum PageOutcome {
    /// The page was fetched; `items` are its records in response order.
    Fetched {
        /// The fetched page number.
        page: u32,
        /// The normalized records of that page.
        items: Vec<NormalizedRecord>,
    },
    /// The page failed the bounds check. Nothing was sent or changed.
    OutOfBounds {
        /// The rejected page number.
        page: u32,
    },
}

impl PageOutcome {
    /// Returns `true` for [`PageOutcome::Fetched`].
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }

    /// Returns the requested page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        match self {
            Self::Fetched { page, .. } | Self::OutOfBounds { page } => *page,
        }
    }

    /// Returns the fetched records, empty when out of bounds.
    #[must_use]
    pub fn items(&self) -> &[NormalizedRecord] {
        match self {
            Self::Fetched { items, .. } => items,
            Self::OutOfBounds { .. } => &[],
        }
    }
}

/// A paginated view over one collection endpoint.
///
/// Items from every fetched page accumulate in [`Cursor::items`], keyed by
/// identifier; a refetched identifier overwrites its earlier record.
/// [`Cursor::page_items`] yields the records of the current page only.
#[derive(Debug)]
pub struct Cursor<'c, T: Transport = HttpClient> {
    client: &'c AkeneoClient<T>,
    endpoint: String,
    page_size: u32,
    page: u32,
    total_count: Option<u64>,
    items: BTreeMap<String, NormalizedRecord>,
    page_identifiers: Vec<String>,
}

impl<'c, T: Transport> Cursor<'c, T> {
    /// Creates an unfetched cursor. The endpoint must already be allowed.
    pub(crate) fn new(client: &'c AkeneoClient<T>, endpoint: String, page_size: u32) -> Self {
        Self {
            client,
            endpoint,
            page_size: page_size.max(1),
            page: 0,
            total_count: None,
            items: BTreeMap::new(),
            page_identifiers: Vec::new(),
        }
    }

    /// Returns the collection endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the number of items requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the last fetched page, 0 before the first fetch.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.page
    }

    /// Returns the collection size reported by the last page-1 fetch.
    #[must_use]
    pub const fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Returns every item fetched so far, keyed by identifier.
    #[must_use]
    pub const fn items(&self) -> &BTreeMap<String, NormalizedRecord> {
        &self.items
    }

    /// Returns the item stored under `identifier`.
    #[must_use]
    pub fn item(&self, identifier: &str) -> Option<&NormalizedRecord> {
        self.items.get(identifier)
    }

    /// Returns the identifiers of the current page, in response order.
    #[must_use]
    pub fn page_identifiers(&self) -> &[String] {
        &self.page_identifiers
    }

    /// Iterates over the records of the current page, in response order.
    pub fn page_items(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.page_identifiers
            .iter()
            .filter_map(|identifier| self.items.get(identifier))
    }

    /// Returns `true` if `page` passes the bounds check.
    #[must_use]
    pub fn page_exists(&self, page: u32) -> bool {
        match (page, self.total_count) {
            (0, _) | (2.., None) => false,
            (1, _) => true,
            (page, Some(total)) => u64::from(page) * u64::from(self.page_size) <= total,
        }
    }

    /// Fetches page 1.
    ///
    /// # Errors
    ///
    /// See [`Cursor::fetch`].
    pub async fn get(&mut self) -> Result<PageOutcome, ResourceError> {
        self.fetch(1).await
    }

    /// Fetches the page after the current one.
    ///
    /// # Errors
    ///
    /// See [`Cursor::fetch`].
    pub async fn next(&mut self) -> Result<PageOutcome, ResourceError> {
        self.fetch(self.page.saturating_add(1)).await
    }

    /// Fetches the page before the current one.
    ///
    /// From page 1 or an unfetched cursor this targets page 0, which is
    /// always out of bounds.
    ///
    /// # Errors
    ///
    /// See [`Cursor::fetch`].
    pub async fn prev(&mut self) -> Result<PageOutcome, ResourceError> {
        self.fetch(self.page.saturating_sub(1)).await
    }

    /// Fetches `page` and stores its items.
    ///
    /// State changes only once the whole page has been received and
    /// normalized; page 1 also overwrites [`Cursor::total_count`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails,
    /// [`ResourceError::Normalize`] if the page or one of its items is
    /// mis-shaped, and [`ResourceError::MissingItemIdentifier`] if an item
    /// has neither `identifier` nor `code`.
    pub async fn fetch(&mut self, page: u32) -> Result<PageOutcome, ResourceError> {
        if !self.page_exists(page) {
            tracing::debug!(
                "Page {} of {} is out of bounds (total {:?}, page size {})",
                page,
                self.endpoint,
                self.total_count,
                self.page_size
            );
            return Ok(PageOutcome::OutOfBounds { page });
        }

        let with_count = page == 1;
        let mut query = HashMap::new();
        query.insert("limit".to_string(), self.page_size.to_string());
        query.insert("page".to_string(), page.to_string());
        query.insert("with_count".to_string(), with_count.to_string());

        tracing::debug!("Fetching page {} of {}", page, self.endpoint);
        let body = self
            .client
            .transport()
            .authenticated_get(&self.endpoint, query)
            .await?;

        let raw_items = body
            .pointer("/_embedded/items")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                NormalizeError::structural("_embedded.items", "expected a list of items")
            })?;

        let mut fetched = Vec::with_capacity(raw_items.len());
        for raw in raw_items {
            let record = normalize_record(raw)?;
            let identifier = record
                .identifier()
                .ok_or_else(|| ResourceError::MissingItemIdentifier {
                    endpoint: self.endpoint.clone(),
                    page,
                })?
                .to_string();
            fetched.push((identifier, record));
        }

        if with_count {
            self.total_count = body.get("items_count").and_then(Value::as_u64);
        }
        self.page = page;
        self.page_identifiers = fetched.iter().map(|(id, _)| id.clone()).collect();

        let mut items = Vec::with_capacity(fetched.len());
        for (identifier, record) in fetched {
            items.push(record.clone());
            self.items.insert(identifier, record);
        }

        Ok(PageOutcome::Fetched { page, items })
    }
}
