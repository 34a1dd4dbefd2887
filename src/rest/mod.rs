//! Read access to Akeneo REST resources.
//!
//! This module turns the PIM's raw JSON into flat records and provides the
//! two ways of reaching them:
//!
//! - **[`normalize`]**: pure conversion of raw records into
//!   [`NormalizedRecord`]s
//! - **[`Cursor`]**: page-by-page access to a collection endpoint
//! - **[`Entity`]**: one record with attribute lookup, association
//!   resolution and blob retrieval
//! - **[`ResourceError`]**: errors raised by cursors and entities
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::rest::{AssociationKind, PageOutcome};
//!
//! let mut categories = client.cursor("categories", None)?;
//! if let PageOutcome::Fetched { items, .. } = categories.get().await? {
//!     println!("{} categories on page 1", items.len());
//! }
//!
//! let mut product = client.product("1111111171")?;
//! product.fetch().await?;
//! let name = product.attribute("name", None)?;
//! ```

mod cursor;
mod entity;
mod errors;
pub mod normalize;

pub use cursor::{Cursor, PageOutcome};
pub use entity::{AssociationKind, AttributeRef, Entity};
pub use errors::{NormalizeError, ResourceError};
pub use normalize::{
    normalize_record, normalize_record_with, parse_associations, parse_values, AssociationLinks,
    AssociationMode, AssociationSet, AttributeValue, NormalizedRecord,
};
