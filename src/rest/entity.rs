//! Single records addressed by endpoint and id.
//!
//! An [`Entity`] starts empty. [`Entity::fetch`] loads and normalizes the
//! record; attribute reads, association resolution and blob retrieval work
//! on the fetched data.
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::rest::{AssociationKind, AttributeRef};
//!
//! let mut product = client.product("1111111171")?;
//! product.fetch().await?;
//!
//! if let AttributeRef::Value(name) = product.attribute("name", Some("fr_FR"))? {
//!     println!("Nom: {name}");
//! }
//!
//! for pack_item in product.associations("PACK", AssociationKind::Products).await? {
//!     println!("Pack item: {}", pack_item.id());
//! }
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::client::AkeneoClient;
use crate::clients::{HttpClient, Transport};
use crate::rest::errors::ResourceError;
use crate::rest::normalize::{
    normalize_record, AssociationLinks, AssociationSet, AttributeValue, NormalizedRecord,
    ASSOCIATIONS_KEY,
};
use crate::storage::StorageError;

/// Which identifier list of an association type to resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AssociationKind {
    /// The `products` list, resolved against `products`.
    #[default]
    Products,
    /// The `product_models` list, resolved against `product-models`.
    ProductModels,
    /// The `groups` list, resolved against `groups`.
    Groups,
}

impl AssociationKind {
    /// Returns the endpoint associated records are fetched from.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::ProductModels => "product-models",
            Self::Groups => "groups",
        }
    }

    /// Returns this kind's identifiers, empty when the list is absent.
    #[must_use]
    pub fn identifiers(self, links: &AssociationLinks) -> &[String] {
        let list = match self {
            Self::Products => &links.products,
            Self::ProductModels => &links.product_models,
            Self::Groups => &links.groups,
        };
        list.as_deref().unwrap_or_default()
    }
}

/// A borrowed attribute returned by [`Entity::attribute`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttributeRef<'a> {
    /// A plain value, or the variant of the requested locale.
    Value(&'a Value),
    /// The whole locale map, returned when the requested locale is absent.
    Localized(&'a Map<String, Value>),
    /// The record's associations.
    Associations(&'a AssociationSet),
}

impl<'a> AttributeRef<'a> {
    /// Returns the value, if a single one was resolved.
    #[must_use]
    pub const fn as_value(&self) -> Option<&'a Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the resolved value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_value().and_then(Value::as_str)
    }
}

/// One remote record, lazily fetched.
///
/// Resolved associations are memoized per `(association type, kind)` for
/// the lifetime of the entity.
#[derive(Debug)]
pub struct Entity<'c, T: Transport = HttpClient> {
    client: &'c AkeneoClient<T>,
    endpoint: String,
    id: String,
    data: Option<NormalizedRecord>,
    association_cache: HashMap<(String, AssociationKind), Vec<Entity<'c, T>>>,
}

impl<'c, T: Transport> Entity<'c, T> {
    /// Creates an unfetched entity. The endpoint must already be allowed.
    pub(crate) fn new(client: &'c AkeneoClient<T>, endpoint: String, id: String) -> Self {
        Self {
            client,
            endpoint,
            id,
            data: None,
            association_cache: HashMap::new(),
        }
    }

    /// Returns the endpoint this record lives on.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the normalized data, `None` before the first fetch.
    #[must_use]
    pub const fn data(&self) -> Option<&NormalizedRecord> {
        self.data.as_ref()
    }

    /// Returns `true` once the record has been fetched.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        self.data.is_some()
    }

    /// Fetches the record and replaces the stored data.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails and
    /// [`ResourceError::Normalize`] if the record is mis-shaped. The stored
    /// data is left untouched on error.
    pub async fn fetch(&mut self) -> Result<&NormalizedRecord, ResourceError> {
        let path = format!("{}/{}", self.endpoint, urlencoding::encode(&self.id));
        tracing::debug!("Fetching {}", path);

        let raw = self
            .client
            .transport()
            .authenticated_get(&path, HashMap::new())
            .await?;
        let record = normalize_record(&raw)?;

        Ok(self.data.insert(record))
    }

    /// Reads an attribute.
    ///
    /// `locale` defaults to the client's configured default locale. A plain
    /// attribute is returned as is. A localized attribute resolves to the
    /// requested locale's value, or to the whole locale map when that locale
    /// is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingAttribute`] if `key` is not present,
    /// including when the entity has not been fetched.
    pub fn attribute(
        &self,
        key: &str,
        locale: Option<&str>,
    ) -> Result<AttributeRef<'_>, ResourceError> {
        let value = self
            .data
            .as_ref()
            .and_then(|data| data.get(key))
            .ok_or_else(|| ResourceError::MissingAttribute {
                key: key.to_string(),
            })?;

        let locale = locale.unwrap_or_else(|| self.client.config().default_locale());
        Ok(match value {
            AttributeValue::Plain(value) => AttributeRef::Value(value),
            AttributeValue::Localized(locales) => locales
                .get(locale)
                .map_or(AttributeRef::Localized(locales), AttributeRef::Value),
            AttributeValue::Associations(set) => AttributeRef::Associations(set),
        })
    }

    /// Resolves the records associated under `association_type`.
    ///
    /// The first call for a `(association_type, kind)` pair fetches every
    /// associated record one after another, in list order, and memoizes
    /// them. Later calls return the memoized records without any request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingAttribute`] if the record has no such
    /// association type, [`ResourceError::UnknownEndpoint`] if the kind's
    /// endpoint is not allowed, and any error of [`Entity::fetch`] raised
    /// by an associated record. Nothing is memoized on error.
    pub async fn associations(
        &mut self,
        association_type: &str,
        kind: AssociationKind,
    ) -> Result<&[Entity<'c, T>], ResourceError> {
        let cache_key = (association_type.to_string(), kind);

        if !self.association_cache.contains_key(&cache_key) {
            let identifiers = self.association_identifiers(association_type, kind)?;
            let client = self.client;

            let mut children = Vec::with_capacity(identifiers.len());
            for identifier in identifiers {
                let mut child = client.entity(kind.endpoint(), &identifier)?;
                child.fetch().await?;
                children.push(child);
            }

            tracing::debug!(
                "Resolved {} {} association(s) of type {} for {}/{}",
                children.len(),
                kind.endpoint(),
                association_type,
                self.endpoint,
                self.id
            );
            self.association_cache.insert(cache_key.clone(), children);
        }

        Ok(self
            .association_cache
            .get(&cache_key)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    fn association_identifiers(
        &self,
        association_type: &str,
        kind: AssociationKind,
    ) -> Result<Vec<String>, ResourceError> {
        let set = self
            .data
            .as_ref()
            .and_then(NormalizedRecord::associations)
            .ok_or_else(|| ResourceError::MissingAttribute {
                key: ASSOCIATIONS_KEY.to_string(),
            })?;

        let links = set
            .get(association_type)
            .ok_or_else(|| ResourceError::MissingAttribute {
                key: association_type.to_string(),
            })?;

        Ok(kind.identifiers(links).to_vec())
    }

    /// Reads the file stored at the path held by attribute `key`.
    ///
    /// The attribute is resolved with the default locale.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingAttribute`] if `key` is absent,
    /// [`ResourceError::NotAFilePath`] if it does not hold a string,
    /// and [`ResourceError::Storage`] for an empty path, a missing storage
    /// backend or a failed read.
    pub async fn blob(&self, key: &str) -> Result<Vec<u8>, ResourceError> {
        let path = match self.attribute(key, None)? {
            AttributeRef::Value(Value::String(path)) if path.is_empty() => {
                return Err(StorageError::EmptyPath.into());
            }
            AttributeRef::Value(Value::String(path)) => path.clone(),
            _ => {
                return Err(ResourceError::NotAFilePath {
                    key: key.to_string(),
                })
            }
        };

        let storage = self.client.storage().ok_or(StorageError::NotConfigured)?;
        Ok(storage.read(&path).await?)
    }
}
