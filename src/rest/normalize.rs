//! Normalization of raw Akeneo records.
//!
//! The REST API returns records in a verbose, localization-aware shape:
//!
//! ```json
//! {
//!   "identifier": "1111111171",
//!   "family": "clothing",
//!   "values": {
//!     "name": [{ "locale": null, "scope": null, "data": "Bag" }],
//!     "description": [
//!       { "locale": "en_US", "scope": "ecommerce", "data": "A bag" },
//!       { "locale": "fr_FR", "scope": "ecommerce", "data": "Un sac" }
//!     ]
//!   },
//!   "associations": {
//!     "PACK": { "groups": [], "products": ["1111111172"], "product_models": [] }
//!   },
//!   "_links": { "self": { "href": "..." } }
//! }
//! ```
//!
//! [`normalize_record`] flattens it into a [`NormalizedRecord`]:
//!
//! - `values` entries are merged into the top level. An attribute with
//!   exactly one variant collapses to its bare `data`; any other count
//!   becomes a locale-keyed map.
//! - `associations` is kept under the `associations` key as an
//!   [`AssociationSet`].
//! - `_`-prefixed metadata keys are dropped.
//! - Everything else passes through unchanged.
//!
//! # Example
//!
//! ```rust
//! use akeneo_api::rest::{normalize_record, AttributeValue};
//! use serde_json::json;
//!
//! let record = normalize_record(&json!({
//!     "identifier": "sku-1",
//!     "values": { "weight": [{ "locale": null, "scope": null, "data": 43 }] },
//!     "_links": {}
//! }))
//! .unwrap();
//!
//! assert_eq!(record.get("weight"), Some(&AttributeValue::Plain(json!(43))));
//! assert!(record.get("_links").is_none());
//! ```

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::rest::errors::NormalizeError;

/// Key of the attribute values field in raw records.
pub const VALUES_KEY: &str = "values";

/// Key of the associations field in raw and normalized records.
pub const ASSOCIATIONS_KEY: &str = "associations";

/// Prefix marking service metadata such as `_links`.
const METADATA_PREFIX: char = '_';

/// How [`parse_associations`] treats zero-length sub-lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssociationMode {
    /// Copy every sub-list verbatim, empty ones included.
    #[default]
    RetainEmpty,
    /// Omit zero-length sub-lists. The association type itself is kept,
    /// possibly as an empty object.
    PruneEmpty,
}

/// The identifier lists of one association type.
///
/// A `None` list was either absent in the raw record or pruned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationLinks {
    /// Associated group codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    /// Associated product identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
    /// Associated product model codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_models: Option<Vec<String>>,
}

impl AssociationLinks {
    fn pruned(self) -> Self {
        let keep = |list: Option<Vec<String>>| list.filter(|l| !l.is_empty());
        Self {
            groups: keep(self.groups),
            products: keep(self.products),
            product_models: keep(self.product_models),
        }
    }

    /// Returns `true` if no sub-list is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_none() && self.products.is_none() && self.product_models.is_none()
    }
}

/// Association type name to [`AssociationLinks`], in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssociationSet {
    entries: Vec<(String, AssociationLinks)>,
}

impl AssociationSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the links of an association type.
    #[must_use]
    pub fn get(&self, association_type: &str) -> Option<&AssociationLinks> {
        self.entries
            .iter()
            .find(|(name, _)| name == association_type)
            .map(|(_, links)| links)
    }

    /// Inserts or replaces an association type, keeping its first position.
    pub fn insert(&mut self, association_type: impl Into<String>, links: AssociationLinks) {
        let association_type = association_type.into();
        match self
            .entries
            .iter_mut()
            .find(|(name, _)| *name == association_type)
        {
            Some(entry) => entry.1 = links,
            None => self.entries.push((association_type, links)),
        }
    }

    /// Iterates over association types in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssociationLinks)> {
        self.entries.iter().map(|(name, links)| (name.as_str(), links))
    }

    /// Returns the association type names in input order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of association types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set has no association type.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AssociationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, links) in &self.entries {
            map.serialize_entry(name, links)?;
        }
        map.end()
    }
}

/// One attribute of a [`NormalizedRecord`].
///
/// Serializes without a tag, so a record serializes back to flat JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A passthrough field or a single-variant value.
    Plain(Value),
    /// Locale code to value. A variant without locale is keyed by `""`.
    Localized(Map<String, Value>),
    /// The record's associations.
    Associations(AssociationSet),
}

impl AttributeValue {
    /// Returns the plain value, if this is one.
    #[must_use]
    pub const fn as_plain(&self) -> Option<&Value> {
        match self {
            Self::Plain(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the locale map, if this is one.
    #[must_use]
    pub const fn as_localized(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Localized(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the association set, if this is one.
    #[must_use]
    pub const fn as_associations(&self) -> Option<&AssociationSet> {
        match self {
            Self::Associations(set) => Some(set),
            _ => None,
        }
    }
}

/// A flat attribute map built from one raw record.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedRecord(BTreeMap<String, AttributeValue>);

impl NormalizedRecord {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the attribute stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Stores an attribute, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.0.insert(key.into(), value);
    }

    /// Iterates over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record has no attribute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the record's associations, if it has any.
    #[must_use]
    pub fn associations(&self) -> Option<&AssociationSet> {
        self.get(ASSOCIATIONS_KEY)
            .and_then(AttributeValue::as_associations)
    }

    /// Returns the key collection items are stored under: the `identifier`
    /// field for products, `code` for every other resource.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        ["identifier", "code"]
            .into_iter()
            .filter_map(|key| self.get(key).and_then(AttributeValue::as_plain))
            .find_map(Value::as_str)
    }

    /// Serializes the record back to a flat JSON object.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if the record cannot be represented
    /// as JSON.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// One variant of an attribute inside a raw `values` field.
///
/// `scope` is ignored.
#[derive(Debug, Deserialize)]
struct RawVariant {
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    data: Value,
}

/// Normalizes a raw record, retaining empty association lists.
///
/// # Errors
///
/// Returns [`NormalizeError::Structural`] if the record is not an object or
/// if its `values` or `associations` field is mis-shaped.
pub fn normalize_record(raw: &Value) -> Result<NormalizedRecord, NormalizeError> {
    normalize_record_with(raw, AssociationMode::default())
}

/// Normalizes a raw record with an explicit [`AssociationMode`].
///
/// # Errors
///
/// Returns [`NormalizeError::Structural`] if the record is not an object or
/// if its `values` or `associations` field is mis-shaped.
pub fn normalize_record_with(
    raw: &Value,
    mode: AssociationMode,
) -> Result<NormalizedRecord, NormalizeError> {
    let fields = raw
        .as_object()
        .ok_or_else(|| NormalizeError::structural("record", "expected a JSON object"))?;

    let mut record = NormalizedRecord::new();
    for (key, value) in fields {
        match key.as_str() {
            ASSOCIATIONS_KEY => {
                let associations = parse_associations(value, mode)?;
                record.insert(ASSOCIATIONS_KEY, AttributeValue::Associations(associations));
            }
            VALUES_KEY => {
                for (attribute, value) in parse_values(value)? {
                    record.insert(attribute, value);
                }
            }
            k if k.starts_with(METADATA_PREFIX) => {}
            _ => record.insert(key.clone(), AttributeValue::Plain(value.clone())),
        }
    }

    Ok(record)
}

/// Flattens a raw `values` field.
///
/// `null` is treated as an empty field.
///
/// # Errors
///
/// Returns [`NormalizeError::Structural`] unless `values` maps attribute
/// names to lists of `{locale, scope, data}` objects.
pub fn parse_values(values: &Value) -> Result<BTreeMap<String, AttributeValue>, NormalizeError> {
    let mut parsed = BTreeMap::new();
    if values.is_null() {
        return Ok(parsed);
    }

    let attributes = values
        .as_object()
        .ok_or_else(|| NormalizeError::structural(VALUES_KEY, "expected a map of attributes"))?;

    for (attribute, variants) in attributes {
        let variants: Vec<RawVariant> = Vec::deserialize(variants).map_err(|e| {
            NormalizeError::structural(format!("{VALUES_KEY}.{attribute}"), e)
        })?;

        let value = match <[RawVariant; 1]>::try_from(variants) {
            Ok([only]) => AttributeValue::Plain(only.data),
            Err(variants) => {
                let mut locales = Map::new();
                for variant in variants {
                    locales.insert(variant.locale.unwrap_or_default(), variant.data);
                }
                AttributeValue::Localized(locales)
            }
        };

        parsed.insert(attribute.clone(), value);
    }

    Ok(parsed)
}

/// Parses a raw `associations` field.
///
/// `null` is treated as an empty field.
///
/// # Errors
///
/// Returns [`NormalizeError::Structural`] unless `associations` maps type
/// names to objects of identifier lists.
pub fn parse_associations(
    associations: &Value,
    mode: AssociationMode,
) -> Result<AssociationSet, NormalizeError> {
    let mut set = AssociationSet::new();
    if associations.is_null() {
        return Ok(set);
    }

    let types = associations.as_object().ok_or_else(|| {
        NormalizeError::structural(ASSOCIATIONS_KEY, "expected a map of association types")
    })?;

    for (association_type, links) in types {
        let links = AssociationLinks::deserialize(links).map_err(|e| {
            NormalizeError::structural(format!("{ASSOCIATIONS_KEY}.{association_type}"), e)
        })?;

        let links = match mode {
            AssociationMode::RetainEmpty => links,
            AssociationMode::PruneEmpty => links.pruned(),
        };
        set.insert(association_type.clone(), links);
    }

    Ok(set)
}
