use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ResolutionError;

/// Placeholder used when the upstream service omits an optional field.
pub const UNKNOWN: &str = "不明";

/// Delimiter joining shop and item identifiers into an item code.
pub const ITEM_CODE_DELIMITER: char = ':';

/// Shop/item identifier pair pulled out of a marketplace product URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdentifier {
    pub shop_id: String,
    pub item_id: String,
}

impl ItemIdentifier {
    /// The `shop:item` key the item-code lookup endpoint expects.
    pub fn item_code(&self) -> String {
        format!("{}{ITEM_CODE_DELIMITER}{}", self.shop_id, self.item_id)
    }
}

/// A value the upstream service may or may not have reported.
///
/// Serializes as the bare number when known and as the sentinel text
/// otherwise, so archived sessions keep the `number | string` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reported<T> {
    Known(T),
    Unknown(String),
}

impl<T> Reported<T> {
    pub fn unknown() -> Self {
        Reported::Unknown(UNKNOWN.to_owned())
    }

    pub fn known(&self) -> Option<&T> {
        match self {
            Reported::Known(value) => Some(value),
            Reported::Unknown(_) => None,
        }
    }
}

impl<T> From<Option<T>> for Reported<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Reported::unknown, Reported::Known)
    }
}

impl<T: fmt::Display> fmt::Display for Reported<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reported::Known(value) => fmt::Display::fmt(value, f),
            Reported::Unknown(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub price: Reported<u64>,
    pub review_average: Reported<f64>,
    pub review_count: Reported<u64>,
    pub image_url: String,
    pub detail_url: String,
}

/// Outcome of resolving one input URL. A batch yields one entry per input,
/// in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub url: String,
    pub outcome: Result<ProductRecord, ResolutionError>,
}

impl ResultEntry {
    pub fn product(&self) -> Option<&ProductRecord> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ResolutionError> {
        self.outcome.as_ref().err()
    }
}
