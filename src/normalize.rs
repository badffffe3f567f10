//! Mapping of upstream items into [`ProductRecord`]s.

use crate::error::ResolutionError;
use crate::models::{ProductRecord, Reported};
use crate::types::ApiItem;

/// Converts an upstream item into a product record.
///
/// Title, detail URL and at least one image are required. Price and review
/// fields fall back to the "unknown" sentinel when absent.
///
/// # Errors
///
/// Returns [`ResolutionError::FieldMissing`] naming the first absent
/// required field.
pub fn normalize_item(item: ApiItem) -> Result<ProductRecord, ResolutionError> {
    let title = required(item.item_name, "itemName")?;
    let detail_url = required(item.item_url, "itemUrl")?;
    let image_url = required(
        item.medium_image_urls
            .into_iter()
            .map(|image| image.image_url)
            .find(|url| !url.trim().is_empty()),
        "mediumImageUrls",
    )?;

    Ok(ProductRecord {
        title,
        price: Reported::from(item.item_price),
        review_average: Reported::from(item.review_average),
        review_count: Reported::from(item.review_count),
        image_url,
        detail_url,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, ResolutionError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ResolutionError::FieldMissing(field.to_owned()))
}
