//! Wire types for the Ichiba item search API (`format=json`, format version 1).

use serde::Deserialize;

/// Top-level search response. A missing or empty `Items` array means the
/// query matched nothing.
#[derive(Debug, Deserialize)]
pub struct ItemSearchResponse {
    #[serde(rename = "Items", default)]
    pub items: Option<Vec<ItemEnvelope>>,
}

impl ItemSearchResponse {
    pub fn into_first_item(self) -> Option<ApiItem> {
        self.items?.into_iter().next().map(|envelope| envelope.item)
    }
}

#[derive(Debug, Deserialize)]
pub struct ItemEnvelope {
    #[serde(rename = "Item")]
    pub item: ApiItem,
}

/// One item as returned upstream. Everything is optional here; which fields
/// are actually required is decided during normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiItem {
    pub item_name: Option<String>,
    pub item_price: Option<u64>,
    pub review_average: Option<f64>,
    pub review_count: Option<u64>,
    #[serde(default)]
    pub medium_image_urls: Vec<ImageUrl>,
    pub item_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrl {
    pub image_url: String,
}

/// Error body the API sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_item() {
        let body = serde_json::json!({
            "count": 1,
            "Items": [{
                "Item": {
                    "itemName": "Widget",
                    "itemPrice": 2500,
                    "reviewAverage": 4.5,
                    "reviewCount": 10,
                    "mediumImageUrls": [{ "imageUrl": "https://thumbnail.image.test/a.jpg" }],
                    "itemUrl": "https://item.rakuten.co.jp/shopA/item123/"
                }
            }]
        });
        let response: ItemSearchResponse = serde_json::from_value(body).unwrap();
        let item = response.into_first_item().unwrap();
        assert_eq!(item.item_name.as_deref(), Some("Widget"));
        assert_eq!(item.item_price, Some(2500));
        assert_eq!(item.medium_image_urls.len(), 1);
    }

    #[test]
    fn missing_or_empty_items_yield_nothing() {
        let missing: ItemSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(missing.into_first_item().is_none());

        let empty: ItemSearchResponse = serde_json::from_str(r#"{"Items": []}"#).unwrap();
        assert!(empty.into_first_item().is_none());

        let null: ItemSearchResponse = serde_json::from_str(r#"{"Items": null}"#).unwrap();
        assert!(null.into_first_item().is_none());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let body = r#"{"Items": [{"Item": {"itemName": "Bare", "itemUrl": "https://x.test/"}}]}"#;
        let item = serde_json::from_str::<ItemSearchResponse>(body)
            .unwrap()
            .into_first_item()
            .unwrap();
        assert!(item.item_price.is_none());
        assert!(item.review_average.is_none());
        assert!(item.medium_image_urls.is_empty());
    }
}
