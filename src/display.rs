use crate::format::{format_price, product_rating};
use crate::models::ResultEntry;

/// Terminal rendering of one entry, numbered from 1.
pub fn display_entry(index: usize, entry: &ResultEntry) -> String {
    match &entry.outcome {
        Ok(product) => format!(
            "{index}. {title}\n   🖼️ 画像: {image}\n   🏷️ 価格: {price}\n   ⭐ 評価: {rating}\n   🔗 商品リンク: {url}\n",
            title = product.title,
            image = product.image_url,
            price = format_price(&product.price),
            rating = product_rating(product),
            url = product.detail_url,
        ),
        Err(error) => format!("{index}. 取得エラー: {error}\n   URL: {}\n", entry.url),
    }
}
