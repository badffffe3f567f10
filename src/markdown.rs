//! Markdown summary document. Unlike the HTML fragment it lists failed
//! lookups too, so it doubles as the diagnostic artifact for a batch.

use crate::format::{format_price, product_rating};
use crate::models::ResultEntry;

pub const DOCUMENT_FILE_NAME: &str = "rakuten_summary.md";
pub const DOCUMENT_CONTENT_TYPE: &str = "text/markdown";

const DOCUMENT_TITLE: &str = "# 📦 楽天市場 商品比較まとめ";

pub fn render_markdown(entries: &[ResultEntry]) -> String {
    let mut doc = format!("{DOCUMENT_TITLE}\n\n");
    for (idx, entry) in entries.iter().enumerate() {
        let n = idx + 1;
        let block = match &entry.outcome {
            Ok(product) => format!(
                "## {n}. [{title}]({url})\n\
                 - 🏷️ 価格: {price}\n\
                 - ⭐ 評価: {rating}\n\
                 - ![商品画像]({image})\n\n",
                title = escape_link_text(&product.title),
                url = link_destination(&product.detail_url),
                price = format_price(&product.price),
                rating = product_rating(product),
                image = link_destination(&product.image_url),
            ),
            Err(error) => format!(
                "## {n}. 取得エラー\n\
                 - URL: {url}\n\
                 - ⚠️ エラー: {error}\n\n",
                url = entry.url,
            ),
        };
        doc.push_str(&block);
    }
    doc
}

/// Link targets with spaces or parentheses go in angle brackets, where
/// only `<` and `>` need encoding.
fn link_destination(url: &str) -> String {
    if url.contains([' ', '(', ')', '<', '>']) {
        format!("<{}>", url.replace('<', "%3C").replace('>', "%3E"))
    } else {
        url.to_owned()
    }
}

/// Brackets in a title would end the link text early.
fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
