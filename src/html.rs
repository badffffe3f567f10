//! HTML fragment for pasting into a blog post.
//!
//! Only resolved products are rendered; failed entries are left out because
//! the fragment is meant for publication. The Markdown document is where
//! failures show up.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::format::{format_price, product_rating};
use crate::models::{ProductRecord, ResultEntry};

const FRAGMENT_HEADING: &str = "<h2>楽天商品比較まとめ</h2>\n";
const CALL_TO_ACTION: &str = "▶ 今すぐチェック";

pub fn render_html(entries: &[ResultEntry]) -> String {
    let mut html = FRAGMENT_HEADING.to_owned();
    for product in entries.iter().filter_map(ResultEntry::product) {
        push_card(&mut html, product);
    }
    html
}

fn push_card(html: &mut String, product: &ProductRecord) {
    let title = encode_text(&product.title);
    let alt = encode_double_quoted_attribute(&product.title);
    let url = encode_double_quoted_attribute(&product.detail_url);
    let image = encode_double_quoted_attribute(&product.image_url);
    let price = format_price(&product.price);
    let price = encode_text(&price);
    let rating = product_rating(product);
    let rating = encode_text(&rating);

    html.push_str(&format!(
        r##"<div style="border: 1px solid #ccc; border-radius: 12px; padding: 16px; margin-bottom: 24px; display: flex; gap: 16px;">
  <img src="{image}" alt="{alt}" style="width: 150px; height: auto; border-radius: 8px;" />
  <div style="flex: 1;">
    <h3 style="margin-top: 0;">
      <a href="{url}" target="_blank" rel="noopener" style="text-decoration: none; color: #0074c2;">{title}</a>
    </h3>
    <p style="margin: 4px 0;">💴 <strong>{price}</strong></p>
    <p style="margin: 4px 0;">⭐ {rating}</p>
    <a href="{url}" target="_blank" rel="noopener" style="display: inline-block; margin-top: 8px; padding: 8px 16px; background-color: #ff6600; color: white; text-decoration: none; border-radius: 6px;">{CALL_TO_ACTION}</a>
  </div>
</div>
"##
    ));
}
