//! Shared price and rating formatting for every renderer.

use crate::models::{ProductRecord, Reported};

pub const CURRENCY_PREFIX: &str = "¥";

/// `¥2,500` for known prices; the sentinel text otherwise.
pub fn format_price(price: &Reported<u64>) -> String {
    match price.known() {
        Some(yen) => format!("{CURRENCY_PREFIX}{}", group_thousands(*yen)),
        None => price.to_string(),
    }
}

/// `4.5 / 5.0（10件）`.
pub fn format_rating(average: &Reported<f64>, count: &Reported<u64>) -> String {
    let average = average
        .known()
        .map_or_else(|| average.to_string(), |avg| format_average(*avg));
    format!("{average} / 5.0（{count}件）")
}

pub fn product_rating(product: &ProductRecord) -> String {
    format_rating(&product.review_average, &product.review_count)
}

fn format_average(avg: f64) -> String {
    if avg.fract() == 0.0 {
        format!("{avg:.1}")
    } else {
        avg.to_string()
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
