use crate::data_fetcher::models::RawPrice;

/// Normalizes an upstream price into whole rupiah.
///
/// Numbers are rounded; strings keep only their ASCII digits, so `"150.000"`
/// and `"Rp 150,000"` both become `150000`. Anything unparseable is `0`.
pub fn normalize_price(price: &RawPrice) -> i64 {
    match price {
        RawPrice::Number(value) if value.is_finite() => value.round() as i64,
        RawPrice::Number(_) => 0,
        RawPrice::Text(text) => parse_price_text(text),
    }
}

pub fn parse_price_text(text: &str) -> i64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
