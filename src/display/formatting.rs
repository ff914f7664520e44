// src/display/formatting.rs - Price and court name formatting

/// Formats a rupiah amount the Indonesian way: `Rp 150.000`.
///
/// # Examples
///
/// ```
/// use padel_slots::display::format_price;
///
/// assert_eq!(format_price(150000), "Rp 150.000");
/// assert_eq!(format_price(0), "Rp 0");
/// ```
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if price < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Normalizes a court name for display.
///
/// Names that are raw resource UUIDs become `Court XXXX` from the last UUID
/// group; anything not already starting with `Court` gets the prefix.
pub fn format_court_name(name: &str) -> String {
    if looks_like_uuid(name) {
        let chars: Vec<char> = name.chars().collect();
        let start = chars.len().saturating_sub(8);
        let end = chars.len().saturating_sub(4);
        let tag: String = chars[start..end].iter().collect();
        return format!("Court {}", tag.to_uppercase());
    }

    if name.starts_with("Court") {
        name.to_string()
    } else {
        format!("Court {name}")
    }
}

// 8 lowercase hex digits followed by a dash
fn looks_like_uuid(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 8
        && bytes[8] == b'-'
        && bytes[..8]
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
}
