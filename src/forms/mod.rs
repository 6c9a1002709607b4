//! Request payloads accepted by the JSON API together with the validation
//! and sanitization that turns them into domain values.

pub mod categories;
pub mod customers;
pub mod inventory;
pub mod locations;
pub mod menus;
pub mod products;
pub mod purchase_orders;
pub mod receipts;
pub mod sales;
pub mod stock_receipts;
pub mod suppliers;
pub mod transactions;

/// Largest quantity accepted on one line, record or menu item.
pub(crate) const QUANTITY_MAX: i32 = 1_000_000;
/// Largest unit price accepted, in cents.
pub(crate) const PRICE_MAX_CENTS: i64 = 1_000_000_000;
/// Most lines accepted on one order, sale or receipt.
pub(crate) const LINES_MAX_VALIDATOR: u64 = 500;

/// Collapse runs of whitespace into single spaces and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize every line, trim blank lines at both ends and keep at most one
/// blank line between paragraphs.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() && matches!(result.last(), Some(previous) if previous.is_empty()) {
            continue;
        }
        result.push(line);
    }

    result.join("\n")
}

/// Sanitized optional text, `None` when nothing is left.
pub(crate) fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

/// Parse a decimal amount such as `12`, `12.5` or `12.50` into integer cents.
///
/// Negative amounts, more than two fractional digits and amounts above
/// [`PRICE_MAX_CENTS`] are rejected.
pub(crate) fn parse_price_cents(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2 || !whole.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    if !fraction.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    whole
        .checked_mul(100)?
        .checked_add(fraction)
        .filter(|cents| *cents <= PRICE_MAX_CENTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  Fresh \t  Milk\u{7} "), "Fresh Milk");
    }

    #[test]
    fn multiline_text_keeps_single_blank_lines() {
        assert_eq!(
            sanitize_multiline_text("\n  First \n\n\n Second  \n\n"),
            "First\n\nSecond"
        );
    }

    #[test]
    fn prices_parse_to_cents() {
        assert_eq!(parse_price_cents("12"), Some(1200));
        assert_eq!(parse_price_cents(" 12.5 "), Some(1250));
        assert_eq!(parse_price_cents("0.07"), Some(7));
        assert_eq!(parse_price_cents(".99"), Some(99));
    }

    #[test]
    fn prices_above_the_ceiling_are_rejected() {
        assert_eq!(parse_price_cents("10000000"), Some(PRICE_MAX_CENTS));
        assert_eq!(parse_price_cents("10000000.01"), None);
        assert_eq!(parse_price_cents("99999999999999999999"), None);
    }

    #[test]
    fn malformed_prices_are_rejected() {
        assert_eq!(parse_price_cents(""), None);
        assert_eq!(parse_price_cents("-1"), None);
        assert_eq!(parse_price_cents("1.999"), None);
        assert_eq!(parse_price_cents("abc"), None);
        assert_eq!(parse_price_cents("."), None);
    }
}
