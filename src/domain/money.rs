//! Integer-cent arithmetic shared by order, sale and receipt totals.
//!
//! Forms bound quantities and prices, so these never saturate for accepted
//! input. Saturating keeps stored rows from panicking or wrapping if they
//! were written by something else.

/// `quantity × unit price`, saturating at the `i64` bounds.
pub fn line_cents(quantity: i32, unit_price_cents: i64) -> i64 {
    i64::from(quantity).saturating_mul(unit_price_cents)
}

/// Sum of line amounts, saturating at the `i64` bounds.
pub fn sum_cents<I>(amounts: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    amounts.into_iter().fold(0, i64::saturating_add)
}
