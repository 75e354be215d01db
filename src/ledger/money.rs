//! Fixed-point currency helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency amounts carry two decimal places.
pub const CENTS_SCALE: u32 = 2;

/// Largest accepted bill amount: twelve integer digits. Leaves enough
/// mantissa for two decimal places and for summing many bills.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Round to cents, half away from zero, always keeping two decimal places.
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENTS_SCALE);
    rounded
}

/// Equal share of `amount` across `parts` people, rounded to cents.
///
/// Returns `None` for zero parts. The shares are not reconciled with the
/// total: `10.00 / 3` gives `3.33` each, a cent short overall.
pub fn equal_share(amount: Decimal, parts: usize) -> Option<Decimal> {
    if parts == 0 {
        return None;
    }
    Some(round2(amount / Decimal::from(parts as u64)))
}
