//! Presentation rounding. Sums are always exact; these are applied once at
//! the boundary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Scale of every CO2 mass (kg).
pub const MASS_SCALE: u32 = 4;
/// Scale of percentages and scores.
pub const PERCENT_SCALE: u32 = 2;

/// Rounds half away from zero and pins the scale, so `231` renders as `231.0000`.
pub fn round_to(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

pub fn round_mass(value: Decimal) -> Decimal {
    round_to(value, MASS_SCALE)
}

pub fn round_percent(value: Decimal) -> Decimal {
    round_to(value, PERCENT_SCALE)
}

/// `part / whole * 100` with two decimals, 0 when `whole` is 0.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return round_percent(Decimal::ZERO);
    }
    round_percent(part / whole * Decimal::ONE_HUNDRED)
}
