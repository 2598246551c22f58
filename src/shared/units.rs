//! Conversions between human-readable decimal amounts and the exchange's
//! 1e18-scaled base units.
//!
//! All protocol quantities (price, quantity, leverage, margin) travel as
//! integers scaled by `10^18`. Humans think in decimals; `rust_decimal`
//! bridges the two without floating-point drift.

use rust_decimal::Decimal;
use thiserror::Error;

/// Scale of protocol base units.
pub const BASE_DECIMALS: u32 = 18;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    #[error("amount is negative: {0}")]
    Negative(Decimal),

    #[error("amount does not fit in u128 after scaling: {0}")]
    Overflow(Decimal),

    #[error("amount has more than {BASE_DECIMALS} fractional digits: {0}")]
    TooPrecise(Decimal),
}

/// Convert a decimal amount into 1e18 base units.
///
/// Fails on negative input, on more than 18 fractional digits, and on
/// overflow past `u128`.
pub fn to_base_units(amount: Decimal) -> Result<u128, UnitsError> {
    if amount.is_sign_negative() {
        return Err(UnitsError::Negative(amount));
    }
    if amount.scale() > BASE_DECIMALS {
        return Err(UnitsError::TooPrecise(amount));
    }

    // Shift the fractional digits away, then pad the remaining scale with
    // integer multiplication to avoid Decimal's 96-bit mantissa limit.
    let scale = amount.scale();
    let mantissa = amount.mantissa() as u128;
    let padding = BASE_DECIMALS - scale;
    let factor = 10u128
        .checked_pow(padding)
        .ok_or(UnitsError::Overflow(amount))?;
    mantissa
        .checked_mul(factor)
        .ok_or(UnitsError::Overflow(amount))
}

/// Convert 1e18 base units back into a decimal amount.
///
/// Lossy only when the value needs more than 28 significant digits, in which
/// case trailing precision is dropped (Decimal's limit).
pub fn from_base_units(units: u128) -> Decimal {
    let divisor = 10u128.pow(BASE_DECIMALS);
    let whole = units / divisor;
    let frac = units % divisor;
    let whole =
        Decimal::from_i128_with_scale(whole as i128, 0);
    let frac = Decimal::from_i128_with_scale(frac as i128, BASE_DECIMALS);
    (whole + frac).normalize()
}

/// Parse a decimal string (as the API sends) into base units.
pub fn parse_base_units(s: &str) -> Option<u128> {
    s.parse::<u128>().ok()
}
