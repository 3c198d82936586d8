//! Field constraints enforced before an item reaches storage.

use crate::{
    entities::item::{self, PRICE_DECIMAL_PLACES, PRICE_MAX_DIGITS},
    errors::ServiceError,
};
use rust_decimal::Decimal;
use validator::Validate;

/// Checks every field of `model` and returns it with the price rescaled to
/// the stored precision.
///
/// Length violations are reported before price violations.
pub fn validate_item(mut model: item::Model) -> Result<item::Model, ServiceError> {
    model.validate()?;
    model.price = check_price(model.price)?;
    Ok(model)
}

/// Verifies that `price` fits a `decimal(6, 2)` column.
///
/// The value is normalized first, so trailing fractional zeros never count
/// against the budget. On success the price is returned with exactly two
/// decimal places.
pub fn check_price(price: Decimal) -> Result<Decimal, ServiceError> {
    let normalized = price.normalize();
    let (digits, decimals) = digit_counts(&normalized);
    let whole_digits = digits - decimals;
    let max_whole_digits = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;

    if decimals > PRICE_DECIMAL_PLACES {
        return Err(ServiceError::RangeError(format!(
            "price {} has more than {} decimal places",
            price, PRICE_DECIMAL_PLACES
        )));
    }
    if whole_digits > max_whole_digits {
        return Err(ServiceError::RangeError(format!(
            "price {} has more than {} digits before the decimal point",
            price, max_whole_digits
        )));
    }
    if digits > PRICE_MAX_DIGITS {
        return Err(ServiceError::RangeError(format!(
            "price {} has more than {} digits in total",
            price, PRICE_MAX_DIGITS
        )));
    }

    let mut stored = normalized;
    stored.rescale(PRICE_DECIMAL_PLACES);
    Ok(stored)
}

/// Returns `(total digits, digits after the point)` for a normalized value.
///
/// Leading zeros are not significant: `0.05` counts as two digits, both
/// fractional, and zero itself has no digits at all.
fn digit_counts(value: &Decimal) -> (u32, u32) {
    let scale = value.scale();
    let mantissa_digits = value
        .mantissa()
        .unsigned_abs()
        .checked_ilog10()
        .map_or(0, |d| d + 1);

    if mantissa_digits == 0 {
        (0, 0)
    } else if mantissa_digits < scale {
        (scale, scale)
    } else {
        (mantissa_digits, scale)
    }
}
