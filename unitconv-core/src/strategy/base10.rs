//! Power-of-ten scaling.
//!
//! Each unit carries an exponent relative to the category's reference unit. Converting multiplies or divides by
//! `10^|gap|` as an integer literal, so a gap of nine orders of magnitude stays an exact `1000000000` rather than
//! an accumulated floating factor.

use core::cmp::Ordering;

use crate::error::{GenerationError, GenerationResult};
use crate::operation::Operation;
use crate::unit::UnitCategory;

/// A category whose units differ by powers of ten. Implemented by `#[derive(UnitCategory)]` when every variant
/// declares an `exponent`.
pub trait Base10: UnitCategory {
    fn exponent(&self) -> i32;
}

/// Scaling operation from `from` to `to`.
pub fn convert<T: Base10>(from: &T, to: &T) -> GenerationResult<Operation> {
    let value = Operation::constant(*from);
    if from == to {
        return Ok(value);
    }

    let exponent = to.exponent() - from.exponent();
    let factor = Operation::literal(scale(T::CATEGORY, exponent)?);
    Ok(match exponent.cmp(&0) {
        Ordering::Less => value * factor,
        Ordering::Greater => value / factor,
        Ordering::Equal => value,
    })
}

/// `10^|exponent|`, failing when it does not fit an `i64` literal.
pub fn scale(category: &str, exponent: i32) -> GenerationResult<i64> {
    let magnitude = exponent.unsigned_abs();
    10i64
        .checked_pow(magnitude)
        .ok_or_else(|| GenerationError::ScaleOverflow {
            category: category.to_string(),
            exponent: magnitude,
        })
}

/// Checks that every gap between two units of `T` is encodable.
pub fn check_gaps<T: Base10>() -> GenerationResult<()> {
    let exponents = T::ALL.iter().map(Base10::exponent);
    let (min, max) = exponents.fold((i32::MAX, i32::MIN), |(min, max), e| (min.min(e), max.max(e)));
    if min <= max {
        scale(T::CATEGORY, max - min)?;
    }
    Ok(())
}
