//! Hand-written pairwise conversions.

use crate::error::{GenerationError, GenerationResult};
use crate::operation::Operation;
use crate::unit::UnitCategory;

/// A category converted through an explicit `(from, to)` table.
///
/// The table must cover every ordered pair, self-to-self included (normally the bare constant).
pub trait ConversionTable: UnitCategory {
    fn entry(&self, to: &Self) -> Option<Operation>;
}

pub fn convert<T: ConversionTable>(from: &T, to: &T) -> GenerationResult<Operation> {
    from.entry(to).ok_or_else(|| GenerationError::MissingConversion {
        category: T::CATEGORY.to_string(),
        from: from.abbreviation().to_string(),
        to: to.abbreviation().to_string(),
    })
}

/// Fails on the first ordered pair the table does not cover.
pub fn check_complete<T: ConversionTable>() -> GenerationResult<()> {
    for from in T::ALL {
        for to in T::ALL {
            convert(from, to)?;
        }
    }
    Ok(())
}
