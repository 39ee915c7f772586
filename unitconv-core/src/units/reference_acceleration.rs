//! Accelerations expressed relative to a reference body rather than in SI terms.
//!
//! These only reach the SI acceleration units through relations, see [`crate::units::relations`].

use unitconv_derive::UnitCategory;

use crate::strategy::{table, ConversionTable};
use crate::{GenerationResult, Operation, UnitsConvertible};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, UnitCategory)]
pub enum ReferenceAccelerationUnits {
    #[unit(abbreviation = "earthG", description = "earth gravity")]
    EarthG,
}

/// Standard gravity in metres per second squared.
pub const STANDARD_GRAVITY: f64 = 9.80665;

impl ConversionTable for ReferenceAccelerationUnits {
    fn entry(&self, to: &Self) -> Option<Operation> {
        match (self, to) {
            (ReferenceAccelerationUnits::EarthG, ReferenceAccelerationUnits::EarthG) => {
                Some(Operation::constant(*self))
            }
        }
    }
}

impl UnitsConvertible for ReferenceAccelerationUnits {
    fn conversion(&self, to: &Self) -> GenerationResult<Operation> {
        table::convert(self, to)
    }
}
