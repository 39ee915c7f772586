//! Plane angles.

use core::f64::consts::PI;

use unitconv_derive::UnitCategory;

use crate::strategy::{table, ConversionTable};
use crate::{GenerationResult, Operation, UnitsConvertible};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, UnitCategory)]
pub enum AngleUnits {
    #[unit(abbreviation = "deg", description = "degrees")]
    Degrees,
    #[unit(abbreviation = "rad", description = "radians")]
    Radians,
}

impl ConversionTable for AngleUnits {
    fn entry(&self, to: &Self) -> Option<Operation> {
        let value = Operation::constant(*self);
        Some(match (self, to) {
            (AngleUnits::Degrees, AngleUnits::Radians) => {
                value * Operation::decimal(PI) / Operation::literal(180)
            }
            (AngleUnits::Radians, AngleUnits::Degrees) => {
                value * Operation::literal(180) / Operation::decimal(PI)
            }
            _ => value,
        })
    }
}

impl UnitsConvertible for AngleUnits {
    fn conversion(&self, to: &Self) -> GenerationResult<Operation> {
        table::convert(self, to)
    }
}
