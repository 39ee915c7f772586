//! Distance units.
//!
//! The reference unit is [`DistanceUnits::Metres`] (exponent `0`). Every other unit is a power-of-ten multiple, so
//! conversions within the category are pure integer scaling.

use unitconv_derive::UnitCategory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, UnitCategory)]
pub enum DistanceUnits {
    #[unit(abbreviation = "um", description = "micrometres", exponent = -6)]
    Micrometres,
    #[unit(abbreviation = "mm", description = "millimetres", exponent = -3)]
    Millimetres,
    #[unit(abbreviation = "cm", description = "centimetres", exponent = -2)]
    Centimetres,
    #[unit(abbreviation = "m", description = "metres", exponent = 0)]
    Metres,
    #[unit(abbreviation = "km", description = "kilometres", exponent = 3)]
    Kilometres,
}
