//! Mass units. The reference unit is [`MassUnits::Grams`].

use unitconv_derive::UnitCategory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, UnitCategory)]
pub enum MassUnits {
    #[unit(abbreviation = "ug", description = "micrograms", exponent = -6)]
    Micrograms,
    #[unit(abbreviation = "mg", description = "milligrams", exponent = -3)]
    Milligrams,
    #[unit(abbreviation = "g", description = "grams", exponent = 0)]
    Grams,
    #[unit(abbreviation = "kg", description = "kilograms", exponent = 3)]
    Kilograms,
    #[unit(abbreviation = "t", description = "tonnes", exponent = 6)]
    Tonnes,
}
