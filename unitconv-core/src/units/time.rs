//! Time units. The reference unit is [`TimeUnits::Seconds`].

use unitconv_derive::UnitCategory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, UnitCategory)]
pub enum TimeUnits {
    #[unit(abbreviation = "us", description = "microseconds", exponent = -6)]
    Microseconds,
    #[unit(abbreviation = "ms", description = "milliseconds", exponent = -3)]
    Milliseconds,
    #[unit(abbreviation = "s", description = "seconds", exponent = 0)]
    Seconds,
}
