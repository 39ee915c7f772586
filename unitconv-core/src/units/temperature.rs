//! Temperature scales.
//!
//! The scales disagree on where zero lies, so conversions are affine and come from an explicit table. Temperature
//! can therefore not appear in a composite category.

use unitconv_derive::UnitCategory;

use crate::strategy::{table, ConversionTable};
use crate::{GenerationResult, Operation, UnitsConvertible};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, UnitCategory)]
#[category(same_zero_point = false, highest_precision = Fahrenheit)]
pub enum TemperatureUnits {
    #[unit(abbreviation = "celsius", description = "degrees celsius")]
    Celsius,
    #[unit(abbreviation = "fahrenheit", description = "degrees fahrenheit")]
    Fahrenheit,
    #[unit(abbreviation = "kelvin", description = "kelvin")]
    Kelvin,
}

const KELVIN_OFFSET: f64 = 273.15;

fn celsius_to_fahrenheit(celsius: Operation) -> Operation {
    celsius * Operation::literal(9) / Operation::literal(5) + Operation::literal(32)
}

fn fahrenheit_to_celsius(fahrenheit: Operation) -> Operation {
    (fahrenheit - Operation::literal(32)) * Operation::literal(5) / Operation::literal(9)
}

impl ConversionTable for TemperatureUnits {
    fn entry(&self, to: &Self) -> Option<Operation> {
        use TemperatureUnits::*;

        let value = Operation::constant(*self);
        Some(match (self, to) {
            (Celsius, Celsius) | (Fahrenheit, Fahrenheit) | (Kelvin, Kelvin) => value,
            (Celsius, Fahrenheit) => celsius_to_fahrenheit(value),
            (Fahrenheit, Celsius) => fahrenheit_to_celsius(value),
            (Celsius, Kelvin) => value + Operation::decimal(KELVIN_OFFSET),
            (Kelvin, Celsius) => value - Operation::decimal(KELVIN_OFFSET),
            (Fahrenheit, Kelvin) => fahrenheit_to_celsius(value) + Operation::decimal(KELVIN_OFFSET),
            (Kelvin, Fahrenheit) => celsius_to_fahrenheit((value - Operation::decimal(KELVIN_OFFSET)).grouped()),
        })
    }
}

impl UnitsConvertible for TemperatureUnits {
    fn conversion(&self, to: &Self) -> GenerationResult<Operation> {
        table::convert(self, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn convert(from: TemperatureUnits, to: TemperatureUnits, value: f64) -> f64 {
        from.conversion(&to).unwrap().simplify().evaluate(value)
    }

    #[test]
    fn celsius_to_fahrenheit_scenarios() {
        assert_relative_eq!(convert(TemperatureUnits::Celsius, TemperatureUnits::Fahrenheit, 0.0), 32.0);
        assert_relative_eq!(convert(TemperatureUnits::Celsius, TemperatureUnits::Fahrenheit, 100.0), 212.0);
    }

    #[test]
    fn kelvin_to_celsius_scenario() {
        assert_relative_eq!(convert(TemperatureUnits::Kelvin, TemperatureUnits::Celsius, 273.15), 0.0);
    }

    #[test]
    fn fahrenheit_and_kelvin() {
        assert_relative_eq!(convert(TemperatureUnits::Fahrenheit, TemperatureUnits::Kelvin, 32.0), 273.15);
        assert_relative_eq!(
            convert(TemperatureUnits::Kelvin, TemperatureUnits::Fahrenheit, 373.15),
            212.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(convert(TemperatureUnits::Fahrenheit, TemperatureUnits::Celsius, 212.0), 100.0);
    }

    #[test]
    fn integer_shapes_stay_integral() {
        let op = TemperatureUnits::Celsius.conversion(&TemperatureUnits::Fahrenheit).unwrap();
        assert!(!op.requires_float());
        let op = TemperatureUnits::Celsius.conversion(&TemperatureUnits::Kelvin).unwrap();
        assert!(op.requires_float());
    }
}
