//! Unit capabilities and the closed [`AnyUnit`] sum type.
//!
//! A leaf category is a fieldless enum deriving [`UnitCategory`]. Its conversions come from [`UnitsConvertible`],
//! implemented either by the derive (base-10 categories) or by hand over an explicit table.
//!
//! [`AnyUnit`] erases the concrete category. Since the set of leaf categories is fixed, it is a plain enum with one
//! variant per category plus [`AnyUnit::Composite`]; matching on the discriminant recovers the concrete type.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::composite::CompositeUnit;
use crate::error::{GenerationError, GenerationResult};
use crate::operation::Operation;
use crate::units::{
    AngleUnits, DistanceUnits, MassUnits, ReferenceAccelerationUnits, TemperatureUnits, TimeUnits,
};

/// Metadata shared by every unit of a leaf category.
pub trait UnitCategory: Copy + Eq + fmt::Debug + Into<AnyUnit> + 'static {
    /// Snake-case name derived from the type name (`DistanceUnits` → `distance`).
    const CATEGORY: &'static str;
    /// Every unit, in declaration order.
    const ALL: &'static [Self];
    /// `false` when the units disagree on where zero lies (temperature scales).
    const SAME_ZERO_POINT: bool;
    /// The finest unit, used as the category's representative.
    const HIGHEST_PRECISION: Self;

    fn abbreviation(&self) -> &'static str;
    fn description(&self) -> &'static str;
}

/// Same-category conversion.
pub trait UnitsConvertible: Sized {
    /// The operation re-expressing a value in `self` as a value in `to`. Leaves of the result refer to `self`.
    fn conversion(&self, to: &Self) -> GenerationResult<Operation>;
}

/// Any unit of any category.
///
/// Equality and hashing only look at `(abbreviation, description, category, same_zero_point)`, so two values
/// describing the same unit compare equal even when they come from different variants.
#[derive(Clone, Debug)]
pub enum AnyUnit {
    Distance(DistanceUnits),
    Time(TimeUnits),
    Mass(MassUnits),
    Temperature(TemperatureUnits),
    Angle(AngleUnits),
    ReferenceAcceleration(ReferenceAccelerationUnits),
    Composite(Box<CompositeUnit>),
}

macro_rules! impl_any_unit_conversions {
    ($($variant:ident => $unit:ty),+ $(,)?) => {
        $(
            impl From<$unit> for AnyUnit {
                fn from(unit: $unit) -> Self {
                    AnyUnit::$variant(unit)
                }
            }
        )+
    };
}

impl_any_unit_conversions!(
    Distance => DistanceUnits,
    Time => TimeUnits,
    Mass => MassUnits,
    Temperature => TemperatureUnits,
    Angle => AngleUnits,
    ReferenceAcceleration => ReferenceAccelerationUnits,
);

impl From<CompositeUnit> for AnyUnit {
    fn from(unit: CompositeUnit) -> Self {
        AnyUnit::Composite(Box::new(unit))
    }
}

/// Runs `$leaf` with `$unit` bound to the concrete leaf unit, or `$composite` with the composite unit.
macro_rules! dispatch {
    ($value:expr, $unit:ident => $leaf:expr, $composite:ident => $on_composite:expr) => {
        match $value {
            AnyUnit::Distance($unit) => $leaf,
            AnyUnit::Time($unit) => $leaf,
            AnyUnit::Mass($unit) => $leaf,
            AnyUnit::Temperature($unit) => $leaf,
            AnyUnit::Angle($unit) => $leaf,
            AnyUnit::ReferenceAcceleration($unit) => $leaf,
            AnyUnit::Composite($composite) => $on_composite,
        }
    };
}

fn category_of<T: UnitCategory>(_: &T) -> &'static str {
    T::CATEGORY
}

fn same_zero_point_of<T: UnitCategory>(_: &T) -> bool {
    T::SAME_ZERO_POINT
}

fn cases_of<T: UnitCategory>(_: &T) -> Vec<AnyUnit> {
    T::ALL.iter().map(|unit| (*unit).into()).collect()
}

fn highest_precision_of<T: UnitCategory>(_: &T) -> AnyUnit {
    T::HIGHEST_PRECISION.into()
}

impl AnyUnit {
    pub fn category(&self) -> &str {
        dispatch!(self, unit => category_of(unit), composite => composite.category_name())
    }

    pub fn abbreviation(&self) -> String {
        dispatch!(self, unit => unit.abbreviation().to_string(), composite => composite.abbreviation())
    }

    pub fn description(&self) -> String {
        dispatch!(self, unit => unit.description().to_string(), composite => composite.description())
    }

    pub fn same_zero_point(&self) -> bool {
        dispatch!(self, unit => same_zero_point_of(unit), composite => composite.same_zero_point())
    }

    /// Every unit of this unit's category.
    pub fn all_cases(&self) -> Vec<AnyUnit> {
        dispatch!(self, unit => cases_of(unit), composite => {
            composite.all_cases().into_iter().map(AnyUnit::from).collect()
        })
    }

    pub fn highest_precision(&self) -> AnyUnit {
        dispatch!(self, unit => highest_precision_of(unit), composite => composite.highest_precision().into())
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, AnyUnit::Composite(_))
    }

    /// The operation re-expressing a value in `self` as a value in `to`.
    ///
    /// Both units must belong to the same category.
    pub fn conversion_to(&self, to: &AnyUnit) -> GenerationResult<Operation> {
        match (self, to) {
            (AnyUnit::Distance(from), AnyUnit::Distance(to)) => from.conversion(to),
            (AnyUnit::Time(from), AnyUnit::Time(to)) => from.conversion(to),
            (AnyUnit::Mass(from), AnyUnit::Mass(to)) => from.conversion(to),
            (AnyUnit::Temperature(from), AnyUnit::Temperature(to)) => from.conversion(to),
            (AnyUnit::Angle(from), AnyUnit::Angle(to)) => from.conversion(to),
            (AnyUnit::ReferenceAcceleration(from), AnyUnit::ReferenceAcceleration(to)) => from.conversion(to),
            (AnyUnit::Composite(from), AnyUnit::Composite(to)) if from.category_name() == to.category_name() => {
                from.conversion(to)
            }
            _ => Err(self.mismatch(to)),
        }
    }

    /// The operation re-expressing a value in `from` as a value in `self`.
    pub fn conversion_from(&self, from: &AnyUnit) -> GenerationResult<Operation> {
        if self.category() != from.category() {
            return Err(self.mismatch(from));
        }
        from.conversion_to(self)
    }

    fn mismatch(&self, other: &AnyUnit) -> GenerationError {
        GenerationError::CategoryMismatch {
            expected: self.category().to_string(),
            found: other.category().to_string(),
            unit: other.abbreviation(),
        }
    }
}

impl PartialEq for AnyUnit {
    fn eq(&self, other: &Self) -> bool {
        self.category() == other.category()
            && self.abbreviation() == other.abbreviation()
            && self.description() == other.description()
            && self.same_zero_point() == other.same_zero_point()
    }
}

impl Eq for AnyUnit {}

impl Hash for AnyUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.abbreviation().hash(state);
        self.description().hash(state);
        self.category().hash(state);
        self.same_zero_point().hash(state);
    }
}

impl fmt::Display for AnyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{self, DistanceUnits, TemperatureUnits, TimeUnits};
    use std::collections::HashSet;

    #[test]
    fn metadata_accessors() {
        let mm = AnyUnit::from(DistanceUnits::Millimetres);
        assert_eq!(mm.category(), "distance");
        assert_eq!(mm.abbreviation(), "mm");
        assert_eq!(mm.description(), "millimetres");
        assert!(mm.same_zero_point());
        assert_eq!(mm.all_cases().len(), 5);
        assert_eq!(mm.highest_precision(), AnyUnit::from(DistanceUnits::Micrometres));

        let celsius = AnyUnit::from(TemperatureUnits::Celsius);
        assert!(!celsius.same_zero_point());
        assert_eq!(celsius.category(), "temperature");
    }

    #[test]
    fn conversions_dispatch_to_the_concrete_category() {
        let mm = AnyUnit::from(DistanceUnits::Millimetres);
        let cm = AnyUnit::from(DistanceUnits::Centimetres);
        let op = mm.conversion_to(&cm).unwrap();
        assert_eq!(op.evaluate(250.0), 25.0);
        assert_eq!(cm.conversion_from(&mm).unwrap(), op);
    }

    #[test]
    fn cross_category_conversion_is_rejected() {
        let mm = AnyUnit::from(DistanceUnits::Millimetres);
        let s = AnyUnit::from(TimeUnits::Seconds);
        assert_eq!(
            mm.conversion_to(&s),
            Err(GenerationError::CategoryMismatch {
                expected: "distance".to_string(),
                found: "time".to_string(),
                unit: "s".to_string(),
            })
        );
        assert!(s.conversion_from(&mm).is_err());
    }

    #[test]
    fn composite_units_compare_structurally() {
        let velocity = units::velocity();
        let a = AnyUnit::from(velocity.highest_precision());
        let b = AnyUnit::from(velocity.highest_precision());
        assert_eq!(a, b);
        assert_eq!(a.category(), "velocity");

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&AnyUnit::from(DistanceUnits::Metres)));
    }
}
