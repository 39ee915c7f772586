//! Numeric analysis used to choose a working type.

use super::Operation;
use crate::literal::Literal;

/// `gain * x ± offset` summary of a single-parameter integer-affine operation.
///
/// `gain` is the product of every integer multiplier; divisors are ignored because truncating division never
/// increases the magnitude. `offset` is the sum of every added or subtracted constant, scaled by the multipliers
/// that follow it. Both are bounds, not exact coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerProfile {
    pub gain: i128,
    pub offset: i128,
    /// Whether any constant is subtracted, i.e. the result can fall below the scaled input.
    pub subtracts: bool,
}

impl IntegerProfile {
    const IDENTITY: IntegerProfile = IntegerProfile {
        gain: 1,
        offset: 0,
        subtracts: false,
    };
}

enum Affine {
    Constant(i128),
    Parametric(IntegerProfile),
}

impl Operation {
    /// Whether evaluating the operation needs floating point.
    pub fn requires_float(&self) -> bool {
        match self {
            Operation::Constant { sign, .. } => sign.is_some_and(|sign| sign.is_float()),
            Operation::Literal(literal) => !literal.is_integer(),
            Operation::Exponentiate { .. } => true,
            Operation::Division(lhs, rhs) => {
                matches!(**lhs, Operation::Literal(Literal::Integer(_))) || lhs.requires_float() || rhs.requires_float()
            }
            Operation::Multiplication(lhs, rhs) | Operation::Addition(lhs, rhs) | Operation::Subtraction(lhs, rhs) => {
                lhs.requires_float() || rhs.requires_float()
            }
            Operation::Precedence(inner) => inner.requires_float(),
        }
    }

    /// Affine summary when the operation has exactly one unit leaf, appearing once, and only non-negative integer
    /// literals combined by `*`, `/` (by a positive literal), `+` and `-` (of a literal).
    pub fn integer_profile(&self) -> Option<IntegerProfile> {
        if self.units().len() != 1 {
            return None;
        }
        match self.affine()? {
            Affine::Parametric(profile) => Some(profile),
            Affine::Constant(_) => None,
        }
    }

    fn affine(&self) -> Option<Affine> {
        match self {
            Operation::Constant { sign, .. } => {
                if sign.is_some_and(|sign| sign.is_float()) {
                    None
                } else {
                    Some(Affine::Parametric(IntegerProfile::IDENTITY))
                }
            }
            Operation::Literal(Literal::Integer(value)) if *value >= 0 => Some(Affine::Constant(i128::from(*value))),
            Operation::Literal(_) => None,
            Operation::Precedence(inner) => inner.affine(),
            Operation::Exponentiate { .. } => None,
            Operation::Multiplication(lhs, rhs) => match (lhs.affine()?, rhs.affine()?) {
                (Affine::Constant(a), Affine::Constant(b)) => Some(Affine::Constant(a.checked_mul(b)?)),
                (Affine::Constant(k), Affine::Parametric(p)) | (Affine::Parametric(p), Affine::Constant(k)) => {
                    Some(Affine::Parametric(IntegerProfile {
                        gain: p.gain.checked_mul(k)?,
                        offset: p.offset.checked_mul(k)?,
                        ..p
                    }))
                }
                (Affine::Parametric(_), Affine::Parametric(_)) => None,
            },
            Operation::Division(lhs, rhs) => match (lhs.affine()?, rhs.affine()?) {
                (Affine::Parametric(p), Affine::Constant(k)) if k > 0 => Some(Affine::Parametric(p)),
                _ => None,
            },
            Operation::Addition(lhs, rhs) => match (lhs.affine()?, rhs.affine()?) {
                (Affine::Constant(a), Affine::Constant(b)) => Some(Affine::Constant(a.checked_add(b)?)),
                (Affine::Constant(k), Affine::Parametric(p)) | (Affine::Parametric(p), Affine::Constant(k)) => {
                    Some(Affine::Parametric(IntegerProfile {
                        offset: p.offset.checked_add(k)?,
                        ..p
                    }))
                }
                (Affine::Parametric(_), Affine::Parametric(_)) => None,
            },
            Operation::Subtraction(lhs, rhs) => match (lhs.affine()?, rhs.affine()?) {
                (Affine::Constant(a), Affine::Constant(b)) if a >= b => Some(Affine::Constant(a - b)),
                (Affine::Parametric(p), Affine::Constant(k)) => Some(Affine::Parametric(IntegerProfile {
                    offset: p.offset.checked_add(k)?,
                    subtracts: p.subtracts || k > 0,
                    ..p
                })),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::SignClass;
    use crate::units::{DistanceUnits, MassUnits, TemperatureUnits, TimeUnits};

    #[test]
    fn scaling_is_integer_affine() {
        let op = Operation::constant(DistanceUnits::Kilometres) * Operation::literal(1000);
        assert!(!op.requires_float());
        assert_eq!(
            op.integer_profile(),
            Some(IntegerProfile {
                gain: 1000,
                offset: 0,
                subtracts: false
            })
        );

        let op = Operation::constant(MassUnits::Milligrams) / Operation::literal(1_000_000);
        assert_eq!(op.integer_profile(), Some(IntegerProfile::IDENTITY));
    }

    #[test]
    fn celsius_to_fahrenheit_profile() {
        let c = Operation::constant(TemperatureUnits::Celsius);
        let op = c * Operation::literal(9) / Operation::literal(5) + Operation::literal(32);
        assert!(!op.requires_float());
        assert_eq!(
            op.integer_profile(),
            Some(IntegerProfile {
                gain: 9,
                offset: 32,
                subtracts: false
            })
        );
    }

    #[test]
    fn subtraction_is_flagged() {
        let f = Operation::constant(TemperatureUnits::Fahrenheit);
        let op = (f - Operation::literal(32)) * Operation::literal(5) / Operation::literal(9);
        let profile = op.integer_profile().expect("affine");
        assert!(profile.subtracts);
        assert_eq!(profile.gain, 5);
        assert_eq!(profile.offset, 160);
    }

    #[test]
    fn float_shapes_have_no_profile() {
        let k = Operation::constant(TemperatureUnits::Kelvin);
        let op = k - Operation::decimal(273.15);
        assert!(op.requires_float());
        assert_eq!(op.integer_profile(), None);

        let s = Operation::constant(TimeUnits::Seconds);
        assert!(s.clone().pow(2).requires_float());
        assert!((Operation::one() / s.clone()).requires_float());
        assert_eq!((Operation::one() / s.clone()).integer_profile(), None);
        assert_eq!((s.clone() * s.clone()).integer_profile(), None);
        assert!(Operation::bound_constant(TimeUnits::Seconds, SignClass::Double).requires_float());
    }
}
