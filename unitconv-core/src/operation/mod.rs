//! The conversion-expression tree.
//!
//! An [`Operation`] describes how a target quantity is computed from source quantities (unit leaves) and literal
//! constants. Trees are immutable values compared structurally; they are built once per generation run and never
//! mutated.
//!
//! The tree doubles as the input of both code back ends, so grouping is explicit: [`Operation::Precedence`] is the
//! only node that emits parentheses. The arithmetic operators implemented for `Operation` insert it wherever C
//! operator precedence would otherwise change the meaning.
//!
//! ```rust
//! use unitconv_core::units::{DistanceUnits, TimeUnits};
//! use unitconv_core::Operation;
//!
//! let acceleration = Operation::constant(DistanceUnits::Metres) / Operation::constant(TimeUnits::Seconds).pow(2);
//! assert_eq!(acceleration.abbreviation(), "m_per_s_sq");
//! ```

mod analysis;
mod cases;
mod emit;
mod render;
mod simplify;

pub use analysis::IntegerProfile;

use std::collections::HashMap;
use std::fmt;

use crate::error::{GenerationError, GenerationResult};
use crate::literal::Literal;
use crate::numeric::SignClass;
use crate::unit::AnyUnit;

/// A node of the conversion-expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A unit leaf, optionally pinned to a sign class.
    Constant {
        unit: AnyUnit,
        sign: Option<SignClass>,
    },
    Literal(Literal),
    Multiplication(Box<Operation>, Box<Operation>),
    Division(Box<Operation>, Box<Operation>),
    Addition(Box<Operation>, Box<Operation>),
    Subtraction(Box<Operation>, Box<Operation>),
    Exponentiate {
        base: Box<Operation>,
        power: Box<Operation>,
    },
    /// Explicit grouping. Survives simplification unless it wraps a bare literal or constant.
    Precedence(Box<Operation>),
}

impl Operation {
    pub fn constant(unit: impl Into<AnyUnit>) -> Self {
        Operation::Constant {
            unit: unit.into(),
            sign: None,
        }
    }

    /// A unit leaf whose parameter is pinned to `sign` regardless of the function's sign classes.
    pub fn bound_constant(unit: impl Into<AnyUnit>, sign: SignClass) -> Self {
        Operation::Constant {
            unit: unit.into(),
            sign: Some(sign),
        }
    }

    pub fn literal(value: i64) -> Self {
        Operation::Literal(Literal::Integer(value))
    }

    pub fn decimal(value: f64) -> Self {
        Operation::Literal(Literal::Decimal(value))
    }

    pub fn one() -> Self {
        Operation::literal(1)
    }

    /// `self ^ power`.
    pub fn pow(self, power: i64) -> Self {
        Operation::Exponentiate {
            base: Box::new(self),
            power: Box::new(Operation::literal(power)),
        }
    }

    /// Wraps `self` in [`Operation::Precedence`] unless it is a bare leaf.
    pub fn grouped(self) -> Self {
        if self.is_bare() {
            self
        } else {
            Operation::Precedence(Box::new(self))
        }
    }

    /// `true` for constants and literals.
    pub fn is_bare(&self) -> bool {
        matches!(self, Operation::Constant { .. } | Operation::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Operation::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn is_one(&self) -> bool {
        self.as_literal().is_some_and(Literal::is_one)
    }

    pub fn is_zero(&self) -> bool {
        self.as_literal().is_some_and(Literal::is_zero)
    }

    fn is_additive(&self) -> bool {
        matches!(self, Operation::Addition(..) | Operation::Subtraction(..))
    }

    fn is_multiplicative(&self) -> bool {
        matches!(self, Operation::Multiplication(..) | Operation::Division(..))
    }

    /// Distinct unit leaves in order of first appearance.
    pub fn units(&self) -> Vec<AnyUnit> {
        let mut found = Vec::new();
        self.collect_units(&mut found);
        found
    }

    fn collect_units(&self, found: &mut Vec<AnyUnit>) {
        match self {
            Operation::Constant { unit, .. } => {
                if !found.contains(unit) {
                    found.push(unit.clone());
                }
            }
            Operation::Literal(_) => {}
            Operation::Multiplication(lhs, rhs)
            | Operation::Division(lhs, rhs)
            | Operation::Addition(lhs, rhs)
            | Operation::Subtraction(lhs, rhs)
            | Operation::Exponentiate {
                base: lhs,
                power: rhs,
            } => {
                lhs.collect_units(found);
                rhs.collect_units(found);
            }
            Operation::Precedence(inner) => inner.collect_units(found),
        }
    }

    /// Rebuilds the tree with every leaf passed through `leaf`.
    fn map_leaves(&self, leaf: &dyn Fn(&Operation) -> Operation) -> Operation {
        let map = |op: &Operation| Box::new(op.map_leaves(leaf));
        match self {
            Operation::Constant { .. } | Operation::Literal(_) => leaf(self),
            Operation::Multiplication(lhs, rhs) => Operation::Multiplication(map(lhs), map(rhs)),
            Operation::Division(lhs, rhs) => Operation::Division(map(lhs), map(rhs)),
            Operation::Addition(lhs, rhs) => Operation::Addition(map(lhs), map(rhs)),
            Operation::Subtraction(lhs, rhs) => Operation::Subtraction(map(lhs), map(rhs)),
            Operation::Exponentiate { base, power } => Operation::Exponentiate {
                base: map(base),
                power: map(power),
            },
            Operation::Precedence(inner) => Operation::Precedence(map(inner)),
        }
    }

    /// Substitutes every unit leaf found in `convertibles` by its mapped operation.
    ///
    /// Compound substitutes are grouped so the surrounding arithmetic keeps its meaning; a tree that is a single
    /// leaf is replaced as is. The result is not simplified.
    pub fn replace(&self, convertibles: &HashMap<AnyUnit, Operation>) -> Operation {
        if let Operation::Constant { unit, .. } = self {
            if let Some(substitute) = convertibles.get(unit) {
                return substitute.clone();
            }
        }
        self.map_leaves(&|leaf| match leaf {
            Operation::Constant { unit, .. } => match convertibles.get(unit) {
                Some(substitute) => substitute.clone().grouped(),
                None => leaf.clone(),
            },
            _ => leaf.clone(),
        })
    }

    /// Single-unit form of [`Operation::replace`].
    pub fn substitute(&self, unit: &AnyUnit, with: &Operation) -> Operation {
        let mut convertibles = HashMap::with_capacity(1);
        convertibles.insert(unit.clone(), with.clone());
        self.replace(&convertibles)
    }

    /// Evaluates the tree in `f64`, binding every unit leaf to `value`.
    pub fn evaluate(&self, value: f64) -> f64 {
        self.fold(&|_| Ok(value)).unwrap_or(f64::NAN)
    }

    /// Evaluates the tree in `f64` with one value per unit leaf.
    pub fn evaluate_with(&self, bindings: &HashMap<AnyUnit, f64>) -> GenerationResult<f64> {
        self.fold(&|unit| {
            bindings
                .get(unit)
                .copied()
                .ok_or_else(|| GenerationError::UnboundUnit(unit.abbreviation()))
        })
    }

    fn fold(&self, leaf: &dyn Fn(&AnyUnit) -> GenerationResult<f64>) -> GenerationResult<f64> {
        Ok(match self {
            Operation::Constant { unit, .. } => leaf(unit)?,
            Operation::Literal(literal) => literal.as_f64(),
            Operation::Multiplication(lhs, rhs) => lhs.fold(leaf)? * rhs.fold(leaf)?,
            Operation::Division(lhs, rhs) => lhs.fold(leaf)? / rhs.fold(leaf)?,
            Operation::Addition(lhs, rhs) => lhs.fold(leaf)? + rhs.fold(leaf)?,
            Operation::Subtraction(lhs, rhs) => lhs.fold(leaf)? - rhs.fold(leaf)?,
            Operation::Exponentiate { base, power } => base.fold(leaf)?.powf(power.fold(leaf)?),
            Operation::Precedence(inner) => inner.fold(leaf)?,
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.c_code(&|unit| unit.abbreviation()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Arithmetic builders
// ─────────────────────────────────────────────────────────────────────────────

fn operand(op: Operation, group: bool) -> Box<Operation> {
    Box::new(if group { op.grouped() } else { op })
}

impl std::ops::Mul for Operation {
    type Output = Operation;

    fn mul(self, rhs: Operation) -> Operation {
        let (lhs_group, rhs_group) = (self.is_additive(), rhs.is_additive());
        Operation::Multiplication(operand(self, lhs_group), operand(rhs, rhs_group))
    }
}

impl std::ops::Div for Operation {
    type Output = Operation;

    fn div(self, rhs: Operation) -> Operation {
        let lhs_group = self.is_additive();
        let rhs_group = rhs.is_additive() || rhs.is_multiplicative();
        Operation::Division(operand(self, lhs_group), operand(rhs, rhs_group))
    }
}

impl std::ops::Add for Operation {
    type Output = Operation;

    fn add(self, rhs: Operation) -> Operation {
        Operation::Addition(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for Operation {
    type Output = Operation;

    fn sub(self, rhs: Operation) -> Operation {
        let rhs_group = rhs.is_additive();
        Operation::Subtraction(Box::new(self), operand(rhs, rhs_group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{DistanceUnits, TemperatureUnits, TimeUnits};
    use approx::assert_relative_eq;

    fn metres() -> Operation {
        Operation::constant(DistanceUnits::Metres)
    }

    fn seconds() -> Operation {
        Operation::constant(TimeUnits::Seconds)
    }

    #[test]
    fn builders_group_where_c_precedence_requires() {
        let op = metres() / (seconds() * Operation::literal(2));
        assert!(matches!(&op, Operation::Division(_, rhs) if matches!(**rhs, Operation::Precedence(_))));

        let op = (metres() + Operation::literal(1)) * Operation::literal(3);
        assert!(matches!(&op, Operation::Multiplication(lhs, _) if matches!(**lhs, Operation::Precedence(_))));

        let op = metres() * seconds() / Operation::literal(3);
        assert!(matches!(&op, Operation::Division(lhs, _) if matches!(**lhs, Operation::Multiplication(..))));
    }

    #[test]
    fn units_are_distinct_and_ordered() {
        let op = metres() / seconds() * metres();
        let units = op.units();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0], DistanceUnits::Metres.into());
        assert_eq!(units[1], TimeUnits::Seconds.into());
    }

    #[test]
    fn replace_groups_compound_substitutes() {
        let op = metres() * Operation::literal(100);
        let mm: AnyUnit = DistanceUnits::Millimetres.into();
        let replaced = op.substitute(
            &DistanceUnits::Metres.into(),
            &(Operation::constant(DistanceUnits::Millimetres) / Operation::literal(1000)),
        );
        assert_eq!(replaced.units(), vec![mm]);
        assert!(matches!(&replaced, Operation::Multiplication(lhs, _) if matches!(**lhs, Operation::Precedence(_))));
        assert_relative_eq!(replaced.evaluate(5000.0), 500.0);
    }

    #[test]
    fn replacing_a_lone_leaf_needs_no_grouping() {
        let with = Operation::constant(DistanceUnits::Millimetres) / Operation::literal(1000);
        assert_eq!(metres().substitute(&DistanceUnits::Metres.into(), &with), with);
    }

    #[test]
    fn evaluate_with_requires_every_binding() {
        let op = metres() / seconds();
        let mut bindings = HashMap::new();
        bindings.insert(AnyUnit::from(DistanceUnits::Metres), 10.0);
        assert_eq!(op.evaluate_with(&bindings), Err(GenerationError::UnboundUnit("s".to_string())));
        bindings.insert(AnyUnit::from(TimeUnits::Seconds), 4.0);
        assert_eq!(op.evaluate_with(&bindings), Ok(2.5));
    }

    #[test]
    fn display_renders_infix_code() {
        let celsius = Operation::constant(TemperatureUnits::Celsius);
        let op = celsius * Operation::literal(9) / Operation::literal(5) + Operation::literal(32);
        assert_eq!(op.to_string(), "celsius * 9 / 5 + 32");
    }
}
