//! Structural simplification.
//!
//! One bottom-up pass: children first, then the local rules of the node. A rule whose result is itself a node of a
//! kind with rules (a reciprocal folded into a quotient, for instance) re-enters that kind's rules directly, so
//! composed rewrites settle within the same pass. There is no fixed-point loop over the whole tree.

use super::Operation;

impl Operation {
    /// Canonical minimal form of the tree.
    pub fn simplify(&self) -> Operation {
        match self {
            Operation::Constant { .. } | Operation::Literal(_) => self.clone(),
            Operation::Precedence(inner) => inner.simplify().grouped(),
            Operation::Multiplication(lhs, rhs) => product(lhs.simplify(), rhs.simplify()),
            Operation::Division(lhs, rhs) => quotient(lhs.simplify(), rhs.simplify()),
            Operation::Addition(lhs, rhs) => sum(lhs.simplify(), rhs.simplify()),
            Operation::Subtraction(lhs, rhs) => difference(lhs.simplify(), rhs.simplify()),
            Operation::Exponentiate { base, power } => exponent(base.simplify(), power.simplify()),
        }
    }
}

/// Looks through a single level of grouping.
fn ungrouped(op: &Operation) -> &Operation {
    match op {
        Operation::Precedence(inner) => inner,
        other => other,
    }
}

/// `y` when `op` is `1 / y`.
fn reciprocal(op: &Operation) -> Option<&Operation> {
    match ungrouped(op) {
        Operation::Division(numerator, denominator) if numerator.is_one() => Some(denominator),
        _ => None,
    }
}

fn product(lhs: Operation, rhs: Operation) -> Operation {
    if lhs.is_one() {
        return rhs;
    }
    if rhs.is_one() {
        return lhs;
    }
    if let Some(denominator) = reciprocal(&rhs) {
        return quotient(lhs, denominator.clone());
    }
    if let Some(denominator) = reciprocal(&lhs) {
        return quotient(rhs, denominator.clone());
    }
    // (x / k) * k and k * (x / k)
    if let Operation::Division(x, k) = ungrouped(&lhs) {
        if ungrouped(k) == ungrouped(&rhs) {
            return (**x).clone();
        }
    }
    if let Operation::Division(x, k) = ungrouped(&rhs) {
        if ungrouped(k) == ungrouped(&lhs) {
            return (**x).clone();
        }
    }
    Operation::Multiplication(Box::new(lhs), Box::new(rhs))
}

fn quotient(numerator: Operation, denominator: Operation) -> Operation {
    // the division builder groups a compound divisor, so `x / x` arrives as `x / (x)`
    let divisor = ungrouped(&denominator);
    if ungrouped(&numerator) == divisor {
        return Operation::one();
    }
    if denominator.is_one() {
        return numerator;
    }
    // (x * k) / k and (k * x) / k
    if let Operation::Multiplication(a, b) = ungrouped(&numerator) {
        if ungrouped(b) == divisor {
            return (**a).clone();
        }
        if ungrouped(a) == divisor {
            return (**b).clone();
        }
    }
    Operation::Division(Box::new(numerator), Box::new(denominator))
}

fn sum(lhs: Operation, rhs: Operation) -> Operation {
    if lhs.is_zero() {
        return rhs;
    }
    if rhs.is_zero() {
        return lhs;
    }
    Operation::Addition(Box::new(lhs), Box::new(rhs))
}

fn difference(lhs: Operation, rhs: Operation) -> Operation {
    if rhs.is_zero() {
        return lhs;
    }
    Operation::Subtraction(Box::new(lhs), Box::new(rhs))
}

fn exponent(base: Operation, power: Operation) -> Operation {
    if power.is_zero() || base.is_one() {
        return Operation::one();
    }
    if power.is_one() {
        return base;
    }
    Operation::Exponentiate {
        base: Box::new(base),
        power: Box::new(power),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{DistanceUnits, MassUnits, TimeUnits};
    use crate::UnitsConvertible;
    use proptest::prelude::*;

    fn metres() -> Operation {
        Operation::constant(DistanceUnits::Metres)
    }

    fn seconds() -> Operation {
        Operation::constant(TimeUnits::Seconds)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identity laws
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn self_division_is_one() {
        let x = metres() / seconds();
        assert_eq!((x.clone() / x).simplify(), Operation::one());
    }

    #[test]
    fn self_division_sees_through_the_grouped_divisor() {
        let x = metres() * seconds();
        let op = x.clone() / x.clone();
        assert!(matches!(&op, Operation::Division(_, rhs) if matches!(**rhs, Operation::Precedence(_))));
        assert_eq!(op.simplify(), Operation::one());

        let x = (metres() + Operation::literal(3)) * seconds();
        assert_eq!((x.clone() / x).simplify(), Operation::one());
    }

    #[test]
    fn grouped_scale_factors_cancel() {
        let k = Operation::literal(60) * Operation::literal(1000);
        assert_eq!(((metres() * k.clone()) / k.clone()).simplify(), metres());
        assert_eq!(((metres() / k.clone()) * k.clone().grouped()).simplify(), metres());
    }

    #[test]
    fn multiplicative_identity() {
        let x = metres() / seconds();
        assert_eq!((x.clone() * Operation::one()).simplify(), x.simplify());
        assert_eq!((Operation::one() * x.clone()).simplify(), x.simplify());
        assert_eq!((x.clone() / Operation::one()).simplify(), x.simplify());
    }

    #[test]
    fn additive_identity() {
        let x = metres() * Operation::literal(3);
        assert_eq!((x.clone() + Operation::literal(0)).simplify(), x.simplify());
        assert_eq!((Operation::literal(0) + x.clone()).simplify(), x.simplify());
        assert_eq!((x.clone() - Operation::literal(0)).simplify(), x.simplify());
        assert_eq!(
            (Operation::literal(0) + Operation::literal(0)).simplify(),
            Operation::literal(0)
        );
    }

    #[test]
    fn reciprocal_folding() {
        let folded = (metres() * (Operation::one() / seconds())).simplify();
        assert_eq!(folded, metres() / seconds());
        let folded = ((Operation::one() / seconds()) * metres()).simplify();
        assert_eq!(folded, metres() / seconds());
    }

    #[test]
    fn reciprocal_folding_composes_with_self_division() {
        // x * (1 / x) folds to x / x, which settles to 1 in the same pass
        let op = metres() * (Operation::one() / metres());
        assert_eq!(op.simplify(), Operation::one());
    }

    #[test]
    fn exponent_rules() {
        assert_eq!(metres().pow(0).simplify(), Operation::one());
        assert_eq!(metres().pow(1).simplify(), metres());
        assert_eq!(Operation::one().pow(7).simplify(), Operation::one());
        assert_eq!(seconds().pow(2).simplify(), seconds().pow(2));
    }

    #[test]
    fn precedence_survives_around_compound_children() {
        let grouped = Operation::Precedence(Box::new(metres()));
        assert_eq!(grouped.simplify(), metres());
        let grouped = Operation::Precedence(Box::new(Operation::literal(4)));
        assert_eq!(grouped.simplify(), Operation::literal(4));
        let compound = (metres() + Operation::literal(1)).grouped();
        assert!(matches!(compound.simplify(), Operation::Precedence(_)));
    }

    #[test]
    fn inverse_scaling_cancels() {
        let k = Operation::literal(1000);
        assert_eq!(((metres() / k.clone()) * k.clone()).simplify(), metres());
        assert_eq!(((metres() * k.clone()) / k.clone()).simplify(), metres());
        assert_eq!(((k.clone() * metres()) / k.clone()).simplify(), metres());
    }

    #[test]
    fn base10_round_trip_is_identity() {
        let mg = MassUnits::Milligrams;
        let kg = MassUnits::Kilograms;
        let there = mg.conversion(&kg).expect("same category");
        let back = kg.conversion(&mg).expect("same category");
        let composed = back.substitute(&kg.into(), &there);
        assert_eq!(composed.simplify(), Operation::constant(mg));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────────

    fn leaf() -> impl Strategy<Value = Operation> {
        prop_oneof![
            Just(metres()),
            Just(seconds()),
            Just(Operation::constant(DistanceUnits::Millimetres)),
            (0i64..4).prop_map(Operation::literal),
            Just(Operation::literal(1000)),
        ]
    }

    fn tree() -> impl Strategy<Value = Operation> {
        leaf().prop_recursive(5, 48, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a * b),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a / b),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a + b),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a - b),
                (inner.clone(), 0i64..4).prop_map(|(a, n)| a.pow(n)),
                inner.prop_map(|a| Operation::Precedence(Box::new(a))),
            ]
        })
    }

    proptest! {
        #[test]
        fn simplify_is_idempotent(op in tree()) {
            let once = op.simplify();
            prop_assert_eq!(once.simplify(), once);
        }

        #[test]
        fn simplify_only_drops_units(op in tree()) {
            let simplified = op.simplify();
            for unit in simplified.units() {
                prop_assert!(op.units().contains(&unit));
            }
        }

        #[test]
        fn base10_round_trips_for_every_pair(a in 0usize..5, b in 0usize..5) {
            use crate::UnitCategory;
            let (a, b) = (DistanceUnits::ALL[a], DistanceUnits::ALL[b]);
            let there = a.conversion(&b).unwrap();
            let back = b.conversion(&a).unwrap();
            let composed = back.substitute(&b.into(), &there).simplify();
            prop_assert_eq!(composed, Operation::constant(a));
        }
    }
}
