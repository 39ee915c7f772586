//! Leaf-wise conversion between two operations of the same shape.
//!
//! The value being converted is threaded through both trees in lock step. At each pair of matching unit leaves the
//! leaf conversion is applied to the value; below a division's right operand, or under a negative power, the
//! inverse leaf conversion is applied instead. Literals must agree. An exponent applies its leaf conversion once per
//! unit of power.

use crate::error::{GenerationError, GenerationResult};
use crate::literal::Literal;
use crate::operation::Operation;

/// Converts `value`, expressed in shape `from`, into shape `to`. The result is simplified.
pub fn convert(from: &Operation, to: &Operation, value: Operation) -> GenerationResult<Operation> {
    Ok(thread(from, to, value, false)?.simplify())
}

fn thread(from: &Operation, to: &Operation, value: Operation, inverted: bool) -> GenerationResult<Operation> {
    match (from, to) {
        (Operation::Constant { unit: a, .. }, Operation::Constant { unit: b, .. }) => {
            let (source, target) = if inverted { (b, a) } else { (a, b) };
            if source == target {
                return Ok(value);
            }
            let step = source.conversion_to(target)?;
            Ok(step.substitute(source, &value))
        }
        (Operation::Literal(a), Operation::Literal(b)) if a == b => Ok(value),
        (Operation::Multiplication(la, ra), Operation::Multiplication(lb, rb)) => {
            let value = thread(la, lb, value, inverted)?;
            thread(ra, rb, value, inverted)
        }
        (Operation::Division(la, ra), Operation::Division(lb, rb)) => {
            let value = thread(la, lb, value, inverted)?;
            thread(ra, rb, value, !inverted)
        }
        (
            Operation::Exponentiate { base: ba, power: pa },
            Operation::Exponentiate { base: bb, power: pb },
        ) if pa == pb => {
            let power = integer_power(pa).ok_or_else(|| mismatch(from, to))?;
            let inverted = if power < 0 { !inverted } else { inverted };
            let mut value = value;
            for _ in 0..power.unsigned_abs() {
                value = thread(ba, bb, value, inverted)?;
            }
            Ok(value)
        }
        (Operation::Precedence(a), Operation::Precedence(b)) => thread(a, b, value, inverted),
        _ => Err(mismatch(from, to)),
    }
}

fn integer_power(power: &Operation) -> Option<i64> {
    power.as_literal().and_then(Literal::as_integer)
}

fn mismatch(from: &Operation, to: &Operation) -> GenerationError {
    GenerationError::ShapeMismatch {
        from: from.abbreviation(),
        to: to.abbreviation(),
    }
}

/// Whether `a` and `b` differ only in the choice of unit within each leaf's category.
pub fn same_shape(a: &Operation, b: &Operation) -> bool {
    match (a, b) {
        (Operation::Constant { unit: a, .. }, Operation::Constant { unit: b, .. }) => a.category() == b.category(),
        (Operation::Literal(a), Operation::Literal(b)) => a == b,
        (Operation::Multiplication(la, ra), Operation::Multiplication(lb, rb))
        | (Operation::Division(la, ra), Operation::Division(lb, rb))
        | (Operation::Addition(la, ra), Operation::Addition(lb, rb))
        | (Operation::Subtraction(la, ra), Operation::Subtraction(lb, rb))
        | (
            Operation::Exponentiate { base: la, power: ra },
            Operation::Exponentiate { base: lb, power: rb },
        ) => same_shape(la, lb) && same_shape(ra, rb),
        (Operation::Precedence(a), Operation::Precedence(b)) => same_shape(a, b),
        _ => false,
    }
}

/// Whether leaf-wise scaling is sound for the shape: only products, quotients, grouping and integer powers.
pub fn is_scalable(op: &Operation) -> bool {
    match op {
        Operation::Constant { .. } | Operation::Literal(_) => true,
        Operation::Multiplication(lhs, rhs) | Operation::Division(lhs, rhs) => is_scalable(lhs) && is_scalable(rhs),
        Operation::Exponentiate { base, power } => integer_power(power).is_some() && is_scalable(base),
        Operation::Precedence(inner) => is_scalable(inner),
        Operation::Addition(..) | Operation::Subtraction(..) => false,
    }
}
