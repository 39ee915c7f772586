//! C back ends.
//!
//! Both back ends render the tree as an infix expression. They differ in how literals are spelled: the integer back
//! end keeps integer literals so arithmetic stays in the working integer type, the double back end spells every
//! literal as a `double`. Unit leaves are rendered through `names`, normally the function's working variables.

use super::Operation;

impl Operation {
    /// Expression text for an integer working type.
    pub fn c_code(&self, names: &dyn Fn(&crate::AnyUnit) -> String) -> String {
        self.emit(names, &|literal| literal.integer_code())
    }

    /// Expression text evaluated entirely in `double`.
    pub fn double_code(&self, names: &dyn Fn(&crate::AnyUnit) -> String) -> String {
        self.emit(names, &|literal| literal.double_code())
    }

    fn emit(
        &self,
        names: &dyn Fn(&crate::AnyUnit) -> String,
        literal: &dyn Fn(&crate::Literal) -> String,
    ) -> String {
        let infix = |lhs: &Operation, op: &str, rhs: &Operation| {
            format!("{} {op} {}", lhs.emit(names, literal), rhs.emit(names, literal))
        };
        match self {
            Operation::Constant { unit, .. } => names(unit),
            Operation::Literal(value) => literal(value),
            Operation::Multiplication(lhs, rhs) => infix(lhs, "*", rhs),
            Operation::Division(lhs, rhs) => infix(lhs, "/", rhs),
            Operation::Addition(lhs, rhs) => infix(lhs, "+", rhs),
            Operation::Subtraction(lhs, rhs) => infix(lhs, "-", rhs),
            Operation::Exponentiate { base, power } => {
                format!("pow({}, {})", base.emit(names, literal), power.emit(names, literal))
            }
            Operation::Precedence(inner) => format!("({})", inner.emit(names, literal)),
        }
    }
}
