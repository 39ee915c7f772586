use super::Operation;

impl Operation {
    /// Every concrete operation obtained by substituting, independently, each member of every leaf's category.
    ///
    /// Leaves are expanded left to right, so the first leaf varies slowest.
    pub fn all_cases(&self) -> Vec<Operation> {
        match self {
            Operation::Constant { unit, sign } => unit
                .all_cases()
                .into_iter()
                .map(|unit| Operation::Constant { unit, sign: *sign })
                .collect(),
            Operation::Literal(_) => vec![self.clone()],
            Operation::Multiplication(lhs, rhs) => cartesian(lhs, rhs, Operation::Multiplication),
            Operation::Division(lhs, rhs) => cartesian(lhs, rhs, Operation::Division),
            Operation::Addition(lhs, rhs) => cartesian(lhs, rhs, Operation::Addition),
            Operation::Subtraction(lhs, rhs) => cartesian(lhs, rhs, Operation::Subtraction),
            Operation::Exponentiate { base, power } => {
                cartesian(base, power, |base, power| Operation::Exponentiate { base, power })
            }
            Operation::Precedence(inner) => inner
                .all_cases()
                .into_iter()
                .map(|case| Operation::Precedence(Box::new(case)))
                .collect(),
        }
    }
}

fn cartesian(
    lhs: &Operation,
    rhs: &Operation,
    build: impl Fn(Box<Operation>, Box<Operation>) -> Operation,
) -> Vec<Operation> {
    let rights = rhs.all_cases();
    let mut cases = Vec::new();
    for left in lhs.all_cases() {
        for right in &rights {
            cases.push(build(Box::new(left.clone()), Box::new(right.clone())));
        }
    }
    cases
}
