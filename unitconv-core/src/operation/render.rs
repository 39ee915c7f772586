//! Identifier and prose renderings of an operation's shape.
//!
//! The abbreviation is part of every generated function name, so its format is fixed: products join with `_`,
//! quotients with `_per_`, squares and cubes render `_sq`/`_cub` and any other power `_pwr_<n>`. Operands that
//! render as `1` disappear from products and quotients.

use super::Operation;
use crate::literal::Literal;
use crate::unit::AnyUnit;

struct Vocabulary {
    leaf: fn(&AnyUnit) -> String,
    literal: fn(&Literal) -> String,
    product: &'static str,
    quotient: &'static str,
    sum: &'static str,
    difference: &'static str,
    squared: &'static str,
    cubed: &'static str,
    power: &'static str,
}

const ABBREVIATIONS: Vocabulary = Vocabulary {
    leaf: AnyUnit::abbreviation,
    literal: Literal::abbreviation,
    product: "_",
    quotient: "_per_",
    sum: "_plus_",
    difference: "_minus_",
    squared: "_sq",
    cubed: "_cub",
    power: "_pwr_",
};

const DESCRIPTIONS: Vocabulary = Vocabulary {
    leaf: AnyUnit::description,
    literal: Literal::to_string,
    product: " ",
    quotient: " per ",
    sum: " plus ",
    difference: " minus ",
    squared: " squared",
    cubed: " cubed",
    power: " to the power of ",
};

impl Operation {
    /// Identifier-safe name of the shape, e.g. `m_per_s_sq`.
    pub fn abbreviation(&self) -> String {
        self.render(&ABBREVIATIONS)
    }

    /// Human-readable name of the shape, e.g. `metres per seconds squared`.
    pub fn description(&self) -> String {
        self.render(&DESCRIPTIONS)
    }

    fn render(&self, words: &Vocabulary) -> String {
        match self {
            Operation::Constant { unit, .. } => (words.leaf)(unit),
            Operation::Literal(literal) => (words.literal)(literal),
            Operation::Multiplication(lhs, rhs) => {
                let (lhs, rhs) = (lhs.render(words), rhs.render(words));
                match (lhs == "1", rhs == "1") {
                    (true, true) => "1".to_string(),
                    (true, false) => rhs,
                    (false, true) => lhs,
                    (false, false) => format!("{lhs}{}{rhs}", words.product),
                }
            }
            Operation::Division(lhs, rhs) => {
                let (lhs, rhs) = (lhs.render(words), rhs.render(words));
                match (lhs == "1", rhs == "1") {
                    (_, true) => lhs,
                    (true, false) => format!("{rhs}{}{}", words.power, (words.literal)(&Literal::Integer(-1))),
                    (false, false) => format!("{lhs}{}{rhs}", words.quotient),
                }
            }
            Operation::Addition(lhs, rhs) => format!("{}{}{}", lhs.render(words), words.sum, rhs.render(words)),
            Operation::Subtraction(lhs, rhs) => {
                format!("{}{}{}", lhs.render(words), words.difference, rhs.render(words))
            }
            Operation::Exponentiate { base, power } => {
                let base = base.render(words);
                match power.as_literal().and_then(Literal::as_integer) {
                    Some(2) => format!("{base}{}", words.squared),
                    Some(3) => format!("{base}{}", words.cubed),
                    _ => format!("{base}{}{}", words.power, power.render(words)),
                }
            }
            Operation::Precedence(inner) => inner.render(words),
        }
    }
}
