//! Immutable numeric constants embedded in operations.

use core::fmt;
use core::hash::{Hash, Hasher};

/// An integer or decimal constant.
///
/// Equality on decimals is bitwise, which keeps `Literal` usable as part of structurally compared and hashed trees.
#[derive(Clone, Copy, Debug)]
pub enum Literal {
    Integer(i64),
    Decimal(f64),
}

impl Literal {
    pub fn as_f64(&self) -> f64 {
        match self {
            Literal::Integer(value) => *value as f64,
            Literal::Decimal(value) => *value,
        }
    }

    /// The integer value, if this is an integer literal.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Literal::Integer(value) => Some(*value),
            Literal::Decimal(_) => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Literal::Integer(_))
    }

    pub fn is_zero(&self) -> bool {
        self.as_f64() == 0.0
    }

    pub fn is_one(&self) -> bool {
        self.as_f64() == 1.0
    }

    pub fn is_negative(&self) -> bool {
        self.as_f64() < 0.0
    }

    /// Identifier-safe rendering: `-3` becomes `neg3`, `9.80665` becomes `9_80665`.
    pub fn abbreviation(&self) -> String {
        let magnitude = match self {
            Literal::Integer(value) => value.unsigned_abs().to_string(),
            Literal::Decimal(value) => value.abs().to_string().replace('.', "_"),
        };
        if self.is_negative() {
            format!("neg{magnitude}")
        } else {
            magnitude
        }
    }

    /// C source text evaluated in an integer working type.
    pub fn integer_code(&self) -> String {
        match self {
            Literal::Integer(value) if *value < 0 => format!("({value})"),
            Literal::Integer(value) => value.to_string(),
            Literal::Decimal(_) => self.double_code(),
        }
    }

    /// C source text evaluated as a `double`.
    pub fn double_code(&self) -> String {
        let text = match self {
            Literal::Integer(value) => format!("{value}.0"),
            Literal::Decimal(value) => format!("{value:?}"),
        };
        if self.is_negative() {
            format!("({text})")
        } else {
            text
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Integer(a), Literal::Integer(b)) => a == b,
            (Literal::Decimal(a), Literal::Decimal(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Literal::Integer(value) => {
                0u8.hash(state);
                value.hash(state);
            }
            Literal::Decimal(value) => {
                1u8.hash(state);
                value.to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::Decimal(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Decimal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_is_identifier_safe() {
        assert_eq!(Literal::Integer(1000).abbreviation(), "1000");
        assert_eq!(Literal::Integer(-1).abbreviation(), "neg1");
        assert_eq!(Literal::Decimal(9.80665).abbreviation(), "9_80665");
        assert_eq!(Literal::Decimal(-0.5).abbreviation(), "neg0_5");
        assert_eq!(Literal::Decimal(1.0).abbreviation(), "1");
    }

    #[test]
    fn code_rendering() {
        assert_eq!(Literal::Integer(10).integer_code(), "10");
        assert_eq!(Literal::Integer(-10).integer_code(), "(-10)");
        assert_eq!(Literal::Integer(10).double_code(), "10.0");
        assert_eq!(Literal::Decimal(273.15).double_code(), "273.15");
        assert_eq!(Literal::Decimal(1.0).double_code(), "1.0");
        assert_eq!(Literal::Decimal(-2.5).double_code(), "(-2.5)");
    }

    #[test]
    fn coercions() {
        assert_eq!(Literal::Integer(3).as_f64(), 3.0);
        assert_eq!(Literal::Integer(3).as_integer(), Some(3));
        assert_eq!(Literal::Decimal(3.0).as_integer(), None);
        assert!(Literal::Decimal(1.0).is_one());
        assert!(Literal::Integer(0).is_zero());
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Literal::Integer(1), Literal::Integer(1));
        assert_ne!(Literal::Integer(1), Literal::Decimal(1.0));
        assert_eq!(Literal::Decimal(0.1), Literal::Decimal(0.1));
    }
}
