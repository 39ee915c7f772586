//! Explicit code-generation settings.

use std::collections::HashMap;

use crate::error::{GenerationError, GenerationResult};
use crate::numeric::{NumericType, SignClass};

/// Per-category numeric kinds for each sign class.
///
/// Unbound pairs fall back to [`SignClass::numeric_type`]. A binding may only narrow: the kind must stay in the
/// sign class's signedness and float-ness, and must not be wider than the default (`Int8`–`Int64` for truncating,
/// `UInt8`–`UInt64` for unsigned, `Float` for float, `Float` or `Double` for double).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumericBindings {
    overrides: HashMap<(String, SignClass), NumericType>,
}

impl NumericBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, category: &str, sign: SignClass, numeric: NumericType) -> GenerationResult<()> {
        let default = sign.numeric_type();
        let same_class = numeric.is_float() == default.is_float() && numeric.is_signed() == default.is_signed();
        if !same_class || default.smaller_than(&numeric) {
            return Err(GenerationError::InvalidBinding {
                category: category.to_string(),
                sign: sign.abbreviation().to_string(),
                numeric: numeric.c_type().to_string(),
            });
        }
        log::debug!("binding {}/{} to {}", category, sign, numeric);
        self.overrides.insert((category.to_string(), sign), numeric);
        Ok(())
    }

    pub fn numeric_type(&self, category: &str, sign: SignClass) -> NumericType {
        self.overrides
            .get(&(category.to_string(), sign))
            .copied()
            .unwrap_or_else(|| sign.numeric_type())
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

/// Settings threaded through function synthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Wrap clamp conditions in `__builtin_expect(…, 0)`.
    pub branch_hints: bool,
    pub bindings: NumericBindings,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            branch_hints: true,
            bindings: NumericBindings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_sign_class() {
        let bindings = NumericBindings::new();
        assert_eq!(bindings.numeric_type("distance", SignClass::Truncating), NumericType::Int64);
        assert_eq!(bindings.numeric_type("distance", SignClass::Float), NumericType::Float);
        assert!(bindings.is_empty());
    }

    #[test]
    fn narrowing_within_the_class() {
        let mut bindings = NumericBindings::new();
        bindings.bind("time", SignClass::Unsigned, NumericType::UInt32).unwrap();
        bindings.bind("time", SignClass::Truncating, NumericType::Int16).unwrap();
        bindings.bind("time", SignClass::Double, NumericType::Float).unwrap();
        assert_eq!(bindings.numeric_type("time", SignClass::Unsigned), NumericType::UInt32);
        assert_eq!(bindings.numeric_type("time", SignClass::Truncating), NumericType::Int16);
        assert_eq!(bindings.numeric_type("time", SignClass::Double), NumericType::Float);
        assert_eq!(bindings.numeric_type("distance", SignClass::Unsigned), NumericType::UInt64);
    }

    #[test]
    fn invalid_bindings() {
        let mut bindings = NumericBindings::new();
        assert_eq!(
            bindings.bind("time", SignClass::Unsigned, NumericType::Int32),
            Err(GenerationError::InvalidBinding {
                category: "time".to_string(),
                sign: "u".to_string(),
                numeric: "int32_t".to_string(),
            })
        );
        assert!(bindings.bind("time", SignClass::Truncating, NumericType::Float).is_err());
        assert!(bindings.bind("time", SignClass::Float, NumericType::Double).is_err());
        assert!(bindings.bind("time", SignClass::Float, NumericType::Int8).is_err());
        assert!(bindings.is_empty());
    }
}
