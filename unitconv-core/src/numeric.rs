//! Fixed-width numeric representations and the four sign classes.
//!
//! Generated functions are parameterized over [`SignClass`] pairs (16 combinations) rather than over every
//! [`NumericType`] pair (100 combinations). Each sign class is bound to one numeric type; a category may narrow that
//! binding later through [`crate::NumericBindings`].

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the ten numeric kinds a generated function can take or return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum NumericType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
}

impl NumericType {
    /// Every numeric kind.
    pub const ALL: [NumericType; 10] = [
        NumericType::Int8,
        NumericType::Int16,
        NumericType::Int32,
        NumericType::Int64,
        NumericType::UInt8,
        NumericType::UInt16,
        NumericType::UInt32,
        NumericType::UInt64,
        NumericType::Float,
        NumericType::Double,
    ];

    /// `true` for signed integers and both floating kinds.
    pub const fn is_signed(&self) -> bool {
        !matches!(
            self,
            NumericType::UInt8 | NumericType::UInt16 | NumericType::UInt32 | NumericType::UInt64
        )
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, NumericType::Float | NumericType::Double)
    }

    /// C spelling of the type.
    pub const fn c_type(&self) -> &'static str {
        match self {
            NumericType::Int8 => "int8_t",
            NumericType::Int16 => "int16_t",
            NumericType::Int32 => "int32_t",
            NumericType::Int64 => "int64_t",
            NumericType::UInt8 => "uint8_t",
            NumericType::UInt16 => "uint16_t",
            NumericType::UInt32 => "uint32_t",
            NumericType::UInt64 => "uint64_t",
            NumericType::Float => "float",
            NumericType::Double => "double",
        }
    }

    pub const fn abbreviation(&self) -> &'static str {
        match self {
            NumericType::Int8 => "i8",
            NumericType::Int16 => "i16",
            NumericType::Int32 => "i32",
            NumericType::Int64 => "i64",
            NumericType::UInt8 => "u8",
            NumericType::UInt16 => "u16",
            NumericType::UInt32 => "u32",
            NumericType::UInt64 => "u64",
            NumericType::Float => "f",
            NumericType::Double => "d",
        }
    }

    /// Source text of the `(max, min)` bounds.
    ///
    /// Some bounds are only expressible through the `<stdint.h>`/`<float.h>` macros, so these are source text and
    /// not numbers. See [`NumericType::max_value`] for the numeric counterpart.
    pub const fn limits(&self) -> (&'static str, &'static str) {
        match self {
            NumericType::Int8 => ("127", "-128"),
            NumericType::Int16 => ("32767", "-32768"),
            NumericType::Int32 => ("INT32_MAX", "INT32_MIN"),
            NumericType::Int64 => ("INT64_MAX", "INT64_MIN"),
            NumericType::UInt8 => ("255", "0"),
            NumericType::UInt16 => ("65535", "0"),
            NumericType::UInt32 => ("UINT32_MAX", "0"),
            NumericType::UInt64 => ("UINT64_MAX", "0"),
            NumericType::Float => ("FLT_MAX", "-FLT_MAX"),
            NumericType::Double => ("DBL_MAX", "-DBL_MAX"),
        }
    }

    pub const fn max_text(&self) -> &'static str {
        self.limits().0
    }

    pub const fn min_text(&self) -> &'static str {
        self.limits().1
    }

    /// Integer bounds, `None` for the floating kinds.
    pub const fn integer_limits(&self) -> Option<(i128, i128)> {
        match self {
            NumericType::Int8 => Some((i8::MAX as i128, i8::MIN as i128)),
            NumericType::Int16 => Some((i16::MAX as i128, i16::MIN as i128)),
            NumericType::Int32 => Some((i32::MAX as i128, i32::MIN as i128)),
            NumericType::Int64 => Some((i64::MAX as i128, i64::MIN as i128)),
            NumericType::UInt8 => Some((u8::MAX as i128, 0)),
            NumericType::UInt16 => Some((u16::MAX as i128, 0)),
            NumericType::UInt32 => Some((u32::MAX as i128, 0)),
            NumericType::UInt64 => Some((u64::MAX as i128, 0)),
            NumericType::Float | NumericType::Double => None,
        }
    }

    /// Largest value as an `f64` (rounded for the 64-bit integers).
    pub fn max_value(&self) -> f64 {
        match self {
            NumericType::Float => f32::MAX as f64,
            NumericType::Double => f64::MAX,
            _ => self.integer_limits().map_or(0.0, |(max, _)| max as f64),
        }
    }

    /// Smallest value as an `f64`.
    pub fn min_value(&self) -> f64 {
        match self {
            NumericType::Float => f32::MIN as f64,
            NumericType::Double => f64::MIN,
            _ => self.integer_limits().map_or(0.0, |(_, min)| min as f64),
        }
    }

    /// Whether the maximum survives a round trip through `double` unchanged.
    pub const fn max_exact_in_double(&self) -> bool {
        !matches!(self, NumericType::Int64 | NumericType::UInt64)
    }

    /// The signed/unsigned counterpart of the same width. Floating kinds map to themselves.
    pub const fn opposite(&self) -> NumericType {
        match self {
            NumericType::Int8 => NumericType::UInt8,
            NumericType::Int16 => NumericType::UInt16,
            NumericType::Int32 => NumericType::UInt32,
            NumericType::Int64 => NumericType::UInt64,
            NumericType::UInt8 => NumericType::Int8,
            NumericType::UInt16 => NumericType::Int16,
            NumericType::UInt32 => NumericType::Int32,
            NumericType::UInt64 => NumericType::Int64,
            NumericType::Float => NumericType::Float,
            NumericType::Double => NumericType::Double,
        }
    }

    /// Position within the kind's chain: `Int8 < … < Int64 < Float < Double` or `UInt8 < … < UInt64`.
    const fn rank(&self) -> u8 {
        match self {
            NumericType::Int8 | NumericType::UInt8 => 0,
            NumericType::Int16 | NumericType::UInt16 => 1,
            NumericType::Int32 | NumericType::UInt32 => 2,
            NumericType::Int64 | NumericType::UInt64 => 3,
            NumericType::Float => 4,
            NumericType::Double => 5,
        }
    }

    /// Orders two kinds of the same signedness class.
    ///
    /// # Panics
    ///
    /// Comparing a signed-or-float kind with an unsigned kind has no meaningful answer and panics.
    pub fn smaller_than(&self, other: &NumericType) -> bool {
        assert!(
            self.is_signed() == other.is_signed(),
            "cannot order `{}` against `{}`: they belong to different sign classes",
            self,
            other
        );
        self.rank() < other.rank()
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_type())
    }
}

/// Canonical numeric role of a generated function's argument or result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum SignClass {
    #[cfg_attr(feature = "serde", serde(alias = "t"))]
    Truncating,
    #[cfg_attr(feature = "serde", serde(alias = "u"))]
    Unsigned,
    #[cfg_attr(feature = "serde", serde(alias = "f"))]
    Float,
    #[cfg_attr(feature = "serde", serde(alias = "d"))]
    Double,
}

impl SignClass {
    pub const ALL: [SignClass; 4] = [
        SignClass::Truncating,
        SignClass::Unsigned,
        SignClass::Float,
        SignClass::Double,
    ];

    /// Suffix used in type and function names.
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            SignClass::Truncating => "t",
            SignClass::Unsigned => "u",
            SignClass::Float => "f",
            SignClass::Double => "d",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            SignClass::Truncating => "truncating",
            SignClass::Unsigned => "unsigned",
            SignClass::Float => "float",
            SignClass::Double => "double",
        }
    }

    /// Default numeric kind bound to this class.
    pub const fn numeric_type(&self) -> NumericType {
        match self {
            SignClass::Truncating => NumericType::Int64,
            SignClass::Unsigned => NumericType::UInt64,
            SignClass::Float => NumericType::Float,
            SignClass::Double => NumericType::Double,
        }
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, SignClass::Float | SignClass::Double)
    }

    pub const fn is_signed(&self) -> bool {
        !matches!(self, SignClass::Unsigned)
    }
}

impl fmt::Display for SignClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
