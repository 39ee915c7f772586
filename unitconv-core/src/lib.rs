//! Symbolic conversion-expression compiler for overflow-safe unit conversions.
//!
//! `unitconv-core` derives, simplifies and lowers unit conversions into C source text:
//!
//! - A *unit* belongs to a *category* (distance, temperature, velocity, …). Leaf categories are enums deriving
//!   [`UnitCategory`]; composite categories ([`CompositeCategory`]) are built algebraically from leaf categories.
//! - A conversion is an [`Operation`] tree over unit leaves and [`Literal`]s. [`Operation::simplify`] reduces it to
//!   a canonical form, which also determines the generated names.
//! - Same-category conversions come from one of the [`strategy`] policies. Cross-category conversions are
//!   [`Relation`]s, written once and derived for every unit pair.
//! - [`ConversionFunction`] lowers a simplified operation, for a pair of [`SignClass`]es, into a function that clamps
//!   to the target's range instead of overflowing.
//!
//! Most users should depend on `unitconv` (the facade crate), which adds configuration and file output.
//!
//! # Quick start
//!
//! ```rust
//! use unitconv_core::units::DistanceUnits;
//! use unitconv_core::{CodegenOptions, SignClass, UnitsConvertible};
//!
//! let op = DistanceUnits::Millimetres.conversion(&DistanceUnits::Centimetres).unwrap();
//! assert_eq!(op.evaluate(250.0), 25.0);
//!
//! let function = unitconv_core::ConversionFunction::new(
//!     DistanceUnits::Millimetres.into(),
//!     DistanceUnits::Centimetres.into(),
//!     op.simplify(),
//! );
//! let generated = function.implementation(SignClass::Truncating, SignClass::Unsigned, &CodegenOptions::default());
//! assert_eq!(generated.name, "mm_t_to_cm_u");
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`NumericType`], [`SignClass`] and [`GeneratedFunction`].
//!
//! # Panics and errors
//!
//! Fallible operations return [`GenerationResult`]. Comparing numeric kinds of different sign classes with
//! [`NumericType::smaller_than`] is a programming error and panics.

#![forbid(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

mod catalog;
mod composite;
mod error;
mod function;
mod literal;
mod numeric;
mod operation;
mod options;
mod relation;
mod unit;

pub mod strategy;

// ─────────────────────────────────────────────────────────────────────────────
// Public re-exports of core types
// ─────────────────────────────────────────────────────────────────────────────

pub use catalog::{Catalog, Category};
pub use composite::{CompositeCategory, CompositeUnit, NamedUnit};
pub use error::{GenerationError, GenerationResult};
pub use function::{ConversionFunction, GeneratedFunction, Scalar};
pub use literal::Literal;
pub use numeric::{NumericType, SignClass};
pub use operation::{IntegerProfile, Operation};
pub use options::{CodegenOptions, NumericBindings};
pub use relation::Relation;
pub use unit::{AnyUnit, UnitCategory, UnitsConvertible};

// ─────────────────────────────────────────────────────────────────────────────
// Built-in catalog
// ─────────────────────────────────────────────────────────────────────────────

pub mod units;

pub use units::{angle, distance, mass, reference_acceleration, temperature, time};
