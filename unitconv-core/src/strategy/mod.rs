//! Same-category conversion derivation.
//!
//! A leaf category picks one of two policies: [`base10`] scaling for categories whose units differ by powers of ten,
//! or an explicit [`table`] of hand-written operations. Composite categories always use [`structural`] conversion,
//! which walks two members of the same shape in lock step and converts leaf by leaf.

pub mod base10;
pub mod structural;
pub mod table;

pub use base10::Base10;
pub use table::ConversionTable;
