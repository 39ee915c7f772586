//! Hand-written cross-category relations.
//!
//! Earth gravity cannot be expressed as a power-of-ten multiple of any SI acceleration, so it is related to `mps2`
//! once in each direction and [`crate::Relation::derive_all`] fans it out to every acceleration unit.

use super::{acceleration, metres_per_second_squared, ReferenceAccelerationUnits, STANDARD_GRAVITY};
use crate::error::GenerationResult;
use crate::operation::Operation;
use crate::relation::Relation;
use crate::unit::AnyUnit;

/// The reference relations of the catalog, before derivation.
pub fn relations() -> GenerationResult<Vec<Relation>> {
    let mps2: AnyUnit = acceleration().unit(metres_per_second_squared())?.into();
    let earth_g = ReferenceAccelerationUnits::EarthG;

    Ok(vec![
        Relation::new(
            earth_g,
            mps2.clone(),
            Operation::constant(earth_g) * Operation::decimal(STANDARD_GRAVITY),
        )?,
        Relation::new(
            mps2.clone(),
            earth_g,
            Operation::constant(mps2) / Operation::decimal(STANDARD_GRAVITY),
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_gravity_both_ways() {
        let relations = relations().unwrap();
        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].source().abbreviation(), "earthG");
        assert_eq!(relations[0].target().abbreviation(), "mps2");
        assert_eq!(relations[0].operation().evaluate(1.0), STANDARD_GRAVITY);
        assert_eq!(relations[1].operation().evaluate(STANDARD_GRAVITY), 1.0);
    }
}
