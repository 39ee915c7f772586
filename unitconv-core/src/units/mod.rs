//! The built-in category catalog.
//!
//! ## Leaf categories
//!
//! - [`distance`], [`time`], [`mass`]: base-10 categories, converted by exact integer scaling.
//! - [`temperature`]: affine scales with an explicit table; units disagree on zero.
//! - [`angle`]: degrees and radians through an explicit table.
//! - [`reference_acceleration`]: accelerations relative to a reference body, reachable from SI only through
//!   [`relations`].
//!
//! ## Composite categories
//!
//! - [`velocity()`]: `distance / time`.
//! - [`angular_velocity()`]: `angle / time`.
//! - [`acceleration()`]: `distance / time ^ 2`, naming `m / s²` as `mps2`.

pub mod acceleration;
pub mod angle;
pub mod angular_velocity;
pub mod distance;
pub mod mass;
pub mod reference_acceleration;
pub mod relations;
pub mod temperature;
pub mod time;
pub mod velocity;

pub use acceleration::{acceleration, metres_per_second_squared};
pub use angle::AngleUnits;
pub use angular_velocity::angular_velocity;
pub use distance::DistanceUnits;
pub use mass::MassUnits;
pub use reference_acceleration::{ReferenceAccelerationUnits, STANDARD_GRAVITY};
pub use relations::relations;
pub use temperature::TemperatureUnits;
pub use time::TimeUnits;
pub use velocity::velocity;

use crate::composite::CompositeCategory;
use crate::unit::{AnyUnit, UnitCategory};

fn representative<T: UnitCategory>() -> AnyUnit {
    T::HIGHEST_PRECISION.into()
}

/// The highest-precision unit of every leaf category, in catalog order.
pub fn leaf_representatives() -> Vec<AnyUnit> {
    vec![
        representative::<DistanceUnits>(),
        representative::<TimeUnits>(),
        representative::<MassUnits>(),
        representative::<TemperatureUnits>(),
        representative::<AngleUnits>(),
        representative::<ReferenceAccelerationUnits>(),
    ]
}

/// The highest-precision unit of the leaf category named `category`.
pub fn leaf_representative(category: &str) -> Option<AnyUnit> {
    leaf_representatives()
        .into_iter()
        .find(|unit| unit.category() == category)
}

/// Every built-in composite category, in catalog order.
pub fn composites() -> Vec<CompositeCategory> {
    vec![velocity(), angular_velocity(), acceleration()]
}
