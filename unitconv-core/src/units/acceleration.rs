//! Linear acceleration, `distance / time ^ 2`.

use once_cell::sync::Lazy;

use super::{DistanceUnits, TimeUnits};
use crate::composite::{CompositeCategory, NamedUnit};
use crate::operation::Operation;

static ACCELERATION: Lazy<CompositeCategory> = Lazy::new(|| {
    let base = Operation::constant(DistanceUnits::Micrometres) / Operation::constant(TimeUnits::Microseconds).pow(2);
    let mps2 = NamedUnit::new(metres_per_second_squared(), "mps2", "metres per second squared");
    CompositeCategory::declare("acceleration", base, vec![mps2])
});

pub fn acceleration() -> CompositeCategory {
    ACCELERATION.clone()
}

/// `m / s²`, the SI member.
pub fn metres_per_second_squared() -> Operation {
    Operation::constant(DistanceUnits::Metres) / Operation::constant(TimeUnits::Seconds).pow(2)
}
