//! Linear velocity, `distance / time`.

use once_cell::sync::Lazy;

use super::{DistanceUnits, TimeUnits};
use crate::composite::CompositeCategory;
use crate::operation::Operation;

static VELOCITY: Lazy<CompositeCategory> = Lazy::new(|| {
    let base = Operation::constant(DistanceUnits::Micrometres) / Operation::constant(TimeUnits::Microseconds);
    CompositeCategory::declare("velocity", base, Vec::new())
});

pub fn velocity() -> CompositeCategory {
    VELOCITY.clone()
}
