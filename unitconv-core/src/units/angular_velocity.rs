//! Angular velocity, `angle / time`.

use once_cell::sync::Lazy;

use super::{AngleUnits, TimeUnits};
use crate::composite::CompositeCategory;
use crate::operation::Operation;

static ANGULAR_VELOCITY: Lazy<CompositeCategory> = Lazy::new(|| {
    let base = Operation::constant(AngleUnits::Degrees) / Operation::constant(TimeUnits::Microseconds);
    CompositeCategory::declare("angular_velocity", base, Vec::new())
});

pub fn angular_velocity() -> CompositeCategory {
    ANGULAR_VELOCITY.clone()
}
