//! Categories whose units are derived algebraically from other categories' units.
//!
//! A [`CompositeCategory`] is declared by a base operation such as `distance / time ^ 2`. Its members are every
//! concrete operation obtained by picking a unit for each leaf, and conversions between members scale leaf by leaf
//! (see [`crate::strategy::structural`]). For that to be sound the base must be multiplicative and every leaf
//! category must share a zero point.

mod parse;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{GenerationError, GenerationResult};
use crate::operation::Operation;
use crate::strategy::structural;
use crate::unit::{AnyUnit, UnitsConvertible};

/// A name override for one concrete shape of a composite category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedUnit {
    pub shape: Operation,
    pub abbreviation: String,
    pub description: String,
}

impl NamedUnit {
    pub fn new(shape: Operation, abbreviation: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            shape,
            abbreviation: abbreviation.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
struct Declaration {
    name: String,
    base_unit: Operation,
    named_units: Vec<NamedUnit>,
}

/// Handle to a composite category declaration. Cloning is cheap and clones compare equal.
#[derive(Clone, Debug)]
pub struct CompositeCategory {
    declaration: Arc<Declaration>,
}

impl CompositeCategory {
    /// Declares a composite category, checking that leaf-wise scaling can convert between its members.
    pub fn new(name: impl Into<String>, base_unit: Operation) -> GenerationResult<Self> {
        Self::with_named_units(name, base_unit, Vec::new())
    }

    pub fn with_named_units(
        name: impl Into<String>,
        base_unit: Operation,
        named_units: Vec<NamedUnit>,
    ) -> GenerationResult<Self> {
        let category = Self::declare(name, base_unit, named_units);
        category.check_scalable()?;
        Ok(category)
    }

    /// Parses a base expression over leaf category names, e.g. `distance / time ^ 2`.
    ///
    /// Every identifier stands for its category's highest-precision unit.
    pub fn parse(name: impl Into<String>, expression: &str) -> GenerationResult<Self> {
        let base_unit = parse::parse_base(expression)?;
        Self::new(name, base_unit)
    }

    /// Declaration without the scalability check, for the built-in catalog which is validated as a whole.
    pub(crate) fn declare(name: impl Into<String>, base_unit: Operation, named_units: Vec<NamedUnit>) -> Self {
        Self {
            declaration: Arc::new(Declaration {
                name: name.into(),
                base_unit,
                named_units,
            }),
        }
    }

    /// Fails when the base has no unit leaf, adds or subtracts, raises to a non-integer power, or uses a leaf
    /// category whose units disagree on zero.
    pub fn check_scalable(&self) -> GenerationResult<()> {
        let base = self.base_unit();
        let scalable = !base.units().is_empty()
            && structural::is_scalable(base)
            && base.units().iter().all(AnyUnit::same_zero_point);
        if scalable {
            Ok(())
        } else {
            Err(GenerationError::NonScalableComposite {
                category: self.name().to_string(),
            })
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    pub fn base_unit(&self) -> &Operation {
        &self.declaration.base_unit
    }

    pub fn named_units(&self) -> &[NamedUnit] {
        &self.declaration.named_units
    }

    pub fn named_unit(&self, shape: &Operation) -> Option<&NamedUnit> {
        self.declaration.named_units.iter().find(|named| named.shape == *shape)
    }

    /// Every member: the cartesian product of the leaf categories' units.
    pub fn all_cases(&self) -> Vec<CompositeUnit> {
        self.base_unit()
            .all_cases()
            .into_iter()
            .map(|operation| CompositeUnit {
                category: self.clone(),
                operation,
            })
            .collect()
    }

    /// The member built from every leaf's highest-precision unit.
    pub fn highest_precision(&self) -> CompositeUnit {
        let finest: HashMap<AnyUnit, Operation> = self
            .base_unit()
            .units()
            .into_iter()
            .map(|unit| {
                let finest = Operation::constant(unit.highest_precision());
                (unit, finest)
            })
            .collect();
        CompositeUnit {
            category: self.clone(),
            operation: self.base_unit().replace(&finest),
        }
    }

    /// The member with the given concrete shape.
    pub fn unit(&self, operation: Operation) -> GenerationResult<CompositeUnit> {
        if !structural::same_shape(self.base_unit(), &operation) {
            return Err(GenerationError::ShapeMismatch {
                from: self.base_unit().abbreviation(),
                to: operation.abbreviation(),
            });
        }
        Ok(CompositeUnit {
            category: self.clone(),
            operation,
        })
    }
}

impl PartialEq for CompositeCategory {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.declaration, &other.declaration)
            || (self.name() == other.name() && self.base_unit() == other.base_unit())
    }
}

impl Eq for CompositeCategory {}

/// One concrete member of a composite category.
#[derive(Clone, Debug)]
pub struct CompositeUnit {
    category: CompositeCategory,
    operation: Operation,
}

impl CompositeUnit {
    pub fn category(&self) -> &CompositeCategory {
        &self.category
    }

    pub fn category_name(&self) -> &str {
        self.category.name()
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn abbreviation(&self) -> String {
        match self.category.named_unit(&self.operation) {
            Some(named) => named.abbreviation.clone(),
            None => self.operation.abbreviation(),
        }
    }

    pub fn description(&self) -> String {
        match self.category.named_unit(&self.operation) {
            Some(named) => named.description.clone(),
            None => self.operation.description(),
        }
    }

    pub fn same_zero_point(&self) -> bool {
        self.operation.units().iter().all(AnyUnit::same_zero_point)
    }

    pub fn all_cases(&self) -> Vec<CompositeUnit> {
        self.category.all_cases()
    }

    pub fn highest_precision(&self) -> CompositeUnit {
        self.category.highest_precision()
    }
}

impl UnitsConvertible for CompositeUnit {
    fn conversion(&self, to: &Self) -> GenerationResult<Operation> {
        structural::convert(&self.operation, &to.operation, Operation::constant(self.clone()))
    }
}
