//! Conversions between units of different categories.
//!
//! A relation is written once, between one reference unit on each side (`earthG → mps2`). [`Relation::derive_all`]
//! propagates it to every pair of units of the two categories by composing the hand-written operation with the
//! same-category conversions into and out of the reference units.

use crate::error::{GenerationError, GenerationResult};
use crate::function::{ConversionFunction, GeneratedFunction};
use crate::numeric::SignClass;
use crate::operation::Operation;
use crate::options::CodegenOptions;
use crate::unit::AnyUnit;

/// A cross-category conversion from `source` to `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
    source: AnyUnit,
    target: AnyUnit,
    operation: Operation,
}

impl Relation {
    /// `operation` re-expresses a value in `source` as a value in `target`; its unit leaves must come from the
    /// source category.
    pub fn new(source: impl Into<AnyUnit>, target: impl Into<AnyUnit>, operation: Operation) -> GenerationResult<Self> {
        let (source, target) = (source.into(), target.into());
        if source.category() == target.category() {
            return Err(GenerationError::SameCategoryRelation {
                category: source.category().to_string(),
            });
        }
        if let Some(stray) = operation.units().into_iter().find(|unit| unit.category() != source.category()) {
            return Err(GenerationError::CategoryMismatch {
                expected: source.category().to_string(),
                found: stray.category().to_string(),
                unit: stray.abbreviation(),
            });
        }
        Ok(Self {
            source,
            target,
            operation,
        })
    }

    pub fn source(&self) -> &AnyUnit {
        &self.source
    }

    pub fn target(&self) -> &AnyUnit {
        &self.target
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn function(&self) -> ConversionFunction {
        ConversionFunction::new(self.source.clone(), self.target.clone(), self.operation.clone())
    }

    pub fn implementation(&self, a: SignClass, b: SignClass, options: &CodegenOptions) -> GeneratedFunction {
        self.function().implementation(a, b, options)
    }

    /// The relation restated for every `(source unit, target unit)` pair of the two categories.
    ///
    /// For a source unit `s` and target unit `t`, the derived operation converts `s` into the reference source,
    /// applies this relation, then converts the reference target into `t`. Every result is simplified.
    pub fn derive_all(&self) -> GenerationResult<Vec<Relation>> {
        let sources = self.source.all_cases();
        let targets = self.target.all_cases();
        let mut derived = Vec::with_capacity(sources.len() * targets.len());

        for source in &sources {
            let to_reference = source.conversion_to(&self.source)?;
            let in_source = self.operation.substitute(&self.source, &to_reference);
            for target in &targets {
                let from_reference = self.target.conversion_to(target)?;
                let operation = from_reference.substitute(&self.target, &in_source).simplify();
                derived.push(Relation {
                    source: source.clone(),
                    target: target.clone(),
                    operation,
                });
            }
        }

        log::debug!(
            "derived {} relations from {} -> {}",
            derived.len(),
            self.source,
            self.target
        );
        Ok(derived)
    }
}
