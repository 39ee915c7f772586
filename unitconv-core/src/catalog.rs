//! The set of categories and relations a generation run works on.

use std::collections::HashSet;

use crate::composite::CompositeCategory;
use crate::error::{GenerationError, GenerationResult};
use crate::function::ConversionFunction;
use crate::relation::Relation;
use crate::unit::AnyUnit;
use crate::units;

/// A category, identified by any one of its units.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    representative: AnyUnit,
}

impl Category {
    pub fn new(representative: impl Into<AnyUnit>) -> Self {
        Self {
            representative: representative.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.representative.category()
    }

    pub fn units(&self) -> Vec<AnyUnit> {
        self.representative.all_cases()
    }

    pub fn is_composite(&self) -> bool {
        self.representative.is_composite()
    }

    /// One simplified function per ordered pair of units, identity pairs included.
    pub fn functions(&self) -> GenerationResult<Vec<ConversionFunction>> {
        let units = self.units();
        let mut functions = Vec::with_capacity(units.len() * units.len());
        for from in &units {
            for to in &units {
                let operation = from.conversion_to(to)?.simplify();
                functions.push(ConversionFunction::new(from.clone(), to.clone(), operation));
            }
        }
        Ok(functions)
    }
}

impl From<CompositeCategory> for Category {
    fn from(composite: CompositeCategory) -> Self {
        Category::new(composite.highest_precision())
    }
}

/// Categories plus the reference relations between them.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    relations: Vec<Relation>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>, relations: Vec<Relation>) -> Self {
        Self {
            categories,
            relations,
        }
    }

    /// Every leaf category, the built-in composites, and the built-in relations.
    pub fn builtin() -> GenerationResult<Self> {
        let categories = units::leaf_representatives()
            .into_iter()
            .map(Category::new)
            .chain(units::composites().into_iter().map(Category::from))
            .collect();
        Ok(Self::new(categories, units::relations()?))
    }

    pub fn add_category(&mut self, category: impl Into<Category>) {
        self.categories.push(category.into());
    }

    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name() == name)
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Every reference relation restated for every unit pair of its two categories.
    pub fn derived_relations(&self) -> GenerationResult<Vec<Relation>> {
        let mut derived = Vec::new();
        for relation in &self.relations {
            derived.extend(relation.derive_all()?);
        }
        Ok(derived)
    }

    /// Checks everything generation relies on, stopping at the first violation:
    ///
    /// - category names are pairwise distinct,
    /// - unit abbreviations and descriptions are unique across the catalog (they become C identifiers),
    /// - composite categories convert by leaf-wise scaling,
    /// - every ordered pair of units in every category has a conversion,
    /// - every relation derives.
    pub fn validate(&self) -> GenerationResult<()> {
        let mut names = HashSet::new();
        let mut abbreviations = HashSet::new();
        let mut descriptions = HashSet::new();

        for category in &self.categories {
            if !names.insert(category.name().to_string()) {
                return Err(GenerationError::DuplicateCategory(category.name().to_string()));
            }
            if let AnyUnit::Composite(unit) = &category.representative {
                unit.category().check_scalable()?;
            }
            for unit in category.units() {
                if !abbreviations.insert(unit.abbreviation()) {
                    return Err(duplicate(category, unit.abbreviation()));
                }
                if !descriptions.insert(unit.description()) {
                    return Err(duplicate(category, unit.description()));
                }
            }
            category.functions()?;
            log::debug!("validated category `{}`", category.name());
        }

        self.derived_relations()?;
        log::info!(
            "catalog holds {} categories and {} relations",
            self.categories.len(),
            self.relations.len()
        );
        Ok(())
    }
}

fn duplicate(category: &Category, name: String) -> GenerationError {
    GenerationError::DuplicateUnit {
        category: category.name().to_string(),
        name,
    }
}
