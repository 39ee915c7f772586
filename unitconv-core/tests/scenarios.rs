use approx::assert_relative_eq;
use unitconv_core::units::{
    self, DistanceUnits, MassUnits, ReferenceAccelerationUnits, TemperatureUnits, TimeUnits, STANDARD_GRAVITY,
};
use unitconv_core::{
    AnyUnit, Catalog, CodegenOptions, GenerationError, Literal, Operation, Relation, Scalar, SignClass,
    UnitsConvertible,
};

// ─────────────────────────────────────────────────────────────────────────────
// Same-category conversions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn millimetres_to_centimetres() {
    let op = DistanceUnits::Millimetres
        .conversion(&DistanceUnits::Centimetres)
        .unwrap()
        .simplify();
    assert_eq!(op.to_string(), "mm / 10");
    assert_eq!(op.evaluate(250.0), 25.0);
}

#[test]
fn celsius_to_fahrenheit() {
    let op = TemperatureUnits::Celsius
        .conversion(&TemperatureUnits::Fahrenheit)
        .unwrap()
        .simplify();
    assert_eq!(op.evaluate(0.0), 32.0);
    assert_eq!(op.evaluate(100.0), 212.0);
}

#[test]
fn kelvin_to_celsius() {
    let op = TemperatureUnits::Kelvin
        .conversion(&TemperatureUnits::Celsius)
        .unwrap()
        .simplify();
    assert_relative_eq!(op.evaluate(273.15), 0.0);
}

#[test]
fn milligrams_to_kilograms_is_an_integer_division() {
    let op = MassUnits::Milligrams
        .conversion(&MassUnits::Kilograms)
        .unwrap()
        .simplify();
    match &op {
        Operation::Division(_, divisor) => {
            assert_eq!(**divisor, Operation::Literal(Literal::Integer(1_000_000)))
        }
        other => panic!("unexpected {other}"),
    }
    assert_eq!(op.evaluate(1_000_000.0), 1.0);
}

#[test]
fn renders_abbreviations() {
    let op = Operation::constant(DistanceUnits::Metres) / Operation::constant(TimeUnits::Seconds).pow(2);
    assert_eq!(op.abbreviation(), "m_per_s_sq");
    let op = Operation::one() / Operation::constant(TimeUnits::Seconds);
    assert_eq!(op.abbreviation(), "s_pwr_neg1");
}

#[test]
fn simplifier_identity_laws() {
    let x = Operation::constant(DistanceUnits::Metres) + Operation::literal(3);
    assert_eq!((x.clone() / x.clone()).simplify(), Operation::one());
    assert_eq!((x.clone() * Operation::one()).simplify(), x.simplify());
    assert_eq!((x.clone() + Operation::literal(0)).simplify(), x.simplify());
}

// ─────────────────────────────────────────────────────────────────────────────
// Relations
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn earth_gravity_round_trip() {
    let relations = units::relations().unwrap();
    let (there, back) = (&relations[0], &relations[1]);
    assert_eq!(there.operation().evaluate(1.0), STANDARD_GRAVITY);

    let composed = back
        .operation()
        .substitute(back.source(), there.operation())
        .simplify();
    assert_eq!(composed.evaluate(1.0), 1.0);
}

#[test]
fn relations_must_cross_categories() {
    let result = Relation::new(
        TimeUnits::Seconds,
        TimeUnits::Milliseconds,
        Operation::constant(TimeUnits::Seconds),
    );
    assert!(matches!(result, Err(GenerationError::SameCategoryRelation { .. })));
}

#[test]
fn cross_category_unit_conversion_fails() {
    let metres = AnyUnit::from(DistanceUnits::Metres);
    let earth_g = AnyUnit::from(ReferenceAccelerationUnits::EarthG);
    assert!(matches!(
        metres.conversion_to(&earth_g),
        Err(GenerationError::CategoryMismatch { .. })
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Generated functions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_builtin_function_clamps_at_the_extremes() {
    let catalog = Catalog::builtin().unwrap();
    catalog.validate().unwrap();
    let options = CodegenOptions::default();

    let mut functions = Vec::new();
    for category in catalog.categories() {
        functions.extend(category.functions().unwrap());
    }
    functions.extend(catalog.derived_relations().unwrap().iter().map(Relation::function));

    for function in &functions {
        for a in SignClass::ALL {
            for b in SignClass::ALL {
                let source = a.numeric_type();
                let target = b.numeric_type();
                for input in [Scalar::max_of(source), Scalar::min_of(source)] {
                    let value = function.evaluate(a, b, &options, &[input]).unwrap();
                    let inside = match (value, target.integer_limits()) {
                        (Scalar::Integer(v), Some((max, min))) => v >= min && v <= max,
                        (Scalar::Real(v), None) => v >= target.min_value() && v <= target.max_value(),
                        _ => false,
                    };
                    assert!(inside, "{} on {input:?} gave {value:?}", function.name(a, b));
                }
            }
        }
    }
}

#[test]
fn generated_names_are_unique() {
    let catalog = Catalog::builtin().unwrap();
    let mut names = std::collections::HashSet::new();
    for category in catalog.categories() {
        for function in category.functions().unwrap() {
            for a in SignClass::ALL {
                for b in SignClass::ALL {
                    assert!(names.insert(function.name(a, b)));
                }
            }
        }
    }
    for relation in catalog.derived_relations().unwrap() {
        assert!(names.insert(relation.function().name(SignClass::Double, SignClass::Double)));
    }
}
