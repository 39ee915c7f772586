//! Overflow-checked conversion-function synthesis.
//!
//! A [`ConversionFunction`] pairs a simplified operation with its source and target units and lowers it, for one
//! pair of sign classes, into C source text. The emitted body follows a fixed shape:
//!
//! 1. one `const` cast per parameter into the working type,
//! 2. an upper pre-check on the raw inputs, then a lower pre-check for signed inputs, each returning the target's
//!    bound,
//! 3. the expression, evaluated in the working type into `result`,
//! 4. upper then lower post-checks of `result` against the target's range,
//! 5. the final cast to the target type.
//!
//! The working type is `double` whenever either side is floating, the operation needs floating point, or the
//! operation is not integer-affine in a single parameter. Otherwise it is `uint64_t` when every input is unsigned and
//! nothing is subtracted, and `int64_t` in every remaining case. Integer pre-checks bound the input so that no
//! intermediate value can leave the working type; checks that cannot fire are not emitted. A pre-check may only
//! return the target's bound when every input it rejects converts beyond that bound. When that does not hold (an
//! affine shape such as `x * 9 / 5 + 32`, whose intermediate product overflows before the result does) the function
//! is evaluated in `double` instead.
//!
//! [`ConversionFunction::evaluate`] reproduces the emitted semantics in Rust so the clamping behaviour can be tested
//! without a C compiler.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::literal::Literal;
use crate::numeric::{NumericType, SignClass};
use crate::operation::{IntegerProfile, Operation};
use crate::options::CodegenOptions;
use crate::unit::AnyUnit;

/// C source text of one generated function.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratedFunction {
    pub name: String,
    pub comment: String,
    pub signature: String,
    /// Braced function body.
    pub body: String,
}

impl GeneratedFunction {
    pub fn declaration(&self) -> String {
        format!("{};", self.signature)
    }

    pub fn definition(&self) -> String {
        format!("{}\n{}\n{}", self.comment, self.signature, self.body)
    }
}

/// A value as seen by generated code: integer kinds are exact, floating kinds are `f64`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    Integer(i128),
    Real(f64),
}

impl Scalar {
    pub fn as_f64(&self) -> f64 {
        match self {
            Scalar::Integer(value) => *value as f64,
            Scalar::Real(value) => *value,
        }
    }

    /// Largest value of `numeric`.
    pub fn max_of(numeric: NumericType) -> Scalar {
        match numeric.integer_limits() {
            Some((max, _)) => Scalar::Integer(max),
            None => Scalar::Real(numeric.max_value()),
        }
    }

    /// Smallest value of `numeric`.
    pub fn min_of(numeric: NumericType) -> Scalar {
        match numeric.integer_limits() {
            Some((_, min)) => Scalar::Integer(min),
            None => Scalar::Real(numeric.min_value()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Planning
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Working {
    Integer(NumericType),
    Double,
}

impl Working {
    fn c_type(&self) -> &'static str {
        match self {
            Working::Integer(numeric) => numeric.c_type(),
            Working::Double => "double",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Comparison {
    Above,
    AtOrAbove,
    Below,
}

impl Comparison {
    fn symbol(&self) -> &'static str {
        match self {
            Comparison::Above => ">",
            Comparison::AtOrAbove => ">=",
            Comparison::Below => "<",
        }
    }

    fn holds(&self, value: Scalar, limit: Scalar) -> bool {
        let ordering = match (value, limit) {
            (Scalar::Integer(value), Scalar::Integer(limit)) => value.partial_cmp(&limit),
            (value, limit) => value.as_f64().partial_cmp(&limit.as_f64()),
        };
        match (self, ordering) {
            (Comparison::Above, Some(ordering)) => ordering.is_gt(),
            (Comparison::AtOrAbove, Some(ordering)) => ordering.is_ge(),
            (Comparison::Below, Some(ordering)) => ordering.is_lt(),
            (_, None) => false,
        }
    }
}

/// `subject <comparison> text`, with `limit` the numeric value of `text`.
#[derive(Clone, Debug)]
struct Condition {
    /// Parameter index, or `None` for `result`.
    subject: Option<usize>,
    comparison: Comparison,
    text: String,
    limit: Scalar,
}

#[derive(Clone, Debug)]
struct Parameter {
    unit: AnyUnit,
    sign: SignClass,
    numeric: NumericType,
    name: String,
    type_name: String,
}

impl Parameter {
    fn working_name(&self) -> String {
        format!("{}_w", self.name)
    }
}

#[derive(Clone, Debug)]
struct Plan {
    parameters: Vec<Parameter>,
    target: NumericType,
    target_type: String,
    working: Working,
    pre_upper: Vec<Condition>,
    pre_lower: Vec<Condition>,
    post_upper: Option<Condition>,
    post_lower: Option<Condition>,
}

/// A conversion from `source` to `target` through `operation`, whose unit leaves become the parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionFunction {
    source: AnyUnit,
    target: AnyUnit,
    operation: Operation,
}

impl ConversionFunction {
    pub fn new(source: AnyUnit, target: AnyUnit, operation: Operation) -> Self {
        Self {
            source,
            target,
            operation,
        }
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

    /// `<source>_<a>_to_<target>_<b>`.
    pub fn name(&self, a: SignClass, b: SignClass) -> String {
        format!(
            "{}_{}_to_{}_{}",
            self.source.abbreviation(),
            a,
            self.target.abbreviation(),
            b
        )
    }

    fn plan(&self, a: SignClass, b: SignClass, options: &CodegenOptions) -> Plan {
        let parameters: Vec<Parameter> = self
            .operation
            .units()
            .into_iter()
            .map(|unit| {
                let sign = self.bound_sign(&unit).unwrap_or(a);
                let numeric = options.bindings.numeric_type(unit.category(), sign);
                let name = unit.abbreviation();
                let type_name = format!("{name}_{sign}");
                Parameter {
                    unit,
                    sign,
                    numeric,
                    name,
                    type_name,
                }
            })
            .collect();
        let target = options.bindings.numeric_type(self.target.category(), b);
        let target_type = format!("{}_{}", self.target.abbreviation(), b);

        let profile = self.integer_profile(&parameters, b);
        let working = match profile {
            Some(profile) => {
                let unsigned = parameters.iter().all(|p| !p.numeric.is_signed());
                if unsigned && !profile.subtracts {
                    Working::Integer(NumericType::UInt64)
                } else {
                    Working::Integer(NumericType::Int64)
                }
            }
            None => Working::Double,
        };

        let mut plan = Plan {
            parameters,
            target,
            target_type,
            working,
            pre_upper: Vec::new(),
            pre_lower: Vec::new(),
            post_upper: None,
            post_lower: None,
        };
        if let (Working::Integer(numeric), Some(profile)) = (working, profile) {
            plan.integer_checks(numeric, profile);
            if plan.pre_checks_are_exact(&self.operation) {
                return plan;
            }
            log::trace!("{}: integer pre-checks would clamp in-range values, using double", self.name(a, b));
            plan.working = Working::Double;
            plan.pre_upper.clear();
            plan.pre_lower.clear();
        }
        plan.double_checks();
        plan
    }

    fn bound_sign(&self, unit: &AnyUnit) -> Option<SignClass> {
        fn find(op: &Operation, unit: &AnyUnit) -> Option<SignClass> {
            match op {
                Operation::Constant { unit: leaf, sign } if leaf == unit => *sign,
                Operation::Constant { .. } | Operation::Literal(_) => None,
                Operation::Multiplication(lhs, rhs)
                | Operation::Division(lhs, rhs)
                | Operation::Addition(lhs, rhs)
                | Operation::Subtraction(lhs, rhs)
                | Operation::Exponentiate {
                    base: lhs,
                    power: rhs,
                } => find(lhs, unit).or_else(|| find(rhs, unit)),
                Operation::Precedence(inner) => find(inner, unit),
            }
        }
        find(&self.operation, unit)
    }

    /// The affine profile when the function can run in an integer working type.
    fn integer_profile(&self, parameters: &[Parameter], b: SignClass) -> Option<IntegerProfile> {
        let floating = b.is_float() || parameters.iter().any(|p| p.sign.is_float() || p.numeric.is_float());
        if floating || self.operation.requires_float() {
            return None;
        }
        let profile = self.operation.integer_profile()?;
        let representable = |value: i128| i64::try_from(value).is_ok();
        (representable(profile.gain) && representable(profile.offset)).then_some(profile)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Emission
    // ─────────────────────────────────────────────────────────────────────────

    /// Complete function for sign classes `a` (inputs) and `b` (output).
    pub fn implementation(&self, a: SignClass, b: SignClass, options: &CodegenOptions) -> GeneratedFunction {
        let plan = self.plan(a, b, options);
        let name = self.name(a, b);
        let comment = format!(
            "/* Converts {} ({}) to {} ({}). */",
            self.source.description(),
            a.description(),
            self.target.description(),
            b.description()
        );
        let arguments: Vec<String> = plan
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_name, p.name))
            .collect();
        let signature = format!("{} {}({})", plan.target_type, name, arguments.join(", "));

        let working_type = plan.working.c_type();
        let mut body = String::from("{\n");
        for p in &plan.parameters {
            body.push_str(&format!(
                "    const {working_type} {} = (({working_type}) ({}));\n",
                p.working_name(),
                p.name
            ));
        }

        let target_max = format!("(({}) ({}))", plan.target_type, plan.target.max_text());
        let target_min = format!("(({}) ({}))", plan.target_type, plan.target.min_text());
        push_guard(&mut body, &plan, &plan.pre_upper, &target_max, options);
        push_guard(&mut body, &plan, &plan.pre_lower, &target_min, options);

        let names = |unit: &AnyUnit| format!("{}_w", unit.abbreviation());
        let expression = match plan.working {
            Working::Integer(_) => self.operation.c_code(&names),
            Working::Double => self.operation.double_code(&names),
        };
        body.push_str(&format!("    const {working_type} result = {expression};\n"));

        push_guard(&mut body, &plan, plan.post_upper.as_slice(), &target_max, options);
        push_guard(&mut body, &plan, plan.post_lower.as_slice(), &target_min, options);
        body.push_str(&format!("    return (({}) (result));\n}}\n", plan.target_type));

        GeneratedFunction {
            name,
            comment,
            signature,
            body,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reference semantics
    // ─────────────────────────────────────────────────────────────────────────

    /// The value the generated function returns for `inputs`, one per parameter in [`Operation::units`] order.
    ///
    /// Returns `None` when the number of inputs does not match the parameters.
    pub fn evaluate(&self, a: SignClass, b: SignClass, options: &CodegenOptions, inputs: &[Scalar]) -> Option<Scalar> {
        let plan = self.plan(a, b, options);
        if inputs.len() != plan.parameters.len() {
            return None;
        }

        let subject = |condition: &Condition, result: Option<Scalar>| match condition.subject {
            Some(index) => Some(inputs[index]),
            None => result,
        };
        let fires = |conditions: &[Condition], result: Option<Scalar>| {
            conditions.iter().any(|condition| {
                subject(condition, result).is_some_and(|value| condition.comparison.holds(value, condition.limit))
            })
        };

        if fires(&plan.pre_upper, None) {
            return Some(Scalar::max_of(plan.target));
        }
        if fires(&plan.pre_lower, None) {
            return Some(Scalar::min_of(plan.target));
        }

        let result = match plan.working {
            Working::Integer(_) => {
                let value = match inputs[0] {
                    Scalar::Integer(value) => value,
                    Scalar::Real(value) => value as i128,
                };
                Scalar::Integer(evaluate_integer(&self.operation, value)?)
            }
            Working::Double => {
                let bindings: HashMap<AnyUnit, f64> = plan
                    .parameters
                    .iter()
                    .zip(inputs)
                    .map(|(p, input)| (p.unit.clone(), input.as_f64()))
                    .collect();
                Scalar::Real(self.operation.evaluate_with(&bindings).ok()?)
            }
        };

        if fires(plan.post_upper.as_slice(), Some(result)) {
            return Some(Scalar::max_of(plan.target));
        }
        if fires(plan.post_lower.as_slice(), Some(result)) {
            return Some(Scalar::min_of(plan.target));
        }

        Some(match (result, plan.target) {
            (Scalar::Integer(value), _) => Scalar::Integer(value),
            (Scalar::Real(value), NumericType::Float) => Scalar::Real(value as f32 as f64),
            (Scalar::Real(value), NumericType::Double) => Scalar::Real(value),
            (Scalar::Real(value), _) => Scalar::Integer(value.trunc() as i128),
        })
    }
}

impl Plan {
    /// Pre-checks keep `gain * x ± offset` inside the working type; post-checks only where the working range
    /// exceeds the target's.
    fn integer_checks(&mut self, working: NumericType, profile: IntegerProfile) {
        let Some((w_max, w_min)) = working.integer_limits() else {
            return;
        };
        let IntegerProfile { gain, offset, .. } = profile;

        if gain > 0 {
            for (index, p) in self.parameters.iter().enumerate() {
                let Some((s_max, s_min)) = p.numeric.integer_limits() else {
                    continue;
                };
                let upper = (w_max - offset) / gain;
                if s_max > upper {
                    self.pre_upper.push(Condition {
                        subject: Some(index),
                        comparison: Comparison::Above,
                        text: scaled_bound(working.max_text(), '-', offset, gain),
                        limit: Scalar::Integer(upper),
                    });
                }
                let lower = (w_min + offset) / gain;
                if p.numeric.is_signed() && s_min < lower {
                    self.pre_lower.push(Condition {
                        subject: Some(index),
                        comparison: Comparison::Below,
                        text: scaled_bound(working.min_text(), '+', offset, gain),
                        limit: Scalar::Integer(lower),
                    });
                }
            }
        }

        if let Some((t_max, t_min)) = self.target.integer_limits() {
            if w_max > t_max {
                self.post_upper = Some(Condition {
                    subject: None,
                    comparison: Comparison::Above,
                    text: self.target.max_text().to_string(),
                    limit: Scalar::Integer(t_max),
                });
            }
            if w_min < t_min {
                self.post_lower = Some(Condition {
                    subject: None,
                    comparison: Comparison::Below,
                    text: self.target.min_text().to_string(),
                    limit: Scalar::Integer(t_min),
                });
            }
        }
    }

    /// Whether every input rejected by a pre-check really converts beyond the target's range, so that returning the
    /// target's bound is the exact saturated result. Affine profiles are non-decreasing in their parameter, so
    /// checking the first rejected input on each side covers the rest.
    fn pre_checks_are_exact(&self, operation: &Operation) -> bool {
        let Some((t_max, t_min)) = self.target.integer_limits() else {
            return false;
        };
        // `None` means the exact value left i128, far beyond any target
        let beyond = |condition: &Condition, step: i128, exceeds: &dyn Fn(i128) -> bool| match condition.limit {
            Scalar::Integer(limit) => evaluate_integer(operation, limit + step).map_or(true, exceeds),
            Scalar::Real(_) => false,
        };
        self.pre_upper.iter().all(|c| beyond(c, 1, &|value| value >= t_max))
            && self.pre_lower.iter().all(|c| beyond(c, -1, &|value| value <= t_min))
    }

    /// Floating inputs are checked against their own range (catching infinities); the result is always checked
    /// against the target's range.
    fn double_checks(&mut self) {
        for (index, p) in self.parameters.iter().enumerate() {
            if !p.numeric.is_float() {
                continue;
            }
            self.pre_upper.push(Condition {
                subject: Some(index),
                comparison: Comparison::Above,
                text: p.numeric.max_text().to_string(),
                limit: Scalar::Real(p.numeric.max_value()),
            });
            self.pre_lower.push(Condition {
                subject: Some(index),
                comparison: Comparison::Below,
                text: p.numeric.min_text().to_string(),
                limit: Scalar::Real(p.numeric.min_value()),
            });
        }

        let target = self.target;
        let (max_text, min_text) = if target.is_float() {
            (target.max_text().to_string(), target.min_text().to_string())
        } else {
            let min = if target.is_signed() {
                format!("((double) {})", target.min_text())
            } else {
                "0.0".to_string()
            };
            (format!("((double) {})", target.max_text()), min)
        };
        self.post_upper = Some(Condition {
            subject: None,
            comparison: if target.max_exact_in_double() {
                Comparison::Above
            } else {
                Comparison::AtOrAbove
            },
            text: max_text,
            limit: Scalar::Real(target.max_value()),
        });
        self.post_lower = Some(Condition {
            subject: None,
            comparison: Comparison::Below,
            text: min_text,
            limit: Scalar::Real(target.min_value()),
        });
    }
}

/// `(BOUND ∓ offset) / gain` as C text.
fn scaled_bound(bound: &str, sign: char, offset: i128, gain: i128) -> String {
    let numerator = if offset == 0 {
        bound.to_string()
    } else {
        format!("({bound} {sign} {offset})")
    };
    if gain == 1 {
        numerator
    } else {
        format!("{numerator} / {gain}")
    }
}

fn push_guard(body: &mut String, plan: &Plan, conditions: &[Condition], value: &str, options: &CodegenOptions) {
    if conditions.is_empty() {
        return;
    }
    let tests: Vec<String> = conditions
        .iter()
        .map(|condition| {
            let subject = match condition.subject {
                Some(index) => plan.parameters[index].name.as_str(),
                None => "result",
            };
            format!("{subject} {} {}", condition.comparison.symbol(), condition.text)
        })
        .collect();
    let test = tests.join(" || ");
    let test = if options.branch_hints {
        format!("__builtin_expect({test}, 0)")
    } else {
        test
    };
    body.push_str(&format!("    if ({test}) {{\n        return {value};\n    }}\n"));
}

/// Integer evaluation with C's truncating division. `None` on anything non-integral.
fn evaluate_integer(op: &Operation, value: i128) -> Option<i128> {
    match op {
        Operation::Constant { .. } => Some(value),
        Operation::Literal(Literal::Integer(literal)) => Some(i128::from(*literal)),
        Operation::Literal(Literal::Decimal(_)) | Operation::Exponentiate { .. } => None,
        Operation::Multiplication(lhs, rhs) => evaluate_integer(lhs, value)?.checked_mul(evaluate_integer(rhs, value)?),
        Operation::Division(lhs, rhs) => evaluate_integer(lhs, value)?.checked_div(evaluate_integer(rhs, value)?),
        Operation::Addition(lhs, rhs) => evaluate_integer(lhs, value)?.checked_add(evaluate_integer(rhs, value)?),
        Operation::Subtraction(lhs, rhs) => evaluate_integer(lhs, value)?.checked_sub(evaluate_integer(rhs, value)?),
        Operation::Precedence(inner) => evaluate_integer(inner, value),
    }
}
