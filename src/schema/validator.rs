//! Coercing validator: raw JSON values in, ordered records out
//!
//! Walk semantics:
//! - Fields are visited in schema order
//! - Absent required field without a default -> missing problem
//! - Absent field with a default -> default inserted as declared
//! - Absent optional field -> omitted from the record
//! - Explicit JSON null is treated as absent
//! - Problems are collected across all fields into one aggregate error
//!
//! Coercion:
//! - string accepts JSON strings only
//! - integer accepts JSON integers and i64-parseable strings
//! - boolean accepts JSON booleans and "true"/"false"/"1"/"0"
//! - enum accepts declared raw strings only
//! - object recurses; nested problems carry dotted paths
//!
//! Undeclared input fields are ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::errors::{Problem, ProblemKind, ValidationError, ValidationResult};
use super::types::{Constraints, FieldKind, FieldSpec, ObjectSchema, Record, ValueFormat};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Validates a raw JSON value against an object schema.
///
/// Returns an ordered record on success, or the aggregate of every
/// field problem found. Pure function: no I/O, no shared state.
pub fn validate(raw: &Value, schema: &ObjectSchema) -> ValidationResult<Record> {
    let obj = match raw.as_object() {
        Some(obj) => obj,
        None => {
            return Err(ValidationError::new(vec![type_problem(&[], "object", raw)]));
        }
    };

    let mut problems = Vec::new();
    let record = validate_fields(obj, schema, &[], &mut problems);

    if problems.is_empty() {
        Ok(record)
    } else {
        Err(ValidationError::new(problems))
    }
}

/// Walks an object's declared fields in schema order.
fn validate_fields(
    obj: &serde_json::Map<String, Value>,
    schema: &ObjectSchema,
    path: &[String],
    problems: &mut Vec<Problem>,
) -> Record {
    let mut record = Record::new();

    for field in &schema.fields {
        let field_path = child_path(path, &field.name);

        // Explicit null is treated as absent
        let value = obj.get(&field.name).filter(|v| !v.is_null());

        match value {
            Some(value) => {
                if let Some(coerced) = validate_value(value, field, &field_path, problems) {
                    record.insert(field.name.clone(), coerced);
                }
            }
            None => {
                if let Some(default) = &field.default {
                    // Defaults are declared data and are not re-checked
                    record.insert(field.name.clone(), default.clone());
                } else if field.required {
                    problems.push(Problem::new(field_path, ProblemKind::Missing, None));
                }
            }
        }
    }

    record
}

/// Coerces a present value to its declared kind and checks constraints.
///
/// Returns the coerced value, or None after pushing the field's first
/// failing problem (nested objects may push several).
fn validate_value(
    value: &Value,
    field: &FieldSpec,
    path: &[String],
    problems: &mut Vec<Problem>,
) -> Option<Value> {
    let coerced = match &field.kind {
        FieldKind::String => match value.as_str() {
            Some(s) => Value::String(s.to_owned()),
            None => {
                problems.push(type_problem(path, field.kind.kind_name(), value));
                return None;
            }
        },
        FieldKind::Integer => match coerce_integer(value) {
            Some(n) => Value::from(n),
            None => {
                problems.push(type_problem(path, field.kind.kind_name(), value));
                return None;
            }
        },
        FieldKind::Boolean => match coerce_boolean(value) {
            Some(b) => Value::Bool(b),
            None => {
                problems.push(type_problem(path, field.kind.kind_name(), value));
                return None;
            }
        },
        FieldKind::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.accepts(s) => Value::String(s.to_owned()),
            _ => {
                problems.push(Problem::new(
                    path.to_vec(),
                    ProblemKind::NotInEnum {
                        allowed: allowed.values.clone(),
                    },
                    Some(value.clone()),
                ));
                return None;
            }
        },
        FieldKind::Object(nested) => {
            let obj = match value.as_object() {
                Some(obj) => obj,
                None => {
                    problems.push(type_problem(path, field.kind.kind_name(), value));
                    return None;
                }
            };
            let before = problems.len();
            let nested_record = validate_fields(obj, nested, path, problems);
            if problems.len() > before {
                return None;
            }
            return Some(nested_record.into_value());
        }
    };

    if let Some(problem) = constraint_problem(&coerced, &field.constraints, path) {
        problems.push(problem);
        return None;
    }

    Some(coerced)
}

/// Returns the first failing constraint for a coerced value, if any.
///
/// Check order: length bounds, string format, numeric bounds.
fn constraint_problem(value: &Value, constraints: &Constraints, path: &[String]) -> Option<Problem> {
    if let Some(s) = value.as_str() {
        let chars = s.chars().count();

        if let Some(min) = constraints.min_length {
            if chars < min {
                return Some(Problem::new(
                    path.to_vec(),
                    ProblemKind::TooShort { min_length: min },
                    Some(value.clone()),
                ));
            }
        }
        if let Some(max) = constraints.max_length {
            if chars > max {
                return Some(Problem::new(
                    path.to_vec(),
                    ProblemKind::TooLong { max_length: max },
                    Some(value.clone()),
                ));
            }
        }
        if let Some(format) = constraints.format {
            if !matches_format(format, s) {
                return Some(Problem::new(
                    path.to_vec(),
                    ProblemKind::BadFormat {
                        format: format.name(),
                    },
                    Some(value.clone()),
                ));
            }
        }
    }

    if let Some(n) = value.as_i64() {
        if let Some(gt) = constraints.gt {
            if n <= gt {
                return Some(Problem::new(
                    path.to_vec(),
                    ProblemKind::NotGreaterThan { gt },
                    Some(value.clone()),
                ));
            }
        }
        if let Some(lt) = constraints.lt {
            if n >= lt {
                return Some(Problem::new(
                    path.to_vec(),
                    ProblemKind::NotLessThan { lt },
                    Some(value.clone()),
                ));
            }
        }
    }

    None
}

/// Integer coercion: JSON integers pass through; strings parse as i64.
/// Floats are rejected.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Boolean coercion: JSON booleans pass through; the strings "true",
/// "false", "1" and "0" coerce.
fn coerce_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn matches_format(format: ValueFormat, s: &str) -> bool {
    match format {
        ValueFormat::Email => EMAIL_RE.is_match(s),
    }
}

fn type_problem(path: &[String], expected: &'static str, value: &Value) -> Problem {
    Problem::new(
        path.to_vec(),
        ProblemKind::TypeMismatch { expected },
        Some(value.clone()),
    )
}

fn child_path(prefix: &[String], name: &str) -> Vec<String> {
    let mut path = Vec::with_capacity(prefix.len() + 1);
    path.extend_from_slice(prefix);
    path.push(name.to_string());
    path
}
