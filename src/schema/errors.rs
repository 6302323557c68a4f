//! Validation problem types and the aggregate validation error
//!
//! Wire codes:
//! - missing
//! - string_type / int_type / bool_type / model_type
//! - string_too_short / string_too_long
//! - greater_than / less_than
//! - enum
//! - value_error

use std::fmt;

use serde_json::Value;

/// What went wrong with a single field
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemKind {
    /// Required field absent from input
    Missing,
    /// Value could not be read as the declared kind
    TypeMismatch {
        /// Declared kind name
        expected: &'static str,
    },
    /// String shorter than the inclusive minimum
    TooShort { min_length: usize },
    /// String longer than the inclusive maximum
    TooLong { max_length: usize },
    /// Number at or below the exclusive lower bound
    NotGreaterThan { gt: i64 },
    /// Number at or above the exclusive upper bound
    NotLessThan { lt: i64 },
    /// Value outside a closed enum
    NotInEnum { allowed: Vec<String> },
    /// String does not match its declared format
    BadFormat { format: &'static str },
}

impl ProblemKind {
    /// Stable machine code for the wire format
    pub fn code(&self) -> &'static str {
        match self {
            ProblemKind::Missing => "missing",
            ProblemKind::TypeMismatch { expected } => match *expected {
                "integer" => "int_type",
                "boolean" => "bool_type",
                "object" => "model_type",
                _ => "string_type",
            },
            ProblemKind::TooShort { .. } => "string_too_short",
            ProblemKind::TooLong { .. } => "string_too_long",
            ProblemKind::NotGreaterThan { .. } => "greater_than",
            ProblemKind::NotLessThan { .. } => "less_than",
            ProblemKind::NotInEnum { .. } => "enum",
            ProblemKind::BadFormat { .. } => "value_error",
        }
    }

    /// Human-readable message in the wire format's phrasing
    pub fn message(&self) -> String {
        match self {
            ProblemKind::Missing => "Field required".into(),
            ProblemKind::TypeMismatch { expected } => match *expected {
                "integer" => "Input should be a valid integer".into(),
                "boolean" => "Input should be a valid boolean".into(),
                "object" => "Input should be a valid dictionary".into(),
                _ => "Input should be a valid string".into(),
            },
            ProblemKind::TooShort { min_length } => {
                format!("String should have at least {} characters", min_length)
            }
            ProblemKind::TooLong { max_length } => {
                format!("String should have at most {} characters", max_length)
            }
            ProblemKind::NotGreaterThan { gt } => {
                format!("Input should be greater than {}", gt)
            }
            ProblemKind::NotLessThan { lt } => {
                format!("Input should be less than {}", lt)
            }
            ProblemKind::NotInEnum { allowed } => {
                format!("Input should be {}", quoted_or_list(allowed))
            }
            ProblemKind::BadFormat { format } => {
                format!("value is not a valid {} address", format)
            }
        }
    }
}

/// Formats enum values as `'a', 'b' or 'c'`
fn quoted_or_list(values: &[String]) -> String {
    match values {
        [] => String::new(),
        [only] => format!("'{}'", only),
        [head @ .., last] => {
            let head = head
                .iter()
                .map(|v| format!("'{}'", v))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} or '{}'", head, last)
        }
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Path segments from the schema root (e.g. ["location", "city"])
    pub path: Vec<String>,
    /// Failure kind
    pub kind: ProblemKind,
    /// Offending input value, when one was present
    pub input: Option<Value>,
}

impl Problem {
    /// Create a new problem
    pub fn new(path: Vec<String>, kind: ProblemKind, input: Option<Value>) -> Self {
        Self { path, kind, input }
    }

    /// Problem at a single top-level field
    pub fn at(field: impl Into<String>, kind: ProblemKind, input: Option<Value>) -> Self {
        Self::new(vec![field.into()], kind, input)
    }

    /// Dotted path for log lines and Display
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {}", self.dotted_path(), self.kind.message())
    }
}

/// Aggregate validation failure: every field problem found in one pass,
/// in schema walk order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    problems: Vec<Problem>,
}

impl ValidationError {
    /// Create from collected problems.
    ///
    /// # Panics
    ///
    /// Panics if `problems` is empty. An empty aggregate means the
    /// caller should have produced a record instead.
    pub fn new(problems: Vec<Problem>) -> Self {
        assert!(!problems.is_empty(), "validation error with no problems");
        Self { problems }
    }

    /// The collected problems, in schema walk order
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Number of failing fields
    pub fn count(&self) -> usize {
        self.problems.len()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} problem(s)", self.count())?;
        for problem in &self.problems {
            write!(f, "; {}", problem)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
