//! Schema type definitions for the validation core
//!
//! Supported field kinds:
//! - string: UTF-8 string
//! - integer: 64-bit signed integer
//! - boolean: Boolean
//! - enum: closed set of string values
//! - object: nested object with its own field schema

use serde::Serialize;
use serde_json::Value;

/// Supported field kinds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Integer,
    /// Boolean
    Boolean,
    /// Closed set of string values
    Enum(EnumSchema),
    /// Nested object with its own field schema
    Object(ObjectSchema),
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum(_) => "enum",
            FieldKind::Object(_) => "object",
        }
    }
}

/// Semantic string formats checked after kind coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// Email address
    Email,
}

impl ValueFormat {
    /// Returns the format name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            ValueFormat::Email => "email",
        }
    }
}

/// Optional value constraints.
///
/// Length bounds are inclusive and counted in characters. Numeric
/// bounds are exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Constraints {
    /// Inclusive minimum length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Inclusive maximum length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Exclusive lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<i64>,
    /// Exclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<i64>,
    /// Semantic string format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

impl Constraints {
    /// Returns true if no constraint is set
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.gt.is_none()
            && self.lt.is_none()
            && self.format.is_none()
    }
}

/// A single field declaration: kind, requiredness, optional default,
/// and constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Field name as it appears in input and output
    pub name: String,
    /// Field kind
    pub kind: FieldKind,
    /// Whether the field must be present in input
    pub required: bool,
    /// Value inserted when the field is absent (trusted, not re-checked)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Constraints applied to present values
    #[serde(skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
}

impl FieldSpec {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
            constraints: Constraints::default(),
        }
    }

    /// Create a required string field
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Create a required integer field
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Create a required boolean field
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Create a required enum field
    pub fn enumeration(name: impl Into<String>, values: EnumSchema) -> Self {
        Self::new(name, FieldKind::Enum(values))
    }

    /// Create a required nested object field
    pub fn object(name: impl Into<String>, schema: ObjectSchema) -> Self {
        Self::new(name, FieldKind::Object(schema))
    }

    /// Mark the field optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach a default inserted when the field is absent
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Inclusive minimum length in characters
    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    /// Inclusive maximum length in characters
    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.max_length = Some(max);
        self
    }

    /// Exclusive lower bound
    pub fn gt(mut self, bound: i64) -> Self {
        self.constraints.gt = Some(bound);
        self
    }

    /// Exclusive upper bound
    pub fn lt(mut self, bound: i64) -> Self {
        self.constraints.lt = Some(bound);
        self
    }

    /// Require a semantic string format
    pub fn format(mut self, format: ValueFormat) -> Self {
        self.constraints.format = Some(format);
        self
    }
}

/// A named closed set of string values. Membership is exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumSchema {
    /// Schema name for messages and catalog listings
    pub name: String,
    /// Declared values, in declaration order
    pub values: Vec<String>,
}

impl EnumSchema {
    /// Create a new enum schema from its declared values
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Returns true if `value` is one of the declared values
    pub fn accepts(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// A named, ordered collection of field declarations.
///
/// Field order is declaration order; validation and projection walk
/// fields in this order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSchema {
    /// Schema name for messages and catalog listings
    pub name: String,
    /// Field declarations, in declaration order
    pub fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    /// Create a new object schema.
    ///
    /// # Panics
    ///
    /// Panics if two fields share a name. Schemas are process-start
    /// static data, so a duplicate is a programming defect.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        let name = name.into();
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|other| other.name == field.name) {
                panic!("schema '{}' declares field '{}' twice", name, field.name);
            }
        }
        Self { name, fields }
    }

    /// Looks up a field declaration by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// An ordered mapping from field names to validated values.
///
/// Produced by validation and the shaping operations; callers read or
/// serialize it but never build one by hand. Serializes as a JSON
/// object in field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: serde_json::Map<String, Value>,
}

impl Record {
    pub(crate) fn new() -> Self {
        Self {
            fields: serde_json::Map::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Returns the value for a field, if present
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns a nested object field as a record of its own.
    ///
    /// Nested objects come out of validation already ordered, so the
    /// view is itself a record.
    pub fn nested(&self, name: &str) -> Option<Record> {
        match self.fields.get(name) {
            Some(Value::Object(map)) => Some(Record {
                fields: map.clone(),
            }),
            _ => None,
        }
    }

    /// Returns true if the field is present
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in record order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Field entries in record order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Consumes the record into a JSON object value
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fluent_field_construction() {
        let field = FieldSpec::string("first_name").min_length(2).max_length(50);
        assert_eq!(field.name, "first_name");
        assert!(field.required);
        assert_eq!(field.constraints.min_length, Some(2));
        assert_eq!(field.constraints.max_length, Some(50));
    }

    #[test]
    fn test_optional_with_default() {
        let field = FieldSpec::string("messages")
            .optional()
            .with_default(json!("Login successful"));
        assert!(!field.required);
        assert_eq!(field.default, Some(json!("Login successful")));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldKind::String.kind_name(), "string");
        assert_eq!(FieldKind::Integer.kind_name(), "integer");
        assert_eq!(FieldKind::Boolean.kind_name(), "boolean");
        assert_eq!(
            FieldKind::Enum(EnumSchema::new("colors", &["red"])).kind_name(),
            "enum"
        );
        assert_eq!(
            FieldKind::Object(ObjectSchema::new("empty", vec![])).kind_name(),
            "object"
        );
    }

    #[test]
    fn test_enum_membership_is_exact() {
        let colors = EnumSchema::new("hair_color", &["blonde", "brown"]);
        assert!(colors.accepts("blonde"));
        assert!(!colors.accepts("Blonde"));
        assert!(!colors.accepts("purple"));
    }

    #[test]
    fn test_schema_field_order_preserved() {
        let schema = ObjectSchema::new(
            "person",
            vec![
                FieldSpec::string("first_name"),
                FieldSpec::string("last_name"),
                FieldSpec::integer("age"),
            ],
        );
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first_name", "last_name", "age"]);
    }

    #[test]
    #[should_panic(expected = "twice")]
    fn test_duplicate_field_name_panics() {
        ObjectSchema::new(
            "person",
            vec![FieldSpec::string("name"), FieldSpec::integer("name")],
        );
    }

    #[test]
    fn test_field_lookup() {
        let schema = ObjectSchema::new(
            "login",
            vec![
                FieldSpec::string("username").max_length(10),
                FieldSpec::string("password"),
            ],
        );
        assert!(schema.field("username").is_some());
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let mut record = Record::new();
        record.insert("zulu", json!(1));
        record.insert("alpha", json!(2));
        record.insert("mike", json!(3));

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_record_serializes_in_order() {
        let mut record = Record::new();
        record.insert("first_name", json!("John"));
        record.insert("age", json!(25));

        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"first_name":"John","age":25}"#);
    }

    #[test]
    fn test_constraints_is_empty() {
        assert!(Constraints::default().is_empty());
        let field = FieldSpec::integer("age").gt(0);
        assert!(!field.constraints.is_empty());
    }

    #[test]
    fn test_nested_record_view() {
        let mut record = Record::new();
        record.insert("person", json!({"first_name": "John", "age": 25}));
        record.insert("age", json!(25));

        let person = record.nested("person").unwrap();
        assert_eq!(person.get("first_name"), Some(&json!("John")));
        assert_eq!(person.len(), 2);

        // Scalars have no nested view
        assert!(record.nested("age").is_none());
        assert!(record.nested("absent").is_none());
    }
}
