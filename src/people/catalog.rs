//! Declared schema catalog for the person API
//!
//! Every request and response shape the API speaks is declared here
//! once, at process start. Handlers never hand-check fields.

use serde::Serialize;
use serde_json::json;

use crate::schema::{EnumSchema, FieldSpec, ObjectSchema, ValueFormat};

/// Hair colors accepted by the person schema
pub fn hair_color() -> EnumSchema {
    EnumSchema::new(
        "hair_color",
        &["blonde", "brown", "black", "red", "grey", "white"],
    )
}

/// Process-start, read-only collection of the API's object schemas
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    /// Full person, credentials included (request side)
    pub person: ObjectSchema,
    /// Person view without credentials (response side)
    pub person_public: ObjectSchema,
    /// Postal location
    pub location: ObjectSchema,
    /// Composite update body: person plus location
    pub person_update: ObjectSchema,
    /// Detail query string
    pub person_query: ObjectSchema,
    /// Detail path segment
    pub person_path: ObjectSchema,
    /// Login form body
    pub login_form: ObjectSchema,
    /// Login response shape, with its message default
    pub login_out: ObjectSchema,
    /// Contact form body
    pub contact_form: ObjectSchema,
}

impl Catalog {
    /// Builds the full catalog
    pub fn new() -> Self {
        let person = ObjectSchema::new(
            "person",
            vec![
                FieldSpec::string("first_name").min_length(2).max_length(50),
                FieldSpec::string("last_name").min_length(2).max_length(50),
                FieldSpec::integer("age").gt(0).lt(115),
                FieldSpec::enumeration("hair_color", hair_color()).optional(),
                FieldSpec::boolean("is_married").optional(),
                FieldSpec::string("password").min_length(8),
            ],
        );

        // The public view is the person minus its credential field
        let person_public = ObjectSchema::new(
            "person_public",
            person
                .fields
                .iter()
                .filter(|f| f.name != "password")
                .cloned()
                .collect(),
        );

        let location = ObjectSchema::new(
            "location",
            vec![
                FieldSpec::string("city"),
                FieldSpec::string("state"),
                FieldSpec::string("country"),
            ],
        );

        let person_update = ObjectSchema::new(
            "person_update",
            vec![
                FieldSpec::object("person", person.clone()),
                FieldSpec::object("location", location.clone()),
            ],
        );

        let person_query = ObjectSchema::new(
            "person_query",
            vec![
                FieldSpec::string("name").optional().min_length(1).max_length(50),
                FieldSpec::string("age"),
            ],
        );

        let person_path = ObjectSchema::new(
            "person_path",
            vec![FieldSpec::integer("person_id").gt(0)],
        );

        let login_form = ObjectSchema::new(
            "login_form",
            vec![
                FieldSpec::string("username").max_length(10),
                FieldSpec::string("password"),
            ],
        );

        let login_out = ObjectSchema::new(
            "login_out",
            vec![
                FieldSpec::string("username").max_length(10),
                FieldSpec::string("messages")
                    .optional()
                    .with_default(json!("Login successful")),
            ],
        );

        let contact_form = ObjectSchema::new(
            "contact_form",
            vec![
                FieldSpec::string("first_name").min_length(1).max_length(20),
                FieldSpec::string("last_name").min_length(1).max_length(20),
                FieldSpec::string("email").format(ValueFormat::Email),
                FieldSpec::string("message").min_length(20),
            ],
        );

        Self {
            person,
            person_public,
            location,
            person_update,
            person_query,
            person_path,
            login_form,
            login_out,
            contact_form,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
