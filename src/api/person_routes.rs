//! Person HTTP Routes
//!
//! Endpoints for creating, reading, and updating people. Handlers pass
//! raw values to the schema core and shape responses with its
//! merge/project operations.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::people::{Catalog, Directory};
use crate::schema::{merge, project, validate, Record};

use super::errors::{ApiError, ApiResult, Source};

// ==================
// Shared State
// ==================

/// Person state shared across handlers
pub struct PersonState {
    pub catalog: Catalog,
    pub directory: Directory,
}

impl PersonState {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            directory: Directory::seeded(),
        }
    }
}

// ==================
// Person Routes
// ==================

/// Create person routes
pub fn person_routes(state: Arc<PersonState>) -> Router {
    Router::new()
        .route("/person/new", post(create_person_handler))
        .route("/person/detail", get(person_detail_query_handler))
        .route("/person/detail/", get(person_detail_query_handler))
        .route("/person/detail/:person_id", get(person_detail_handler))
        .route("/person/:person_id", put(update_person_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// POST /person/new - validate a person and echo its public view.
///
/// The response is projected through the public schema, so the
/// credential field never appears in it.
async fn create_person_handler(
    State(state): State<Arc<PersonState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let Json(raw) = body.map_err(|r| ApiError::invalid_json(r.body_text()))?;

    let person =
        validate(&raw, &state.catalog.person).map_err(|e| ApiError::validation(Source::Body, e))?;

    let public = project(&person, &state.catalog.person_public);

    Ok((StatusCode::CREATED, Json(public)))
}

/// Lifts query parameters into a raw JSON object
fn query_value(params: HashMap<String, String>) -> Value {
    Value::Object(
        params
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect(),
    )
}

/// GET /person/detail - validated query parameters, echoed back.
///
/// Deprecated; kept for callers still on the query variant. Registered
/// with and without the trailing slash.
async fn person_detail_query_handler(
    State(state): State<Arc<PersonState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let raw = query_value(params);

    let record = validate(&raw, &state.catalog.person_query)
        .map_err(|e| ApiError::validation(Source::Query, e))?;

    Ok(Json(json!({
        "name": record.get("name").cloned().unwrap_or(Value::Null),
        "age": record.get("age").cloned().unwrap_or(Value::Null),
    })))
}

/// GET /person/detail/:person_id - directory lookup after path
/// validation. Unknown ids are a domain outcome, not a validation
/// failure, and map to 404.
async fn person_detail_handler(
    State(state): State<Arc<PersonState>>,
    Path(person_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let record = validate(&json!({ "person_id": person_id }), &state.catalog.person_path)
        .map_err(|e| ApiError::validation(Source::Path, e))?;

    let id = record.get("person_id").and_then(Value::as_i64).unwrap(); // Validated above

    if !state.directory.contains(id) {
        return Err(ApiError::PersonNotFound);
    }

    Ok(Json(json!({ "person_id": id })))
}

/// PUT /person/:person_id - validate the composite update and reply
/// with the public person merged with the location.
///
/// Path and body are both checked; their problems aggregate into one
/// detail list with path problems first.
async fn update_person_handler(
    State(state): State<Arc<PersonState>>,
    Path(person_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Record>> {
    let Json(raw) = body.map_err(|r| ApiError::invalid_json(r.body_text()))?;

    let path_result = validate(&json!({ "person_id": person_id }), &state.catalog.person_path);
    let body_result = validate(&raw, &state.catalog.person_update);

    let update = match (path_result, body_result) {
        (Ok(_), Ok(update)) => update,
        (path_result, body_result) => {
            let mut failures = Vec::new();
            if let Err(err) = path_result {
                failures.push((Source::Path, err));
            }
            if let Err(err) = body_result {
                failures.push((Source::Body, err));
            }
            return Err(ApiError::validation_many(failures));
        }
    };

    let person = update.nested("person").unwrap(); // Validated above
    let location = update.nested("location").unwrap(); // Validated above

    let public = project(&person, &state.catalog.person_public);
    let merged = merge(&[public, location]);

    Ok(Json(merged))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value_lifts_strings() {
        let mut params = HashMap::new();
        params.insert("age".to_string(), "30".to_string());

        let raw = query_value(params);
        assert_eq!(raw["age"], json!("30"));
    }

    #[test]
    fn test_state_wires_catalog_and_directory() {
        let state = PersonState::new();
        assert!(state.directory.contains(1));
        assert!(!state.directory.contains(99));
        assert!(state.catalog.person.field("password").is_some());
        assert!(state.catalog.person_public.field("password").is_none());
    }

    #[test]
    fn test_routes_build() {
        let _router = person_routes(Arc::new(PersonState::new()));
    }
}
