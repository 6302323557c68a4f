//! Form HTTP Routes
//!
//! Urlencoded login and contact endpoints. Form fields arrive as raw
//! strings and go through the schema core like any other input.
//! Requests without a urlencoded body answer in the 422 detail shape,
//! never as a bare extractor rejection.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde_json::{json, Value};

use crate::people::Catalog;
use crate::schema::{validate, Record};

use super::errors::{ApiError, ApiResult, Source};

// ==================
// Shared State
// ==================

/// Form state shared across handlers
pub struct FormState {
    pub catalog: Catalog,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
        }
    }
}

// ==================
// Form Routes
// ==================

/// Create form routes
pub fn form_routes(state: Arc<FormState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/contact", post(contact_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Lifts urlencoded form fields into a raw JSON object
fn form_value(fields: HashMap<String, String>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect(),
    )
}

/// Reads one cookie from the Cookie header
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

// ==================
// Handlers
// ==================

/// POST /login - validate the form, then shape the reply through the
/// login output schema so its message default applies. The password
/// is checked but never echoed.
async fn login_handler(
    State(state): State<Arc<FormState>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> ApiResult<Json<Record>> {
    let Form(fields) = form.map_err(|r| ApiError::invalid_form(r.body_text()))?;
    let raw = form_value(fields);

    let login = validate(&raw, &state.catalog.login_form)
        .map_err(|e| ApiError::validation(Source::Body, e))?;

    let username = login.get("username").cloned().unwrap(); // Validated above

    let out = validate(&json!({ "username": username }), &state.catalog.login_out)
        .map_err(|e| ApiError::validation(Source::Body, e))?;

    Ok(Json(out))
}

/// POST /contact - validate the form; the reply echoes the caller's
/// user agent, or null when the header is absent.
async fn contact_handler(
    State(state): State<Arc<FormState>>,
    headers: HeaderMap,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> ApiResult<Json<Value>> {
    let Form(fields) = form.map_err(|r| ApiError::invalid_form(r.body_text()))?;
    let raw = form_value(fields);

    validate(&raw, &state.catalog.contact_form)
        .map_err(|e| ApiError::validation(Source::Body, e))?;

    if let Some(ads) = cookie_value(&headers, "ads") {
        tracing::debug!(ads = %ads, "contact form carried ads cookie");
    }

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| Value::String(s.to_string()))
        .unwrap_or(Value::Null);

    Ok(Json(user_agent))
}
