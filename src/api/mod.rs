//! # persond HTTP API
//!
//! Axum boundary over the schema core. Handlers extract raw values
//! (JSON bodies, query strings, form bodies, path segments, headers,
//! multipart fields) and hand them to the core as untyped maps; all
//! field checking happens in one place.
//!
//! # Endpoints
//!
//! - `GET /` - Greeting
//! - `POST /person/new` - Validate and echo a person (public view)
//! - `GET /person/detail` - Validated query echo (deprecated)
//! - `GET /person/detail/:person_id` - Directory lookup
//! - `PUT /person/:person_id` - Composite update, merged response
//! - `POST /login` - Form login with shaped reply
//! - `POST /contact` - Contact form, echoes the user agent
//! - `POST /post-image` - Upload metadata

pub mod config;
pub mod errors;
pub mod file_routes;
pub mod form_routes;
pub mod person_routes;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use errors::{ApiError, ApiResult, Detail, Source};
pub use server::ApiServer;
