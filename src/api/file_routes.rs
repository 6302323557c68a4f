//! File HTTP Routes
//!
//! Upload metadata endpoint. Bytes are read and measured, never
//! stored.

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::errors::{ApiError, ApiResult, Source};

/// Create file routes
pub fn file_routes() -> Router {
    Router::new().route("/post-image", post(post_image_handler))
}

/// Size in kilobytes, rounded to two decimals
fn size_in_kb(len: usize) -> f64 {
    (len as f64 / 1024.0 * 100.0).round() / 100.0
}

/// POST /post-image - reads the `image` multipart field and replies
/// with its name, format, and size in kilobytes (two decimals).
///
/// Header-level rejections (wrong or missing content-type) answer in
/// the same 422 shape as broken multipart framing.
async fn post_image_handler(
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Value>> {
    let mut multipart = multipart.map_err(|r| ApiError::invalid_multipart(r.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let format = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::invalid_multipart(e.to_string()))?;

        return Ok(Json(json!({
            "File name": file_name,
            "Format": format,
            "Size(kb)": size_in_kb(data.len()),
        })));
    }

    Err(ApiError::missing(Source::Body, "image"))
}
