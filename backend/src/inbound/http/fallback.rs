//! Catch-all for unmatched paths and methods.

use actix_web::HttpResponse;
use serde_json::json;

pub const PAGE_NOT_FOUND_MESSAGE: &str = "Page not found";

/// Registered as the application's default service.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": PAGE_NOT_FOUND_MESSAGE }))
}
