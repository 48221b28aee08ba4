use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod analytics;
pub mod auth;
pub mod bills;
pub mod businesses;
pub mod notifications;
pub mod products;

/// Map a service error to its HTTP response. Internal failures are logged
/// with `context` and answered with an opaque 500.
pub(crate) fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => {
            HttpResponse::BadRequest().json(json!({ "message": message }))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({ "message": "not found" })),
        ServiceError::InsufficientStock => {
            HttpResponse::BadRequest().json(json!({ "message": "insufficient stock" }))
        }
        ServiceError::PremiumRequired => {
            HttpResponse::Unauthorized().json(json!({ "message": "premium plan required" }))
        }
        ServiceError::NoValidItems(items) => HttpResponse::BadRequest().json(json!({
            "message": "no valid items to bill",
            "items": items,
        })),
        ServiceError::Internal(message) => {
            log::error!("{context}: {message}");
            HttpResponse::InternalServerError().finish()
        }
        ServiceError::Repository(err) => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
