//! Lightweight service health endpoint used for readiness checks and tests.

use rocket::get;
use rocket::serde::json::Json;
use rocket_okapi::openapi;

use crate::models::MessageResponse;

/// Health check endpoint returning a trivial JSON payload.
#[openapi(tag = "Health")]
#[get("/")]
pub fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Server is running".to_string(),
    })
}
