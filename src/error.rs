use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::{Request, Response};
use rocket_db_pools::sqlx;
use std::io::Cursor;

use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::response::OpenApiResponderInner;
use rocket_okapi::util::ensure_status_code_exists;

use crate::auth::AuthError;
use crate::models::ApiResponse;

/// Errors surfaced by the general (non-auth) route handlers.
///
/// 4xx variants carry their user-facing message; 5xx variants log the real
/// cause and respond with a fixed non-leaking message.
#[derive(Debug)]
pub enum ApiError {
    Database(sqlx::Error),
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let (status, message) = match self {
            ApiError::Database(e) => {
                log::error!("database error: {}", e);
                (
                    Status::InternalServerError,
                    "Something went wrong. Please try again".to_string(),
                )
            }
            ApiError::NotFound(msg) => {
                log::debug!("not found: {}", msg);
                (Status::NotFound, msg)
            }
            ApiError::BadRequest(msg) => {
                log::debug!("bad request: {}", msg);
                (Status::BadRequest, msg)
            }
            ApiError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                (
                    Status::InternalServerError,
                    "Something went wrong. Please try again".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(status.code, message);
        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"status":"error","statusCode":500,"message":"Failed to serialize error"}"#
                .to_string()
        });

        Response::build()
            .status(status)
            .header(rocket::http::ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

impl OpenApiResponderInner for ApiError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();
        ensure_status_code_exists(&mut responses, 400);
        ensure_status_code_exists(&mut responses, 404);
        ensure_status_code_exists(&mut responses, 500);
        Ok(responses)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            _ => ApiError::Database(err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Sqlx(e) => ApiError::Database(e),
            AuthError::DuplicateAccount | AuthError::InvalidCredentials => {
                ApiError::BadRequest(err.public_message().to_string())
            }
            AuthError::AccountNotFound => ApiError::NotFound(err.public_message().to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
