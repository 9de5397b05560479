//! Administrative surface: dashboard stats and user management. Every
//! handler takes the `RequireAdmin` guard; non-admin callers are rejected
//! before the handler body runs.

use rocket::State;
use rocket::serde::json::Json;
use rocket::{delete, get, put};
use rocket_okapi::openapi;

use crate::auth::guards::RequireAdmin;
use crate::auth::responses::{DashboardStats, UpdateUserRequest};
use crate::auth::AuthState;
use crate::error::ApiError;
use crate::models::ApiResponse;

#[openapi(tag = "Admin")]
#[get("/dashboard")]
pub async fn dashboard(
    state: &State<AuthState>,
    _admin: RequireAdmin,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let total_users = state.accounts.count_by_role("user").await?;

    Ok(Json(ApiResponse::success(
        200,
        "Dashboard stats fetched successfully",
        Some(DashboardStats { total_users }),
    )))
}

/// Update an account's email and/or password. A password change recomputes
/// the digest before anything is written; the plaintext is dropped here.
#[openapi(tag = "Admin")]
#[put("/users/<id>", data = "<payload>")]
pub async fn update_user(
    state: &State<AuthState>,
    _admin: RequireAdmin,
    id: i32,
    payload: Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .accounts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let email = payload
        .email
        .as_deref()
        .map(|raw| raw.trim().to_lowercase())
        .filter(|normalized| !normalized.is_empty());

    let digest = match payload.password.as_deref().map(str::trim) {
        Some(password) if password.len() < 6 => {
            return Err(ApiError::BadRequest(
                "Password must be at least 6 characters long".to_string(),
            ));
        }
        Some(password) => Some(state.password_service.digest(password)),
        None => None,
    };

    state
        .accounts
        .update_credentials(id, email.as_deref(), digest.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(
        200,
        "User updated successfully",
        None,
    )))
}

#[openapi(tag = "Admin")]
#[delete("/users/<id>")]
pub async fn delete_user(
    state: &State<AuthState>,
    _admin: RequireAdmin,
    id: i32,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = state.accounts.delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(ApiResponse::success(
        200,
        "User deleted successfully",
        None,
    )))
}
