use rocket::State;
use rocket::get;
use rocket::serde::json::Json;
use rocket_okapi::openapi;

use crate::auth::guards::AuthUser;
use crate::auth::responses::UserProfile;
use crate::auth::AuthState;
use crate::error::ApiError;
use crate::models::ApiResponse;

/// Profile for the account named by the caller's token. The token can
/// outlive the row (accounts are deleted outright), so a verified caller
/// can still see 404 here.
#[openapi(tag = "User")]
#[get("/user/details")]
pub async fn user_details(
    state: &State<AuthState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let account = state
        .accounts
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        200,
        "User details fetched successfully",
        Some(UserProfile::from_account(&account)),
    )))
}
