use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{State, post};
use rocket_okapi::openapi;

use crate::auth::responses::{
    ForgotPasswordRequest, LoginData, LoginRequest, RegisterRequest, Role,
};
use crate::auth::{AuthError, AuthResult, AuthState};
use crate::models::ApiResponse;

type AuthRouteResult<T> =
    Result<status::Custom<Json<ApiResponse<T>>>, status::Custom<Json<ApiResponse<()>>>>;

/// Create an account from an email and plaintext password. Stores the
/// digest, records terms acceptance, and leaves the caller unauthenticated
/// (no token is issued here).
#[openapi(tag = "Auth")]
#[post("/auth/register", data = "<payload>")]
pub async fn register(
    state: &State<AuthState>,
    payload: Json<RegisterRequest>,
) -> AuthRouteResult<()> {
    let email = payload.email.trim().to_lowercase();
    let password = payload.password.trim();

    if email.is_empty() || password.is_empty() {
        return Err(respond_message(
            Status::BadRequest,
            "Email and password are required",
        ));
    }
    if password.len() < 6 {
        return Err(respond_message(
            Status::BadRequest,
            "Password must be at least 6 characters long",
        ));
    }
    if let Some(confirm) = &payload.confirm_password {
        if confirm.trim() != password {
            return Err(respond_message(Status::BadRequest, "Passwords do not match"));
        }
    }
    if !payload.terms_accepted {
        return Err(respond_message(
            Status::BadRequest,
            "You must accept the terms and conditions",
        ));
    }

    match state.accounts.find_by_email(&email).await {
        Ok(Some(_)) => return Err(respond_error(AuthError::DuplicateAccount)),
        Ok(None) => {}
        Err(err) => return Err(respond_error(err)),
    }

    let digest = state.password_service.digest(password);
    if let Err(err) = state.accounts.insert(&email, &digest, payload.terms_accepted).await {
        return Err(respond_error(err));
    }

    Ok(respond_success(
        Status::Created,
        "User registered successfully",
        None,
    ))
}

#[openapi(tag = "Auth")]
#[post("/auth/login", data = "<payload>")]
pub async fn login(
    state: &State<AuthState>,
    payload: Json<LoginRequest>,
) -> AuthRouteResult<LoginData> {
    let data = authenticate(state, &payload.email, &payload.password, None)
        .await
        .map_err(respond_error)?;

    Ok(respond_success(
        Status::Ok,
        "User logged in successfully",
        Some(data),
    ))
}

/// Admin login: the same flow restricted to admin accounts. A non-admin
/// account is reported exactly like an unknown email.
#[openapi(tag = "Admin")]
#[post("/login", data = "<payload>")]
pub async fn admin_login(
    state: &State<AuthState>,
    payload: Json<LoginRequest>,
) -> AuthRouteResult<LoginData> {
    let data = authenticate(state, &payload.email, &payload.password, Some(Role::Admin))
        .await
        .map_err(respond_error)?;

    Ok(respond_success(
        Status::Ok,
        "User logged in successfully",
        Some(data),
    ))
}

#[openapi(tag = "Admin")]
#[post("/forgot-password", data = "<payload>")]
pub async fn admin_forgot_password(
    state: &State<AuthState>,
    payload: Json<ForgotPasswordRequest>,
) -> AuthRouteResult<()> {
    let email = payload.email.trim().to_lowercase();

    match state.accounts.find_by_email(&email).await {
        Ok(Some(account)) if Role::from_str(&account.role) == Role::Admin => {
            // TODO: deliver the reset link once an email provider is wired up.
            Ok(respond_success(
                Status::Ok,
                "Password reset link sent successfully",
                None,
            ))
        }
        Ok(_) => Err(respond_message(Status::BadRequest, "Admin not found")),
        Err(err) => Err(respond_error(err)),
    }
}

/// Shared credential check: lookup by normalized email, optional role
/// restriction, digest comparison, token issuance, and persistence of the
/// new token as the account's current session token.
///
/// Unknown email, role mismatch, and wrong password all surface as
/// `InvalidCredentials` so callers cannot probe for account existence.
async fn authenticate(
    state: &AuthState,
    raw_email: &str,
    raw_password: &str,
    required_role: Option<Role>,
) -> AuthResult<LoginData> {
    let email = raw_email.trim().to_lowercase();
    let password = raw_password.trim();

    if email.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }

    let account = state
        .accounts
        .find_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let role = Role::from_str(&account.role);
    if let Some(required) = required_role {
        if role != required {
            return Err(AuthError::InvalidCredentials);
        }
    }

    if !state
        .password_service
        .verify(password, &account.password_digest)
    {
        return Err(AuthError::InvalidCredentials);
    }

    let signed = state.token_service.issue(account.id, role)?;
    state
        .accounts
        .store_session_token(account.id, &signed.token)
        .await?;

    Ok(LoginData {
        id: account.id,
        email: account.email,
        role,
        balance: account.balance,
        token: signed.token,
    })
}

fn respond_success<T>(
    status: Status,
    message: &str,
    data: Option<T>,
) -> status::Custom<Json<ApiResponse<T>>> {
    status::Custom(status, Json(ApiResponse::success(status.code, message, data)))
}

fn respond_error(err: AuthError) -> status::Custom<Json<ApiResponse<()>>> {
    let status = err.status();
    if status == Status::InternalServerError {
        log::error!("auth request failed: {}", err);
    }
    status::Custom(
        status,
        Json(ApiResponse::error(status.code, err.public_message())),
    )
}

fn respond_message(
    status: Status,
    message: impl Into<String>,
) -> status::Custom<Json<ApiResponse<()>>> {
    status::Custom(status, Json(ApiResponse::error(status.code, message)))
}
