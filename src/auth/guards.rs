use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::serde::json::Json;
use rocket::{State, catch};
use rocket_okapi::request::OpenApiFromRequest;

use crate::auth::responses::Role;
use crate::auth::{AuthError, AuthState};
use crate::models::MessageResponse;

pub const NO_TOKEN_MESSAGE: &str = "No token, authorization denied";
pub const INVALID_TOKEN_MESSAGE: &str = "Token is not valid";
pub const ADMIN_ONLY_MESSAGE: &str = "Access denied. Admins only.";

/// Request-local note set by the guards so the catchers can answer with
/// the right `{message}` body. Missing header and failed verification both
/// surface as 401, but with distinct messages.
#[derive(Debug, Clone, Copy)]
struct GateFailure(&'static str);

/// Identity decoded from a verified bearer token and attached to the
/// request. Carries exactly what the token asserts; the account row is not
/// consulted, so a token stays valid until its own expiry even if a newer
/// login has overwritten the stored session token.
#[derive(Debug, Clone, Copy, OpenApiFromRequest)]
pub struct AuthUser {
    pub id: i32,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthUser {
    type Error = AuthError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = match request
            .headers()
            .get_one("Authorization")
            .and_then(parse_bearer)
        {
            Some(token) => token,
            None => {
                request.local_cache(|| GateFailure(NO_TOKEN_MESSAGE));
                let err = AuthError::Unauthorized;
                return Outcome::Error((err.status(), err));
            }
        };

        let state = match request.guard::<&State<AuthState>>().await.succeeded() {
            Some(state) => state,
            None => {
                let err = AuthError::Config("AuthState missing from managed state".into());
                return Outcome::Error((err.status(), err));
            }
        };

        match state.token_service.verify(token) {
            Ok(identity) => Outcome::Success(AuthUser {
                id: identity.id,
                role: identity.role,
            }),
            Err(err) => {
                request.local_cache(|| GateFailure(INVALID_TOKEN_MESSAGE));
                Outcome::Error((err.status(), err))
            }
        }
    }
}

/// Composable admin gate: authentication failures pass through as 401,
/// an authenticated non-admin is rejected with 403.
#[derive(Debug, Clone, Copy, OpenApiFromRequest)]
pub struct RequireAdmin(pub AuthUser);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RequireAdmin {
    type Error = AuthError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthUser::from_request(request).await {
            Outcome::Success(user) => {
                if user.is_admin() {
                    Outcome::Success(RequireAdmin(user))
                } else {
                    request.local_cache(|| GateFailure(ADMIN_ONLY_MESSAGE));
                    Outcome::Error((Status::Forbidden, AuthError::Forbidden))
                }
            }
            Outcome::Error(err) => Outcome::Error(err),
            Outcome::Forward(_) => {
                Outcome::Error((Status::Unauthorized, AuthError::Unauthorized))
            }
        }
    }
}

/// Extract the token from a `Bearer <token>` header value.
fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default();
    if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[catch(401)]
pub fn unauthorized(request: &Request<'_>) -> Json<MessageResponse> {
    let failure = request.local_cache(|| GateFailure(NO_TOKEN_MESSAGE));
    Json(MessageResponse {
        message: failure.0.to_string(),
    })
}

#[catch(403)]
pub fn forbidden(request: &Request<'_>) -> Json<MessageResponse> {
    let failure = request.local_cache(|| GateFailure(ADMIN_ONLY_MESSAGE));
    Json(MessageResponse {
        message: failure.0.to_string(),
    })
}

#[catch(500)]
pub fn internal_error() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Something went wrong!".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_bearer_headers() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(parse_bearer("bearer abc"), Some("abc"));
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(parse_bearer("abc.def.ghi"), None);
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer(""), None);
    }
}
