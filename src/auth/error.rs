use rocket::http::Status;
use rocket_db_pools::sqlx;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account already exists")]
    DuplicateAccount,
    #[error("token expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("account not found")]
    AccountNotFound,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("unexpected error: {0}")]
    Other(String),
}

impl AuthError {
    pub fn status(&self) -> Status {
        match self {
            AuthError::InvalidCredentials | AuthError::DuplicateAccount => Status::BadRequest,
            AuthError::TokenExpired | AuthError::TokenInvalid | AuthError::Unauthorized => {
                Status::Unauthorized
            }
            AuthError::Forbidden => Status::Forbidden,
            AuthError::AccountNotFound => Status::NotFound,
            AuthError::Config(_)
            | AuthError::Sqlx(_)
            | AuthError::Jwt(_)
            | AuthError::Other(_) => Status::InternalServerError,
        }
    }

    /// Client-facing message. Wrong-password and no-such-account collapse to
    /// the same string, and every 5xx collapses to a fixed one; the real
    /// cause is only ever logged.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid Credentials",
            AuthError::DuplicateAccount => "User already exists",
            AuthError::TokenExpired | AuthError::TokenInvalid => "Token is not valid",
            AuthError::Unauthorized => "No token, authorization denied",
            AuthError::Forbidden => "Access denied. Admins only.",
            AuthError::AccountNotFound => "User not found",
            AuthError::Config(_)
            | AuthError::Sqlx(_)
            | AuthError::Jwt(_)
            | AuthError::Other(_) => "Something went wrong. Please try again",
        }
    }
}
