use rocket_db_pools::sqlx::{self, PgPool};

use crate::auth::{AuthError, AuthResult};
use crate::models::Account;

const ACCOUNT_COLUMNS: &str = "id, email, password_digest, terms_accepted, session_token, role, \
                               balance, is_active, is_deleted, created_at";

/// Typed access to the `accounts` table. Every method is a single
/// statement; the database's per-row atomicity is the only concurrency
/// control (concurrent logins race last-write-wins on the session token).
#[derive(Debug, Clone)]
pub struct AccountStore {
    pool: PgPool,
}

impl AccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Lookup by already-normalized (lowercase) email.
    pub async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn find_by_id(&self, id: i32) -> AuthResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Create an account with defaults (role `user`, balance 0, empty
    /// session token). A unique-violation on email maps to
    /// `DuplicateAccount` so a lost check-then-insert race still surfaces
    /// as the domain error.
    pub async fn insert(
        &self,
        email: &str,
        password_digest: &str,
        terms_accepted: bool,
    ) -> AuthResult<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts (email, password_digest, terms_accepted) \
             VALUES ($1, $2, $3) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(email)
        .bind(password_digest)
        .bind(terms_accepted)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                AuthError::DuplicateAccount
            }
            _ => AuthError::from(err),
        })?;

        Ok(account)
    }

    /// Overwrite the account's current session token. Last write wins.
    pub async fn store_session_token(&self, id: i32, token: &str) -> AuthResult<()> {
        sqlx::query("UPDATE accounts SET session_token = $1 WHERE id = $2")
            .bind(token)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Update email and/or digest; `None` leaves the column untouched. The
    /// caller recomputes the digest whenever the password changes, so a
    /// plaintext never reaches this layer.
    pub async fn update_credentials(
        &self,
        id: i32,
        email: Option<&str>,
        password_digest: Option<&str>,
    ) -> AuthResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts \
             SET email = COALESCE($1, email), \
                 password_digest = COALESCE($2, password_digest) \
             WHERE id = $3",
        )
        .bind(email)
        .bind(password_digest)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                AuthError::DuplicateAccount
            }
            _ => AuthError::from(err),
        })?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i32) -> AuthResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_role(&self, role: &str) -> AuthResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
