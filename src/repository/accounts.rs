//! Accounts repository: customers, trainers, and managers
//!
//! The three account tables share one shape. Queries are selected by an
//! explicit `AccountKind` match, never by threading table-name strings
//! through callers.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        account::{Account, PasswordReset, RegisterCustomer},
        enums::AccountKind,
    },
};

#[derive(Clone)]
pub struct AccountsRepository {
    pool: Pool<Postgres>,
}

impl AccountsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn select_by_email(kind: AccountKind) -> &'static str {
        match kind {
            AccountKind::Customer => "SELECT * FROM customers WHERE email = $1",
            AccountKind::Trainer => "SELECT * FROM trainers WHERE email = $1",
            AccountKind::Manager => "SELECT * FROM managers WHERE email = $1",
        }
    }

    fn select_by_id(kind: AccountKind) -> &'static str {
        match kind {
            AccountKind::Customer => "SELECT * FROM customers WHERE id = $1",
            AccountKind::Trainer => "SELECT * FROM trainers WHERE id = $1",
            AccountKind::Manager => "SELECT * FROM managers WHERE id = $1",
        }
    }

    fn update_password_sql(kind: AccountKind) -> &'static str {
        match kind {
            AccountKind::Customer => "UPDATE customers SET password = $2 WHERE email = $1",
            AccountKind::Trainer => "UPDATE trainers SET password = $2 WHERE email = $1",
            AccountKind::Manager => "UPDATE managers SET password = $2 WHERE email = $1",
        }
    }

    /// Get account by email, if present
    pub async fn get_by_email(&self, kind: AccountKind, email: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(Self::select_by_email(kind))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    /// Get account by ID
    pub async fn get_by_id(&self, kind: AccountKind, id: i32) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(Self::select_by_id(kind))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", kind, id)))
    }

    /// Shared duplicate-email check used by every registration path
    pub async fn email_exists(&self, kind: AccountKind, email: &str) -> AppResult<bool> {
        Ok(self.get_by_email(kind, email).await?.is_some())
    }

    /// Create a customer account (password already hashed)
    pub async fn create_customer(&self, data: &RegisterCustomer, password_hash: &str) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO customers (name, email, phone, password)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.phone.as_deref())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    /// Replace an account's password hash
    pub async fn update_password(&self, kind: AccountKind, email: &str, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(Self::update_password_sql(kind))
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} account {} not found", kind, email)));
        }
        Ok(())
    }

    /// Store a password-reset code, replacing any previous one
    pub async fn create_reset(
        &self,
        kind: AccountKind,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM password_resets WHERE account_kind = $1 AND email = $2")
            .bind(kind.as_str())
            .bind(email)
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO password_resets (account_kind, email, code, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(kind.as_str())
        .bind(email)
        .bind(code)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up a pending reset code
    pub async fn get_reset(&self, kind: AccountKind, email: &str, code: &str) -> AppResult<Option<PasswordReset>> {
        let reset = sqlx::query_as::<_, PasswordReset>(
            "SELECT * FROM password_resets WHERE account_kind = $1 AND email = $2 AND code = $3",
        )
        .bind(kind.as_str())
        .bind(email)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reset)
    }

    /// Consume a reset code once used
    pub async fn delete_reset(&self, reset_id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM password_resets WHERE id = $1")
            .bind(reset_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
