//! Authentication and account management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        account::{Account, AccountInfo, RegisterCustomer, UserClaims},
        enums::AccountKind,
    },
    repository::Repository,
};

use super::email::EmailService;

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    email: EmailService,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig, email: EmailService) -> Self {
        Self {
            repository,
            config,
            email,
        }
    }

    /// Authenticate an account and return a JWT token
    pub async fn authenticate(
        &self,
        kind: AccountKind,
        email: &str,
        password: &str,
    ) -> AppResult<(String, Account)> {
        let account = self
            .repository
            .accounts
            .get_by_email(kind, email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&account.password, password)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let token = self.create_token(kind, &account)?;
        Ok((token, account))
    }

    /// Register a new customer account
    pub async fn register_customer(&self, data: &RegisterCustomer) -> AppResult<AccountInfo> {
        if data.password.len() < 8 {
            return Err(AppError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        if self
            .repository
            .accounts
            .email_exists(AccountKind::Customer, &data.email)
            .await?
        {
            return Err(AppError::Duplicate("Email already registered".to_string()));
        }

        let hash = self.hash_password(&data.password)?;
        let account = self.repository.accounts.create_customer(data, &hash).await?;

        Ok(account_info(AccountKind::Customer, &account))
    }

    /// Start a password reset: generate a short-lived code and email it
    pub async fn request_password_reset(&self, kind: AccountKind, email: &str) -> AppResult<()> {
        // Unknown emails get the same response as known ones
        let Some(account) = self.repository.accounts.get_by_email(kind, email).await? else {
            return Ok(());
        };

        let code = generate_reset_code();
        let expires_at =
            Utc::now() + Duration::minutes(self.config.reset_code_expiration_minutes);

        self.repository
            .accounts
            .create_reset(kind, &account.email, &code, expires_at)
            .await?;

        self.email.send_reset_code(&account.email, &code).await?;

        Ok(())
    }

    /// Complete a password reset with the emailed code
    pub async fn confirm_password_reset(
        &self,
        kind: AccountKind,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if new_password.len() < 8 {
            return Err(AppError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let reset = self
            .repository
            .accounts
            .get_reset(kind, email, code)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid reset code".to_string()))?;

        if reset.expires_at < Utc::now() {
            self.repository.accounts.delete_reset(reset.id).await?;
            return Err(AppError::Authentication("Reset code has expired".to_string()));
        }

        let hash = self.hash_password(new_password)?;
        self.repository
            .accounts
            .update_password(kind, email, &hash)
            .await?;
        self.repository.accounts.delete_reset(reset.id).await?;

        Ok(())
    }

    /// Resolve the account behind a set of claims
    pub async fn account_for(&self, claims: &UserClaims) -> AppResult<AccountInfo> {
        let account = self
            .repository
            .accounts
            .get_by_id(claims.kind, claims.account_id)
            .await?;
        Ok(account_info(claims.kind, &account))
    }

    /// Create JWT token for an account
    fn create_token(&self, kind: AccountKind, account: &Account) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: account.email.clone(),
            account_id: account.id,
            kind,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify a password against its stored hash
    fn verify_password(&self, hash: &str, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

fn account_info(kind: AccountKind, account: &Account) -> AccountInfo {
    AccountInfo {
        id: account.id,
        kind,
        name: account.name.clone(),
        email: account.email.clone(),
        phone: account.phone.clone(),
    }
}

/// Generate a 6-digit reset code
fn generate_reset_code() -> String {
    use rand::Rng;
    let num = rand::thread_rng().gen_range(100000..=999999);
    format!("{:06}", num)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_codes_are_six_digits() {
        for _ in 0..50 {
            let code = generate_reset_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            let num: u32 = code.parse().unwrap();
            assert!((100000..=999999).contains(&num));
        }
    }
}
