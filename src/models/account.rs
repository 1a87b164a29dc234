//! Account models (customers, trainers, managers) and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::models::enums::AccountKind;

/// A row from one of the three account tables
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Account projection safe to return to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountInfo {
    pub id: i32,
    pub kind: AccountKind,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Customer registration request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// A pending password-reset code
#[derive(Debug, Clone, FromRow)]
pub struct PasswordReset {
    pub id: i32,
    pub account_kind: String,
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT claims carried by every authenticated request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Account email
    pub sub: String,
    pub account_id: i32,
    pub kind: AccountKind,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks

    /// Staff-only operations: catalog writes, confirm/cancel batches
    pub fn require_staff(&self) -> Result<(), AppError> {
        match self.kind {
            AccountKind::Manager | AccountKind::Trainer => Ok(()),
            AccountKind::Customer => Err(AppError::Authorization(
                "Staff account required".to_string(),
            )),
        }
    }

    /// A customer may only act on its own bookings; staff on anyone's
    pub fn require_customer_access(&self, customer_id: i32) -> Result<(), AppError> {
        match self.kind {
            AccountKind::Manager | AccountKind::Trainer => Ok(()),
            AccountKind::Customer if self.account_id == customer_id => Ok(()),
            AccountKind::Customer => Err(AppError::Authorization(
                "Cannot act on another customer's bookings".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(kind: AccountKind, account_id: i32) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: "test@example.com".to_string(),
            account_id,
            kind,
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn staff_check_rejects_customers() {
        assert!(claims(AccountKind::Manager, 1).require_staff().is_ok());
        assert!(claims(AccountKind::Trainer, 1).require_staff().is_ok());
        assert!(claims(AccountKind::Customer, 1).require_staff().is_err());
    }

    #[test]
    fn customers_can_only_access_their_own_bookings() {
        let customer = claims(AccountKind::Customer, 7);
        assert!(customer.require_customer_access(7).is_ok());
        assert!(customer.require_customer_access(8).is_err());
        assert!(claims(AccountKind::Manager, 1).require_customer_access(8).is_ok());
    }

    #[test]
    fn token_round_trips() {
        let original = claims(AccountKind::Customer, 42);
        let token = original.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.account_id, 42);
        assert_eq!(parsed.kind, AccountKind::Customer);
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}
