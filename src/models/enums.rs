//! Shared domain enums (stored as smallint columns)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

/// Booking payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum PaymentStatus {
    Unpaid = 0,
    Paid = 1,
}

impl From<i16> for PaymentStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => PaymentStatus::Paid,
            _ => PaymentStatus::Unpaid,
        }
    }
}

impl From<PaymentStatus> for i16 {
    fn from(s: PaymentStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Paid => "Paid",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ConfirmationStatus
// ---------------------------------------------------------------------------

/// Booking confirmation status
///
/// Canceled is not terminal: a new submit for the same (customer,
/// assignment) pair resurrects the row back to Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum ConfirmationStatus {
    Pending = 0,
    Confirmed = 1,
    Canceled = 2,
}

impl From<i16> for ConfirmationStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => ConfirmationStatus::Confirmed,
            2 => ConfirmationStatus::Canceled,
            _ => ConfirmationStatus::Pending,
        }
    }
}

impl From<ConfirmationStatus> for i16 {
    fn from(s: ConfirmationStatus) -> Self {
        s as i16
    }
}

impl ConfirmationStatus {
    /// An active booking occupies capacity on its assignment
    pub fn is_active(self) -> bool {
        self != ConfirmationStatus::Canceled
    }
}

impl std::fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConfirmationStatus::Pending => "Pending",
            ConfirmationStatus::Confirmed => "Confirmed",
            ConfirmationStatus::Canceled => "Canceled",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// AccountKind
// ---------------------------------------------------------------------------

/// The three account tables, selected explicitly at the API boundary
/// instead of passing table names around as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Customer,
    Trainer,
    Manager,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Customer => "customer",
            AccountKind::Trainer => "trainer",
            AccountKind::Manager => "manager",
        }
    }
}

impl std::str::FromStr for AccountKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(AccountKind::Customer),
            "trainer" => Ok(AccountKind::Trainer),
            "manager" => Ok(AccountKind::Manager),
            other => Err(AppError::Validation(format!("Unknown account kind: {}", other))),
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_status_round_trips_through_i16() {
        for status in [
            ConfirmationStatus::Pending,
            ConfirmationStatus::Confirmed,
            ConfirmationStatus::Canceled,
        ] {
            assert_eq!(ConfirmationStatus::from(i16::from(status)), status);
        }
    }

    #[test]
    fn unknown_status_falls_back_to_pending() {
        assert_eq!(ConfirmationStatus::from(42), ConfirmationStatus::Pending);
    }

    #[test]
    fn only_canceled_is_inactive() {
        assert!(ConfirmationStatus::Pending.is_active());
        assert!(ConfirmationStatus::Confirmed.is_active());
        assert!(!ConfirmationStatus::Canceled.is_active());
    }

    #[test]
    fn account_kind_parses_from_str() {
        assert_eq!("customer".parse::<AccountKind>().unwrap(), AccountKind::Customer);
        assert_eq!("manager".parse::<AccountKind>().unwrap(), AccountKind::Manager);
        assert!("admin".parse::<AccountKind>().is_err());
    }
}
