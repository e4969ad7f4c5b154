use super::account::Amount;
use super::scheme::PaymentScheme;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A request to move `amount` out of the debtor account through `scheme`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRequest {
    pub debtor_account_number: String,
    pub amount: Amount,
    pub scheme: PaymentScheme,
    /// Informational only, never checked during authorization.
    pub payment_date: NaiveDate,
}

impl PaymentRequest {
    pub fn new(
        debtor_account_number: impl Into<String>,
        amount: Amount,
        scheme: PaymentScheme,
        payment_date: NaiveDate,
    ) -> Self {
        Self {
            debtor_account_number: debtor_account_number.into(),
            amount,
            scheme,
            payment_date,
        }
    }
}

/// Outcome of an authorization. Rejection reasons are reported through the notifier only.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct PaymentResult {
    pub success: bool,
}

impl PaymentResult {
    pub const fn approved() -> Self {
        Self { success: true }
    }

    pub const fn rejected() -> Self {
        Self { success: false }
    }
}
