use super::scheme::{PaymentScheme, SchemeSet};
use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the funds held on an account.
///
/// This is a wrapper around `rust_decimal::Decimal` so balances never drift through
/// floating-point rounding. A balance can never be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Balance(Decimal);

/// Represents a positive monetary amount for a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Balance cannot be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn covers(&self, amount: Amount) -> bool {
        self.0 >= amount.0
    }

    /// Returns the balance left after taking `amount`, or `None` if it would go negative.
    pub fn checked_sub(self, amount: Amount) -> Option<Self> {
        if self.covers(amount) {
            Some(Self(self.0 - amount.0))
        } else {
            None
        }
    }
}

impl TryFrom<Decimal> for Balance {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle state of an account. Only `Live` accounts may send money.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum AccountStatus {
    Live,
    Disabled,
    InboundPaymentsOnly,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    /// Externally assigned, unique identifier.
    pub account_number: String,
    pub balance: Balance,
    pub status: AccountStatus,
    /// Schemes the account may use for outbound payments.
    pub allowed_schemes: SchemeSet,
}

impl Account {
    pub fn new(
        account_number: impl Into<String>,
        balance: Balance,
        status: AccountStatus,
        allowed_schemes: SchemeSet,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            balance,
            status,
            allowed_schemes,
        }
    }

    pub fn allows(&self, scheme: PaymentScheme) -> bool {
        self.allowed_schemes.contains(scheme)
    }

    pub fn is_live(&self) -> bool {
        self.status == AccountStatus::Live
    }

    /// Takes `amount` from the balance if it is covered. The balance is left untouched otherwise.
    pub fn debit(&mut self, amount: Amount) -> Result<(), PaymentError> {
        match self.balance.checked_sub(amount) {
            Some(remaining) => {
                self.balance = remaining;
                Ok(())
            }
            None => Err(PaymentError::ValidationError(format!(
                "Insufficient funds on account {}",
                self.account_number
            ))),
        }
    }
}
