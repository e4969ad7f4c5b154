use super::account::Amount;
use super::scheme::PaymentScheme;
use std::fmt;

/// One message per authorization, naming the branch the decision took.
///
/// The rendered text is stable: downstream log consumers match on it verbatim.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Notification<'a> {
    AccountNotFound {
        account_number: &'a str,
    },
    SchemeNotEnabled {
        scheme: PaymentScheme,
        account_number: &'a str,
    },
    InsufficientBalance {
        account_number: &'a str,
    },
    AccountNotLive {
        account_number: &'a str,
    },
    Authorized {
        amount: Amount,
        scheme: PaymentScheme,
        account_number: &'a str,
    },
}

impl Notification<'_> {
    pub fn account_number(&self) -> &str {
        match self {
            Notification::AccountNotFound { account_number }
            | Notification::SchemeNotEnabled { account_number, .. }
            | Notification::InsufficientBalance { account_number }
            | Notification::AccountNotLive { account_number }
            | Notification::Authorized { account_number, .. } => account_number,
        }
    }

    pub fn is_rejection(&self) -> bool {
        !matches!(self, Notification::Authorized { .. })
    }
}

impl fmt::Display for Notification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::AccountNotFound { account_number } => {
                write!(f, "No account found for account number : {account_number}")
            }
            Notification::SchemeNotEnabled {
                scheme,
                account_number,
            } => write!(
                f,
                "Payment scheme : {scheme} - is not enabled for account : {account_number}"
            ),
            Notification::InsufficientBalance { account_number } => write!(
                f,
                "Account : {account_number} - does not have the required balance to complete the transaction"
            ),
            Notification::AccountNotLive { account_number } => {
                write!(f, "Account : {account_number} - is not live")
            }
            Notification::Authorized {
                amount,
                scheme,
                account_number,
            } => write!(
                f,
                "Payment of {amount} via {scheme} authorized for account : {account_number}"
            ),
        }
    }
}
