use super::account::Account;
use super::notification::Notification;
use crate::error::Result;
use async_trait::async_trait;

/// Storage the engine reads accounts from and writes debited accounts back to.
///
/// Accounts cross this boundary by value: the engine never assumes the store keeps
/// the instance it was handed. Serializing concurrent debits of one account is the
/// store's job.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn get_account(&self, account_number: &str) -> Result<Option<Account>>;
    /// Overwrites the stored account with the same account number.
    async fn update_account(&self, account: Account) -> Result<()>;
    async fn all_accounts(&self) -> Result<Vec<Account>>;
}

/// Receives one notification per authorization decision. Has no say in the outcome.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification<'_>);
}

pub type AccountRepositoryBox = Box<dyn AccountRepository>;
pub type NotifierBox = Box<dyn Notifier>;
