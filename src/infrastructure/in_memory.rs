use crate::domain::account::{Account, AccountStatus, Balance};
use crate::domain::ports::AccountRepository;
use crate::domain::scheme::SchemeSet;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory account repository.
///
/// Uses `Arc<RwLock<HashMap<String, Account>>>` so clones share the same accounts.
/// Reads hand out copies; the stored value only changes through `update_account`.
#[derive(Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-loaded with `accounts`, keyed by account number.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.account_number.clone(), account))
            .collect();
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }

    /// Creates a repository holding the demonstration account "1": 200.00, live,
    /// bank-to-bank transfers only.
    pub fn seeded() -> Self {
        Self::with_accounts([Account::new(
            "1",
            Balance::new(dec!(200.00)).unwrap_or_default(),
            AccountStatus::Live,
            SchemeSet::BANK_TO_BANK_TRANSFER,
        )])
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get_account(&self, account_number: &str) -> Result<Option<Account>> {
        tracing::debug!("Retrieving account information for account number : {account_number}");
        let accounts = self.accounts.read().await;
        Ok(accounts.get(account_number).cloned())
    }

    async fn update_account(&self, account: Account) -> Result<()> {
        tracing::debug!("Updating account : {}", account.account_number);
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.account_number.clone(), account);
        Ok(())
    }

    async fn all_accounts(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        Ok(all)
    }
}
