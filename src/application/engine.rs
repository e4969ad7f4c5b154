use crate::domain::account::Account;
use crate::domain::notification::Notification;
use crate::domain::payment::{PaymentRequest, PaymentResult};
use crate::domain::ports::{AccountRepositoryBox, NotifierBox};
use crate::error::Result;

/// Decides whether a payment may leave an account and, if so, debits it.
///
/// `AuthorizationEngine` holds no state between calls. Each request reads the account
/// fresh from the repository, runs the checks in a fixed order and writes the account
/// back at most once.
pub struct AuthorizationEngine {
    accounts: AccountRepositoryBox,
    notifier: NotifierBox,
}

impl AuthorizationEngine {
    /// Creates a new `AuthorizationEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `accounts` - Where accounts are read from and debited accounts are written to.
    /// * `notifier` - Receives one notification per decision.
    pub fn new(accounts: AccountRepositoryBox, notifier: NotifierBox) -> Self {
        Self { accounts, notifier }
    }

    /// Authorizes a single payment request.
    ///
    /// Checks run in this order and the first failure wins: the account exists, the
    /// scheme is allowed, the balance covers the amount, the account is live. Business
    /// rejections come back as `Ok` with `success == false`; only repository faults are
    /// returned as errors.
    pub async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentResult> {
        let account_number = request.debtor_account_number.as_str();

        let Some(mut account) = self.accounts.get_account(account_number).await? else {
            return Ok(self.reject(Notification::AccountNotFound { account_number }));
        };

        if !account.allows(request.scheme) {
            return Ok(self.reject(Notification::SchemeNotEnabled {
                scheme: request.scheme,
                account_number: &account.account_number,
            }));
        }

        // Balance is checked before status, so a non-live account that is also short
        // of funds reports the balance problem.
        if !account.balance.covers(request.amount) {
            return Ok(self.reject(Notification::InsufficientBalance {
                account_number: &account.account_number,
            }));
        }

        if !account.is_live() {
            return Ok(self.reject(Notification::AccountNotLive {
                account_number: &account.account_number,
            }));
        }

        account.debit(request.amount)?;
        self.accounts.update_account(account).await?;
        self.notifier.notify(&Notification::Authorized {
            amount: request.amount,
            scheme: request.scheme,
            account_number,
        });

        Ok(PaymentResult::approved())
    }

    /// Consumes the engine and returns the final state of all accounts.
    pub async fn into_accounts(self) -> Result<Vec<Account>> {
        self.accounts.all_accounts().await
    }

    fn reject(&self, notification: Notification<'_>) -> PaymentResult {
        self.notifier.notify(&notification);
        PaymentResult::rejected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{AccountStatus, Amount, Balance};
    use crate::domain::ports::AccountRepository;
    use crate::domain::scheme::{PaymentScheme, SchemeSet};
    use crate::error::PaymentError;
    use crate::infrastructure::in_memory::InMemoryAccountRepository;
    use crate::infrastructure::notifier::MemoryNotifier;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps the in-memory repository and counts every call the engine makes.
    #[derive(Clone, Default)]
    struct CountingRepository {
        inner: InMemoryAccountRepository,
        gets: Arc<AtomicUsize>,
        updates: Arc<AtomicUsize>,
    }

    impl CountingRepository {
        fn with_account(account: Account) -> Self {
            Self {
                inner: InMemoryAccountRepository::with_accounts([account]),
                ..Default::default()
            }
        }

        fn gets(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }

        fn updates(&self) -> usize {
            self.updates.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AccountRepository for CountingRepository {
        async fn get_account(&self, account_number: &str) -> Result<Option<Account>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get_account(account_number).await
        }

        async fn update_account(&self, account: Account) -> Result<()> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.inner.update_account(account).await
        }

        async fn all_accounts(&self) -> Result<Vec<Account>> {
            self.inner.all_accounts().await
        }
    }

    /// A repository whose backend is unreachable.
    struct UnreachableRepository;

    #[async_trait]
    impl AccountRepository for UnreachableRepository {
        async fn get_account(&self, _account_number: &str) -> Result<Option<Account>> {
            Err(PaymentError::IoError(std::io::Error::other(
                "connection refused",
            )))
        }

        async fn update_account(&self, _account: Account) -> Result<()> {
            Err(PaymentError::IoError(std::io::Error::other(
                "connection refused",
            )))
        }

        async fn all_accounts(&self) -> Result<Vec<Account>> {
            Ok(Vec::new())
        }
    }

    /// Reads succeed, every write fails.
    #[derive(Clone, Default)]
    struct ReadOnlyRepository {
        updates: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AccountRepository for ReadOnlyRepository {
        async fn get_account(&self, account_number: &str) -> Result<Option<Account>> {
            Ok(Some(Account::new(
                account_number,
                Balance::new(dec!(200.00)).unwrap(),
                AccountStatus::Live,
                SchemeSet::ALL,
            )))
        }

        async fn update_account(&self, _account: Account) -> Result<()> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            Err(PaymentError::IoError(std::io::Error::other("disk full")))
        }

        async fn all_accounts(&self) -> Result<Vec<Account>> {
            Ok(Vec::new())
        }
    }

    fn account(balance: Decimal, status: AccountStatus, allowed: SchemeSet) -> Account {
        Account::new("1", Balance::new(balance).unwrap(), status, allowed)
    }

    fn request(account_number: &str, amount: Decimal, scheme: PaymentScheme) -> PaymentRequest {
        PaymentRequest::new(
            account_number,
            Amount::new(amount).unwrap(),
            scheme,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    fn engine(repository: &CountingRepository, notifier: &MemoryNotifier) -> AuthorizationEngine {
        AuthorizationEngine::new(Box::new(repository.clone()), Box::new(notifier.clone()))
    }

    async fn stored_balance(repository: &CountingRepository) -> Decimal {
        repository
            .inner
            .get_account("1")
            .await
            .unwrap()
            .unwrap()
            .balance
            .value()
    }

    #[tokio::test]
    async fn test_successful_payment_debits_account() {
        let repository = CountingRepository::with_account(account(
            dec!(200.00),
            AccountStatus::Live,
            SchemeSet::BANK_TO_BANK_TRANSFER,
        ));
        let notifier = MemoryNotifier::new();
        let engine = engine(&repository, &notifier);

        let result = engine
            .authorize(&request("1", dec!(100.00), PaymentScheme::BankToBankTransfer))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(stored_balance(&repository).await, dec!(100.00));
        assert_eq!(repository.gets(), 1);
        assert_eq!(repository.updates(), 1);
        assert_eq!(
            notifier.messages(),
            vec!["Payment of 100.00 via BankToBankTransfer authorized for account : 1"]
        );
    }

    #[tokio::test]
    async fn test_account_not_found() {
        let repository = CountingRepository::with_account(account(
            dec!(200.00),
            AccountStatus::Live,
            SchemeSet::BANK_TO_BANK_TRANSFER,
        ));
        let notifier = MemoryNotifier::new();
        let engine = engine(&repository, &notifier);

        let result = engine
            .authorize(&request("999", dec!(100.00), PaymentScheme::BankToBankTransfer))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(repository.gets(), 1);
        assert_eq!(repository.updates(), 0);
        assert_eq!(
            notifier.messages(),
            vec!["No account found for account number : 999"]
        );
    }

    #[tokio::test]
    async fn test_scheme_not_enabled() {
        let cases = [
            (SchemeSet::AUTOMATED_CLEARING, PaymentScheme::ExpeditedTransfer),
            (SchemeSet::EXPEDITED_TRANSFER, PaymentScheme::BankToBankTransfer),
            (SchemeSet::BANK_TO_BANK_TRANSFER, PaymentScheme::AutomatedClearing),
            (SchemeSet::EMPTY, PaymentScheme::BankToBankTransfer),
        ];

        for (allowed, requested) in cases {
            let repository =
                CountingRepository::with_account(account(dec!(20), AccountStatus::Live, allowed));
            let notifier = MemoryNotifier::new();
            let engine = engine(&repository, &notifier);

            let result = engine
                .authorize(&request("1", dec!(20), requested))
                .await
                .unwrap();

            assert!(!result.success, "{requested} should be rejected");
            assert_eq!(repository.updates(), 0);
            assert_eq!(stored_balance(&repository).await, dec!(20));
            assert_eq!(
                notifier.messages(),
                vec![format!(
                    "Payment scheme : {requested} - is not enabled for account : 1"
                )]
            );
        }
    }

    #[tokio::test]
    async fn test_scheme_rejected_before_balance_is_considered() {
        let repository = CountingRepository::with_account(account(
            dec!(1.00),
            AccountStatus::Disabled,
            SchemeSet::BANK_TO_BANK_TRANSFER,
        ));
        let notifier = MemoryNotifier::new();
        let engine = engine(&repository, &notifier);

        let result = engine
            .authorize(&request("1", dec!(100.00), PaymentScheme::AutomatedClearing))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(
            notifier.messages(),
            vec!["Payment scheme : AutomatedClearing - is not enabled for account : 1"]
        );
    }

    #[tokio::test]
    async fn test_insufficient_balance() {
        let repository = CountingRepository::with_account(account(
            dec!(1.00),
            AccountStatus::Live,
            SchemeSet::AUTOMATED_CLEARING,
        ));
        let notifier = MemoryNotifier::new();
        let engine = engine(&repository, &notifier);

        let result = engine
            .authorize(&request("1", dec!(100.00), PaymentScheme::AutomatedClearing))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(repository.updates(), 0);
        assert_eq!(stored_balance(&repository).await, dec!(1.00));
        assert_eq!(
            notifier.messages(),
            vec!["Account : 1 - does not have the required balance to complete the transaction"]
        );
    }

    #[tokio::test]
    async fn test_balance_checked_before_status() {
        let repository = CountingRepository::with_account(account(
            dec!(1.00),
            AccountStatus::Disabled,
            SchemeSet::AUTOMATED_CLEARING,
        ));
        let notifier = MemoryNotifier::new();
        let engine = engine(&repository, &notifier);

        engine
            .authorize(&request("1", dec!(100.00), PaymentScheme::AutomatedClearing))
            .await
            .unwrap();

        assert_eq!(
            notifier.messages(),
            vec!["Account : 1 - does not have the required balance to complete the transaction"]
        );
    }

    #[tokio::test]
    async fn test_account_not_live() {
        for status in [AccountStatus::Disabled, AccountStatus::InboundPaymentsOnly] {
            let repository = CountingRepository::with_account(account(
                dec!(20.00),
                status,
                SchemeSet::AUTOMATED_CLEARING,
            ));
            let notifier = MemoryNotifier::new();
            let engine = engine(&repository, &notifier);

            let result = engine
                .authorize(&request("1", dec!(20.00), PaymentScheme::AutomatedClearing))
                .await
                .unwrap();

            assert!(!result.success, "{status:?} should be rejected");
            assert_eq!(repository.updates(), 0);
            assert_eq!(stored_balance(&repository).await, dec!(20.00));
            assert_eq!(notifier.messages(), vec!["Account : 1 - is not live"]);
        }
    }

    #[tokio::test]
    async fn test_each_enabled_scheme_on_live_account_updates_once() {
        for scheme in PaymentScheme::ALL {
            let repository = CountingRepository::with_account(account(
                dec!(20),
                AccountStatus::Live,
                scheme.into(),
            ));
            let notifier = MemoryNotifier::new();
            let engine = engine(&repository, &notifier);

            let result = engine
                .authorize(&request("1", dec!(20), scheme))
                .await
                .unwrap();

            assert!(result.success, "{scheme} should be authorized");
            assert_eq!(repository.gets(), 1);
            assert_eq!(repository.updates(), 1);
            assert_eq!(stored_balance(&repository).await, Decimal::ZERO);
        }
    }

    #[tokio::test]
    async fn test_repeated_requests_consume_balance_each_time() {
        let repository = CountingRepository::with_account(account(
            dec!(200.00),
            AccountStatus::Live,
            SchemeSet::BANK_TO_BANK_TRANSFER,
        ));
        let notifier = MemoryNotifier::new();
        let engine = engine(&repository, &notifier);
        let payment = request("1", dec!(100.00), PaymentScheme::BankToBankTransfer);

        assert!(engine.authorize(&payment).await.unwrap().success);
        assert!(engine.authorize(&payment).await.unwrap().success);
        assert!(!engine.authorize(&payment).await.unwrap().success);

        assert_eq!(stored_balance(&repository).await, Decimal::ZERO);
        assert_eq!(repository.updates(), 2);
    }

    #[tokio::test]
    async fn test_same_request_against_fresh_accounts_is_deterministic() {
        let payment = request("1", dec!(100.00), PaymentScheme::AutomatedClearing);
        let mut outcomes = Vec::new();

        for _ in 0..2 {
            let repository = CountingRepository::with_account(account(
                dec!(200.00),
                AccountStatus::Live,
                SchemeSet::BANK_TO_BANK_TRANSFER,
            ));
            let notifier = MemoryNotifier::new();
            let result = engine(&repository, &notifier)
                .authorize(&payment)
                .await
                .unwrap();
            outcomes.push((result, notifier.messages()));
        }

        assert_eq!(outcomes[0], outcomes[1]);
    }

    #[tokio::test]
    async fn test_repository_fault_is_an_error_not_a_rejection() {
        let notifier = MemoryNotifier::new();
        let engine =
            AuthorizationEngine::new(Box::new(UnreachableRepository), Box::new(notifier.clone()));

        let result = engine
            .authorize(&request("1", dec!(1), PaymentScheme::BankToBankTransfer))
            .await;

        assert!(matches!(result, Err(PaymentError::IoError(_))));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_is_an_error_and_not_reported_as_authorized() {
        let repository = ReadOnlyRepository::default();
        let notifier = MemoryNotifier::new();
        let engine =
            AuthorizationEngine::new(Box::new(repository.clone()), Box::new(notifier.clone()));

        let result = engine
            .authorize(&request("1", dec!(100.00), PaymentScheme::ExpeditedTransfer))
            .await;

        assert!(matches!(result, Err(PaymentError::IoError(_))));
        assert_eq!(repository.updates.load(Ordering::SeqCst), 1);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_into_accounts_returns_final_state() {
        let repository = CountingRepository::with_account(account(
            dec!(50),
            AccountStatus::Live,
            SchemeSet::ALL,
        ));
        let notifier = MemoryNotifier::new();
        let engine = engine(&repository, &notifier);

        engine
            .authorize(&request("1", dec!(12.5), PaymentScheme::ExpeditedTransfer))
            .await
            .unwrap();

        let accounts = engine.into_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].balance.value(), dec!(37.5));
    }
}
