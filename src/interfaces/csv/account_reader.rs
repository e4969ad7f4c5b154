use super::deserialize_decimal;
use crate::domain::account::{Account, AccountStatus, Balance};
use crate::domain::scheme::SchemeSet;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct AccountRow {
    account_number: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    balance: Decimal,
    status: AccountStatus,
    #[serde(default)]
    allowed_schemes: SchemeSet,
}

impl TryFrom<AccountRow> for Account {
    type Error = PaymentError;

    fn try_from(row: AccountRow) -> Result<Self> {
        Ok(Account::new(
            row.account_number,
            Balance::new(row.balance)?,
            row.status,
            row.allowed_schemes,
        ))
    }
}

/// Reads account snapshots (`account_number,balance,status,allowed_schemes`) used to
/// seed a repository. `allowed_schemes` is a `|`-separated list of scheme names.
pub struct AccountReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Unlike payment requests, a seed file is all-or-nothing: the first bad row fails the load.
    /// Account numbers must be unique within the file.
    pub fn accounts(self) -> Result<Vec<Account>> {
        let mut seen = HashSet::new();
        let mut accounts = Vec::new();
        for result in self.reader.into_deserialize::<AccountRow>() {
            let account = Account::try_from(result?)?;
            if !seen.insert(account.account_number.clone()) {
                return Err(PaymentError::ValidationError(format!(
                    "Duplicate account number: {}",
                    account.account_number
                )));
            }
            accounts.push(account);
        }
        Ok(accounts)
    }
}
