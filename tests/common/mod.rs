use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub const ACCOUNTS_HEADER: &str = "account_number,balance,status,allowed_schemes";
pub const REQUESTS_HEADER: &str = "account,amount,scheme,date";

/// Writes a CSV file with `header` followed by `rows`, one per line.
pub fn csv_file(header: &str, rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{}", header)?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    file.flush()?;
    Ok(file)
}

/// The accounts used across the scenario tests.
#[allow(dead_code)]
pub fn scenario_accounts() -> Result<NamedTempFile, Error> {
    csv_file(
        ACCOUNTS_HEADER,
        &[
            "1,200.00,Live,BankToBankTransfer",
            "2,1.00,Live,AutomatedClearing",
            "3,20.00,Disabled,AutomatedClearing",
            "4,20.00,InboundPaymentsOnly,AutomatedClearing",
        ],
    )
}
