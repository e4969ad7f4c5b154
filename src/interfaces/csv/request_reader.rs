use super::deserialize_decimal;
use crate::domain::account::Amount;
use crate::domain::payment::PaymentRequest;
use crate::domain::scheme::PaymentScheme;
use crate::error::{PaymentError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One line of a payment request file: `account,amount,scheme,date`.
#[derive(Debug, Deserialize)]
struct PaymentRow {
    account: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    amount: Decimal,
    scheme: PaymentScheme,
    #[serde(default)]
    date: Option<NaiveDate>,
}

/// Reads payment requests from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<PaymentRequest>`.
/// Rows without a date are stamped with the reader's default date.
pub struct PaymentRequestReader<R: Read> {
    reader: csv::Reader<R>,
    default_date: NaiveDate,
}

impl<R: Read> PaymentRequestReader<R> {
    /// Creates a new reader whose undated rows are dated today.
    pub fn new(source: R) -> Self {
        Self::with_default_date(source, chrono::Local::now().date_naive())
    }

    pub fn with_default_date(source: R, default_date: NaiveDate) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self {
            reader,
            default_date,
        }
    }

    /// Returns an iterator that lazily reads and validates requests.
    ///
    /// A bad row yields an error for that row only; iteration carries on with the next one.
    pub fn requests(self) -> impl Iterator<Item = Result<PaymentRequest>> {
        let default_date = self.default_date;
        self.reader
            .into_deserialize::<PaymentRow>()
            .map(move |result| {
                let row = result.map_err(PaymentError::from)?;
                if row.account.is_empty() {
                    return Err(PaymentError::ValidationError(
                        "Debtor account number is empty".to_string(),
                    ));
                }
                Ok(PaymentRequest::new(
                    row.account,
                    Amount::new(row.amount)?,
                    row.scheme,
                    row.date.unwrap_or(default_date),
                ))
            })
    }
}
