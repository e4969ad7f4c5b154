use crate::domain::payment::{PaymentRequest, PaymentResult};
use crate::domain::scheme::PaymentScheme;
use crate::error::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct OutcomeRow<'a> {
    account: &'a str,
    amount: Decimal,
    scheme: PaymentScheme,
    date: NaiveDate,
    success: bool,
}

/// Writes one `account,amount,scheme,date,success` row per decision.
///
/// Rows are flushed as they are written so a consumer sees each decision immediately.
pub struct PaymentResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentResultWriter<W> {
    pub fn new(destination: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(destination),
        }
    }

    pub fn write_result(&mut self, request: &PaymentRequest, result: PaymentResult) -> Result<()> {
        self.writer.serialize(OutcomeRow {
            account: &request.debtor_account_number,
            amount: request.amount.value(),
            scheme: request.scheme,
            date: request.payment_date,
            success: result.success,
        })?;
        self.writer.flush()?;
        Ok(())
    }
}
