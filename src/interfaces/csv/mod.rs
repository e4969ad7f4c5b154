//! CSV adapters used by the command-line runner.

pub mod account_reader;
pub mod account_writer;
pub mod request_reader;
pub mod result_writer;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Parses a decimal from its text form so the scale written in the file survives
/// (`200.00` stays `200.00`).
pub(crate) fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom)
}
