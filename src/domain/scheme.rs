use crate::error::PaymentError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A payment rail a debit can be sent through.
///
/// Exactly one scheme is named per request. Accounts carry the schemes they may use
/// as a [`SchemeSet`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum PaymentScheme {
    AutomatedClearing,
    ExpeditedTransfer,
    BankToBankTransfer,
}

impl PaymentScheme {
    pub const ALL: [PaymentScheme; 3] = [
        PaymentScheme::AutomatedClearing,
        PaymentScheme::ExpeditedTransfer,
        PaymentScheme::BankToBankTransfer,
    ];

    /// The flag this scheme occupies inside a [`SchemeSet`].
    pub const fn flag(self) -> SchemeSet {
        match self {
            PaymentScheme::AutomatedClearing => SchemeSet::AUTOMATED_CLEARING,
            PaymentScheme::ExpeditedTransfer => SchemeSet::EXPEDITED_TRANSFER,
            PaymentScheme::BankToBankTransfer => SchemeSet::BANK_TO_BANK_TRANSFER,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PaymentScheme::AutomatedClearing => "AutomatedClearing",
            PaymentScheme::ExpeditedTransfer => "ExpeditedTransfer",
            PaymentScheme::BankToBankTransfer => "BankToBankTransfer",
        }
    }
}

impl fmt::Display for PaymentScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaymentScheme {
    type Err = PaymentError;

    /// Accepts `BankToBankTransfer`, `bank-to-bank-transfer` and `bank_to_bank_transfer`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        PaymentScheme::ALL
            .into_iter()
            .find(|scheme| scheme.name().to_ascii_lowercase() == normalized)
            .ok_or_else(|| PaymentError::ValidationError(format!("Unknown payment scheme: {s}")))
    }
}

impl Serialize for PaymentScheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for PaymentScheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The set of schemes an account may use for outbound payments.
///
/// Each scheme owns one independent bit, so an account can allow none, some, or all of them.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct SchemeSet(u8);

impl SchemeSet {
    pub const EMPTY: Self = Self(0);
    pub const AUTOMATED_CLEARING: Self = Self(1 << 0);
    pub const EXPEDITED_TRANSFER: Self = Self(1 << 1);
    pub const BANK_TO_BANK_TRANSFER: Self = Self(1 << 2);
    pub const ALL: Self = Self(
        Self::AUTOMATED_CLEARING.0 | Self::EXPEDITED_TRANSFER.0 | Self::BANK_TO_BANK_TRANSFER.0,
    );

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, scheme: PaymentScheme) -> bool {
        self.0 & scheme.flag().0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn with(self, scheme: PaymentScheme) -> Self {
        Self(self.0 | scheme.flag().0)
    }

    pub fn insert(&mut self, scheme: PaymentScheme) {
        *self = self.with(scheme);
    }

    pub fn remove(&mut self, scheme: PaymentScheme) {
        self.0 &= !scheme.flag().0;
    }

    pub fn iter(self) -> impl Iterator<Item = PaymentScheme> {
        PaymentScheme::ALL
            .into_iter()
            .filter(move |scheme| self.contains(*scheme))
    }
}

impl From<PaymentScheme> for SchemeSet {
    fn from(scheme: PaymentScheme) -> Self {
        scheme.flag()
    }
}

impl FromIterator<PaymentScheme> for SchemeSet {
    fn from_iter<I: IntoIterator<Item = PaymentScheme>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, SchemeSet::with)
    }
}

impl fmt::Display for SchemeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(PaymentScheme::name).collect();
        f.write_str(&names.join("|"))
    }
}

impl FromStr for SchemeSet {
    type Err = PaymentError;

    /// Parses `|`-separated scheme names. An empty string is the empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(PaymentScheme::from_str)
            .collect()
    }
}

impl Serialize for SchemeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
