//! Adapters for the domain ports: account storage and decision notifiers.

pub mod in_memory;
pub mod notifier;
