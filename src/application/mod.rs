//! Application layer containing the payment authorization logic.
//!
//! This module defines the `AuthorizationEngine`, the single entry point that decides
//! whether a payment may be debited from an account.

pub mod engine;
