//! Domain types and the ports the authorization engine depends on.

pub mod account;
pub mod notification;
pub mod payment;
pub mod ports;
pub mod scheme;
