//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `bill`: Bill record and identifier
//! - `customer`: Customer record
//! - `service`: Service kinds and tariffs
//! - `error`: Error types for the billing engine

pub mod bill;
pub mod customer;
pub mod error;
pub mod service;

pub use bill::{BillId, UtilityBill};
pub use customer::Customer;
pub use error::BillingError;
pub use service::{ServiceKind, Tariff};
