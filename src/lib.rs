//! Utility Billing Engine Library
//! # Overview
//!
//! This library implements the core of a utility-billing application:
//! customers register and manage bills for electricity, gas and water;
//! staff adjust per-service tariffs and browse every customer's bills.
//! State lives in flat text files rewritten in full on every mutation.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (UtilityBill, Customer, ServiceKind, etc.)
//! - [`cli`] - CLI argument parsing and subcommand dispatch
//! - [`core`] - Business logic components:
//!   - [`core::pricing`] - The bill pricing computation
//!   - [`core::tariffs`] - The per-service rate registry
//!   - [`core::bill_store`] - Bill collection with CRUD and search
//!   - [`core::customer_store`] - Customer collection with registration rules
//!   - [`core::facade`] - The assembled application
//! - [`io`] - Flat-file persistence behind pluggable storage traits
//!
//! # Pricing
//!
//! Every bill is priced as `reading * unit_charge + service_charge` using
//! the tariff of the service its utility-type string resolved to. A string
//! that resolves to no known service prices the bill at zero with a logged
//! warning; that is a degraded result, not an error.
//!
//! # Failure Semantics
//!
//! Lookup misses return `None`, registration conflicts return structured
//! errors, and I/O failures surface as [`types::BillingError::Io`]. A
//! failed write leaves the in-memory state ahead of the disk; writes are
//! atomic, so the previous file contents are never corrupted.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{BillStore, BillingApp, CustomerStore, TariffBook};
pub use crate::types::{BillId, BillingError, Customer, ServiceKind, Tariff, UtilityBill};
