//! Application facade
//!
//! This module provides BillingApp, the explicitly-constructed aggregate
//! that owns the tariff registry and the two stores and routes operations
//! between them. There are no globals: everything the engine needs is built
//! here from a data directory and passed by reference to whoever needs it.
//!
//! The facade is thin glue; the rules live in the stores and the pricing
//! module.

use crate::core::bill_store::BillStore;
use crate::core::customer_store::CustomerStore;
use crate::core::tariffs::TariffBook;
use crate::io::storage::{BillFile, CustomerFile, TariffFile};
use crate::types::{BillId, BillingError, Customer, ServiceKind, Tariff, UtilityBill};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

/// Hardcoded staff username
pub const ADMIN_USERNAME: &str = "admin";
/// Hardcoded staff password (plaintext, as the rest of the system)
pub const ADMIN_PASSWORD: &str = "admin";

/// Names of the backing files inside the data directory
const BILLS_FILE: &str = "bills.txt";
const CUSTOMERS_FILE: &str = "customers.txt";
const PRICES_FILE: &str = "service_prices.txt";

/// The assembled billing application
///
/// Owns the tariff registry, the bill store and the customer store, plus
/// the logged-in customer for the lifetime of the process.
pub struct BillingApp {
    tariffs: TariffBook,
    bills: BillStore,
    customers: CustomerStore,
    session: Option<String>,
}

impl BillingApp {
    /// Assemble the application from a data directory
    ///
    /// Creates the directory if needed and opens the three stores against
    /// `bills.txt`, `customers.txt` and `service_prices.txt` inside it.
    /// Missing files mean empty stores / default tariffs.
    pub fn open(data_dir: &Path) -> Result<Self, BillingError> {
        fs::create_dir_all(data_dir)?;

        let tariffs = TariffBook::open(Box::new(TariffFile::new(data_dir.join(PRICES_FILE))))?;
        let bills = BillStore::open(
            Box::new(BillFile::new(data_dir.join(BILLS_FILE))),
            &tariffs,
        )?;
        let customers =
            CustomerStore::open(Box::new(CustomerFile::new(data_dir.join(CUSTOMERS_FILE))))?;

        Ok(BillingApp {
            tariffs,
            bills,
            customers,
            session: None,
        })
    }

    // --- customer session ---

    /// Register a new customer
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<(), BillingError> {
        self.customers.register(username, password, email)
    }

    /// Log a customer in, remembering them as the current session
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), BillingError> {
        if self.customers.validate_login(username, password) {
            self.session = Some(username.to_string());
            Ok(())
        } else {
            Err(BillingError::InvalidCredentials)
        }
    }

    /// Drop the current session, if any
    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Username of the logged-in customer, if any
    pub fn current_user(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Check staff credentials (hardcoded admin/admin pair)
    pub fn admin_login(username: &str, password: &str) -> bool {
        username == ADMIN_USERNAME && password == ADMIN_PASSWORD
    }

    // --- bills ---

    /// Add a bill for a customer
    pub fn add_bill(
        &mut self,
        username: &str,
        utility_type: &str,
        reading: Decimal,
        date: &str,
    ) -> Result<BillId, BillingError> {
        self.bills
            .add(username, utility_type, reading, date, &self.tariffs)
    }

    /// Change a bill's meter reading (reprices it)
    pub fn edit_bill(&mut self, id: BillId, new_reading: Decimal) -> Result<(), BillingError> {
        self.bills.edit(id, new_reading, &self.tariffs)
    }

    /// Delete a bill (idempotent)
    pub fn delete_bill(&mut self, id: BillId) -> Result<(), BillingError> {
        self.bills.delete(id)
    }

    /// Look a bill up by ID
    pub fn find_bill(&self, id: BillId) -> Option<&UtilityBill> {
        self.bills.find(id)
    }

    /// Every bill, in insertion order
    pub fn bills(&self) -> &[UtilityBill] {
        self.bills.bills()
    }

    /// Bills owned by exactly this username
    pub fn bills_owned_by(&self, username: &str) -> Vec<&UtilityBill> {
        self.bills.bills_owned_by(username)
    }

    /// Admin fuzzy search: bills whose owner contains the fragment
    pub fn search_bills(&self, fragment: &str) -> Vec<&UtilityBill> {
        self.bills.search_by_username(fragment)
    }

    /// Sum of every stored bill's price
    pub fn total_price(&self) -> Decimal {
        self.bills.total_price()
    }

    // --- customers ---

    /// Every registered customer
    pub fn customers(&self) -> &[Customer] {
        self.customers.customers()
    }

    /// Remove a customer (their bills remain in the bill store)
    pub fn remove_customer(&mut self, username: &str) -> Result<(), BillingError> {
        self.customers.remove(username)
    }

    /// Whether the credentials match a registered customer
    pub fn validate_login(&self, username: &str, password: &str) -> bool {
        self.customers.validate_login(username, password)
    }

    // --- tariffs ---

    /// Current tariff for a service
    pub fn tariff(&self, kind: ServiceKind) -> Option<Tariff> {
        self.tariffs.get(kind)
    }

    /// All tariffs in declaration order
    pub fn tariff_entries(&self) -> Vec<(ServiceKind, Tariff)> {
        self.tariffs.entries()
    }

    /// Update a service's unit charge
    pub fn set_unit_charge(
        &mut self,
        kind: ServiceKind,
        value: Decimal,
    ) -> Result<(), BillingError> {
        self.tariffs.set_unit_charge(kind, value)
    }

    /// Update a service's flat service charge
    pub fn set_service_charge(
        &mut self,
        kind: ServiceKind,
        value: Decimal,
    ) -> Result<(), BillingError> {
        self.tariffs.set_service_charge(kind, value)
    }
}
