//! Bill storage
//!
//! This module provides the BillStore, the authoritative ordered collection
//! of utility bills. The store hydrates from its backing file at open,
//! assigns sequential IDs, and rewrites the full collection on every
//! mutation.
//!
//! # Duplicate Handling
//!
//! If the backing file contains two records with the same ID, only the
//! first occurrence is kept; later ones are dropped with a warning.
//!
//! # Write Failures
//!
//! A failed persist is returned to the caller as an error, but the
//! in-memory mutation is NOT rolled back: the store stays ahead of the disk
//! until the next successful save. Writes are atomic, so a failure never
//! corrupts the existing file.

use crate::core::pricing;
use crate::core::tariffs::TariffBook;
use crate::io::storage::BillStorage;
use crate::types::{BillId, BillingError, UtilityBill};
use rust_decimal::Decimal;

/// Authoritative ordered collection of utility bills
pub struct BillStore {
    storage: Box<dyn BillStorage>,
    bills: Vec<UtilityBill>,
    next_id: BillId,
}

impl BillStore {
    /// Open the store, hydrating from the backing storage
    ///
    /// Malformed records were already isolated by the storage layer;
    /// here duplicate IDs collapse first-seen-wins, every surviving bill is
    /// repriced against the current tariffs (the persisted price column is
    /// a cache), and the next-ID counter becomes `max(ids) + 1` (1 for an
    /// empty store).
    ///
    /// # Arguments
    ///
    /// * `storage` - The persistence backend
    /// * `tariffs` - Current rates used to recompute loaded prices
    ///
    /// # Returns
    ///
    /// * `Ok(BillStore)` - Ready store (empty if the file was missing)
    /// * `Err(BillingError)` - The backing store was present but unreadable
    pub fn open(
        storage: Box<dyn BillStorage>,
        tariffs: &TariffBook,
    ) -> Result<Self, BillingError> {
        let loaded = storage.load()?;

        let mut bills: Vec<UtilityBill> = Vec::with_capacity(loaded.len());
        for mut bill in loaded {
            if bills.iter().any(|b| b.id == bill.id) {
                log::warn!("duplicate bill id {}, keeping the first occurrence", bill.id);
                continue;
            }
            bill.price = pricing::price_bill(&bill, tariffs);
            bills.push(bill);
        }

        let next_id = bills.iter().map(|b| b.id).max().map_or(1, |max| max + 1);

        Ok(BillStore {
            storage,
            bills,
            next_id,
        })
    }

    /// Add a bill and persist the collection
    ///
    /// Assigns the next sequential ID, resolves the service kind from
    /// `utility_type` (once, here), and prices the bill against the current
    /// tariffs. An unrecognized utility type still creates the bill, priced
    /// at zero.
    ///
    /// # Arguments
    ///
    /// * `username` - Owner reference (not validated against the customer store)
    /// * `utility_type` - Free-form service name
    /// * `reading` - Meter measurement
    /// * `date` - Bill date, YYYY-MM-DD expected (not validated)
    /// * `tariffs` - Current rates
    ///
    /// # Returns
    ///
    /// * `Ok(BillId)` - The ID assigned to the new bill
    /// * `Err(BillingError)` - Persisting the collection failed
    pub fn add(
        &mut self,
        username: &str,
        utility_type: &str,
        reading: Decimal,
        date: &str,
        tariffs: &TariffBook,
    ) -> Result<BillId, BillingError> {
        let mut bill = UtilityBill::new(self.next_id, username, utility_type, reading, date);
        bill.price = pricing::price_bill(&bill, tariffs);

        let id = bill.id;
        self.bills.push(bill);
        self.next_id += 1;
        self.persist()?;
        Ok(id)
    }

    /// Replace a bill's reading, reprice it, and persist
    ///
    /// Silent no-op when no bill has the given ID.
    pub fn edit(
        &mut self,
        id: BillId,
        new_reading: Decimal,
        tariffs: &TariffBook,
    ) -> Result<(), BillingError> {
        let Some(bill) = self.bills.iter_mut().find(|b| b.id == id) else {
            log::debug!("edit: bill {} not found, nothing to do", id);
            return Ok(());
        };

        bill.meter_measurement = new_reading;
        let price = pricing::price_bill(bill, tariffs);
        bill.price = price;
        self.persist()
    }

    /// Remove a bill and persist
    ///
    /// Silent no-op when no bill has the given ID, which makes deletion
    /// idempotent.
    pub fn delete(&mut self, id: BillId) -> Result<(), BillingError> {
        let before = self.bills.len();
        self.bills.retain(|b| b.id != id);
        if self.bills.len() == before {
            log::debug!("delete: bill {} not found, nothing to do", id);
            return Ok(());
        }
        self.persist()
    }

    /// Look a bill up by ID
    pub fn find(&self, id: BillId) -> Option<&UtilityBill> {
        self.bills.iter().find(|b| b.id == id)
    }

    /// Every bill, in insertion order
    pub fn bills(&self) -> &[UtilityBill] {
        &self.bills
    }

    /// Bills owned by exactly this username
    pub fn bills_owned_by(&self, username: &str) -> Vec<&UtilityBill> {
        self.bills
            .iter()
            .filter(|b| b.username == username)
            .collect()
    }

    /// Bills whose owner's username contains `fragment`
    ///
    /// Substring match; this is the admin fuzzy search ("doe" finds both
    /// "john_doe" and "hakeem_doe").
    pub fn search_by_username(&self, fragment: &str) -> Vec<&UtilityBill> {
        self.bills
            .iter()
            .filter(|b| b.username.contains(fragment))
            .collect()
    }

    /// Sum of the price of every bill in memory
    ///
    /// Zero-priced (unresolvable) bills contribute nothing, so the total
    /// silently undercounts them.
    pub fn total_price(&self) -> Decimal {
        self.bills.iter().map(|b| b.price).sum()
    }

    fn persist(&self) -> Result<(), BillingError> {
        self.storage.save_all(&self.bills)
    }
}
