//! Tariff registry
//!
//! This module provides the TariffBook, the authoritative mapping from
//! service kind to its current rate pair. The book seeds itself with each
//! service's default tariff, overlays whatever the backing file holds, and
//! persists the full registry on every update.
//!
//! Updates are global and immediate: every pricing computation performed
//! after a setter call sees the new rates. Already-stored bills are not
//! repriced retroactively (they are repriced on the next store load).
//!
//! Setters perform no validation; negative rates are accepted. That is a
//! known gap of the system, not a policy.

use crate::io::storage::TariffStorage;
use crate::types::{BillingError, ServiceKind, Tariff};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Authoritative per-service rate registry
pub struct TariffBook {
    storage: Box<dyn TariffStorage>,
    tariffs: HashMap<ServiceKind, Tariff>,
}

impl TariffBook {
    /// Open the registry, hydrating from the backing store
    ///
    /// Every service starts at its default tariff; entries loaded from the
    /// store override the defaults. A missing backing file therefore yields
    /// a registry of pure defaults.
    ///
    /// # Arguments
    ///
    /// * `storage` - The persistence backend for the registry
    ///
    /// # Returns
    ///
    /// * `Ok(TariffBook)` - Ready registry
    /// * `Err(BillingError)` - The backing store was present but unreadable
    pub fn open(storage: Box<dyn TariffStorage>) -> Result<Self, BillingError> {
        let mut tariffs: HashMap<ServiceKind, Tariff> = ServiceKind::ALL
            .iter()
            .map(|kind| (*kind, kind.default_tariff()))
            .collect();

        for (kind, tariff) in storage.load()? {
            tariffs.insert(kind, tariff);
        }

        Ok(TariffBook { storage, tariffs })
    }

    /// Look up the tariff for a service
    ///
    /// # Returns
    ///
    /// * `Some(Tariff)` - The current rate pair
    /// * `None` - The service has no registered tariff
    pub fn get(&self, kind: ServiceKind) -> Option<Tariff> {
        self.tariffs.get(&kind).copied()
    }

    /// Current unit charge for a service (zero if unregistered)
    pub fn unit_charge(&self, kind: ServiceKind) -> Decimal {
        self.get(kind).map(|t| t.unit_charge).unwrap_or(Decimal::ZERO)
    }

    /// Current flat service charge for a service (zero if unregistered)
    pub fn service_charge(&self, kind: ServiceKind) -> Decimal {
        self.get(kind)
            .map(|t| t.service_charge)
            .unwrap_or(Decimal::ZERO)
    }

    /// Set the unit charge for a service and persist the registry
    ///
    /// No validation is applied to `value`.
    pub fn set_unit_charge(
        &mut self,
        kind: ServiceKind,
        value: Decimal,
    ) -> Result<(), BillingError> {
        let tariff = self
            .tariffs
            .entry(kind)
            .or_insert_with(|| Tariff::new(Decimal::ZERO, Decimal::ZERO));
        tariff.unit_charge = value;
        self.persist()
    }

    /// Set the flat service charge for a service and persist the registry
    ///
    /// No validation is applied to `value`.
    pub fn set_service_charge(
        &mut self,
        kind: ServiceKind,
        value: Decimal,
    ) -> Result<(), BillingError> {
        let tariff = self
            .tariffs
            .entry(kind)
            .or_insert_with(|| Tariff::new(Decimal::ZERO, Decimal::ZERO));
        tariff.service_charge = value;
        self.persist()
    }

    /// Registry contents in declaration order
    ///
    /// Deterministic ordering for persistence and display.
    pub fn entries(&self) -> Vec<(ServiceKind, Tariff)> {
        ServiceKind::ALL
            .iter()
            .filter_map(|kind| self.get(*kind).map(|tariff| (*kind, tariff)))
            .collect()
    }

    fn persist(&self) -> Result<(), BillingError> {
        self.storage.save_all(&self.entries())
    }
}
