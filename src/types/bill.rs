//! Bill-related types
//!
//! This module defines the UtilityBill record that the bill store manages
//! and persists.

use super::service::ServiceKind;
use rust_decimal::Decimal;

/// Bill identifier
///
/// Assigned sequentially by the bill store, starting at 1.
pub type BillId = u32;

/// One billing record
///
/// The owning customer is referenced by username string match only; there is
/// no enforced relation to the customer store. `utility_type` keeps the
/// caller's original free-form spelling so the record round-trips through
/// the backing file unchanged, while `service` carries the resolution of
/// that string performed once when the bill was created or loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityBill {
    /// Unique identifier within the store
    pub id: BillId,

    /// Username of the owning customer
    pub username: String,

    /// Free-form utility-type string as supplied by the caller
    pub utility_type: String,

    /// The service `utility_type` resolved to, if it resolved at all
    ///
    /// `None` marks a bill whose type string matched no known service; such
    /// bills carry a zero price until edited.
    pub service: Option<ServiceKind>,

    /// Meter reading the price is computed from
    ///
    /// Expected to be non-negative, but not enforced.
    pub meter_measurement: Decimal,

    /// Computed price: `meter_measurement * unit_charge + service_charge`
    ///
    /// Zero when `service` is `None`. Recomputed whenever the reading
    /// changes and whenever the store reloads from disk.
    pub price: Decimal,

    /// Bill date, expected format YYYY-MM-DD (not validated)
    pub date: String,
}

impl UtilityBill {
    /// Build a bill, resolving the service kind from the type string
    ///
    /// The price is NOT computed here; the caller prices the bill against
    /// the current tariffs (see `core::pricing`). This keeps the record
    /// construction pure.
    pub fn new(
        id: BillId,
        username: impl Into<String>,
        utility_type: impl Into<String>,
        meter_measurement: Decimal,
        date: impl Into<String>,
    ) -> Self {
        let utility_type = utility_type.into();
        let service = ServiceKind::resolve(&utility_type);
        UtilityBill {
            id,
            username: username.into(),
            utility_type,
            service,
            meter_measurement,
            price: Decimal::ZERO,
            date: date.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resolves_known_service() {
        let bill = UtilityBill::new(1, "alice", "Electricity", Decimal::new(150, 0), "2023-08-10");
        assert_eq!(bill.service, Some(ServiceKind::Electricity));
        assert_eq!(bill.utility_type, "Electricity");
        assert_eq!(bill.price, Decimal::ZERO);
    }

    #[test]
    fn test_new_keeps_unknown_service_unresolved() {
        let bill = UtilityBill::new(2, "bob", "internet", Decimal::new(10, 0), "2023-08-10");
        assert_eq!(bill.service, None);
        assert_eq!(bill.utility_type, "internet");
    }
}
