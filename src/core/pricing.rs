//! Bill pricing
//!
//! The pricing rule of the whole system:
//!
//! ```text
//! price = meter_measurement * unit_charge + service_charge
//! ```
//!
//! A bill whose utility-type string resolved to no known service is priced
//! at zero with a logged warning. That is a degraded result, not an error:
//! callers aggregating prices must expect unresolvable bills to silently
//! undercount the total.
//!
//! No rounding happens here; two-decimal rounding is a display concern.

use crate::core::tariffs::TariffBook;
use crate::types::{Tariff, UtilityBill};
use rust_decimal::Decimal;

/// Price a reading against a tariff
///
/// Pure arithmetic: `reading * unit_charge + service_charge`.
pub fn compute_price(reading: Decimal, tariff: &Tariff) -> Decimal {
    reading * tariff.unit_charge + tariff.service_charge
}

/// Price a bill against the current tariffs
///
/// Resolution already happened at the bill's boundary (`bill.service`);
/// this only looks the tariff up. An unresolved service or missing tariff
/// degrades to `Decimal::ZERO` and logs a warning naming the bill.
///
/// # Arguments
///
/// * `bill` - The bill to price (its `price` field is NOT modified)
/// * `tariffs` - The current rate registry
///
/// # Returns
///
/// The computed price, or zero for an unresolvable service
pub fn price_bill(bill: &UtilityBill, tariffs: &TariffBook) -> Decimal {
    match bill.service.and_then(|kind| tariffs.get(kind)) {
        Some(tariff) => compute_price(bill.meter_measurement, &tariff),
        None => {
            log::warn!(
                "bill {} has unresolvable utility type '{}', pricing at zero",
                bill.id,
                bill.utility_type
            );
            Decimal::ZERO
        }
    }
}
