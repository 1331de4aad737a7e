//! Service types and tariffs
//!
//! This module defines the closed set of utility services the company bills
//! for, together with the rate pair (unit charge + flat service charge)
//! attached to each service.

use rust_decimal::Decimal;

/// Utility service categories
///
/// The set is closed: adding a new utility requires a code change. Bills
/// reference a service by a free-form string; [`ServiceKind::resolve`] maps
/// that string onto a variant exactly once, at the boundary where the bill
/// is created or loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceKind {
    /// Mains electricity, billed per kWh
    Electricity,

    /// Piped gas, billed per unit of consumption
    Gas,

    /// Water supply, billed per unit of consumption
    Water,
}

impl ServiceKind {
    /// All service kinds in declaration order
    ///
    /// Used wherever a deterministic iteration order is needed (tariff
    /// persistence, CLI listings).
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Electricity,
        ServiceKind::Gas,
        ServiceKind::Water,
    ];

    /// Resolve a free-form utility-type string to a service kind
    ///
    /// Matching is case-insensitive against the three known names. An
    /// unrecognized string resolves to `None`; callers treat that as a
    /// degraded (zero-priced) bill, never an error.
    ///
    /// # Arguments
    ///
    /// * `name` - The free-form utility-type string (e.g. "Electricity")
    ///
    /// # Returns
    ///
    /// * `Some(ServiceKind)` - If the name matches a known service
    /// * `None` - If the name is unrecognized
    pub fn resolve(name: &str) -> Option<ServiceKind> {
        match name.trim().to_lowercase().as_str() {
            "electricity" => Some(ServiceKind::Electricity),
            "gas" => Some(ServiceKind::Gas),
            "water" => Some(ServiceKind::Water),
            _ => None,
        }
    }

    /// The canonical upper-case name used in the tariff file
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Electricity => "ELECTRICITY",
            ServiceKind::Gas => "GAS",
            ServiceKind::Water => "WATER",
        }
    }

    /// The default tariff this service ships with
    ///
    /// Applied when the tariff file is missing or has no entry for the
    /// service: Electricity (0.12, 10.0), Gas (0.08, 15.0), Water
    /// (0.05, 20.0).
    pub fn default_tariff(&self) -> Tariff {
        match self {
            ServiceKind::Electricity => Tariff::new(Decimal::new(12, 2), Decimal::new(100, 1)),
            ServiceKind::Gas => Tariff::new(Decimal::new(8, 2), Decimal::new(150, 1)),
            ServiceKind::Water => Tariff::new(Decimal::new(5, 2), Decimal::new(200, 1)),
        }
    }
}

/// The rate pair for one service
///
/// `unit_charge` is currency per unit of meter reading; `service_charge` is
/// the flat fee added to every bill. Neither field is validated on update:
/// negative values are accepted, which is a known gap of the system rather
/// than a policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tariff {
    /// Currency charged per unit of the meter reading
    pub unit_charge: Decimal,

    /// Flat currency fee applied to every bill for this service
    pub service_charge: Decimal,
}

impl Tariff {
    /// Create a tariff from a rate pair
    pub fn new(unit_charge: Decimal, service_charge: Decimal) -> Self {
        Tariff {
            unit_charge,
            service_charge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::lowercase("electricity", Some(ServiceKind::Electricity))]
    #[case::capitalized("Gas", Some(ServiceKind::Gas))]
    #[case::uppercase("WATER", Some(ServiceKind::Water))]
    #[case::mixed_case("ElEcTrIcItY", Some(ServiceKind::Electricity))]
    #[case::padded("  gas  ", Some(ServiceKind::Gas))]
    #[case::unknown("internet", None)]
    #[case::empty("", None)]
    fn test_resolve(#[case] name: &str, #[case] expected: Option<ServiceKind>) {
        assert_eq!(ServiceKind::resolve(name), expected);
    }

    #[rstest]
    #[case(ServiceKind::Electricity, "ELECTRICITY")]
    #[case(ServiceKind::Gas, "GAS")]
    #[case(ServiceKind::Water, "WATER")]
    fn test_canonical_names(#[case] kind: ServiceKind, #[case] expected: &str) {
        assert_eq!(kind.name(), expected);
    }

    #[test]
    fn test_default_tariffs() {
        let gas = ServiceKind::Gas.default_tariff();
        assert_eq!(gas.unit_charge, Decimal::new(8, 2));
        assert_eq!(gas.service_charge, Decimal::new(150, 1));

        let electricity = ServiceKind::Electricity.default_tariff();
        assert_eq!(electricity.unit_charge, Decimal::new(12, 2));
        assert_eq!(electricity.service_charge, Decimal::new(100, 1));

        let water = ServiceKind::Water.default_tariff();
        assert_eq!(water.unit_charge, Decimal::new(5, 2));
        assert_eq!(water.service_charge, Decimal::new(200, 1));
    }

    #[test]
    fn test_all_covers_every_kind_once() {
        assert_eq!(ServiceKind::ALL.len(), 3);
        for kind in ServiceKind::ALL {
            assert_eq!(
                ServiceKind::ALL.iter().filter(|k| **k == kind).count(),
                1
            );
        }
    }
}
