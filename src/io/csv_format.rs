//! CSV format handling for the bill and customer backing files
//!
//! Both files are headerless, one record per line:
//!
//! - Bills: `id,username,utilityType,meterMeasurement,price,date`
//! - Customers: `username,password,email`
//!
//! This module centralizes the format concerns: row structures for
//! deserialization, conversion from rows to domain types, and record
//! serialization back out. All functions are pure (no file I/O) for easy
//! testing; the `storage` module owns the files themselves.

use crate::types::{BillId, BillingError, Customer, UtilityBill};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// One raw line of the bills file
///
/// Numeric fields are kept as strings here and parsed explicitly in
/// [`convert_bill_row`], so a malformed number surfaces as a per-record
/// conversion error rather than failing the whole read.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BillRow {
    pub id: BillId,
    pub username: String,
    pub utility_type: String,
    pub meter_measurement: String,
    pub price: String,
    pub date: String,
}

/// One raw line of the customers file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CustomerRow {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Convert a BillRow to a UtilityBill
///
/// Parses the two numeric fields and resolves the service kind from the
/// utility-type string (once, here at the boundary). The stored price is
/// carried over as-is; the bill store recomputes it against current tariffs
/// after loading, treating the persisted column as a cache.
///
/// # Arguments
///
/// * `row` - The deserialized bills-file row
///
/// # Returns
///
/// * `Ok(UtilityBill)` - Successfully converted record
/// * `Err(BillingError::Parse)` - A numeric field did not parse
pub fn convert_bill_row(row: BillRow) -> Result<UtilityBill, BillingError> {
    let meter_measurement = Decimal::from_str(row.meter_measurement.trim()).map_err(|_| {
        BillingError::parse(
            None,
            format!(
                "invalid meter measurement '{}' for bill {}",
                row.meter_measurement, row.id
            ),
        )
    })?;

    let price = Decimal::from_str(row.price.trim()).map_err(|_| {
        BillingError::parse(
            None,
            format!("invalid price '{}' for bill {}", row.price, row.id),
        )
    })?;

    let mut bill = UtilityBill::new(
        row.id,
        row.username.trim(),
        row.utility_type.trim(),
        meter_measurement,
        row.date.trim(),
    );
    bill.price = price;
    Ok(bill)
}

/// Convert a CustomerRow to a Customer
pub fn convert_customer_row(row: CustomerRow) -> Customer {
    Customer::new(row.username.trim(), row.password.trim(), row.email.trim())
}

/// Write the full bill collection in backing-file format
///
/// Records are written in the order given (the store's insertion order).
/// Fields containing commas are quoted by the writer, which keeps such
/// records round-trippable where a naive comma join would corrupt them.
///
/// # Arguments
///
/// * `bills` - The bills to write
/// * `output` - Destination writer
pub fn write_bills_csv(bills: &[UtilityBill], output: &mut dyn Write) -> Result<(), BillingError> {
    let mut writer = csv::Writer::from_writer(output);

    for bill in bills {
        writer.write_record(&[
            bill.id.to_string(),
            bill.username.clone(),
            bill.utility_type.clone(),
            bill.meter_measurement.to_string(),
            bill.price.to_string(),
            bill.date.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the full customer collection in backing-file format
pub fn write_customers_csv(
    customers: &[Customer],
    output: &mut dyn Write,
) -> Result<(), BillingError> {
    let mut writer = csv::Writer::from_writer(output);

    for customer in customers {
        writer.write_record(&[
            customer.username.clone(),
            customer.password.clone(),
            customer.email.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
