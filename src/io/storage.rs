//! Pluggable persistence for the three backing stores
//!
//! Each store talks to its backing file through a small trait with exactly
//! two operations: `load` everything and `save_all` everything. Business
//! logic never touches the filesystem directly, so swapping the flat files
//! for something incremental or transactional later is contained here.
//!
//! # Failure semantics
//!
//! - A missing backing file is not an error: `load` returns an empty
//!   collection ("no records yet").
//! - A malformed record is isolated: the line is skipped with a warning and
//!   loading continues.
//! - Writes are full-collection rewrites, made atomic by writing a
//!   temporary file in the same directory and renaming it over the target.
//!   A failed write therefore never truncates the existing file.

use crate::io::csv_format::{
    convert_bill_row, convert_customer_row, write_bills_csv, write_customers_csv, BillRow,
    CustomerRow,
};
use crate::types::{BillingError, Customer, ServiceKind, Tariff, UtilityBill};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;

/// Storage backend for the bill collection
pub trait BillStorage {
    /// Load every readable bill record
    fn load(&self) -> Result<Vec<UtilityBill>, BillingError>;

    /// Replace the persisted collection with `bills`
    fn save_all(&self, bills: &[UtilityBill]) -> Result<(), BillingError>;
}

/// Storage backend for the customer collection
pub trait CustomerStorage {
    /// Load every readable customer record
    fn load(&self) -> Result<Vec<Customer>, BillingError>;

    /// Replace the persisted collection with `customers`
    fn save_all(&self, customers: &[Customer]) -> Result<(), BillingError>;
}

/// Storage backend for the tariff registry
pub trait TariffStorage {
    /// Load every readable tariff entry
    fn load(&self) -> Result<Vec<(ServiceKind, Tariff)>, BillingError>;

    /// Replace the persisted registry with `entries`
    fn save_all(&self, entries: &[(ServiceKind, Tariff)]) -> Result<(), BillingError>;
}

/// Write `content` to `path` atomically (temp file + rename)
fn write_atomic<F>(path: &Path, write_fn: F) -> Result<(), BillingError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), BillingError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_fn(&mut tmp)?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|e| BillingError::Io {
            message: e.to_string(),
        })?;
    Ok(())
}

/// Build the headerless CSV reader both record files share
fn csv_reader(file: File) -> csv::Reader<File> {
    ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(file)
}

/// Flat-file bill storage
///
/// One record per line: `id,username,utilityType,meterMeasurement,price,date`.
#[derive(Debug, Clone)]
pub struct BillFile {
    path: PathBuf,
}

impl BillFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BillFile { path: path.into() }
    }
}

impl BillStorage for BillFile {
    fn load(&self) -> Result<Vec<UtilityBill>, BillingError> {
        if !self.path.exists() {
            log::debug!("bills file {} not found, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut reader = csv_reader(file);

        let mut bills = Vec::new();
        for (index, result) in reader.deserialize::<BillRow>().enumerate() {
            let line = index as u64 + 1;
            match result.map_err(BillingError::from).and_then(convert_bill_row) {
                Ok(bill) => bills.push(bill),
                Err(e) => log::warn!(
                    "skipping bill record at line {} of {}: {}",
                    line,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(bills)
    }

    fn save_all(&self, bills: &[UtilityBill]) -> Result<(), BillingError> {
        write_atomic(&self.path, |out| write_bills_csv(bills, out))
    }
}

/// Flat-file customer storage
///
/// One record per line: `username,password,email`.
#[derive(Debug, Clone)]
pub struct CustomerFile {
    path: PathBuf,
}

impl CustomerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CustomerFile { path: path.into() }
    }
}

impl CustomerStorage for CustomerFile {
    fn load(&self) -> Result<Vec<Customer>, BillingError> {
        if !self.path.exists() {
            log::debug!(
                "customers file {} not found, starting empty",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut reader = csv_reader(file);

        let mut customers = Vec::new();
        for (index, result) in reader.deserialize::<CustomerRow>().enumerate() {
            let line = index as u64 + 1;
            match result {
                Ok(row) => customers.push(convert_customer_row(row)),
                Err(e) => log::warn!(
                    "skipping customer record at line {} of {}: {}",
                    line,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(customers)
    }

    fn save_all(&self, customers: &[Customer]) -> Result<(), BillingError> {
        write_atomic(&self.path, |out| write_customers_csv(customers, out))
    }
}

/// Flat-file tariff storage
///
/// One entry per line: `SERVICE_NAME:unitCharge,serviceCharge`
/// (e.g. `GAS:0.08,15.0`). Not CSV, so parsed by hand here.
#[derive(Debug, Clone)]
pub struct TariffFile {
    path: PathBuf,
}

impl TariffFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TariffFile { path: path.into() }
    }
}

/// Parse one `SERVICE_NAME:unitCharge,serviceCharge` line
fn parse_tariff_line(line: &str) -> Option<(ServiceKind, Tariff)> {
    let (name, rates) = line.split_once(':')?;
    let kind = ServiceKind::resolve(name)?;
    let (unit, service) = rates.split_once(',')?;
    let unit_charge = Decimal::from_str(unit.trim()).ok()?;
    let service_charge = Decimal::from_str(service.trim()).ok()?;
    Some((kind, Tariff::new(unit_charge, service_charge)))
}

impl TariffStorage for TariffFile {
    fn load(&self) -> Result<Vec<(ServiceKind, Tariff)>, BillingError> {
        if !self.path.exists() {
            log::debug!(
                "tariff file {} not found, using defaults",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_tariff_line(&line) {
                Some(entry) => entries.push(entry),
                None => log::warn!(
                    "skipping malformed tariff line {} of {}: '{}'",
                    index + 1,
                    self.path.display(),
                    line
                ),
            }
        }
        Ok(entries)
    }

    fn save_all(&self, entries: &[(ServiceKind, Tariff)]) -> Result<(), BillingError> {
        write_atomic(&self.path, |out| {
            for (kind, tariff) in entries {
                writeln!(
                    out,
                    "{}:{},{}",
                    kind.name(),
                    tariff.unit_charge,
                    tariff.service_charge
                )?;
            }
            Ok(())
        })
    }
}
