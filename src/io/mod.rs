//! I/O module
//!
//! Handles the flat-file backing stores.
//!
//! # Components
//!
//! - `csv_format` - record format handling (row conversion, serialization)
//! - `storage` - persistence traits and the flat-file implementations

pub mod csv_format;
pub mod storage;

pub use csv_format::{
    convert_bill_row, convert_customer_row, write_bills_csv, write_customers_csv, BillRow,
    CustomerRow,
};
pub use storage::{
    BillFile, BillStorage, CustomerFile, CustomerStorage, TariffFile, TariffStorage,
};
