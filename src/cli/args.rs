use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Manage customers, tariffs and utility bills
#[derive(Parser, Debug)]
#[command(name = "utility-billing")]
#[command(about = "Manage customers, tariffs and utility bills", long_about = None)]
pub struct CliArgs {
    /// Directory holding the backing files (created if missing)
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "data",
        help = "Directory holding bills.txt, customers.txt and service_prices.txt"
    )]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed by the billing engine
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new customer
    Register {
        username: String,
        password: String,
        email: String,
    },

    /// Check customer credentials
    Login { username: String, password: String },

    /// Check staff credentials
    AdminLogin { username: String, password: String },

    /// Add a utility bill for a customer
    AddBill {
        username: String,
        /// Service name (electricity, gas or water; anything else prices at zero)
        utility_type: String,
        /// Meter reading
        reading: Decimal,
        /// Bill date, YYYY-MM-DD
        date: String,
    },

    /// Change a bill's meter reading (reprices the bill)
    EditBill { id: u32, reading: Decimal },

    /// Delete a bill
    DeleteBill { id: u32 },

    /// List bills: all of them, one owner's, or a fuzzy username search
    ListBills {
        /// Exact owner username
        #[arg(long, conflicts_with = "search")]
        owner: Option<String>,

        /// Username fragment (substring match)
        #[arg(long)]
        search: Option<String>,
    },

    /// Sum the price of every stored bill
    Total,

    /// Show the current tariffs
    ShowTariffs,

    /// Update a service's tariff
    SetTariff {
        /// Service name (electricity, gas or water)
        service: String,

        /// New unit charge
        #[arg(long, value_name = "AMOUNT", required_unless_present = "service_charge")]
        unit_charge: Option<Decimal>,

        /// New flat service charge
        #[arg(long, value_name = "AMOUNT", required_unless_present = "unit_charge")]
        service_charge: Option<Decimal>,
    },

    /// Remove a customer (their bills remain)
    RemoveCustomer { username: String },

    /// List registered customers
    ListCustomers,
}
