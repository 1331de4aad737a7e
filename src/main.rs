//! Utility Billing CLI
//!
//! Command-line interface for the utility billing engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- register alice secret alice@example.com
//! cargo run -- add-bill alice electricity 150 2023-08-10
//! cargo run -- list-bills --search doe
//! cargo run -- set-tariff gas --unit-charge 0.4 --service-charge 0.6
//! cargo run -- total
//! ```
//!
//! State lives in flat text files under `--data-dir` (default `data/`):
//! `bills.txt`, `customers.txt` and `service_prices.txt`. The directory is
//! created on first use.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (rejected registration, bad credentials, unknown service,
//!   unreadable or unwritable backing file, etc.)

use std::process;
use utility_billing::cli;
use utility_billing::core::BillingApp;

fn main() {
    env_logger::init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Assemble the application over the data directory
    let mut app = match BillingApp::open(&args.data_dir) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Dispatch the subcommand; output goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&mut app, args.command, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
