//! Subcommand dispatch
//!
//! Maps each CLI subcommand onto the facade and renders the outcome. This
//! is the presentation layer: currency is rounded to two decimals here and
//! nowhere else.

use crate::cli::args::Command;
use crate::core::BillingApp;
use crate::types::{BillingError, ServiceKind, UtilityBill};
use std::io::Write;

/// Execute one subcommand against the application
///
/// # Arguments
///
/// * `app` - The assembled billing application
/// * `command` - The parsed subcommand
/// * `out` - Destination for human-readable output
///
/// # Returns
///
/// * `Ok(())` - The command ran; its outcome was written to `out`
/// * `Err(BillingError)` - The command failed (rejected registration,
///   bad credentials, unknown service, I/O failure)
pub fn run(
    app: &mut BillingApp,
    command: Command,
    out: &mut dyn Write,
) -> Result<(), BillingError> {
    match command {
        Command::Register {
            username,
            password,
            email,
        } => {
            app.register(&username, &password, &email)?;
            writeln!(out, "Registered customer '{}'", username)?;
        }

        Command::Login { username, password } => {
            app.login(&username, &password)?;
            writeln!(out, "Welcome, {}", username)?;
        }

        Command::AdminLogin { username, password } => {
            if !BillingApp::admin_login(&username, &password) {
                return Err(BillingError::InvalidCredentials);
            }
            writeln!(out, "Staff login accepted")?;
        }

        Command::AddBill {
            username,
            utility_type,
            reading,
            date,
        } => {
            let id = app.add_bill(&username, &utility_type, reading, &date)?;
            let price = app.find_bill(id).map(|b| b.price).unwrap_or_default();
            writeln!(
                out,
                "Created bill {} for {} ({:.2})",
                id, username, price
            )?;
        }

        Command::EditBill { id, reading } => {
            if app.find_bill(id).is_none() {
                writeln!(out, "Bill {} not found, nothing changed", id)?;
            } else {
                app.edit_bill(id, reading)?;
                let price = app.find_bill(id).map(|b| b.price).unwrap_or_default();
                writeln!(out, "Bill {} updated ({:.2})", id, price)?;
            }
        }

        Command::DeleteBill { id } => {
            if app.find_bill(id).is_none() {
                writeln!(out, "Bill {} not found, nothing changed", id)?;
            } else {
                app.delete_bill(id)?;
                writeln!(out, "Bill {} deleted", id)?;
            }
        }

        Command::ListBills { owner, search } => {
            let bills: Vec<&UtilityBill> = if let Some(owner) = owner.as_deref() {
                app.bills_owned_by(owner)
            } else if let Some(fragment) = search.as_deref() {
                app.search_bills(fragment)
            } else {
                app.bills().iter().collect()
            };

            for bill in &bills {
                print_bill(out, bill)?;
            }
            writeln!(out, "{} bill(s)", bills.len())?;
        }

        Command::Total => {
            writeln!(out, "Total price for all bills: {:.2}", app.total_price())?;
        }

        Command::ShowTariffs => {
            for (kind, tariff) in app.tariff_entries() {
                writeln!(
                    out,
                    "{}: unit charge {}, service charge {}",
                    kind.name(),
                    tariff.unit_charge,
                    tariff.service_charge
                )?;
            }
        }

        Command::SetTariff {
            service,
            unit_charge,
            service_charge,
        } => {
            let kind = ServiceKind::resolve(&service)
                .ok_or_else(|| BillingError::unknown_service(&service))?;

            if let Some(value) = unit_charge {
                app.set_unit_charge(kind, value)?;
            }
            if let Some(value) = service_charge {
                app.set_service_charge(kind, value)?;
            }

            let tariff = app.tariff(kind).unwrap_or_else(|| kind.default_tariff());
            writeln!(
                out,
                "{}: unit charge {}, service charge {}",
                kind.name(),
                tariff.unit_charge,
                tariff.service_charge
            )?;
        }

        Command::RemoveCustomer { username } => {
            let existed = app
                .customers()
                .iter()
                .any(|c| c.username == username);
            app.remove_customer(&username)?;
            if existed {
                writeln!(out, "Removed customer '{}'", username)?;
            } else {
                writeln!(out, "Customer '{}' not found, nothing changed", username)?;
            }
        }

        Command::ListCustomers => {
            let customers = app.customers();
            for customer in customers {
                writeln!(
                    out,
                    "{} {} {}",
                    customer.username, customer.password, customer.email
                )?;
            }
            writeln!(out, "{} customer(s)", customers.len())?;
        }
    }

    Ok(())
}

/// Render one bill the way the admin dashboard lists them
fn print_bill(out: &mut dyn Write, bill: &UtilityBill) -> Result<(), BillingError> {
    writeln!(
        out,
        "Bill ID: {}, Username: {}, Utility Type: {}, Meter Measurement: {}, Price: {:.2}, Date: {}",
        bill.id, bill.username, bill.utility_type, bill.meter_measurement, bill.price, bill.date
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn run_to_string(app: &mut BillingApp, command: Command) -> Result<String, BillingError> {
        let mut out = Vec::new();
        run(app, command, &mut out)?;
        Ok(String::from_utf8(out).expect("output is UTF-8"))
    }

    #[test]
    fn test_add_bill_reports_id_and_price() {
        let dir = TempDir::new().unwrap();
        let mut app = BillingApp::open(dir.path()).unwrap();

        let output = run_to_string(
            &mut app,
            Command::AddBill {
                username: "alice".to_string(),
                utility_type: "electricity".to_string(),
                reading: Decimal::new(150, 0),
                date: "2023-08-10".to_string(),
            },
        )
        .unwrap();

        assert_eq!(output, "Created bill 1 for alice (28.00)\n");
    }

    #[test]
    fn test_list_bills_renders_admin_dashboard_lines() {
        let dir = TempDir::new().unwrap();
        let mut app = BillingApp::open(dir.path()).unwrap();
        app.add_bill("alice", "gas", Decimal::new(100, 0), "2023-08-10")
            .unwrap();

        let output = run_to_string(
            &mut app,
            Command::ListBills {
                owner: None,
                search: None,
            },
        )
        .unwrap();

        assert_eq!(
            output,
            "Bill ID: 1, Username: alice, Utility Type: gas, Meter Measurement: 100, \
             Price: 23.00, Date: 2023-08-10\n1 bill(s)\n"
        );
    }

    #[test]
    fn test_set_tariff_rejects_unknown_service() {
        let dir = TempDir::new().unwrap();
        let mut app = BillingApp::open(dir.path()).unwrap();

        let result = run_to_string(
            &mut app,
            Command::SetTariff {
                service: "broadband".to_string(),
                unit_charge: Some(Decimal::ONE),
                service_charge: None,
            },
        );

        assert!(matches!(
            result.unwrap_err(),
            BillingError::UnknownService { .. }
        ));
    }

    #[test]
    fn test_delete_missing_bill_reports_no_change() {
        let dir = TempDir::new().unwrap();
        let mut app = BillingApp::open(dir.path()).unwrap();

        let output = run_to_string(&mut app, Command::DeleteBill { id: 42 }).unwrap();
        assert_eq!(output, "Bill 42 not found, nothing changed\n");
    }

    #[test]
    fn test_admin_login_paths() {
        let dir = TempDir::new().unwrap();
        let mut app = BillingApp::open(dir.path()).unwrap();

        let ok = run_to_string(
            &mut app,
            Command::AdminLogin {
                username: "admin".to_string(),
                password: "admin".to_string(),
            },
        )
        .unwrap();
        assert_eq!(ok, "Staff login accepted\n");

        let denied = run_to_string(
            &mut app,
            Command::AdminLogin {
                username: "admin".to_string(),
                password: "letmein".to_string(),
            },
        );
        assert_eq!(denied.unwrap_err(), BillingError::InvalidCredentials);
    }
}
