//! End-to-end integration tests
//!
//! These tests drive the assembled application (facade + stores + flat
//! files) through a temporary data directory, the same way the CLI binary
//! does. Each test covers one observable property of the system:
//! registration rules, pricing scenarios, persistence round-trips, tariff
//! updates, and the admin search.

use rust_decimal::Decimal;
use std::fs;
use tempfile::TempDir;
use utility_billing::cli::{run, Command};
use utility_billing::{BillingApp, BillingError, ServiceKind};

/// Open an application over a fresh temporary data directory
fn open_app(dir: &TempDir) -> BillingApp {
    BillingApp::open(dir.path()).expect("failed to open app")
}

#[test]
fn registration_login_and_bill_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    // Register and log in
    app.register("hakeem_doe", "secret", "hakeem@example.com")
        .unwrap();
    app.login("hakeem_doe", "secret").unwrap();
    assert_eq!(app.current_user(), Some("hakeem_doe"));

    // First bill gets id 1; 150 * 0.12 + 10.0 == 28.0
    let id = app
        .add_bill("hakeem_doe", "electricity", Decimal::new(150, 0), "2023-08-10")
        .unwrap();
    assert_eq!(id, 1);
    assert_eq!(app.find_bill(id).unwrap().price, Decimal::new(280, 1));

    // Edit reprices: 200 * 0.12 + 10.0 == 34.0
    app.edit_bill(id, Decimal::new(200, 0)).unwrap();
    assert_eq!(app.find_bill(id).unwrap().price, Decimal::new(340, 1));

    // Delete twice: second call is a no-op
    app.delete_bill(id).unwrap();
    app.delete_bill(id).unwrap();
    assert!(app.find_bill(id).is_none());
    assert!(app.bills().is_empty());
}

#[test]
fn registering_a_taken_username_always_fails() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    app.register("alice", "secret", "alice@example.com").unwrap();

    // Different password and email make no difference
    let result = app.register("alice", "other", "elsewhere@example.com");
    assert!(matches!(
        result.unwrap_err(),
        BillingError::DuplicateUsername { .. }
    ));

    assert_eq!(app.customers().len(), 1);
    assert_eq!(app.customers()[0].email, "alice@example.com");
}

#[test]
fn gas_pricing_scenario_with_tariff_update() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    // GAS starts at (0.08, 15.0): 100 * 0.08 + 15.0 == 23.0
    let before = app
        .add_bill("alice", "gas", Decimal::new(100, 0), "2023-08-10")
        .unwrap();
    assert_eq!(app.find_bill(before).unwrap().price, Decimal::new(230, 1));

    app.set_unit_charge(ServiceKind::Gas, Decimal::new(4, 1))
        .unwrap();
    app.set_service_charge(ServiceKind::Gas, Decimal::new(6, 1))
        .unwrap();

    // New bills see the new rates: 100 * 0.4 + 0.6 == 40.6
    let after = app
        .add_bill("alice", "gas", Decimal::new(100, 0), "2023-08-11")
        .unwrap();
    assert_eq!(app.find_bill(after).unwrap().price, Decimal::new(406, 1));

    // The earlier bill is untouched until the store reloads
    assert_eq!(app.find_bill(before).unwrap().price, Decimal::new(230, 1));
}

#[test]
fn unknown_utility_type_prices_at_zero_and_undercounts_total() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    app.add_bill("alice", "gas", Decimal::new(100, 0), "2023-08-10")
        .unwrap(); // 23.0
    let odd = app
        .add_bill("alice", "broadband", Decimal::new(9000, 0), "2023-08-10")
        .unwrap();

    assert_eq!(app.find_bill(odd).unwrap().price, Decimal::ZERO);
    assert_eq!(app.total_price(), Decimal::new(230, 1));
}

#[test]
fn bills_survive_a_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut app = open_app(&dir);
        app.register("alice", "secret", "alice@example.com").unwrap();
        app.add_bill("alice", "Electricity", Decimal::new(150, 0), "2023-08-10")
            .unwrap();
        app.add_bill("alice", "water", Decimal::new(40, 0), "2023-08-11")
            .unwrap();
    }

    // A second process sees the same state
    let mut app = open_app(&dir);
    assert!(app.validate_login("alice", "secret"));
    assert_eq!(app.bills().len(), 2);

    let first = app.find_bill(1).unwrap();
    assert_eq!(first.utility_type, "Electricity");
    assert_eq!(first.meter_measurement, Decimal::new(150, 0));
    assert_eq!(first.price, Decimal::new(280, 1));
    assert_eq!(first.date, "2023-08-10");

    // ID assignment continues where it left off
    let next = app
        .add_bill("alice", "gas", Decimal::new(10, 0), "2023-08-12")
        .unwrap();
    assert_eq!(next, 3);
}

#[test]
fn tariff_updates_survive_a_restart_and_reprice_loaded_bills() {
    let dir = TempDir::new().unwrap();

    {
        let mut app = open_app(&dir);
        app.add_bill("alice", "gas", Decimal::new(100, 0), "2023-08-10")
            .unwrap(); // 23.0 under default rates
        app.set_unit_charge(ServiceKind::Gas, Decimal::new(4, 1))
            .unwrap();
        app.set_service_charge(ServiceKind::Gas, Decimal::new(6, 1))
            .unwrap();
    }

    // Reload recomputes stored prices against the persisted tariffs
    let app = open_app(&dir);
    assert_eq!(app.tariff(ServiceKind::Gas).unwrap().unit_charge, Decimal::new(4, 1));
    assert_eq!(app.find_bill(1).unwrap().price, Decimal::new(406, 1));
}

#[test]
fn duplicate_ids_in_the_backing_file_collapse_first_seen_wins() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bills.txt"),
        "1,alice,gas,100,23.0,2023-08-10\n\
         1,mallory,water,1,20.05,2023-08-11\n\
         2,bob,electricity,150,28.0,2023-08-12\n",
    )
    .unwrap();

    let app = open_app(&dir);
    assert_eq!(app.bills().len(), 2);
    assert_eq!(app.find_bill(1).unwrap().username, "alice");
}

#[test]
fn malformed_bill_lines_are_isolated() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bills.txt"),
        "1,alice,gas,100,23.0,2023-08-10\n\
         garbage line\n\
         3,carol,water,40,22.0,2023-08-12\n",
    )
    .unwrap();

    let mut app = open_app(&dir);
    assert_eq!(app.bills().len(), 2);

    // next id continues from the highest surviving id
    let id = app
        .add_bill("dave", "gas", Decimal::new(5, 0), "2023-08-13")
        .unwrap();
    assert_eq!(id, 4);
}

#[test]
fn admin_search_is_a_substring_match() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    app.add_bill("john_doe", "gas", Decimal::new(10, 0), "2023-08-10")
        .unwrap();
    app.add_bill("hakeem_doe", "water", Decimal::new(20, 0), "2023-08-10")
        .unwrap();
    app.add_bill("alice", "electricity", Decimal::new(30, 0), "2023-08-10")
        .unwrap();

    let matches = app.search_bills("doe");
    let owners: Vec<&str> = matches.iter().map(|b| b.username.as_str()).collect();
    assert_eq!(owners, vec!["john_doe", "hakeem_doe"]);

    // Owner listing stays exact
    assert!(app.bills_owned_by("doe").is_empty());
    assert_eq!(app.bills_owned_by("john_doe").len(), 1);
}

#[test]
fn cli_dispatch_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    let mut out = Vec::new();

    run(
        &mut app,
        Command::Register {
            username: "alice".to_string(),
            password: "secret".to_string(),
            email: "alice@example.com".to_string(),
        },
        &mut out,
    )
    .unwrap();

    run(
        &mut app,
        Command::AddBill {
            username: "alice".to_string(),
            utility_type: "gas".to_string(),
            reading: Decimal::new(100, 0),
            date: "2023-08-10".to_string(),
        },
        &mut out,
    )
    .unwrap();

    run(&mut app, Command::Total, &mut out).unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Registered customer 'alice'"));
    assert!(output.contains("Created bill 1 for alice (23.00)"));
    assert!(output.contains("Total price for all bills: 23.00"));

    // The second registration of the same username fails through the CLI too
    let result = run(
        &mut app,
        Command::Register {
            username: "alice".to_string(),
            password: "other".to_string(),
            email: "other@example.com".to_string(),
        },
        &mut Vec::new(),
    );
    assert!(matches!(
        result.unwrap_err(),
        BillingError::DuplicateUsername { .. }
    ));
}
