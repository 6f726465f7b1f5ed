use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use rusqlite::Connection;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::load_settings;

const TENANT: &str = "demo";

struct DemoRow {
    day: u32,
    amount: f64,
    purpose: &'static str,
    counterparty: &'static str,
    account: &'static str,
    owner_type: &'static str,
    owner_id: &'static str,
}

/// Manually imported rows (source `csv`): a rental property's ledger.
const BANK_MONTHLY: &[DemoRow] = &[
    DemoRow { day: 3, amount: -450.00, purpose: "Hausgeld Whg 12", counterparty: "WEG Verwalter Schmidt", account: "DEMO-IMMO", owner_type: "property", owner_id: "immo-1" },
    DemoRow { day: 5, amount: -820.50, purpose: "Darlehen Tilgung 4711", counterparty: "Sparkasse Musterstadt", account: "DEMO-IMMO", owner_type: "property", owner_id: "immo-1" },
    DemoRow { day: 15, amount: -118.00, purpose: "Grundsteuer B", counterparty: "Finanzamt Musterstadt", account: "DEMO-IMMO", owner_type: "property", owner_id: "immo-1" },
    DemoRow { day: 20, amount: -74.90, purpose: "Sonstige Umlage", counterparty: "Stadtwerke", account: "DEMO-IMMO", owner_type: "property", owner_id: "immo-1" },
];

/// Bank-API-synced rows (source `finapi`): PV plant and private account.
const FINAPI_MONTHLY: &[DemoRow] = &[
    DemoRow { day: 10, amount: 1243.80, purpose: "Einspeisevergütung EEG", counterparty: "Netzbetreiber GmbH", account: "DEMO-PV", owner_type: "pv_plant", owner_id: "pv-1" },
    DemoRow { day: 12, amount: -95.00, purpose: "Wartung Wechselrichter", counterparty: "Solar Service Nord", account: "DEMO-PV", owner_type: "pv_plant", owner_id: "pv-1" },
    DemoRow { day: 28, amount: 3250.00, purpose: "Gehalt", counterparty: "Arbeitgeber AG", account: "DEMO-GIRO", owner_type: "person", owner_id: "person-1" },
    DemoRow { day: 22, amount: -39.99, purpose: "Bestellung 302-998", counterparty: "Online Versand", account: "DEMO-GIRO", owner_type: "person", owner_id: "person-1" },
];

/// Clamp a day to the last valid day of the given year/month.
fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = next.unwrap().pred_opt().unwrap().day();
    day.min(last_day)
}

fn make_date(year: i32, month: u32, day: u32) -> String {
    let d = clamp_day(year, month, day);
    format!("{year:04}-{month:02}-{d:02}")
}

fn insert_demo_data(conn: &Connection) -> Result<usize> {
    let today = Local::now().date_naive();
    let mut count = 0usize;

    for i in 0..6u32 {
        let months_ago = 5 - i;
        let target = today - chrono::Months::new(months_ago);
        let (year, month) = (target.year(), target.month());

        for (j, row) in BANK_MONTHLY.iter().enumerate() {
            conn.execute(
                "INSERT INTO bank_transactions \
                 (id, tenant_id, account_ref, booking_date, amount, purpose, counterparty, owner_type, owner_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    format!("demo-b-{i}-{j}"),
                    TENANT,
                    row.account,
                    make_date(year, month, row.day),
                    row.amount,
                    row.purpose,
                    row.counterparty,
                    row.owner_type,
                    row.owner_id,
                ],
            )?;
            count += 1;
        }
        for (j, row) in FINAPI_MONTHLY.iter().enumerate() {
            conn.execute(
                "INSERT INTO finapi_transactions \
                 (id, tenant_id, account_ref, booking_date, amount, purpose, counterparty, owner_type, owner_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    format!("demo-f-{i}-{j}"),
                    TENANT,
                    row.account,
                    make_date(year, month, row.day),
                    row.amount,
                    row.purpose,
                    row.counterparty,
                    row.owner_type,
                    row.owner_id,
                ],
            )?;
            count += 1;
        }
    }

    Ok(count)
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = PathBuf::from(&settings.data_dir).join("kontomatch.db");

    if !db_path.exists() {
        eprintln!("No database found. Run `kontomatch init` first.");
        std::process::exit(1);
    }

    let conn = get_connection(&db_path)?;
    init_db(&conn)?;

    // Idempotency guard
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM bank_transactions WHERE tenant_id = ?1)",
        [TENANT],
        |r| r.get(0),
    )?;
    if exists {
        println!("Demo data already loaded (tenant '{TENANT}' exists).");
        return Ok(());
    }

    let count = insert_demo_data(&conn)?;

    println!("Demo data loaded!");
    println!("  Tenant:       {TENANT}");
    println!("  Transactions: {count}");
    println!();
    println!("Try these next:");
    println!("  kontomatch run --tenant demo --dry-run");
    println!("  kontomatch run --tenant demo");
    println!("  kontomatch status");

    Ok(())
}
