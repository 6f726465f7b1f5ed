use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("kontomatch.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;
        let csv_rows: i64 =
            conn.query_row("SELECT count(*) FROM bank_transactions", [], |r| r.get(0))?;
        let finapi_rows: i64 =
            conn.query_row("SELECT count(*) FROM finapi_transactions", [], |r| r.get(0))?;
        let (pending, pending_volume): (i64, f64) = conn.query_row(
            "SELECT count(*), COALESCE(SUM(amount), 0) FROM v_all_transactions \
             WHERE (match_status IS NULL OR lower(match_status) = 'unmatched') \
               AND match_category IS NULL",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;
        let tenants: i64 = conn.query_row(
            "SELECT count(DISTINCT tenant_id) FROM v_all_transactions",
            [],
            |r| r.get(0),
        )?;

        println!();
        println!("Imported (csv):    {csv_rows}");
        println!("Synced (finapi):   {finapi_rows}");
        println!("Pending:           {pending} ({})", money(pending_volume));
        println!("Tenants:           {tenants}");
    } else {
        println!();
        println!("Database not found. Run `kontomatch init` to set up.");
    }

    Ok(())
}
