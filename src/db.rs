use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

/// Two physical transaction tables that share no storage: manual CSV
/// imports carry a numeric confidence column, finapi-synced rows store
/// only the rule code and status. `v_all_transactions` normalizes both
/// into the shape the engine reads, tagging each row with its source.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS bank_transactions (
    id TEXT PRIMARY KEY,
    tenant_id TEXT NOT NULL,
    account_ref TEXT NOT NULL,
    booking_date TEXT NOT NULL,
    amount REAL NOT NULL,
    purpose TEXT NOT NULL DEFAULT '',
    counterparty TEXT NOT NULL DEFAULT '',
    owner_type TEXT,
    owner_id TEXT,
    match_status TEXT DEFAULT 'unmatched',
    match_category TEXT,
    match_confidence REAL,
    match_rule_code TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS finapi_transactions (
    id TEXT PRIMARY KEY,
    tenant_id TEXT NOT NULL,
    account_ref TEXT NOT NULL,
    booking_date TEXT NOT NULL,
    amount REAL NOT NULL,
    purpose TEXT NOT NULL DEFAULT '',
    counterparty TEXT NOT NULL DEFAULT '',
    owner_type TEXT,
    owner_id TEXT,
    match_status TEXT DEFAULT 'unmatched',
    match_category TEXT,
    match_rule_code TEXT,
    synced_at TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_bank_pending
    ON bank_transactions (tenant_id, booking_date)
    WHERE match_category IS NULL;

CREATE INDEX IF NOT EXISTS idx_finapi_pending
    ON finapi_transactions (tenant_id, booking_date)
    WHERE match_category IS NULL;

CREATE VIEW IF NOT EXISTS v_all_transactions AS
SELECT id, tenant_id, account_ref, booking_date, amount, purpose, counterparty,
       'csv' AS source, owner_type, owner_id, match_status, match_category
FROM bank_transactions
UNION ALL
SELECT id, tenant_id, account_ref, booking_date, amount, purpose, counterparty,
       'finapi' AS source, owner_type, owner_id, match_status, match_category
FROM finapi_transactions;
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
