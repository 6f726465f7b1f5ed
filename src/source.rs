use rusqlite::Connection;

use crate::error::{KontoError, Result};
use crate::models::{OwnerType, Source, Transaction};

/// Load a bounded batch of eligible transactions from the unified view.
///
/// The eligibility filter (status absent/unmatched AND category null) is
/// the engine's whole concurrency contract: it doubles as the idempotence
/// guard, and a categorized row can never be selected again. Ordering is
/// oldest-first so repeated invocations make progress fairly; the limit
/// bounds the cost of a single invocation, nothing more.
///
/// Any read failure is fatal for the invocation — nothing is classified
/// or written from a partial batch.
pub fn load_pending(
    conn: &Connection,
    tenant_id: Option<&str>,
    account_ref: Option<&str>,
    limit: usize,
) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, tenant_id, account_ref, booking_date, amount, purpose, counterparty, \
                source, owner_type, owner_id \
         FROM v_all_transactions \
         WHERE (match_status IS NULL OR lower(match_status) = 'unmatched') \
           AND match_category IS NULL",
    );
    let mut params: Vec<&str> = Vec::new();
    if let Some(tenant) = tenant_id {
        params.push(tenant);
        sql.push_str(&format!(" AND tenant_id = ?{}", params.len()));
    }
    if let Some(account) = account_ref {
        params.push(account);
        sql.push_str(&format!(" AND account_ref = ?{}", params.len()));
    }
    sql.push_str(&format!(" ORDER BY booking_date ASC LIMIT {limit}"));

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| KontoError::SourceRead(e.to_string()))?;
    let raw: Vec<(String, String, String, String, f64, String, String, String, Option<String>, Option<String>)> =
        stmt.query_map(rusqlite::params_from_iter(params), |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
            ))
        })
        .map_err(|e| KontoError::SourceRead(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| KontoError::SourceRead(e.to_string()))?;

    raw.into_iter()
        .map(
            |(id, tenant_id, account_ref, booking_date, amount, purpose, counterparty, source, owner_type, owner_id)| {
                Ok(Transaction {
                    id,
                    tenant_id,
                    account_ref,
                    booking_date,
                    amount,
                    purpose,
                    counterparty,
                    source: Source::parse(&source)?,
                    owner_type: owner_type.as_deref().and_then(OwnerType::parse),
                    owner_id,
                })
            },
        )
        .collect()
}
