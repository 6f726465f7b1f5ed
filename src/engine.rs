use rusqlite::Connection;

use crate::classifier::classify;
use crate::dispatch::write_back;
use crate::error::Result;
use crate::models::{Classification, EngineRequest, EngineSummary};
use crate::rules::{MatchConfig, MatchRule};
use crate::source::load_pending;

/// One engine invocation: load a bounded batch of eligible rows,
/// classify each, persist accepted results to their source tables.
///
/// Stateless and re-runnable: once a row is categorized it never
/// re-enters eligibility, so back-to-back runs converge to
/// `categorized = 0`. A dry run skips the dispatcher entirely and
/// returns the per-row rationale instead.
pub fn run(
    conn: &Connection,
    request: &EngineRequest,
    rules: &[MatchRule],
    config: &MatchConfig,
) -> Result<EngineSummary> {
    let transactions = load_pending(
        conn,
        request.tenant_id.as_deref(),
        request.account_ref.as_deref(),
        config.batch_size,
    )?;

    if transactions.is_empty() {
        return Ok(EngineSummary {
            categorized: 0,
            checked: 0,
            dry_run: request.dry_run,
            results: None,
            message: Some("no eligible transactions".to_string()),
        });
    }

    let checked = transactions.len();
    let results: Vec<Classification> = transactions
        .iter()
        .filter_map(|tx| {
            classify(tx, rules, config).map(|m| Classification {
                id: tx.id.clone(),
                source: tx.source,
                category: m.category,
                confidence: m.confidence,
                rule_code: m.rule_code,
            })
        })
        .collect();

    if request.dry_run {
        return Ok(EngineSummary {
            categorized: results.len(),
            checked,
            dry_run: true,
            results: Some(results),
            message: None,
        });
    }

    let outcome = write_back(conn, &results);
    Ok(EngineSummary {
        categorized: outcome.written,
        checked,
        dry_run: false,
        results: None,
        message: None,
    })
}
