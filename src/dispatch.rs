use colored::Colorize;
use rusqlite::Connection;

use crate::models::{Classification, Source};

/// Per-row write-back tally. `failed` rows stay unmatched and are
/// picked up again on the next invocation.
#[derive(Debug, Default)]
pub struct WriteBackOutcome {
    pub written: usize,
    pub failed: usize,
}

/// Persist accepted classifications to each row's originating table.
///
/// The source schemas differ: `bank_transactions` stores the numeric
/// confidence, `finapi_transactions` has no confidence column and keeps
/// only the rule code and status. Updates are per-row and independent —
/// a failure is logged and skipped, never aborting the rest of the
/// batch, because the operation is additive and re-runnable.
///
/// Concurrency rests on the eligibility filter as an implicit optimistic
/// claim: two racing invocations compute the same deterministic result,
/// so a double write converges on the same values.
pub fn write_back(conn: &Connection, results: &[Classification]) -> WriteBackOutcome {
    let mut outcome = WriteBackOutcome::default();

    for r in results {
        let updated = match r.source {
            Source::Csv => conn.execute(
                "UPDATE bank_transactions \
                 SET match_category = ?1, match_confidence = ?2, match_rule_code = ?3, \
                     match_status = 'categorized' \
                 WHERE id = ?4",
                rusqlite::params![r.category, r.confidence, r.rule_code, r.id],
            ),
            Source::Finapi => conn.execute(
                "UPDATE finapi_transactions \
                 SET match_category = ?1, match_rule_code = ?2, match_status = 'categorized' \
                 WHERE id = ?3",
                rusqlite::params![r.category, r.rule_code, r.id],
            ),
        };
        match updated {
            // `execute` reports rows changed; a vanished id counts as zero.
            Ok(n) => outcome.written += n,
            Err(e) => {
                eprintln!(
                    "{} write-back failed for {} ({}): {e}",
                    "warning:".yellow().bold(),
                    r.id,
                    r.source.as_str()
                );
                outcome.failed += 1;
            }
        }
    }

    outcome
}
