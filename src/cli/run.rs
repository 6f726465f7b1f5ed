use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::engine;
use crate::error::{KontoError, Result};
use crate::fmt::percent;
use crate::models::EngineRequest;
use crate::rules::{load_rules, MatchConfig};
use crate::settings::load_settings;

pub fn run(
    tenant: Option<String>,
    account: Option<String>,
    dry_run: bool,
    json: bool,
    min_confidence: Option<f64>,
) -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("kontomatch.db");
    if !db_path.exists() {
        return Err(KontoError::Other(
            "Database not found. Run `kontomatch init` first.".to_string(),
        ));
    }

    let conn = get_connection(&db_path)?;
    let rules = load_rules(&data_dir)?;
    let config = MatchConfig {
        min_confidence: min_confidence.unwrap_or(settings.min_confidence),
        batch_size: settings.batch_size,
        ..MatchConfig::default()
    };
    let request = EngineRequest {
        tenant_id: tenant,
        account_ref: account,
        dry_run,
    };

    let summary = engine::run(&conn, &request, &rules, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if let Some(message) = &summary.message {
        println!("{message}");
        return Ok(());
    }

    println!("Checked:     {}", summary.checked);
    println!("Categorized: {}", summary.categorized);
    println!("Unmatched:   {}", summary.checked - summary.categorized);

    if let Some(results) = &summary.results {
        let mut table = Table::new();
        table.set_header(vec!["ID", "Source", "Category", "Confidence", "Rule"]);
        for r in results {
            table.add_row(vec![
                Cell::new(&r.id),
                Cell::new(r.source.as_str()),
                Cell::new(&r.category),
                Cell::new(percent(r.confidence)),
                Cell::new(&r.rule_code),
            ]);
        }
        println!();
        println!("Dry run — nothing was written.\n{table}");
    }

    Ok(())
}
