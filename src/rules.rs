use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Direction, OwnerType};

/// The fixed category vocabulary the engine may assign.
pub const VALID_CATEGORIES: &[&str] = &[
    "MIETE",
    "HAUSGELD",
    "GRUNDSTEUER",
    "VERSICHERUNG",
    "DARLEHEN",
    "INSTANDHALTUNG",
    "EINSPEISEVERGUETUNG",
    "WARTUNG",
    "PACHT",
    "GEHALT",
    "SONSTIG_EINGANG",
    "SONSTIG_AUSGANG",
];

/// Inclusive bounds on the absolute transaction amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One classification rule: a pure data record. Rules are independent
/// candidates — no rule depends on another rule's outcome, so adding a
/// category is a data change only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchRule {
    pub rule_code: String,
    pub category: String,
    pub owner_types: Vec<OwnerType>,
    pub direction: Direction,
    /// Lower-cased substrings searched in purpose + counterparty.
    pub patterns: Vec<String>,
    #[serde(default)]
    pub require_all_patterns: bool,
    #[serde(default)]
    pub amount_range: Option<AmountRange>,
}

/// Scoring parameters. The confidence constants come from the original
/// calibration and are parameters, not fixed truths — tests and callers
/// may inject their own values.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Confidence assigned before any pattern evidence is counted.
    pub base: f64,
    /// Confidence added per matching pattern.
    pub per_pattern: f64,
    /// Upper bound on any computed confidence.
    pub cap: f64,
    /// Results below this are discarded, never persisted.
    pub min_confidence: f64,
    /// Upper bound on rows loaded per invocation.
    pub batch_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            base: 0.70,
            per_pattern: 0.08,
            cap: 0.95,
            min_confidence: 0.75,
            batch_size: 500,
        }
    }
}

fn rule(
    rule_code: &str,
    category: &str,
    owner_types: &[OwnerType],
    direction: Direction,
    patterns: &[&str],
) -> MatchRule {
    MatchRule {
        rule_code: rule_code.to_string(),
        category: category.to_string(),
        owner_types: owner_types.to_vec(),
        direction,
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        require_all_patterns: false,
        amount_range: None,
    }
}

/// The built-in rule set. Declaration order is the tie-break when two
/// rules reach the same confidence.
pub fn default_rules() -> Vec<MatchRule> {
    use Direction::{Credit, Debit};
    use OwnerType::{Person, Property, PvPlant};

    vec![
        rule("PROP_HAUSGELD", "HAUSGELD", &[Property], Debit,
            &["hausgeld", "weg", "hausverwaltung", "wohnungseigentümer"]),
        rule("PROP_GRUNDSTEUER", "GRUNDSTEUER", &[Property], Debit,
            &["grundsteuer", "finanzamt"]),
        rule("PROP_VERSICHERUNG", "VERSICHERUNG", &[Property], Debit,
            &["versicherung", "gebäudeversicherung", "wohngebäude"]),
        rule("PROP_INSTANDHALTUNG", "INSTANDHALTUNG", &[Property], Debit,
            &["reparatur", "sanierung", "handwerker", "instandhaltung", "wartung"]),
        rule("PV_EINSPEISUNG", "EINSPEISEVERGUETUNG", &[PvPlant], Credit,
            &["einspeisevergütung", "einspeisung", "netzbetreiber", "eeg"]),
        rule("PV_WARTUNG", "WARTUNG", &[PvPlant], Debit,
            &["wartung", "service", "solar", "photovoltaik", "pv"]),
        rule("PV_PACHT", "PACHT", &[PvPlant], Debit,
            &["pacht", "dachmiete", "dachpacht", "flächenmiete"]),
        rule("PV_VERSICHERUNG", "VERSICHERUNG", &[PvPlant], Debit,
            &["versicherung"]),
        rule("SHARED_DARLEHEN", "DARLEHEN", &[Property, PvPlant], Debit,
            &["darlehen", "tilgung", "annuität", "kreditrate", "zins und tilgung"]),
        rule("PERSON_GEHALT", "GEHALT", &[Person], Credit,
            &["gehalt", "lohn", "bezüge", "entgelt"]),
    ]
}

/// Active rule set: a `rules.json` in the data directory overrides the
/// built-in rules wholesale, so deployments can extend the vocabulary
/// without a rebuild.
pub fn load_rules(data_dir: &Path) -> Result<Vec<MatchRule>> {
    let path = data_dir.join("rules.json");
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        let rules: Vec<MatchRule> = serde_json::from_str(&content)?;
        Ok(rules)
    } else {
        Ok(default_rules())
    }
}
