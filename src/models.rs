use serde::{Deserialize, Serialize};

use crate::error::{KontoError, Result};

/// Money received vs. money paid out. Never stored — always derived
/// from the sign of the amount so the two can't drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            Direction::Credit
        } else {
            Direction::Debit
        }
    }
}

/// The kind of entity a bank account is attributed to. Gates which
/// rules may apply to its transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerType {
    Person,
    Property,
    PvPlant,
}

impl OwnerType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "person" => Some(OwnerType::Person),
            "property" => Some(OwnerType::Property),
            "pv_plant" => Some(OwnerType::PvPlant),
            _ => None,
        }
    }
}

/// Physical table a transaction row originated from. Write-back is
/// routed by this tag because the source schemas differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Manually imported ledger rows (`bank_transactions`).
    Csv,
    /// Bank-API-synced rows (`finapi_transactions`).
    Finapi,
}

impl Source {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "csv" => Ok(Source::Csv),
            "finapi" => Ok(Source::Finapi),
            other => Err(KontoError::UnknownSource(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Csv => "csv",
            Source::Finapi => "finapi",
        }
    }
}

/// One eligible transaction, normalized from the unified view.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: String,
    pub tenant_id: String,
    pub account_ref: String,
    pub booking_date: String,
    pub amount: f64,
    pub purpose: String,
    pub counterparty: String,
    pub source: Source,
    pub owner_type: Option<OwnerType>,
    pub owner_id: Option<String>,
}

impl Transaction {
    pub fn direction(&self) -> Direction {
        Direction::from_amount(self.amount)
    }

    /// Owner type with the documented default: absent means person.
    pub fn owner_type_or_default(&self) -> OwnerType {
        self.owner_type.unwrap_or(OwnerType::Person)
    }
}

/// Classifier verdict for a single transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub category: String,
    pub confidence: f64,
    pub rule_code: String,
}

/// An accepted classification bound to the row it belongs to,
/// ready for write-back (or for dry-run inspection).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub id: String,
    pub source: Source,
    pub category: String,
    pub confidence: f64,
    pub rule_code: String,
}

/// Invocation scope for one engine run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineRequest {
    pub tenant_id: Option<String>,
    pub account_ref: Option<String>,
    #[serde(default)]
    pub dry_run: bool,
}

/// Aggregate outcome of one engine run. Serializes to the response
/// contract: `results` is present only for dry runs, `message` only
/// when nothing was eligible.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSummary {
    pub categorized: usize,
    pub checked: usize,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Classification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
