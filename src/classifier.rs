use crate::models::{MatchResult, Transaction};
use crate::rules::{MatchConfig, MatchRule};

/// Select the single best category for one transaction, or none.
///
/// Pure function: evaluates every applicable rule, scores each by
/// counted pattern evidence and keeps the highest-confidence candidate.
/// Ties go to the rule declared first (strictly-greater replacement).
/// Candidates below `config.min_confidence` are dropped entirely rather
/// than returned with a low score.
pub fn classify(
    tx: &Transaction,
    rules: &[MatchRule],
    config: &MatchConfig,
) -> Option<MatchResult> {
    let direction = tx.direction();
    let owner_type = tx.owner_type_or_default();
    let haystack = format!("{} {}", tx.purpose, tx.counterparty).to_lowercase();
    let abs_amount = tx.amount.abs();

    let mut best: Option<MatchResult> = None;

    for rule in rules {
        if rule.direction != direction {
            continue;
        }
        if !rule.owner_types.contains(&owner_type) {
            continue;
        }
        if let Some(range) = &rule.amount_range {
            if range.min.is_some_and(|min| abs_amount < min) {
                continue;
            }
            if range.max.is_some_and(|max| abs_amount > max) {
                continue;
            }
        }

        let satisfied = if rule.require_all_patterns {
            rule.patterns.iter().all(|p| haystack.contains(p.as_str()))
        } else {
            rule.patterns.iter().any(|p| haystack.contains(p.as_str()))
        };
        if !satisfied {
            continue;
        }

        let match_count = rule
            .patterns
            .iter()
            .filter(|p| haystack.contains(p.as_str()))
            .count();
        let confidence = (config.base + match_count as f64 * config.per_pattern).min(config.cap);

        let replaces = best.as_ref().map_or(true, |b| confidence > b.confidence);
        if replaces {
            best = Some(MatchResult {
                category: rule.category.clone(),
                confidence,
                rule_code: rule.rule_code.clone(),
            });
        }
    }

    best.filter(|b| b.confidence >= config.min_confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, OwnerType, Source};
    use crate::rules::{default_rules, AmountRange};

    fn tx(amount: f64, purpose: &str, counterparty: &str, owner: Option<OwnerType>) -> Transaction {
        Transaction {
            id: "tx-1".to_string(),
            tenant_id: "t-1".to_string(),
            account_ref: "DE02120300000000202051".to_string(),
            booking_date: "2025-01-15".to_string(),
            amount,
            purpose: purpose.to_string(),
            counterparty: counterparty.to_string(),
            source: Source::Csv,
            owner_type: owner,
            owner_id: Some("o-1".to_string()),
        }
    }

    fn rule(
        code: &str,
        category: &str,
        owners: &[OwnerType],
        direction: Direction,
        patterns: &[&str],
    ) -> MatchRule {
        MatchRule {
            rule_code: code.to_string(),
            category: category.to_string(),
            owner_types: owners.to_vec(),
            direction,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            require_all_patterns: false,
            amount_range: None,
        }
    }

    #[test]
    fn test_hausgeld_debit_for_property() {
        // -450.00 "Hausgeld Januar" / "WEG Verwalter" matches both
        // "hausgeld" and "weg" → 0.70 + 2×0.08 = 0.86
        let t = tx(-450.0, "Hausgeld Januar", "WEG Verwalter", Some(OwnerType::Property));
        let m = classify(&t, &default_rules(), &MatchConfig::default()).unwrap();
        assert_eq!(m.category, "HAUSGELD");
        assert_eq!(m.rule_code, "PROP_HAUSGELD");
        assert!((m.confidence - 0.86).abs() < 1e-9);
    }

    #[test]
    fn test_einspeiseverguetung_credit_for_pv_plant() {
        let t = tx(
            1200.0,
            "Einspeisevergütung 09/2025",
            "Netzbetreiber GmbH",
            Some(OwnerType::PvPlant),
        );
        let m = classify(&t, &default_rules(), &MatchConfig::default()).unwrap();
        assert_eq!(m.category, "EINSPEISEVERGUETUNG");
        assert_eq!(m.rule_code, "PV_EINSPEISUNG");
        assert!((m.confidence - 0.86).abs() < 1e-9);
    }

    #[test]
    fn test_no_match_stays_unclassified() {
        let t = tx(-80.0, "Sonstiges", "Unbekannt", Some(OwnerType::Person));
        assert!(classify(&t, &default_rules(), &MatchConfig::default()).is_none());
    }

    #[test]
    fn test_owner_type_gates_text_match() {
        // Same text as the Hausgeld case, but a person account: the
        // property-scoped rule must not fire.
        let t = tx(-450.0, "Hausgeld Januar", "WEG Verwalter", Some(OwnerType::Person));
        assert!(classify(&t, &default_rules(), &MatchConfig::default()).is_none());
    }

    #[test]
    fn test_missing_owner_type_defaults_to_person() {
        let t = tx(3200.0, "Gehalt August", "Arbeitgeber AG", None);
        let m = classify(&t, &default_rules(), &MatchConfig::default()).unwrap();
        assert_eq!(m.category, "GEHALT");
    }

    #[test]
    fn test_direction_gates_match() {
        // Salary pattern on a debit never matches the credit-only rule.
        let t = tx(-3200.0, "Gehalt Rückbuchung", "Arbeitgeber AG", None);
        assert!(classify(&t, &default_rules(), &MatchConfig::default()).is_none());
    }

    #[test]
    fn test_deterministic() {
        let t = tx(-450.0, "Hausgeld Januar", "WEG Verwalter", Some(OwnerType::Property));
        let rules = default_rules();
        let config = MatchConfig::default();
        let a = classify(&t, &rules, &config).unwrap();
        let b = classify(&t, &rules, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_confidence_is_monotonic_and_capped() {
        let config = MatchConfig::default();
        let rules = default_rules();
        // One matching pattern
        let one = tx(-100.0, "Grundsteuer Q3", "Stadtkasse", Some(OwnerType::Property));
        // Two matching patterns
        let two = tx(-100.0, "Grundsteuer Q3", "Finanzamt Mitte", Some(OwnerType::Property));
        let m1 = classify(&one, &rules, &config).unwrap();
        let m2 = classify(&two, &rules, &config).unwrap();
        assert!(m2.confidence >= m1.confidence);

        // Five matching patterns would exceed the cap; it must clamp.
        let many = tx(
            -900.0,
            "Reparatur Sanierung Handwerker Instandhaltung Wartung",
            "Bau GmbH",
            Some(OwnerType::Property),
        );
        let m = classify(&many, &rules, &config).unwrap();
        assert!((m.confidence - config.cap).abs() < 1e-9);

        for m in [&m1, &m2] {
            assert!(m.confidence >= config.base && m.confidence <= config.cap);
        }
    }

    #[test]
    fn test_below_threshold_is_discarded() {
        // A rule whose single pattern yields base + 1×increment below
        // the minimum: 0.60 + 0.08 = 0.68 < 0.75.
        let rules = vec![rule(
            "WEAK",
            "SONSTIG_AUSGANG",
            &[OwnerType::Person],
            Direction::Debit,
            &["sonstiges"],
        )];
        let config = MatchConfig {
            base: 0.60,
            ..MatchConfig::default()
        };
        let t = tx(-10.0, "Sonstiges", "", None);
        assert!(classify(&t, &rules, &config).is_none());
    }

    #[test]
    fn test_tie_break_prefers_first_declared_rule() {
        let rules = vec![
            rule("FIRST", "WARTUNG", &[OwnerType::Person], Direction::Debit, &["service"]),
            rule("SECOND", "INSTANDHALTUNG", &[OwnerType::Person], Direction::Debit, &["service"]),
        ];
        let t = tx(-50.0, "Service Pauschale", "", None);
        let m = classify(&t, &rules, &MatchConfig::default()).unwrap();
        assert_eq!(m.rule_code, "FIRST");
    }

    #[test]
    fn test_more_evidence_beats_declaration_order() {
        let rules = vec![
            rule("ONE_HIT", "WARTUNG", &[OwnerType::Person], Direction::Debit, &["service"]),
            rule(
                "TWO_HITS",
                "INSTANDHALTUNG",
                &[OwnerType::Person],
                Direction::Debit,
                &["service", "vertrag"],
            ),
        ];
        let t = tx(-50.0, "Service Vertrag 2025", "", None);
        let m = classify(&t, &rules, &MatchConfig::default()).unwrap();
        assert_eq!(m.rule_code, "TWO_HITS");
    }

    #[test]
    fn test_require_all_patterns() {
        let mut strict = rule(
            "STRICT",
            "DARLEHEN",
            &[OwnerType::Person],
            Direction::Debit,
            &["zins", "tilgung"],
        );
        strict.require_all_patterns = true;
        let rules = vec![strict];
        let config = MatchConfig::default();

        let partial = tx(-500.0, "Tilgung Darlehen", "Bank", None);
        assert!(classify(&partial, &rules, &config).is_none());

        let full = tx(-500.0, "Zins und Tilgung", "Bank", None);
        let m = classify(&full, &rules, &config).unwrap();
        assert_eq!(m.rule_code, "STRICT");
    }

    #[test]
    fn test_amount_range_bounds_are_inclusive() {
        let mut bounded = rule(
            "BOUNDED",
            "PACHT",
            &[OwnerType::PvPlant],
            Direction::Debit,
            &["pacht"],
        );
        bounded.amount_range = Some(AmountRange {
            min: Some(100.0),
            max: Some(500.0),
        });
        let rules = vec![bounded];
        let config = MatchConfig::default();

        assert!(classify(&tx(-99.99, "Pacht", "", Some(OwnerType::PvPlant)), &rules, &config).is_none());
        assert!(classify(&tx(-100.0, "Pacht", "", Some(OwnerType::PvPlant)), &rules, &config).is_some());
        assert!(classify(&tx(-500.0, "Pacht", "", Some(OwnerType::PvPlant)), &rules, &config).is_some());
        assert!(classify(&tx(-500.01, "Pacht", "", Some(OwnerType::PvPlant)), &rules, &config).is_none());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let t = tx(-450.0, "HAUSGELD JANUAR", "Weg VERWALTER", Some(OwnerType::Property));
        let m = classify(&t, &default_rules(), &MatchConfig::default()).unwrap();
        assert_eq!(m.category, "HAUSGELD");
    }

    #[test]
    fn test_custom_scoring_parameters() {
        // The scoring constants are injectable, not hard-coded.
        let config = MatchConfig {
            base: 0.50,
            per_pattern: 0.20,
            cap: 0.90,
            min_confidence: 0.60,
            batch_size: 500,
        };
        let t = tx(-450.0, "Hausgeld Januar", "WEG Verwalter", Some(OwnerType::Property));
        let m = classify(&t, &default_rules(), &config).unwrap();
        assert!((m.confidence - 0.90).abs() < 1e-9, "0.50 + 2×0.20 clamps to 0.90");
    }
}
