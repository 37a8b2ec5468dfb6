//! Protection (cancellation) analysis at a period's onset.
//!
//! Three independent checks run against the onset position set, with houses
//! counted from the house-system reference:
//!
//! 1. a natural benefic in a kendra (1/4/7/10) with strong onset dignity;
//! 2. any graha in a trikona (1/5/9) occupying its exaltation sign;
//! 3. the period lord itself in own or exaltation sign.

use dasha_vedic_base::{
    ALL_GRAHAS, ChartPositions, Graha, NATURAL_BENEFICS, OnsetEnhancement, RelationshipContext,
    evaluate_dignity_with, exaltation_rashi, house_number, own_signs,
};
use serde::{Deserialize, Serialize};

use crate::config::ProtectionConfig;

const KENDRA_HOUSES: [u8; 4] = [1, 4, 7, 10];
const TRIKONA_HOUSES: [u8; 3] = [1, 5, 9];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProtectionResult {
    /// Matching checks in evaluation order.
    pub reasons: Vec<String>,
    /// `min(1, step × reasons)`.
    pub score: f64,
    pub is_protected: bool,
}

impl ProtectionResult {
    fn from_reasons(reasons: Vec<String>, step: f64) -> Self {
        let score = (step * reasons.len() as f64).min(1.0);
        let is_protected = !reasons.is_empty();
        Self {
            reasons,
            score,
            is_protected,
        }
    }

    pub fn count(&self) -> usize {
        self.reasons.len()
    }
}

/// Run all three checks for `lord` against `positions`.
///
/// Grahas without a position are skipped by every check.
pub fn analyze_protection(
    lord: Graha,
    positions: &ChartPositions,
    reference: f64,
    config: &ProtectionConfig,
    enhancement: &OnsetEnhancement,
) -> ProtectionResult {
    let mut reasons = Vec::new();
    let context = RelationshipContext {
        positions,
        reference,
    };

    for benefic in NATURAL_BENEFICS {
        let Some(pos) = positions.get(benefic) else {
            continue;
        };
        if !KENDRA_HOUSES.contains(&house_number(pos.longitude, reference)) {
            continue;
        }
        let dignity = evaluate_dignity_with(benefic, pos.rashi, true, Some(&context), enhancement);
        if dignity.strength >= config.kendra_benefic_min_strength {
            reasons.push(format!(
                "Strong {} in kendra at dasha start",
                benefic.english_name()
            ));
        }
    }

    for graha in ALL_GRAHAS {
        let Some(pos) = positions.get(graha) else {
            continue;
        };
        if TRIKONA_HOUSES.contains(&house_number(pos.longitude, reference))
            && pos.rashi == exaltation_rashi(graha)
        {
            reasons.push(format!(
                "Exalted {} in trikona at dasha start",
                graha.english_name()
            ));
        }
    }

    if let Some(rashi) = positions.rashi(lord) {
        if rashi == exaltation_rashi(lord) || own_signs(lord).contains(&rashi) {
            reasons.push(format!(
                "Dasha lord {} in own/exalted sign at start",
                lord.english_name()
            ));
        }
    }

    ProtectionResult::from_reasons(reasons, config.step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(lord: Graha, positions: &ChartPositions, reference: f64) -> ProtectionResult {
        analyze_protection(
            lord,
            positions,
            reference,
            &ProtectionConfig::default(),
            &OnsetEnhancement::default(),
        )
    }

    #[test]
    fn empty_chart_unprotected() {
        let r = check(Graha::Surya, &ChartPositions::new(), 0.0);
        assert!(!r.is_protected);
        assert_eq!(r.count(), 0);
        assert!(r.score.abs() < 1e-12);
    }

    #[test]
    fn exalted_jupiter_in_kendra_fires_two_checks() {
        // Jupiter in Karka (95 deg), reference in Mesha → house 4 (kendra),
        // exalted → strength 10.
        let p = ChartPositions::new().with_graha(Graha::Guru, 95.0);
        let r = check(Graha::Shani, &p, 5.0);
        assert_eq!(r.reasons, vec!["Strong Jupiter in kendra at dasha start"]);
        assert!((r.score - 0.2).abs() < 1e-12);

        // Same Jupiter from a Karka reference: house 1 is both kendra and trikona.
        let r = check(Graha::Shani, &p, 92.0);
        assert_eq!(r.count(), 2);
        assert!(r.reasons[1].starts_with("Exalted Jupiter in trikona"));
    }

    #[test]
    fn weak_benefic_in_kendra_ignored() {
        // Venus debilitated in Kanya, house 1 from a Kanya reference.
        let p = ChartPositions::new().with_graha(Graha::Shukra, 160.0);
        let r = check(Graha::Surya, &p, 155.0);
        assert!(!r.is_protected);
    }

    #[test]
    fn malefic_in_kendra_not_counted() {
        // Mars in own Mesha, house 1: not a natural benefic, not exalted.
        let p = ChartPositions::new().with_graha(Graha::Mangal, 10.0);
        let r = check(Graha::Surya, &p, 0.0);
        assert!(!r.is_protected);
    }

    #[test]
    fn lord_in_own_sign() {
        let p = ChartPositions::new().with_graha(Graha::Shani, 290.0);
        let r = check(Graha::Shani, &p, 0.0);
        assert_eq!(r.reasons, vec!["Dasha lord Saturn in own/exalted sign at start"]);
    }

    #[test]
    fn score_capped_at_one() {
        // Jupiter exalted in Karka (house 4 kendra), Sun exalted in Mesha
        // (house 1 trikona) and the Sun is also the lord. Reference 0.
        let p = ChartPositions::new()
            .with_graha(Graha::Surya, 10.0)
            .with_graha(Graha::Guru, 95.0)
            .with_graha(Graha::Mangal, 280.0);
        let cfg = ProtectionConfig {
            step: 0.4,
            ..ProtectionConfig::default()
        };
        let r = analyze_protection(Graha::Surya, &p, 0.0, &cfg, &OnsetEnhancement::default());
        assert_eq!(r.count(), 3);
        assert!((r.score - 1.0).abs() < 1e-12);
    }
}
