//! D9 / D10 scoring of a period's outermost lord.
//!
//! The lord's natal longitude is mapped into the divisional chart and its
//! onset dignity in the resulting sign becomes the chart score, boosted when
//! the lord is vargottama.

use dasha_vedic_base::{
    ChartPositions, DashamshaDeity, DignityResult, Graha, Varga, VargaPosition,
    evaluate_dignity_with, round2, varga_position,
};
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;

/// Neutral score for a lord without a natal position.
pub const NEUTRAL_DIVISIONAL_SCORE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionalScore {
    pub varga: Varga,
    pub lord: Graha,
    /// `None` when the lord had no natal position.
    pub position: Option<VargaPosition>,
    pub dignity: Option<DignityResult>,
    /// 0-10, two decimals.
    pub score: f64,
}

impl DivisionalScore {
    pub fn is_vargottama(&self) -> bool {
        self.position.is_some_and(|p| p.is_vargottama)
    }

    pub fn deity(&self) -> Option<DashamshaDeity> {
        self.position.and_then(|p| p.deity)
    }
}

fn resonance_bonus(varga: Varga, config: &ScoringConfig) -> f64 {
    match varga {
        Varga::D9 => config.resonance.d9,
        Varga::D10 => config.resonance.d10,
        Varga::D1 => 1.0,
    }
}

/// Score `lord` in `varga` from its natal longitude.
pub fn divisional_score(
    lord: Graha,
    natal: &ChartPositions,
    varga: Varga,
    config: &ScoringConfig,
) -> DivisionalScore {
    let Some(lon) = natal.longitude(lord) else {
        return DivisionalScore {
            varga,
            lord,
            position: None,
            dignity: None,
            score: NEUTRAL_DIVISIONAL_SCORE,
        };
    };
    let position = varga_position(lon, varga);
    let dignity = evaluate_dignity_with(lord, position.division_rashi, true, None, &config.onset);
    let bonus = if position.is_vargottama {
        resonance_bonus(varga, config)
    } else {
        1.0
    };
    DivisionalScore {
        varga,
        lord,
        position: Some(position),
        dignity: Some(dignity),
        score: round2((dignity.strength * bonus).min(10.0)),
    }
}

pub fn navamsha_score(lord: Graha, natal: &ChartPositions, config: &ScoringConfig) -> DivisionalScore {
    divisional_score(lord, natal, Varga::D9, config)
}

pub fn dashamsha_score(
    lord: Graha,
    natal: &ChartPositions,
    config: &ScoringConfig,
) -> DivisionalScore {
    divisional_score(lord, natal, Varga::D10, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dasha_vedic_base::Rashi;

    #[test]
    fn missing_lord_is_neutral() {
        let s = navamsha_score(Graha::Guru, &ChartPositions::new(), &ScoringConfig::default());
        assert!((s.score - NEUTRAL_DIVISIONAL_SCORE).abs() < 1e-12);
        assert!(s.position.is_none());
        assert!(!s.is_vargottama());
    }

    #[test]
    fn vargottama_bonus_clamped() {
        // Sun at 1 deg Mesha: first navamsha of a fire sign is Mesha → vargottama,
        // exalted → 10 × 1.25 clamps to 10.
        let natal = ChartPositions::new().with_graha(Graha::Surya, 1.0);
        let s = navamsha_score(Graha::Surya, &natal, &ScoringConfig::default());
        assert!(s.is_vargottama());
        assert_eq!(s.position.map(|p| p.division_rashi), Some(Rashi::Mesha));
        assert!((s.score - 10.0).abs() < 1e-12);
    }

    #[test]
    fn vargottama_bonus_applied() {
        // Saturn at 1 deg Makara: earth navamsha starts at Makara → own sign,
        // 5.0 × 1.25 onset × 1.25 vargottama = 7.8125 → 7.81.
        let natal = ChartPositions::new().with_graha(Graha::Shani, 271.0);
        let s = navamsha_score(Graha::Shani, &natal, &ScoringConfig::default());
        assert!(s.is_vargottama());
        assert!((s.score - 7.81).abs() < 1e-9);
    }

    #[test]
    fn dashamsha_carries_deity() {
        // 1 deg Mesha → first D10 slice, Indra, odd sign starts at Mesha.
        let natal = ChartPositions::new().with_graha(Graha::Mangal, 1.0);
        let s = dashamsha_score(Graha::Mangal, &natal, &ScoringConfig::default());
        assert_eq!(s.deity(), Some(DashamshaDeity::Indra));
        assert!(s.is_vargottama());
        // Mars moolatrikona Mesha: 7.5 × 1.25 = 9.375, × 1.2 → 11.25 → 10
        assert!((s.score - 10.0).abs() < 1e-12);
    }
}
