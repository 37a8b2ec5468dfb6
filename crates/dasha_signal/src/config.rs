//! Scoring configuration.
//!
//! Every weight, multiplier and threshold used by the pipeline lives here.
//! Defaults reproduce the classical constants; a TOML document may override
//! any subset of fields.

use dasha_vedic_base::OnsetEnhancement;
use serde::{Deserialize, Serialize};

use crate::error::{SignalError, SignalResult};
use crate::house::{FirstLordSource, HouseSystem};

/// Weights of the five factors in the single-lord score.
///
/// Dignity contributes twice: once as lord strength and once as
/// planetary dignity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    pub lord_strength: f64,
    pub protection: f64,
    pub luminaries: f64,
    pub base_nature: f64,
    pub planetary_dignity: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            lord_strength: 0.30,
            protection: 0.25,
            luminaries: 0.20,
            base_nature: 0.15,
            planetary_dignity: 0.10,
        }
    }
}

impl FactorWeights {
    pub fn total(&self) -> f64 {
        self.lord_strength + self.protection + self.luminaries + self.base_nature + self.planetary_dignity
    }
}

/// Base-nature term by natural benefic/malefic status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseNature {
    pub benefic: f64,
    pub malefic: f64,
}

impl Default for BaseNature {
    fn default() -> Self {
        Self { benefic: 1.0, malefic: 0.3 }
    }
}

/// Composite weights by period depth, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelWeights {
    pub two: [f64; 2],
    pub three: [f64; 3],
}

impl Default for LevelWeights {
    fn default() -> Self {
        Self {
            two: [0.7, 0.3],
            three: [0.5, 0.3, 0.2],
        }
    }
}

impl LevelWeights {
    /// Weights for a period with `depth` lords.
    pub fn for_depth(&self, depth: usize) -> &[f64] {
        match depth {
            2 => &self.two,
            3 => &self.three,
            _ => &[1.0],
        }
    }
}

/// Relative weights of the D1, D9 and D10 charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartWeights {
    pub d1: f64,
    pub d9: f64,
    pub d10: f64,
}

impl Default for ChartWeights {
    fn default() -> Self {
        Self { d1: 10.0, d9: 9.0, d10: 8.0 }
    }
}

/// Which divisional charts are combined with D1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSelection {
    pub navamsha: bool,
    pub dashamsha: bool,
}

/// Vargottama multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResonanceBonus {
    pub d9: f64,
    pub d10: f64,
}

impl Default for ResonanceBonus {
    fn default() -> Self {
        Self { d9: 1.25, d10: 1.20 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionConfig {
    /// Score added per matching reason.
    pub step: f64,
    /// Minimum onset strength for a benefic in a kendra to protect.
    pub kendra_benefic_min_strength: f64,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            step: 0.2,
            kendra_benefic_min_strength: 7.0,
        }
    }
}

/// Categorical rating cutoffs, each an inclusive lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingCutoffs {
    pub strong_buy: f64,
    pub buy: f64,
    pub hold: f64,
    pub sell: f64,
}

impl Default for RatingCutoffs {
    fn default() -> Self {
        Self {
            strong_buy: 8.5,
            buy: 7.0,
            hold: 5.5,
            sell: 3.0,
        }
    }
}

/// Transition classifier thresholds. Decline thresholds are magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionThresholds {
    pub strong_buy_change: f64,
    pub strong_buy_max_score: f64,
    pub buy_change: f64,
    pub buy_max_score: f64,
    pub strong_sell_change: f64,
    pub strong_sell_min_score: f64,
    pub sell_change: f64,
    pub sell_min_score: f64,
    /// Change at or beyond which strong signals get HIGH confidence.
    pub high_confidence_change: f64,
    /// Largest absolute change still classified as HOLD.
    pub hold_band: f64,
}

impl Default for TransitionThresholds {
    fn default() -> Self {
        Self {
            strong_buy_change: 2.5,
            strong_buy_max_score: 5.5,
            buy_change: 1.5,
            buy_max_score: 6.0,
            strong_sell_change: 2.5,
            strong_sell_min_score: 6.0,
            sell_change: 1.5,
            sell_min_score: 5.5,
            high_confidence_change: 3.5,
            hold_band: 1.0,
        }
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub factors: FactorWeights,
    pub base_nature: BaseNature,
    pub levels: LevelWeights,
    pub charts: ChartWeights,
    pub divisional: ChartSelection,
    pub resonance: ResonanceBonus,
    pub protection: ProtectionConfig,
    pub ratings: RatingCutoffs,
    pub transitions: TransitionThresholds,
    pub onset: OnsetEnhancement,
    pub house_systems: Vec<HouseSystem>,
    pub first_lord: FirstLordSource,
    /// Score periods on the rayon pool.
    pub parallel: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            factors: FactorWeights::default(),
            base_nature: BaseNature::default(),
            levels: LevelWeights::default(),
            charts: ChartWeights::default(),
            divisional: ChartSelection::default(),
            resonance: ResonanceBonus::default(),
            protection: ProtectionConfig::default(),
            ratings: RatingCutoffs::default(),
            transitions: TransitionThresholds::default(),
            onset: OnsetEnhancement::default(),
            house_systems: vec![HouseSystem::Lagna],
            first_lord: FirstLordSource::default(),
            parallel: true,
        }
    }
}

impl ScoringConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(text: &str) -> SignalResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_divisional(mut self, navamsha: bool, dashamsha: bool) -> Self {
        self.divisional = ChartSelection { navamsha, dashamsha };
        self
    }

    pub fn with_house_systems(mut self, systems: &[HouseSystem]) -> Self {
        self.house_systems = systems.to_vec();
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Reject weights and thresholds the pipeline cannot use.
    pub fn validate(&self) -> SignalResult<()> {
        let invalid = |msg: String| Err(SignalError::InvalidConfig(msg));

        let f = &self.factors;
        let factor_values = [
            f.lord_strength,
            f.protection,
            f.luminaries,
            f.base_nature,
            f.planetary_dignity,
        ];
        if factor_values.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return invalid("factor weights must be finite and non-negative".into());
        }
        if f.total() > 1.0 + 1e-9 {
            return invalid(format!("factor weights sum to {} (at most 1.0)", f.total()));
        }
        for (name, weights) in [("two", &self.levels.two[..]), ("three", &self.levels.three[..])] {
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.iter().sum::<f64>() <= 0.0 {
                return invalid(format!("{name}-level weights must be non-negative with a positive sum"));
            }
        }
        let b = &self.base_nature;
        if [b.benefic, b.malefic].iter().any(|v| !(0.0..=1.0).contains(v)) {
            return invalid(format!(
                "base nature terms must lie in [0, 1] (benefic {}, malefic {})",
                b.benefic, b.malefic
            ));
        }
        let o = &self.onset;
        if [o.exalted, o.moolatrikona, o.own_sign, o.friend, o.neutral]
            .iter()
            .any(|m| !m.is_finite() || *m < 0.0)
        {
            return invalid("onset multipliers must be finite and non-negative".into());
        }
        let c = &self.charts;
        if [c.d1, c.d9, c.d10].iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return invalid("chart weights must be positive".into());
        }
        if self.resonance.d9 < 1.0 || self.resonance.d10 < 1.0 {
            return invalid("resonance bonuses must be at least 1.0".into());
        }
        if !(self.protection.step > 0.0 && self.protection.step <= 1.0) {
            return invalid(format!("protection step {} outside (0, 1]", self.protection.step));
        }
        let r = &self.ratings;
        if !(r.strong_buy > r.buy && r.buy > r.hold && r.hold > r.sell) {
            return invalid("rating cutoffs must be strictly descending".into());
        }
        let t = &self.transitions;
        if [t.strong_buy_change, t.buy_change, t.strong_sell_change, t.sell_change, t.hold_band]
            .iter()
            .any(|v| *v < 0.0)
        {
            return invalid("transition thresholds are magnitudes and must be non-negative".into());
        }
        if self.house_systems.is_empty() {
            return invalid("at least one house system is required".into());
        }
        Ok(())
    }
}
