//! Multi-chart combination, ratings and short effect tags.

use std::fmt::{Display, Formatter};

use dasha_vedic_base::{DashamshaDeity, round2};
use serde::{Deserialize, Serialize};

use crate::config::{ChartWeights, RatingCutoffs, ScoringConfig};
use crate::weighted::{Weighted, weighted_mean};

/// Categorical investment rating of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Rating {
    pub fn from_score(score: f64, cutoffs: &RatingCutoffs) -> Self {
        if score >= cutoffs.strong_buy {
            Self::StrongBuy
        } else if score >= cutoffs.buy {
            Self::Buy
        } else if score >= cutoffs.hold {
            Self::Hold
        } else if score >= cutoffs.sell {
            Self::Sell
        } else {
            Self::StrongSell
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

/// Per-chart scores of one period. D1 is always present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScores {
    pub d1: f64,
    pub d9: Option<f64>,
    pub d10: Option<f64>,
}

impl ChartScores {
    pub const fn d1_only(d1: f64) -> Self {
        Self {
            d1,
            d9: None,
            d10: None,
        }
    }
}

/// `Σ w·s / Σ w` over the supplied charts, clamped to [1, 10] and rounded
/// to two decimals.
///
/// The bound is the D1 scale, [1, 10], not the 0-10 range of divisional
/// strengths. D1 alone is returned unchanged.
pub fn combine_charts(scores: &ChartScores, weights: &ChartWeights) -> f64 {
    let mut items = vec![Weighted::new(scores.d1, weights.d1)];
    items.extend(scores.d9.map(|s| Weighted::new(s, weights.d9)));
    items.extend(scores.d10.map(|s| Weighted::new(s, weights.d10)));
    if items.len() == 1 {
        return scores.d1;
    }
    // divisional strengths run 0-10
    weighted_mean(&items).map_or(scores.d1, |m| round2(m.clamp(MIN_SCORE, MAX_SCORE)))
}

/// Combined score with the rating of each chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedRating {
    pub score: f64,
    pub rating: Rating,
    pub d1_rating: Rating,
    pub d9_rating: Option<Rating>,
    pub d10_rating: Option<Rating>,
}

pub fn combine(scores: &ChartScores, config: &ScoringConfig) -> CombinedRating {
    let cutoffs = &config.ratings;
    let score = combine_charts(scores, &config.charts);
    CombinedRating {
        score,
        rating: Rating::from_score(score, cutoffs),
        d1_rating: Rating::from_score(scores.d1, cutoffs),
        d9_rating: scores.d9.map(|s| Rating::from_score(s, cutoffs)),
        d10_rating: scores.d10.map(|s| Rating::from_score(s, cutoffs)),
    }
}

// ---------------------------------------------------------------------------
// Effect tags
// ---------------------------------------------------------------------------

const BALANCED_BAND: f64 = 1.0;
const DOMINANCE_SPREAD: f64 = 2.0;
const EXCELLENCE: f64 = 8.0;

/// "D9 Strengthens (+1.5) → Buy" and friends.
pub fn navamsha_effect(d1: f64, d9: f64, rating: Rating) -> String {
    let delta = d9 - d1;
    if delta.abs() <= BALANCED_BAND {
        format!("D9 Balanced (±{:.1}) → {rating}", delta.abs())
    } else if delta > 0.0 {
        format!("D9 Strengthens (+{delta:.1}) → {rating}")
    } else {
        format!("D9 Weakens ({delta:.1}) → {rating}")
    }
}

/// Career delta, key deity and vargottama markers joined by " | ".
pub fn dashamsha_effect(
    d1: f64,
    d10: f64,
    deity: Option<DashamshaDeity>,
    is_vargottama: bool,
) -> String {
    let delta = d10 - d1;
    let mut parts = Vec::new();
    if delta > BALANCED_BAND {
        parts.push(format!("Career+{delta:.1}"));
    } else if delta < -BALANCED_BAND {
        parts.push(format!("Career{delta:.1}"));
    }
    if let Some(deity) = deity.filter(|d| d.is_key_career_deity()) {
        parts.push(deity.name().to_string());
    }
    if is_vargottama {
        parts.push("D10-Varg".to_string());
    }
    if parts.is_empty() {
        "D10 Balanced".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Dominant chart, final rating and excellence marker for D1+D9+D10.
pub fn triple_effect(d1: f64, d9: f64, d10: f64, rating: Rating) -> String {
    let charts = [("D1", d1), ("D9", d9), ("D10", d10)];
    // Earliest chart wins ties.
    let (strongest, high) = charts
        .iter()
        .copied()
        .fold(charts[0], |best, c| if c.1 > best.1 { c } else { best });
    let low = charts.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);

    let mut parts = Vec::with_capacity(3);
    if high - low >= DOMINANCE_SPREAD {
        parts.push(format!("{strongest}-Led"));
    } else {
        parts.push("Balanced".to_string());
    }
    parts.push(rating.label().to_string());
    if d10 >= EXCELLENCE {
        parts.push("Career-Excel".to_string());
    } else if d9 >= EXCELLENCE {
        parts.push("Sustain-Strong".to_string());
    } else if d1 >= EXCELLENCE {
        parts.push("Immediate-Strong".to_string());
    }
    parts.join(" | ")
}
