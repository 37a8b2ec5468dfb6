//! Buy/hold/sell classification of score changes between consecutive periods.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use dasha_vedic_base::round2;
use serde::{Deserialize, Serialize};

use crate::config::TransitionThresholds;
use crate::period::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Action {
    pub const fn label(self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG BUY",
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::StrongSell => "STRONG SELL",
        }
    }

    pub const fn is_buy(self) -> bool {
        matches!(self, Self::StrongBuy | Self::Buy)
    }

    pub const fn is_sell(self) -> bool {
        matches!(self, Self::StrongSell | Self::Sell)
    }

    /// Short strategy note attached to every opportunity of this kind.
    pub const fn strategy(self) -> &'static str {
        match self {
            Self::StrongBuy => "Buy before surge",
            Self::Buy => "Accumulate on improvement",
            Self::Hold => "Maintain current strategy",
            Self::Sell => "Take profits on decline",
            Self::StrongSell => "Sell before decline",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        }
    }
}

impl Display for Confidence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Anything with a period and a final score can be classified.
pub trait Scored {
    fn period(&self) -> &Period;
    fn score(&self) -> f64;
}

impl Scored for (Period, f64) {
    fn period(&self) -> &Period {
        &self.0
    }

    fn score(&self) -> f64 {
        self.1
    }
}

/// Signal derived from one adjacent pair of periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub current_index: usize,
    pub next_index: usize,
    pub current_start: NaiveDate,
    pub current_end: NaiveDate,
    pub next_start: NaiveDate,
    pub action: Action,
    pub confidence: Confidence,
    pub current_score: f64,
    pub next_score: f64,
    /// `next - current`, two decimals.
    pub score_change: f64,
    /// Lords of the current period, e.g. "Jupiter-Saturn".
    pub lords: String,
    /// "MD", "MD-AD" or "MD-AD-PD".
    pub level_combo: String,
    /// Theme of the current period's innermost lord.
    pub theme: String,
    /// Short selection tag, e.g. "Score improving 3.0 points from low base".
    pub selection: String,
    pub rationale: String,
}

struct Verdict {
    action: Action,
    confidence: Confidence,
    selection: String,
    rule: String,
}

/// Slack for float noise in differences of two-decimal scores.
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Apply the rule ladder to the raw change `delta`.
fn classify(current: f64, delta: f64, t: &TransitionThresholds) -> Option<Verdict> {
    let high_if = |cond: bool| if cond { Confidence::High } else { Confidence::Medium };
    let rises = |change: f64| delta >= change - THRESHOLD_EPSILON;
    let falls = |change: f64| delta <= -change + THRESHOLD_EPSILON;

    if rises(t.strong_buy_change) && current <= t.strong_buy_max_score {
        Some(Verdict {
            action: Action::StrongBuy,
            confidence: high_if(rises(t.high_confidence_change)),
            selection: format!("Score improving {delta:.1} points from low base"),
            rule: format!(
                "change >= {:.1} from a score <= {:.1}",
                t.strong_buy_change, t.strong_buy_max_score
            ),
        })
    } else if rises(t.buy_change) && current <= t.buy_max_score {
        Some(Verdict {
            action: Action::Buy,
            confidence: Confidence::Medium,
            selection: format!("Score improving {delta:.1} points"),
            rule: format!(
                "change >= {:.1} from a score <= {:.1}",
                t.buy_change, t.buy_max_score
            ),
        })
    } else if falls(t.strong_sell_change) && current >= t.strong_sell_min_score {
        Some(Verdict {
            action: Action::StrongSell,
            confidence: high_if(falls(t.high_confidence_change)),
            selection: format!("Score declining {delta:.1} points from high base"),
            rule: format!(
                "change <= -{:.1} from a score >= {:.1}",
                t.strong_sell_change, t.strong_sell_min_score
            ),
        })
    } else if falls(t.sell_change) && current >= t.sell_min_score {
        Some(Verdict {
            action: Action::Sell,
            confidence: Confidence::Medium,
            selection: format!("Score declining {delta:.1} points"),
            rule: format!(
                "change <= -{:.1} from a score >= {:.1}",
                t.sell_change, t.sell_min_score
            ),
        })
    } else if delta.abs() <= t.hold_band + THRESHOLD_EPSILON {
        Some(Verdict {
            action: Action::Hold,
            confidence: Confidence::Medium,
            selection: format!("Stable score (change: {delta:.1})"),
            rule: format!("|change| <= {:.1}", t.hold_band),
        })
    } else {
        None
    }
}

/// Classify every adjacent pair after a stable sort by start date.
///
/// Pairs whose change falls between the rule bands produce nothing.
pub fn classify_transitions<S: Scored>(items: &[S], thresholds: &TransitionThresholds) -> Vec<Opportunity> {
    let mut order: Vec<&S> = items.iter().collect();
    order.sort_by_key(|s| s.period().start);

    order
        .windows(2)
        .filter_map(|pair| {
            let (cur, next) = (pair[0], pair[1]);
            let (current_score, next_score) = (cur.score(), next.score());
            let verdict = classify(current_score, next_score - current_score, thresholds)?;
            let delta = round2(next_score - current_score);
            let period = cur.period();
            let lords = period.label();
            Some(Opportunity {
                current_index: period.index,
                next_index: next.period().index,
                current_start: period.start,
                current_end: period.end,
                next_start: next.period().start,
                action: verdict.action,
                confidence: verdict.confidence,
                current_score,
                next_score,
                score_change: delta,
                rationale: format!(
                    "{}: {lords} moves {current_score:.2} → {next_score:.2} ({delta:+.2}; {})",
                    verdict.action.strategy(),
                    verdict.rule
                ),
                lords,
                level_combo: period.level().combo_label().to_string(),
                theme: period.theme().to_string(),
                selection: verdict.selection,
            })
        })
        .collect()
}
