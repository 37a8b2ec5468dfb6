//! Period auspiciousness scoring on the D1 chart.
//!
//! A lord is scored from five factors evaluated at the period's onset:
//! dignity strength (counted twice), protection, luminary support and the
//! lord's natural benefic/malefic nature. Multi-lord periods weight each
//! lord's score by depth.

use chrono::NaiveDateTime;
use dasha_vedic_base::{
    ChartPositions, DignityResult, Graha, RelationshipContext, evaluate_dignity_with, round2,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::error::SignalError;
use crate::period::{EntityNatal, Period};
use crate::protection::{ProtectionResult, analyze_protection};
use crate::weighted::weighted_zip;

/// Categorical tag for a luminary's onset strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LuminaryQuality {
    Strong,
    Moderate,
    Weak,
}

impl LuminaryQuality {
    pub fn from_strength(strength: f64) -> Self {
        if strength >= 7.0 {
            Self::Strong
        } else if strength >= 5.0 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        }
    }
}

/// Sun and Moon onset strengths and their combined support.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuminarySupport {
    pub sun_strength: f64,
    pub moon_strength: f64,
    pub sun_quality: LuminaryQuality,
    pub moon_quality: LuminaryQuality,
    /// `min(1, (sun + moon) / 20)`.
    pub support: f64,
}

/// Score of a single lord at one onset instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LordAnalysis {
    pub lord: Graha,
    pub onset: NaiveDateTime,
    pub dignity: DignityResult,
    /// Dignity was taken from the natal chart because the period was
    /// already running at birth.
    pub birth_corrected: bool,
    pub protection: ProtectionResult,
    pub luminaries: LuminarySupport,
    pub base_nature: f64,
    /// 1-10, two decimals.
    pub score: f64,
}

/// Composite D1 score of one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodScore {
    /// Level-weighted lord scores, 1-10, two decimals.
    pub d1_score: f64,
    /// Level-weighted dignity strength.
    pub dignity_strength: f64,
    /// Outermost first.
    pub lords: Vec<LordAnalysis>,
}

impl PeriodScore {
    /// Analysis of the innermost lord, which supplies protection and
    /// luminary fields.
    pub fn innermost(&self) -> Option<&LordAnalysis> {
        self.lords.last()
    }

    pub fn protection(&self) -> Option<&ProtectionResult> {
        self.innermost().map(|a| &a.protection)
    }

    pub fn luminaries(&self) -> Option<&LuminarySupport> {
        self.innermost().map(|a| &a.luminaries)
    }
}

/// Everything a lord score depends on besides the lord itself.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub natal: &'a EntityNatal,
    /// Positions at the onset instant.
    pub onset_positions: &'a ChartPositions,
    /// House-system reference longitude.
    pub reference: f64,
    pub config: &'a ScoringConfig,
}

fn onset_strength(
    graha: Graha,
    positions: &ChartPositions,
    context: Option<&RelationshipContext<'_>>,
    config: &ScoringConfig,
) -> Option<DignityResult> {
    let rashi = positions.rashi(graha)?;
    Some(evaluate_dignity_with(graha, rashi, true, context, &config.onset))
}

/// Sun and Moon strengths at onset, without relationship context.
///
/// A missing luminary is scored neutral and reported.
pub fn analyze_luminaries(
    positions: &ChartPositions,
    config: &ScoringConfig,
    onset: NaiveDateTime,
    period: usize,
    diagnostics: &mut Vec<SignalError>,
) -> LuminarySupport {
    let mut strength = |graha: Graha| {
        onset_strength(graha, positions, None, config).map_or_else(
            || {
                diagnostics.push(SignalError::MissingPosition {
                    date: onset,
                    graha,
                    period,
                });
                DignityResult::neutral_default().strength
            },
            |d| d.strength,
        )
    };
    let sun_strength = strength(Graha::Surya);
    let moon_strength = strength(Graha::Chandra);
    LuminarySupport {
        sun_strength,
        moon_strength,
        sun_quality: LuminaryQuality::from_strength(sun_strength),
        moon_quality: LuminaryQuality::from_strength(moon_strength),
        support: ((sun_strength + moon_strength) / 20.0).min(1.0),
    }
}

/// Combine the five factors into a 1-10 score.
pub fn final_score(
    dignity_strength: f64,
    protection: f64,
    luminaries: f64,
    base_nature: f64,
    config: &ScoringConfig,
) -> f64 {
    let w = &config.factors;
    let normalized = dignity_strength / 10.0;
    let composite = w.lord_strength * normalized
        + w.protection * protection
        + w.luminaries * luminaries
        + w.base_nature * base_nature
        + w.planetary_dignity * normalized;
    round2(1.0 + 9.0 * composite)
}

/// Score `lord` for `period`, returning recoverable diagnostics alongside.
///
/// When the period was already running at birth, the lord's sign and the
/// relationship context come from the natal chart instead of the onset
/// snapshot; a lord absent from the natal chart falls back to the onset
/// snapshot. Protection and luminaries always use the onset snapshot.
pub fn score_lord(
    lord: Graha,
    period: &Period,
    ctx: &ScoringContext<'_>,
) -> (LordAnalysis, Vec<SignalError>) {
    let mut diagnostics = Vec::new();
    let onset = ctx.natal.onset_instant(period.start);
    let dignity_in = |positions: &ChartPositions| {
        let rel = RelationshipContext {
            positions,
            reference: ctx.reference,
        };
        onset_strength(lord, positions, Some(&rel), ctx.config)
    };

    // Natal chart first when the period was running at birth, then the
    // onset snapshot.
    let natal_dignity = if ctx.natal.was_running_at_birth(period.start) {
        dignity_in(&ctx.natal.positions)
    } else {
        None
    };
    let birth_corrected = natal_dignity.is_some();
    let dignity = natal_dignity
        .or_else(|| dignity_in(ctx.onset_positions))
        .unwrap_or_else(|| {
            diagnostics.push(SignalError::MissingPosition {
                date: onset,
                graha: lord,
                period: period.index,
            });
            DignityResult::neutral_default()
        });

    let protection = analyze_protection(
        lord,
        ctx.onset_positions,
        ctx.reference,
        &ctx.config.protection,
        &ctx.config.onset,
    );
    let luminaries = analyze_luminaries(
        ctx.onset_positions,
        ctx.config,
        onset,
        period.index,
        &mut diagnostics,
    );
    let base_nature = if lord.is_natural_benefic() {
        ctx.config.base_nature.benefic
    } else {
        ctx.config.base_nature.malefic
    };
    let score = final_score(
        dignity.strength,
        protection.score,
        luminaries.support,
        base_nature,
        ctx.config,
    );

    debug!(
        period = period.index,
        lord = lord.name(),
        dignity = dignity.dignity.name(),
        strength = dignity.strength,
        protection = protection.count(),
        birth_corrected,
        score,
        "scored lord"
    );

    let analysis = LordAnalysis {
        lord,
        onset,
        dignity,
        birth_corrected,
        protection,
        luminaries,
        base_nature,
        score,
    };
    (analysis, diagnostics)
}

/// Score every lord of `period` at its start and combine by level weight.
pub fn score_period(period: &Period, ctx: &ScoringContext<'_>) -> (PeriodScore, Vec<SignalError>) {
    let mut diagnostics = Vec::new();
    let lords: Vec<LordAnalysis> = period
        .lords()
        .iter()
        .map(|&lord| {
            let (analysis, diags) = score_lord(lord, period, ctx);
            diagnostics.extend(diags);
            analysis
        })
        .collect();

    let weights = ctx.config.levels.for_depth(lords.len());
    let scores: Vec<f64> = lords.iter().map(|a| a.score).collect();
    let strengths: Vec<f64> = lords.iter().map(|a| a.dignity.strength).collect();
    let neutral = DignityResult::neutral_default().strength;
    let d1_score = weighted_zip(&scores, weights)
        .map(round2)
        .or_else(|| scores.first().copied())
        .unwrap_or_else(|| final_score(neutral, 0.0, 0.5, 0.0, ctx.config));
    let dignity_strength = weighted_zip(&strengths, weights)
        .or_else(|| strengths.first().copied())
        .unwrap_or(neutral);

    // Luminary misses repeat once per lord at the same instant.
    let mut unique: Vec<SignalError> = Vec::with_capacity(diagnostics.len());
    for diag in diagnostics {
        if !unique.contains(&diag) {
            unique.push(diag);
        }
    }

    (
        PeriodScore {
            d1_score,
            dignity_strength,
            lords,
        },
        unique,
    )
}
