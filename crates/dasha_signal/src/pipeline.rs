//! Batch scoring of one entity's period timeline.
//!
//! For every requested house system:
//! 1. resolve the reference longitude (failure drops only that system);
//! 2. score every valid period at its onset, optionally on the rayon pool;
//! 3. classify transitions between consecutive scored periods.
//!
//! Onset positions are fetched once per distinct instant and shared by all
//! house systems.

use dasha_vedic_base::ChartPositions;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::combine::{
    ChartScores, CombinedRating, combine, dashamsha_effect, navamsha_effect, triple_effect,
};
use crate::config::ScoringConfig;
use crate::divisional::{DivisionalScore, dashamsha_score, navamsha_score};
use crate::ephemeris::{Ephemeris, PositionMemo};
use crate::error::{SignalError, SignalResult};
use crate::house::{HouseReference, HouseSystem, first_period_lord, reference_longitude};
use crate::period::{EntityNatal, Period, PeriodRecord, parse_periods};
use crate::scorer::{LordAnalysis, ScoringContext, score_period};
use crate::transition::{Opportunity, Scored, classify_transitions};

/// A period with its final score and the factors behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPeriod {
    pub period: Period,
    /// Final 1-10 score after chart combination.
    pub auspiciousness: f64,
    pub d1_score: f64,
    /// Level-weighted dignity strength.
    pub dignity_strength: f64,
    pub protection_count: usize,
    pub is_protected: bool,
    pub protection_reasons: Vec<String>,
    pub sun_strength: f64,
    pub moon_strength: f64,
    pub luminaries_support: f64,
    pub navamsha: Option<DivisionalScore>,
    pub dashamsha: Option<DivisionalScore>,
    pub combined: CombinedRating,
    /// Short divisional effect tags.
    pub effects: Vec<String>,
    /// Per-lord breakdown, outermost first.
    pub lords: Vec<LordAnalysis>,
}

impl Scored for ScoredPeriod {
    fn period(&self) -> &Period {
        &self.period
    }

    fn score(&self) -> f64 {
        self.auspiciousness
    }
}

/// Results for one house system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemReport {
    pub system: HouseSystem,
    pub reference: HouseReference,
    /// Valid periods in input order.
    pub periods: Vec<ScoredPeriod>,
    /// Chronological.
    pub opportunities: Vec<Opportunity>,
    /// Recovered problems (missing positions).
    pub diagnostics: Vec<SignalError>,
}

impl SystemReport {
    pub fn buys(&self) -> impl Iterator<Item = &Opportunity> {
        self.opportunities.iter().filter(|o| o.action.is_buy())
    }

    pub fn sells(&self) -> impl Iterator<Item = &Opportunity> {
        self.opportunities.iter().filter(|o| o.action.is_sell())
    }
}

/// Results for every requested house system of one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityReport {
    pub entity: String,
    pub systems: Vec<SystemReport>,
    /// House systems whose reference could not be resolved.
    pub failed_systems: Vec<SignalError>,
    /// Period records that were skipped.
    pub skipped_periods: Vec<SignalError>,
}

impl EntityReport {
    pub fn system(&self, system: HouseSystem) -> Option<&SystemReport> {
        self.systems.iter().find(|r| r.system == system)
    }
}

fn divisional_scores(
    period: &Period,
    natal: &EntityNatal,
    config: &ScoringConfig,
    diagnostics: &mut Vec<SignalError>,
) -> (Option<DivisionalScore>, Option<DivisionalScore>) {
    let lord = period.outer_lord();
    let mut note_missing = |score: &DivisionalScore| {
        if score.position.is_none() {
            let diag = SignalError::MissingPosition {
                date: natal.birth,
                graha: lord,
                period: period.index,
            };
            if !diagnostics.contains(&diag) {
                diagnostics.push(diag);
            }
        }
    };
    let d9 = config.divisional.navamsha.then(|| {
        let s = navamsha_score(lord, &natal.positions, config);
        note_missing(&s);
        s
    });
    let d10 = config.divisional.dashamsha.then(|| {
        let s = dashamsha_score(lord, &natal.positions, config);
        note_missing(&s);
        s
    });
    (d9, d10)
}

fn effect_tags(
    scores: &ChartScores,
    combined: &CombinedRating,
    dashamsha: Option<&DivisionalScore>,
) -> Vec<String> {
    let mut effects = Vec::new();
    if let Some(d9) = scores.d9 {
        effects.push(navamsha_effect(scores.d1, d9, combined.rating));
    }
    if let (Some(d10), Some(ds)) = (scores.d10, dashamsha) {
        effects.push(dashamsha_effect(scores.d1, d10, ds.deity(), ds.is_vargottama()));
    }
    if let (Some(d9), Some(d10)) = (scores.d9, scores.d10) {
        effects.push(triple_effect(scores.d1, d9, d10, combined.rating));
    }
    effects
}

/// Score one period against one reference.
pub fn score_one(
    period: &Period,
    natal: &EntityNatal,
    onset_positions: &ChartPositions,
    reference: f64,
    config: &ScoringConfig,
) -> (ScoredPeriod, Vec<SignalError>) {
    let ctx = ScoringContext {
        natal,
        onset_positions,
        reference,
        config,
    };
    let (score, mut diagnostics) = score_period(period, &ctx);
    let (navamsha, dashamsha) = divisional_scores(period, natal, config, &mut diagnostics);

    let scores = ChartScores {
        d1: score.d1_score,
        d9: navamsha.as_ref().map(|s| s.score),
        d10: dashamsha.as_ref().map(|s| s.score),
    };
    let combined = combine(&scores, config);
    let effects = effect_tags(&scores, &combined, dashamsha.as_ref());

    let (protection_count, is_protected, protection_reasons) = score
        .protection()
        .map(|p| (p.count(), p.is_protected, p.reasons.clone()))
        .unwrap_or_default();
    let (sun_strength, moon_strength, luminaries_support) = score
        .luminaries()
        .map(|l| (l.sun_strength, l.moon_strength, l.support))
        .unwrap_or_default();

    let scored = ScoredPeriod {
        period: period.clone(),
        auspiciousness: combined.score,
        d1_score: score.d1_score,
        dignity_strength: score.dignity_strength,
        protection_count,
        is_protected,
        protection_reasons,
        sun_strength,
        moon_strength,
        luminaries_support,
        navamsha,
        dashamsha,
        combined,
        effects,
        lords: score.lords,
    };
    (scored, diagnostics)
}

fn resolve_reference(
    system: HouseSystem,
    periods: &[Period],
    natal: &EntityNatal,
    config: &ScoringConfig,
) -> SignalResult<HouseReference> {
    match system {
        HouseSystem::FirstPeriodLord => {
            let lord = first_period_lord(periods, &natal.positions, config.first_lord)?;
            reference_longitude(system, &natal.positions, Some(lord))
        }
        _ => reference_longitude(system, &natal.positions, None),
    }
}

/// Score all periods for one house system.
pub fn score_system(
    system: HouseSystem,
    periods: &[Period],
    natal: &EntityNatal,
    memo: &PositionMemo,
    config: &ScoringConfig,
) -> SignalResult<SystemReport> {
    let reference = resolve_reference(system, periods, natal, config)?;
    debug!(
        system = system.key(),
        reference = reference.longitude,
        rashi = reference.rashi.name(),
        "resolved house reference"
    );

    let empty = ChartPositions::new();
    let score = |period: &Period| {
        let onset = natal.onset_instant(period.start);
        let positions = memo.get(&onset).unwrap_or(&empty);
        score_one(period, natal, positions, reference.longitude, config)
    };
    let results: Vec<(ScoredPeriod, Vec<SignalError>)> = if config.parallel {
        periods.par_iter().map(score).collect()
    } else {
        periods.iter().map(score).collect()
    };

    let mut scored = Vec::with_capacity(results.len());
    let mut diagnostics = Vec::new();
    for (period, diags) in results {
        for d in &diags {
            warn!(system = system.key(), error = %d, "recovered with neutral score");
        }
        diagnostics.extend(diags);
        scored.push(period);
    }

    let opportunities = classify_transitions(&scored, &config.transitions);
    info!(
        system = system.key(),
        periods = scored.len(),
        opportunities = opportunities.len(),
        diagnostics = diagnostics.len(),
        "house system scored"
    );

    Ok(SystemReport {
        system,
        reference,
        periods: scored,
        opportunities,
        diagnostics,
    })
}

/// Score an entity's timeline for every configured house system.
///
/// Fails only on invalid configuration. Malformed periods are skipped and an
/// unresolvable reference drops that house system; both are reported.
pub fn score_entity<E>(
    natal: &EntityNatal,
    records: &[PeriodRecord],
    ephemeris: &E,
    config: &ScoringConfig,
) -> SignalResult<EntityReport>
where
    E: Ephemeris + ?Sized,
{
    config.validate()?;
    info!(
        entity = %natal.name,
        records = records.len(),
        systems = config.house_systems.len(),
        "scoring entity"
    );

    let (periods, skipped_periods) = parse_periods(records);
    let memo = PositionMemo::prefetch(
        ephemeris,
        periods.iter().map(|p| natal.onset_instant(p.start)),
        config.parallel,
    );

    let mut systems = Vec::with_capacity(config.house_systems.len());
    let mut failed_systems = Vec::new();
    for &system in &config.house_systems {
        match score_system(system, &periods, natal, &memo, config) {
            Ok(report) => systems.push(report),
            Err(e) => {
                warn!(system = system.key(), error = %e, "skipping house system");
                failed_systems.push(e);
            }
        }
    }

    Ok(EntityReport {
        entity: natal.name.clone(),
        systems,
        failed_systems,
        skipped_periods,
    })
}
