//! Dasha auspiciousness scoring and transition signals.
//!
//! This crate provides:
//! - Period record validation and timeline lookups
//! - House reference resolution (Lagna, Arudha Lagna, Chandra Lagna, first period lord)
//! - Protection analysis and single-lord / multi-level period scoring
//! - D9 / D10 divisional scoring and weighted multi-chart combination
//! - Buy / hold / sell classification of score transitions
//! - A batch pipeline that scores one entity per house system
//!
//! Planetary positions come from an [`Ephemeris`] implementation supplied by
//! the caller.

pub mod combine;
pub mod config;
pub mod divisional;
pub mod ephemeris;
pub mod error;
pub mod house;
pub mod period;
pub mod pipeline;
pub mod protection;
pub mod scorer;
pub mod transition;
pub mod weighted;

pub use combine::{
    ChartScores, CombinedRating, Rating, combine, combine_charts, dashamsha_effect,
    navamsha_effect, triple_effect,
};
pub use config::{
    BaseNature, ChartSelection, ChartWeights, FactorWeights, LevelWeights, ProtectionConfig,
    RatingCutoffs, ResonanceBonus, ScoringConfig, TransitionThresholds,
};
pub use divisional::{
    DivisionalScore, NEUTRAL_DIVISIONAL_SCORE, dashamsha_score, divisional_score, navamsha_score,
};
pub use ephemeris::{Ephemeris, PositionMemo, TableEphemeris};
pub use error::{SignalError, SignalResult};
pub use house::{
    ALL_HOUSE_SYSTEMS, FirstLordSource, HouseReference, HouseSystem, first_period_lord,
    reference_longitude,
};
pub use period::{
    EntityNatal, Period, PeriodRecord, TimelineStatus, TimelineSummary, active_lord_at,
    active_period_at, parse_periods, timeline_status, timeline_summary,
};
pub use pipeline::{
    EntityReport, ScoredPeriod, SystemReport, score_entity, score_one, score_system,
};
pub use protection::{ProtectionResult, analyze_protection};
pub use scorer::{
    LordAnalysis, LuminaryQuality, LuminarySupport, PeriodScore, ScoringContext,
    analyze_luminaries, final_score, score_lord, score_period,
};
pub use transition::{Action, Confidence, Opportunity, Scored, classify_transitions};
pub use weighted::{Weighted, weighted_mean, weighted_zip};
