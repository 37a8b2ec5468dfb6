//! Period records, validated periods and timeline lookups.
//!
//! A [`PeriodRecord`] is what the external period-construction layer hands
//! over: dates plus one to three lord names. [`Period`] is the validated,
//! typed form the scorer works on.

use chrono::{NaiveDate, NaiveDateTime};
use dasha_vedic_base::{ChartPositions, DashaLevel, Graha, MAX_DASHA_DEPTH};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SignalError, SignalResult};

/// Raw period as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Governing lord names, outermost first.
    pub lords: Vec<String>,
    /// Declared level; inferred from the number of lords when absent.
    #[serde(default)]
    pub level: Option<DashaLevel>,
}

impl PeriodRecord {
    pub fn new(start: NaiveDate, end: NaiveDate, lords: &[&str]) -> Self {
        Self {
            start,
            end,
            lords: lords.iter().map(|s| s.to_string()).collect(),
            level: None,
        }
    }

    pub fn with_level(mut self, level: DashaLevel) -> Self {
        self.level = Some(level);
        self
    }
}

/// A validated period with 1-3 governing grahas.
///
/// Lords and level are only set through validation, so every `Period`
/// has at least one lord and a level matching its depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PeriodFields")]
pub struct Period {
    /// Position in the caller's input list.
    pub index: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    lords: Vec<Graha>,
    level: DashaLevel,
}

/// Unchecked serialized shape of a [`Period`].
#[derive(Deserialize)]
struct PeriodFields {
    index: usize,
    start: NaiveDate,
    end: NaiveDate,
    lords: Vec<Graha>,
    level: DashaLevel,
}

impl TryFrom<PeriodFields> for Period {
    type Error = SignalError;

    fn try_from(fields: PeriodFields) -> SignalResult<Self> {
        let record = PeriodRecord {
            start: fields.start,
            end: fields.end,
            lords: fields.lords.iter().map(|g| g.english_name().to_string()).collect(),
            level: Some(fields.level),
        };
        Self::try_from_record(fields.index, &record)
    }
}

impl Period {
    /// Validate a record. Fails with `MalformedPeriod` when a lord is
    /// missing for the declared level, a name is unknown, or the dates are
    /// reversed.
    pub fn try_from_record(index: usize, record: &PeriodRecord) -> SignalResult<Self> {
        let malformed = |reason: String| SignalError::MalformedPeriod {
            index,
            start: record.start,
            reason,
        };

        if record.lords.is_empty() {
            return Err(malformed("no governing planet".into()));
        }
        if record.lords.len() > MAX_DASHA_DEPTH {
            return Err(malformed(format!(
                "{} governing planets (at most {MAX_DASHA_DEPTH})",
                record.lords.len()
            )));
        }
        if let Some(level) = record.level {
            if level.depth() != record.lords.len() {
                return Err(malformed(format!(
                    "{} needs {} governing planets, found {}",
                    level.name(),
                    level.depth(),
                    record.lords.len()
                )));
            }
        }
        if record.end < record.start {
            return Err(malformed(format!("ends {} before it starts", record.end)));
        }

        let lords = record
            .lords
            .iter()
            .map(|name| name.parse::<Graha>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| malformed(e.to_string()))?;
        let level = DashaLevel::from_depth(lords.len()).map_err(|e| malformed(e.to_string()))?;

        Ok(Self {
            index,
            start: record.start,
            end: record.end,
            lords,
            level,
        })
    }

    /// Governing grahas, outermost first. Never empty.
    pub fn lords(&self) -> &[Graha] {
        &self.lords
    }

    pub fn level(&self) -> DashaLevel {
        self.level
    }

    pub fn outer_lord(&self) -> Graha {
        self.lords[0]
    }

    pub fn inner_lord(&self) -> Graha {
        self.lords[self.lords.len() - 1]
    }

    /// Lords joined with '-', e.g. "Jupiter-Saturn".
    pub fn label(&self) -> String {
        self.lords
            .iter()
            .map(|g| g.english_name())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Theme of the innermost lord.
    pub fn theme(&self) -> &'static str {
        self.inner_lord().theme()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Validate every record, keeping the valid ones in input order.
///
/// Malformed records are returned as diagnostics instead of aborting.
pub fn parse_periods(records: &[PeriodRecord]) -> (Vec<Period>, Vec<SignalError>) {
    let mut periods = Vec::with_capacity(records.len());
    let mut diagnostics = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match Period::try_from_record(index, record) {
            Ok(p) => periods.push(p),
            Err(e) => {
                warn!(index, error = %e, "skipping period");
                diagnostics.push(e);
            }
        }
    }
    (periods, diagnostics)
}

/// The entity's own natal snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityNatal {
    pub name: String,
    /// Incorporation/listing instant (local civil time).
    pub birth: NaiveDateTime,
    pub positions: ChartPositions,
}

impl EntityNatal {
    pub fn new(name: impl Into<String>, birth: NaiveDateTime, positions: ChartPositions) -> Self {
        Self {
            name: name.into(),
            birth,
            positions,
        }
    }

    /// Onset instant of a period: its start date at the birth time of day.
    pub fn onset_instant(&self, start: NaiveDate) -> NaiveDateTime {
        start.and_time(self.birth.time())
    }

    /// True when a period starting on `start` was already running at birth.
    pub fn was_running_at_birth(&self, start: NaiveDate) -> bool {
        self.onset_instant(start) <= self.birth
    }
}

// ---------------------------------------------------------------------------
// Timeline lookups
// ---------------------------------------------------------------------------

/// Deepest period active on `date` (ties go to the later entry).
pub fn active_period_at(periods: &[Period], date: NaiveDate) -> Option<&Period> {
    periods
        .iter()
        .filter(|p| p.contains(date))
        .max_by_key(|p| (p.level, p.start))
}

/// Outermost lord active on `date`.
pub fn active_lord_at(periods: &[Period], date: NaiveDate) -> Option<Graha> {
    periods
        .iter()
        .find(|p| p.level == DashaLevel::Mahadasha && p.contains(date))
        .or_else(|| periods.iter().find(|p| p.contains(date)))
        .map(Period::outer_lord)
}

/// Position of a period relative to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineStatus {
    Elapsed,
    Current,
    Future,
}

pub fn timeline_status(period: &Period, date: NaiveDate) -> TimelineStatus {
    if period.end < date {
        TimelineStatus::Elapsed
    } else if period.start > date {
        TimelineStatus::Future
    } else {
        TimelineStatus::Current
    }
}

/// Counts of elapsed/current/future periods and any gap around the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub date: NaiveDate,
    pub elapsed: usize,
    pub current: usize,
    pub future: usize,
    /// (last elapsed end, first future start) when no period is current
    /// and the two do not touch.
    pub gap: Option<(NaiveDate, NaiveDate)>,
}

impl TimelineSummary {
    pub fn gap_days(&self) -> Option<i64> {
        self.gap.map(|(from, to)| (to - from).num_days())
    }
}

pub fn timeline_summary(periods: &[Period], date: NaiveDate) -> TimelineSummary {
    let mut summary = TimelineSummary {
        date,
        elapsed: 0,
        current: 0,
        future: 0,
        gap: None,
    };
    let mut last_end: Option<NaiveDate> = None;
    let mut first_start: Option<NaiveDate> = None;
    for p in periods {
        match timeline_status(p, date) {
            TimelineStatus::Elapsed => {
                summary.elapsed += 1;
                last_end = last_end.max(Some(p.end));
            }
            TimelineStatus::Current => summary.current += 1,
            TimelineStatus::Future => {
                summary.future += 1;
                first_start = Some(first_start.map_or(p.start, |s| s.min(p.start)));
            }
        }
    }
    if summary.current == 0 {
        if let (Some(from), Some(to)) = (last_end, first_start) {
            if (to - from).num_days() > 0 {
                summary.gap = Some((from, to));
            }
        }
    }
    summary
}
