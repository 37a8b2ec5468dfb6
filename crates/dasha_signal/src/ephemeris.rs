//! Ephemeris collaborator seam and per-batch position memo.
//!
//! Raw planetary longitudes are computed outside this crate. The scorer
//! only needs a snapshot of sidereal positions at a given civil instant.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDateTime;
use dasha_vedic_base::ChartPositions;
use rayon::prelude::*;
use tracing::debug;

/// Source of sidereal positions at an instant.
///
/// Implementations may return incomplete snapshots; missing grahas are
/// recovered downstream.
pub trait Ephemeris: Sync {
    fn positions_at(&self, instant: NaiveDateTime) -> ChartPositions;
}

impl<F> Ephemeris for F
where
    F: Fn(NaiveDateTime) -> ChartPositions + Sync,
{
    fn positions_at(&self, instant: NaiveDateTime) -> ChartPositions {
        self(instant)
    }
}

/// Precomputed snapshots keyed by instant.
///
/// Lookups at an unknown instant return the latest snapshot at or before
/// it, or an empty chart if there is none.
#[derive(Debug, Clone, Default)]
pub struct TableEphemeris {
    entries: BTreeMap<NaiveDateTime, ChartPositions>,
}

impl TableEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instant: NaiveDateTime, positions: ChartPositions) {
        self.entries.insert(instant, positions);
    }

    pub fn with(mut self, instant: NaiveDateTime, positions: ChartPositions) -> Self {
        self.insert(instant, positions);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Ephemeris for TableEphemeris {
    fn positions_at(&self, instant: NaiveDateTime) -> ChartPositions {
        self.entries
            .range(..=instant)
            .next_back()
            .map(|(_, p)| p.clone())
            .unwrap_or_default()
    }
}

/// Positions fetched once per distinct instant for one batch.
#[derive(Debug, Clone, Default)]
pub struct PositionMemo {
    snapshots: HashMap<NaiveDateTime, ChartPositions>,
}

impl PositionMemo {
    /// Query `ephemeris` once for every distinct instant.
    pub fn prefetch<E, I>(ephemeris: &E, instants: I, parallel: bool) -> Self
    where
        E: Ephemeris + ?Sized,
        I: IntoIterator<Item = NaiveDateTime>,
    {
        let distinct: Vec<NaiveDateTime> = instants
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        debug!(instants = distinct.len(), parallel, "prefetching positions");

        let snapshots = if parallel {
            distinct
                .par_iter()
                .map(|t| (*t, ephemeris.positions_at(*t)))
                .collect()
        } else {
            distinct
                .iter()
                .map(|t| (*t, ephemeris.positions_at(*t)))
                .collect()
        };
        Self { snapshots }
    }

    pub fn get(&self, instant: &NaiveDateTime) -> Option<&ChartPositions> {
        self.snapshots.get(instant)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dasha_vedic_base::Graha;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn t(y: i32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn closure_is_ephemeris() {
        let eph = |_: NaiveDateTime| ChartPositions::new().with_graha(Graha::Surya, 10.0);
        assert_eq!(eph.positions_at(t(2000)).longitude(Graha::Surya), Some(10.0));
    }

    #[test]
    fn table_uses_latest_preceding() {
        let table = TableEphemeris::new()
            .with(t(2000), ChartPositions::new().with_graha(Graha::Surya, 10.0))
            .with(t(2010), ChartPositions::new().with_graha(Graha::Surya, 20.0));
        assert_eq!(table.positions_at(t(2005)).longitude(Graha::Surya), Some(10.0));
        assert_eq!(table.positions_at(t(2010)).longitude(Graha::Surya), Some(20.0));
        assert!(table.positions_at(t(1990)).longitude(Graha::Surya).is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn memo_queries_each_instant_once() {
        let calls = AtomicUsize::new(0);
        let eph = |_: NaiveDateTime| {
            calls.fetch_add(1, Ordering::SeqCst);
            ChartPositions::new()
        };
        let memo = PositionMemo::prefetch(&eph, [t(2000), t(2001), t(2000), t(2001)], true);
        assert_eq!(memo.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(memo.get(&t(2000)).is_some());
        assert!(memo.get(&t(2002)).is_none());
    }
}
