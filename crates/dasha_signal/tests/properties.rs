//! Property tests for protection, chart combination and transitions.

use chrono::NaiveDate;
use proptest::prelude::*;

use dasha_signal::{
    Action, ChartScores, ChartWeights, Period, PeriodRecord, ProtectionConfig, ScoringConfig,
    TransitionThresholds, analyze_protection, classify_transitions, combine_charts, final_score,
};
use dasha_vedic_base::{ALL_GRAHAS, ChartPositions, OnsetEnhancement, round2};

fn chart() -> impl Strategy<Value = ChartPositions> {
    (
        prop::array::uniform9(prop::option::of(0.0f64..360.0)),
        0.0f64..360.0,
    )
        .prop_map(|(lons, lagna)| {
            let mut chart = ChartPositions::new().with_lagna(lagna);
            for (graha, lon) in ALL_GRAHAS.into_iter().zip(lons) {
                if let Some(lon) = lon {
                    chart.set(graha, lon);
                }
            }
            chart
        })
}

fn score() -> impl Strategy<Value = f64> {
    (100u32..=1000).prop_map(|x| x as f64 / 100.0)
}

fn series(scores: &[f64]) -> Vec<(Period, f64)> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let start = NaiveDate::from_ymd_opt(1950 + i as i32, 1, 1).unwrap();
            let r = PeriodRecord::new(start, start, &["Mercury"]);
            (Period::try_from_record(i, &r).unwrap(), s)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: protection score is step × reasons capped at 1, and protected iff any reason.
    #[test]
    fn property_protection_capped(positions in chart(), lord in 0usize..9, reference in 0.0f64..360.0) {
        let cfg = ProtectionConfig::default();
        let r = analyze_protection(ALL_GRAHAS[lord], &positions, reference, &cfg, &OnsetEnhancement::default());
        prop_assert!(r.score >= 0.0 && r.score <= 1.0);
        prop_assert!((r.score - (cfg.step * r.count() as f64).min(1.0)).abs() < 1e-12);
        prop_assert_eq!(r.is_protected, r.count() > 0);
    }

    /// PROPERTY: a larger protection step never lowers the protection score.
    #[test]
    fn property_protection_monotone_in_step(positions in chart(), lord in 0usize..9, step in 0.05f64..0.5) {
        let low = ProtectionConfig { step, ..ProtectionConfig::default() };
        let high = ProtectionConfig { step: step * 2.0, ..ProtectionConfig::default() };
        let g = ALL_GRAHAS[lord];
        let a = analyze_protection(g, &positions, 0.0, &low, &OnsetEnhancement::default());
        let b = analyze_protection(g, &positions, 0.0, &high, &OnsetEnhancement::default());
        prop_assert_eq!(a.count(), b.count());
        prop_assert!(b.score >= a.score);
    }

    /// PROPERTY: D1-only combination returns D1 exactly.
    #[test]
    fn property_d1_only_exact(d1 in score()) {
        prop_assert_eq!(combine_charts(&ChartScores::d1_only(d1), &ChartWeights::default()), d1);
    }

    /// PROPERTY: the combined score lies on the 1-10 scale between the chart extremes.
    #[test]
    fn property_combined_bounded(d1 in score(), d9 in 0.0f64..=10.0, d10 in 0.0f64..=10.0) {
        let s = ChartScores { d1, d9: Some(d9), d10: Some(d10) };
        let v = combine_charts(&s, &ChartWeights::default());
        let lo = d1.min(d9).min(d10).max(1.0);
        let hi = d1.max(d9).max(d10);
        prop_assert!(v >= lo - 0.005 && v <= hi + 0.005);
    }

    /// PROPERTY: final scores stay in [1, 10] for factor inputs in range.
    #[test]
    fn property_final_score_bounded(
        d in 0.0f64..=10.0,
        p in 0.0f64..=1.0,
        l in 0.0f64..=1.0,
        benefic in any::<bool>(),
    ) {
        let b = if benefic { 1.0 } else { 0.3 };
        let s = final_score(d, p, l, b, &ScoringConfig::default());
        prop_assert!((1.0..=10.0).contains(&s));
        prop_assert_eq!(s, round2(s));
    }

    /// PROPERTY: each emitted opportunity satisfies its rule's thresholds.
    #[test]
    fn property_transition_rules_hold(scores in prop::collection::vec(score(), 0..12)) {
        let t = TransitionThresholds::default();
        let ops = classify_transitions(&series(&scores), &t);
        prop_assert!(ops.len() <= scores.len().saturating_sub(1));
        for o in &ops {
            let delta = o.score_change;
            match o.action {
                Action::StrongBuy => prop_assert!(delta >= t.strong_buy_change && o.current_score <= t.strong_buy_max_score),
                Action::Buy => prop_assert!(delta >= t.buy_change && o.current_score <= t.buy_max_score),
                Action::StrongSell => prop_assert!(delta <= -t.strong_sell_change && o.current_score >= t.strong_sell_min_score),
                Action::Sell => prop_assert!(delta <= -t.sell_change && o.current_score >= t.sell_min_score),
                Action::Hold => prop_assert!(delta.abs() <= t.hold_band),
            }
            prop_assert_eq!(o.next_index, o.current_index + 1);
        }
    }
}
