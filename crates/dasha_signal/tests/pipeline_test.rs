//! End-to-end scoring of a synthetic entity through the batch pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use dasha_signal::{
    Action, Confidence, EntityNatal, HouseSystem, PeriodRecord, ScoringConfig, SignalError,
    TableEphemeris, score_entity,
};
use dasha_vedic_base::{ChartPositions, Graha};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at_nine(d: NaiveDate) -> NaiveDateTime {
    d.and_hms_opt(9, 0, 0).unwrap()
}

/// Every graha debilitated; nothing protects.
fn afflicted() -> ChartPositions {
    // Sun Tula, Moon Vrischika, Mars Karka, Mercury Meena, Jupiter Makara,
    // Venus Kanya, Saturn Mesha, Rahu Vrischika, Ketu Vrishabha.
    ChartPositions::from_longitudes(
        [190.0, 220.0, 100.0, 340.0, 285.0, 160.0, 10.0, 230.0, 50.0],
        5.0,
    )
}

/// Sun, Moon and Jupiter exalted; Jupiter in a kendra from a Mesha lagna.
fn blessed() -> ChartPositions {
    afflicted()
        .with_graha(Graha::Surya, 10.0)
        .with_graha(Graha::Chandra, 40.0)
        .with_graha(Graha::Guru, 95.0)
}

/// Natal chart: Mesha lagna, Saturn exalted in Tula.
fn natal() -> EntityNatal {
    let positions = blessed().with_graha(Graha::Shani, 190.0);
    EntityNatal::new("ACME Corp", at_nine(date(2000, 1, 1)), positions)
}

fn timeline() -> Vec<PeriodRecord> {
    vec![
        PeriodRecord::new(date(2001, 1, 1), date(2005, 12, 31), &["Saturn"]),
        PeriodRecord::new(date(2006, 1, 1), date(2010, 12, 31), &["Jupiter"]),
        PeriodRecord::new(date(2011, 1, 1), date(2015, 12, 31), &["Saturn"]),
    ]
}

fn ephemeris() -> TableEphemeris {
    TableEphemeris::new()
        .with(at_nine(date(1995, 1, 1)), afflicted())
        .with(at_nine(date(2001, 1, 1)), afflicted())
        .with(at_nine(date(2006, 1, 1)), blessed())
        .with(at_nine(date(2011, 1, 1)), afflicted())
}

#[test]
fn surge_then_decline_signals() {
    init_tracing();
    let report = score_entity(&natal(), &timeline(), &ephemeris(), &ScoringConfig::default())
        .unwrap();
    let sys = report.system(HouseSystem::Lagna).unwrap();
    let scores: Vec<f64> = sys.periods.iter().map(|p| p.auspiciousness).collect();

    // 1 + 9 × 0.15 × 0.3
    assert!((scores[0] - 1.405).abs() < 0.006, "{scores:?}");
    // 1 + 9 × (0.4 + 0.25 × 0.6 + 0.2 + 0.15)
    assert!((scores[1] - 9.1).abs() < 1e-9, "{scores:?}");
    assert!((scores[2] - scores[0]).abs() < 1e-12);

    let signals: Vec<(Action, Confidence)> = sys
        .opportunities
        .iter()
        .map(|o| (o.action, o.confidence))
        .collect();
    assert_eq!(
        signals,
        vec![
            (Action::StrongBuy, Confidence::High),
            (Action::StrongSell, Confidence::High)
        ]
    );
    assert_eq!(sys.buys().count(), 1);
    assert_eq!(sys.sells().count(), 1);
    assert_eq!(sys.opportunities[0].lords, "Saturn");
    assert_eq!(sys.opportunities[1].theme, "Wisdom & Growth");
    assert!(sys.diagnostics.is_empty(), "{:?}", sys.diagnostics);
}

#[test]
fn protection_and_luminaries_reported() {
    let report = score_entity(&natal(), &timeline(), &ephemeris(), &ScoringConfig::default())
        .unwrap();
    let jupiter = &report.systems[0].periods[1];
    assert_eq!(jupiter.protection_count, 3);
    assert!(jupiter.is_protected);
    assert!((jupiter.luminaries_support - 1.0).abs() < 1e-12);
    assert!((jupiter.dignity_strength - 10.0).abs() < 1e-12);

    let saturn = &report.systems[0].periods[0];
    assert!(!saturn.is_protected);
    assert!(saturn.luminaries_support.abs() < 1e-12);
}

#[test]
fn period_running_at_birth_uses_natal_sign() {
    let mut records = timeline();
    records.insert(
        0,
        PeriodRecord::new(date(1995, 1, 1), date(2000, 12, 31), &["Saturn"]),
    );
    let report =
        score_entity(&natal(), &records, &ephemeris(), &ScoringConfig::default()).unwrap();
    let periods = &report.systems[0].periods;
    let corrected = &periods[0].lords[0];
    assert!(corrected.birth_corrected);
    // natal Saturn exalted in Tula
    assert!((corrected.dignity.strength - 10.0).abs() < 1e-12);
    // the 2001 Saturn period uses the onset snapshot: debilitated
    assert!(!periods[1].lords[0].birth_corrected);
    assert!(periods[1].lords[0].dignity.strength.abs() < 1e-12);
}

#[test]
fn malformed_records_skipped_in_order() {
    let mut records = timeline();
    records.insert(
        1,
        PeriodRecord::new(date(2005, 6, 1), date(2005, 12, 31), &["Saturn", "Pluto"]),
    );
    records.push(PeriodRecord::new(date(2016, 1, 1), date(2017, 1, 1), &[]));
    let report =
        score_entity(&natal(), &records, &ephemeris(), &ScoringConfig::default()).unwrap();

    assert_eq!(report.skipped_periods.len(), 2);
    assert!(
        report
            .skipped_periods
            .iter()
            .all(|e| matches!(e, SignalError::MalformedPeriod { .. }))
    );
    let indices: Vec<usize> = report.systems[0]
        .periods
        .iter()
        .map(|p| p.period.index)
        .collect();
    assert_eq!(indices, vec![0, 2, 3]);
    assert_eq!(report.systems[0].opportunities.len(), 2);
}

#[test]
fn unresolvable_reference_fails_only_its_system() {
    let mut natal = natal();
    natal.positions = ChartPositions::new()
        .with_lagna(5.0)
        .with_graha(Graha::Shani, 190.0);
    let config = ScoringConfig::default().with_house_systems(&[
        HouseSystem::Lagna,
        HouseSystem::ChandraLagna,
        HouseSystem::FirstPeriodLord,
    ]);
    let report = score_entity(&natal, &timeline(), &ephemeris(), &config).unwrap();

    let ok: Vec<HouseSystem> = report.systems.iter().map(|s| s.system).collect();
    assert_eq!(ok, vec![HouseSystem::Lagna, HouseSystem::FirstPeriodLord]);
    assert_eq!(report.failed_systems.len(), 1);
    assert!(matches!(
        report.failed_systems[0],
        SignalError::ReferenceUnavailable {
            system: HouseSystem::ChandraLagna,
            ..
        }
    ));
    let first = report.system(HouseSystem::FirstPeriodLord).unwrap();
    assert_eq!(first.reference.graha, Some(Graha::Shani));
    assert!((first.reference.longitude - 190.0).abs() < 1e-12);
}

#[test]
fn missing_snapshot_recovers_with_neutral_scores() {
    let report = score_entity(
        &natal(),
        &timeline(),
        &TableEphemeris::new(),
        &ScoringConfig::default(),
    )
    .unwrap();
    let sys = &report.systems[0];
    assert_eq!(sys.periods.len(), 3);
    // lord, Sun and Moon missing for every period
    assert_eq!(sys.diagnostics.len(), 9);
    assert!(sys.diagnostics.iter().all(SignalError::is_recoverable));
    for p in &sys.periods {
        assert!((p.dignity_strength - 5.0).abs() < 1e-12);
        assert!((p.luminaries_support - 0.5).abs() < 1e-12);
    }
    // neutral scores differ only by base nature and stay in the hold band
    assert!(
        sys.opportunities
            .iter()
            .all(|o| o.action == Action::Hold)
    );
}

#[test]
fn toml_config_enables_all_charts() {
    init_tracing();
    let config = ScoringConfig::from_toml_str(include_str!("data/scoring.toml")).unwrap();
    let report = score_entity(&natal(), &timeline(), &ephemeris(), &config).unwrap();
    assert_eq!(report.systems.len(), 3);
    for sys in &report.systems {
        for p in &sys.periods {
            assert!(p.navamsha.is_some());
            assert!(p.dashamsha.is_some());
            assert!(p.combined.d9_rating.is_some());
            assert_eq!(p.effects.len(), 3);
            assert!((1.0..=10.0).contains(&p.auspiciousness));
        }
    }
}
