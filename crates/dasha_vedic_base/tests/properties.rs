//! Property tests for longitude, house and divisional mapping.

use proptest::prelude::*;

use dasha_vedic_base::{
    ALL_GRAHAS, ALL_RASHIS, Varga, evaluate_dignity, house_number, normalize_360,
    rashi_from_longitude, varga_position,
};

fn longitude() -> impl Strategy<Value = f64> {
    -720.0f64..720.0
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: house numbers are always in 1..=12.
    #[test]
    fn property_house_in_range(lon in longitude(), reference in longitude()) {
        let h = house_number(lon, reference);
        prop_assert!((1..=12).contains(&h));
    }

    /// PROPERTY: moving a longitude forward by 30 deg advances the house by one.
    #[test]
    fn property_house_advances_with_sign(lon in 0.0f64..360.0, reference in 0.0f64..360.0) {
        let frac = ((lon - reference) / 30.0).rem_euclid(1.0);
        prop_assume!(frac > 1e-6 && frac < 1.0 - 1e-6);
        let h = house_number(lon, reference);
        let next = house_number(lon + 30.0, reference);
        prop_assert_eq!(next, h % 12 + 1);
    }

    /// PROPERTY: degrees within a rashi stay in [0, 30).
    #[test]
    fn property_degrees_in_rashi(lon in longitude()) {
        let info = rashi_from_longitude(lon);
        prop_assert!(info.degrees_in_rashi >= 0.0 && info.degrees_in_rashi < 30.0 + 1e-9);
        let back = info.rashi.index() as f64 * 30.0 + info.degrees_in_rashi;
        prop_assert!((back - normalize_360(lon)).abs() < 1e-9);
    }

    /// PROPERTY: divisional slices stay in range and vargottama matches the sign comparison.
    #[test]
    fn property_varga_slices(lon in longitude()) {
        for varga in [Varga::D9, Varga::D10] {
            let p = varga_position(lon, varga);
            prop_assert!(p.division_index >= 1 && p.division_index <= varga.divisions());
            prop_assert_eq!(p.is_vargottama, p.rashi == p.division_rashi);
            prop_assert_eq!(p, varga_position(lon, varga));
            prop_assert_eq!(p.deity.is_some(), varga == Varga::D10);
        }
    }

    /// PROPERTY: dignity strength is bounded and consistent with merit units off-onset.
    #[test]
    fn property_dignity_bounded(g in 0usize..9, r in 0usize..12, onset in any::<bool>()) {
        let d = evaluate_dignity(ALL_GRAHAS[g], ALL_RASHIS[r], onset, None);
        prop_assert!(d.strength >= 0.0 && d.strength <= 10.0);
        prop_assert!((d.base_strength - d.merit_units / 60.0 * 10.0).abs() < 1e-12);
        if !onset {
            prop_assert!((d.strength - d.base_strength).abs() < 1e-12);
        }
    }
}
