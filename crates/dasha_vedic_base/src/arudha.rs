//! Arudha Lagna (A1), the reflected image of the lagna.
//!
//! Formula:
//! 1. lord = lord of the lagna rashi
//! 2. h = house of the lord counted from the lagna (1-12)
//! 3. arudha = lord_lon + (h - 1) * 30
//! 4. Exception: if the result falls in the 1st or 7th house from the lagna,
//!    move it forward by 10 houses (300 deg).

use crate::graha::{Graha, rashi_lord};
use crate::position::ChartPositions;
use crate::rashi::rashi_from_longitude;
use crate::util::{house_number, normalize_360};

/// Arudha Lagna longitude from lagna and lagna-lord longitudes.
pub fn arudha_from_lord(lagna_lon: f64, lord_lon: f64) -> f64 {
    let h = house_number(lord_lon, lagna_lon);
    let raw = normalize_360(lord_lon + (h as f64 - 1.0) * 30.0);
    match house_number(raw, lagna_lon) {
        1 | 7 => normalize_360(raw + 300.0),
        _ => raw,
    }
}

/// Lord of the lagna rashi.
pub fn lagna_lord(lagna_lon: f64) -> Graha {
    rashi_lord(rashi_from_longitude(lagna_lon).rashi)
}

/// Arudha Lagna of a chart. None if the lagna or its lord has no position.
pub fn arudha_lagna(chart: &ChartPositions) -> Option<f64> {
    let lagna = chart.lagna()?;
    let lord_lon = chart.longitude(lagna_lord(lagna))?;
    Some(arudha_from_lord(lagna, lord_lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lord_in_third_projects_two_more() {
        // Lagna 10 (Mesha), lord Mangal at 75 (house 3) → 75 + 60 = 135 (house 5)
        let a = arudha_from_lord(10.0, 75.0);
        assert!((a - 135.0).abs() < 1e-10);
    }

    #[test]
    fn lord_in_lagna_shifts_to_tenth() {
        // Lord in house 1 → raw stays in house 1 → +300
        let a = arudha_from_lord(10.0, 20.0);
        assert!((a - 320.0).abs() < 1e-10);
        assert_eq!(house_number(a, 10.0), 11);
    }

    #[test]
    fn lord_in_fourth_lands_in_seventh_and_shifts() {
        // Lagna 0, lord at 95 (house 4) → 95 + 90 = 185 (house 7) → 125
        let a = arudha_from_lord(0.0, 95.0);
        assert!((a - 125.0).abs() < 1e-10);
    }

    #[test]
    fn arudha_from_chart() {
        let chart = ChartPositions::new()
            .with_lagna(10.0)
            .with_graha(Graha::Mangal, 75.0);
        let a = arudha_lagna(&chart).unwrap();
        assert!((a - 135.0).abs() < 1e-10);
    }

    #[test]
    fn arudha_missing_lord_is_none() {
        let chart = ChartPositions::new().with_lagna(10.0);
        assert!(arudha_lagna(&chart).is_none());
        assert!(arudha_lagna(&ChartPositions::new()).is_none());
    }

    #[test]
    fn lagna_lord_lookup() {
        assert_eq!(lagna_lord(125.0), Graha::Surya);
        assert_eq!(lagna_lord(355.0), Graha::Guru);
    }
}
