//! Sidereal position snapshot of the nine grahas plus the lagna.

use serde::{Deserialize, Serialize};

use crate::graha::{ALL_GRAHAS, Graha};
use crate::rashi::{Rashi, rashi_from_longitude};
use crate::util::normalize_360;

/// Position of one graha at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrahaPosition {
    pub graha: Graha,
    /// Sidereal longitude in [0, 360).
    pub longitude: f64,
    pub rashi: Rashi,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

impl GrahaPosition {
    pub fn new(graha: Graha, longitude_deg: f64) -> Self {
        let longitude = normalize_360(longitude_deg);
        let info = rashi_from_longitude(longitude);
        Self {
            graha,
            longitude,
            rashi: info.rashi,
            degrees_in_rashi: info.degrees_in_rashi,
        }
    }
}

/// Positions of all grahas and the lagna at one instant.
///
/// Entries are optional so that an incomplete ephemeris answer can be
/// represented and recovered from downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPositions {
    grahas: [Option<GrahaPosition>; 9],
    lagna: Option<f64>,
}

impl ChartPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a complete snapshot from longitudes in ALL_GRAHAS order.
    pub fn from_longitudes(longitudes: [f64; 9], lagna: f64) -> Self {
        let mut chart = Self::new().with_lagna(lagna);
        for (graha, lon) in ALL_GRAHAS.into_iter().zip(longitudes) {
            chart.set(graha, lon);
        }
        chart
    }

    pub fn with_lagna(mut self, lagna_deg: f64) -> Self {
        self.lagna = Some(normalize_360(lagna_deg));
        self
    }

    pub fn with_graha(mut self, graha: Graha, longitude_deg: f64) -> Self {
        self.set(graha, longitude_deg);
        self
    }

    pub fn set(&mut self, graha: Graha, longitude_deg: f64) {
        self.grahas[graha.index() as usize] = Some(GrahaPosition::new(graha, longitude_deg));
    }

    pub fn set_lagna(&mut self, lagna_deg: f64) {
        self.lagna = Some(normalize_360(lagna_deg));
    }

    pub fn get(&self, graha: Graha) -> Option<&GrahaPosition> {
        self.grahas[graha.index() as usize].as_ref()
    }

    pub fn longitude(&self, graha: Graha) -> Option<f64> {
        self.get(graha).map(|p| p.longitude)
    }

    pub fn rashi(&self, graha: Graha) -> Option<Rashi> {
        self.get(graha).map(|p| p.rashi)
    }

    pub fn lagna(&self) -> Option<f64> {
        self.lagna
    }

    /// Iterate over the grahas that have a position.
    pub fn iter(&self) -> impl Iterator<Item = &GrahaPosition> {
        self.grahas.iter().flatten()
    }

    /// Grahas with no position in this snapshot.
    pub fn missing(&self) -> Vec<Graha> {
        ALL_GRAHAS
            .into_iter()
            .filter(|g| self.get(*g).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.lagna.is_some() && self.grahas.iter().all(Option::is_some)
    }
}
