//! House reference resolution for the four supported house systems.

use std::fmt::{Display, Formatter};

use dasha_vedic_base::{
    ChartPositions, Graha, Rashi, arudha_lagna, rashi_from_longitude, vimshottari_birth_lord,
};
use serde::{Deserialize, Serialize};

use crate::error::{SignalError, SignalResult};
use crate::period::Period;

/// Where houses are counted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    /// The ascendant itself.
    Lagna,
    /// The Arudha Lagna (A1) derived from the lagna lord.
    ArudhaLagna,
    /// The Moon.
    ChandraLagna,
    /// The graha governing the entity's first period.
    FirstPeriodLord,
}

pub const ALL_HOUSE_SYSTEMS: [HouseSystem; 4] = [
    HouseSystem::Lagna,
    HouseSystem::ArudhaLagna,
    HouseSystem::ChandraLagna,
    HouseSystem::FirstPeriodLord,
];

impl HouseSystem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lagna => "Lagna",
            Self::ArudhaLagna => "Arudha Lagna",
            Self::ChandraLagna => "Chandra Lagna",
            Self::FirstPeriodLord => "First Period Lord",
        }
    }

    /// Stable snake_case key, matching the serde representation.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Lagna => "lagna",
            Self::ArudhaLagna => "arudha_lagna",
            Self::ChandraLagna => "chandra_lagna",
            Self::FirstPeriodLord => "first_period_lord",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Lagna => "Houses from the ascendant",
            Self::ArudhaLagna => "Houses from the reflected image of the ascendant",
            Self::ChandraLagna => "Houses from the Moon",
            Self::FirstPeriodLord => "Houses from the lord of the first period",
        }
    }
}

impl Display for HouseSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How the first-period lord is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstLordSource {
    /// Outermost lord of the earliest period in the timeline.
    #[default]
    Timeline,
    /// Vimshottari lord of the natal Moon's nakshatra.
    MoonNakshatra,
}

/// Resolved reference for one house system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseReference {
    pub system: HouseSystem,
    pub longitude: f64,
    pub rashi: Rashi,
    /// Graha the reference is taken from (ChandraLagna / FirstPeriodLord).
    pub graha: Option<Graha>,
}

/// Pick the first-period lord.
pub fn first_period_lord(
    periods: &[Period],
    natal: &ChartPositions,
    source: FirstLordSource,
) -> SignalResult<Graha> {
    let unavailable = |reason: &str| SignalError::ReferenceUnavailable {
        system: HouseSystem::FirstPeriodLord,
        reason: reason.to_string(),
    };
    match source {
        FirstLordSource::Timeline => periods
            .iter()
            .min_by_key(|p| (p.start, p.level()))
            .map(Period::outer_lord)
            .ok_or_else(|| unavailable("no periods in the timeline")),
        FirstLordSource::MoonNakshatra => natal
            .longitude(Graha::Chandra)
            .map(vimshottari_birth_lord)
            .ok_or_else(|| unavailable("natal Moon position missing")),
    }
}

/// Reference longitude for `system` from the natal positions.
///
/// `first_lord` is only consulted for [`HouseSystem::FirstPeriodLord`].
pub fn reference_longitude(
    system: HouseSystem,
    natal: &ChartPositions,
    first_lord: Option<Graha>,
) -> SignalResult<HouseReference> {
    let unavailable = |reason: String| SignalError::ReferenceUnavailable { system, reason };
    let (longitude, graha) = match system {
        HouseSystem::Lagna => (
            natal.lagna().ok_or_else(|| unavailable("natal lagna missing".into()))?,
            None,
        ),
        HouseSystem::ArudhaLagna => (
            arudha_lagna(natal)
                .ok_or_else(|| unavailable("natal lagna or lagna lord missing".into()))?,
            None,
        ),
        HouseSystem::ChandraLagna => (
            natal
                .longitude(Graha::Chandra)
                .ok_or_else(|| unavailable("natal Moon position missing".into()))?,
            Some(Graha::Chandra),
        ),
        HouseSystem::FirstPeriodLord => {
            let lord = first_lord.ok_or_else(|| unavailable("first period lord unknown".into()))?;
            let lon = natal
                .longitude(lord)
                .ok_or_else(|| unavailable(format!("natal position of {lord} missing")))?;
            (lon, Some(lord))
        }
    };
    Ok(HouseReference {
        system,
        longitude,
        rashi: rashi_from_longitude(longitude).rashi,
        graha,
    })
}
