//! Rashi (zodiac sign) lookup from sidereal longitude.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Mesha (Aries) at 0 deg. Given a sidereal longitude we
//! identify which rashi the point falls in and how far into the sign it is.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::util::normalize_360;

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

/// Element of a rashi, cycling Fire, Earth, Air, Water from Mesha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RashiElement {
    Fire,
    Earth,
    Air,
    Water,
}

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Mesha => 0,
            Self::Vrishabha => 1,
            Self::Mithuna => 2,
            Self::Karka => 3,
            Self::Simha => 4,
            Self::Kanya => 5,
            Self::Tula => 6,
            Self::Vrischika => 7,
            Self::Dhanu => 8,
            Self::Makara => 9,
            Self::Kumbha => 10,
            Self::Meena => 11,
        }
    }

    /// Rashi at a 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }

    /// The rashi `n` signs forward (n = 0 is this sign).
    pub const fn nth_from(self, n: u8) -> Self {
        Self::from_index((self.index() + n % 12) % 12)
    }

    /// Odd signs counted 1-based from Mesha: Mesha, Mithuna, Simha, ...
    pub const fn is_odd(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn element(self) -> RashiElement {
        match self.index() % 4 {
            0 => RashiElement::Fire,
            1 => RashiElement::Earth,
            2 => RashiElement::Air,
            _ => RashiElement::Water,
        }
    }
}

impl Display for Rashi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rashi {
    type Err = VedicError;

    /// Accepts Sanskrit or Western names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ALL_RASHIS
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(key) || r.western_name().eq_ignore_ascii_case(key))
            .ok_or_else(|| VedicError::UnknownRashi(s.to_string()))
    }
}

/// Rashi position of a longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RashiInfo {
    /// The rashi (zodiac sign).
    pub rashi: Rashi,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

/// Determine rashi from sidereal ecliptic longitude.
///
/// Each rashi spans exactly 30 degrees: Mesha = [0, 30), Vrishabha = [30, 60), etc.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    // Clamp to 11 in case of floating point edge (exactly 360.0)
    let rashi_idx = ((lon / 30.0).floor() as u8).min(11);
    let degrees_in_rashi = lon - (rashi_idx as f64) * 30.0;
    RashiInfo {
        rashi: ALL_RASHIS[rashi_idx as usize],
        degrees_in_rashi,
    }
}
