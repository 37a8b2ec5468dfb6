//! Dasha (planetary period) levels and the Vimshottari birth lord.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::Graha;
use crate::util::normalize_360;

/// Maximum supported nesting depth.
pub const MAX_DASHA_DEPTH: usize = 3;

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Hierarchical dasha levels, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

impl DashaLevel {
    /// Level of a period governed by `depth` lords (1..=3).
    pub fn from_depth(depth: usize) -> Result<Self, VedicError> {
        match depth {
            1 => Ok(Self::Mahadasha),
            2 => Ok(Self::Antardasha),
            3 => Ok(Self::Pratyantardasha),
            _ => Err(VedicError::UnsupportedDepth(depth)),
        }
    }

    /// Number of governing lords at this level.
    pub const fn depth(self) -> usize {
        match self {
            Self::Mahadasha => 1,
            Self::Antardasha => 2,
            Self::Pratyantardasha => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
        }
    }

    /// Short abbreviation (MD, AD, PD).
    pub const fn abbrev(self) -> &'static str {
        match self {
            Self::Mahadasha => "MD",
            Self::Antardasha => "AD",
            Self::Pratyantardasha => "PD",
        }
    }

    /// Column label for a lord combination, e.g. "MD-AD".
    pub const fn combo_label(self) -> &'static str {
        match self {
            Self::Mahadasha => "MD",
            Self::Antardasha => "MD-AD",
            Self::Pratyantardasha => "MD-AD-PD",
        }
    }
}

/// Vimshottari lord sequence, starting from Ashwini's lord.
pub const VIMSHOTTARI_GRAHAS: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// 0-based nakshatra index (0 = Ashwini .. 26 = Revati).
pub fn nakshatra_index(moon_sidereal_lon: f64) -> u8 {
    let idx = (normalize_360(moon_sidereal_lon) / NAKSHATRA_SPAN_27).floor() as u8;
    idx % 27
}

/// Mahadasha lord running at birth: the lord of the Moon's nakshatra.
pub fn vimshottari_birth_lord(moon_sidereal_lon: f64) -> Graha {
    VIMSHOTTARI_GRAHAS[(nakshatra_index(moon_sidereal_lon) % 9) as usize]
}
