//! Amsha (divisional chart) mapping for D9 (Navamsha) and D10 (Dashamsha).
//!
//! Each amsha divides the 30-degree rashi span into N equal parts and maps
//! each part to a target rashi. A graha whose D1 rashi equals its amsha
//! rashi is vargottama.

use serde::{Deserialize, Serialize};

use crate::rashi::{Rashi, RashiElement, rashi_from_longitude};

// ---------------------------------------------------------------------------
// Varga selector
// ---------------------------------------------------------------------------

/// Divisional charts used for period scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Varga {
    D1,
    D9,
    D10,
}

pub const ALL_VARGAS: [Varga; 3] = [Varga::D1, Varga::D9, Varga::D10];

impl Varga {
    /// Number of slices per rashi.
    pub const fn divisions(self) -> u8 {
        match self {
            Self::D1 => 1,
            Self::D9 => 9,
            Self::D10 => 10,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::D1 => "D1",
            Self::D9 => "D9",
            Self::D10 => "D10",
        }
    }

    pub const fn sanskrit_name(self) -> &'static str {
        match self {
            Self::D1 => "Rashi",
            Self::D9 => "Navamsha",
            Self::D10 => "Dashamsha",
        }
    }

    /// Width of one slice in degrees.
    pub fn slice_width(self) -> f64 {
        30.0 / self.divisions() as f64
    }
}

// ---------------------------------------------------------------------------
// Dashamsha deities
// ---------------------------------------------------------------------------

/// Presiding deity of each D10 slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashamshaDeity {
    Indra,
    Agni,
    Yama,
    Rakshasa,
    Varuna,
    Vayu,
    Kubera,
    Isana,
    Brahma,
    Ananta,
}

const DASHAMSHA_DEITIES: [DashamshaDeity; 10] = [
    DashamshaDeity::Indra,
    DashamshaDeity::Agni,
    DashamshaDeity::Yama,
    DashamshaDeity::Rakshasa,
    DashamshaDeity::Varuna,
    DashamshaDeity::Vayu,
    DashamshaDeity::Kubera,
    DashamshaDeity::Isana,
    DashamshaDeity::Brahma,
    DashamshaDeity::Ananta,
];

impl DashamshaDeity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Indra => "Indra",
            Self::Agni => "Agni",
            Self::Yama => "Yama",
            Self::Rakshasa => "Rakshasa",
            Self::Varuna => "Varuna",
            Self::Vayu => "Vayu",
            Self::Kubera => "Kubera",
            Self::Isana => "Isana",
            Self::Brahma => "Brahma",
            Self::Ananta => "Ananta",
        }
    }

    /// Professional domain tag.
    pub const fn domain(self) -> &'static str {
        match self {
            Self::Indra => "Leadership & Authority",
            Self::Agni => "Innovation & Energy",
            Self::Yama => "Law & Justice",
            Self::Rakshasa => "Competition & Politics",
            Self::Varuna => "Creativity & Arbitration",
            Self::Vayu => "Communication & Media",
            Self::Kubera => "Finance & Wealth",
            Self::Isana => "Healing & Counseling",
            Self::Brahma => "Innovation & Creation",
            Self::Ananta => "Stability & Service",
        }
    }

    /// Leadership, wealth and creation deities flagged in career tags.
    pub const fn is_key_career_deity(self) -> bool {
        matches!(self, Self::Indra | Self::Kubera | Self::Brahma)
    }

    /// Deity of a 1-based dashamsha index (clamped to 1..=10).
    pub const fn from_index(index: u8) -> Self {
        let i = if index == 0 { 0 } else if index > 10 { 9 } else { index - 1 };
        DASHAMSHA_DEITIES[i as usize]
    }
}

// ---------------------------------------------------------------------------
// Target rashi tables
// ---------------------------------------------------------------------------

/// First navamsha rashi for each element; the sequence then runs forward.
const fn navamsha_anchor(element: RashiElement) -> Rashi {
    match element {
        RashiElement::Fire => Rashi::Mesha,
        RashiElement::Earth => Rashi::Makara,
        RashiElement::Air => Rashi::Tula,
        RashiElement::Water => Rashi::Karka,
    }
}

const DASHAMSHA_ODD: [Rashi; 10] = [
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
];

const DASHAMSHA_EVEN: [Rashi; 10] = [
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
];

/// 1-based slice index of `degrees_in_rashi` for an N-fold division.
pub fn division_index(varga: Varga, degrees_in_rashi: f64) -> u8 {
    let n = varga.divisions();
    let idx = (degrees_in_rashi / varga.slice_width()).floor();
    if idx < 0.0 { 1 } else { ((idx as u8).saturating_add(1)).min(n) }
}

/// Target rashi of a 1-based slice index.
pub fn division_rashi(varga: Varga, rashi: Rashi, index: u8) -> Rashi {
    let i = index.clamp(1, varga.divisions()) - 1;
    match varga {
        Varga::D1 => rashi,
        Varga::D9 => navamsha_anchor(rashi.element()).nth_from(i),
        Varga::D10 if rashi.is_odd() => DASHAMSHA_ODD[i as usize],
        Varga::D10 => DASHAMSHA_EVEN[i as usize],
    }
}

// ---------------------------------------------------------------------------
// Varga positions
// ---------------------------------------------------------------------------

/// A D1 longitude mapped into a divisional chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VargaPosition {
    pub varga: Varga,
    /// D1 rashi.
    pub rashi: Rashi,
    pub division_rashi: Rashi,
    /// 1-based slice index.
    pub division_index: u8,
    /// Position inside the division rashi, scaled to 30 degrees.
    pub degrees_in_division: f64,
    pub is_vargottama: bool,
    /// D10 only.
    pub deity: Option<DashamshaDeity>,
}

/// Map a sidereal longitude into `varga`.
pub fn varga_position(sidereal_lon: f64, varga: Varga) -> VargaPosition {
    let info = rashi_from_longitude(sidereal_lon);
    let index = division_index(varga, info.degrees_in_rashi);
    let division_rashi = division_rashi(varga, info.rashi, index);
    let offset = info.degrees_in_rashi - (index - 1) as f64 * varga.slice_width();
    let degrees_in_division = (offset * varga.divisions() as f64).clamp(0.0, 30.0);
    VargaPosition {
        varga,
        rashi: info.rashi,
        division_rashi,
        division_index: index,
        degrees_in_division,
        is_vargottama: info.rashi == division_rashi,
        deity: match varga {
            Varga::D10 => Some(DashamshaDeity::from_index(index)),
            _ => None,
        },
    }
}

/// D9 (Navamsha) position.
pub fn navamsha(sidereal_lon: f64) -> VargaPosition {
    varga_position(sidereal_lon, Varga::D9)
}

/// D10 (Dashamsha) position.
pub fn dashamsha(sidereal_lon: f64) -> VargaPosition {
    varga_position(sidereal_lon, Varga::D10)
}
