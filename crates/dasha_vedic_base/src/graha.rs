//! Vedic planet (graha) enum and rashi lordship.
//!
//! The 9 grahas govern every dasha period. Each rashi has a planetary lord,
//! which is a universal Vedic convention.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::rashi::Rashi;

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// Natural benefics: Moon, Mercury, Jupiter, Venus.
pub const NATURAL_BENEFICS: [Graha; 4] = [Graha::Guru, Graha::Shukra, Graha::Buddh, Graha::Chandra];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        match self {
            Self::Surya => 0,
            Self::Chandra => 1,
            Self::Mangal => 2,
            Self::Buddh => 3,
            Self::Guru => 4,
            Self::Shukra => 5,
            Self::Shani => 6,
            Self::Rahu => 7,
            Self::Ketu => 8,
        }
    }

    /// True for the natural benefics (Moon, Mercury, Jupiter, Venus).
    pub const fn is_natural_benefic(self) -> bool {
        matches!(self, Self::Chandra | Self::Buddh | Self::Guru | Self::Shukra)
    }

    /// True for the Sun and Moon.
    pub const fn is_luminary(self) -> bool {
        matches!(self, Self::Surya | Self::Chandra)
    }

    /// Short theme tag describing what a period of this graha emphasises.
    pub const fn theme(self) -> &'static str {
        match self {
            Self::Surya => "Leadership & Authority",
            Self::Chandra => "Emotional Growth",
            Self::Mangal => "Action & Implementation",
            Self::Buddh => "Communication & Technology",
            Self::Guru => "Wisdom & Growth",
            Self::Shukra => "Expansion & Prosperity",
            Self::Shani => "Structure & Discipline",
            Self::Rahu => "Innovation & Transformation",
            Self::Ketu => "Spiritual Evolution",
        }
    }
}

impl Display for Graha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Graha {
    type Err = VedicError;

    /// Accepts Sanskrit or English names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let graha = match key.as_str() {
            "surya" | "sun" => Self::Surya,
            "chandra" | "moon" => Self::Chandra,
            "mangal" | "mangala" | "mars" => Self::Mangal,
            "buddh" | "budha" | "mercury" => Self::Buddh,
            "guru" | "brihaspati" | "jupiter" => Self::Guru,
            "shukra" | "venus" => Self::Shukra,
            "shani" | "saturn" => Self::Shani,
            "rahu" => Self::Rahu,
            "ketu" => Self::Ketu,
            _ => return Err(VedicError::UnknownGraha(s.to_string())),
        };
        Ok(graha)
    }
}

/// Get the planetary lord of a rashi.
///
/// - Mesha/Vrischika → Mangal (Mars)
/// - Vrishabha/Tula → Shukra (Venus)
/// - Mithuna/Kanya → Buddh (Mercury)
/// - Karka → Chandra (Moon)
/// - Simha → Surya (Sun)
/// - Dhanu/Meena → Guru (Jupiter)
/// - Makara/Kumbha → Shani (Saturn)
pub const fn rashi_lord(rashi: Rashi) -> Graha {
    match rashi {
        Rashi::Mesha => Graha::Mangal,
        Rashi::Vrishabha => Graha::Shukra,
        Rashi::Mithuna => Graha::Buddh,
        Rashi::Karka => Graha::Chandra,
        Rashi::Simha => Graha::Surya,
        Rashi::Kanya => Graha::Buddh,
        Rashi::Tula => Graha::Shukra,
        Rashi::Vrischika => Graha::Mangal,
        Rashi::Dhanu => Graha::Guru,
        Rashi::Makara => Graha::Shani,
        Rashi::Kumbha => Graha::Shani,
        Rashi::Meena => Graha::Guru,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graha_indices_sequential() {
        for (i, g) in ALL_GRAHAS.iter().enumerate() {
            assert_eq!(g.index() as usize, i);
        }
    }

    #[test]
    fn parse_english_and_sanskrit() {
        assert_eq!("Jupiter".parse::<Graha>().unwrap(), Graha::Guru);
        assert_eq!("guru".parse::<Graha>().unwrap(), Graha::Guru);
        assert_eq!(" MOON ".parse::<Graha>().unwrap(), Graha::Chandra);
        assert_eq!("Budha".parse::<Graha>().unwrap(), Graha::Buddh);
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "Pluto".parse::<Graha>().unwrap_err();
        assert_eq!(err, VedicError::UnknownGraha("Pluto".into()));
    }

    #[test]
    fn names_round_trip() {
        for g in ALL_GRAHAS {
            assert_eq!(g.name().parse::<Graha>().unwrap(), g);
            assert_eq!(g.english_name().parse::<Graha>().unwrap(), g);
        }
    }

    #[test]
    fn benefics_match_predicate() {
        for g in ALL_GRAHAS {
            assert_eq!(NATURAL_BENEFICS.contains(&g), g.is_natural_benefic());
        }
    }

    #[test]
    fn rashi_lordship_dual_ruled() {
        assert_eq!(rashi_lord(Rashi::Mesha), Graha::Mangal);
        assert_eq!(rashi_lord(Rashi::Vrischika), Graha::Mangal);
        assert_eq!(rashi_lord(Rashi::Vrishabha), Graha::Shukra);
        assert_eq!(rashi_lord(Rashi::Tula), Graha::Shukra);
        assert_eq!(rashi_lord(Rashi::Dhanu), Graha::Guru);
        assert_eq!(rashi_lord(Rashi::Meena), Graha::Guru);
        assert_eq!(rashi_lord(Rashi::Makara), Graha::Shani);
        assert_eq!(rashi_lord(Rashi::Kumbha), Graha::Shani);
    }

    #[test]
    fn luminary_lords() {
        assert_eq!(rashi_lord(Rashi::Simha), Graha::Surya);
        assert_eq!(rashi_lord(Rashi::Karka), Graha::Chandra);
    }
}
