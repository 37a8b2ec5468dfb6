//! Graha relationship and dignity system.
//!
//! Provides exaltation/debilitation signs, moolatrikona and own-sign
//! ownership, natural (naisargika) friendship, temporal (tatkalika)
//! friendship, compound (panchadha) friendship and the full dignity
//! evaluation with its merit units and onset enhancement.
//!
//! All rule tables are sign based and indexed by [`Graha::index`].

use serde::{Deserialize, Serialize};

use crate::graha::{Graha, rashi_lord};
use crate::position::ChartPositions;
use crate::rashi::Rashi;
use crate::util::{house_number, house_offset};

// ---------------------------------------------------------------------------
// 1a. Exaltation & Debilitation
// ---------------------------------------------------------------------------

const EXALTATION: [Rashi; 9] = [
    Rashi::Mesha,     // Surya
    Rashi::Vrishabha, // Chandra
    Rashi::Makara,    // Mangal
    Rashi::Kanya,     // Buddh
    Rashi::Karka,     // Guru
    Rashi::Meena,     // Shukra
    Rashi::Tula,      // Shani
    Rashi::Vrishabha, // Rahu
    Rashi::Vrischika, // Ketu
];

/// Exaltation rashi of a graha (nodes included).
pub const fn exaltation_rashi(graha: Graha) -> Rashi {
    EXALTATION[graha.index() as usize]
}

/// Debilitation rashi: the seventh sign from exaltation.
pub const fn debilitation_rashi(graha: Graha) -> Rashi {
    exaltation_rashi(graha).nth_from(6)
}

// ---------------------------------------------------------------------------
// 1b. Moolatrikona & Own Signs
// ---------------------------------------------------------------------------

const MOOLATRIKONA: [Option<Rashi>; 9] = [
    Some(Rashi::Simha),
    Some(Rashi::Vrishabha),
    Some(Rashi::Mesha),
    Some(Rashi::Kanya),
    Some(Rashi::Dhanu),
    Some(Rashi::Tula),
    Some(Rashi::Kumbha),
    None,
    None,
];

/// Moolatrikona rashi. None for Rahu/Ketu.
pub const fn moolatrikona_rashi(graha: Graha) -> Option<Rashi> {
    MOOLATRIKONA[graha.index() as usize]
}

/// Own-sign rashis. Empty for Rahu/Ketu.
pub fn own_signs(graha: Graha) -> &'static [Rashi] {
    match graha {
        Graha::Surya => &[Rashi::Simha],
        Graha::Chandra => &[Rashi::Karka],
        Graha::Mangal => &[Rashi::Mesha, Rashi::Vrischika],
        Graha::Buddh => &[Rashi::Mithuna, Rashi::Kanya],
        Graha::Guru => &[Rashi::Dhanu, Rashi::Meena],
        Graha::Shukra => &[Rashi::Vrishabha, Rashi::Tula],
        Graha::Shani => &[Rashi::Makara, Rashi::Kumbha],
        Graha::Rahu | Graha::Ketu => &[],
    }
}

// ---------------------------------------------------------------------------
// 1c. Natural Friendship (Naisargika Maitri)
// ---------------------------------------------------------------------------

/// Natural relationship between two grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NaisargikaMaitri {
    Friend,
    Enemy,
    Neutral,
}

use NaisargikaMaitri::{Enemy as E, Friend as F, Neutral as N};

/// Row = evaluated graha, column = other graha, both in ALL_GRAHAS order.
const NAISARGIKA: [[NaisargikaMaitri; 9]; 9] = [
    //  Sun Moon Mars Merc Jup Ven Sat Rahu Ketu
    [N, F, F, N, F, E, E, N, N], // Surya
    [F, N, E, F, N, N, E, N, N], // Chandra
    [F, F, N, E, F, N, N, N, N], // Mangal
    [F, E, N, N, N, F, N, N, N], // Buddh
    [F, F, F, E, N, E, N, N, N], // Guru
    [E, E, N, F, N, N, F, N, N], // Shukra
    [E, E, E, F, N, F, N, N, N], // Shani
    [E, E, E, N, N, F, F, N, N], // Rahu
    [N, N, F, E, F, E, N, N, N], // Ketu
];

/// Natural (naisargika) friendship of `graha` towards `other`.
pub const fn naisargika_maitri(graha: Graha, other: Graha) -> NaisargikaMaitri {
    NAISARGIKA[graha.index() as usize][other.index() as usize]
}

// ---------------------------------------------------------------------------
// 1d. Temporal Friendship (Tatkalika Maitri)
// ---------------------------------------------------------------------------

/// Temporal relationship based on current house positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TatkalikaMaitri {
    Friend,
    Enemy,
}

/// Temporal friendship: friend if `other` is in the 2nd/3rd/4th/10th/11th/12th
/// house counted from `graha`. Both arguments are 1-based house numbers.
pub fn tatkalika_maitri(graha_house: u8, other_house: u8) -> TatkalikaMaitri {
    // House numbers 2,3,4,10,11,12 → offsets 1,2,3,9,10,11
    match house_offset(graha_house, other_house) {
        1 | 2 | 3 | 9 | 10 | 11 => TatkalikaMaitri::Friend,
        _ => TatkalikaMaitri::Enemy,
    }
}

// ---------------------------------------------------------------------------
// 1e. Compound Friendship (Panchadha Maitri)
// ---------------------------------------------------------------------------

/// Five-fold compound relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanchadhaMaitri {
    AdhiShatru,
    Shatru,
    Sama,
    Mitra,
    AdhiMitra,
}

/// Combine natural and temporal friendship into the five-fold relationship.
pub const fn panchadha_maitri(
    naisargika: NaisargikaMaitri,
    tatkalika: TatkalikaMaitri,
) -> PanchadhaMaitri {
    use PanchadhaMaitri as P;
    use TatkalikaMaitri as T;

    match (naisargika, tatkalika) {
        (F, T::Friend) => P::AdhiMitra,
        (F, T::Enemy) => P::Sama,
        (N, T::Friend) => P::Mitra,
        (N, T::Enemy) => P::Shatru,
        (E, T::Friend) => P::Sama,
        (E, T::Enemy) => P::AdhiShatru,
    }
}

// ---------------------------------------------------------------------------
// 1f. Dignity
// ---------------------------------------------------------------------------

/// Dignity category of a graha in a rashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dignity {
    Exalted,
    Moolatrikona,
    OwnSign,
    AdhiMitra,
    Mitra,
    Sama,
    Shatru,
    AdhiShatru,
    Debilitated,
}

impl Dignity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exalted => "exalted",
            Self::Moolatrikona => "moolatrikona",
            Self::OwnSign => "own",
            Self::AdhiMitra => "great_friend",
            Self::Mitra => "friend",
            Self::Sama => "neutral",
            Self::Shatru => "enemy",
            Self::AdhiShatru => "great_enemy",
            Self::Debilitated => "debilitated",
        }
    }

    /// Merit units on the 0-60 scale.
    pub const fn merit_units(self) -> f64 {
        match self {
            Self::Exalted => 60.0,
            Self::Moolatrikona => 45.0,
            Self::OwnSign => 30.0,
            Self::AdhiMitra => 22.0,
            Self::Mitra => 15.0,
            Self::Sama => 8.0,
            Self::Shatru => 4.0,
            Self::AdhiShatru => 2.0,
            Self::Debilitated => 0.0,
        }
    }

    /// True for the sign-based categories decided before any relationship lookup.
    pub const fn is_basic(self) -> bool {
        matches!(
            self,
            Self::Exalted | Self::Debilitated | Self::Moolatrikona | Self::OwnSign
        )
    }
}

impl From<NaisargikaMaitri> for Dignity {
    fn from(m: NaisargikaMaitri) -> Self {
        match m {
            F => Self::Mitra,
            N => Self::Sama,
            E => Self::Shatru,
        }
    }
}

impl From<PanchadhaMaitri> for Dignity {
    fn from(m: PanchadhaMaitri) -> Self {
        match m {
            PanchadhaMaitri::AdhiMitra => Self::AdhiMitra,
            PanchadhaMaitri::Mitra => Self::Mitra,
            PanchadhaMaitri::Sama => Self::Sama,
            PanchadhaMaitri::Shatru => Self::Shatru,
            PanchadhaMaitri::AdhiShatru => Self::AdhiShatru,
        }
    }
}

/// Multipliers applied to strength at the onset instant of a period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnsetEnhancement {
    pub exalted: f64,
    pub moolatrikona: f64,
    pub own_sign: f64,
    /// Applies to both great friend and friend.
    pub friend: f64,
    pub neutral: f64,
}

impl Default for OnsetEnhancement {
    fn default() -> Self {
        Self {
            exalted: 1.5,
            moolatrikona: 1.25,
            own_sign: 1.25,
            friend: 1.2,
            neutral: 1.1,
        }
    }
}

impl OnsetEnhancement {
    pub fn factor(&self, dignity: Dignity) -> f64 {
        match dignity {
            Dignity::Exalted => self.exalted,
            Dignity::Moolatrikona => self.moolatrikona,
            Dignity::OwnSign => self.own_sign,
            Dignity::AdhiMitra | Dignity::Mitra => self.friend,
            Dignity::Sama => self.neutral,
            Dignity::Shatru | Dignity::AdhiShatru | Dignity::Debilitated => 1.0,
        }
    }
}

/// Positions used for the temporal half of the compound relationship.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipContext<'a> {
    pub positions: &'a ChartPositions,
    /// Longitude houses are counted from.
    pub reference: f64,
}

/// Outcome of a dignity evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DignityResult {
    pub dignity: Dignity,
    /// Effective strength out of 10 after any onset enhancement.
    pub strength: f64,
    /// `merit_units / 60 * 10`.
    pub base_strength: f64,
    pub merit_units: f64,
    /// 1.0 when not evaluated at onset.
    pub enhancement: f64,
    /// Absent whenever a basic dignity applies.
    pub natural: Option<NaisargikaMaitri>,
    pub temporary: Option<TatkalikaMaitri>,
    pub compound: Option<PanchadhaMaitri>,
}

impl DignityResult {
    fn basic(dignity: Dignity) -> Self {
        let merit_units = dignity.merit_units();
        Self {
            dignity,
            strength: merit_units / 60.0 * 10.0,
            base_strength: merit_units / 60.0 * 10.0,
            merit_units,
            enhancement: 1.0,
            natural: None,
            temporary: None,
            compound: None,
        }
    }

    /// Neutral placeholder used when a position is unavailable: strength 5.0.
    pub fn neutral_default() -> Self {
        Self {
            dignity: Dignity::Sama,
            strength: 5.0,
            base_strength: 5.0,
            merit_units: 30.0,
            enhancement: 1.0,
            natural: None,
            temporary: None,
            compound: None,
        }
    }

    fn enhance(mut self, factor: f64) -> Self {
        self.enhancement = factor;
        self.strength = (self.base_strength * factor).min(10.0);
        self
    }
}

/// Evaluate the dignity of `graha` in `rashi` with the default onset multipliers.
pub fn evaluate_dignity(
    graha: Graha,
    rashi: Rashi,
    onset: bool,
    context: Option<&RelationshipContext<'_>>,
) -> DignityResult {
    evaluate_dignity_with(graha, rashi, onset, context, &OnsetEnhancement::default())
}

/// Evaluate the dignity of `graha` in `rashi`.
///
/// Priority: exaltation > debilitation > moolatrikona > own sign >
/// relationship with the rashi lord. The relationship is compound when
/// `context` holds positions for both the graha and the lord, natural
/// otherwise.
pub fn evaluate_dignity_with(
    graha: Graha,
    rashi: Rashi,
    onset: bool,
    context: Option<&RelationshipContext<'_>>,
    enhancement: &OnsetEnhancement,
) -> DignityResult {
    let result = classify(graha, rashi, context);
    if onset {
        let factor = enhancement.factor(result.dignity);
        result.enhance(factor)
    } else {
        result
    }
}

fn classify(graha: Graha, rashi: Rashi, context: Option<&RelationshipContext<'_>>) -> DignityResult {
    if rashi == exaltation_rashi(graha) {
        return DignityResult::basic(Dignity::Exalted);
    }
    if rashi == debilitation_rashi(graha) {
        return DignityResult::basic(Dignity::Debilitated);
    }
    if moolatrikona_rashi(graha) == Some(rashi) {
        return DignityResult::basic(Dignity::Moolatrikona);
    }
    if own_signs(graha).contains(&rashi) {
        return DignityResult::basic(Dignity::OwnSign);
    }

    let lord = rashi_lord(rashi);
    let natural = naisargika_maitri(graha, lord);
    let temporary = context.and_then(|ctx| {
        let graha_lon = ctx.positions.longitude(graha)?;
        let lord_lon = ctx.positions.longitude(lord)?;
        Some(tatkalika_maitri(
            house_number(graha_lon, ctx.reference),
            house_number(lord_lon, ctx.reference),
        ))
    });
    let compound = temporary.map(|t| panchadha_maitri(natural, t));
    let dignity = compound.map_or_else(|| Dignity::from(natural), Dignity::from);

    DignityResult {
        natural: Some(natural),
        temporary,
        compound,
        ..DignityResult::basic(dignity)
    }
}
