//! Vedic building blocks for dasha scoring.
//!
//! This crate provides:
//! - Graha and rashi catalogues with sign lordship
//! - Dignity evaluation with natural, temporal and compound relationships
//! - Arudha Lagna and house counting
//! - D9 (Navamsha) and D10 (Dashamsha) divisional mapping
//! - Dasha levels and the Vimshottari birth lord
//!
//! Everything here is pure and stateless; positions come from the caller.

pub mod amsha;
pub mod arudha;
pub mod dasha;
pub mod error;
pub mod graha;
pub mod graha_relationships;
pub mod position;
pub mod rashi;
pub mod util;

pub use amsha::{
    ALL_VARGAS, DashamshaDeity, Varga, VargaPosition, dashamsha, division_index, division_rashi,
    navamsha, varga_position,
};
pub use arudha::{arudha_from_lord, arudha_lagna, lagna_lord};
pub use dasha::{
    DashaLevel, MAX_DASHA_DEPTH, NAKSHATRA_SPAN_27, VIMSHOTTARI_GRAHAS, nakshatra_index,
    vimshottari_birth_lord,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, NATURAL_BENEFICS, rashi_lord};
pub use graha_relationships::{
    Dignity, DignityResult, NaisargikaMaitri, OnsetEnhancement, PanchadhaMaitri,
    RelationshipContext, TatkalikaMaitri, debilitation_rashi, evaluate_dignity,
    evaluate_dignity_with, exaltation_rashi, moolatrikona_rashi, naisargika_maitri, own_signs,
    panchadha_maitri, tatkalika_maitri,
};
pub use position::{ChartPositions, GrahaPosition};
pub use rashi::{ALL_RASHIS, Rashi, RashiElement, RashiInfo, rashi_from_longitude};
pub use util::{house_number, house_offset, normalize_360, round2};
