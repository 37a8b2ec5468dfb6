//! Shared longitude and house-counting helpers.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// House number (1-12) of `lon` counted from `reference_lon`.
///
/// `floor((lon - reference) / 30) mod 12 + 1`, with both longitudes
/// normalized first. A point in the same 30 deg sector as the reference
/// is in house 1.
pub fn house_number(lon: f64, reference_lon: f64) -> u8 {
    let diff = normalize_360(lon) - normalize_360(reference_lon);
    let sectors = (diff / 30.0).floor() as i32;
    (sectors.rem_euclid(12) + 1) as u8
}

/// Forward distance in houses (0-11) from house `from` to house `to`.
///
/// Both arguments are 1-based house numbers.
pub fn house_offset(from: u8, to: u8) -> u8 {
    ((to as i16 - from as i16).rem_euclid(12)) as u8
}

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
