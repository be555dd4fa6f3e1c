//! Unit conversions at the OOXML boundary.
//!
//! Everything upstream works in inches and points; OOXML wants
//! English Metric Units and centipoints.

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Convert inches to EMU, rounding to the nearest unit.
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Font size in centipoints, as run properties want it.
///
/// Config validation caps point sizes well below overflow; saturation
/// keeps the conversion total anyway.
pub fn centipoints(points: u32) -> u32 {
    points.saturating_mul(100)
}
