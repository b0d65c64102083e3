//! Angle helpers for heading arithmetic.

use std::f64::consts::PI;

/// Normalizes an angle in degrees into the range (-180, 180].
///
/// Heading differences taken across the 0/360 boundary come out as the
/// short way around: `wrap_angle(10.0 - 350.0)` is `20.0`.
pub fn wrap_angle(degrees: f64) -> f64 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; the range is closed at the top.
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Converts degrees to radians.
pub fn to_rad(degrees: f64) -> f64 { degrees * PI / 180.0 }

/// Unsigned angle swept between two headings, in radians.
pub fn swept_angle(start: f64, end: f64) -> f64 { to_rad(wrap_angle(end - start).abs()) }
