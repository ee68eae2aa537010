use serde::Serialize;

/// Geographic coordinate in degrees. Out-of-range values are accepted here and
/// wrapped later by [`crate::engine::radians_with_offset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl GeoCoordinate {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }
}

/// Point on the projection surface, in units of the projection radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

/// Marker placement relative to the image box: 0 is one edge, 1 the center,
/// 2 the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CenterRatio {
    pub x: f64,
    pub y: f64,
}

/// Additive offsets in degrees, for map images not centered on (0, 0).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offsets {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn square(side: f64) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub coords: GeoCoordinate,
}

pub fn sexagesimal_dms_to_degrees(d: f64, m: f64, s: f64) -> f64 {
    let sign = if d.is_sign_negative() { -1.0 } else { 1.0 };
    let ad = d.abs();
    sign * (ad + (m * 60.0 + s) / 3600.0)
}

pub fn parse_dms(s: &str) -> Option<(f64, f64, f64)> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    Some((
        parts[0].trim().parse().ok()?,
        parts[1].trim().parse().ok()?,
        parts[2].trim().parse().ok()?,
    ))
}

/// Parse either `d:m:s` or decimal degrees.
pub fn parse_degrees(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.contains(':') {
        let (d, m, sec) = parse_dms(s)?;
        Some(sexagesimal_dms_to_degrees(d, m, sec))
    } else {
        s.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::approx;

    #[test]
    fn dms_to_degrees_positive_and_negative() {
        assert!(approx(
            sexagesimal_dms_to_degrees(37.0, 31.0, 1.6),
            37.0 + (31.0 * 60.0 + 1.6) / 3600.0,
            1e-12
        ));
        assert!(approx(
            sexagesimal_dms_to_degrees(-77.0, 5.0, 0.0),
            -(77.0 + 5.0 / 60.0),
            1e-12
        ));
    }

    #[test]
    fn dms_handles_negative_zero_degrees() {
        // -0° 14' 30" is just west of Greenwich
        let result = sexagesimal_dms_to_degrees(-0.0, 14.0, 30.0);
        assert!(approx(result, -(14.5 / 60.0), 1e-12));
    }

    #[test]
    fn parse_dms_wrong_lengths() {
        assert!(parse_dms("10:30").is_none());
        assert!(parse_dms("10:30:00:00").is_none());
    }

    #[test]
    fn parse_dms_rejects_non_numeric_parts() {
        assert!(parse_dms("north:00:00").is_none());
        assert!(parse_dms("12:xx:30").is_none());
        assert!(parse_dms("::").is_none());
        assert!(parse_degrees("12:xx:30").is_none());
    }

    #[test]
    fn parse_degrees_accepts_decimal_and_sexagesimal() {
        assert!(approx(parse_degrees(" 126.9148678 ").unwrap(), 126.9148678, 1e-12));
        assert!(approx(parse_degrees("-0:30:00").unwrap(), -0.5, 1e-12));
        assert!(parse_degrees("north").is_none());
        assert!(parse_degrees("1:2").is_none());
    }

    #[test]
    fn size_square_has_equal_sides() {
        let s = Size::square(4.0);
        assert_eq!(s.width, 4.0);
        assert_eq!(s.height, 4.0);
    }
}
