use crate::config::ProjectionBound;
use crate::error::ProjectionError;
use crate::projection::Projection;
use crate::types::{CenterRatio, GeoCoordinate, Offsets, PlanarPoint};
use std::f64::consts::{FRAC_PI_2, PI};

/// Smallest center ratio handed out. Layout multipliers of exactly 0 are
/// rejected by the consumers of these ratios.
pub const MIN_CENTER_RATIO: f64 = 0.00001;
pub const MAX_CENTER_RATIO: f64 = 2.0;

#[inline]
fn clamp_ratio(v: f64) -> f64 {
    // min/max rather than f64::clamp: a NaN collapses to the upper edge
    v.min(MAX_CENTER_RATIO).max(MIN_CENTER_RATIO)
}

/// Height/width ratio of an image spanning `bound` under `projection`.
///
/// Projects the (max_lat, max_long) and (min_lat, min_long) corners at radius 1
/// and divides the planar spans.
pub fn width_height_ratio<P: Projection + ?Sized>(projection: &P, bound: &ProjectionBound) -> f64 {
    let max = project_to_plane(
        projection,
        1.0,
        GeoCoordinate::new(bound.max_lat(), bound.max_long()),
    );
    let min = project_to_plane(
        projection,
        1.0,
        GeoCoordinate::new(bound.min_lat(), bound.min_long()),
    );
    (max.y - min.y).abs() / (max.x - min.x).abs()
}

/// Reject a bound that leaves the projection's domain or yields a degenerate
/// aspect ratio.
pub fn check_bound<P: Projection + ?Sized>(
    projection: &P,
    bound: &ProjectionBound,
) -> Result<(), ProjectionError> {
    let max_lat = projection.max_lat_deg();
    let ratio = width_height_ratio(projection, bound);
    if bound.min_lat() < -max_lat
        || bound.max_lat() > max_lat
        || !ratio.is_finite()
        || ratio <= 0.0
    {
        return Err(ProjectionError::InvalidBound {
            min_lat: bound.min_lat(),
            max_lat: bound.max_lat(),
            min_long: bound.min_long(),
            max_long: bound.max_long(),
        });
    }
    Ok(())
}

/// Project a coordinate in degrees, without offsets or wraparound.
pub fn project_to_plane<P: Projection + ?Sized>(
    projection: &P,
    radius: f64,
    coords: GeoCoordinate,
) -> PlanarPoint {
    let lng_rad = coords.lng_deg * PI / 180.0;
    let lat_rad = coords.lat_deg * PI / 180.0;
    projection.project(radius, lng_rad, lat_rad)
}

/// Apply the offsets and return `(lng_rad, lat_rad)`.
///
/// Values outside ±180° longitude or ±90° latitude are wrapped once with a
/// truncating remainder. Negative overflow therefore stays below -π (or
/// -π/2); the center-ratio clamp absorbs that.
pub fn radians_with_offset(coords: GeoCoordinate, offsets: Offsets) -> (f64, f64) {
    let lng = coords.lng_deg + offsets.lng_deg;
    let lat = coords.lat_deg + offsets.lat_deg;

    let mut lng_rad = lng * PI / 180.0;
    let mut lat_rad = lat * PI / 180.0;

    if !(-180.0..=180.0).contains(&lng) {
        lng_rad = (lng_rad + PI) % (2.0 * PI) - PI;
    }
    if !(-90.0..=90.0).contains(&lat) {
        lat_rad = (lat_rad + FRAC_PI_2) % PI - FRAC_PI_2;
    }

    (lng_rad, lat_rad)
}

/// Where a marker for `coords` sits on an image spanning `bound`, as a pair of
/// center multipliers in `[MIN_CENTER_RATIO, 2]`.
pub fn center_ratio<P: Projection + ?Sized>(
    projection: &P,
    coords: GeoCoordinate,
    offsets: Offsets,
    bound: &ProjectionBound,
) -> CenterRatio {
    let (lng_rad, lat_rad) = radians_with_offset(coords, offsets);
    let ratio = width_height_ratio(projection, bound);
    let full_width = projection.full_width();

    // Both in 0..1 with 0.5 at the image center
    let p = projection.project(1.0, lng_rad, lat_rad);
    let center_x = p.x / full_width + 0.5;
    let center_y = 0.5 - p.y / (full_width * ratio);

    CenterRatio {
        x: clamp_ratio(center_x * 2.0),
        y: clamp_ratio(center_y * 2.0),
    }
}
