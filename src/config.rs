use crate::engine::check_bound;
use crate::error::ProjectionError;
use crate::projection::ProjectionMethod;
use crate::types::{Offsets, Size};

/// Lat/long rectangle the map image depicts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionBound {
    min_lat: f64,
    max_lat: f64,
    min_long: f64,
    max_long: f64,
}

impl ProjectionBound {
    pub fn new(
        min_lat: f64,
        max_lat: f64,
        min_long: f64,
        max_long: f64,
    ) -> Result<Self, ProjectionError> {
        let finite = [min_lat, max_lat, min_long, max_long]
            .iter()
            .all(|v| v.is_finite());
        let on_globe = (-90.0..=90.0).contains(&min_lat) && (-90.0..=90.0).contains(&max_lat);
        if !finite || !on_globe || min_lat >= max_lat || min_long >= max_long {
            return Err(ProjectionError::InvalidBound {
                min_lat,
                max_lat,
                min_long,
                max_long,
            });
        }
        Ok(Self {
            min_lat,
            max_lat,
            min_long,
            max_long,
        })
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }
    pub fn min_long(&self) -> f64 {
        self.min_long
    }
    pub fn max_long(&self) -> f64 {
        self.max_long
    }
}

// ±85° latitude: Gall and Mercator both diverge towards the poles.
impl Default for ProjectionBound {
    fn default() -> Self {
        Self {
            min_lat: -85.0,
            max_lat: 85.0,
            min_long: -180.0,
            max_long: 180.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MapConfig {
    pub projection: ProjectionMethod,
    pub bound: ProjectionBound,
    pub offsets: Offsets,
    pub width: f64,
    pub marker_size: Size,
    pub animation_interval_ms: u64,
    pub animation_repeat_interval_ms: u64,
}
impl Default for MapConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionMethod::GallStereographic,
            bound: ProjectionBound::default(),
            offsets: Offsets::default(),
            width: 1000.0,
            marker_size: Size::square(4.0),
            animation_interval_ms: 300,
            animation_repeat_interval_ms: 1000,
        }
    }
}

impl MapConfig {
    /// The bound must lie inside the projection's finite domain.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        check_bound(&self.projection, &self.bound)
    }
}
