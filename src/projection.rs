use crate::error::ProjectionError;
use crate::types::PlanarPoint;
use phf::phf_map;
use std::f64::consts::{FRAC_PI_4, PI, SQRT_2};
use std::fmt;
use std::str::FromStr;

/// A cylindrical map projection from (longitude, latitude) in radians onto a
/// plane. Implementations must be odd in both arguments and map (0, 0) to the
/// origin.
pub trait Projection {
    fn project(&self, radius: f64, lng_rad: f64, lat_rad: f64) -> PlanarPoint;

    /// Largest |latitude| in degrees the projection maps to a finite point.
    fn max_lat_deg(&self) -> f64 {
        90.0
    }

    /// Planar width of the full 360° longitude span at radius 1.
    fn full_width(&self) -> f64 {
        self.project(1.0, PI, 0.0).x - self.project(1.0, -PI, 0.0).x
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GallStereographic;

impl Projection for GallStereographic {
    fn project(&self, radius: f64, lng_rad: f64, lat_rad: f64) -> PlanarPoint {
        PlanarPoint {
            x: lng_rad * radius / SQRT_2,
            y: radius * (1.0 + SQRT_2 / 2.0) * (lat_rad / 2.0).tan(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mercator;

// Latitude at which the Web Mercator square closes
const MERCATOR_MAX_LAT_DEG: f64 = 85.05112877980659;

impl Projection for Mercator {
    fn project(&self, radius: f64, lng_rad: f64, lat_rad: f64) -> PlanarPoint {
        PlanarPoint {
            x: lng_rad * radius,
            y: radius * (FRAC_PI_4 + lat_rad / 2.0).tan().ln(),
        }
    }

    fn max_lat_deg(&self) -> f64 {
        MERCATOR_MAX_LAT_DEG
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Equirectangular;

impl Projection for Equirectangular {
    fn project(&self, radius: f64, lng_rad: f64, lat_rad: f64) -> PlanarPoint {
        PlanarPoint {
            x: lng_rad * radius,
            y: lat_rad * radius,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectionMethod {
    #[default]
    GallStereographic,
    Mercator,
    Equirectangular,
}

static PROJECTION_NAMES: phf::Map<&'static str, ProjectionMethod> = phf_map! {
    "gall" => ProjectionMethod::GallStereographic,
    "gall-stereographic" => ProjectionMethod::GallStereographic,
    "mercator" => ProjectionMethod::Mercator,
    "equirectangular" => ProjectionMethod::Equirectangular,
    "plate-carree" => ProjectionMethod::Equirectangular,
};

impl ProjectionMethod {
    pub fn name(self) -> &'static str {
        match self {
            Self::GallStereographic => "gall-stereographic",
            Self::Mercator => "mercator",
            Self::Equirectangular => "equirectangular",
        }
    }
}

impl Projection for ProjectionMethod {
    fn project(&self, radius: f64, lng_rad: f64, lat_rad: f64) -> PlanarPoint {
        match self {
            Self::GallStereographic => GallStereographic.project(radius, lng_rad, lat_rad),
            Self::Mercator => Mercator.project(radius, lng_rad, lat_rad),
            Self::Equirectangular => Equirectangular.project(radius, lng_rad, lat_rad),
        }
    }

    fn max_lat_deg(&self) -> f64 {
        match self {
            Self::GallStereographic => GallStereographic.max_lat_deg(),
            Self::Mercator => Mercator.max_lat_deg(),
            Self::Equirectangular => Equirectangular.max_lat_deg(),
        }
    }
}

impl FromStr for ProjectionMethod {
    type Err = ProjectionError;

    /// Case-insensitive; `_` and spaces count as `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");
        PROJECTION_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ProjectionError::UnsupportedProjection(s.to_string()))
    }
}

impl fmt::Display for ProjectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
