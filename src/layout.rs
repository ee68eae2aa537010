use crate::config::MapConfig;
use crate::engine::width_height_ratio;
use crate::types::{CenterRatio, PlanarPoint, Size};

/// Concrete pixel geometry of the map image: the image spans the full
/// configured width and takes its height from the projection's aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct MapLayout {
    pub width: f64,
    pub height: f64,
    pub aspect_ratio: f64,
    pub marker_size: Size,
}

impl From<&MapConfig> for MapLayout {
    fn from(cfg: &MapConfig) -> Self {
        let aspect_ratio = width_height_ratio(&cfg.projection, &cfg.bound);
        Self {
            width: cfg.width,
            height: cfg.width * aspect_ratio,
            aspect_ratio,
            marker_size: cfg.marker_size,
        }
    }
}

impl MapLayout {
    /// A center multiplier `m` puts the marker center at `m` half-sizes from
    /// the leading/top edge.
    #[inline]
    pub fn to_pixels(&self, ratio: CenterRatio) -> PlanarPoint {
        PlanarPoint {
            x: ratio.x * self.width / 2.0,
            y: ratio.y * self.height / 2.0,
        }
    }

    /// Top-left corner of a marker frame centered on `ratio`.
    pub fn marker_origin(&self, ratio: CenterRatio) -> PlanarPoint {
        let c = self.to_pixels(ratio);
        PlanarPoint {
            x: c.x - self.marker_size.width / 2.0,
            y: c.y - self.marker_size.height / 2.0,
        }
    }
}
