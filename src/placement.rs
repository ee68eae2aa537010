use anyhow::Result;
use log::{info, warn};
use serde::Serialize;
use std::io::Write;

use crate::config::MapConfig;
use crate::engine::{center_ratio, MAX_CENTER_RATIO, MIN_CENTER_RATIO};
use crate::layout::MapLayout;
use crate::schedule::AnimationSchedule;
use crate::types::Marker;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub name: String,
    pub start_ms: u64,
}

/// One output row: where a marker goes and when it animates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub px_x: f64,
    pub px_y: f64,
    pub frame_x: f64,
    pub frame_y: f64,
    pub start_ms: u64,
    pub repeat_ms: u64,
}

pub struct MapContext<'a> {
    pub markers: &'a [Marker],
    pub cfg: MapConfig,
    pub layout: MapLayout,
    pub schedule: AnimationSchedule,
}

impl<'a> MapContext<'a> {
    pub fn new(markers: &'a [Marker], cfg: MapConfig) -> Self {
        let layout = MapLayout::from(&cfg);
        let schedule = AnimationSchedule::from(&cfg);
        Self {
            markers,
            cfg,
            layout,
            schedule,
        }
    }

    pub fn placements(&self) -> Vec<Placement> {
        self.markers
            .iter()
            .enumerate()
            .map(|(i, marker)| {
                let ratio = center_ratio(
                    &self.cfg.projection,
                    marker.coords,
                    self.cfg.offsets,
                    &self.cfg.bound,
                );
                let on_edge = |v: f64| v <= MIN_CENTER_RATIO || v >= MAX_CENTER_RATIO;
                if on_edge(ratio.x) || on_edge(ratio.y) {
                    warn!("marker '{}' falls on or outside the map edge", marker.name);
                }
                let px = self.layout.to_pixels(ratio);
                let frame = self.layout.marker_origin(ratio);
                let timing = self.schedule.timing(i);
                Placement {
                    name: marker.name.clone(),
                    lat: marker.coords.lat_deg,
                    lng: marker.coords.lng_deg,
                    center_x: ratio.x,
                    center_y: ratio.y,
                    px_x: px.x,
                    px_y: px.y,
                    frame_x: frame.x,
                    frame_y: frame.y,
                    start_ms: timing.first_start_ms,
                    repeat_ms: timing.repeat_ms,
                }
            })
            .collect()
    }

    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        info!(
            "placing {} markers on a {:.0}x{:.0} {} map (height/width {:.4})",
            self.markers.len(),
            self.layout.width,
            self.layout.height,
            self.cfg.projection,
            self.layout.aspect_ratio
        );
        let mut wtr = csv::Writer::from_writer(out);
        for row in self.placements() {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Every animation start before `until_ms`, in time order. Lazy, so an
    /// unbounded horizon is fine as long as the consumer stops.
    pub fn timeline(&self, until_ms: u64) -> impl Iterator<Item = TimelineEntry> + '_ {
        self.schedule
            .merged_starts(self.markers.len(), until_ms)
            .map(move |(i, start_ms)| TimelineEntry {
                name: self.markers[i].name.clone(),
                start_ms,
            })
    }

    pub fn write_timeline_csv<W: Write>(&self, out: W, until_ms: u64) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(out);
        let mut rows = 0u64;
        for entry in self.timeline(until_ms) {
            wtr.serialize(entry)?;
            rows += 1;
        }
        wtr.flush()?;
        info!("{rows} animation starts before {until_ms} ms");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_locations;
    use crate::test_utils::{approx, make_config};
    use crate::types::{GeoCoordinate, Offsets};

    #[test]
    fn sample_cities_are_staggered_and_placed() {
        let markers = load_locations(None).unwrap();
        let ctx = MapContext::new(
            &markers,
            make_config(|cfg| {
                cfg.animation_interval_ms = 1000;
                cfg.animation_repeat_interval_ms = 4000;
            }),
        );
        let rows = ctx.placements();
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows.iter().map(|r| r.start_ms).collect::<Vec<_>>(),
            vec![0, 1000, 2000, 3000]
        );
        assert!(rows.iter().all(|r| r.repeat_ms == 4000));

        // Seoul: east of and north of center
        let seoul = &rows[0];
        assert!(approx(seoul.center_x, 1.705082598888889, 1e-12));
        assert!(approx(seoul.center_y, 0.6293689146684902, 1e-12));
        assert!(approx(seoul.px_x, seoul.center_x * 500.0, 1e-9));

        // London sits just west of the prime meridian
        assert!(rows[1].center_x < 1.0 && rows[1].center_x > 0.99);
    }

    #[test]
    fn longitude_offset_recenters_map() {
        let markers = vec![Marker {
            name: "Greenwich".into(),
            coords: GeoCoordinate::new(0.0, 0.0),
        }];
        let ctx = MapContext::new(
            &markers,
            make_config(|cfg| {
                cfg.offsets = Offsets {
                    lat_deg: 0.0,
                    lng_deg: 180.0,
                }
            }),
        );
        let row = &ctx.placements()[0];
        assert!(approx(row.center_x, 2.0, 1e-12));
        assert!(approx(row.center_y, 1.0, 1e-12));
    }

    #[test]
    fn csv_has_header_and_one_row_per_marker() {
        let markers = load_locations(None).unwrap();
        let ctx = MapContext::new(&markers, make_config(|_| {}));
        let mut buf = Vec::new();
        ctx.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("name,lat,lng,center_x,center_y,px_x,px_y,frame_x,frame_y,start_ms,repeat_ms")
        );
        assert_eq!(lines.count(), 4);
        assert!(text.contains("\nTokyo,"));
    }

    #[test]
    fn timeline_interleaves_markers_in_time_order() {
        let markers = load_locations(None).unwrap();
        let ctx = MapContext::new(
            &markers,
            make_config(|cfg| {
                cfg.animation_interval_ms = 800;
                cfg.animation_repeat_interval_ms = 2000;
            }),
        );
        let got: Vec<(String, u64)> = ctx
            .timeline(2500)
            .map(|e| (e.name, e.start_ms))
            .collect();
        let want: Vec<(String, u64)> = [
            ("Seoul", 0),
            ("London", 800),
            ("Washington", 1600),
            ("Seoul", 2000),
            ("Tokyo", 2400),
        ]
        .into_iter()
        .map(|(n, t)| (n.to_string(), t))
        .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn timeline_with_unbounded_horizon_streams() {
        let markers = load_locations(None).unwrap();
        let ctx = MapContext::new(
            &markers,
            make_config(|cfg| {
                cfg.animation_interval_ms = 1;
                cfg.animation_repeat_interval_ms = 1;
            }),
        );
        let starts: Vec<u64> = ctx.timeline(u64::MAX).take(8).map(|e| e.start_ms).collect();
        assert_eq!(starts, vec![0, 1, 1, 2, 2, 2, 3, 3]);
    }

    #[test]
    fn timeline_csv_has_header() {
        let markers = load_locations(None).unwrap();
        let ctx = MapContext::new(&markers, make_config(|_| {}));
        let mut buf = Vec::new();
        ctx.write_timeline_csv(&mut buf, 1).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "name,start_ms\nSeoul,0\n");
    }
}
