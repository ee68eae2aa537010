mod config;
mod data;
mod engine;
mod error;
mod layout;
mod placement;
mod projection;
mod schedule;
mod types;

use crate::config::{MapConfig, ProjectionBound};
use crate::data::load_locations;
use crate::placement::MapContext;
use crate::projection::ProjectionMethod;
use crate::types::{Offsets, Size};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};

#[derive(Parser, Debug)]
#[command(name = "mapmark")]
#[command(
    about = "Place animated markers on world-map images by geographic coordinate",
    version
)]
struct Args {
    /// Map projection of the image: gall-stereographic, mercator or equirectangular
    #[arg(long, default_value = "gall-stereographic")]
    projection: String,

    /// Latitude offset of the map image in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    lat_offset: f64,

    /// Longitude offset of the map image in degrees (e.g. 180 for a Pacific-centered map)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    lng_offset: f64,

    /// Region the image depicts as "min_lat,max_lat,min_lng,max_lng"
    #[arg(long, default_value = "-85,85,-180,180", allow_hyphen_values = true)]
    bound: String,

    /// Image width in pixels; height follows from the projection
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Marker width and height in pixels
    #[arg(long, default_value_t = 4.0)]
    marker_size: f64,

    /// Delay between consecutive markers starting their animation, in ms
    #[arg(long, default_value_t = 300)]
    interval: u64,

    /// Repeat period of every marker animation, in ms
    #[arg(long, default_value_t = 1000)]
    repeat_interval: u64,

    /// CSV of marker locations (name,lat,lng); embedded sample cities if omitted
    #[arg(long)]
    locations: Option<String>,

    /// Print every animation start before this many ms instead of marker placements
    #[arg(long)]
    timeline: Option<u64>,

    /// Output CSV path; stdout if omitted
    #[arg(short = 'o', long = "out")]
    out: Option<String>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn parse_bound(s: &str) -> Result<ProjectionBound> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("bound must be four numbers: {s}"))?;
    let [min_lat, max_lat, min_lng, max_lng] = parts[..] else {
        return Err(anyhow!("bound must be four numbers: {s}"));
    };
    Ok(ProjectionBound::new(min_lat, max_lat, min_lng, max_lng)?)
}

fn build_config(args: &Args) -> Result<MapConfig> {
    let projection: ProjectionMethod = args.projection.parse()?;
    if !(args.width.is_finite() && args.width > 0.0) {
        return Err(anyhow!("width must be positive: {}", args.width));
    }
    let cfg = MapConfig {
        projection,
        bound: parse_bound(&args.bound)?,
        offsets: Offsets {
            lat_deg: args.lat_offset,
            lng_deg: args.lng_offset,
        },
        width: args.width,
        marker_size: Size::square(args.marker_size),
        animation_interval_ms: args.interval,
        animation_repeat_interval_ms: args.repeat_interval,
    };
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let cfg = build_config(&args)?;
    debug!("{cfg:?}");

    let markers = load_locations(args.locations.as_deref()).with_context(|| {
        format!(
            "reading {}",
            args.locations.as_deref().unwrap_or("embedded locations")
        )
    })?;

    let ctx = MapContext::new(&markers, cfg);
    let out: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {path}"))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let written = match args.timeline {
        Some(until_ms) => ctx.write_timeline_csv(out, until_ms),
        None => ctx.write_csv(out),
    };
    written.with_context(|| format!("writing {}", args.out.as_deref().unwrap_or("stdout")))?;

    Ok(())
}

#[cfg(test)]
mod test_utils;
