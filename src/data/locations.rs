use anyhow::{anyhow, Result};
use csv::{Reader, ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;

use crate::types::{parse_degrees, GeoCoordinate, Marker};

// Embed the sample marker set
pub const LOCATIONS_CSV: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/locations.csv"));

#[derive(Debug, Deserialize)]
struct LocationRow {
    name: String,
    lat: String,
    lng: String,
}

fn parse_locations_from_reader<R: std::io::Read>(mut rdr: Reader<R>) -> Result<Vec<Marker>> {
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize().enumerate() {
        let row: LocationRow = rec?;
        // Header is line 1
        let line = i + 2;
        let lat_deg = parse_degrees(&row.lat)
            .ok_or_else(|| anyhow!("line {line}: bad latitude '{}'", row.lat))?;
        let lng_deg = parse_degrees(&row.lng)
            .ok_or_else(|| anyhow!("line {line}: bad longitude '{}'", row.lng))?;
        out.push(Marker {
            name: row.name,
            coords: GeoCoordinate::new(lat_deg, lng_deg),
        });
    }
    debug!("parsed {} marker locations", out.len());
    Ok(out)
}

/// Load marker locations from `path`, or the embedded sample set.
pub fn load_locations(path: Option<&str>) -> Result<Vec<Marker>> {
    if let Some(p) = path {
        let rdr = ReaderBuilder::new().trim(Trim::All).from_path(p)?;
        parse_locations_from_reader(rdr)
    } else {
        let rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(LOCATIONS_CSV.as_bytes());
        parse_locations_from_reader(rdr)
    }
}
