//! Tabular storage: waypoint loading and itinerary export.
//!
//! Waypoints arrive as a CSV table with `id`, `latitude`, and `longitude`
//! columns. The finished itinerary leaves as one CSV row per leg, flattened
//! from the decoded [`Itinerary`].

use std::path::Path;

use serde::Serialize;

use crate::error::Error;
use crate::models::{Itinerary, Waypoint};

/// One exported itinerary row.
#[derive(Debug, Serialize)]
struct LegRow<'a> {
    start_id: &'a str,
    start_latitude: f64,
    start_longitude: f64,
    flight_day: u32,
    start_time: String,
    speed_kmh: u32,
    landing: &'static str,
    end_id: &'a str,
    end_latitude: f64,
    end_longitude: f64,
    end_time: String,
}

/// Loads the waypoint table from a CSV file.
///
/// A missing or unreadable file surfaces as an error; the caller reports it
/// and aborts before optimization starts.
pub fn load_waypoints(path: impl AsRef<Path>) -> Result<Vec<Waypoint>, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut waypoints = Vec::new();
    for record in reader.deserialize() {
        let waypoint: Waypoint = record?;
        waypoints.push(waypoint);
    }
    Ok(waypoints)
}

/// Writes the decoded itinerary as one CSV row per leg.
pub fn write_itinerary(path: impl AsRef<Path>, itinerary: &Itinerary) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for leg in &itinerary.legs {
        writer.serialize(LegRow {
            start_id: &leg.start.id,
            start_latitude: leg.start.latitude,
            start_longitude: leg.start.longitude,
            flight_day: leg.day,
            start_time: leg.start_time(),
            speed_kmh: leg.speed_kmh,
            landing: if leg.landing { "yes" } else { "no" },
            end_id: &leg.end.id,
            end_latitude: leg.end.latitude,
            end_longitude: leg.end.longitude,
            end_time: leg.end_time(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
