//! Waypoint model.
//!
//! A waypoint is a named geographic coordinate the drone must photograph.
//! One waypoint per run is distinguished as the depot: the mandatory start
//! and end point of every route. The depot is chosen by the caller, not by
//! any special identifier value.

use serde::{Deserialize, Serialize};

/// A survey waypoint.
///
/// The identifier is unique within a run; equality of waypoints follows
/// identifier equality for routing purposes, but the derived `PartialEq`
/// compares all fields (two rows with the same id and different coordinates
/// are rejected earlier, by input validation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Unique waypoint identifier (e.g., a postal code).
    pub id: String,
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    pub longitude: f64,
}

impl Waypoint {
    /// Creates a new waypoint.
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }
}
