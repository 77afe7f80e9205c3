//! Itinerary (decoded solution) model.
//!
//! An itinerary is what a chromosome's genes mean physically: one record per
//! flown leg plus the run totals the optimizer scores. It is produced by the
//! route simulation and consumed both by fitness evaluation and by the CSV
//! exporter, so the two always agree on days, recharges, and cost.

use crate::models::Waypoint;

/// One directed hop between two consecutive route waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLeg {
    /// Departure waypoint.
    pub start: Waypoint,
    /// Arrival waypoint.
    pub end: Waypoint,
    /// Flight day at leg start (1-based).
    pub day: u32,
    /// Clock at leg start, seconds since midnight.
    pub start_clock_secs: f64,
    /// Clock after the flight and the mandatory stop, seconds since
    /// midnight.
    pub end_clock_secs: f64,
    /// Commanded airspeed for the leg (km/h).
    pub speed_kmh: u32,
    /// Whether the drone landed to recharge before flying this leg.
    pub landing: bool,
}

impl FlightLeg {
    /// Leg start clock as `HH:MM:SS`.
    pub fn start_time(&self) -> String {
        format_clock(self.start_clock_secs)
    }

    /// Leg end clock as `HH:MM:SS`.
    pub fn end_time(&self) -> String {
        format_clock(self.end_clock_secs)
    }
}

/// A fully decoded route: per-leg records plus run totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// One record per leg, in flight order.
    pub legs: Vec<FlightLeg>,
    /// Accumulated airborne time (seconds).
    pub total_flight_time_secs: f64,
    /// Recharge fees plus hourly operating cost.
    pub total_cost: f64,
    /// Number of recharge landings.
    pub num_recharges: u32,
    /// Day counter when the final leg completed (1-based).
    pub days_used: u32,
}

/// Formats seconds-since-midnight as `HH:MM:SS`, truncating fractions.
pub fn format_clock(secs: f64) -> String {
    let total = secs as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(21600.0), "06:00:00");
        assert_eq!(format_clock(61200.0), "17:00:00");
        assert_eq!(format_clock(68399.9), "18:59:59");
        assert_eq!(format_clock(0.0), "00:00:00");
    }

    #[test]
    fn test_leg_times() {
        let leg = FlightLeg {
            start: Waypoint::new("A", -25.5, -49.2),
            end: Waypoint::new("B", -25.4, -49.3),
            day: 1,
            start_clock_secs: 21600.0,
            end_clock_secs: 25272.5,
            speed_kmh: 48,
            landing: false,
        };
        assert_eq!(leg.start_time(), "06:00:00");
        assert_eq!(leg.end_time(), "07:01:12");
    }
}
