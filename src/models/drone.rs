//! Vehicle model.
//!
//! Captures the physical envelope of the survey drone: the legal discrete
//! airspeed range, the battery autonomy law, and the fixed per-leg stop
//! penalty. Battery capacity is expressed in seconds of flight at a given
//! airspeed rather than watt-hours; consuming energy and spending time are
//! the same quantity at the reference speed.
//!
//! # Autonomy law
//!
//! Autonomy degrades quadratically as airspeed rises above the reference
//! speed:
//!
//! `autonomy(v) = base_autonomy × (reference / v)²`

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The survey drone's physical and economic parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    /// Slowest legal airspeed (km/h).
    pub min_speed: u32,
    /// Fastest legal airspeed (km/h).
    pub max_speed: u32,
    /// Spacing between legal airspeeds (km/h).
    pub speed_step: u32,
    /// Airspeed at which `base_autonomy_secs` applies (km/h).
    pub reference_speed: u32,
    /// Battery time-to-empty at the reference speed (seconds).
    pub base_autonomy_secs: f64,
    /// Mandatory stop duration per leg, for photos (seconds). Drains the
    /// battery and advances the clock once per leg; a recharge stop pays it
    /// again.
    pub stop_penalty_secs: f64,
    /// Monetary fee for a recharge stop that starts after the late-fee
    /// threshold.
    pub recharge_fee: f64,
}

impl Default for Drone {
    fn default() -> Self {
        Self {
            min_speed: 36,
            max_speed: 96,
            speed_step: 4,
            reference_speed: 36,
            base_autonomy_secs: 5000.0 * 0.93,
            stop_penalty_secs: 72.0,
            recharge_fee: 80.0,
        }
    }
}

impl Drone {
    /// Battery time-to-empty in seconds at a constant airspeed.
    ///
    /// Fails for speeds outside `[min_speed, max_speed]`.
    pub fn autonomy(&self, speed: u32) -> Result<f64, Error> {
        if speed < self.min_speed || speed > self.max_speed {
            return Err(Error::InvalidSpeed {
                speed,
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        let ratio = self.reference_speed as f64 / speed as f64;
        Ok(self.base_autonomy_secs * ratio * ratio)
    }

    /// Battery seconds drained to cover `distance_km` at airspeed `speed`.
    ///
    /// Infinite for zero speed, which downstream treats as battery
    /// exhaustion.
    pub fn energy_consumption(&self, distance_km: f64, speed: u32) -> f64 {
        if speed == 0 {
            return f64::INFINITY;
        }
        (distance_km / speed as f64) * 3600.0
    }

    /// Seconds to cover `distance_km` at ground speed `effective_speed_kmh`.
    pub fn flight_time(&self, distance_km: f64, effective_speed_kmh: f64) -> f64 {
        if effective_speed_kmh == 0.0 {
            return f64::INFINITY;
        }
        (distance_km / effective_speed_kmh) * 3600.0
    }

    /// All legal airspeeds, from `min_speed` to `max_speed` inclusive in
    /// `speed_step` increments.
    pub fn available_speeds(&self) -> Vec<u32> {
        (self.min_speed..=self.max_speed)
            .step_by(self.speed_step as usize)
            .collect()
    }

    /// Whether `speed` is within range and on the discrete grid.
    pub fn is_legal_speed(&self, speed: u32) -> bool {
        speed >= self.min_speed && speed <= self.max_speed && speed % self.speed_step == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autonomy_at_reference_speed() {
        let drone = Drone::default();
        let autonomy = drone.autonomy(36).unwrap();
        assert!((autonomy - 4650.0).abs() < 1.0);
    }

    #[test]
    fn test_autonomy_quadratic_law() {
        let drone = Drone::default();
        let reference = drone.autonomy(drone.reference_speed).unwrap();
        for speed in drone.available_speeds() {
            let expected = reference * (36.0 / speed as f64).powi(2);
            assert!((drone.autonomy(speed).unwrap() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_autonomy_decreases_with_speed() {
        let drone = Drone::default();
        let speeds = drone.available_speeds();
        for pair in speeds.windows(2) {
            assert!(drone.autonomy(pair[0]).unwrap() > drone.autonomy(pair[1]).unwrap());
        }
    }

    #[test]
    fn test_autonomy_rejects_out_of_range_speed() {
        let drone = Drone::default();
        assert!(drone.autonomy(35).is_err());
        assert!(drone.autonomy(97).is_err());
        assert!(drone.autonomy(0).is_err());
    }

    #[test]
    fn test_energy_consumption() {
        let drone = Drone::default();
        // 10 km at 36 km/h = 1000 seconds of battery.
        assert!((drone.energy_consumption(10.0, 36) - 1000.0).abs() < 1.0);
        assert_eq!(drone.energy_consumption(10.0, 0), f64::INFINITY);
    }

    #[test]
    fn test_flight_time() {
        let drone = Drone::default();
        assert!((drone.flight_time(57.0, 57.0) - 3600.0).abs() < 1e-9);
        assert_eq!(drone.flight_time(10.0, 0.0), f64::INFINITY);
    }

    #[test]
    fn test_available_speeds() {
        let drone = Drone::default();
        let speeds = drone.available_speeds();
        assert_eq!(speeds.first(), Some(&36));
        assert_eq!(speeds.last(), Some(&96));
        assert!(speeds.iter().all(|s| s % 4 == 0));
        assert_eq!(speeds.len(), 16);
    }

    #[test]
    fn test_is_legal_speed() {
        let drone = Drone::default();
        assert!(drone.is_legal_speed(36));
        assert!(drone.is_legal_speed(40));
        assert!(drone.is_legal_speed(96));
        assert!(!drone.is_legal_speed(35));
        assert!(!drone.is_legal_speed(38));
        assert!(!drone.is_legal_speed(100));
    }
}
