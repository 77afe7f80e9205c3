//! Flight physics.
//!
//! Pure geometric and kinematic helpers: great-circle distance, initial
//! bearing, and wind-adjusted ground speed. No state beyond the forecast
//! table passed in by the caller.

use crate::models::Waypoint;
use crate::weather::{Compass, WindForecast, WindSample};

/// Mean Earth radius used by the haversine formula (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Lower bound on ground speed (km/h). Keeps a strong headwind from
/// producing a zero or negative divisor in flight-time computations.
pub const MIN_EFFECTIVE_SPEED_KMH: f64 = 0.1;

/// Everything needed to fly one leg, bundled.
#[derive(Debug, Clone)]
pub struct FlightParameters {
    /// Great-circle distance (km).
    pub distance_km: f64,
    /// Initial bearing from start to end, degrees clockwise from north.
    pub bearing_deg: f64,
    /// Wind-adjusted ground speed (km/h).
    pub effective_speed_kmh: f64,
    /// Forecast wind speed at departure (km/h).
    pub wind_speed_kmh: f64,
    /// Forecast wind direction at departure.
    pub wind_direction: Compass,
}

/// Great-circle distance between two waypoints (haversine).
pub fn haversine_km(a: &Waypoint, b: &Waypoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial compass bearing from `a` to `b`, degrees in `[0, 360)`.
pub fn initial_bearing_deg(a: &Waypoint, b: &Waypoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let x = dlon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}

/// Ground speed from vector-summing the airspeed along `bearing_deg` with
/// the wind along its compass angle, floored at
/// [`MIN_EFFECTIVE_SPEED_KMH`].
pub fn effective_speed_kmh(air_speed_kmh: f64, bearing_deg: f64, wind: WindSample) -> f64 {
    let flight_rad = bearing_deg.to_radians();
    let wind_rad = wind.direction.degrees().to_radians();

    let ground_x = air_speed_kmh * flight_rad.sin() + wind.speed_kmh * wind_rad.sin();
    let ground_y = air_speed_kmh * flight_rad.cos() + wind.speed_kmh * wind_rad.cos();

    (ground_x * ground_x + ground_y * ground_y)
        .sqrt()
        .max(MIN_EFFECTIVE_SPEED_KMH)
}

/// Composes distance, bearing, and the forecast wind at departure into the
/// full parameter set for one leg.
pub fn flight_parameters(
    start: &Waypoint,
    end: &Waypoint,
    air_speed_kmh: u32,
    forecast: &WindForecast,
    day: u32,
    clock_secs: f64,
) -> FlightParameters {
    let distance_km = haversine_km(start, end);
    let bearing_deg = initial_bearing_deg(start, end);
    let wind = forecast.wind_at(day, clock_secs);
    let effective = effective_speed_kmh(air_speed_kmh as f64, bearing_deg, wind);

    FlightParameters {
        distance_km,
        bearing_deg,
        effective_speed_kmh: effective,
        wind_speed_kmh: wind.speed_kmh,
        wind_direction: wind.direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curitiba() -> Waypoint {
        Waypoint::new("82821020", -25.548, -49.238)
    }

    fn downtown() -> Waypoint {
        Waypoint::new("80010010", -25.428, -49.267)
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = curitiba();
        assert_eq!(haversine_km(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = curitiba();
        let b = downtown();
        let ab = haversine_km(&a, &b);
        let ba = haversine_km(&b, &a);
        assert!(ab > 0.0);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_distance_known_value() {
        // One degree of latitude along a meridian is ~111.19 km.
        let a = Waypoint::new("A", 0.0, 0.0);
        let b = Waypoint::new("B", 1.0, 0.0);
        assert!((haversine_km(&a, &b) - 111.19).abs() < 0.1);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Waypoint::new("O", 0.0, 0.0);
        let north = Waypoint::new("N", 1.0, 0.0);
        let east = Waypoint::new("E", 0.0, 1.0);
        let south = Waypoint::new("S", -1.0, 0.0);
        let west = Waypoint::new("W", 0.0, -1.0);

        assert!((initial_bearing_deg(&origin, &north) - 0.0).abs() < 1e-6);
        assert!((initial_bearing_deg(&origin, &east) - 90.0).abs() < 1e-6);
        assert!((initial_bearing_deg(&origin, &south) - 180.0).abs() < 1e-6);
        assert!((initial_bearing_deg(&origin, &west) - 270.0).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_always_in_range() {
        let a = curitiba();
        let b = downtown();
        for (from, to) in [(&a, &b), (&b, &a)] {
            let bearing = initial_bearing_deg(from, to);
            assert!((0.0..360.0).contains(&bearing));
        }
    }

    #[test]
    fn test_effective_speed_tailwind_and_headwind() {
        let tailwind = WindSample {
            speed_kmh: 20.0,
            direction: Compass::N,
        };
        // Flying north with a 20 km/h wind blowing north.
        let boosted = effective_speed_kmh(60.0, 0.0, tailwind);
        assert!((boosted - 80.0).abs() < 1e-6);

        let headwind = WindSample {
            speed_kmh: 20.0,
            direction: Compass::S,
        };
        let slowed = effective_speed_kmh(60.0, 0.0, headwind);
        assert!((slowed - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_effective_speed_floor() {
        let opposing = WindSample {
            speed_kmh: 60.0,
            direction: Compass::S,
        };
        // A perfectly opposing wind cancels the airspeed; the floor holds.
        let floored = effective_speed_kmh(60.0, 0.0, opposing);
        assert!(floored >= MIN_EFFECTIVE_SPEED_KMH);
    }

    #[test]
    fn test_flight_parameters_composition() {
        let forecast = WindForecast::default();
        let params = flight_parameters(&curitiba(), &downtown(), 48, &forecast, 1, 21600.0);

        assert!(params.distance_km > 0.0);
        assert!((0.0..360.0).contains(&params.bearing_deg));
        assert!(params.effective_speed_kmh >= MIN_EFFECTIVE_SPEED_KMH);
        assert_eq!(params.wind_speed_kmh, 17.0);
        assert_eq!(params.wind_direction, Compass::ENE);
    }
}
