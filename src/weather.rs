//! Wind forecast model.
//!
//! A static table mapping (flight day, 3-hour slot) to a forecast wind
//! sample. Lookups round the clock to the nearest hour (minutes below 30
//! round down, 30 and above round up); any (day, hour) pair the table does
//! not define falls back to [`DEFAULT_WIND`].
//!
//! Directions use the 16-point compass rose, 22.5° apart.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 16-point compass rose. Variants are declared clockwise from north, so
/// each sits `22.5° × index` from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compass {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

const COMPASS_NAMES: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const COMPASS_POINTS: [Compass; 16] = [
    Compass::N,
    Compass::NNE,
    Compass::NE,
    Compass::ENE,
    Compass::E,
    Compass::ESE,
    Compass::SE,
    Compass::SSE,
    Compass::S,
    Compass::SSW,
    Compass::SW,
    Compass::WSW,
    Compass::W,
    Compass::WNW,
    Compass::NW,
    Compass::NNW,
];

impl Compass {
    /// Angle from north in degrees, clockwise.
    pub fn degrees(self) -> f64 {
        self as usize as f64 * 22.5
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(COMPASS_NAMES[*self as usize])
    }
}

impl FromStr for Compass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COMPASS_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .map(|idx| COMPASS_POINTS[idx])
            .ok_or_else(|| format!("unknown compass direction '{s}'"))
    }
}

/// One forecast entry: wind speed and the direction it blows toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    /// Wind speed (km/h).
    pub speed_kmh: f64,
    /// Wind direction on the 16-point rose.
    pub direction: Compass,
}

/// Fallback for lookups outside the defined table: 15 km/h from the east.
pub const DEFAULT_WIND: WindSample = WindSample {
    speed_kmh: 15.0,
    direction: Compass::E,
};

/// Static wind forecast, keyed by (day 1-7, slot hour).
#[derive(Debug, Clone)]
pub struct WindForecast {
    table: HashMap<(u32, u32), WindSample>,
}

/// Seven days of forecast at the six 3-hour slots of the flyable day:
/// (day, hour, speed km/h, direction).
const FORECAST_TABLE: [(u32, u32, f64, Compass); 42] = [
    (1, 6, 17.0, Compass::ENE),
    (1, 9, 18.0, Compass::E),
    (1, 12, 19.0, Compass::E),
    (1, 15, 19.0, Compass::E),
    (1, 18, 20.0, Compass::E),
    (1, 21, 20.0, Compass::E),
    (2, 6, 20.0, Compass::E),
    (2, 9, 19.0, Compass::E),
    (2, 12, 16.0, Compass::E),
    (2, 15, 19.0, Compass::E),
    (2, 18, 21.0, Compass::E),
    (2, 21, 21.0, Compass::E),
    (3, 6, 15.0, Compass::ENE),
    (3, 9, 17.0, Compass::NE),
    (3, 12, 8.0, Compass::NE),
    (3, 15, 20.0, Compass::E),
    (3, 18, 16.0, Compass::E),
    (3, 21, 15.0, Compass::ENE),
    (4, 6, 8.0, Compass::ENE),
    (4, 9, 11.0, Compass::ENE),
    (4, 12, 7.0, Compass::NE),
    (4, 15, 6.0, Compass::NE),
    (4, 18, 11.0, Compass::E),
    (4, 21, 11.0, Compass::E),
    (5, 6, 3.0, Compass::WSW),
    (5, 9, 3.0, Compass::WSW),
    (5, 12, 7.0, Compass::WSW),
    (5, 15, 7.0, Compass::SSW),
    (5, 18, 10.0, Compass::E),
    (5, 21, 11.0, Compass::ENE),
    (6, 6, 4.0, Compass::NE),
    (6, 9, 5.0, Compass::ENE),
    (6, 12, 4.0, Compass::NE),
    (6, 15, 8.0, Compass::E),
    (6, 18, 15.0, Compass::E),
    (6, 21, 15.0, Compass::E),
    (7, 6, 5.0, Compass::NE),
    (7, 9, 6.0, Compass::ENE),
    (7, 12, 5.0, Compass::NE),
    (7, 15, 9.0, Compass::E),
    (7, 18, 16.0, Compass::E),
    (7, 21, 16.0, Compass::E),
];

impl Default for WindForecast {
    /// The planning exercise's fixed 7-day forecast.
    fn default() -> Self {
        let table = FORECAST_TABLE
            .iter()
            .map(|&(day, hour, speed_kmh, direction)| {
                ((day, hour), WindSample { speed_kmh, direction })
            })
            .collect();
        Self { table }
    }
}

impl WindForecast {
    /// An empty forecast: every lookup returns [`DEFAULT_WIND`].
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Adds or replaces a forecast entry.
    pub fn insert(&mut self, day: u32, hour: u32, sample: WindSample) {
        self.table.insert((day, hour), sample);
    }

    /// Forecast wind for a day and clock, rounding to the nearest hour slot.
    ///
    /// Minutes below 30 keep the current hour; 30 and above move to the next
    /// hour. Undefined (day, hour) pairs return [`DEFAULT_WIND`].
    pub fn wind_at(&self, day: u32, clock_secs: f64) -> WindSample {
        let total = clock_secs as u64;
        let hour = (total / 3600) as u32;
        let minute = (total % 3600) / 60;
        let slot = if minute < 30 { hour } else { hour + 1 };
        self.table.get(&(day, slot)).copied().unwrap_or(DEFAULT_WIND)
    }
}
