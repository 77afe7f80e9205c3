//! Multi-day drone survey route optimization.
//!
//! A single drone must photograph a fixed set of geographic waypoints,
//! starting and ending at a depot, within a week of 06:00-19:00 flying
//! days. A genetic algorithm searches for the cheapest feasible tour under
//! battery autonomy, wind, and recharge constraints.
//!
//! # Modules
//!
//! - **`models`**: domain types — [`models::Waypoint`], [`models::Drone`],
//!   [`models::Itinerary`]
//! - **`flight`**: great-circle distance, bearing, wind-adjusted ground speed
//! - **`weather`**: the 16-point compass and the week's wind forecast table
//! - **`ga`**: the optimizer — chromosome encoding, operators, route
//!   simulation, generational engine
//! - **`validation`**: waypoint-table integrity checks
//! - **`data`**: CSV waypoint loading and itinerary export

pub mod data;
pub mod error;
pub mod flight;
pub mod ga;
pub mod models;
pub mod validation;
pub mod weather;

pub use error::Error;
