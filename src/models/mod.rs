//! Domain models.
//!
//! Core data types for the route optimization problem and its solutions:
//! the geographic [`Waypoint`] set, the [`Drone`] vehicle envelope, and the
//! decoded [`Itinerary`] a finished chromosome unfolds into.

mod drone;
mod itinerary;
mod waypoint;

pub use drone::Drone;
pub use itinerary::{format_clock, FlightLeg, Itinerary};
pub use waypoint::Waypoint;
