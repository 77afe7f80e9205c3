//! Crate error type.
//!
//! Covers the fatal failure modes: invalid parameters handed to the vehicle
//! model, a depot missing from the waypoint set, nonsensical GA
//! configuration, and storage I/O. Route infeasibility during evaluation is
//! not an error — it is handled inside the GA as an invalid individual.

/// Errors surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A speed outside the vehicle's legal range was passed directly to the
    /// vehicle model.
    #[error("speed {speed} km/h is outside the legal range [{min}, {max}]")]
    InvalidSpeed { speed: u32, min: u32, max: u32 },

    /// The injected depot identifier does not match any waypoint.
    #[error("depot '{id}' not found in the waypoint set")]
    MissingDepot { id: String },

    /// The GA configuration fails validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem error while reading or writing tabular data.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV parse or serialization error.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
