//! Genetic-algorithm route optimization.
//!
//! The route is encoded as a fixed-endpoint permutation with two auxiliary
//! per-leg gene vectors (airspeed, forced recharge). Feasibility is scored
//! by simulating each candidate through the week's battery, clock, and
//! forecast constraints.
//!
//! # Submodules
//!
//! - [`chromosome`]: the gene encoding and its structural invariants
//! - [`operators`]: order crossover, uniform crossover, mutations
//! - [`problem`]: run data, route simulation, fitness
//! - [`engine`]: selection, elitism, the generational loop

pub mod chromosome;
pub mod engine;
pub mod operators;
pub mod problem;

pub use chromosome::{RouteChromosome, RECHARGE_SEED_PROBABILITY};
pub use engine::{GaConfig, GaOutcome, GaRunner};
pub use operators::{
    order_crossover, recharge_flip_mutation, speed_mutation, swap_route_mutation,
    uniform_crossover,
};
pub use problem::{RouteFailure, RouteProblem, FITNESS_FLOOR, MAX_DAYS};
