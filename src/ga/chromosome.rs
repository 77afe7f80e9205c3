//! Route chromosome for the drone GA.
//!
//! # Encoding
//!
//! Three parallel gene vectors describe one candidate tour:
//! - **route**: the depot, a permutation of every other waypoint, the depot
//!   again. Positions 0 and last are structural and never move.
//! - **speeds**: one legal discrete airspeed per leg
//!   (`len = route.len() - 1`).
//! - **recharges**: one forced-landing flag per leg, independent of the
//!   battery check the simulation performs anyway.
//!
//! Derived metrics (fitness, cost, flight time, recharges, days, validity)
//! are filled in by evaluation and refreshed after every gene change.

use rand::prelude::IndexedRandom;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Waypoint;

/// Probability that a freshly constructed individual forces a recharge on
/// any given leg.
pub const RECHARGE_SEED_PROBABILITY: f64 = 0.2;

/// One candidate solution: genes plus cached evaluation results.
#[derive(Debug, Clone)]
pub struct RouteChromosome {
    /// Visiting order; depot first and last.
    pub route: Vec<Waypoint>,
    /// Commanded airspeed per leg (km/h).
    pub speeds: Vec<u32>,
    /// Forced-recharge flag per leg.
    pub recharges: Vec<bool>,
    /// Fitness (higher is better). Floor value when infeasible.
    pub fitness: f64,
    /// Recharge fees plus hourly operating cost.
    pub total_cost: f64,
    /// Accumulated airborne seconds.
    pub total_flight_time: f64,
    /// Recharge landings performed by the simulation.
    pub num_recharges: u32,
    /// Flight days consumed.
    pub days_used: u32,
    /// False when the simulated route breaks a hard constraint.
    pub is_valid: bool,
}

impl RouteChromosome {
    /// Creates a chromosome with uniformly random genes: a shuffled
    /// permutation of `others` between two depot copies, a random legal
    /// speed per leg, and a [`RECHARGE_SEED_PROBABILITY`]-biased recharge
    /// coin per leg. Metrics are zeroed until evaluation runs.
    pub fn random<R: Rng>(
        depot: &Waypoint,
        others: &[Waypoint],
        available_speeds: &[u32],
        rng: &mut R,
    ) -> Self {
        let mut interior = others.to_vec();
        interior.shuffle(rng);

        let mut route = Vec::with_capacity(interior.len() + 2);
        route.push(depot.clone());
        route.append(&mut interior);
        route.push(depot.clone());

        let legs = route.len() - 1;
        let speeds = (0..legs)
            .map(|_| *available_speeds.choose(rng).unwrap())
            .collect();
        let recharges = (0..legs)
            .map(|_| rng.random_bool(RECHARGE_SEED_PROBABILITY))
            .collect();

        Self::from_genes(route, speeds, recharges)
    }

    /// Wraps existing gene vectors in an unevaluated chromosome.
    pub fn from_genes(route: Vec<Waypoint>, speeds: Vec<u32>, recharges: Vec<bool>) -> Self {
        Self {
            route,
            speeds,
            recharges,
            fitness: 0.0,
            total_cost: 0.0,
            total_flight_time: 0.0,
            num_recharges: 0,
            days_used: 0,
            is_valid: false,
        }
    }

    /// Number of legs (route hops).
    pub fn leg_count(&self) -> usize {
        self.route.len().saturating_sub(1)
    }

    /// Structural soundness: depot at both ends, matching gene-vector
    /// lengths, and no depot or duplicate in the interior. Does not run the
    /// simulation; `is_valid` covers physical feasibility.
    pub fn structure_ok(&self, depot_id: &str) -> bool {
        let len = self.route.len();
        if len < 2 || self.speeds.len() != len - 1 || self.recharges.len() != len - 1 {
            return false;
        }
        if self.route[0].id != depot_id || self.route[len - 1].id != depot_id {
            return false;
        }
        let interior = &self.route[1..len - 1];
        for (i, wp) in interior.iter().enumerate() {
            if wp.id == depot_id {
                return false;
            }
            if interior[..i].iter().any(|prev| prev.id == wp.id) {
                return false;
            }
        }
        true
    }
}
