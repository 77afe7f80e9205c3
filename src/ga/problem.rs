//! Route optimization problem definition.
//!
//! Owns the immutable run data (waypoint set, injected depot, vehicle,
//! forecast) and everything that turns genes into numbers: the multi-day
//! battery/clock simulation, fitness scoring, and the wiring of crossover
//! and mutation over whole chromosomes.
//!
//! The simulation decodes a chromosome into an [`Itinerary`]; evaluation
//! scores that itinerary and the exporter prints it. Both read the same
//! decode, so the optimizer's accounting and the exported schedule cannot
//! drift apart.

use rand::Rng;

use crate::error::Error;
use crate::flight;
use crate::ga::chromosome::RouteChromosome;
use crate::ga::operators::{
    order_crossover, recharge_flip_mutation, speed_mutation, swap_route_mutation,
    uniform_crossover,
};
use crate::models::{Drone, FlightLeg, Itinerary, Waypoint};
use crate::weather::WindForecast;

/// Flying starts at 06:00 each day.
pub const DAY_START_SECS: f64 = 6.0 * 3600.0;
/// No flying after 19:00; the rest of the leg work rolls to the next day.
pub const DAY_END_SECS: f64 = 19.0 * 3600.0;
/// Recharges starting after 17:00 pay the recharge fee.
pub const LATE_RECHARGE_SECS: f64 = 17.0 * 3600.0;
/// The whole survey must finish within a week.
pub const MAX_DAYS: u32 = 7;
/// Fitness assigned to infeasible individuals: small, positive, and below
/// anything a feasible route can score.
pub const FITNESS_FLOOR: f64 = 0.0001;

/// Why a simulated route is infeasible. Recovered inside evaluation as an
/// invalid individual; never propagated out of the GA.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteFailure {
    /// The battery went negative flying or photographing leg `leg`.
    #[error("battery exhausted on leg {leg}")]
    BatteryExhausted { leg: usize },
    /// The simulation crossed past the final allowed day.
    #[error("route exceeds the {MAX_DAYS}-day deadline")]
    DeadlineExceeded,
    /// A gene carried a speed the vehicle rejects.
    #[error("illegal speed on leg {leg}")]
    IllegalSpeed { leg: usize },
}

/// GA problem: run data plus scoring parameters.
pub struct RouteProblem {
    /// Every waypoint, depot included.
    pub waypoints: Vec<Waypoint>,
    /// The mandatory start/end waypoint.
    pub depot: Waypoint,
    /// Waypoints to visit (everything except the depot).
    pub others: Vec<Waypoint>,
    /// Vehicle envelope.
    pub drone: Drone,
    /// Wind forecast for the planning week.
    pub forecast: WindForecast,
    /// Monetary cost per airborne hour.
    pub hourly_rate: f64,
    /// Fitness bonus per day under the deadline.
    pub day_bonus_weight: f64,
    /// Fitness bonus per avoided recharge.
    pub recharge_bonus_weight: f64,
    available_speeds: Vec<u32>,
}

impl RouteProblem {
    /// Creates a problem with `depot_id` as the injected depot.
    ///
    /// Fails if no waypoint carries that identifier.
    pub fn new(
        waypoints: Vec<Waypoint>,
        depot_id: &str,
        drone: Drone,
        forecast: WindForecast,
    ) -> Result<Self, Error> {
        let depot = waypoints
            .iter()
            .find(|wp| wp.id == depot_id)
            .cloned()
            .ok_or_else(|| Error::MissingDepot {
                id: depot_id.to_string(),
            })?;
        let others = waypoints
            .iter()
            .filter(|wp| wp.id != depot_id)
            .cloned()
            .collect();
        let available_speeds = drone.available_speeds();

        Ok(Self {
            waypoints,
            depot,
            others,
            drone,
            forecast,
            hourly_rate: 10.0,
            day_bonus_weight: 0.1,
            recharge_bonus_weight: 0.05,
            available_speeds,
        })
    }

    /// Sets the hourly operating rate.
    pub fn with_hourly_rate(mut self, rate: f64) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Sets the per-day-saved fitness bonus weight.
    pub fn with_day_bonus_weight(mut self, weight: f64) -> Self {
        self.day_bonus_weight = weight;
        self
    }

    /// Sets the per-recharge-avoided fitness bonus weight.
    pub fn with_recharge_bonus_weight(mut self, weight: f64) -> Self {
        self.recharge_bonus_weight = weight;
        self
    }

    /// Legal airspeeds for this vehicle.
    pub fn available_speeds(&self) -> &[u32] {
        &self.available_speeds
    }

    /// Creates and evaluates a random individual.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> RouteChromosome {
        let mut chromosome =
            RouteChromosome::random(&self.depot, &self.others, &self.available_speeds, rng);
        self.evaluate(&mut chromosome);
        chromosome
    }

    /// Decodes a chromosome by flying it through the week.
    ///
    /// The state machine per leg: look up flight parameters at the current
    /// clock; land and recharge if the leg's energy plus the mandatory stop
    /// would outrun the battery, or if the gene forces it (fee when the
    /// clock is past [`LATE_RECHARGE_SECS`], stop-penalty time, possible day
    /// rollover); burn the leg's energy; fly; pay the mandatory per-leg
    /// stop in battery and time; roll the day when the clock passes
    /// [`DAY_END_SECS`]. Any battery deficit or an eighth day aborts with a
    /// [`RouteFailure`].
    pub fn simulate(&self, chromosome: &RouteChromosome) -> Result<Itinerary, RouteFailure> {
        let route = &chromosome.route;
        let speeds = &chromosome.speeds;

        let mut battery = self
            .drone
            .autonomy(speeds[0])
            .map_err(|_| RouteFailure::IllegalSpeed { leg: 0 })?;
        let mut clock = DAY_START_SECS;
        let mut day: u32 = 1;
        let mut fees = 0.0;
        let mut num_recharges: u32 = 0;
        let mut total_flight_time = 0.0;
        let mut legs = Vec::with_capacity(route.len() - 1);

        for i in 0..route.len() - 1 {
            let start_day = day;
            let start_clock = clock;

            let params = flight::flight_parameters(
                &route[i],
                &route[i + 1],
                speeds[i],
                &self.forecast,
                day,
                clock,
            );
            let flight_time = self
                .drone
                .flight_time(params.distance_km, params.effective_speed_kmh);
            let energy = self.drone.energy_consumption(params.distance_km, speeds[i]);

            let needs_recharge = energy + self.drone.stop_penalty_secs > battery;
            let landing = needs_recharge || chromosome.recharges[i];

            if landing {
                num_recharges += 1;
                battery = self
                    .drone
                    .autonomy(speeds[i])
                    .map_err(|_| RouteFailure::IllegalSpeed { leg: i })?;
                if clock > LATE_RECHARGE_SECS {
                    fees += self.drone.recharge_fee;
                }
                clock += self.drone.stop_penalty_secs;
                if clock > DAY_END_SECS {
                    day += 1;
                    if day > MAX_DAYS {
                        return Err(RouteFailure::DeadlineExceeded);
                    }
                    clock = DAY_START_SECS;
                }
            }

            battery -= energy;
            if battery < 0.0 {
                return Err(RouteFailure::BatteryExhausted { leg: i });
            }

            clock += flight_time;
            total_flight_time += flight_time;

            // Mandatory photo stop, paid on every leg.
            battery -= self.drone.stop_penalty_secs;
            clock += self.drone.stop_penalty_secs;
            if battery < 0.0 {
                return Err(RouteFailure::BatteryExhausted { leg: i });
            }

            let end_clock = clock;
            if clock > DAY_END_SECS {
                day += 1;
                if day > MAX_DAYS {
                    return Err(RouteFailure::DeadlineExceeded);
                }
                clock = DAY_START_SECS;
            }

            legs.push(FlightLeg {
                start: route[i].clone(),
                end: route[i + 1].clone(),
                day: start_day,
                start_clock_secs: start_clock,
                end_clock_secs: end_clock,
                speed_kmh: speeds[i],
                landing,
            });
        }

        let total_cost = fees + (total_flight_time / 3600.0) * self.hourly_rate;
        Ok(Itinerary {
            legs,
            total_flight_time_secs: total_flight_time,
            total_cost,
            num_recharges,
            days_used: day,
        })
    }

    /// Evaluates a chromosome in place: runs the simulation, caches the
    /// metrics, and scores fitness. Infeasible routes get
    /// [`FITNESS_FLOOR`] and `is_valid = false`; the failure itself stays
    /// here.
    pub fn evaluate(&self, chromosome: &mut RouteChromosome) {
        match self.simulate(chromosome) {
            Ok(itinerary) => {
                chromosome.total_cost = itinerary.total_cost;
                chromosome.total_flight_time = itinerary.total_flight_time_secs;
                chromosome.num_recharges = itinerary.num_recharges;
                chromosome.days_used = itinerary.days_used;
                chromosome.fitness = self.fitness(&itinerary);
                chromosome.is_valid = true;
            }
            Err(_) => {
                chromosome.fitness = FITNESS_FLOOR;
                chromosome.is_valid = false;
            }
        }
    }

    /// Inverse-cost fitness with linear bonuses for finishing early and
    /// landing rarely.
    fn fitness(&self, itinerary: &Itinerary) -> f64 {
        let base = 1.0 / (1.0 + itinerary.total_cost);
        let day_bonus = (8.0 - itinerary.days_used as f64) * self.day_bonus_weight;
        let recharge_bonus = (10.0 - itinerary.num_recharges as f64) * self.recharge_bonus_weight;
        base * (1.0 + day_bonus + recharge_bonus)
    }

    /// Recombines two parents: order crossover on routes, uniform crossover
    /// on speeds and recharges. Both children are evaluated before they are
    /// returned.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &RouteChromosome,
        parent2: &RouteChromosome,
        rng: &mut R,
    ) -> (RouteChromosome, RouteChromosome) {
        let (route1, route2) = order_crossover(&parent1.route, &parent2.route, &self.depot.id, rng);

        let mut child1 = RouteChromosome::from_genes(
            route1,
            uniform_crossover(&parent1.speeds, &parent2.speeds, rng),
            uniform_crossover(&parent1.recharges, &parent2.recharges, rng),
        );
        let mut child2 = RouteChromosome::from_genes(
            route2,
            uniform_crossover(&parent2.speeds, &parent1.speeds, rng),
            uniform_crossover(&parent2.recharges, &parent1.recharges, rng),
        );

        self.evaluate(&mut child1);
        self.evaluate(&mut child2);
        (child1, child2)
    }

    /// Mutates a chromosome in place and re-evaluates it. Each gene group
    /// mutates independently with probability `rate`: a route swap, a speed
    /// reassignment, a recharge flip.
    pub fn mutate<R: Rng>(&self, chromosome: &mut RouteChromosome, rate: f64, rng: &mut R) {
        if rng.random::<f64>() < rate {
            swap_route_mutation(&mut chromosome.route, rng);
        }
        if rng.random::<f64>() < rate {
            speed_mutation(&mut chromosome.speeds, &self.available_speeds, rng);
        }
        if rng.random::<f64>() < rate {
            recharge_flip_mutation(&mut chromosome.recharges, rng);
        }
        self.evaluate(chromosome);
    }
}
