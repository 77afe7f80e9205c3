//! Run-to-completion entry point: load waypoints, optimize, report, export.

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use log::{error, info, warn};

use drone_route::data;
use drone_route::ga::{GaConfig, GaRunner, RouteProblem};
use drone_route::models::Drone;
use drone_route::validation;
use drone_route::weather::WindForecast;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "data/waypoints.csv".into());
    let depot_arg = args.next();
    let output = args.next().unwrap_or_else(|| "data/best_route.csv".into());

    let waypoints = match data::load_waypoints(&input) {
        Ok(waypoints) => waypoints,
        Err(e) => {
            error!("cannot load waypoint table '{input}': {e}");
            return ExitCode::FAILURE;
        }
    };
    if waypoints.is_empty() {
        error!("waypoint table '{input}' is empty");
        return ExitCode::FAILURE;
    }

    // Default depot: the table's first row.
    let depot_id = depot_arg.unwrap_or_else(|| waypoints[0].id.clone());

    if let Err(errors) = validation::validate_waypoints(&waypoints, &depot_id) {
        for e in errors {
            error!("invalid waypoint table: {}", e.message);
        }
        return ExitCode::FAILURE;
    }
    info!(
        "loaded {} waypoints from '{input}', depot '{depot_id}'",
        waypoints.len()
    );

    let problem = match RouteProblem::new(
        waypoints,
        &depot_id,
        Drone::default(),
        WindForecast::default(),
    ) {
        Ok(problem) => problem,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let config = GaConfig {
        population_size: 100,
        generations: 500,
        mutation_rate: 0.02,
        crossover_rate: 0.7,
        elitism_count: 5,
        tournament_size: 3,
    };

    let started = Instant::now();
    let outcome = match GaRunner::run(&problem, &config, &mut rand::rng()) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = started.elapsed();

    let best = &outcome.best;
    println!("--- results ---");
    println!("elapsed: {:.2} s", elapsed.as_secs_f64());
    println!("best fitness: {:.6}", best.fitness);
    println!("feasible: {}", best.is_valid);
    println!("total cost: R$ {:.2}", best.total_cost);
    println!("flight time: {:.2} h", best.total_flight_time / 3600.0);
    println!("recharges: {}", best.num_recharges);
    println!("days used: {}", best.days_used);

    match problem.simulate(best) {
        Ok(itinerary) => {
            if let Err(e) = data::write_itinerary(&output, &itinerary) {
                error!("cannot write itinerary '{output}': {e}");
                return ExitCode::FAILURE;
            }
            info!("itinerary written to '{output}'");
        }
        Err(failure) => {
            warn!("best route is infeasible ({failure}); no itinerary written");
        }
    }

    ExitCode::SUCCESS
}
