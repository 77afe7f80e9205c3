//! Generational GA engine.
//!
//! Owns the population and runs the evolutionary loop: tournament
//! selection, rate-gated crossover, per-gene-group mutation, elitism, and
//! wholesale generational replacement. Tracks the best individual of the
//! latest generation and a per-generation fitness history.
//!
//! Selection prefers feasible individuals; an all-infeasible tournament
//! falls back to a uniformly random member of the whole population rather
//! than failing. Likewise, elitism falls back to the population head when
//! no feasible individuals exist yet.

use std::cmp::Ordering;

use log::info;
use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::error::Error;
use crate::ga::chromosome::RouteChromosome;
use crate::ga::problem::RouteProblem;

/// Progress is logged every this many generations.
const PROGRESS_INTERVAL: usize = 100;

/// GA run parameters. Every field is required; there are no defaults.
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generations to run.
    pub generations: usize,
    /// Per-gene-group mutation probability.
    pub mutation_rate: f64,
    /// Probability that a selected pair recombines.
    pub crossover_rate: f64,
    /// Feasible individuals carried over unchanged each generation.
    pub elitism_count: usize,
    /// Contestants per selection tournament.
    pub tournament_size: usize,
}

impl GaConfig {
    /// Fails fast on parameters the loop cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig("population_size must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidConfig(format!(
                "mutation_rate {} outside [0, 1]",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(Error::InvalidConfig(format!(
                "crossover_rate {} outside [0, 1]",
                self.crossover_rate
            )));
        }
        if self.elitism_count > self.population_size {
            return Err(Error::InvalidConfig(
                "elitism_count exceeds population_size".into(),
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(Error::InvalidConfig(
                "tournament_size must be in [1, population_size]".into(),
            ));
        }
        Ok(())
    }
}

/// What a finished run returns.
#[derive(Debug, Clone)]
pub struct GaOutcome {
    /// Best individual of the final generation.
    pub best: RouteChromosome,
    /// Best fitness per generation, in order.
    pub fitness_history: Vec<f64>,
}

/// Runs the generational loop to completion.
pub struct GaRunner;

impl GaRunner {
    /// Evolves a fresh random population for `config.generations`
    /// generations and returns the tracked best plus the fitness history.
    pub fn run<R: Rng>(
        problem: &RouteProblem,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaOutcome, Error> {
        config.validate()?;

        info!(
            "starting GA: {} individuals, {} generations",
            config.population_size, config.generations
        );

        let mut population: Vec<RouteChromosome> = (0..config.population_size)
            .map(|_| problem.create_individual(rng))
            .collect();
        let mut best = Self::best_of(&population, problem);
        let mut fitness_history = Vec::with_capacity(config.generations);

        for generation in 0..config.generations {
            let mut next = Self::elite(&population, config.elitism_count);

            while next.len() < config.population_size {
                let parent1 = Self::select(&population, config.tournament_size, rng);
                let parent2 = Self::select(&population, config.tournament_size, rng);

                let (mut child1, mut child2) = if rng.random::<f64>() < config.crossover_rate {
                    problem.crossover(parent1, parent2, rng)
                } else {
                    (parent1.clone(), parent2.clone())
                };

                problem.mutate(&mut child1, config.mutation_rate, rng);
                problem.mutate(&mut child2, config.mutation_rate, rng);

                next.push(child1);
                next.push(child2);
            }
            next.truncate(config.population_size);

            population = next;
            best = Self::best_of(&population, problem);
            fitness_history.push(best.fitness);

            if generation % PROGRESS_INTERVAL == 0 {
                let valid_count = population.iter().filter(|c| c.is_valid).count();
                info!(
                    "generation {generation}: best fitness {:.6}, valid {valid_count}/{}",
                    best.fitness,
                    population.len()
                );
            }
        }

        info!("GA finished: best fitness {:.6}", best.fitness);
        Ok(GaOutcome {
            best,
            fitness_history,
        })
    }

    /// K-way tournament: draws `k` contestants without replacement and
    /// returns the fittest feasible one. With no feasible contestant, any
    /// population member may win instead.
    fn select<'p, R: Rng>(
        population: &'p [RouteChromosome],
        k: usize,
        rng: &mut R,
    ) -> &'p RouteChromosome {
        let winner = population
            .choose_multiple(rng, k)
            .filter(|c| c.is_valid)
            .max_by(|a, b| a.fitness.partial_cmp(&b.fitness).unwrap_or(Ordering::Equal));
        match winner {
            Some(champion) => champion,
            None => population.choose(rng).unwrap_or(&population[0]),
        }
    }

    /// The top `count` feasible individuals by fitness; the population head
    /// when nothing is feasible yet.
    fn elite(population: &[RouteChromosome], count: usize) -> Vec<RouteChromosome> {
        let mut feasible: Vec<&RouteChromosome> =
            population.iter().filter(|c| c.is_valid).collect();
        if feasible.is_empty() {
            return population.iter().take(count).cloned().collect();
        }
        feasible
            .sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap_or(Ordering::Equal));
        feasible.into_iter().take(count).cloned().collect()
    }

    /// Best of the current population: fittest feasible individual, or the
    /// population head re-evaluated when nothing is feasible.
    fn best_of(population: &[RouteChromosome], problem: &RouteProblem) -> RouteChromosome {
        let champion = population
            .iter()
            .filter(|c| c.is_valid)
            .max_by(|a, b| a.fitness.partial_cmp(&b.fitness).unwrap_or(Ordering::Equal));
        match champion {
            Some(best) => best.clone(),
            None => {
                let mut fallback = population[0].clone();
                problem.evaluate(&mut fallback);
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Drone, Waypoint};
    use crate::weather::WindForecast;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn city_problem() -> RouteProblem {
        let waypoints = vec![
            Waypoint::new("82821020", -25.548, -49.238),
            Waypoint::new("80010010", -25.428, -49.267),
            Waypoint::new("80020020", -25.435, -49.275),
        ];
        RouteProblem::new(
            waypoints,
            "82821020",
            Drone::default(),
            WindForecast::default(),
        )
        .unwrap()
    }

    fn infeasible_problem() -> RouteProblem {
        // Intercontinental hops: every individual exhausts its battery.
        let waypoints = vec![
            Waypoint::new("depot", -25.5, -49.2),
            Waypoint::new("far1", 40.0, 2.0),
            Waypoint::new("far2", 35.0, 139.0),
        ];
        RouteProblem::new(
            waypoints,
            "depot",
            Drone::default(),
            WindForecast::default(),
        )
        .unwrap()
    }

    fn small_config() -> GaConfig {
        GaConfig {
            population_size: 10,
            generations: 5,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            elitism_count: 2,
            tournament_size: 3,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(small_config().validate().is_ok());

        let mut zero_pop = small_config();
        zero_pop.population_size = 0;
        assert!(zero_pop.validate().is_err());

        let mut bad_rate = small_config();
        bad_rate.mutation_rate = 1.5;
        assert!(bad_rate.validate().is_err());

        let mut wide_tournament = small_config();
        wide_tournament.tournament_size = 11;
        assert!(wide_tournament.validate().is_err());

        let mut greedy_elite = small_config();
        greedy_elite.elitism_count = 11;
        assert!(greedy_elite.validate().is_err());
    }

    #[test]
    fn test_run_end_to_end() {
        let problem = city_problem();
        let config = small_config();
        let mut rng = SmallRng::seed_from_u64(42);

        let outcome = GaRunner::run(&problem, &config, &mut rng).unwrap();
        assert_eq!(outcome.best.route.len(), 4);
        assert_eq!(outcome.fitness_history.len(), config.generations);
        assert!(outcome.best.fitness > 0.0);
        assert!(outcome.best.structure_ok("82821020"));
    }

    #[test]
    fn test_run_improves_or_holds_fitness_with_elitism() {
        let problem = city_problem();
        let mut config = small_config();
        config.generations = 20;
        let mut rng = SmallRng::seed_from_u64(7);

        let outcome = GaRunner::run(&problem, &config, &mut rng).unwrap();
        // With elitism, the champion survives every replacement; the best
        // fitness of the last generation is at least the first one's.
        let first = outcome.fitness_history.first().unwrap();
        let last = outcome.fitness_history.last().unwrap();
        assert!(last >= first);
    }

    #[test]
    fn test_run_with_all_invalid_population_completes() {
        let problem = infeasible_problem();
        let config = small_config();
        let mut rng = SmallRng::seed_from_u64(42);

        let outcome = GaRunner::run(&problem, &config, &mut rng).unwrap();
        assert!(!outcome.best.is_valid);
        assert_eq!(outcome.best.fitness, crate::ga::problem::FITNESS_FLOOR);
        assert_eq!(outcome.fitness_history.len(), config.generations);
    }

    #[test]
    fn test_tournament_with_all_invalid_still_selects() {
        let problem = infeasible_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let population: Vec<RouteChromosome> =
            (0..6).map(|_| problem.create_individual(&mut rng)).collect();
        assert!(population.iter().all(|c| !c.is_valid));

        let picked = GaRunner::select(&population, 3, &mut rng);
        assert!(population
            .iter()
            .any(|c| std::ptr::eq(c, picked)));
    }

    #[test]
    fn test_tournament_prefers_valid_over_fitter_invalid() {
        let problem = city_problem();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut population: Vec<RouteChromosome> =
            (0..4).map(|_| problem.create_individual(&mut rng)).collect();
        // Make one contestant invalid but nominally fitter than everyone.
        population[0].is_valid = false;
        population[0].fitness = f64::MAX;

        for _ in 0..20 {
            let picked = GaRunner::select(&population, 4, &mut rng);
            assert!(picked.is_valid);
        }
    }

    #[test]
    fn test_elite_falls_back_to_population_head() {
        let problem = infeasible_problem();
        let mut rng = SmallRng::seed_from_u64(3);
        let population: Vec<RouteChromosome> =
            (0..5).map(|_| problem.create_individual(&mut rng)).collect();

        let elite = GaRunner::elite(&population, 2);
        assert_eq!(elite.len(), 2);
        assert_eq!(elite[0].route, population[0].route);
    }

    #[test]
    fn test_elite_takes_top_valid_by_fitness() {
        let problem = city_problem();
        let mut rng = SmallRng::seed_from_u64(4);
        let population: Vec<RouteChromosome> =
            (0..8).map(|_| problem.create_individual(&mut rng)).collect();

        let elite = GaRunner::elite(&population, 3);
        assert_eq!(elite.len(), 3);
        assert!(elite.windows(2).all(|w| w[0].fitness >= w[1].fitness));
        let top = population
            .iter()
            .filter(|c| c.is_valid)
            .map(|c| c.fitness)
            .fold(f64::MIN, f64::max);
        assert_eq!(elite[0].fitness, top);
    }
}
