//! Genetic optimizer over the practical grid range.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rayon::prelude::*;

use super::fitness::{FitnessEvaluator, INFEASIBLE_FITNESS};
use super::genome::{Chromosome, LayoutRng};
use crate::compute::ConstraintModel;
use crate::schema::{
    AvailableSpace, EvolutionHistory, EvolutionProgress, EvolutionResult, EvolutionStats,
    GeneticConfig, LayoutError, StopReason, Strategy,
};

/// An individual in the population.
#[derive(Debug, Clone, Copy)]
pub struct Individual {
    /// The genes.
    pub chromosome: Chromosome,
    /// Fitness score.
    pub fitness: f64,
    /// Rounded (rows, columns).
    pub grid: (u32, u32),
    /// Whether the grid satisfies the constraints.
    pub feasible: bool,
}

/// Population-based alternative to exhaustive candidate search.
///
/// Randomness comes only from the owned [`LayoutRng`]. A fresh optimizer
/// built from the same config and seed reproduces a run exactly; a second
/// `run` on the same optimizer continues the random stream.
pub struct GeneticOptimizer {
    config: GeneticConfig,
    constraints: ConstraintModel,
    rng: LayoutRng,
    population: Vec<Individual>,
    history: EvolutionHistory,
    generation: usize,
    best_fitness: f64,
    stagnation_count: usize,
    evaluations: u64,
    cancelled: Arc<AtomicBool>,
}

impl GeneticOptimizer {
    /// Create an optimizer seeded from `config.seed`.
    pub fn new(config: GeneticConfig, constraints: ConstraintModel) -> Result<Self, LayoutError> {
        let rng = LayoutRng::new(config.seed);
        Self::with_rng(config, constraints, rng)
    }

    /// Create an optimizer drawing from a caller-supplied random source.
    pub fn with_rng(
        config: GeneticConfig,
        constraints: ConstraintModel,
        rng: LayoutRng,
    ) -> Result<Self, LayoutError> {
        config.validate()?;

        Ok(Self {
            config,
            constraints,
            rng,
            population: Vec::new(),
            history: EvolutionHistory::default(),
            generation: 0,
            best_fitness: f64::NEG_INFINITY,
            stagnation_count: 0,
            evaluations: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get cancellation handle. Checked between generations.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Run evolution (blocking).
    pub fn run(
        &mut self,
        space: &AvailableSpace,
        strategy: Strategy,
    ) -> Result<EvolutionResult, LayoutError> {
        self.run_with_callback(space, strategy, |_| {})
    }

    /// Run evolution, reporting after every evaluated generation.
    pub fn run_with_callback<F>(
        &mut self,
        space: &AvailableSpace,
        strategy: Strategy,
        mut callback: F,
    ) -> Result<EvolutionResult, LayoutError>
    where
        F: FnMut(&EvolutionProgress),
    {
        let start_time = Instant::now();
        let evaluator = FitnessEvaluator::new(self.constraints, *space, strategy);
        debug!(
            "Genetic search: population {}, {} generations, range {}..={}",
            self.config.population.size,
            self.config.population.max_generations,
            evaluator.range().min(),
            evaluator.range().max()
        );

        self.initialize(&evaluator);
        self.evaluate_population(&evaluator);
        self.record_generation();
        callback(&self.progress());

        let initial_best_fitness = self.best_fitness;

        let stop_reason = loop {
            if let Some(reason) = self.should_stop(start_time) {
                break reason;
            }

            self.step_generation(&evaluator);
            self.evaluate_population(&evaluator);
            self.record_generation();
            callback(&self.progress());
        };

        let best = *self
            .best_individual()
            .ok_or_else(|| LayoutError::Configuration("population is empty".to_string()))?;
        let (rows, columns) = best.grid;

        let layout = self
            .constraints
            .layout(space, rows, columns)
            .inspect_err(|_| {
                warn!(
                    "Genetic search ended without a feasible grid after {} generations (best {}x{}, fitness {:.4})",
                    self.generation, rows, columns, best.fitness
                );
            })?;

        info!(
            "Genetic search chose {}x{} after {} generations ({:?}), fitness {:.6}",
            rows, columns, self.generation, stop_reason, best.fitness
        );

        Ok(EvolutionResult {
            layout,
            fitness: best.fitness,
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                initial_best_fitness,
                best_fitness: self.best_fitness,
                final_avg_fitness: self.average_fitness(),
                elapsed_seconds: start_time.elapsed().as_secs_f64(),
                stop_reason,
            },
            history: self.history.clone(),
        })
    }

    /// Fill the population with chromosomes drawn uniformly from the range.
    fn initialize(&mut self, evaluator: &FitnessEvaluator) {
        self.population.clear();
        self.history = EvolutionHistory::default();
        self.generation = 0;
        self.best_fitness = f64::NEG_INFINITY;
        self.stagnation_count = 0;
        self.evaluations = 0;

        let range = *evaluator.range();
        for _ in 0..self.config.population.size {
            let chromosome = self.rng.random_chromosome(&range);
            self.population.push(Individual {
                chromosome,
                fitness: f64::NEG_INFINITY,
                grid: chromosome.grid(&range),
                feasible: false,
            });
        }
    }

    /// Evaluate all individuals in the population.
    fn evaluate_population(&mut self, evaluator: &FitnessEvaluator) {
        // Fitness is pure, so parallel evaluation is order-independent.
        self.population.par_iter_mut().for_each(|individual| {
            let evaluation = evaluator.evaluate(&individual.chromosome);
            individual.fitness = evaluation.fitness;
            individual.grid = evaluation.grid;
            individual.feasible = evaluation.feasible;
        });
        self.evaluations += self.population.len() as u64;
    }

    /// Update best fitness, stagnation and history from the evaluated population.
    fn record_generation(&mut self) {
        let gen_best = self
            .population
            .iter()
            .map(|individual| individual.fitness)
            .fold(f64::NEG_INFINITY, f64::max);

        if gen_best > self.best_fitness {
            self.best_fitness = gen_best;
            self.stagnation_count = 0;
        } else {
            self.stagnation_count += 1;
        }

        let avg_fitness = self.average_fitness();
        self.history.best_fitness.push(gen_best);
        self.history.avg_fitness.push(avg_fitness);

        debug!(
            "Generation {}: best {:.6}, avg {:.6}, stagnation {}",
            self.generation, gen_best, avg_fitness, self.stagnation_count
        );
    }

    /// Produce the next generation: elites carried over, the rest bred by
    /// tournament selection, crossover and mutation.
    fn step_generation(&mut self, evaluator: &FitnessEvaluator) {
        // Sort by fitness (descending). Stable, so equal fitness keeps order.
        self.population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let size = self.config.population.size;
        let range = *evaluator.range();
        let mut next_gen = Vec::with_capacity(size);

        // Elitism: keep best individuals
        next_gen.extend_from_slice(&self.population[..self.config.elite_count()]);

        while next_gen.len() < size {
            // Selection - get indices first to avoid borrow issues
            let idx1 = self.select_index();
            let idx2 = self.select_index();
            let parent1 = self.population[idx1].chromosome;
            let parent2 = self.population[idx2].chromosome;

            let mut child = if self.rng.chance(self.config.crossover_rate) {
                self.rng.crossover(&parent1, &parent2)
            } else {
                parent1
            };

            self.rng.mutate(
                &mut child,
                self.config.mutation_rate,
                self.config.mutation_sigma,
                &range,
            );

            next_gen.push(Individual {
                chromosome: child,
                fitness: f64::NEG_INFINITY,
                grid: child.grid(&range),
                feasible: false,
            });
        }

        self.population = next_gen;
        self.generation += 1;
    }

    /// Tournament selection: best of `tournament_size` random draws.
    fn select_index(&mut self) -> usize {
        let len = self.population.len();
        let mut best_idx = self.rng.index(len);
        for _ in 1..self.config.tournament_size {
            let idx = self.rng.index(len);
            if self.population[idx].fitness > self.population[best_idx].fitness {
                best_idx = idx;
            }
        }
        best_idx
    }

    /// First individual with the highest fitness.
    fn best_individual(&self) -> Option<&Individual> {
        self.population.iter().fold(None, |best, individual| match best {
            Some(b) if b.fitness >= individual.fitness => Some(b),
            _ => Some(individual),
        })
    }

    fn average_fitness(&self) -> f64 {
        if self.population.is_empty() {
            0.0
        } else {
            self.population.iter().map(|i| i.fitness).sum::<f64>() / self.population.len() as f64
        }
    }

    /// Get current progress.
    pub fn progress(&self) -> EvolutionProgress {
        let generation_best = self
            .history
            .best_fitness
            .last()
            .copied()
            .unwrap_or(f64::NEG_INFINITY);

        EvolutionProgress {
            generation: self.generation,
            total_generations: self.config.population.max_generations,
            best_fitness: self.best_fitness,
            avg_fitness: self.average_fitness(),
            generation_best,
            stagnation_count: self.stagnation_count,
            best_grid: self.best_individual().map_or((0, 0), |b| b.grid),
            feasible_individuals: self.population.iter().filter(|i| i.feasible).count(),
        }
    }

    /// Check if evolution should stop. Only called between generations.
    fn should_stop(&self, start_time: Instant) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if self.generation >= self.config.population.max_generations {
            return Some(StopReason::MaxGenerations);
        }

        if let Some(limit) = self.config.population.time_limit_secs
            && start_time.elapsed() >= Duration::from_secs_f64(limit)
        {
            return Some(StopReason::TimeLimit);
        }

        // Stagnation only ends a run once a feasible grid has been found;
        // infeasible populations use the full generation budget.
        if let Some(limit) = self.config.population.stagnation_limit
            && self.best_fitness > INFEASIBLE_FITNESS
            && self.stagnation_count >= limit
        {
            return Some(StopReason::Stagnation);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::CandidateSearch;
    use crate::schema::{Dimensions, PopulationConfig, Spacing};

    fn space(length: f64, width: f64, perimeter: f64, panel: f64) -> AvailableSpace {
        ConstraintModel::default()
            .available_space(
                &Dimensions::new(length, width).unwrap(),
                &Spacing::new(perimeter, panel).unwrap(),
            )
            .unwrap()
    }

    fn config(size: usize, generations: usize) -> GeneticConfig {
        GeneticConfig {
            population: PopulationConfig {
                size,
                max_generations: generations,
                stagnation_limit: None,
                time_limit_secs: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_optimizer_creation_validates() {
        let bad = GeneticConfig {
            tournament_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            GeneticOptimizer::new(bad, ConstraintModel::default()),
            Err(LayoutError::Configuration(_))
        ));
    }

    #[test]
    fn test_initialize_population() {
        let space = space(4800.0, 3600.0, 200.0, 200.0);
        let mut optimizer = GeneticOptimizer::new(config(10, 5), ConstraintModel::default()).unwrap();
        let evaluator = FitnessEvaluator::new(ConstraintModel::default(), space, Strategy::Balanced);
        optimizer.initialize(&evaluator);

        assert_eq!(optimizer.population.len(), 10);
    }

    #[test]
    fn test_evolution_run() {
        let space = space(4800.0, 3600.0, 200.0, 200.0);
        let mut optimizer = GeneticOptimizer::new(config(20, 10), ConstraintModel::default()).unwrap();
        let result = optimizer.run(&space, Strategy::Balanced).unwrap();

        assert_eq!(result.stats.generations, 10);
        assert_eq!(result.stats.stop_reason, StopReason::MaxGenerations);
        assert_eq!(result.stats.total_evaluations, 11 * 20);
        assert_eq!(result.history.best_fitness.len(), 11);
        assert!(result.layout.panel_length() <= 2400.0);
        assert!(result.layout.panel_width() <= 2400.0);
    }

    #[test]
    fn test_elitism_never_regresses() {
        let space = space(9000.0, 6500.0, 150.0, 10.0);
        let mut optimizer = GeneticOptimizer::new(config(12, 40), ConstraintModel::default()).unwrap();
        let result = optimizer.run(&space, Strategy::Balanced).unwrap();

        assert!(result.stats.best_fitness >= result.stats.initial_best_fitness);
        assert!(
            result
                .history
                .best_fitness
                .windows(2)
                .all(|w| w[1] >= w[0])
        );
    }

    #[test]
    fn test_finds_exhaustive_optimum_on_small_range() {
        let space = space(4800.0, 3600.0, 200.0, 200.0);
        let exhaustive = CandidateSearch::default()
            .search(&space, Strategy::Balanced)
            .unwrap();

        let mut optimizer = GeneticOptimizer::new(config(50, 100), ConstraintModel::default()).unwrap();
        let result = optimizer.run(&space, Strategy::Balanced).unwrap();

        assert_eq!(result.layout, exhaustive.layout);
        assert_eq!(result.fitness, exhaustive.score);
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let space = space(7300.0, 5100.0, 100.0, 12.0);
        let run = || {
            let mut optimizer =
                GeneticOptimizer::new(config(30, 25), ConstraintModel::default()).unwrap();
            optimizer.run(&space, Strategy::MinimizeSeams).unwrap()
        };

        let a = run();
        let b = run();
        assert_eq!(a.layout, b.layout);
        assert_eq!(a.fitness.to_bits(), b.fitness.to_bits());
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_stagnation_stops_early() {
        let space = space(4800.0, 3600.0, 200.0, 200.0);
        let mut cfg = config(20, 1000);
        cfg.population.stagnation_limit = Some(5);

        let mut optimizer = GeneticOptimizer::new(cfg, ConstraintModel::default()).unwrap();
        let result = optimizer.run(&space, Strategy::Balanced).unwrap();

        assert_eq!(result.stats.stop_reason, StopReason::Stagnation);
        assert!(result.stats.generations < 1000);
    }

    #[test]
    fn test_time_limit_stops_between_generations() {
        // Every grid in the 1..=4 range fits a 2 m x 1.5 m surface.
        let space = space(2000.0, 1500.0, 0.0, 0.0);
        let mut cfg = config(10, 1_000_000);
        cfg.population.time_limit_secs = Some(1e-9);

        let mut optimizer = GeneticOptimizer::new(cfg, ConstraintModel::default()).unwrap();
        let result = optimizer.run(&space, Strategy::Balanced).unwrap();

        assert_eq!(result.stats.stop_reason, StopReason::TimeLimit);
        assert!(result.stats.generations < 1_000_000);
        assert_eq!(
            result.history.best_fitness.len(),
            result.stats.generations + 1
        );
    }

    #[test]
    fn test_infeasible_population_ignores_stagnation() {
        let space = space(40_000.0, 3000.0, 0.0, 0.0);
        let mut cfg = config(10, 30);
        cfg.population.stagnation_limit = Some(2);

        let mut optimizer = GeneticOptimizer::new(cfg, ConstraintModel::default()).unwrap();
        let result = optimizer.run(&space, Strategy::Balanced);

        assert!(matches!(result, Err(LayoutError::InfeasibleLayout(_))));
        assert_eq!(optimizer.generation, 30);
    }

    #[test]
    fn test_cancellation() {
        let space = space(4800.0, 3600.0, 200.0, 200.0);
        let mut optimizer = GeneticOptimizer::new(config(10, 100), ConstraintModel::default()).unwrap();
        let cancel = optimizer.cancel_handle();

        // Cancel immediately
        cancel.store(true, Ordering::Relaxed);

        let result = optimizer.run(&space, Strategy::Balanced).unwrap();
        assert_eq!(result.stats.stop_reason, StopReason::Cancelled);
        assert_eq!(result.stats.generations, 0);
    }

    #[test]
    fn test_progress_callback_per_generation() {
        let space = space(4800.0, 3600.0, 200.0, 200.0);
        let mut optimizer = GeneticOptimizer::new(config(10, 6), ConstraintModel::default()).unwrap();

        let mut generations = Vec::new();
        let mut last_feasible = 0;
        optimizer
            .run_with_callback(&space, Strategy::Balanced, |progress| {
                generations.push(progress.generation);
                last_feasible = progress.feasible_individuals;
            })
            .unwrap();

        assert_eq!(generations, (0..=6).collect::<Vec<_>>());
        assert!(last_feasible > 0);
    }

    #[test]
    fn test_infeasible_after_full_budget() {
        // Too long for 7 panels of 2.4 m along the length.
        let space = space(40_000.0, 3000.0, 0.0, 0.0);
        let mut optimizer = GeneticOptimizer::new(config(10, 8), ConstraintModel::default()).unwrap();
        let result = optimizer.run(&space, Strategy::Balanced);

        assert!(matches!(result, Err(LayoutError::InfeasibleLayout(_))));
        assert_eq!(optimizer.generation, 8);
    }

    #[test]
    fn test_caller_supplied_rng() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let space = space(4800.0, 3600.0, 200.0, 200.0);
        let rng = LayoutRng::from_rng(StdRng::seed_from_u64(42));
        let mut supplied =
            GeneticOptimizer::with_rng(config(16, 12), ConstraintModel::default(), rng).unwrap();
        let mut seeded = GeneticOptimizer::new(config(16, 12), ConstraintModel::default()).unwrap();

        let a = supplied.run(&space, Strategy::Balanced).unwrap();
        let b = seeded.run(&space, Strategy::Balanced).unwrap();
        assert_eq!(a.history, b.history);
    }
}
