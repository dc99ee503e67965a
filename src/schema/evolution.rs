//! Configuration and reporting types for the genetic layout optimizer.

use serde::{Deserialize, Serialize};

use super::{LayoutError, PanelLayout};

/// Genetic optimizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Population and termination settings.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Individuals drawn per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Probability of arithmetic crossover (0.0-1.0). Otherwise the child is
    /// a copy of the first parent, subject to mutation.
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Per-gene mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Standard deviation of Gaussian mutation, in panels.
    #[serde(default = "default_mutation_sigma")]
    pub mutation_sigma: f64,
    /// Fraction of each generation copied unchanged into the next.
    #[serde(default = "default_elite_fraction")]
    pub elite_fraction: f64,
    /// Seed for the random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            tournament_size: default_tournament_size(),
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            mutation_sigma: default_mutation_sigma(),
            elite_fraction: default_elite_fraction(),
            seed: default_seed(),
        }
    }
}

fn default_tournament_size() -> usize {
    3
}
fn default_crossover_rate() -> f64 {
    0.7
}
fn default_mutation_rate() -> f64 {
    0.1
}
fn default_mutation_sigma() -> f64 {
    2.0
}
fn default_elite_fraction() -> f64 {
    0.2
}
fn default_seed() -> u64 {
    42
}

/// Population and generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals in population.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Maximum number of generations.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Stop if the best fitness has not improved for N generations.
    #[serde(default = "default_stagnation_limit")]
    pub stagnation_limit: Option<usize>,
    /// Wall-clock budget in seconds, checked between generations.
    #[serde(default)]
    pub time_limit_secs: Option<f64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            max_generations: default_max_generations(),
            stagnation_limit: default_stagnation_limit(),
            time_limit_secs: None,
        }
    }
}

fn default_population_size() -> usize {
    50
}
fn default_max_generations() -> usize {
    100
}
fn default_stagnation_limit() -> Option<usize> {
    Some(25)
}

// ============================================================================
// Progress and Result Types
// ============================================================================

/// Progress update emitted after each evaluated generation.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionProgress {
    /// Current generation number (0 is the initial population).
    pub generation: usize,
    /// Total generations planned.
    pub total_generations: usize,
    /// Best fitness seen so far.
    pub best_fitness: f64,
    /// Average fitness of current population.
    pub avg_fitness: f64,
    /// Best fitness this generation.
    pub generation_best: f64,
    /// Generations since last improvement.
    pub stagnation_count: usize,
    /// Rounded (rows, columns) of the current best individual.
    pub best_grid: (u32, u32),
    /// Individuals whose grid satisfies the constraints.
    pub feasible_individuals: usize,
}

/// Per-generation fitness history.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct EvolutionHistory {
    /// Best fitness per generation.
    pub best_fitness: Vec<f64>,
    /// Average fitness per generation.
    pub avg_fitness: Vec<f64>,
}

/// Statistics from a genetic run.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionStats {
    /// Generations evolved after the initial population.
    pub generations: usize,
    /// Total fitness evaluations performed.
    pub total_evaluations: u64,
    /// Best fitness in the initial population.
    pub initial_best_fitness: f64,
    /// Best fitness achieved.
    pub best_fitness: f64,
    /// Average fitness of final population.
    pub final_avg_fitness: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Reason evolution stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Reached maximum generations.
    MaxGenerations,
    /// Stagnation limit hit.
    Stagnation,
    /// Wall-clock budget exhausted.
    TimeLimit,
    /// Caller cancelled.
    Cancelled,
}

/// Final result of a genetic run.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionResult {
    /// Best layout found.
    pub layout: PanelLayout,
    /// Fitness of the best layout.
    pub fitness: f64,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}

// ============================================================================
// Validation
// ============================================================================

/// Genetic configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeneticConfigError {
    #[error("Population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("Tournament size must be at least 1")]
    EmptyTournament,
    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("elite_fraction must be within [0, 1), got {0}")]
    EliteFractionOutOfRange(f64),
    #[error("Mutation sigma must be positive, got {0}")]
    InvalidSigma(f64),
    #[error("Time limit must be positive, got {0}")]
    InvalidTimeLimit(f64),
}

impl From<GeneticConfigError> for LayoutError {
    fn from(err: GeneticConfigError) -> Self {
        LayoutError::Configuration(err.to_string())
    }
}

impl GeneticConfig {
    /// Validate genetic configuration.
    pub fn validate(&self) -> Result<(), GeneticConfigError> {
        if self.population.size < 2 {
            return Err(GeneticConfigError::PopulationTooSmall(self.population.size));
        }
        if self.tournament_size == 0 {
            return Err(GeneticConfigError::EmptyTournament);
        }

        let check_rate = |name: &'static str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(GeneticConfigError::RateOutOfRange { name, value })
            }
        };
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if !(0.0..1.0).contains(&self.elite_fraction) {
            return Err(GeneticConfigError::EliteFractionOutOfRange(self.elite_fraction));
        }

        if !(self.mutation_sigma.is_finite() && self.mutation_sigma > 0.0) {
            return Err(GeneticConfigError::InvalidSigma(self.mutation_sigma));
        }
        if let Some(limit) = self.population.time_limit_secs
            && !(limit.is_finite() && limit > 0.0)
        {
            return Err(GeneticConfigError::InvalidTimeLimit(limit));
        }

        Ok(())
    }

    /// Number of elites carried into each generation. At least one, so the
    /// best fitness never regresses, and fewer than the population, so every
    /// generation breeds at least one child.
    pub fn elite_count(&self) -> usize {
        let size = self.population.size;
        let max = size.saturating_sub(1).max(1);
        ((size as f64 * self.elite_fraction).ceil() as usize).clamp(1, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = GeneticConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population.size, 50);
        assert_eq!(config.population.max_generations, 100);
        assert_eq!(config.elite_count(), 10);
    }

    #[test]
    fn test_invalid_rates() {
        let config = GeneticConfig {
            crossover_rate: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(GeneticConfigError::RateOutOfRange {
                name: "crossover_rate",
                value: 1.5
            })
        );

        let config = GeneticConfig {
            mutation_sigma: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GeneticConfigError::InvalidSigma(_))
        ));
    }

    #[test]
    fn test_full_elite_fraction_rejected() {
        let config = GeneticConfig {
            elite_fraction: 1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(GeneticConfigError::EliteFractionOutOfRange(1.0))
        );

        let config = GeneticConfig {
            elite_fraction: 0.99,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.elite_count(), config.population.size - 1);
    }

    #[test]
    fn test_population_too_small() {
        let config = GeneticConfig {
            population: PopulationConfig {
                size: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        let err: LayoutError = config.validate().unwrap_err().into();
        assert!(matches!(err, LayoutError::Configuration(_)));
    }

    #[test]
    fn test_elite_count_at_least_one() {
        let config = GeneticConfig {
            elite_fraction: 0.0,
            population: PopulationConfig {
                size: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.elite_count(), 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneticConfig =
            serde_json::from_str(r#"{"population": {"size": 20}, "seed": 7}"#).unwrap();
        assert_eq!(config.population.size, 20);
        assert_eq!(config.population.max_generations, 100);
        assert_eq!(config.tournament_size, 3);
        assert_eq!(config.seed, 7);
    }
}
