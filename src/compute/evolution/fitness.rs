//! Fitness evaluation for evolutionary layout search.

use super::genome::Chromosome;
use crate::compute::{ConstraintModel, GridFit, GridMetrics, PracticalRange};
use crate::schema::{AvailableSpace, Strategy};

/// Fitness ceiling for infeasible grids. Feasible scores are positive, so any
/// feasible individual beats any infeasible one, while infeasible individuals
/// still rank by how far they are from feasibility.
pub const INFEASIBLE_FITNESS: f64 = -1.0;

/// Evaluation of a single chromosome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub fitness: f64,
    pub grid: (u32, u32),
    pub feasible: bool,
}

/// Scores chromosomes against one surface and strategy.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator {
    constraints: ConstraintModel,
    space: AvailableSpace,
    strategy: Strategy,
    range: PracticalRange,
}

impl FitnessEvaluator {
    pub fn new(constraints: ConstraintModel, space: AvailableSpace, strategy: Strategy) -> Self {
        Self {
            constraints,
            space,
            strategy,
            range: PracticalRange::for_space(&space),
        }
    }

    #[inline]
    pub fn range(&self) -> &PracticalRange {
        &self.range
    }

    /// Round the genes and score the resulting grid with the same function
    /// exhaustive search uses. Infeasible grids get a penalty below
    /// [`INFEASIBLE_FITNESS`].
    pub fn evaluate(&self, chromosome: &Chromosome) -> Evaluation {
        let grid @ (rows, columns) = chromosome.grid(&self.range);

        match self.constraints.fit(&self.space, rows, columns) {
            GridFit::Feasible {
                panel_length,
                panel_width,
            } => {
                let metrics =
                    GridMetrics::new(&self.space, rows, columns, panel_length, panel_width);
                Evaluation {
                    fitness: self.strategy.score(&metrics),
                    grid,
                    feasible: true,
                }
            }
            GridFit::Infeasible { violation } => Evaluation {
                fitness: INFEASIBLE_FITNESS - violation,
                grid,
                feasible: false,
            },
        }
    }
}
