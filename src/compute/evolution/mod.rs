//! Evolutionary search over the practical grid range.
//!
//! An alternative to exhaustive candidate search with the same contract:
//! available space and a strategy in, one [`PanelLayout`](crate::schema::PanelLayout) out.
//!
//! # Overview
//!
//! - **Genome Operations** (`genome`): real-valued row/column genes, random
//!   generation, arithmetic crossover and Gaussian mutation
//! - **Fitness** (`fitness`): the exhaustive search score for feasible grids,
//!   a graded penalty for infeasible ones
//! - **Search** (`search`): generational GA with tournament selection and
//!   elitism
//!
//! # Example
//!
//! ```rust
//! use panel_layout::compute::{ConstraintModel, evolution::GeneticOptimizer};
//! use panel_layout::schema::{Dimensions, GeneticConfig, Spacing, Strategy};
//!
//! let constraints = ConstraintModel::default();
//! let space = constraints.available_space(
//!     &Dimensions::new(4800.0, 3600.0)?,
//!     &Spacing::new(200.0, 200.0)?,
//! )?;
//!
//! let mut optimizer = GeneticOptimizer::new(GeneticConfig::default(), constraints)?;
//! let result = optimizer.run_with_callback(&space, Strategy::Balanced, |progress| {
//!     println!("Generation {}: best fitness = {:.3}",
//!         progress.generation, progress.best_fitness);
//! })?;
//!
//! println!("{} x {} panels", result.layout.rows(), result.layout.columns());
//! # Ok::<(), panel_layout::schema::LayoutError>(())
//! ```

mod fitness;
mod genome;
mod search;

pub use fitness::{Evaluation, FitnessEvaluator, INFEASIBLE_FITNESS};
pub use genome::{Chromosome, LayoutRng};
pub use search::{GeneticOptimizer, Individual};
