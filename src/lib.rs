//! Panel Layout - Constrained grid subdivision of rectangular ceilings.
//!
//! This crate computes how to split a rectangular surface into a uniform grid
//! of panels that respect a maximum panel size, scoring candidate grids by
//! panel count, aspect ratio and coverage, and prices the chosen layout.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Input, configuration and output types
//! - `compute`: Constraint model, exhaustive and genetic search, cost model
//!
//! # Example
//!
//! ```rust
//! use panel_layout::{
//!     compute::Optimizer,
//!     schema::{Dimensions, LayoutRequest, Material, Spacing, Strategy},
//! };
//!
//! let request = LayoutRequest::new(
//!     Dimensions::new(4800.0, 3600.0)?,
//!     Spacing::new(200.0, 200.0)?,
//! )
//! .with_strategy(Strategy::Balanced)
//! .with_material(Material::new(225.0, 0.15, None)?);
//!
//! let report = Optimizer.optimize(&request)?;
//! println!(
//!     "{} x {} panels of {:.0} x {:.0} mm",
//!     report.layout.rows(),
//!     report.layout.columns(),
//!     report.layout.panel_length(),
//!     report.layout.panel_width()
//! );
//! # Ok::<(), panel_layout::schema::LayoutError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::GeneticOptimizer;
pub use compute::{CandidateSearch, ConstraintModel, CostModel, Optimizer};
pub use schema::{
    CostBreakdown, Dimensions, LayoutError, LayoutReport, LayoutRequest, Material, PanelLayout,
    Spacing, Strategy,
};
