//! Compute module - Constraint checking, search and costing for panel layouts.

mod constraint;
mod cost;
mod optimizer;
mod range;
mod scoring;
mod search;

pub mod evolution;

pub use constraint::*;
pub use cost::*;
pub use optimizer::*;
pub use range::*;
pub use scoring::*;
pub use search::*;
