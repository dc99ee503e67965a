//! Error taxonomy for layout optimization.

/// Errors raised while validating inputs or searching for a layout.
///
/// Validation variants (`InvalidDimension`, `InvalidSpacing`, `Configuration`)
/// are raised before any search work starts. `InfeasibleLayout` is raised only
/// once a search has exhausted its space without finding a layout that honours
/// the maximum panel dimension.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Surface dimensions must be positive (length {length} mm, width {width} mm)")]
    InvalidDimension { length: f64, width: f64 },
    #[error("Invalid spacing: {0}")]
    InvalidSpacing(String),
    #[error("No feasible layout: {0}")]
    InfeasibleLayout(String),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl LayoutError {
    /// True for errors raised by input validation rather than by search.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::InfeasibleLayout(_))
    }
}
