//! Top-level request and report documents.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    AvailableSpace, CostBreakdown, DEFAULT_MAX_PANEL_DIMENSION, Dimensions, EvolutionStats,
    GeneticConfig, LayoutError, Material, PanelLayout, ScoredCandidate, SearchMethod, Spacing,
    Strategy,
};

/// Everything needed to run one optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Surface to cover.
    pub dimensions: Dimensions,
    /// Perimeter and panel gaps.
    pub spacing: Spacing,
    /// Scoring strategy.
    #[serde(default)]
    pub strategy: Strategy,
    /// Search method.
    #[serde(default)]
    pub method: SearchMethod,
    /// Material pricing. No cost breakdown is produced without it.
    #[serde(default)]
    pub material: Option<Material>,
    /// Largest allowed panel side in millimetres.
    #[serde(default = "default_max_panel_dimension")]
    pub max_panel_dimension: f64,
    /// Genetic optimizer tuning.
    #[serde(default)]
    pub genetic: GeneticConfig,
}

fn default_max_panel_dimension() -> f64 {
    DEFAULT_MAX_PANEL_DIMENSION
}

impl LayoutRequest {
    /// Request with default strategy, method and tuning.
    pub fn new(dimensions: Dimensions, spacing: Spacing) -> Self {
        Self {
            dimensions,
            spacing,
            strategy: Strategy::default(),
            method: SearchMethod::default(),
            material: None,
            max_panel_dimension: DEFAULT_MAX_PANEL_DIMENSION,
            genetic: GeneticConfig::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_genetic(mut self, genetic: GeneticConfig) -> Self {
        self.genetic = genetic;
        self
    }

    /// Validate the parts not already checked at construction.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.max_panel_dimension.is_finite() && self.max_panel_dimension > 0.0) {
            return Err(LayoutError::Configuration(format!(
                "max_panel_dimension must be positive, got {}",
                self.max_panel_dimension
            )));
        }
        if self.method != SearchMethod::Exhaustive {
            self.genetic.validate()?;
        }
        Ok(())
    }

    /// Parse and validate a JSON request.
    pub fn from_json_str(json: &str) -> Result<Self, RequestError> {
        let request: Self = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }

    /// Load and validate a JSON request file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RequestError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Search method that actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodUsed {
    Exhaustive,
    Genetic,
}

/// Result of one optimization, handed to exporters.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub strategy: Strategy,
    pub method: MethodUsed,
    pub available_space: AvailableSpace,
    pub layout: PanelLayout,
    /// Strategy score (exhaustive) or fitness (genetic) of `layout`.
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostBreakdown>,
    /// Runner-up layouts, best first. Empty for genetic search.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<ScoredCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolution: Option<EvolutionStats>,
}

/// Errors loading a request document.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Failed to read request: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse request: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
