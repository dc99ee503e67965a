//! Scoring strategies for candidate grids.
//!
//! Each [`Strategy`] variant is bound to a pure function of [`GridMetrics`].
//! Scores are higher-is-better and lie in `(0, 1]` for feasible grids.

use crate::schema::{AvailableSpace, Strategy};

/// Panel count the balanced strategy steers towards.
pub const PREFERRED_PANEL_COUNT: u32 = 9;

/// Weight of panel-count closeness in the balanced score.
pub const COUNT_WEIGHT: f64 = 0.4;
/// Weight of aspect-ratio balance in the balanced score.
pub const ASPECT_WEIGHT: f64 = 0.3;
/// Weight of coverage efficiency in the balanced score.
pub const COVERAGE_WEIGHT: f64 = 0.3;

/// Geometry of one feasible grid, as seen by the scoring functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub rows: u32,
    pub columns: u32,
    pub panel_length: f64,
    pub panel_width: f64,
    /// Available area in square millimetres.
    pub available_area: f64,
}

impl GridMetrics {
    pub fn new(
        space: &AvailableSpace,
        rows: u32,
        columns: u32,
        panel_length: f64,
        panel_width: f64,
    ) -> Self {
        Self {
            rows,
            columns,
            panel_length,
            panel_width,
            available_area: space.area(),
        }
    }

    #[inline]
    pub fn total_panels(&self) -> u32 {
        self.rows * self.columns
    }

    /// Closeness of the panel count to [`PREFERRED_PANEL_COUNT`], in `(0, 1]`.
    pub fn count_closeness(&self) -> f64 {
        let diff = f64::from(self.total_panels()) - f64::from(PREFERRED_PANEL_COUNT);
        1.0 / (1.0 + diff.abs())
    }

    /// Shorter panel side over longer panel side, in `(0, 1]`.
    pub fn aspect_balance(&self) -> f64 {
        self.panel_length.min(self.panel_width) / self.panel_length.max(self.panel_width)
    }

    /// Share of the available area covered by panels, in `(0, 1]`.
    pub fn coverage_efficiency(&self) -> f64 {
        let covered = f64::from(self.total_panels()) * self.panel_length * self.panel_width;
        covered / self.available_area
    }
}

impl Strategy {
    /// Score a feasible grid.
    pub fn score(&self, metrics: &GridMetrics) -> f64 {
        match self {
            Self::Balanced => balanced_score(metrics),
            Self::MinimizeSeams => minimize_seams_score(metrics),
        }
    }
}

fn balanced_score(metrics: &GridMetrics) -> f64 {
    COUNT_WEIGHT * metrics.count_closeness()
        + ASPECT_WEIGHT * metrics.aspect_balance()
        + COVERAGE_WEIGHT * metrics.coverage_efficiency()
}

fn minimize_seams_score(metrics: &GridMetrics) -> f64 {
    1.0 / f64::from(metrics.total_panels())
}
