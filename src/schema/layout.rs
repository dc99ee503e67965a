//! Output records produced by the optimizer and read by exporters.

use serde::Serialize;

use super::LayoutError;

/// Space left for panels once perimeter gaps are removed, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvailableSpace {
    length: f64,
    width: f64,
    panel_gap: f64,
}

impl AvailableSpace {
    /// Built by the constraint model, which checks both sides are positive.
    pub(crate) fn new(length: f64, width: f64, panel_gap: f64) -> Self {
        Self {
            length,
            width,
            panel_gap,
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Gap between adjacent panels on both axes.
    #[inline]
    pub fn panel_gap(&self) -> f64 {
        self.panel_gap
    }

    /// Available area in square millimetres.
    #[inline]
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Available area in square metres.
    #[inline]
    pub fn area_m2(&self) -> f64 {
        self.area() / 1_000_000.0
    }
}

/// A uniform grid of panels.
///
/// Rows run along the surface length and columns along its width, so
/// `panel_length` is measured along the length axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelLayout {
    panel_length: f64,
    panel_width: f64,
    rows: u32,
    columns: u32,
    total_panels: u32,
    coverage_area: f64,
}

impl PanelLayout {
    /// Create a layout, rejecting empty grids, non-positive panels and panels
    /// larger than `max_panel_dimension`.
    pub fn new(
        panel_length: f64,
        panel_width: f64,
        rows: u32,
        columns: u32,
        max_panel_dimension: f64,
    ) -> Result<Self, LayoutError> {
        if rows == 0 || columns == 0 {
            return Err(LayoutError::Configuration(format!(
                "grid must have at least one row and column, got {rows}x{columns}"
            )));
        }
        if !(panel_length.is_finite() && panel_width.is_finite())
            || panel_length <= 0.0
            || panel_width <= 0.0
        {
            return Err(LayoutError::Configuration(format!(
                "panel sides must be positive, got {panel_length:.1}x{panel_width:.1} mm"
            )));
        }
        if panel_length > max_panel_dimension || panel_width > max_panel_dimension {
            return Err(LayoutError::InfeasibleLayout(format!(
                "panel {panel_length:.1}x{panel_width:.1} mm exceeds maximum of {max_panel_dimension} mm"
            )));
        }

        let total_panels = rows * columns;
        Ok(Self {
            panel_length,
            panel_width,
            rows,
            columns,
            total_panels,
            coverage_area: f64::from(total_panels) * panel_length * panel_width,
        })
    }

    #[inline]
    pub fn panel_length(&self) -> f64 {
        self.panel_length
    }

    #[inline]
    pub fn panel_width(&self) -> f64 {
        self.panel_width
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[inline]
    pub fn total_panels(&self) -> u32 {
        self.total_panels
    }

    /// Area covered by panels, excluding gaps, in square millimetres.
    #[inline]
    pub fn coverage_area(&self) -> f64 {
        self.coverage_area
    }

    /// Covered area in square metres.
    #[inline]
    pub fn coverage_area_m2(&self) -> f64 {
        self.coverage_area / 1_000_000.0
    }

    /// Ratio of the longer panel side to the shorter one (always >= 1).
    pub fn aspect_ratio(&self) -> f64 {
        self.panel_length.max(self.panel_width) / self.panel_length.min(self.panel_width)
    }
}

/// A feasible layout together with its strategy score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub layout: PanelLayout,
    pub score: f64,
}

/// Material, waste and labor cost of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub material_cost: f64,
    pub waste_cost: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
}
