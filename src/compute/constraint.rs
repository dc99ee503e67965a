//! Constraint model: available space and grid feasibility.

use crate::schema::{
    AvailableSpace, DEFAULT_MAX_PANEL_DIMENSION, Dimensions, LayoutError, PanelLayout, Spacing,
};

/// Outcome of fitting a `rows x columns` grid into available space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridFit {
    /// Every panel is positive and within the maximum dimension.
    Feasible { panel_length: f64, panel_width: f64 },
    /// Grid cannot be built. `violation` is positive and grows with how far
    /// the panels are from the feasible region.
    Infeasible { violation: f64 },
}

impl GridFit {
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible { .. })
    }
}

/// Physical constraints every layout must honour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintModel {
    max_panel_dimension: f64,
}

impl Default for ConstraintModel {
    fn default() -> Self {
        Self {
            max_panel_dimension: DEFAULT_MAX_PANEL_DIMENSION,
        }
    }
}

impl ConstraintModel {
    /// Create a model with a custom maximum panel side.
    pub fn new(max_panel_dimension: f64) -> Result<Self, LayoutError> {
        if !(max_panel_dimension.is_finite() && max_panel_dimension > 0.0) {
            return Err(LayoutError::Configuration(format!(
                "max_panel_dimension must be positive, got {max_panel_dimension}"
            )));
        }
        Ok(Self {
            max_panel_dimension,
        })
    }

    #[inline]
    pub fn max_panel_dimension(&self) -> f64 {
        self.max_panel_dimension
    }

    /// Subtract the perimeter gap from both edges of each axis.
    ///
    /// Fails with `InvalidSpacing` when the gaps leave nothing on an axis.
    pub fn available_space(
        &self,
        dimensions: &Dimensions,
        spacing: &Spacing,
    ) -> Result<AvailableSpace, LayoutError> {
        let gap = spacing.perimeter_gap();
        let length = dimensions.length() - 2.0 * gap;
        let width = dimensions.width() - 2.0 * gap;

        for (axis, total, available) in [
            ("length", dimensions.length(), length),
            ("width", dimensions.width(), width),
        ] {
            if available <= 0.0 {
                return Err(LayoutError::InvalidSpacing(format!(
                    "perimeter gap of {gap} mm leaves no space along {axis} ({total} mm)"
                )));
            }
        }

        Ok(AvailableSpace::new(length, width, spacing.panel_gap()))
    }

    /// Fit a grid into available space, distributing each axis evenly after
    /// removing the internal gaps.
    pub fn fit(&self, space: &AvailableSpace, rows: u32, columns: u32) -> GridFit {
        if rows == 0 || columns == 0 {
            return GridFit::Infeasible {
                violation: f64::INFINITY,
            };
        }

        let panel_length = panel_side(space.length(), rows, space.panel_gap());
        let panel_width = panel_side(space.width(), columns, space.panel_gap());

        let violation = self.side_violation(panel_length) + self.side_violation(panel_width);
        if violation > 0.0 {
            GridFit::Infeasible { violation }
        } else {
            GridFit::Feasible {
                panel_length,
                panel_width,
            }
        }
    }

    /// Build the layout for a grid, or report why it is infeasible.
    pub fn layout(
        &self,
        space: &AvailableSpace,
        rows: u32,
        columns: u32,
    ) -> Result<PanelLayout, LayoutError> {
        match self.fit(space, rows, columns) {
            GridFit::Feasible {
                panel_length,
                panel_width,
            } => PanelLayout::new(
                panel_length,
                panel_width,
                rows,
                columns,
                self.max_panel_dimension,
            ),
            GridFit::Infeasible { .. } => Err(LayoutError::InfeasibleLayout(format!(
                "{rows}x{columns} grid does not fit {:.1}x{:.1} mm with panels <= {} mm",
                space.length(),
                space.width(),
                self.max_panel_dimension
            ))),
        }
    }

    fn side_violation(&self, side: f64) -> f64 {
        if side <= 0.0 {
            1.0 + (-side) / self.max_panel_dimension
        } else if side > self.max_panel_dimension {
            (side - self.max_panel_dimension) / self.max_panel_dimension
        } else {
            0.0
        }
    }
}

/// Even share of an axis for `count` panels separated by `gap`.
#[inline]
fn panel_side(available: f64, count: u32, gap: f64) -> f64 {
    let count = f64::from(count);
    (available - (count - 1.0) * gap) / count
}
