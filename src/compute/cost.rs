//! Material cost of a layout.

use crate::schema::{CostBreakdown, Material, PanelLayout};

/// Prices a layout. `Material` is validated on construction, so pricing
/// itself cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostModel;

impl CostModel {
    /// Cost of covering `layout` with `material`.
    ///
    /// Waste is charged on the covered area at the material price. Labor,
    /// when a multiplier is given, is charged on material plus waste.
    pub fn estimate(&self, layout: &PanelLayout, material: &Material) -> CostBreakdown {
        let area = layout.coverage_area_m2();
        let material_cost = area * material.cost_per_area();
        let waste_cost = area * material.waste_factor() * material.cost_per_area();
        let labor_cost = material
            .labor_multiplier()
            .map_or(0.0, |multiplier| (material_cost + waste_cost) * multiplier);

        CostBreakdown {
            material_cost,
            waste_cost,
            labor_cost,
            total_cost: material_cost + waste_cost + labor_cost,
        }
    }
}
