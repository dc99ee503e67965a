//! Input types for layout optimization: surface, spacing, material and strategy.
//!
//! Every type validates its invariants on construction, including when it is
//! deserialized, so a value that exists is a value the optimizer can use.

use serde::{Deserialize, Serialize};

use super::LayoutError;

/// Largest panel side the optimizer will produce, in millimetres.
pub const DEFAULT_MAX_PANEL_DIMENSION: f64 = 2400.0;

/// Rectangular surface to cover, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    length: f64,
    width: f64,
}

#[derive(Deserialize)]
struct RawDimensions {
    length: f64,
    width: f64,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = LayoutError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.length, raw.width)
    }
}

impl Dimensions {
    /// Create surface dimensions. Both sides must be finite and positive.
    pub fn new(length: f64, width: f64) -> Result<Self, LayoutError> {
        if !(length.is_finite() && width.is_finite() && length > 0.0 && width > 0.0) {
            return Err(LayoutError::InvalidDimension { length, width });
        }
        Ok(Self { length, width })
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Surface area in square metres.
    #[inline]
    pub fn area_m2(&self) -> f64 {
        self.length * self.width / 1_000_000.0
    }
}

/// Gaps around and between panels, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpacing")]
pub struct Spacing {
    perimeter_gap: f64,
    panel_gap: f64,
}

#[derive(Deserialize)]
struct RawSpacing {
    perimeter_gap: f64,
    panel_gap: f64,
}

impl TryFrom<RawSpacing> for Spacing {
    type Error = LayoutError;

    fn try_from(raw: RawSpacing) -> Result<Self, Self::Error> {
        Self::new(raw.perimeter_gap, raw.panel_gap)
    }
}

impl Spacing {
    /// Create spacing. Both gaps must be finite and non-negative.
    pub fn new(perimeter_gap: f64, panel_gap: f64) -> Result<Self, LayoutError> {
        for (name, gap) in [("perimeter", perimeter_gap), ("panel", panel_gap)] {
            if !gap.is_finite() || gap < 0.0 {
                return Err(LayoutError::InvalidSpacing(format!(
                    "{name} gap must be non-negative, got {gap} mm"
                )));
            }
        }
        Ok(Self {
            perimeter_gap,
            panel_gap,
        })
    }

    /// Gap subtracted from both edges of each axis.
    #[inline]
    pub fn perimeter_gap(&self) -> f64 {
        self.perimeter_gap
    }

    /// Gap separating adjacent panels.
    #[inline]
    pub fn panel_gap(&self) -> f64 {
        self.panel_gap
    }
}

/// Covering material pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMaterial")]
pub struct Material {
    cost_per_area: f64,
    waste_factor: f64,
    labor_multiplier: Option<f64>,
}

#[derive(Deserialize)]
struct RawMaterial {
    cost_per_area: f64,
    #[serde(default = "default_waste_factor")]
    waste_factor: f64,
    #[serde(default)]
    labor_multiplier: Option<f64>,
}

fn default_waste_factor() -> f64 {
    0.15
}

impl TryFrom<RawMaterial> for Material {
    type Error = LayoutError;

    fn try_from(raw: RawMaterial) -> Result<Self, Self::Error> {
        Self::new(raw.cost_per_area, raw.waste_factor, raw.labor_multiplier)
    }
}

impl Material {
    /// Create material pricing.
    ///
    /// `cost_per_area` is per square metre. `waste_factor` and
    /// `labor_multiplier` are fractions (0.15 means 15%).
    pub fn new(
        cost_per_area: f64,
        waste_factor: f64,
        labor_multiplier: Option<f64>,
    ) -> Result<Self, LayoutError> {
        let check = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(LayoutError::Configuration(format!(
                    "{name} must be non-negative, got {value}"
                )))
            }
        };

        check("cost_per_area", cost_per_area)?;
        check("waste_factor", waste_factor)?;
        if let Some(multiplier) = labor_multiplier {
            check("labor_multiplier", multiplier)?;
        }

        Ok(Self {
            cost_per_area,
            waste_factor,
            labor_multiplier,
        })
    }

    #[inline]
    pub fn cost_per_area(&self) -> f64 {
        self.cost_per_area
    }

    #[inline]
    pub fn waste_factor(&self) -> f64 {
        self.waste_factor
    }

    #[inline]
    pub fn labor_multiplier(&self) -> Option<f64> {
        self.labor_multiplier
    }
}

/// Scoring strategy used to rank candidate grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Weighted blend of panel count, aspect ratio and coverage.
    #[default]
    Balanced,
    /// Fewest panels wins.
    MinimizeSeams,
}

/// Search method used to explore the grid space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchMethod {
    /// Enumerate every grid in the practical range.
    Exhaustive,
    /// Evolutionary search over the practical range.
    Genetic,
    /// Exhaustive when the practical range is small enough, genetic otherwise.
    Auto {
        #[serde(default = "default_max_exhaustive_candidates")]
        max_exhaustive_candidates: usize,
    },
}

impl Default for SearchMethod {
    fn default() -> Self {
        Self::Auto {
            max_exhaustive_candidates: default_max_exhaustive_candidates(),
        }
    }
}

/// Pair count of the widest practical range (5 counts per axis). Every
/// built-in tier stays exhaustive by default; lower the threshold to hand
/// larger surfaces to the genetic optimizer.
fn default_max_exhaustive_candidates() -> usize {
    25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_reject_non_positive() {
        assert!(Dimensions::new(4800.0, 3600.0).is_ok());
        assert!(matches!(
            Dimensions::new(0.0, 3600.0),
            Err(LayoutError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Dimensions::new(4800.0, -1.0),
            Err(LayoutError::InvalidDimension { .. })
        ));
        assert!(Dimensions::new(f64::NAN, 100.0).is_err());
    }

    #[test]
    fn test_spacing_rejects_negative_gap() {
        assert!(Spacing::new(0.0, 0.0).is_ok());
        assert!(matches!(
            Spacing::new(-1.0, 10.0),
            Err(LayoutError::InvalidSpacing(_))
        ));
        assert!(matches!(
            Spacing::new(10.0, -0.5),
            Err(LayoutError::InvalidSpacing(_))
        ));
    }

    #[test]
    fn test_material_rejects_negative_fields() {
        assert!(Material::new(225.0, 0.15, Some(0.3)).is_ok());
        assert!(matches!(
            Material::new(-1.0, 0.15, None),
            Err(LayoutError::Configuration(_))
        ));
        assert!(matches!(
            Material::new(225.0, -0.1, None),
            Err(LayoutError::Configuration(_))
        ));
        assert!(matches!(
            Material::new(225.0, 0.15, Some(-0.2)),
            Err(LayoutError::Configuration(_))
        ));
    }

    #[test]
    fn test_deserialization_validates() {
        let ok: Dimensions = serde_json::from_str(r#"{"length": 4800, "width": 3600}"#).unwrap();
        assert_eq!(ok.length(), 4800.0);

        let bad = serde_json::from_str::<Dimensions>(r#"{"length": 0, "width": 3600}"#);
        assert!(bad.is_err());

        let material: Material = serde_json::from_str(r#"{"cost_per_area": 225}"#).unwrap();
        assert_eq!(material.waste_factor(), 0.15);
        assert_eq!(material.labor_multiplier(), None);
    }

    #[test]
    fn test_strategy_and_method_serialization() {
        let strategy: Strategy = serde_json::from_str(r#""minimize_seams""#).unwrap();
        assert_eq!(strategy, Strategy::MinimizeSeams);

        let method: SearchMethod = serde_json::from_str(r#"{"type": "auto"}"#).unwrap();
        assert_eq!(method, SearchMethod::default());

        let method: SearchMethod = serde_json::from_str(r#"{"type": "genetic"}"#).unwrap();
        assert_eq!(method, SearchMethod::Genetic);
    }
}
