//! Request-level entry point: validate, pick a search method, price the result.

use log::info;

use super::constraint::ConstraintModel;
use super::cost::CostModel;
use super::evolution::GeneticOptimizer;
use super::range::PracticalRange;
use super::search::CandidateSearch;
use crate::schema::{
    AvailableSpace, LayoutError, LayoutReport, LayoutRequest, MethodUsed, SearchMethod,
};

/// Runner-up layouts included in an exhaustive report.
pub const REPORTED_ALTERNATIVES: usize = 5;

/// Runs one [`LayoutRequest`] end to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimizer;

impl Optimizer {
    /// Validate the request, search for a layout and price it.
    ///
    /// All validation errors are returned before any search work starts.
    pub fn optimize(&self, request: &LayoutRequest) -> Result<LayoutReport, LayoutError> {
        request.validate()?;
        let constraints = ConstraintModel::new(request.max_panel_dimension)?;
        let space = constraints.available_space(&request.dimensions, &request.spacing)?;
        let method = resolve_method(request.method, &space);

        info!(
            "Optimizing {:.0}x{:.0} mm surface ({:.2} m2 available) with {:?} search, {:?} strategy",
            request.dimensions.length(),
            request.dimensions.width(),
            space.area_m2(),
            method,
            request.strategy
        );

        let mut report = match method {
            MethodUsed::Exhaustive => {
                let ranked = CandidateSearch::new(constraints).rank(&space, request.strategy)?;
                let best = ranked[0];
                LayoutReport {
                    strategy: request.strategy,
                    method,
                    available_space: space,
                    layout: best.layout,
                    score: best.score,
                    cost: None,
                    alternatives: ranked
                        .into_iter()
                        .skip(1)
                        .take(REPORTED_ALTERNATIVES)
                        .collect(),
                    evolution: None,
                }
            }
            MethodUsed::Genetic => {
                let mut optimizer = GeneticOptimizer::new(request.genetic.clone(), constraints)?;
                let result = optimizer.run(&space, request.strategy)?;
                LayoutReport {
                    strategy: request.strategy,
                    method,
                    available_space: space,
                    layout: result.layout,
                    score: result.fitness,
                    cost: None,
                    alternatives: Vec::new(),
                    evolution: Some(result.stats),
                }
            }
        };

        report.cost = request
            .material
            .map(|material| CostModel.estimate(&report.layout, &material));

        Ok(report)
    }
}

/// Decide which search runs for this space.
pub fn resolve_method(method: SearchMethod, space: &AvailableSpace) -> MethodUsed {
    match method {
        SearchMethod::Exhaustive => MethodUsed::Exhaustive,
        SearchMethod::Genetic => MethodUsed::Genetic,
        SearchMethod::Auto {
            max_exhaustive_candidates,
        } => {
            if PracticalRange::for_space(space).candidate_count() <= max_exhaustive_candidates {
                MethodUsed::Exhaustive
            } else {
                MethodUsed::Genetic
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Dimensions, Material, Spacing, Strategy};

    fn request() -> LayoutRequest {
        LayoutRequest::new(
            Dimensions::new(4800.0, 3600.0).unwrap(),
            Spacing::new(200.0, 200.0).unwrap(),
        )
    }

    #[test]
    fn test_auto_resolution_threshold() {
        let space = ConstraintModel::default()
            .available_space(
                &Dimensions::new(4800.0, 3600.0).unwrap(),
                &Spacing::new(200.0, 200.0).unwrap(),
            )
            .unwrap();
        // 14.08 m2 gives a 1..=5 range, 25 candidates.
        let auto = |max| SearchMethod::Auto {
            max_exhaustive_candidates: max,
        };
        assert_eq!(resolve_method(auto(25), &space), MethodUsed::Exhaustive);
        assert_eq!(resolve_method(auto(24), &space), MethodUsed::Genetic);
        assert_eq!(resolve_method(SearchMethod::default(), &space), MethodUsed::Exhaustive);
    }

    #[test]
    fn test_default_auto_threshold_tracks_range_tiers() {
        let SearchMethod::Auto {
            max_exhaustive_candidates,
        } = SearchMethod::default()
        else {
            panic!("default method should be auto");
        };
        let widest = [1.0, 10.0, 20.0, 100.0]
            .into_iter()
            .map(|area| PracticalRange::for_area(area).candidate_count())
            .max()
            .unwrap();
        assert_eq!(max_exhaustive_candidates, widest);

        // A 4 m2 surface (16 pairs) stays exhaustive below the widest tiers.
        let small = ConstraintModel::default()
            .available_space(
                &Dimensions::new(2000.0, 2000.0).unwrap(),
                &Spacing::new(0.0, 0.0).unwrap(),
            )
            .unwrap();
        let large = ConstraintModel::default()
            .available_space(
                &Dimensions::new(8000.0, 6000.0).unwrap(),
                &Spacing::new(0.0, 0.0).unwrap(),
            )
            .unwrap();
        let auto = SearchMethod::Auto {
            max_exhaustive_candidates: 16,
        };
        assert_eq!(resolve_method(auto, &small), MethodUsed::Exhaustive);
        assert_eq!(resolve_method(auto, &large), MethodUsed::Genetic);
        assert_eq!(resolve_method(SearchMethod::default(), &large), MethodUsed::Exhaustive);
    }

    #[test]
    fn test_exhaustive_report_has_alternatives() {
        let report = Optimizer
            .optimize(&request().with_method(SearchMethod::Exhaustive))
            .unwrap();

        assert_eq!(report.method, MethodUsed::Exhaustive);
        assert_eq!(report.alternatives.len(), REPORTED_ALTERNATIVES);
        assert!(report.alternatives.iter().all(|alt| alt.score <= report.score));
        assert!(report.evolution.is_none());
        assert!(report.cost.is_none());
    }

    #[test]
    fn test_genetic_report_has_stats() {
        let report = Optimizer
            .optimize(&request().with_method(SearchMethod::Genetic))
            .unwrap();

        assert_eq!(report.method, MethodUsed::Genetic);
        assert!(report.alternatives.is_empty());
        assert!(report.evolution.is_some());
    }

    #[test]
    fn test_cost_attached_when_material_given() {
        let material = Material::new(225.0, 0.15, None).unwrap();
        let report = Optimizer
            .optimize(&request().with_material(material))
            .unwrap();

        let cost = report.cost.unwrap();
        let expected = report.layout.coverage_area_m2() * 225.0 * 1.15;
        assert!((cost.total_cost - expected).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_spacing_fails_before_search() {
        let request = LayoutRequest::new(
            Dimensions::new(100.0, 100.0).unwrap(),
            Spacing::new(60.0, 60.0).unwrap(),
        )
        .with_strategy(Strategy::MinimizeSeams);

        assert!(matches!(
            Optimizer.optimize(&request),
            Err(LayoutError::InvalidSpacing(_))
        ));
    }
}
