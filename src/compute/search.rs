//! Exhaustive candidate search over the practical range.

use log::{debug, info};

use super::constraint::{ConstraintModel, GridFit};
use super::range::PracticalRange;
use super::scoring::GridMetrics;
use crate::schema::{AvailableSpace, LayoutError, PanelLayout, ScoredCandidate, Strategy};

/// Enumerates every grid in the practical range and keeps the best.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateSearch {
    constraints: ConstraintModel,
}

impl CandidateSearch {
    pub fn new(constraints: ConstraintModel) -> Self {
        Self { constraints }
    }

    #[inline]
    pub fn constraints(&self) -> &ConstraintModel {
        &self.constraints
    }

    /// Score one grid, or `None` if it is infeasible.
    pub fn evaluate(
        &self,
        space: &AvailableSpace,
        strategy: Strategy,
        rows: u32,
        columns: u32,
    ) -> Option<ScoredCandidate> {
        let GridFit::Feasible {
            panel_length,
            panel_width,
        } = self.constraints.fit(space, rows, columns)
        else {
            return None;
        };

        let metrics = GridMetrics::new(space, rows, columns, panel_length, panel_width);
        let layout = PanelLayout::new(
            panel_length,
            panel_width,
            rows,
            columns,
            self.constraints.max_panel_dimension(),
        )
        .ok()?;

        Some(ScoredCandidate {
            layout,
            score: strategy.score(&metrics),
        })
    }

    /// Every feasible candidate, best first. Equal scores keep canonical
    /// enumeration order (ascending rows, then ascending columns).
    pub fn rank(
        &self,
        space: &AvailableSpace,
        strategy: Strategy,
    ) -> Result<Vec<ScoredCandidate>, LayoutError> {
        let range = PracticalRange::for_space(space);
        let mut ranked: Vec<ScoredCandidate> = range
            .pairs()
            .filter_map(|(rows, columns)| self.evaluate(space, strategy, rows, columns))
            .collect();

        if ranked.is_empty() {
            return Err(self.exhausted(space, &range));
        }

        // Stable sort: ties stay in enumeration order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(ranked)
    }

    /// Highest-scoring feasible candidate. The first one enumerated wins ties.
    pub fn search(
        &self,
        space: &AvailableSpace,
        strategy: Strategy,
    ) -> Result<ScoredCandidate, LayoutError> {
        let range = PracticalRange::for_space(space);
        debug!(
            "Searching {} grids ({}..={} per axis) for {:.2} m2, strategy {:?}",
            range.candidate_count(),
            range.min(),
            range.max(),
            space.area_m2(),
            strategy
        );

        let mut best: Option<ScoredCandidate> = None;
        for (rows, columns) in range.pairs() {
            let Some(candidate) = self.evaluate(space, strategy, rows, columns) else {
                continue;
            };
            debug!("  {}x{} scored {:.6}", rows, columns, candidate.score);

            if is_better(&candidate, best.as_ref()) {
                best = Some(candidate);
            }
        }

        let best = best.ok_or_else(|| self.exhausted(space, &range))?;
        info!(
            "Best grid {}x{} ({:.1}x{:.1} mm panels), score {:.6}",
            best.layout.rows(),
            best.layout.columns(),
            best.layout.panel_length(),
            best.layout.panel_width(),
            best.score
        );
        Ok(best)
    }

    fn exhausted(&self, space: &AvailableSpace, range: &PracticalRange) -> LayoutError {
        LayoutError::InfeasibleLayout(format!(
            "no grid with {}..={} rows and columns fits {:.1}x{:.1} mm with panels <= {} mm",
            range.min(),
            range.max(),
            space.length(),
            space.width(),
            self.constraints.max_panel_dimension()
        ))
    }
}

/// Strictly higher score replaces the incumbent, so the first candidate
/// enumerated wins ties.
#[inline]
fn is_better(candidate: &ScoredCandidate, incumbent: Option<&ScoredCandidate>) -> bool {
    incumbent.is_none_or(|best| candidate.score > best.score)
}
