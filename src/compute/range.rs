//! Practical range of row and column counts for a surface.

use crate::schema::AvailableSpace;

/// Area tiers in square metres and the per-axis panel count range searched
/// for areas below each upper bound. Both bounds are non-decreasing, so the
/// range only widens as the area grows.
const RANGE_TIERS: [(f64, u32, u32); 4] = [
    (5.0, 1, 4),
    (15.0, 1, 5),
    (30.0, 2, 6),
    (f64::INFINITY, 3, 7),
];

/// Inclusive per-axis bounds on row and column counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticalRange {
    min: u32,
    max: u32,
}

impl PracticalRange {
    /// Range for an available area, in square metres.
    pub fn for_area(area_m2: f64) -> Self {
        let (_, min, max) = RANGE_TIERS
            .iter()
            .copied()
            .find(|(upper, _, _)| area_m2 < *upper)
            .unwrap_or(RANGE_TIERS[RANGE_TIERS.len() - 1]);
        Self { min, max }
    }

    /// Range for available space.
    pub fn for_space(space: &AvailableSpace) -> Self {
        Self::for_area(space.area_m2())
    }

    #[inline]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of `(rows, columns)` pairs in the range.
    pub fn candidate_count(&self) -> usize {
        let per_axis = (self.max - self.min + 1) as usize;
        per_axis * per_axis
    }

    /// All pairs in canonical order: ascending rows, then ascending columns.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (min, max) = (self.min, self.max);
        (min..=max).flat_map(move |rows| (min..=max).map(move |columns| (rows, columns)))
    }

    /// Clamp a real-valued gene into the range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(f64::from(self.min), f64::from(self.max))
    }

    /// Round a real-valued gene to a count inside the range.
    #[inline]
    pub fn round(&self, value: f64) -> u32 {
        self.clamp(value).round() as u32
    }
}
