//! Chromosome manipulation for evolutionary layout search.
//!
//! Provides random generation, crossover, and mutation operations.

use rand::prelude::*;

use crate::compute::PracticalRange;

/// Real-valued genes for row and column counts. Genes are rounded to whole
/// panels only when a chromosome is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromosome {
    pub rows: f64,
    pub columns: f64,
}

impl Chromosome {
    pub fn new(rows: f64, columns: f64) -> Self {
        Self { rows, columns }
    }

    /// Integer grid this chromosome encodes, clamped to the range.
    #[inline]
    pub fn grid(&self, range: &PracticalRange) -> (u32, u32) {
        (range.round(self.rows), range.round(self.columns))
    }
}

/// Explicit random source for the genetic optimizer.
///
/// Each optimizer owns one, so concurrent runs never share a stream and a
/// fixed seed reproduces a run exactly.
pub struct LayoutRng {
    rng: StdRng,
}

impl LayoutRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Wrap a caller-constructed generator.
    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Chromosome with both genes uniform over the range.
    pub fn random_chromosome(&mut self, range: &PracticalRange) -> Chromosome {
        Chromosome {
            rows: self.uniform(range),
            columns: self.uniform(range),
        }
    }

    fn uniform(&mut self, range: &PracticalRange) -> f64 {
        self.rng.gen_range(f64::from(range.min())..=f64::from(range.max()))
    }

    /// Arithmetic crossover: the child sits midway between its parents.
    pub fn crossover(&mut self, parent1: &Chromosome, parent2: &Chromosome) -> Chromosome {
        Chromosome {
            rows: blend(parent1.rows, parent2.rows, 0.5),
            columns: blend(parent1.columns, parent2.columns, 0.5),
        }
    }

    /// Perturb each gene with probability `rate`.
    pub fn mutate(
        &mut self,
        chromosome: &mut Chromosome,
        rate: f64,
        sigma: f64,
        range: &PracticalRange,
    ) {
        if self.chance(rate) {
            chromosome.rows = self.gaussian_mutate(chromosome.rows, sigma, range);
        }
        if self.chance(rate) {
            chromosome.columns = self.gaussian_mutate(chromosome.columns, sigma, range);
        }
    }

    /// Gaussian mutation: add `N(0, sigma)` noise and clamp to the range.
    pub fn gaussian_mutate(&mut self, value: f64, sigma: f64, range: &PracticalRange) -> f64 {
        let noise: f64 = self.rng.sample(rand_distr::StandardNormal);
        range.clamp(value + noise * sigma)
    }

    /// True with probability `p` (0.0-1.0).
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.r#gen::<f64>() < p
    }

    /// Uniform index in `0..len`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Linear blend between two values.
fn blend(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
