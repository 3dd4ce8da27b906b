//! Latent semantic analysis ranker: a one-component truncated SVD of the sentence
//! count matrix, scoring each sentence by its projection on that component.

use ndarray::Array1;
use tracing::{debug, warn};

use super::TextRanker;
use super::vectorize::{SparseCounts, count_matrix};
use crate::errors::SummaryError;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_MAX_ITERATIONS: usize = 200;
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// SplitMix64, used only to draw the power-iteration start vector.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Outcome of the power iteration.
#[derive(Debug, Clone)]
pub struct LeadingComponent {
    /// Unit-length right singular vector, largest-magnitude entry positive.
    pub vector: Array1<f64>,
    pub iterations: usize,
    /// False when the iteration cap was hit before the step fell below tolerance.
    pub converged: bool,
}

#[derive(Debug, Clone)]
pub struct LsaRanker {
    seed: u64,
    max_iterations: usize,
    tolerance: f64,
}

impl Default for LsaRanker {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl LsaRanker {
    #[must_use]
    pub fn new(seed: u64, max_iterations: usize, tolerance: f64) -> Self {
        Self {
            seed,
            max_iterations: max_iterations.max(1),
            tolerance,
        }
    }

    /// Leading right singular vector of `matrix`.
    ///
    /// Power iteration on `XᵀX` without forming it, touching only the stored non-zero
    /// counts. The start vector is strictly positive, which for a non-negative count
    /// matrix cannot be orthogonal to the leading component. Hitting the iteration cap
    /// is not an error: the last iterate is returned with `converged == false` and a
    /// warning is logged.
    ///
    /// # Errors
    ///
    /// `NumericFailure` for an empty or all-zero matrix, or when iteration leaves the
    /// finite range.
    pub fn leading_component(
        &self,
        matrix: &SparseCounts,
    ) -> Result<LeadingComponent, SummaryError> {
        let (rows, cols) = matrix.dim();
        if rows == 0 || cols == 0 {
            return Err(SummaryError::NumericFailure(format!(
                "cannot decompose a {rows}x{cols} matrix"
            )));
        }

        let mut rng = SplitMix64(self.seed);
        let mut component = Array1::from_shape_fn(cols, |_| 0.5 + rng.next_f64());
        let start_norm = component.dot(&component).sqrt();
        component /= start_norm;

        let mut iterations = 0;
        let mut delta = f64::INFINITY;
        while iterations < self.max_iterations {
            iterations += 1;
            let projected = matrix.mul_vec(&component);
            let mut next = matrix.t_mul_vec(&projected);

            let norm = next.dot(&next).sqrt();
            if !norm.is_finite() || norm <= f64::EPSILON {
                return Err(SummaryError::NumericFailure(
                    "count matrix has no non-zero singular value".to_string(),
                ));
            }
            next /= norm;

            delta = (&next - &component).mapv(f64::abs).sum();
            component = next;
            if delta < self.tolerance {
                break;
            }
        }

        let converged = delta < self.tolerance;
        if converged {
            debug!(rows, cols, iterations, "Power iteration converged");
        } else {
            warn!(
                rows,
                cols,
                iterations,
                delta,
                tolerance = self.tolerance,
                "Power iteration hit its iteration cap before converging"
            );
        }

        let pivot = component
            .iter()
            .copied()
            .fold(0.0_f64, |best, v| if v.abs() > best.abs() { v } else { best });
        if pivot < 0.0 {
            component.mapv_inplace(|v| -v);
        }

        Ok(LeadingComponent {
            vector: component,
            iterations,
            converged,
        })
    }
}

impl TextRanker for LsaRanker {
    fn rank(&self, sentences: &[String]) -> Result<Vec<f64>, SummaryError> {
        let matrix = count_matrix(sentences)?;
        let component = self.leading_component(&matrix.counts)?;
        let scores = matrix.counts.mul_vec(&component.vector);

        if scores.iter().any(|s| !s.is_finite()) {
            return Err(SummaryError::NumericFailure(
                "sentence scores are not finite".to_string(),
            ));
        }

        Ok(scores.to_vec())
    }
}
