//! Deterministic arrival generator.

use super::types::{Color, Unit};
use crate::error::{Result, SequencingError};
use crate::random::create_rng;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::SliceRandom;

/// Reference color mix, one weight per palette color.
pub const DEFAULT_DISTRIBUTION: [f64; 12] = [
    0.40, 0.25, 0.12, 0.08, 0.03, 0.02, 0.02, 0.02, 0.02, 0.02, 0.02, 0.01,
];

/// Produces the ordered arrival sequence for a run.
///
/// Colors are sampled with replacement from the palette according to the
/// weights, the sampled list is shuffled, and units are numbered from 1 in
/// the resulting order. The same `(count, seed)` always yields the same
/// sequence.
///
/// # Examples
///
/// ```
/// use u_sequencing::units::UnitGenerator;
///
/// let generator = UnitGenerator::reference()?;
/// let a = generator.generate(50, 42);
/// let b = generator.generate(50, 42);
/// assert_eq!(a, b);
/// assert_eq!(a[0].id(), 1);
/// # Ok::<(), u_sequencing::SequencingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UnitGenerator {
    index: WeightedIndex<f64>,
}

impl UnitGenerator {
    /// Builds a generator from one weight per palette color.
    pub fn new(weights: &[f64]) -> Result<Self> {
        if weights.len() != Color::ALL.len() {
            return Err(SequencingError::InvalidConfig(format!(
                "expected {} color weights, got {}",
                Color::ALL.len(),
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SequencingError::InvalidConfig(
                "color weights must be finite and non-negative".into(),
            ));
        }
        let index = WeightedIndex::new(weights.iter().copied())
            .map_err(|e| SequencingError::InvalidConfig(format!("color weights: {e}")))?;
        Ok(Self { index })
    }

    /// Generator over [`DEFAULT_DISTRIBUTION`].
    pub fn reference() -> Result<Self> {
        Self::new(&DEFAULT_DISTRIBUTION)
    }

    /// Generates `count` units from `seed`.
    pub fn generate(&self, count: usize, seed: u64) -> Vec<Unit> {
        let mut rng = create_rng(seed);
        let mut colors: Vec<Color> = (0..count)
            .map(|_| Color::ALL[self.index.sample(&mut rng)])
            .collect();
        colors.shuffle(&mut rng);

        colors
            .into_iter()
            .zip(1u64..)
            .map(|(color, id)| Unit::new(id, color))
            .collect()
    }
}
