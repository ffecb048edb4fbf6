// src/selection/sampler.rs
use crate::utils::error::SampleError;
use rand::seq::index;
use rand::Rng;

/// Draws `k` distinct items uniformly at random, without replacement.
///
/// `k` must lie in `[1, items.len()]`; anything else is rejected before the
/// RNG is touched. The returned order is the draw order, not source order.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], k: usize, rng: &mut R) -> Result<Vec<T>, SampleError> {
    if k == 0 || k > items.len() {
        return Err(SampleError::CountOutOfRange {
            requested: k,
            available: items.len(),
        });
    }

    Ok(index::sample(rng, items.len(), k)
        .into_iter()
        .map(|i| items[i].clone())
        .collect())
}

/// Clamps a requested count into `[1, available]` at the input stage.
/// Returns `None` when there is nothing to sample from.
pub fn clamp_count(requested: usize, available: usize) -> Option<usize> {
    if available == 0 {
        return None;
    }
    Some(requested.clamp(1, available))
}
