//! Smoothed categorical posteriors from observed counts.
//!
//! Both entry points add a uniform pseudocount `alpha` to the observed
//! counts (Laplace-style smoothing, so unseen categories keep nonzero
//! prior mass) and draw one Dirichlet sample from the result. The sparse
//! variant then prunes entries at or below a probability floor, yielding a
//! compact approximate distribution.
//!
//! Resource caveat: the sparse variant materializes a dense concentration
//! vector of length max-key + 1. A count map with one huge key and few
//! entries therefore allocates (and draws Gamma variates for) the whole
//! implicit support. Callers with pathological key ranges should remap
//! indices first.

use crate::dirichlet::sample_dirichlet_with_sampler;
use crate::error::SampleError;
use crate::gamma::GammaSampler;
use rand::prelude::*;
use std::collections::BTreeMap;

/// Draw a Dirichlet-smoothed distribution over dense counts:
/// one Gamma(countᵢ + alpha, 1) per slot, normalized.
///
/// Fails with [`SampleError::EmptyDomain`] on empty counts and
/// [`SampleError::InvalidConcentration`] unless `alpha` is finite and > 0.
pub fn sample_dense_categorical_smoothed_with_rng<R: Rng + ?Sized>(
    counts: &[u64],
    alpha: f64,
    rng: &mut R,
) -> Result<Vec<f64>, SampleError> {
    let mut gamma = GammaSampler::new();
    sample_dense_categorical_smoothed_with_sampler(&mut gamma, counts, alpha, rng)
}

pub(crate) fn sample_dense_categorical_smoothed_with_sampler<R: Rng + ?Sized>(
    gamma: &mut GammaSampler,
    counts: &[u64],
    alpha: f64,
    rng: &mut R,
) -> Result<Vec<f64>, SampleError> {
    if counts.is_empty() {
        return Err(SampleError::EmptyDomain);
    }
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(SampleError::InvalidConcentration(alpha));
    }
    let alphas: Vec<f64> = counts.iter().map(|&c| c as f64 + alpha).collect();
    sample_dirichlet_with_sampler(gamma, &alphas, rng)
}

/// Draw a pruned Dirichlet-smoothed posterior over sparse counts.
///
/// The support is the implicit dense range `0..=max_key`; absent keys count
/// as zero but still receive the `alpha` pseudocount. The Dirichlet draw is
/// defensively renormalized by its sum (a no-op up to floating error), then
/// only entries strictly above `floor` are emitted. Retained values lie in
/// (floor, 1] and sum to at most 1.
///
/// Fails with [`SampleError::EmptyDomain`] on an empty map,
/// [`SampleError::InvalidConcentration`] unless `alpha` is finite and > 0,
/// and [`SampleError::InvalidFloor`] unless `floor` lies in [0, 1).
pub fn sample_sparse_categorical_with_rng<R: Rng + ?Sized>(
    counts: &BTreeMap<usize, u64>,
    alpha: f64,
    floor: f64,
    rng: &mut R,
) -> Result<BTreeMap<usize, f64>, SampleError> {
    let mut gamma = GammaSampler::new();
    sample_sparse_categorical_with_sampler(&mut gamma, counts, alpha, floor, rng)
}

pub(crate) fn sample_sparse_categorical_with_sampler<R: Rng + ?Sized>(
    gamma: &mut GammaSampler,
    counts: &BTreeMap<usize, u64>,
    alpha: f64,
    floor: f64,
    rng: &mut R,
) -> Result<BTreeMap<usize, f64>, SampleError> {
    let max_key = match counts.keys().next_back() {
        Some(&k) => k,
        None => return Err(SampleError::EmptyDomain),
    };
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(SampleError::InvalidConcentration(alpha));
    }
    if !(0.0..1.0).contains(&floor) {
        return Err(SampleError::InvalidFloor(floor));
    }

    let dim = max_key + 1;
    let mut alphas = vec![alpha; dim];
    for (&i, &c) in counts {
        alphas[i] += c as f64;
    }

    let dist = sample_dirichlet_with_sampler(gamma, &alphas, rng)?;
    let sum: f64 = dist.iter().sum();

    let mut pruned = BTreeMap::new();
    for (i, &p) in dist.iter().enumerate() {
        let p = p / sum;
        if p > floor {
            pruned.insert(i, p);
        }
    }
    Ok(pruned)
}
