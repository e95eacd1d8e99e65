//! Categorical sampling and the raw uniform source.
//!
//! These are the thin end of the pipeline: a uniform draw, a uniform index,
//! a dense "random distribution" helper, and the cumulative-weight walk
//! that turns an unnormalized weight vector into an index.
//!
//! Notes:
//! - [`sample_dense_categorical_with_rng`] normalizes k independent
//!   uniforms. That is **not** a uniform draw over the probability simplex
//!   (the true Dirichlet(1,…,1) would need exponential draws); the behavior
//!   is inherited and kept on purpose, since downstream consumers were
//!   fitted against it.
//! - The weight walk uses a `v <= w` comparison, so a zero-weight category
//!   can only be selected on the exact boundary `v == 0`, a measure-zero
//!   event. The convention is load-bearing for fixed-seed reproducibility
//!   and is kept exactly.

use crate::error::SampleError;
use rand::prelude::*;

/// One raw uniform draw in [0, 1).
pub fn uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random()
}

/// A uniform index in [0, k).
///
/// Fails with [`SampleError::EmptyDomain`] if `k == 0`.
pub fn sample_index_with_rng<R: Rng + ?Sized>(
    k: usize,
    rng: &mut R,
) -> Result<usize, SampleError> {
    if k == 0 {
        return Err(SampleError::EmptyDomain);
    }
    Ok(rng.random_range(0..k))
}

/// A random distribution over k categories: k independent uniforms,
/// renormalized by their sum (see the module notes on the simplex caveat).
///
/// Fails with [`SampleError::EmptyDomain`] if `k == 0`.
pub fn sample_dense_categorical_with_rng<R: Rng + ?Sized>(
    k: usize,
    rng: &mut R,
) -> Result<Vec<f64>, SampleError> {
    if k == 0 {
        return Err(SampleError::EmptyDomain);
    }
    let mut w = Vec::with_capacity(k);
    let mut sum = 0.0;
    for _ in 0..k {
        let u = rng.random::<f64>();
        sum += u;
        w.push(u);
    }
    for v in &mut w {
        *v /= sum;
    }
    Ok(w)
}

/// Draw an index proportionally to `weights` (which need not sum to 1).
///
/// Walks the cumulative weights left to right over indices 0..n−2 and falls
/// back to the last index, so floating-point shortfall in the running
/// subtraction can never walk off the end.
///
/// Fails with [`SampleError::EmptyDomain`] on an empty vector and
/// [`SampleError::InvalidWeightSum`] if the total is non-finite or ≤ 0.
pub fn sample_from_categorical_with_rng<R: Rng + ?Sized>(
    weights: &[f64],
    rng: &mut R,
) -> Result<usize, SampleError> {
    if weights.is_empty() {
        return Err(SampleError::EmptyDomain);
    }
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(SampleError::InvalidWeightSum(total));
    }

    let mut v = rng.random::<f64>() * total;
    for (i, &w) in weights[..weights.len() - 1].iter().enumerate() {
        if v <= w {
            return Ok(i);
        }
        v -= w;
    }
    Ok(weights.len() - 1)
}
