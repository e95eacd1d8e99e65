//! Dirichlet sampling.
//!
//! A Dirichlet(α₁, …, α_k) sample is k independent Gamma(αᵢ, 1) draws
//! normalized by their sum. The Gamma draws reuse one [`GammaSampler`], so
//! symmetric concentration vectors (all αᵢ equal, the usual smoothing
//! prior) pay the GD coefficient setup once.

use crate::error::SampleError;
use crate::gamma::GammaSampler;
use rand::prelude::*;

/// Draw one Dirichlet sample from `alphas`.
///
/// Fails with [`SampleError::EmptyDomain`] on an empty vector and
/// [`SampleError::InvalidConcentration`] if any entry is not finite and > 0;
/// both checks run before any randomness is consumed.
///
/// With extremely small concentrations every Gamma draw can underflow to
/// zero, leaving nothing to normalize; that case fails with
/// [`SampleError::DegenerateGammaSum`] rather than returning NaNs.
pub fn sample_dirichlet_with_rng<R: Rng + ?Sized>(
    alphas: &[f64],
    rng: &mut R,
) -> Result<Vec<f64>, SampleError> {
    let mut gamma = GammaSampler::new();
    sample_dirichlet_with_sampler(&mut gamma, alphas, rng)
}

/// [`sample_dirichlet_with_rng`] reusing a caller-held Gamma coefficient cache.
pub(crate) fn sample_dirichlet_with_sampler<R: Rng + ?Sized>(
    gamma: &mut GammaSampler,
    alphas: &[f64],
    rng: &mut R,
) -> Result<Vec<f64>, SampleError> {
    if alphas.is_empty() {
        return Err(SampleError::EmptyDomain);
    }
    for &a in alphas {
        if !a.is_finite() || a <= 0.0 {
            return Err(SampleError::InvalidConcentration(a));
        }
    }

    let mut x = Vec::with_capacity(alphas.len());
    let mut sum = 0.0;
    for &a in alphas {
        let g = gamma.sample_with_rng(a, 1.0, rng)?;
        sum += g;
        x.push(g);
    }

    if !sum.is_finite() || sum <= 0.0 {
        return Err(SampleError::DegenerateGammaSum);
    }
    for v in &mut x {
        *v /= sum;
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_empty_and_nonpositive_alphas() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            sample_dirichlet_with_rng(&[], &mut rng),
            Err(SampleError::EmptyDomain)
        );
        assert_eq!(
            sample_dirichlet_with_rng(&[1.0, 0.0, 1.0], &mut rng),
            Err(SampleError::InvalidConcentration(0.0))
        );
        assert_eq!(
            sample_dirichlet_with_rng(&[1.0, -2.0], &mut rng),
            Err(SampleError::InvalidConcentration(-2.0))
        );
    }

    #[test]
    fn each_draw_sums_to_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1_000 {
            let p = sample_dirichlet_with_rng(&[0.3, 1.0, 5.0, 0.01], &mut rng).expect("ok");
            assert_eq!(p.len(), 4);
            assert!(p.iter().all(|&v| (0.0..=1.0).contains(&v)));
            let sum: f64 = p.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum was {sum}");
        }
    }

    #[test]
    fn symmetric_alphas_give_symmetric_means() {
        // Dirichlet([1,1,1]) has coordinate means 1/3.
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let n = 50_000;
        let mut means = [0.0f64; 3];
        for _ in 0..n {
            let p = sample_dirichlet_with_rng(&[1.0, 1.0, 1.0], &mut rng).expect("ok");
            for (m, v) in means.iter_mut().zip(&p) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n as f64;
        }
        for m in &means {
            assert!((m - 1.0 / 3.0).abs() < 1.0 / 3.0 * 0.05, "means were {means:?}");
        }
    }

    #[test]
    fn asymmetric_alphas_follow_expected_proportions() {
        // E[p_i] = α_i / Σα, here (0.1, 0.2, 0.7).
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 50_000;
        let alphas = [1.0, 2.0, 7.0];
        let mut means = [0.0f64; 3];
        for _ in 0..n {
            let p = sample_dirichlet_with_rng(&alphas, &mut rng).expect("ok");
            for (m, v) in means.iter_mut().zip(&p) {
                *m += v;
            }
        }
        let expected = [0.1, 0.2, 0.7];
        for (m, e) in means.iter().zip(&expected) {
            let m = m / n as f64;
            assert!((m - e).abs() < e * 0.05, "mean {m} vs expected {e}");
        }
    }

    #[test]
    fn underflowed_draws_are_reported_not_nan() {
        // Shapes this small make every Gamma draw round to exactly zero.
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(
            sample_dirichlet_with_rng(&[1e-300, 1e-300, 1e-300], &mut rng),
            Err(SampleError::DegenerateGammaSum)
        );
    }
}
