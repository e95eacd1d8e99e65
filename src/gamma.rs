//! Gamma variate generation.
//!
//! Implements the Ahrens–Dieter samplers:
//!
//! - **GS** (acceptance–rejection) for shape < 1;
//! - **GD** (acceptance-complement via a Gaussian deviate) for shape ≥ 1,
//!   with squeeze, quotient and hat acceptance tests.
//!
//! GD precomputes coefficients that depend only on the shape parameter.
//! [`GammaSampler`] caches them keyed on the last-seen shape, so repeated
//! draws with the same shape (the common case when normalizing counts into
//! a Dirichlet) skip the setup. The cache is plain owned state behind
//! `&mut self`; there is no hidden global.
//!
//! ## References
//!
//! - Ahrens & Dieter (1974): *Computer methods for sampling from gamma,
//!   beta, Poisson and binomial distributions*, Computing 12, 223–246.
//! - Ahrens & Dieter (1982): *Generating gamma variates by a modified
//!   rejection technique*, CACM 25, 47–54.
//!
//! Notes:
//! - Every rejection loop draws from one per-call iteration budget and fails
//!   with [`SampleError::RejectionBudgetExhausted`] instead of spinning,
//!   so a call is guaranteed to terminate.

use crate::error::SampleError;
use rand::prelude::*;

/// Coefficients q1..q9 of the q0(1/shape) setup polynomial
/// (Ahrens & Dieter 1982, algorithm GD).
const Q: [f64; 9] = [
    0.0416666664,
    0.0208333723,
    0.0079849875,
    0.0015746717,
    -0.0003349403,
    0.0003340332,
    0.0006053049,
    -0.0004701849,
    0.0001710320,
];

/// Coefficients a1..a9 of the q(v) approximation used when |v| ≤ 0.25
/// (Ahrens & Dieter 1982, algorithm GD).
const A: [f64; 9] = [
    0.333333333,
    -0.249999949,
    0.199999867,
    -0.166677482,
    0.142873973,
    -0.124385581,
    0.110368310,
    -0.112750886,
    0.104089866,
];

/// Coefficients e1..e7 of the exp(q) − 1 approximation used when q ≤ 0.5
/// (Ahrens & Dieter 1982, algorithm GD).
const E: [f64; 7] = [
    1.000000000,
    0.499999994,
    0.166666848,
    0.041664508,
    0.008345522,
    0.001353826,
    0.000247453,
];

/// e^−1 at the precision the reference algorithm prints it.
const EXP_NEG_ONE: f64 = 0.36788794412;

/// Left cutoff for the double-exponential deviate in the hat loop.
const T_CUTOFF: f64 = -0.71874483771719;

/// Shared iteration budget for all rejection loops within one call.
///
/// Acceptance probabilities are bounded well away from zero for every valid
/// shape, so hitting this is effectively impossible with a sane RNG; it
/// exists to turn probability-1 termination into guaranteed termination.
const MAX_ITERATIONS: usize = 65_536;

/// Evaluate x·(c\[0\] + x·(c\[1\] + …)) with coefficients ordered low to high.
///
/// Matches the nested Horner form of the reference constants, where the
/// polynomial has no constant term.
#[inline]
fn poly(coeffs: &[f64], x: f64) -> f64 {
    let mut acc = 0.0;
    for &c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc * x
}

/// Shape-derived coefficients for GD step 1.
#[derive(Debug, Clone, Copy)]
struct PrepCoeffs {
    s: f64,
    ss: f64,
    d: f64,
}

/// Shape-derived coefficients for the quotient/hat tests (GD steps 4–12).
#[derive(Debug, Clone, Copy)]
struct HatCoeffs {
    q0: f64,
    b: f64,
    si: f64,
    c: f64,
}

/// A Gamma variate generator with a coefficient cache keyed on the
/// last-seen shape.
///
/// Constructing one is cheap; the cache only matters when many draws share
/// a shape (e.g. symmetric Dirichlet concentrations). A sampler is a plain
/// owned value used through `&mut self`, so two logical sampling sessions
/// cannot silently share (and corrupt) each other's cached coefficients.
#[derive(Debug, Clone, Default)]
pub struct GammaSampler {
    prep: Option<(f64, PrepCoeffs)>,
    hat: Option<(f64, HatCoeffs)>,
}

impl GammaSampler {
    /// Create a sampler with an empty coefficient cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one Gamma(shape, rate) variate (mean = shape/rate).
    ///
    /// Fails with [`SampleError::InvalidShape`] / [`SampleError::InvalidRate`]
    /// unless both parameters are finite and > 0.
    pub fn sample_with_rng<R: Rng + ?Sized>(
        &mut self,
        shape: f64,
        rate: f64,
        rng: &mut R,
    ) -> Result<f64, SampleError> {
        if !shape.is_finite() || shape <= 0.0 {
            return Err(SampleError::InvalidShape(shape));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(SampleError::InvalidRate(rate));
        }

        if shape < 1.0 {
            sample_gs(shape, rate, rng)
        } else {
            self.sample_gd(shape, rate, rng)
        }
    }

    /// GD step 1: s, ss, d (recomputed only when the shape changes).
    fn prep_coeffs(&mut self, shape: f64) -> PrepCoeffs {
        match self.prep {
            Some((cached_shape, coeffs)) if cached_shape == shape => coeffs,
            _ => {
                let ss = shape - 0.5;
                let s = ss.sqrt();
                let d = 5.656854249 - 12.0 * s;
                let coeffs = PrepCoeffs { s, ss, d };
                self.prep = Some((shape, coeffs));
                coeffs
            }
        }
    }

    /// GD step 4: q0 and the piecewise b/si/c hat parameters
    /// (recomputed only when the shape changes).
    fn hat_coeffs(&mut self, shape: f64, s: f64, ss: f64) -> HatCoeffs {
        match self.hat {
            Some((cached_shape, coeffs)) if cached_shape == shape => coeffs,
            _ => {
                let q0 = poly(&Q, 1.0 / shape);
                let (b, si, c) = if shape > 13.022 {
                    (1.77, 0.75, 0.1515 / s)
                } else if shape > 3.686 {
                    (1.654 + 0.0076 * ss, 1.68 / s + 0.275, 0.062 / s + 0.024)
                } else {
                    (0.463 + s - 0.178 * ss, 1.235, 0.195 / s - 0.079 + 0.016 * s)
                };
                let coeffs = HatCoeffs { q0, b, si, c };
                self.hat = Some((shape, coeffs));
                coeffs
            }
        }
    }

    /// Acceptance-complement algorithm GD, for shape ≥ 1.
    fn sample_gd<R: Rng + ?Sized>(
        &mut self,
        shape: f64,
        rate: f64,
        rng: &mut R,
    ) -> Result<f64, SampleError> {
        let PrepCoeffs { s, ss, d } = self.prep_coeffs(shape);
        let mut budget = MAX_ITERATIONS;

        // Step 2: standard normal deviate via the polar method.
        let t = polar_normal(rng, &mut budget)?;
        let x = s + 0.5 * t;
        let gds = x * x;
        if t >= 0.0 {
            // Immediate acceptance.
            return Ok(gds / rate);
        }

        // Step 3: squeeze acceptance.
        let u = rng.random::<f64>();
        if d * u <= t * t * t {
            return Ok(gds / rate);
        }

        let HatCoeffs { q0, b, si, c } = self.hat_coeffs(shape, s, ss);

        // Steps 5–7: quotient acceptance.
        if x > 0.0 {
            let q = q_of(t, s, ss, q0);
            if (1.0 - u).ln() <= q {
                return Ok(gds / rate);
            }
        }

        // Steps 8–12: hat acceptance over a double-exponential deviate.
        loop {
            let (e, u, sign_u, t) = loop {
                if budget == 0 {
                    return Err(SampleError::RejectionBudgetExhausted);
                }
                budget -= 1;
                let e = -rng.random::<f64>().ln();
                let u = 2.0 * rng.random::<f64>() - 1.0;
                let sign_u = if u > 0.0 { 1.0 } else { -1.0 };
                let t = b + (e * si) * sign_u;
                // Step 9: reject the far-left tail.
                if t > T_CUTOFF {
                    break (e, u, sign_u, t);
                }
            };

            // Step 10: q(t) for the fresh deviate.
            let q = q_of(t, s, ss, q0);

            // Step 11.
            if q <= 0.0 {
                continue;
            }
            let w = if q > 0.5 { q.exp() - 1.0 } else { poly(&E, q) };

            // Step 12: hat acceptance.
            if c * u * sign_u <= w * (e - 0.5 * t * t).exp() {
                let x = s + 0.5 * t;
                return Ok(x * x / rate);
            }
        }
    }
}

/// Draw one Gamma(shape, rate) variate without cross-call coefficient reuse.
///
/// Equivalent to [`GammaSampler::sample_with_rng`] on a fresh sampler;
/// prefer a long-lived [`GammaSampler`] when drawing many variates with a
/// repeated shape.
pub fn sample_gamma_with_rng<R: Rng + ?Sized>(
    shape: f64,
    rate: f64,
    rng: &mut R,
) -> Result<f64, SampleError> {
    GammaSampler::new().sample_with_rng(shape, rate, rng)
}

/// Acceptance–rejection algorithm GS, for shape < 1.
fn sample_gs<R: Rng + ?Sized>(shape: f64, rate: f64, rng: &mut R) -> Result<f64, SampleError> {
    // Step 1.
    let b = 1.0 + EXP_NEG_ONE * shape;
    for _ in 0..MAX_ITERATIONS {
        let p = b * rng.random::<f64>();
        if p <= 1.0 {
            // Step 2: candidate ≤ 1.
            let gds = (p.ln() / shape).exp();
            if rng.random::<f64>().ln() <= -gds {
                return Ok(gds / rate);
            }
        } else {
            // Step 3: candidate > 1.
            let gds = -((b - p) / shape).ln();
            if rng.random::<f64>().ln() <= (shape - 1.0) * gds.ln() {
                return Ok(gds / rate);
            }
        }
    }
    Err(SampleError::RejectionBudgetExhausted)
}

/// Standard normal deviate via the polar Box–Muller method.
fn polar_normal<R: Rng + ?Sized>(rng: &mut R, budget: &mut usize) -> Result<f64, SampleError> {
    loop {
        if *budget == 0 {
            return Err(SampleError::RejectionBudgetExhausted);
        }
        *budget -= 1;
        let v1 = 2.0 * rng.random::<f64>() - 1.0;
        let v2 = 2.0 * rng.random::<f64>() - 1.0;
        let v12 = v1 * v1 + v2 * v2;
        if v12 <= 1.0 {
            return Ok(v1 * (-2.0 * v12.ln() / v12).sqrt());
        }
    }
}

/// q(t): closed-form log expression away from zero, the a1..a9 polynomial
/// near it (|t/(2s)| ≤ 0.25).
#[inline]
fn q_of(t: f64, s: f64, ss: f64, q0: f64) -> f64 {
    let v = t / (s + s);
    if v.abs() > 0.25 {
        q0 - s * t + 0.25 * t * t + (ss + ss) * (1.0 + v).ln()
    } else {
        q0 + 0.5 * t * t * poly(&A, v)
    }
}
