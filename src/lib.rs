//! `saikoro`: Gamma/Dirichlet/categorical variate sampling.
//!
//! This crate is the variate-generation core for latent-variable models
//! (e.g. lexical translation weights): it resamples mixture weights from
//! observed counts without pulling in any model-specific machinery.
//!
//! Exposed modules:
//! - `gamma`: Ahrens–Dieter Gamma sampling (GS/GD acceptance–rejection and
//!   acceptance-complement).
//! - `dirichlet`: Dirichlet draws via normalized Gamma variates.
//! - `categorical`: uniform source, dense categorical draws, and the
//!   cumulative-weight walk.
//! - `sparse`: Dirichlet-smoothed posteriors over counts, with floor
//!   pruning for a compact sparse result.
//! - `session`: [`MixtureSampler`], a seeded session bundling the PRNG and
//!   the Gamma coefficient cache.
//! - `error`: the [`SampleError`] taxonomy.

#![forbid(unsafe_code)]

pub mod categorical;
pub mod dirichlet;
pub mod error;
pub mod gamma;
pub mod session;
pub mod sparse;

pub use categorical::{
    sample_dense_categorical_with_rng, sample_from_categorical_with_rng, sample_index_with_rng,
    uniform,
};
pub use dirichlet::sample_dirichlet_with_rng;
pub use error::SampleError;
pub use gamma::{sample_gamma_with_rng, GammaSampler};
pub use session::MixtureSampler;
pub use sparse::{sample_dense_categorical_smoothed_with_rng, sample_sparse_categorical_with_rng};
