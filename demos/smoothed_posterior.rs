//! Resampling a lexical weight distribution from sparse counts.
//!
//! Builds a toy count multiset (a few observed translation candidates out
//! of a large implicit vocabulary), draws floor-pruned posterior samples,
//! and then picks candidates from one of them with the categorical walk.

use saikoro::MixtureSampler;
use std::collections::BTreeMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Zipf-ish counts over a handful of candidates; everything up to the
    // max key is implicit support that only the smoothing prior touches.
    let counts: BTreeMap<usize, u64> = [(0, 120), (1, 40), (2, 13), (7, 4), (19, 1)]
        .into_iter()
        .collect();

    let alpha = 0.1; // weak smoothing prior
    let floor = 0.005; // drop entries at or below half a percent

    let mut sampler = MixtureSampler::from_seed(7);

    println!("counts: {counts:?}");
    println!();
    for round in 0..3 {
        let posterior = sampler.sample_sparse_categorical(&counts, alpha, floor)?;
        let kept: f64 = posterior.values().sum();
        println!("draw {round}: {} entries kept, mass {kept:.4}", posterior.len());
        for (i, p) in &posterior {
            println!("  i={i:2}  p={p:.4}");
        }
    }

    // Consume one posterior as a plain weight vector.
    let posterior = sampler.sample_sparse_categorical(&counts, alpha, floor)?;
    let (keys, weights): (Vec<usize>, Vec<f64>) = posterior.into_iter().unzip();
    println!();
    println!("ten candidate picks from the last draw:");
    for _ in 0..10 {
        let i = sampler.sample_from_categorical(&weights)?;
        print!(" {}", keys[i]);
    }
    println!();

    Ok(())
}
