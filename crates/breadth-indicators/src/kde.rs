//! Gaussian kernel density estimation.

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Scott's rule bandwidth `sigma * n^(-1/5)`.
pub fn scott_bandwidth(samples: &[f64]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let sigma = samples.iter().std_dev();
    let bw = sigma * (samples.len() as f64).powf(-0.2);
    (bw.is_finite() && bw > 0.0).then_some(bw)
}

/// Evaluate a Gaussian KDE of `samples` at each point of `grid`.
///
/// Returns densities integrating to one over the real line. Degenerate input
/// (fewer than two samples or zero spread) yields an empty vector.
pub fn gaussian_kde(samples: &[f64], grid: &[f64]) -> Vec<f64> {
    let Some(bandwidth) = scott_bandwidth(samples) else {
        return vec![];
    };
    let Ok(kernel) = Normal::new(0.0, bandwidth) else {
        return vec![];
    };

    let n = samples.len() as f64;
    grid.iter()
        .map(|&x| samples.iter().map(|&s| kernel.pdf(x - s)).sum::<f64>() / n)
        .collect()
}

/// Evenly spaced grid of `points` values covering `[min, max]`.
pub fn linspace(min: f64, max: f64, points: usize) -> Vec<f64> {
    match points {
        0 => vec![],
        1 => vec![min],
        _ => {
            let step = (max - min) / (points - 1) as f64;
            (0..points).map(|i| min + step * i as f64).collect()
        }
    }
}
