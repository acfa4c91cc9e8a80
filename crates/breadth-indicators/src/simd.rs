//! SIMD-optimized reductions.
//!
//! These implementations use the `wide` crate for portable SIMD operations.
//! Variance and covariance use the sample (n - 1) denominator.

use wide::f64x4;

#[inline]
fn lanes(chunk: &[f64]) -> f64x4 {
    f64x4::new([chunk[0], chunk[1], chunk[2], chunk[3]])
}

/// SIMD-optimized sum of a slice.
pub fn sum_simd(data: &[f64]) -> f64 {
    let chunks = data.chunks_exact(4);
    let tail: f64 = chunks.remainder().iter().sum();

    let acc = chunks.fold(f64x4::splat(0.0), |acc, c| acc + lanes(c));
    acc.reduce_add() + tail
}

/// SIMD-optimized arithmetic mean, `None` for an empty slice.
pub fn mean_simd(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(sum_simd(data) / data.len() as f64)
}

/// SIMD-optimized sample variance, `None` with fewer than two values.
pub fn variance_simd(data: &[f64]) -> Option<f64> {
    covariance_simd(data, data)
}

/// SIMD-optimized sample covariance of two equal-length slices.
///
/// Returns `None` when the lengths differ or fewer than two pairs exist.
pub fn covariance_simd(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }

    let mean_a = mean_simd(a)?;
    let mean_b = mean_simd(b)?;
    let mean_a_vec = f64x4::splat(mean_a);
    let mean_b_vec = f64x4::splat(mean_b);

    let chunks_a = a.chunks_exact(4);
    let chunks_b = b.chunks_exact(4);

    let tail: f64 = chunks_a
        .remainder()
        .iter()
        .zip(chunks_b.remainder())
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();

    let acc = chunks_a
        .zip(chunks_b)
        .fold(f64x4::splat(0.0), |acc, (ca, cb)| {
            acc + (lanes(ca) - mean_a_vec) * (lanes(cb) - mean_b_vec)
        });

    Some((acc.reduce_add() + tail) / (a.len() - 1) as f64)
}

/// SIMD-optimized rolling mean.
pub fn sma_simd(data: &[f64], period: usize) -> Vec<f64> {
    if data.len() < period || period == 0 {
        return vec![];
    }

    let mut result = Vec::with_capacity(data.len() - period + 1);
    let period_f64 = period as f64;

    let mut sum = sum_simd(&data[..period]);
    result.push(sum / period_f64);

    for i in period..data.len() {
        sum = sum - data[i - period] + data[i];
        result.push(sum / period_f64);
    }

    result
}

/// SIMD-optimized min/max finder.
pub fn minmax_simd(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }

    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();

    let (min_vec, max_vec) = chunks.fold(
        (f64x4::splat(f64::INFINITY), f64x4::splat(f64::NEG_INFINITY)),
        |(lo, hi), c| {
            let v = lanes(c);
            (lo.min(v), hi.max(v))
        },
    );

    let min = min_vec
        .to_array()
        .iter()
        .chain(remainder)
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let max = max_vec
        .to_array()
        .iter()
        .chain(remainder)
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);

    Some((min, max))
}
