//! Periodic returns.

/// Simple returns `p[t] / p[t-1] - 1`.
///
/// The output is one shorter than the input. A step that cannot be computed
/// (missing or zero previous price) is emitted as `NaN` so that positions
/// stay aligned with the input dates.
pub fn pct_change(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| {
            let r = w[1] / w[0] - 1.0;
            if r.is_finite() {
                r
            } else {
                f64::NAN
            }
        })
        .collect()
}

/// Pairwise-complete observations of two aligned series.
///
/// Keeps index `i` only when both `a[i]` and `b[i]` are finite; the shorter
/// length bounds the comparison.
pub fn finite_pairs(a: &[f64], b: &[f64]) -> (Vec<f64>, Vec<f64>) {
    a.iter()
        .zip(b)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| (*x, *y))
        .unzip()
}

/// Finite values only.
pub fn finite(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|v| v.is_finite()).collect()
}
