//! Correlation between paired samples.

use crate::descriptive::mean;

/// Pearson product-moment correlation coefficient of two paired samples.
///
/// Returns `None` when the correlation is undefined:
///
/// - the samples have different lengths
/// - fewer than 2 pairs
/// - either sample has zero variance
/// - the result is not finite (e.g. non-finite inputs)
///
/// The result is clamped to `[-1.0, 1.0]` to absorb rounding just outside the range.
///
/// # Examples
///
/// ```
/// use oart_stats::correlation::pearson;
///
/// let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[4.0, 3.0, 2.0, 1.0]).unwrap();
/// assert!((r + 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
