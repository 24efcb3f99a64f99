//! Descriptive statistics over return slices.
//!
//! All functions use generic type parameter `T: num_traits::Float` for f32/f64 support
//! and never return NaN for degenerate input: empty slices and zero variance
//! collapse to zero.

use num_traits::Float;

/// Arithmetic mean, or zero for an empty slice.
#[inline]
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / T::from(values.len()).unwrap_or_else(T::one)
}

/// Centred co-moments of two equal-length slices.
///
/// Returns `(Σ dx·dy, Σ dx², Σ dy²)` where `dx`, `dy` are deviations from the
/// respective means. Only the common prefix is used if lengths differ.
pub fn centred_moments<T: Float>(x: &[T], y: &[T]) -> (T, T, T) {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = mean(x);
    let mean_y = mean(y);

    x.iter().zip(y).fold(
        (T::zero(), T::zero(), T::zero()),
        |(cov, var_x, var_y), (&a, &b)| {
            let dx = a - mean_x;
            let dy = b - mean_y;
            (cov + dx * dy, var_x + dx * dx, var_y + dy * dy)
        },
    )
}

/// Pearson correlation coefficient.
///
/// # Mathematical Definition
/// ```text
/// ρ = Σ dx·dy / sqrt(Σ dx² · Σ dy²)
/// ```
///
/// # Degenerate input
/// Fewer than two observations, a zero denominator, or a non-finite result
/// all yield zero. The value is clamped into `[-1, 1]` to absorb rounding.
///
/// # Examples
/// ```
/// use structure_core::math::statistics::pearson;
///
/// let x = [1.0_f64, 2.0, 3.0, 4.0];
/// let y = [2.0_f64, 4.0, 6.0, 8.0];
/// assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
/// assert_eq!(pearson(&x, &[5.0, 5.0, 5.0, 5.0]), 0.0);
/// ```
pub fn pearson<T: Float>(x: &[T], y: &[T]) -> T {
    if x.len().min(y.len()) < 2 {
        return T::zero();
    }

    let (cov, var_x, var_y) = centred_moments(x, y);
    let denominator = (var_x * var_y).sqrt();
    if denominator == T::zero() {
        return T::zero();
    }

    let rho = cov / denominator;
    if !rho.is_finite() {
        return T::zero();
    }
    rho.max(-T::one()).min(T::one())
}

/// Truncates two slices to their shared length, keeping the most recent
/// (tail) observations of each.
///
/// Series of different history depths end on the same date, so dropping
/// from the head keeps the dates aligned.
///
/// # Examples
/// ```
/// use structure_core::math::statistics::align_tail;
///
/// let (a, b) = align_tail(&[1.0, 2.0, 3.0, 4.0], &[30.0, 40.0]);
/// assert_eq!(a, &[3.0, 4.0]);
/// assert_eq!(b, &[30.0, 40.0]);
/// ```
#[inline]
pub fn align_tail<'a, T>(a: &'a [T], b: &'a [T]) -> (&'a [T], &'a [T]) {
    let n = a.len().min(b.len());
    (&a[a.len() - n..], &b[b.len() - n..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean::<f64>(&[]), 0.0);
    }

    #[test]
    fn test_mean_basic() {
        assert_relative_eq!(mean(&[1.0_f64, 2.0, 3.0, 6.0]), 3.0);
    }

    #[test]
    fn test_centred_moments() {
        let (cov, vx, vy) = centred_moments(&[1.0_f64, 3.0], &[2.0, 6.0]);
        assert_relative_eq!(cov, 4.0);
        assert_relative_eq!(vx, 2.0);
        assert_relative_eq!(vy, 8.0);
    }

    #[test]
    fn test_pearson_negative_multiple() {
        let x = [0.5_f64, -1.0, 2.0, 0.0];
        let y: Vec<f64> = x.iter().map(|v| -3.0 * v).collect();
        assert_relative_eq!(pearson(&x, &y), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_uncorrelated() {
        let x = [1.0_f64, -1.0, 1.0, -1.0];
        let y = [1.0_f64, 1.0, -1.0, -1.0];
        assert_relative_eq!(pearson(&x, &y), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_short_input() {
        assert_eq!(pearson::<f64>(&[], &[]), 0.0);
        assert_eq!(pearson(&[1.0_f64], &[2.0]), 0.0);
    }

    #[test]
    fn test_pearson_non_finite_is_zero() {
        assert_eq!(pearson(&[1.0_f64, f64::NAN, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_pearson_f32() {
        let x = [1.0_f32, 2.0, 3.0];
        assert!((pearson(&x, &x) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_align_tail_equal_lengths() {
        let (a, b) = align_tail(&[1, 2], &[3, 4]);
        assert_eq!(a, &[1, 2]);
        assert_eq!(b, &[3, 4]);
    }

    #[test]
    fn test_align_tail_empty() {
        let (a, b) = align_tail::<f64>(&[], &[1.0]);
        assert!(a.is_empty());
        assert!(b.is_empty());
    }
}
