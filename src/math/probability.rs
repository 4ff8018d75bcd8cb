/// Error function approximation using Abramowitz and Stegun method
///
/// Accurate to about 1.5e-7, which is plenty for goodness-of-fit p-values.
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254_829_592_f64;
    let a2 = -0.284_496_736_f64;
    let a3 = 1.421_413_741_f64;
    let a4 = -1.453_152_027_f64;
    let a5 = 1.061_405_429_f64;
    let p = 0.327_591_1_f64;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / p.mul_add(x, 1.0);
    let y = (((((a5.mul_add(t, a4)).mul_add(t, a3)).mul_add(t, a2)).mul_add(t, a1)) * t)
        .mul_add(-(-x * x).exp(), 1.0);

    sign * y
}

/// Cumulative distribution function of the standard normal distribution
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Upper tail probability P(X >= x) for X ~ chi-squared with `degrees_of_freedom`
///
/// Uses the Wilson-Hilferty cube-root normal approximation. Zero degrees of
/// freedom means a degenerate distribution at zero.
pub fn chi_square_survival(x: f64, degrees_of_freedom: usize) -> f64 {
    if degrees_of_freedom == 0 {
        return if x > 0.0 { 0.0 } else { 1.0 };
    }
    if x <= 0.0 {
        return 1.0;
    }
    if !x.is_finite() {
        return 0.0;
    }

    let k = degrees_of_freedom as f64;
    let spread = 2.0 / (9.0 * k);
    let z = ((x / k).cbrt() - (1.0 - spread)) / spread.sqrt();

    (1.0 - standard_normal_cdf(z)).clamp(0.0, 1.0)
}
