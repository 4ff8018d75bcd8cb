//! Tests for the error function and the chi-squared tail approximation

#[cfg(test)]
mod tests {
    use rollpage::math::probability::{chi_square_survival, erf, standard_normal_cdf};

    // Tests erf against tabulated values and odd symmetry
    // Verified by dropping the sign restoration
    #[test]
    fn test_erf_values() {
        assert!(erf(0.0).abs() < 1e-7);
        assert!((erf(1.0) - 0.842_700_792_9).abs() < 1e-6);
        assert!((erf(-1.0) + 0.842_700_792_9).abs() < 1e-6);
        assert!((erf(3.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_standard_normal_cdf() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((standard_normal_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!((standard_normal_cdf(-1.96) - 0.025).abs() < 1e-3);
    }

    // The 5% critical value for 10 degrees of freedom is 18.307
    // Verified by replacing the cube root with a square root
    #[test]
    fn test_chi_square_critical_value() {
        let p = chi_square_survival(18.307, 10);
        assert!((p - 0.05).abs() < 0.005, "p = {p}");
    }

    // Survival probability falls as the statistic grows
    #[test]
    fn test_chi_square_survival_is_decreasing() {
        let values: Vec<f64> = [0.5, 2.0, 5.0, 10.0, 20.0]
            .iter()
            .map(|&x| chi_square_survival(x, 4))
            .collect();

        assert!(values.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    // Edge cases: non-positive and infinite statistics, zero degrees of freedom
    #[test]
    fn test_chi_square_survival_edges() {
        assert!((chi_square_survival(0.0, 3) - 1.0).abs() < f64::EPSILON);
        assert!(chi_square_survival(f64::INFINITY, 3).abs() < f64::EPSILON);
        assert!((chi_square_survival(0.0, 0) - 1.0).abs() < f64::EPSILON);
        assert!(chi_square_survival(1.0, 0).abs() < f64::EPSILON);
    }
}
