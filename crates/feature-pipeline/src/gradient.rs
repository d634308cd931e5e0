//! Finite-Difference Derivatives

/// Discrete derivative with unit spacing: central differences in the
/// interior, one-sided differences at the endpoints. Output length equals
/// input length; inputs shorter than two samples yield zeros.
pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut out = Vec::with_capacity(n);
    out.push(values[1] - values[0]);
    for i in 1..n - 1 {
        out.push((values[i + 1] - values[i - 1]) / 2.0);
    }
    out.push(values[n - 1] - values[n - 2]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_sequence_constant_slope() {
        let values = vec![1.0, 3.0, 5.0, 7.0];
        assert_eq!(gradient(&values), vec![2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_known_values() {
        // numpy.gradient([1, 2, 4, 7]) == [1, 1.5, 2.5, 3]
        let values = vec![1.0, 2.0, 4.0, 7.0];
        assert_eq!(gradient(&values), vec![1.0, 1.5, 2.5, 3.0]);
    }

    #[test]
    fn test_second_order_is_composition() {
        let values: Vec<f64> = (0..20).map(|i| ((i as f64) * 0.3).sin()).collect();
        let d1 = gradient(&values);
        let d2 = gradient(&d1);
        assert_eq!(d2, gradient(&gradient(&values)));
        assert_eq!(d2.len(), values.len());
    }

    #[test]
    fn test_degenerate_lengths() {
        assert_eq!(gradient(&[]), Vec::<f64>::new());
        assert_eq!(gradient(&[5.0]), vec![0.0]);
    }
}
