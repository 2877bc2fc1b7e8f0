use ndarray::Array1;

use crate::errors::ScoringError;

/// Sort values ascending into a vector ready for [`quantile`].
pub fn sorted_array(values: impl IntoIterator<Item = f64>) -> Array1<f64> {
    let mut values: Vec<f64> = values.into_iter().collect();
    values.sort_by(f64::total_cmp);
    Array1::from_vec(values)
}

/// Linear interpolation between order statistics (Hyndman & Fan type 7).
///
/// `sorted` must be ascending; `p` is clamped to [0, 1].
pub fn quantile(sorted: &Array1<f64>, p: f64) -> Result<f64, ScoringError> {
    if sorted.is_empty() {
        return Err(ScoringError::EmptyInput { what: "quantile" });
    }

    let position = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Ok(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolates_between_neighbours() {
        let sorted = sorted_array([70.0, 0.0, 10.0, 60.0, 20.0, 50.0, 30.0, 40.0]);

        assert_eq!(quantile(&sorted, 0.25).unwrap(), 17.5);
        assert_eq!(quantile(&sorted, 0.5).unwrap(), 35.0);
        assert_eq!(quantile(&sorted, 0.75).unwrap(), 52.5);
    }

    #[test]
    fn test_extremes_are_min_and_max() {
        let sorted = sorted_array([3.0, 9.0, 1.0]);

        assert_eq!(quantile(&sorted, 0.0).unwrap(), 1.0);
        assert_eq!(quantile(&sorted, 1.0).unwrap(), 9.0);
    }

    #[test]
    fn test_single_value() {
        let sorted = sorted_array([42.0]);
        assert_eq!(quantile(&sorted, 0.75).unwrap(), 42.0);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let sorted = sorted_array(Vec::new());
        assert_eq!(
            quantile(&sorted, 0.5),
            Err(ScoringError::EmptyInput { what: "quantile" })
        );
    }
}
