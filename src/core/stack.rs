use ordered_float::OrderedFloat;

/// Largest upper value of a stacked series made of `[lower, upper]` pairs.
///
/// NaN entries are ignored; an empty (or all-NaN) series yields `None`.
#[must_use]
pub fn stack_max(series: &[[f64; 2]]) -> Option<f64> {
    series
        .iter()
        .map(|layer| layer[1])
        .filter(|value| !value.is_nan())
        .map(OrderedFloat)
        .max()
        .map(OrderedFloat::into_inner)
}

/// Smallest lower value of a stacked series made of `[lower, upper]` pairs.
#[must_use]
pub fn stack_min(series: &[[f64; 2]]) -> Option<f64> {
    series
        .iter()
        .map(|layer| layer[0])
        .filter(|value| !value.is_nan())
        .map(OrderedFloat)
        .min()
        .map(OrderedFloat::into_inner)
}

#[cfg(test)]
mod tests {
    use super::{stack_max, stack_min};

    #[test]
    fn stack_extent_reads_the_right_column() {
        let series = [[0.0, 3.0], [3.0, 7.5], [-2.0, 1.0]];
        assert_eq!(stack_max(&series), Some(7.5));
        assert_eq!(stack_min(&series), Some(-2.0));
    }

    #[test]
    fn nan_and_empty_series_are_skipped() {
        assert_eq!(stack_max(&[]), None);
        assert_eq!(stack_min(&[[f64::NAN, 1.0]]), None);
        assert_eq!(stack_max(&[[0.0, f64::NAN], [0.0, 2.0]]), Some(2.0));
    }
}
