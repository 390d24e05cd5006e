use std::hash::Hash;

use indexmap::IndexSet;

use crate::error::{ChartError, ChartResult};

/// Inner/outer padding applied by [`ordinal_band_scale`].
pub const ORDINAL_BAND_PADDING: f64 = 0.1;

/// Ordinal scale splitting a pixel range into equal-width bands, one per key.
///
/// Layout matches the classic d3 band scale: every band advances by `step`,
/// of which `bandwidth` is filled and the rest is inner padding. Duplicate
/// domain keys collapse onto their first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<K = String>
where
    K: Eq + Hash,
{
    domain: IndexSet<K>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    round: bool,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<K> BandScale<K>
where
    K: Eq + Hash,
{
    /// Unpadded, unrounded band scale over `range`.
    #[must_use]
    pub fn new(domain: impl IntoIterator<Item = K>, range: (f64, f64)) -> Self {
        let mut scale = Self {
            domain: domain.into_iter().collect(),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        scale
    }

    /// Sets both inner and outer padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = clamp_inner(padding);
        self.padding_outer = clamp_outer(padding);
        self.rescale();
        self
    }

    #[must_use]
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = clamp_inner(padding);
        self.rescale();
        self
    }

    #[must_use]
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = clamp_outer(padding);
        self.rescale();
        self
    }

    /// Distributes leftover outer space; `0.5` centers the bands.
    #[must_use]
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = if align.is_finite() {
            align.clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.rescale();
        self
    }

    #[must_use]
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self.rescale();
        self
    }

    /// Sets the range and enables rounding to whole pixels.
    #[must_use]
    pub fn with_range_round(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self.round = true;
        self.rescale();
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl IntoIterator<Item = K>) -> Self {
        self.domain = domain.into_iter().collect();
        self.rescale();
        self
    }

    #[must_use]
    pub fn domain(&self) -> &IndexSet<K> {
        &self.domain
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Pixel distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn padding_inner(&self) -> f64 {
        self.padding_inner
    }

    #[must_use]
    pub fn padding_outer(&self) -> f64 {
        self.padding_outer
    }

    #[must_use]
    pub fn is_round(&self) -> bool {
        self.round
    }

    #[must_use]
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.domain.get_index_of(key)
    }

    /// Start pixel of the band for `key`.
    #[must_use]
    pub fn position(&self, key: &K) -> Option<f64> {
        self.index_of(key).map(|index| self.position_at(index))
    }

    /// Start pixel of the band at `index`, honoring reversed ranges.
    #[must_use]
    pub fn position_at(&self, index: usize) -> f64 {
        let slot = if self.range.1 < self.range.0 {
            self.domain.len().saturating_sub(index + 1)
        } else {
            index
        };
        self.start + self.step * slot as f64
    }

    /// Fails when the scale cannot be snapped against.
    pub fn validate(&self) -> ChartResult<()> {
        if self.domain.is_empty() {
            return Err(ChartError::InvalidScale(
                "band scale domain must not be empty".to_owned(),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ChartError::InvalidScale(format!(
                "band scale step must be finite and > 0 (got {})",
                self.step
            )));
        }
        Ok(())
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (mut start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };

        let mut step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        if self.round {
            step = step.floor();
        }
        start += (stop - start - step * (n - self.padding_inner)) * self.align;
        let mut bandwidth = step * (1.0 - self.padding_inner);
        if self.round {
            start = start.round();
            bandwidth = bandwidth.round();
        }

        self.start = start;
        self.step = step;
        self.bandwidth = bandwidth;
    }
}

fn clamp_inner(padding: f64) -> f64 {
    if padding.is_finite() {
        padding.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn clamp_outer(padding: f64) -> f64 {
    if padding.is_finite() {
        padding.max(0.0)
    } else {
        0.0
    }
}

/// Rounded band scale with [`ORDINAL_BAND_PADDING`] on both sides of each band.
#[must_use]
pub fn ordinal_band_scale<K>(domain: impl IntoIterator<Item = K>, range: (f64, f64)) -> BandScale<K>
where
    K: Eq + Hash,
{
    BandScale::new(domain, range)
        .with_range_round(range)
        .with_padding(ORDINAL_BAND_PADDING)
}

#[cfg(test)]
mod tests {
    use super::{BandScale, ordinal_band_scale};

    #[test]
    fn ordinal_factory_rounds_and_pads() {
        let scale = ordinal_band_scale(["a", "b", "c", "d", "e"], (0.0, 500.0));
        assert_eq!(scale.step(), 98.0);
        assert_eq!(scale.bandwidth(), 88.0);
        assert_eq!(scale.padding_inner(), 0.1);
        assert!(scale.is_round());
        // (500 - 98 * 4.9) / 2 = 9.9
        assert_eq!(scale.position(&"a"), Some(10.0));
        assert_eq!(scale.position(&"c"), Some(206.0));
    }

    #[test]
    fn unpadded_scale_splits_range_evenly() {
        let scale = BandScale::new(["x", "y", "z", "w"], (0.0, 400.0));
        assert_eq!(scale.step(), 100.0);
        assert_eq!(scale.bandwidth(), 100.0);
        assert_eq!(scale.position(&"w"), Some(300.0));
    }

    #[test]
    fn reversed_range_places_first_key_last() {
        let scale = BandScale::new(["x", "y"], (200.0, 0.0));
        assert_eq!(scale.position(&"x"), Some(100.0));
        assert_eq!(scale.position(&"y"), Some(0.0));
    }

    #[test]
    fn duplicate_keys_collapse() {
        let scale = BandScale::new(["a", "b", "a"], (0.0, 100.0));
        assert_eq!(scale.len(), 2);
        assert_eq!(scale.index_of(&"b"), Some(1));
    }

    #[test]
    fn validate_flags_empty_domain_and_zero_step() {
        let empty: BandScale<&str> = BandScale::new([], (0.0, 100.0));
        assert!(empty.validate().is_err());

        let cramped = ordinal_band_scale(0..10, (0.0, 5.0));
        assert_eq!(cramped.step(), 0.0);
        assert!(cramped.validate().is_err());
    }
}
