use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Closed pixel interval `[start, end]`, typically a brush selection.
///
/// Zero-width extents are valid: snapping can collapse a selection onto a
/// single band boundary and callers are expected to handle that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Extent {
    start: f64,
    end: f64,
}

impl Extent {
    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidArgument(
                "extent bounds must be finite".to_owned(),
            ));
        }
        if start > end {
            return Err(ChartError::InvalidArgument(format!(
                "extent start must be <= end (got [{start}, {end}])"
            )));
        }

        Ok(Self { start, end })
    }

    /// Builds an extent from two endpoints in any order.
    pub fn from_unordered(a: f64, b: f64) -> ChartResult<Self> {
        if a <= b {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.start..=self.end).contains(&value)
    }

    #[must_use]
    pub fn to_array(self) -> [f64; 2] {
        [self.start, self.end]
    }
}

impl TryFrom<[f64; 2]> for Extent {
    type Error = ChartError;

    fn try_from(value: [f64; 2]) -> ChartResult<Self> {
        Self::new(value[0], value[1])
    }
}

impl TryFrom<(f64, f64)> for Extent {
    type Error = ChartError;

    fn try_from(value: (f64, f64)) -> ChartResult<Self> {
        Self::new(value.0, value.1)
    }
}

impl From<Extent> for [f64; 2] {
    fn from(value: Extent) -> Self {
        value.to_array()
    }
}

impl From<Extent> for (f64, f64) {
    fn from(value: Extent) -> Self {
        (value.start, value.end)
    }
}
