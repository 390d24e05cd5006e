use std::hash::Hash;

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{BandScale, Extent};
use crate::error::ChartResult;

type StepTable = SmallVec<[f64; 32]>;

/// Brush extent aligned to band boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSnap<K> {
    /// Keys whose bands lie fully inside the aligned extent, in domain order.
    pub domain: Vec<K>,
    /// Aligned pixel extent, shifted by half the inner padding.
    pub extent: Extent,
    /// Boundary indices the extent endpoints snapped to.
    pub boundaries: (usize, usize),
}

impl<K> BandSnap<K> {
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Bands covered by the extent; zero when the boundaries are reversed.
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.boundaries.1.saturating_sub(self.boundaries.0)
    }
}

/// Snaps a pixel-space brush selection onto the nearest boundaries of a band scale.
///
/// Boundaries sit at `step * i` for `i` in `0..=domain.len()`. Each endpoint
/// moves to its closer boundary; an endpoint exactly halfway between two
/// boundaries moves to the upper one. Endpoints past either end of the table
/// clamp to the first or last boundary, so the result may be zero-width.
pub fn snap_brush_to_band_scale<K>(extent: Extent, scale: &BandScale<K>) -> ChartResult<BandSnap<K>>
where
    K: Clone + Eq + Hash,
{
    scale.validate()?;

    let step = scale.step();
    let steps = step_table(scale.len(), step);
    let padding = (step * scale.padding_inner() / 2.0).round();

    let idx0 = nearest_boundary(&steps, extent.start());
    let idx1 = nearest_boundary(&steps, extent.end());
    trace!(
        start = extent.start(),
        end = extent.end(),
        idx0,
        idx1,
        padding,
        "snap brush to band scale"
    );

    let domain = scale
        .domain()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i >= idx0 && *i < idx1)
        .map(|(_, key)| key.clone())
        .collect();

    Ok(BandSnap {
        domain,
        extent: Extent::new(steps[idx0] + padding, steps[idx1] + padding)?,
        boundaries: (idx0, idx1),
    })
}

fn step_table(len: usize, step: f64) -> StepTable {
    (0..=len).map(|i| step * i as f64).collect()
}

fn nearest_boundary(steps: &[f64], value: f64) -> usize {
    // index of the first boundary strictly greater than `value`
    let insertion = steps.partition_point(|boundary| *boundary <= value);
    if insertion == 0 {
        return 0;
    }
    if insertion == steps.len() {
        return steps.len() - 1;
    }

    let below = value - steps[insertion - 1];
    let above = steps[insertion] - value;
    if below >= above { insertion } else { insertion - 1 }
}

#[cfg(test)]
mod tests {
    use super::{BandSnap, nearest_boundary, step_table};
    use crate::core::Extent;

    #[test]
    fn step_table_has_one_more_entry_than_domain() {
        let steps = step_table(4, 25.0);
        assert_eq!(steps.as_slice(), &[0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn midpoint_prefers_upper_boundary() {
        let steps = step_table(4, 20.0);
        assert_eq!(nearest_boundary(&steps, 10.0), 1);
        assert_eq!(nearest_boundary(&steps, 9.999), 0);
        assert_eq!(nearest_boundary(&steps, 10.001), 1);
    }

    #[test]
    fn out_of_table_values_clamp() {
        let steps = step_table(3, 10.0);
        assert_eq!(nearest_boundary(&steps, -50.0), 0);
        assert_eq!(nearest_boundary(&steps, 30.0), 3);
        assert_eq!(nearest_boundary(&steps, 1_000.0), 3);
    }

    #[test]
    fn band_count_of_reversed_boundaries_is_zero() {
        let snap = BandSnap::<&str> {
            domain: Vec::new(),
            extent: Extent::new(0.0, 0.0).expect("extent"),
            boundaries: (3, 1),
        };
        assert_eq!(snap.band_count(), 0);

        let forward = BandSnap {
            boundaries: (1, 3),
            ..snap
        };
        assert_eq!(forward.band_count(), 2);
    }
}
