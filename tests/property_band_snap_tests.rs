use chart_kit::core::{Extent, ordinal_band_scale, snap_brush_to_band_scale};
use proptest::prelude::*;

fn scale_and_boundaries() -> impl Strategy<Value = (usize, f64, usize, usize)> {
    (1usize..30, 50.0f64..2_000.0).prop_flat_map(|(n, width)| {
        (Just(n), Just(width), 0..=n, 0..=n)
    })
}

proptest! {
    #[test]
    fn boundary_extents_round_trip((n, width, a, b) in scale_and_boundaries()) {
        let (i, j) = if a <= b { (a, b) } else { (b, a) };
        let scale = ordinal_band_scale(0..n, (0.0, width));
        let step = scale.step();
        let padding = (step * scale.padding_inner() / 2.0).round();

        let selection = Extent::new(step * i as f64, step * j as f64).expect("extent");
        let snapped = snap_brush_to_band_scale(selection, &scale).expect("snap");

        prop_assert_eq!(snapped.boundaries, (i, j));
        prop_assert_eq!(
            snapped.extent.to_array(),
            [step * i as f64 + padding, step * j as f64 + padding]
        );
        prop_assert_eq!(snapped.domain, (i..j).collect::<Vec<_>>());
    }

    #[test]
    fn endpoints_move_to_a_nearest_boundary(
        n in 1usize..30,
        width in 50.0f64..2_000.0,
        start_factor in -0.2f64..1.2,
        span_factor in 0.0f64..1.0
    ) {
        let scale = ordinal_band_scale(0..n, (0.0, width));
        let step = scale.step();
        let last = step * n as f64;
        let start = start_factor * last;
        let end = start + span_factor * last;

        let snapped = snap_brush_to_band_scale(Extent::new(start, end).expect("extent"), &scale)
            .expect("snap");
        let (idx0, idx1) = snapped.boundaries;

        prop_assert!(idx0 <= idx1);
        prop_assert!(idx1 <= n);
        prop_assert_eq!(snapped.domain.len(), idx1 - idx0);
        for (value, idx) in [(start, idx0), (end, idx1)] {
            let clamped = value.clamp(0.0, last);
            prop_assert!((clamped - step * idx as f64).abs() <= step / 2.0 + 1e-9);
        }
    }
}
