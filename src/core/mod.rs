pub mod band_scale;
pub mod scale;
pub mod snap;
pub mod stack;
pub mod types;

pub use band_scale::{BandScale, ORDINAL_BAND_PADDING, ordinal_band_scale};
pub use scale::{LinearScale, QuantitativeScale, ScaleKind, format_tick, quantitative_scale};
pub use snap::{BandSnap, snap_brush_to_band_scale};
pub use stack::{stack_max, stack_min};
pub use types::Extent;
