//! Flat helper namespace shared by chart-building code.
//!
//! Scale factories, brush snapping, stack extents, object merging and the
//! getter/setter store all live here so components can depend on a single
//! module.

mod accessors;
mod getset;
mod merge;
mod value;

pub use accessors::Merge;
pub use getset::{GetSet, SetMode, getset};
pub use merge::{deep_clone, extend, is_object};
pub use value::{Callback, Map, Value, ValueKind};

pub use crate::core::{
    ordinal_band_scale, quantitative_scale, snap_brush_to_band_scale, stack_max, stack_min,
};
