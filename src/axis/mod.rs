//! Axis drawing for chart components.
//!
//! `x_axis` / `y_axis` create their group element once per container and
//! update it in place on every later call.

mod config;
mod draw;
mod generator;

pub use config::{AxisScale, ChartConfig, ChartState};
pub use draw::{AxisSlot, draw_axis, x_axis, y_axis};
pub use generator::{Axis, AxisGenerator, AxisOrient, AxisTick};
