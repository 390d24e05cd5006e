//! chart-kit: scale, brush-snapping and axis helpers for declarative charts.
//!
//! The crate computes band/linear scale layouts, snaps brush selections onto
//! band boundaries, manages getter/setter configuration state and draws axes
//! into any element tree implementing [`render::Scene`].

pub mod axis;
pub mod core;
pub mod error;
pub mod helpers;
pub mod render;
pub mod telemetry;

pub use axis::{ChartConfig, ChartState, x_axis, y_axis};
pub use error::{ChartError, ChartResult};
