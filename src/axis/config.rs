use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::accessors;
use crate::core::{BandScale, LinearScale, QuantitativeScale};
use crate::error::{ChartError, ChartResult};
use crate::render::TransitionToken;

use super::AxisGenerator;

/// Scale an axis reads its ticks from.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Band(BandScale<String>),
    Quantitative(QuantitativeScale),
}

impl AxisScale {
    /// Pixel range covered by the scale, in declaration order.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Band(scale) => scale.range(),
            Self::Quantitative(scale) => scale.range(),
        }
    }
}

impl From<BandScale<String>> for AxisScale {
    fn from(value: BandScale<String>) -> Self {
        Self::Band(value)
    }
}

impl From<QuantitativeScale> for AxisScale {
    fn from(value: QuantitativeScale) -> Self {
        Self::Quantitative(value)
    }
}

impl From<LinearScale> for AxisScale {
    fn from(value: LinearScale) -> Self {
        Self::Quantitative(QuantitativeScale::Linear(value))
    }
}

/// Static chart options recognized by the axis renderer.
///
/// Generator overrides are runtime-only and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    width: f64,
    height: f64,
    #[serde(alias = "xAxisShow")]
    x_axis_show: bool,
    #[serde(alias = "yAxisShow")]
    y_axis_show: bool,
    #[serde(skip)]
    x_axis: Option<Rc<dyn AxisGenerator>>,
    #[serde(skip)]
    y_axis: Option<Rc<dyn AxisGenerator>>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            x_axis_show: true,
            y_axis_show: true,
            x_axis: None,
            y_axis: None,
        }
    }
}

accessors! {
    ChartConfig {
        replace width: f64 => set_width,
        replace height: f64 => set_height,
        replace x_axis_show: bool => set_x_axis_show,
        replace y_axis_show: bool => set_y_axis_show,
        replace x_axis: Option<Rc<dyn AxisGenerator>> => set_x_axis,
        replace y_axis: Option<Rc<dyn AxisGenerator>> => set_y_axis,
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Uses `generator` instead of the default bottom axis.
    #[must_use]
    pub fn with_x_axis(mut self, generator: impl AxisGenerator + 'static) -> Self {
        self.x_axis = Some(Rc::new(generator));
        self
    }

    /// Uses `generator` instead of the default left axis.
    #[must_use]
    pub fn with_y_axis(mut self, generator: impl AxisGenerator + 'static) -> Self {
        self.y_axis = Some(Rc::new(generator));
        self
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

/// Mutable per-chart state: current scales and transition scheduling.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartState {
    x_scale: Option<AxisScale>,
    y_scale: Option<AxisScale>,
    transition: TransitionToken,
    transition_delay_ms: f64,
}

accessors! {
    ChartState {
        replace x_scale: Option<AxisScale> => set_x_scale,
        replace y_scale: Option<AxisScale> => set_y_scale,
        merge transition: TransitionToken => set_transition,
        replace transition_delay_ms: f64 => set_transition_delay_ms,
    }
}

impl ChartState {
    #[must_use]
    pub fn with_scales(x_scale: impl Into<AxisScale>, y_scale: impl Into<AxisScale>) -> Self {
        Self {
            x_scale: Some(x_scale.into()),
            y_scale: Some(y_scale.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn x_scale_ref(&self) -> Option<&AxisScale> {
        self.x_scale.as_ref()
    }

    #[must_use]
    pub fn y_scale_ref(&self) -> Option<&AxisScale> {
        self.y_scale.as_ref()
    }

    #[must_use]
    pub fn transition_ref(&self) -> &TransitionToken {
        &self.transition
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartConfig, ChartState};
    use crate::axis::{x_axis, y_axis};
    use crate::core::{LinearScale, ordinal_band_scale};
    use crate::render::{Scene, SceneTree, TransitionPatch};

    #[test]
    fn config_json_round_trip_uses_defaults_for_missing_fields() {
        let config = ChartConfig::from_json_str(r#"{"height": 320, "y_axis_show": false}"#)
            .expect("parse config");
        assert_eq!(config.width(), 600.0);
        assert_eq!(config.height(), 320.0);
        assert!(config.x_axis_show());
        assert!(!config.y_axis_show());
        assert!(config.x_axis().is_none());

        let json = config.to_json_pretty().expect("serialize");
        assert!(!json.contains("x_axis\""));
        let reparsed = ChartConfig::from_json_str(&json).expect("reparse");
        assert_eq!(reparsed.height(), 320.0);
    }

    #[test]
    fn camel_case_show_flags_hide_the_axes() {
        let config = ChartConfig::from_json_str(r#"{"xAxisShow": false, "yAxisShow": false}"#)
            .expect("parse config");
        assert!(!config.x_axis_show());
        assert!(!config.y_axis_show());

        let state = ChartState::with_scales(
            ordinal_band_scale(["a", "b"].map(str::to_owned), (0.0, 200.0)),
            LinearScale::new((0.0, 1.0), (100.0, 0.0)).expect("scale"),
        );
        let mut scene = SceneTree::new();
        let root = scene.root();
        assert_eq!(x_axis(&config, &state, &mut scene, root).expect("x axis"), None);
        assert_eq!(y_axis(&config, &state, &mut scene, root).expect("y axis"), None);
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn state_transition_setter_merges_patch() {
        let mut state = ChartState::default();
        state
            .set_transition(TransitionPatch {
                name: Some("brush".to_owned()),
                ..TransitionPatch::default()
            })
            .set_transition_delay_ms(15.0);

        assert_eq!(state.transition().name, "brush");
        assert_eq!(state.transition().duration_ms, 250.0);
        assert_eq!(state.transition_delay_ms(), 15.0);
    }
}
