use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::error::ChartResult;
use crate::render::{NodeId, Scene};

use super::{Axis, AxisGenerator, AxisOrient, ChartConfig, ChartState};

/// The two axes a chart component can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSlot {
    X,
    Y,
}

impl AxisSlot {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::X => "x-axis-g",
            Self::Y => "y-axis-g",
        }
    }

    /// Orientation of the generator built when none is configured.
    #[must_use]
    pub fn default_orient(self) -> AxisOrient {
        match self {
            Self::X => AxisOrient::Bottom,
            Self::Y => AxisOrient::Left,
        }
    }

    /// Transform applied once, when the group is created.
    fn initial_transform(self, config: &ChartConfig) -> Option<String> {
        match self {
            Self::X => Some(format!("translate(0, {})", config.height())),
            Self::Y => None,
        }
    }
}

/// Creates the axis group on first use, then (re)applies `axis` under the
/// state's transition.
///
/// The group's own transition starts after the token's delay; every `g`
/// below it is staggered by a further `transition_delay_ms` per element.
pub fn draw_axis(
    config: &ChartConfig,
    state: &ChartState,
    scene: &mut dyn Scene,
    container: NodeId,
    slot: AxisSlot,
    axis: &dyn AxisGenerator,
) -> ChartResult<NodeId> {
    let group = match scene.select_class(container, slot.css_class())? {
        Some(group) => group,
        None => {
            let group = scene.append(container, "g")?;
            if let Some(transform) = slot.initial_transform(config) {
                scene.set_attr(group, "transform", &transform)?;
            }
            scene.set_attr(group, "class", slot.css_class())?;
            debug!(class = slot.css_class(), node = group.index(), "created axis group");
            group
        }
    };

    let token = state.transition_ref();
    scene.schedule_transition(group, token, token.delay_ms)?;
    axis.generate(scene, group)?;

    let stagger = state.transition_delay_ms();
    let children = scene.select_all(group, "g")?;
    trace!(
        class = slot.css_class(),
        staggered = children.len(),
        stagger_ms = stagger,
        "scheduled axis transition"
    );
    for (index, child) in children.into_iter().enumerate() {
        scene.schedule_transition(child, token, token.delay_ms + stagger * index as f64)?;
    }

    Ok(group)
}

/// Draws the horizontal axis if `config` enables it. Returns `None` when the
/// axis is disabled or there is nothing to build it from.
pub fn x_axis(
    config: &ChartConfig,
    state: &ChartState,
    scene: &mut dyn Scene,
    container: NodeId,
) -> ChartResult<Option<NodeId>> {
    draw_slot(config, state, scene, container, AxisSlot::X)
}

/// Vertical counterpart of [`x_axis`].
pub fn y_axis(
    config: &ChartConfig,
    state: &ChartState,
    scene: &mut dyn Scene,
    container: NodeId,
) -> ChartResult<Option<NodeId>> {
    draw_slot(config, state, scene, container, AxisSlot::Y)
}

fn draw_slot(
    config: &ChartConfig,
    state: &ChartState,
    scene: &mut dyn Scene,
    container: NodeId,
    slot: AxisSlot,
) -> ChartResult<Option<NodeId>> {
    let (show, configured, scale) = match slot {
        AxisSlot::X => (config.x_axis_show(), config.x_axis(), state.x_scale_ref()),
        AxisSlot::Y => (config.y_axis_show(), config.y_axis(), state.y_scale_ref()),
    };
    if !show {
        return Ok(None);
    }

    let generator: Rc<dyn AxisGenerator> = match (configured, scale) {
        (Some(generator), _) => generator,
        (None, Some(scale)) => Rc::new(Axis::new(slot.default_orient(), scale.clone())),
        (None, None) => {
            warn!(
                class = slot.css_class(),
                "axis enabled without generator or scale, skipping"
            );
            return Ok(None);
        }
    };

    draw_axis(config, state, scene, container, slot, &*generator).map(Some)
}
