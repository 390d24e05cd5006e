use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::format_tick;
use crate::error::ChartResult;
use crate::render::{NodeId, Scene};

use super::AxisScale;

/// Sub-pixel shift that keeps 1px strokes crisp.
const CRISP_EDGE_OFFSET: f64 = 0.5;
const TICK_KEY_ATTR: &str = "data-key";

/// Draws (or redraws) axis content inside an axis group element.
///
/// Implementations must be idempotent: calling `generate` on a group that
/// already holds axis content updates it in place.
pub trait AxisGenerator: fmt::Debug {
    fn generate(&self, scene: &mut dyn Scene, group: NodeId) -> ChartResult<()>;
}

/// Side of the plot an axis is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisOrient {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

impl AxisOrient {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Direction ticks grow in: away from the plot.
    fn sign(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Right | Self::Bottom => 1.0,
        }
    }

    fn text_anchor(self) -> &'static str {
        match self {
            Self::Right => "start",
            Self::Left => "end",
            Self::Top | Self::Bottom => "middle",
        }
    }

    fn label_dy(self) -> &'static str {
        match self {
            Self::Top => "0em",
            Self::Bottom => "0.71em",
            Self::Left | Self::Right => "0.32em",
        }
    }
}

/// One resolved tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub key: String,
    pub label: String,
    pub position: f64,
}

/// Default axis generator: a domain path plus one `g.tick` per tick value.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    orient: AxisOrient,
    scale: AxisScale,
    tick_count: usize,
    tick_size_inner: f64,
    tick_size_outer: f64,
    tick_padding: f64,
}

impl Axis {
    #[must_use]
    pub fn new(orient: AxisOrient, scale: impl Into<AxisScale>) -> Self {
        Self {
            orient,
            scale: scale.into(),
            tick_count: 10,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
        }
    }

    #[must_use]
    pub fn bottom(scale: impl Into<AxisScale>) -> Self {
        Self::new(AxisOrient::Bottom, scale)
    }

    #[must_use]
    pub fn left(scale: impl Into<AxisScale>) -> Self {
        Self::new(AxisOrient::Left, scale)
    }

    #[must_use]
    pub fn top(scale: impl Into<AxisScale>) -> Self {
        Self::new(AxisOrient::Top, scale)
    }

    #[must_use]
    pub fn right(scale: impl Into<AxisScale>) -> Self {
        Self::new(AxisOrient::Right, scale)
    }

    /// Approximate tick count for quantitative scales; band scales tick every key.
    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets both inner and outer tick sizes.
    #[must_use]
    pub fn with_tick_size(mut self, size: f64) -> Self {
        self.tick_size_inner = size;
        self.tick_size_outer = size;
        self
    }

    #[must_use]
    pub fn with_tick_size_inner(mut self, size: f64) -> Self {
        self.tick_size_inner = size;
        self
    }

    #[must_use]
    pub fn with_tick_size_outer(mut self, size: f64) -> Self {
        self.tick_size_outer = size;
        self
    }

    #[must_use]
    pub fn with_tick_padding(mut self, padding: f64) -> Self {
        self.tick_padding = padding;
        self
    }

    #[must_use]
    pub fn orient(&self) -> AxisOrient {
        self.orient
    }

    #[must_use]
    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    #[must_use]
    pub fn ticks(&self) -> Vec<AxisTick> {
        match &self.scale {
            AxisScale::Band(scale) => {
                let mut offset = (scale.bandwidth() - 1.0).max(0.0) / 2.0;
                if scale.is_round() {
                    offset = offset.round();
                }
                scale
                    .domain()
                    .iter()
                    .enumerate()
                    .map(|(index, key)| AxisTick {
                        key: key.clone(),
                        label: key.clone(),
                        position: scale.position_at(index) + offset,
                    })
                    .collect()
            }
            AxisScale::Quantitative(scale) => {
                let step = scale.tick_step(self.tick_count);
                scale
                    .ticks(self.tick_count)
                    .into_iter()
                    .map(|value| {
                        let label = format_tick(value, step);
                        AxisTick {
                            key: label.clone(),
                            label,
                            position: scale.map(value),
                        }
                    })
                    .collect()
            }
        }
    }

    fn domain_path(&self) -> String {
        let (r0, r1) = self.scale.range();
        let r0 = r0 + CRISP_EDGE_OFFSET;
        let r1 = r1 + CRISP_EDGE_OFFSET;
        let outer = self.orient.sign() * self.tick_size_outer;
        if self.orient.is_horizontal() {
            format!("M{r0},{outer}V{CRISP_EDGE_OFFSET}H{r1}V{outer}")
        } else {
            format!("M{outer},{r0}H{CRISP_EDGE_OFFSET}V{r1}H{outer}")
        }
    }

    fn tick_transform(&self, position: f64) -> String {
        let position = position + CRISP_EDGE_OFFSET;
        if self.orient.is_horizontal() {
            format!("translate({position},0)")
        } else {
            format!("translate(0,{position})")
        }
    }

    fn ensure_domain_path(&self, scene: &mut dyn Scene, group: NodeId) -> ChartResult<NodeId> {
        for child in scene.children(group)? {
            if scene.tag(child)? == "path" && scene.has_class(child, "domain")? {
                return Ok(child);
            }
        }
        let path = scene.append(group, "path")?;
        scene.set_attr(path, "class", "domain")?;
        scene.set_attr(path, "stroke", "currentColor")?;
        Ok(path)
    }

    fn existing_ticks(
        &self,
        scene: &dyn Scene,
        group: NodeId,
    ) -> ChartResult<HashMap<String, NodeId>> {
        let mut ticks = HashMap::new();
        for child in scene.children(group)? {
            if scene.tag(child)? != "g" || !scene.has_class(child, "tick")? {
                continue;
            }
            if let Some(key) = scene.attr(child, TICK_KEY_ATTR)? {
                ticks.insert(key.to_owned(), child);
            }
        }
        Ok(ticks)
    }

    fn update_tick(&self, scene: &mut dyn Scene, node: NodeId, tick: &AxisTick) -> ChartResult<()> {
        let inner = self.orient.sign() * self.tick_size_inner;
        let spacing = self.orient.sign() * (self.tick_size_inner.max(0.0) + self.tick_padding);
        let (line_attr, text_attr) = if self.orient.is_horizontal() {
            ("y2", "y")
        } else {
            ("x2", "x")
        };

        scene.set_attr(node, "opacity", "1")?;
        scene.set_attr(node, "transform", &self.tick_transform(tick.position))?;

        let mut line = None;
        let mut text = None;
        for child in scene.children(node)? {
            match scene.tag(child)? {
                "line" => line = Some(child),
                "text" => text = Some(child),
                _ => {}
            }
        }
        let line = match line {
            Some(line) => line,
            None => scene.append(node, "line")?,
        };
        let text = match text {
            Some(text) => text,
            None => scene.append(node, "text")?,
        };

        scene.set_attr(line, "stroke", "currentColor")?;
        scene.set_attr(line, line_attr, &inner.to_string())?;
        scene.set_attr(text, "fill", "currentColor")?;
        scene.set_attr(text, text_attr, &spacing.to_string())?;
        scene.set_attr(text, "dy", self.orient.label_dy())?;
        scene.set_text(text, &tick.label)
    }
}

impl AxisGenerator for Axis {
    fn generate(&self, scene: &mut dyn Scene, group: NodeId) -> ChartResult<()> {
        scene.set_attr(group, "fill", "none")?;
        scene.set_attr(group, "font-size", "10")?;
        scene.set_attr(group, "font-family", "sans-serif")?;
        scene.set_attr(group, "text-anchor", self.orient.text_anchor())?;

        let path = self.ensure_domain_path(scene, group)?;
        scene.set_attr(path, "d", &self.domain_path())?;

        let mut stale = self.existing_ticks(scene, group)?;
        for tick in self.ticks() {
            let node = match stale.remove(&tick.key) {
                Some(node) => node,
                None => {
                    let node = scene.append(group, "g")?;
                    scene.set_attr(node, "class", "tick")?;
                    scene.set_attr(node, TICK_KEY_ATTR, &tick.key)?;
                    node
                }
            };
            self.update_tick(scene, node, &tick)?;
        }

        for node in stale.into_values() {
            scene.remove(node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisGenerator, AxisOrient};
    use crate::core::{LinearScale, ordinal_band_scale};
    use crate::render::{Scene, SceneTree};

    #[test]
    fn band_ticks_sit_at_band_centers() {
        let scale = ordinal_band_scale(
            ["a", "b", "c", "d", "e"].map(str::to_owned),
            (0.0, 500.0),
        );
        let ticks = Axis::bottom(scale).ticks();
        let positions: Vec<f64> = ticks.iter().map(|t| t.position).collect();
        // start 10, step 98, bandwidth 88 => offset round(43.5) = 44
        assert_eq!(positions, vec![54.0, 152.0, 250.0, 348.0, 446.0]);
        assert_eq!(ticks[2].label, "c");
    }

    #[test]
    fn vertical_axis_uses_x_attributes_and_end_anchor() {
        let scale = LinearScale::new((0.0, 100.0), (400.0, 0.0)).expect("scale");
        let axis = Axis::left(scale).with_tick_count(5);
        assert_eq!(axis.orient(), AxisOrient::Left);

        let mut scene = SceneTree::new();
        let root = scene.root();
        let group = scene.append(root, "g").expect("group");
        axis.generate(&mut scene, group).expect("generate");

        assert_eq!(scene.attr(group, "text-anchor").expect("attr"), Some("end"));
        let ticks = scene.nodes_with_class("tick");
        assert_eq!(ticks.len(), 6);
        let first_line = scene.select_all(ticks[0], "line").expect("line")[0];
        assert_eq!(scene.attr(first_line, "x2").expect("attr"), Some("-6"));
        let first_text = scene.select_all(ticks[0], "text").expect("text")[0];
        assert_eq!(scene.text(first_text).expect("text"), Some("0"));
        assert_eq!(scene.attr(ticks[0], "transform").expect("attr"), Some("translate(0,400.5)"));
    }

    #[test]
    fn domain_path_spans_the_range() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 300.0)).expect("scale");
        let axis = Axis::bottom(scale);
        assert_eq!(axis.domain_path(), "M0.5,6V0.5H300.5V6");
        let axis = Axis::left(LinearScale::new((0.0, 1.0), (300.0, 0.0)).expect("scale"));
        assert_eq!(axis.domain_path(), "M-6,300.5H0.5V0.5H-6");
    }
}
