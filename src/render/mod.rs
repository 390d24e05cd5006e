mod scene_tree;
mod svg;
mod transition;

pub use scene_tree::{SceneNode, SceneTree};
pub use transition::{ScheduledTransition, TransitionPatch, TransitionToken};

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Handle to one element of a [`Scene`].
///
/// Backends may recycle storage slots; the generation tells a stale handle
/// apart from the node that took over its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    #[must_use]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Element-tree capabilities the axis code needs from a rendering backend.
///
/// A backend only has to provide the primitive operations; class and
/// descendant selection are derived from them. Transitions are
/// fire-and-forget: scheduling returns immediately and the backend owns the
/// animation, including superseding earlier schedules.
pub trait Scene {
    fn root(&self) -> NodeId;

    fn tag(&self, node: NodeId) -> ChartResult<&str>;

    fn children(&self, node: NodeId) -> ChartResult<Vec<NodeId>>;

    fn attr(&self, node: NodeId, name: &str) -> ChartResult<Option<&str>>;

    fn text(&self, node: NodeId) -> ChartResult<Option<&str>>;

    fn append(&mut self, parent: NodeId, tag: &str) -> ChartResult<NodeId>;

    /// Detaches and drops `node` together with its subtree.
    fn remove(&mut self, node: NodeId) -> ChartResult<()>;

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> ChartResult<()>;

    fn set_text(&mut self, node: NodeId, text: &str) -> ChartResult<()>;

    fn schedule_transition(
        &mut self,
        node: NodeId,
        transition: &TransitionToken,
        delay_ms: f64,
    ) -> ChartResult<()>;

    fn has_class(&self, node: NodeId, class: &str) -> ChartResult<bool> {
        Ok(self
            .attr(node, "class")?
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class)))
    }

    /// First descendant of `parent` (document order) carrying `class`.
    fn select_class(&self, parent: NodeId, class: &str) -> ChartResult<Option<NodeId>> {
        for node in self.descendants(parent)? {
            if self.has_class(node, class)? {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    /// All descendants of `parent` with the given tag, in document order.
    fn select_all(&self, parent: NodeId, tag: &str) -> ChartResult<Vec<NodeId>> {
        let mut selected = Vec::new();
        for node in self.descendants(parent)? {
            if self.tag(node)? == tag {
                selected.push(node);
            }
        }
        Ok(selected)
    }

    /// Pre-order descendants of `parent`, excluding `parent` itself.
    fn descendants(&self, parent: NodeId) -> ChartResult<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(parent)?.into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node)?.into_iter().rev());
        }
        Ok(out)
    }
}
