use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use crate::error::{ChartError, ChartResult};

use super::transition::sanitize_ms;
use super::{NodeId, Scene, ScheduledTransition, TransitionToken};

/// One element stored in a [`SceneTree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub tag: String,
    pub attrs: IndexMap<String, String>,
    pub text: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SceneNode {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_owned(),
            attrs: IndexMap::new(),
            text: None,
            parent,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

/// In-memory [`Scene`] rooted at an `<svg>` element.
///
/// Used for headless rendering and tests. Slots freed by `remove` are reused
/// by later appends under a bumped generation, so storage stays proportional
/// to the live tree and stale ids keep failing with `UnknownNode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneTree {
    nodes: Vec<Slot>,
    #[serde(skip)]
    free: Vec<usize>,
    transitions: Vec<ScheduledTransition>,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    #[must_use]
    pub fn new() -> Self {
        let mut root = SceneNode::new("svg", None);
        root.attrs
            .insert("xmlns".to_owned(), "http://www.w3.org/2000/svg".to_owned());
        Self {
            nodes: vec![Slot {
                generation: 0,
                node: Some(root),
            }],
            free: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Empty scene with `width`/`height` set on the root element.
    #[must_use]
    pub fn with_size(width: f64, height: f64) -> Self {
        let mut tree = Self::new();
        if let Some(Slot {
            node: Some(root), ..
        }) = tree.nodes.first_mut()
        {
            root.attrs.insert("width".to_owned(), width.to_string());
            root.attrs.insert("height".to_owned(), height.to_string());
        }
        tree
    }

    pub fn node(&self, id: NodeId) -> ChartResult<&SceneNode> {
        self.nodes
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(ChartError::UnknownNode(id.index))
    }

    fn node_mut(&mut self, id: NodeId) -> ChartResult<&mut SceneNode> {
        self.nodes
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(ChartError::UnknownNode(id.index))
    }

    /// Number of live nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Storage slots allocated so far, live or free.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every live node carrying `class`, in document order.
    #[must_use]
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        let root = self.root();
        let mut found = Vec::new();
        if self.has_class(root, class).unwrap_or(false) {
            found.push(root);
        }
        for node in self.descendants(root).unwrap_or_default() {
            if self.has_class(node, class).unwrap_or(false) {
                found.push(node);
            }
        }
        found
    }

    #[must_use]
    pub fn transitions(&self) -> &[ScheduledTransition] {
        &self.transitions
    }

    #[must_use]
    pub fn transition_for(&self, node: NodeId) -> Option<&ScheduledTransition> {
        self.transitions.iter().find(|t| t.node == node)
    }

    /// Drops every recorded transition, as if all of them had finished.
    pub fn complete_transitions(&mut self) {
        self.transitions.clear();
    }

    /// Serializes the whole tree for debugging and regression fixtures.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize scene: {e}")))
    }
}

impl Scene for SceneTree {
    fn root(&self) -> NodeId {
        NodeId {
            index: 0,
            generation: 0,
        }
    }

    fn tag(&self, node: NodeId) -> ChartResult<&str> {
        Ok(self.node(node)?.tag.as_str())
    }

    fn children(&self, node: NodeId) -> ChartResult<Vec<NodeId>> {
        Ok(self.node(node)?.children.clone())
    }

    fn attr(&self, node: NodeId, name: &str) -> ChartResult<Option<&str>> {
        Ok(self.node(node)?.attrs.get(name).map(String::as_str))
    }

    fn text(&self, node: NodeId) -> ChartResult<Option<&str>> {
        Ok(self.node(node)?.text.as_deref())
    }

    fn append(&mut self, parent: NodeId, tag: &str) -> ChartResult<NodeId> {
        self.node(parent)?;
        let node = SceneNode::new(tag, Some(parent));
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.nodes[index];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.nodes.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.nodes.len() - 1,
                    generation: 0,
                }
            }
        };
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn remove(&mut self, node: NodeId) -> ChartResult<()> {
        if node == self.root() {
            return Err(ChartError::InvalidArgument(
                "scene root cannot be removed".to_owned(),
            ));
        }
        let parent = self.node(node)?.parent;
        let mut doomed = self.descendants(node)?;
        doomed.push(node);

        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|child| *child != node);
        }
        for id in &doomed {
            if let Some(slot) = self.nodes.get_mut(id.index) {
                slot.node = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
            }
        }
        self.transitions.retain(|t| !doomed.contains(&t.node));
        trace!(node = node.index, removed = doomed.len(), "remove scene subtree");
        Ok(())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> ChartResult<()> {
        self.node_mut(node)?
            .attrs
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> ChartResult<()> {
        self.node_mut(node)?.text = Some(text.to_owned());
        Ok(())
    }

    fn schedule_transition(
        &mut self,
        node: NodeId,
        transition: &TransitionToken,
        delay_ms: f64,
    ) -> ChartResult<()> {
        self.node(node)?;
        let scheduled = ScheduledTransition {
            node,
            name: transition.name.clone(),
            duration_ms: sanitize_ms(transition.duration_ms),
            delay_ms: sanitize_ms(delay_ms),
        };

        // a newer schedule with the same name interrupts the pending one
        match self
            .transitions
            .iter_mut()
            .find(|t| t.node == node && t.name == scheduled.name)
        {
            Some(existing) => *existing = scheduled,
            None => self.transitions.push(scheduled),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SceneTree;
    use crate::error::ChartError;
    use crate::render::{Scene, TransitionToken};

    #[test]
    fn append_and_select_by_class() {
        let mut scene = SceneTree::new();
        let root = scene.root();
        let group = scene.append(root, "g").expect("append g");
        scene.set_attr(group, "class", "plot x-axis-g").expect("class");
        let inner = scene.append(group, "g").expect("append inner");

        assert_eq!(scene.select_class(root, "x-axis-g").expect("select"), Some(group));
        assert_eq!(scene.select_class(root, "y-axis-g").expect("select"), None);
        assert_eq!(scene.select_all(root, "g").expect("select all"), vec![group, inner]);
    }

    #[test]
    fn remove_drops_subtree_and_transitions() {
        let mut scene = SceneTree::new();
        let root = scene.root();
        let group = scene.append(root, "g").expect("append g");
        let line = scene.append(group, "line").expect("append line");
        scene
            .schedule_transition(line, &TransitionToken::default(), 0.0)
            .expect("schedule");

        scene.remove(group).expect("remove");
        assert_eq!(scene.node_count(), 1);
        assert!(scene.transitions().is_empty());
        assert!(matches!(scene.tag(line), Err(ChartError::UnknownNode(_))));
        assert!(scene.remove(root).is_err());
    }

    #[test]
    fn removed_slots_are_reused_without_reviving_stale_ids() {
        let mut scene = SceneTree::new();
        let root = scene.root();
        for _ in 0..100 {
            let group = scene.append(root, "g").expect("append g");
            scene.append(group, "line").expect("append line");
            scene.remove(group).expect("remove");
        }
        assert_eq!(scene.slot_count(), 3);

        let stale = scene.append(root, "g").expect("append g");
        scene.remove(stale).expect("remove");
        let fresh = scene.append(root, "text").expect("append text");

        assert_eq!(fresh.index(), stale.index());
        assert_ne!(fresh, stale);
        assert!(matches!(scene.tag(stale), Err(ChartError::UnknownNode(_))));
        assert!(scene.remove(stale).is_err());
        assert_eq!(scene.tag(fresh).expect("tag"), "text");
    }

    #[test]
    fn rescheduling_same_name_supersedes() {
        let mut scene = SceneTree::new();
        let root = scene.root();
        let token = TransitionToken::new("axis");
        scene.schedule_transition(root, &token, 10.0).expect("first");
        scene.schedule_transition(root, &token, 30.0).expect("second");
        scene
            .schedule_transition(root, &TransitionToken::new("other"), 5.0)
            .expect("other");

        assert_eq!(scene.transitions().len(), 2);
        assert_eq!(scene.transition_for(root).map(|t| t.delay_ms), Some(30.0));
    }
}
