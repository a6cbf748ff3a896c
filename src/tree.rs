use std::collections::BTreeMap;

use egui::Rect;

use crate::container::ContainerId;
use crate::drop_target::DropTarget;
use crate::geometry::split_rect;

/// How a split divides its rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// The dividing line is horizontal: `first` on top, `second` below.
    Horizontal,

    /// The dividing line is vertical: `first` on the left, `second` on the right.
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

/// A node of the dock tree.
#[derive(Clone, Debug, PartialEq)]
pub enum DockNode {
    Leaf(ContainerId),
    Split {
        orientation: Orientation,

        /// Share of the extent given to `first`, in `(0, 1)`.
        ratio: f32,
        first: NodeId,
        second: NodeId,
    },
}

/// A draggable boundary between the two halves of a split.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splitter {
    pub node: NodeId,
    pub orientation: Orientation,

    /// The whole rectangle the split divides.
    pub parent: Rect,

    /// Hot zone around the dividing line.
    pub handle: Rect,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeLayout {
    /// Container rectangles, in tree order.
    pub containers: Vec<(ContainerId, Rect)>,
    pub splitters: Vec<Splitter>,
}

/// A binary split tree of dock containers.
///
/// Nodes live in an arena keyed by [`NodeId`]; a split refers to its children by id. A split
/// keeps its id when a leaf is split in place, so parents never need to be patched.
#[derive(Clone, Debug)]
pub struct DockTree {
    nodes: BTreeMap<NodeId, DockNode>,
    root: NodeId,
    next_node: u64,
}

impl DockTree {
    pub const MIN_RATIO: f32 = 0.05;
    pub const MAX_RATIO: f32 = 0.95;

    /// A tree holding a single leaf for `container`.
    pub fn new(container: ContainerId) -> Self {
        let mut tree = Self {
            nodes: BTreeMap::new(),
            root: NodeId(0),
            next_node: 0,
        };
        tree.root = tree.alloc(DockNode::Leaf(container));
        tree
    }

    pub(crate) fn alloc(&mut self, node: DockNode) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Build a tree bottom-up: `build` allocates nodes through the tree it is given and returns
    /// the node that becomes the root.
    pub(crate) fn build(build: impl FnOnce(&mut Self) -> NodeId) -> Self {
        let mut tree = Self {
            nodes: BTreeMap::new(),
            root: NodeId(0),
            next_node: 0,
        };
        tree.root = build(&mut tree);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, node: NodeId) -> Option<&DockNode> {
        self.nodes.get(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Container ids of every leaf, first child before second.
    pub fn leaves(&self) -> Vec<ContainerId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.nodes.get(&id) {
                Some(DockNode::Leaf(container)) => out.push(container.clone()),
                Some(DockNode::Split { first, second, .. }) => {
                    stack.push(*second);
                    stack.push(*first);
                }
                None => {}
            }
        }
        out
    }

    pub fn find_leaf(&self, container: &ContainerId) -> Option<NodeId> {
        self.nodes.iter().find_map(|(id, node)| match node {
            DockNode::Leaf(c) if c == container => Some(*id),
            _ => None,
        })
    }

    pub fn contains(&self, container: &ContainerId) -> bool {
        self.find_leaf(container).is_some()
    }

    /// Replace the leaf of `container` with a split holding it and a new leaf for `new_container`.
    ///
    /// [`DropTarget::Center`] and unknown containers leave the tree unchanged and return `false`.
    pub fn split_leaf(
        &mut self,
        container: &ContainerId,
        new_container: ContainerId,
        target: DropTarget,
    ) -> bool {
        let Some(orientation) = target.split_orientation() else {
            return false;
        };
        let Some(leaf) = self.find_leaf(container) else {
            return false;
        };

        let old = self.alloc(DockNode::Leaf(container.clone()));
        let new = self.alloc(DockNode::Leaf(new_container));
        let (first, second) = if target.new_goes_first() {
            (new, old)
        } else {
            (old, new)
        };
        self.nodes.insert(
            leaf,
            DockNode::Split {
                orientation,
                ratio: 0.5,
                first,
                second,
            },
        );
        true
    }

    /// Point the leaf of `old` at `new` instead.
    pub(crate) fn rebind_leaf(&mut self, old: &ContainerId, new: ContainerId) -> bool {
        let Some(leaf) = self.find_leaf(old) else {
            return false;
        };
        self.nodes.insert(leaf, DockNode::Leaf(new));
        true
    }

    /// Set the ratio of a split, clamped to `MIN_RATIO..=MAX_RATIO`.
    pub fn set_ratio(&mut self, node: NodeId, new_ratio: f32) -> bool {
        match self.nodes.get_mut(&node) {
            Some(DockNode::Split { ratio, .. }) if new_ratio.is_finite() => {
                *ratio = new_ratio.clamp(Self::MIN_RATIO, Self::MAX_RATIO);
                true
            }
            _ => false,
        }
    }

    /// Assign every container a rectangle by recursively partitioning `rect`.
    pub fn layout(&self, rect: Rect, splitter_width: f32) -> TreeLayout {
        let mut out = TreeLayout::default();
        self.layout_node(self.root, rect, splitter_width, &mut out);
        out
    }

    fn layout_node(&self, id: NodeId, rect: Rect, splitter_width: f32, out: &mut TreeLayout) {
        match self.nodes.get(&id) {
            Some(DockNode::Leaf(container)) => out.containers.push((container.clone(), rect)),
            Some(&DockNode::Split {
                orientation,
                ratio,
                first,
                second,
            }) => {
                let (a, b) = split_rect(rect, orientation, ratio);
                let half = splitter_width * 0.5;
                let handle = match orientation {
                    Orientation::Horizontal => Rect::from_min_max(
                        egui::pos2(rect.left(), a.bottom() - half),
                        egui::pos2(rect.right(), a.bottom() + half),
                    ),
                    Orientation::Vertical => Rect::from_min_max(
                        egui::pos2(a.right() - half, rect.top()),
                        egui::pos2(a.right() + half, rect.bottom()),
                    ),
                };
                out.splitters.push(Splitter {
                    node: id,
                    orientation,
                    parent: rect,
                    handle,
                });
                self.layout_node(first, a, splitter_width, out);
                self.layout_node(second, b, splitter_width, out);
            }
            None => {}
        }
    }

    /// Remove every leaf whose container fails `keep`, collapsing splits left with one child.
    ///
    /// Returns the removed containers. If nothing is left, the tree becomes a single leaf for
    /// `fallback`.
    pub fn collapse(
        &mut self,
        keep: impl Fn(&ContainerId) -> bool,
        fallback: &ContainerId,
    ) -> Vec<ContainerId> {
        let mut pruned = Vec::new();
        match self.collapse_node(self.root, &keep, &mut pruned) {
            Some(root) => self.root = root,
            None => self.reset(fallback.clone()),
        }
        pruned
    }

    fn collapse_node(
        &mut self,
        id: NodeId,
        keep: &dyn Fn(&ContainerId) -> bool,
        pruned: &mut Vec<ContainerId>,
    ) -> Option<NodeId> {
        match self.nodes.get(&id)?.clone() {
            DockNode::Leaf(container) => {
                if keep(&container) {
                    Some(id)
                } else {
                    self.nodes.remove(&id);
                    pruned.push(container);
                    None
                }
            }
            DockNode::Split {
                orientation,
                ratio,
                first,
                second,
            } => {
                let first = self.collapse_node(first, keep, pruned);
                let second = self.collapse_node(second, keep, pruned);
                match (first, second) {
                    (Some(first), Some(second)) => {
                        self.nodes.insert(
                            id,
                            DockNode::Split {
                                orientation,
                                ratio,
                                first,
                                second,
                            },
                        );
                        Some(id)
                    }
                    (Some(only), None) | (None, Some(only)) => {
                        self.nodes.remove(&id);
                        Some(only)
                    }
                    (None, None) => {
                        self.nodes.remove(&id);
                        None
                    }
                }
            }
        }
    }

    /// Throw the whole tree away and start over with a single leaf.
    pub fn reset(&mut self, container: ContainerId) {
        self.nodes.clear();
        self.root = self.alloc(DockNode::Leaf(container));
    }
}
