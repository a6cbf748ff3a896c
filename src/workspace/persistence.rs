use std::collections::{BTreeSet, HashMap};
use std::hash::BuildHasher;

use egui::Rect;

use crate::container::ContainerId;
use crate::error::WorkspaceError;
use crate::tree::{DockNode, DockTree, NodeId, Orientation};
use crate::window::{WindowHost, WindowId};

use super::Workspace;

pub const WORKSPACE_STATE_VERSION: u32 = 1;

/// A snapshot of the whole arrangement, keyed by container ids and window persist ids.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct WorkspaceState {
    pub version: u32,
    pub root_node: NodeState,
    pub containers: Vec<ContainerState>,
    pub floating: Vec<FloatingState>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum NodeState {
    Leaf {
        container_id: ContainerId,
    },
    Split {
        /// `true` stacks `first` above `second`, `false` puts `first` left of `second`.
        split_horizontal: bool,
        ratio: f32,
        first: Box<NodeState>,
        second: Box<NodeState>,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ContainerState {
    pub container_id: ContainerId,

    /// Index into `window_ids`.
    pub active_index: Option<usize>,
    pub window_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FloatingState {
    pub window_id: String,
    pub bounds: Rect,
}

impl Workspace {
    /// Capture the arrangement. Windows without a [`crate::DockWindow::persist_id`] are left out.
    pub fn capture_state(&self, host: &dyn WindowHost) -> WorkspaceState {
        let persist_id =
            |window: WindowId| Some(host.window(window)?.persist_id()?.to_owned());

        let containers = self
            .tree
            .leaves()
            .into_iter()
            .filter_map(|id| self.containers.get(&id))
            .map(|container| {
                let window_ids: Vec<String> = container.windows().filter_map(persist_id).collect();
                let active_index = container
                    .active_window()
                    .and_then(persist_id)
                    .and_then(|active| window_ids.iter().position(|id| *id == active));
                ContainerState {
                    container_id: container.id().clone(),
                    active_index,
                    window_ids,
                }
            })
            .collect();

        let floating = self
            .floating
            .iter()
            .filter_map(|&window| {
                let w = host.window(window)?;
                Some(FloatingState {
                    window_id: w.persist_id()?.to_owned(),
                    bounds: w.bounds(),
                })
            })
            .collect();

        WorkspaceState {
            version: WORKSPACE_STATE_VERSION,
            root_node: node_state(&self.tree, self.tree.root()),
            containers,
            floating,
        }
    }

    /// Restore an arrangement captured by [`Self::capture_state`].
    ///
    /// `windows_by_id` maps persist ids to the host's current handles. Unknown persist ids and
    /// containers are skipped; containers the tree refers to that don't exist yet are created
    /// with the root container's style. Applying the same state twice gives the same result.
    pub fn apply_state<S: BuildHasher>(
        &mut self,
        state: &WorkspaceState,
        windows_by_id: &HashMap<String, WindowId, S>,
        host: &mut dyn WindowHost,
    ) -> Result<(), WorkspaceError> {
        if state.version != WORKSPACE_STATE_VERSION {
            return Err(WorkspaceError::UnsupportedVersion {
                found: state.version,
                expected: WORKSPACE_STATE_VERSION,
            });
        }

        let root = ContainerId::root();
        let tree = DockTree::build(|tree| {
            let mut seen = BTreeSet::new();
            build_node(tree, &state.root_node, &mut seen)
                .unwrap_or_else(|| tree.alloc(DockNode::Leaf(root.clone())))
        });

        let referenced = tree.leaves();
        for id in &referenced {
            if !self.containers.contains_key(id) {
                log::debug!("apply_state: creating container {id}");
                self.insert_container(id.clone(), &root);
            }
        }
        self.containers
            .retain(|id, _| id.is_root() || referenced.contains(id));

        for container in self.containers.values_mut() {
            container.take_windows();
        }
        self.floating.clear();
        self.floating_dragging.clear();
        self.drag.cancel();
        self.preview = None;
        self.splitter_drag = None;
        self.tree = tree;

        let mut placed: BTreeSet<WindowId> = BTreeSet::new();
        let mut resolve = |persist_id: &String| -> Option<WindowId> {
            let window = *windows_by_id.get(persist_id)?;
            placed.insert(window).then_some(window)
        };

        for record in &state.containers {
            let Some(container) = self.containers.get_mut(&record.container_id) else {
                log::debug!("apply_state: skipping unknown container {}", record.container_id);
                continue;
            };
            let mut active = None;
            for (index, persist_id) in record.window_ids.iter().enumerate() {
                let Some(window) = resolve(persist_id) else {
                    continue;
                };
                container.add_window(window);
                if record.active_index == Some(index) {
                    active = Some(window);
                }
            }
            if let Some(index) = active.and_then(|w| container.index_of(w)) {
                container.activate(index);
            }
        }

        for record in &state.floating {
            let Some(window) = resolve(&record.window_id) else {
                continue;
            };
            self.floating.push(window);
            if let Some(w) = host.window_mut(window) {
                w.set_bounds(record.bounds);
            }
        }

        self.normalize();
        log::debug!(
            "apply_state: {} containers, {} floating",
            self.containers.len(),
            self.floating.len()
        );
        self.check_integrity("apply_state");
        Ok(())
    }
}

fn node_state(tree: &DockTree, node: NodeId) -> NodeState {
    match tree.get(node) {
        Some(DockNode::Split {
            orientation,
            ratio,
            first,
            second,
        }) => NodeState::Split {
            split_horizontal: *orientation == Orientation::Horizontal,
            ratio: *ratio,
            first: Box::new(node_state(tree, *first)),
            second: Box::new(node_state(tree, *second)),
        },
        Some(DockNode::Leaf(container_id)) => NodeState::Leaf {
            container_id: container_id.clone(),
        },
        None => NodeState::Leaf {
            container_id: ContainerId::root(),
        },
    }
}

/// Allocate `state` into `tree`. A container that already has a leaf is skipped, and a split
/// that loses a child becomes the other child.
fn build_node(
    tree: &mut DockTree,
    state: &NodeState,
    seen: &mut BTreeSet<ContainerId>,
) -> Option<NodeId> {
    match state {
        NodeState::Leaf { container_id } => {
            if !seen.insert(container_id.clone()) {
                log::debug!("apply_state: duplicate leaf {container_id} skipped");
                return None;
            }
            Some(tree.alloc(DockNode::Leaf(container_id.clone())))
        }
        NodeState::Split {
            split_horizontal,
            ratio,
            first,
            second,
        } => {
            let first = build_node(tree, first, seen);
            let second = build_node(tree, second, seen);
            match (first, second) {
                (Some(first), Some(second)) => Some(tree.alloc(DockNode::Split {
                    orientation: if *split_horizontal {
                        Orientation::Horizontal
                    } else {
                        Orientation::Vertical
                    },
                    ratio: sanitize_ratio(*ratio),
                    first,
                    second,
                })),
                (Some(only), None) | (None, Some(only)) => Some(only),
                (None, None) => None,
            }
        }
    }
}

fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 && ratio < 1.0 {
        ratio.clamp(DockTree::MIN_RATIO, DockTree::MAX_RATIO)
    } else {
        0.5
    }
}
