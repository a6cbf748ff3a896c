use std::collections::BTreeSet;

use itertools::Itertools as _;

use crate::container::ContainerId;
use crate::tree::{DockNode, DockTree, NodeId};
use crate::window::WindowId;

use super::Workspace;

pub(super) fn workspace_integrity_issues(workspace: &Workspace) -> Vec<String> {
    let mut issues = tree_integrity_issues(&workspace.tree);
    let root = ContainerId::root();
    let leaves = workspace.tree.leaves();

    if !workspace.containers.contains_key(&root) {
        issues.push("integrity: root container missing".to_owned());
    }
    if !leaves.contains(&root) {
        issues.push("integrity: root container not in tree".to_owned());
    }

    for leaf in leaves.iter().duplicates() {
        issues.push(format!("integrity: container {leaf} has more than one leaf"));
    }
    for leaf in &leaves {
        if !workspace.containers.contains_key(leaf) {
            issues.push(format!("integrity: leaf refers to missing container {leaf}"));
        }
    }

    for (id, container) in &workspace.containers {
        if id != container.id() {
            issues.push(format!("integrity: container {} stored under {id}", container.id()));
        }
        if !leaves.contains(id) {
            issues.push(format!("integrity: container {id} not in tree"));
        }
        match container.active_index() {
            None if !container.is_empty() => {
                issues.push(format!("integrity: container {id} has windows but none active"));
            }
            Some(active) if active >= container.len() => {
                issues.push(format!(
                    "integrity: container {id} active {active} out of range (len {})",
                    container.len()
                ));
            }
            _ => {}
        }
    }

    let all_windows: Vec<WindowId> = workspace
        .containers
        .values()
        .flat_map(|c| c.windows())
        .chain(workspace.floating.iter().copied())
        .collect();
    for window in all_windows.iter().duplicates() {
        issues.push(format!("integrity: window {window} placed more than once"));
    }

    let floating: BTreeSet<WindowId> = workspace.floating.iter().copied().collect();
    if !workspace.floating_dragging.is_subset(&floating) {
        issues.push("integrity: dragging flag on a window that isn't floating".to_owned());
    }

    issues
}

/// Reachability and ratio checks on the split tree itself.
pub(super) fn tree_integrity_issues(tree: &DockTree) -> Vec<String> {
    let mut issues = Vec::new();
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    let mut stack = vec![tree.root()];

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            issues.push(format!("integrity: node {node:?} reachable twice"));
            continue;
        }
        match tree.get(node) {
            None => issues.push(format!("integrity: missing node {node:?} (reachable)")),
            Some(DockNode::Leaf(_)) => {}
            Some(DockNode::Split {
                ratio,
                first,
                second,
                ..
            }) => {
                if !(*ratio > 0.0 && *ratio < 1.0) {
                    issues.push(format!("integrity: split {node:?} ratio {ratio} outside (0, 1)"));
                }
                stack.push(*first);
                stack.push(*second);
            }
        }
    }

    let total = tree.node_count();
    if visited.len() != total {
        issues.push(format!(
            "integrity: unreachable nodes {} of {}",
            total.saturating_sub(visited.len()),
            total
        ));
    }

    issues
}
