use crate::container::ContainerId;

use super::Workspace;

impl Workspace {
    /// Restore the structural invariants after an edit.
    ///
    /// 1. Leaves of empty non-root containers (and of unknown containers) are pruned, and splits
    ///    left with one child collapse into it.
    /// 2. If the root container is no longer in the tree, the first leaf's container is merged
    ///    into it and the leaf now refers to the root.
    /// 3. If the root container is empty while other containers remain, its leaf is pruned and
    ///    the first remaining leaf is merged into it the same way.
    /// 4. Containers that are not in the tree are discarded.
    ///
    /// Running it twice changes nothing the second time. Returns whether anything changed.
    pub(super) fn normalize(&mut self) -> bool {
        let root = ContainerId::root();
        let mut changed = false;

        if !self.containers.contains_key(&root) {
            self.insert_container(root.clone(), &root);
            changed = true;
        }

        let containers = &self.containers;
        let pruned = self.tree.collapse(
            |id| id.is_root() || containers.get(id).is_some_and(|c| !c.is_empty()),
            &root,
        );
        if !pruned.is_empty() {
            log::debug!("normalize: pruned {pruned:?}");
            changed = true;
        }

        let root_is_empty = self.containers.get(&root).is_none_or(|c| c.is_empty());
        if self.tree.contains(&root) && root_is_empty && self.tree.leaves().len() > 1 {
            self.tree.collapse(|id| !id.is_root(), &root);
            changed = true;
        }

        if !self.tree.contains(&root) {
            if let Some(first) = self.tree.leaves().into_iter().next() {
                self.merge_into_root(&first);
            }
            changed = true;
        }

        let tree = &self.tree;
        let before = self.containers.len();
        self.containers
            .retain(|id, _| id.is_root() || tree.contains(id));
        if self.containers.len() != before {
            changed = true;
        }

        if changed {
            self.check_integrity("normalize");
        }
        changed
    }

    /// Move the windows of `other` into the root container and let the root take over its leaf.
    fn merge_into_root(&mut self, other: &ContainerId) {
        let root = ContainerId::root();
        let Some(mut source) = self.containers.remove(other) else {
            self.tree.rebind_leaf(other, root);
            return;
        };
        let active = source.active_window();
        let windows = source.take_windows();

        if let Some(target) = self.containers.get_mut(&root) {
            for window in windows {
                target.add_window(window);
            }
            if let Some(index) = active.and_then(|w| target.index_of(w)) {
                target.activate(index);
            }
        }
        log::debug!("normalize: {other} merged into {root}");
        self.tree.rebind_leaf(other, root);
    }
}
