use crate::container::ContainerId;
use crate::drop_target::DropTarget;
use crate::window::{WindowHost, WindowId};

use super::{DockEvent, DragSession, DropPreview, Workspace};

impl Workspace {
    /// Apply a released drag. Returns whether anything moved.
    pub(super) fn apply_drop(
        &mut self,
        session: &DragSession,
        preview: &DropPreview,
        host: &mut dyn WindowHost,
        events: &mut Vec<DockEvent>,
    ) -> bool {
        match &preview.hovered {
            None => self.drop_to_floating(session, preview, host, events),
            Some(hovered) => {
                let target = preview.target.unwrap_or(DropTarget::Center);
                self.drop_into(session, hovered, target, events)
            }
        }
    }

    fn drop_to_floating(
        &mut self,
        session: &DragSession,
        preview: &DropPreview,
        host: &mut dyn WindowHost,
        events: &mut Vec<DockEvent>,
    ) -> bool {
        let window = session.window;

        let Some(source) = &session.source else {
            // Already floating: it stays where its own drag left it.
            self.clamp_floating(window, host);
            return false;
        };

        let detachable = self.options.allow_undock
            && self.containers.get(source).is_some_and(|c| c.allow_detach);
        if !detachable {
            log::debug!("drop {window}: undock not allowed from {source}, cancelled");
            return false;
        }

        if !self.detach_window(window) {
            return false;
        }
        self.floating.push(window);
        if let Some(w) = host.window_mut(window) {
            w.set_bounds(preview.rect);
        }
        log::debug!("drop {window}: {source} -> floating at {:?}", preview.rect);
        events.push(DockEvent::Floated(window));
        self.normalize();
        true
    }

    fn drop_into(
        &mut self,
        session: &DragSession,
        hovered: &ContainerId,
        target: DropTarget,
        events: &mut Vec<DockEvent>,
    ) -> bool {
        let window = session.window;

        if session.source.as_ref() == Some(hovered) && self.is_self_drop(window, hovered, target) {
            log::trace!("drop {window}: back into {hovered}, cancelled");
            return false;
        }

        if self.dock_window_inner(window, hovered, target).is_none() {
            return false;
        }
        if let Some(container) = self.container_of(window).cloned() {
            log::debug!("drop {window}: -> {container} ({target:?} of {hovered})");
            events.push(DockEvent::Docked { window, container });
        }
        true
    }

    /// Putting a tab back into its own container, or splitting a container off its only tab.
    fn is_self_drop(&self, window: WindowId, container: &ContainerId, target: DropTarget) -> bool {
        target == DropTarget::Center
            || self
                .containers
                .get(container)
                .is_some_and(|c| c.len() <= 1 && c.contains(window))
    }

    /// Move `window` into `container`, splitting toward `target` first unless it is
    /// [`DropTarget::Center`]. `None` if `container` isn't in the tree.
    pub(super) fn dock_window_inner(
        &mut self,
        window: WindowId,
        container: &ContainerId,
        target: DropTarget,
    ) -> Option<()> {
        if !self.tree.contains(container) {
            return None;
        }
        if self.container_of(window) == Some(container)
            && self.is_self_drop(window, container, target)
        {
            // Already there, or splitting a container off its only tab would leave nothing behind.
            return Some(());
        }

        self.drag.cancel_for(window);
        let destination = self.split_host(container, target)?;
        self.detach_window(window);

        let destination = self.containers.get_mut(&destination)?;
        destination.add_window(window);
        if let Some(index) = destination.index_of(window) {
            destination.activate(index);
        }

        self.normalize();
        Some(())
    }
}
