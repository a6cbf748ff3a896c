use std::collections::{BTreeMap, BTreeSet};

use egui::{Pos2, Rect};

use crate::canvas::{Canvas, ClipBoundsProvider, EguiCanvas};
use crate::container::{ContainerEvent, ContainerId, DockContainer};
use crate::drop_target::DropTarget;
use crate::error::WorkspaceError;
use crate::input::FrameInput;
use crate::style::ContainerStyle;
use crate::tree::{DockTree, NodeId, TreeLayout};
use crate::window::{WindowHost, WindowId};

mod drag;
mod drop_apply;
mod floating;
mod hover;
mod integrity;
mod normalize;
mod options;
mod overlay;
mod persistence;
mod splitter;

#[cfg(test)]
mod model_tests;

pub use drag::DragSession;
pub use hover::DropPreview;
pub use options::{OverlayStyle, WorkspaceOptions};
pub use persistence::{
    ContainerState, FloatingState, NodeState, WORKSPACE_STATE_VERSION, WorkspaceState,
};

use drag::{DragOutcome, DragState};

/// Something the workspace did to a window during [`Workspace::update`].
#[derive(Clone, Debug, PartialEq)]
pub enum DockEvent {
    /// A tab was clicked.
    Activated {
        window: WindowId,
        container: ContainerId,
    },

    /// A tab was closed from its close glyph; the window is no longer in the workspace.
    Closed {
        window: WindowId,
        container: ContainerId,
    },

    /// A tab was dragged to a new position within its strip.
    Reordered {
        window: WindowId,
        container: ContainerId,
    },

    /// A window was dropped into a container (possibly a new one created by splitting).
    Docked {
        window: WindowId,
        container: ContainerId,
    },

    /// A window was torn out of its container and is now floating.
    Floated(WindowId),
}

/// The docking workspace: a split tree of tabbed containers plus a set of floating windows.
///
/// Per frame, call [`Self::update`] then [`Self::paint`] (or [`Self::ui`] for both in egui).
///
/// Invariants, restored after every edit:
/// - the root container (`"root"`) is always a leaf of the tree,
/// - every other container is a non-empty leaf of the tree,
/// - a window is in at most one container or the floating set.
pub struct Workspace {
    pub options: WorkspaceOptions,

    tree: DockTree,
    containers: BTreeMap<ContainerId, DockContainer>,
    next_container_serial: u64,

    /// Floating windows, bottom to top.
    floating: Vec<WindowId>,

    /// Floating windows that reported `is_dragging` last frame.
    floating_dragging: BTreeSet<WindowId>,

    drag: DragState,
    preview: Option<DropPreview>,
    splitter_drag: Option<NodeId>,

    bounds: Rect,
    last_layout: TreeLayout,
    clip_provider: Option<Box<dyn ClipBoundsProvider>>,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("tree", &self.tree)
            .field("containers", &self.containers)
            .field("floating", &self.floating)
            .field("drag", &self.drag)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::new_with_options(WorkspaceOptions::default(), ContainerStyle::default())
    }

    pub fn new_with_options(options: WorkspaceOptions, style: ContainerStyle) -> Self {
        let root = ContainerId::root();
        let mut workspace = Self {
            options,
            tree: DockTree::new(root.clone()),
            containers: BTreeMap::new(),
            next_container_serial: 1,
            floating: Vec::new(),
            floating_dragging: BTreeSet::new(),
            drag: DragState::default(),
            preview: None,
            splitter_drag: None,
            bounds: Rect::NOTHING,
            last_layout: TreeLayout::default(),
            clip_provider: None,
        };
        let container = workspace.embedded_container(root.clone(), style);
        workspace.containers.insert(root, container);
        workspace
    }

    fn embedded_container(&self, id: ContainerId, style: ContainerStyle) -> DockContainer {
        let mut container = DockContainer::new(id, style);
        container.external_drag_handling = true;
        container.drag_threshold = self.options.drag_threshold;
        container
    }

    /// Create a container styled like `style_source` (or the root container).
    fn create_container(&mut self, style_source: &ContainerId) -> ContainerId {
        let mut id = ContainerId::numbered(self.next_container_serial);
        while self.containers.contains_key(&id) {
            self.next_container_serial += 1;
            id = ContainerId::numbered(self.next_container_serial);
        }
        self.next_container_serial += 1;
        self.insert_container(id.clone(), style_source);
        id
    }

    fn insert_container(&mut self, id: ContainerId, style_source: &ContainerId) {
        let style = self
            .containers
            .get(style_source)
            .or_else(|| self.containers.get(&ContainerId::root()))
            .map(|c| c.style().clone())
            .unwrap_or_default();
        if let Some(serial) = id.serial() {
            self.next_container_serial = self.next_container_serial.max(serial + 1);
        }
        let container = self.embedded_container(id.clone(), style);
        self.containers.insert(id, container);
    }

    // ------------------------------------------------------------------------
    // Queries

    pub fn tree(&self) -> &DockTree {
        &self.tree
    }

    pub fn container(&self, id: &ContainerId) -> Option<&DockContainer> {
        self.containers.get(id)
    }

    pub fn container_mut(&mut self, id: &ContainerId) -> Option<&mut DockContainer> {
        self.containers.get_mut(id)
    }

    /// All containers, keyed by id.
    pub fn containers(&self) -> impl Iterator<Item = &DockContainer> + '_ {
        self.containers.values()
    }

    pub fn root_container(&self) -> Option<&DockContainer> {
        self.containers.get(&ContainerId::root())
    }

    /// Floating windows, bottom to top.
    pub fn floating_windows(&self) -> &[WindowId] {
        &self.floating
    }

    pub fn is_floating(&self, window: WindowId) -> bool {
        self.floating.contains(&window)
    }

    /// The container holding `window`, if it is docked.
    pub fn container_of(&self, window: WindowId) -> Option<&ContainerId> {
        self.containers
            .values()
            .find(|c| c.contains(window))
            .map(|c| c.id())
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The drag in progress: a tab carried past the drag threshold, or a floating window moving
    /// itself.
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.dragging()
    }

    /// Where the dragged window would land if released now.
    pub fn drag_preview(&self) -> Option<&DropPreview> {
        self.preview.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        !self.drag.is_idle() || self.splitter_drag.is_some()
    }

    /// Install something that bounds where previews and floating windows may go.
    pub fn set_clip_bounds_provider(&mut self, provider: Option<Box<dyn ClipBoundsProvider>>) {
        self.clip_provider = provider;
    }

    /// Where floating windows and previews are confined to.
    fn overlay_bounds(&self) -> Rect {
        self.clip_provider
            .as_ref()
            .and_then(|p| p.clip_bounds())
            .unwrap_or(self.bounds)
    }

    /// Structural problems, if any. Empty for a healthy workspace.
    pub fn integrity_issues(&self) -> Vec<String> {
        integrity::workspace_integrity_issues(self)
    }

    // ------------------------------------------------------------------------
    // Editing

    /// Split `container` toward `target`, returning the new (empty) container.
    ///
    /// [`DropTarget::Center`] returns `container` itself; unknown containers return `None`.
    pub fn split_host(
        &mut self,
        container: &ContainerId,
        target: DropTarget,
    ) -> Option<ContainerId> {
        if !self.tree.contains(container) {
            return None;
        }
        if target == DropTarget::Center {
            return Some(container.clone());
        }
        let new = self.create_container(container);
        if !self.tree.split_leaf(container, new.clone(), target) {
            self.containers.remove(&new);
            return None;
        }
        log::debug!("split {container} {target:?} -> {new}");
        self.check_integrity("split_host");
        Some(new)
    }

    /// Dock `window` into `container` (as a tab for [`DropTarget::Center`], otherwise into a new
    /// container split off toward `target`), taking it out of wherever it was.
    ///
    /// Returns the container that ends up holding the window, or `None` if `container` is unknown.
    ///
    /// # Errors
    /// [`WorkspaceError::UnknownWindow`] if `host` has no such window.
    pub fn dock_window(
        &mut self,
        window: WindowId,
        container: &ContainerId,
        target: DropTarget,
        host: &dyn WindowHost,
    ) -> Result<Option<ContainerId>, WorkspaceError> {
        if host.window(window).is_none() {
            return Err(WorkspaceError::UnknownWindow(window));
        }
        if self.dock_window_inner(window, container, target).is_none() {
            return Ok(None);
        }
        Ok(self.container_of(window).cloned())
    }

    /// Append `window` as a tab of the root container.
    ///
    /// Like [`DockContainer::add_window`], the window only becomes active if the root container
    /// was empty. A window already in the root container stays where it is.
    ///
    /// # Errors
    /// [`WorkspaceError::UnknownWindow`] if `host` has no such window.
    pub fn add_window(
        &mut self,
        window: WindowId,
        host: &dyn WindowHost,
    ) -> Result<(), WorkspaceError> {
        if host.window(window).is_none() {
            return Err(WorkspaceError::UnknownWindow(window));
        }
        let root = ContainerId::root();
        if self.container_of(window) == Some(&root) {
            return Ok(());
        }
        self.drag.cancel_for(window);
        self.detach_window(window);
        if let Some(container) = self.containers.get_mut(&root) {
            container.add_window(window);
        }
        log::debug!("add {window} to {root}");
        self.normalize();
        Ok(())
    }

    /// Take `window` out of the workspace entirely. Returns whether it was present.
    pub fn remove_window(&mut self, window: WindowId) -> bool {
        self.drag.cancel_for(window);
        let removed = self.detach_window(window);
        if removed {
            log::debug!("remove {window}");
            self.normalize();
        }
        removed
    }

    /// Make `window` a floating window (raised to the top), keeping its current bounds clamped
    /// inside the workspace.
    ///
    /// # Errors
    /// [`WorkspaceError::UnknownWindow`] if `host` has no such window.
    pub fn add_floating_window(
        &mut self,
        window: WindowId,
        host: &mut dyn WindowHost,
    ) -> Result<(), WorkspaceError> {
        if host.window(window).is_none() {
            return Err(WorkspaceError::UnknownWindow(window));
        }
        self.drag.cancel_for(window);
        self.detach_window(window);
        self.floating.push(window);
        self.clamp_floating(window, host);
        self.normalize();
        Ok(())
    }

    /// Gather every docked and floating window into the root container and drop all splits.
    pub fn reset_layout(&mut self) {
        let root = ContainerId::root();
        let mut windows: Vec<WindowId> = Vec::new();
        for leaf in self.tree.leaves() {
            if let Some(container) = self.containers.get_mut(&leaf) {
                windows.extend(container.take_windows());
            }
        }
        for container in self.containers.values_mut() {
            windows.extend(container.take_windows());
        }
        windows.append(&mut self.floating);

        self.drag.cancel();
        self.preview = None;
        self.splitter_drag = None;
        self.floating_dragging.clear();
        self.containers.retain(|id, _| id.is_root());
        self.tree.reset(root.clone());

        if let Some(container) = self.containers.get_mut(&root) {
            for window in windows {
                container.add_window(window);
            }
        }
        log::debug!("reset layout");
        self.check_integrity("reset_layout");
    }

    /// Remove `window` from its container or the floating set, without normalizing.
    fn detach_window(&mut self, window: WindowId) -> bool {
        let mut removed = false;
        for container in self.containers.values_mut() {
            removed |= container.remove_window(window);
        }
        if let Some(index) = self.floating.iter().position(|&w| w == window) {
            self.floating.remove(index);
            self.floating_dragging.remove(&window);
            removed = true;
        }
        removed
    }

    // ------------------------------------------------------------------------
    // Frame

    /// Lay the tree out over `bounds` and push content regions to the active windows.
    ///
    /// Also hands the current [`WorkspaceOptions::drag_threshold`] to every container, so that
    /// tab reordering and the workspace's own drags agree on what a click is.
    pub fn layout(&mut self, bounds: Rect, host: &mut dyn WindowHost) {
        self.bounds = bounds;
        self.last_layout = self.tree.layout(bounds, self.options.splitter_width);
        for container in self.containers.values_mut() {
            container.drag_threshold = self.options.drag_threshold;
        }
        for (id, rect) in &self.last_layout.containers {
            if let Some(container) = self.containers.get_mut(id) {
                container.layout(*rect, host);
            }
        }
    }

    /// Run one frame of interaction over `bounds`.
    ///
    /// Floating windows are updated first (top-most window under the pointer gets the input),
    /// then splitters, then the tab drag, then each container's own tab strip.
    pub fn update(
        &mut self,
        bounds: Rect,
        input: &FrameInput,
        host: &mut dyn WindowHost,
    ) -> Vec<DockEvent> {
        self.layout(bounds, host);
        let mut events = Vec::new();
        let mut changed = false;

        let floating_hit = input
            .pointer_pos
            .and_then(|pos| self.floating_window_at(pos, host));

        changed |= self.update_floating(input, floating_hit, host, &mut events);

        // Nothing underneath a floating window can be hit, unless a tab is being carried over it.
        let docked_input = if floating_hit.is_some() && !self.drag.is_tab_drag() {
            input.occluded()
        } else {
            *input
        };

        let docked_input = if self.update_splitter(&docked_input) {
            changed = true;
            docked_input.occluded()
        } else {
            changed |= self.update_tab_drag(&docked_input, host, &mut events);
            docked_input
        };

        for id in self.tree.leaves() {
            let Some(container) = self.containers.get_mut(&id) else {
                continue;
            };
            for event in container.update(&docked_input, host).events {
                let event = match event {
                    ContainerEvent::Activated(window) => DockEvent::Activated {
                        window,
                        container: id.clone(),
                    },
                    ContainerEvent::Closed(window) => DockEvent::Closed {
                        window,
                        container: id.clone(),
                    },
                    ContainerEvent::Reordered { window, .. } => DockEvent::Reordered {
                        window,
                        container: id.clone(),
                    },
                    // Embedded containers leave detaching to the workspace.
                    ContainerEvent::DetachRequested { .. } => continue,
                };
                changed = true;
                events.push(event);
            }
        }

        if self.normalize() || changed {
            self.layout(bounds, host);
        }
        events
    }

    /// Handle presses on tabs and the drag that may follow. Returns whether the layout changed.
    fn update_tab_drag(
        &mut self,
        input: &FrameInput,
        host: &mut dyn WindowHost,
        events: &mut Vec<DockEvent>,
    ) -> bool {
        if self.drag.is_idle() {
            if let Some((container, window, pos)) = input
                .pressed_at()
                .and_then(|pos| self.tab_at(pos).map(|(c, w)| (c, w, pos)))
            {
                if host.window(window).is_some_and(|w| w.enabled()) {
                    self.drag
                        .press(DragSession::from_tab(window, container, pos));
                }
            }
        }

        if !self.drag.is_tab_drag() {
            return false;
        }

        match self.drag.step(input, self.options.drag_threshold) {
            Some(DragOutcome::Drop(session)) => {
                let preview = self.resolve_hover(&session, host);
                self.preview = None;
                preview.is_some_and(|preview| self.apply_drop(&session, &preview, host, events))
            }
            Some(DragOutcome::Click(_)) => {
                // Activation is the container's business.
                self.preview = None;
                false
            }
            None => {
                self.preview = self
                    .drag
                    .dragging()
                    .and_then(|session| self.resolve_hover(session, host));
                false
            }
        }
    }

    /// The container and window of the tab under `pos`.
    fn tab_at(&self, pos: Pos2) -> Option<(ContainerId, WindowId)> {
        self.tree.leaves().into_iter().find_map(|id| {
            let container = self.containers.get(&id)?;
            let window = container.window_at(container.tab_index_at(pos)?)?;
            Some((id, window))
        })
    }

    pub fn paint(&self, canvas: &mut dyn Canvas, host: &dyn WindowHost) {
        for id in self.tree.leaves() {
            if let Some(container) = self.containers.get(&id) {
                container.paint(canvas, host);
            }
        }
        for &window in &self.floating {
            if let Some(window) = host.window(window) {
                window.paint(canvas);
            }
        }
        if let (Some(session), Some(preview)) = (self.drag.dragging(), &self.preview) {
            let title = crate::window::title_of(host, session.window);
            overlay::paint_drop_preview(canvas, preview, &title, &self.options.overlay);
        }
    }

    /// Update and paint the workspace over the rest of `ui`.
    pub fn ui(&mut self, ui: &mut egui::Ui, host: &mut dyn WindowHost) -> Vec<DockEvent> {
        let bounds = ui.available_rect_before_wrap();
        let input = ui.input(FrameInput::from_egui);
        let events = self.update(bounds, &input, host);

        let mut canvas = EguiCanvas::new(ui.painter_at(bounds));
        self.paint(&mut canvas, host);
        ui.advance_cursor_after_rect(bounds);

        if self.is_dragging() {
            ui.ctx().request_repaint();
        }
        events
    }

    fn check_integrity(&self, context: &str) {
        if !self.options.debug_integrity {
            return;
        }
        let issues = self.integrity_issues();
        if issues.is_empty() {
            return;
        }
        for issue in &issues {
            log::warn!("{context}: {issue}");
        }
        if self.options.debug_integrity_panic && cfg!(debug_assertions) {
            panic!(
                "egui_dockspace integrity failure after {context}\n{}",
                issues.join("\n")
            );
        }
    }
}
