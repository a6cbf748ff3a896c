use std::collections::BTreeSet;

use egui::Pos2;

use crate::geometry::clamp_rect_inside;
use crate::input::FrameInput;
use crate::window::{WindowHost, WindowId};

use super::{DockEvent, DragSession, Workspace};

impl Workspace {
    /// The top-most floating window under `pos`.
    pub(super) fn floating_window_at(&self, pos: Pos2, host: &dyn WindowHost) -> Option<WindowId> {
        self.floating
            .iter()
            .rev()
            .copied()
            .find(|&window| host.window(window).is_some_and(|w| w.bounds().contains(pos)))
    }

    /// Raise a floating window above the others. Returns whether it is floating.
    pub fn bring_to_front(&mut self, window: WindowId) -> bool {
        let Some(index) = self.floating.iter().position(|&w| w == window) else {
            return false;
        };
        if index + 1 != self.floating.len() {
            let window = self.floating.remove(index);
            self.floating.push(window);
        }
        true
    }

    /// Keep a floating window inside the overlay bounds.
    pub(super) fn clamp_floating(&self, window: WindowId, host: &mut dyn WindowHost) {
        let bounds = self.overlay_bounds();
        if !bounds.is_positive() {
            return;
        }
        if let Some(w) = host.window_mut(window) {
            let clamped = clamp_rect_inside(w.bounds(), bounds);
            w.set_bounds(clamped);
        }
    }

    /// Update floating windows and watch their own drags.
    ///
    /// Only `hit` (the top-most window under the pointer) and a window already dragging itself see
    /// the pointer. A window that starts dragging itself begins a dock preview; when it stops,
    /// the drag is dropped like a tab.
    /// Returns whether the layout changed.
    pub(super) fn update_floating(
        &mut self,
        input: &FrameInput,
        hit: Option<WindowId>,
        host: &mut dyn WindowHost,
        events: &mut Vec<DockEvent>,
    ) -> bool {
        let carrying_tab = self.drag.is_tab_drag();

        if input.primary_pressed && !carrying_tab {
            if let Some(hit) = hit {
                self.bring_to_front(hit);
            }
        }

        for &window in &self.floating {
            let owns_pointer = hit == Some(window) || self.floating_dragging.contains(&window);
            let window_input = if owns_pointer && !carrying_tab {
                *input
            } else {
                input.occluded()
            };
            if let Some(w) = host.window_mut(window) {
                w.update_floating(&window_input);
            }
        }

        if self.drag.session().is_some_and(DragSession::is_floating) {
            self.drag.step(input, self.options.drag_threshold);
        }

        let dragging: BTreeSet<WindowId> = self
            .floating
            .iter()
            .copied()
            .filter(|&window| {
                host.window(window)
                    .is_some_and(|w| w.allow_drag() && w.is_dragging())
            })
            .collect();

        for &window in dragging.difference(&self.floating_dragging) {
            let at = input
                .pointer_pos
                .or_else(|| host.window(window).map(|w| w.bounds().center()))
                .unwrap_or_default();
            self.drag.begin_floating(window, at);
        }

        let released: Vec<WindowId> = self
            .floating_dragging
            .difference(&dragging)
            .copied()
            .collect();
        self.floating_dragging = dragging;

        let mut changed = false;
        for window in released {
            let Some(session) = self.drag.finish_floating(window) else {
                continue;
            };
            self.preview = None;
            if let Some(preview) = self.resolve_hover(&session, host) {
                changed |= self.apply_drop(&session, &preview, host, events);
            }
        }

        if self.drag.session().is_some_and(DragSession::is_floating) {
            self.preview = self
                .drag
                .dragging()
                .and_then(|session| self.resolve_hover(session, host));
        }

        changed
    }
}
