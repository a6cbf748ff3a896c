use std::collections::BTreeMap;

use egui::Rect;

use crate::canvas::Canvas;
use crate::input::FrameInput;

/// A handle to a host-owned window.
///
/// The docking engine never creates or destroys windows: the host assigns handles and keeps the
/// windows themselves, the engine only moves handles between containers and the floating set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// What the docking engine needs to know about (and do to) a window.
pub trait DockWindow {
    /// Label shown in the tab strip.
    fn title(&self) -> &str;

    fn bounds(&self) -> Rect;

    /// Called with the computed content region when docked and active, or the placement when
    /// floating.
    fn set_bounds(&mut self, bounds: Rect);

    /// May the user close this window from its tab?
    fn allow_close(&self) -> bool {
        true
    }

    /// Disabled windows are shown dimmed and can't be picked up by their tab.
    fn enabled(&self) -> bool {
        true
    }

    /// While floating, may the window be dragged by its own chrome?
    fn allow_drag(&self) -> bool {
        true
    }

    /// Is the window currently being dragged by its own floating chrome?
    ///
    /// The workspace watches this flag: a rising edge starts a dock preview, a falling edge
    /// is a drop. Dropped over a container, the window docks there like a dragged tab. Dropped
    /// over empty space, it keeps the bounds its own drag gave it (clamped to the workspace)
    /// and is not re-centered on the pointer.
    fn is_dragging(&self) -> bool {
        false
    }

    /// Stable identifier used for layout persistence. Windows without one are not persisted.
    fn persist_id(&self) -> Option<&str> {
        None
    }

    /// Per-frame update while floating (move by title bar, etc).
    fn update_floating(&mut self, _input: &FrameInput) {}

    /// Paint the window's content. Docked windows are painted clipped to their content region.
    fn paint(&self, _canvas: &mut dyn Canvas) {}
}

/// Resolves window handles to the host's windows.
pub trait WindowHost {
    fn window(&self, id: WindowId) -> Option<&dyn DockWindow>;

    fn window_mut(&mut self, id: WindowId) -> Option<&mut dyn DockWindow>;
}

impl<W: DockWindow> WindowHost for BTreeMap<WindowId, W> {
    fn window(&self, id: WindowId) -> Option<&dyn DockWindow> {
        self.get(&id).map(|w| w as &dyn DockWindow)
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut dyn DockWindow> {
        self.get_mut(&id).map(|w| w as &mut dyn DockWindow)
    }
}

/// Title of a window, or a placeholder when the host no longer knows it.
pub(crate) fn title_of(host: &dyn WindowHost, id: WindowId) -> String {
    host.window(id)
        .map(|w| w.title().to_owned())
        .unwrap_or_else(|| id.to_string())
}
