use egui::Pos2;

use crate::container::ContainerId;
use crate::geometry::exceeds_drag_threshold;
use crate::input::FrameInput;
use crate::window::WindowId;

/// A window being carried by the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub window: WindowId,

    /// The container the tab was picked up from; `None` when a floating window is being moved.
    pub source: Option<ContainerId>,
    pub start: Pos2,
    pub current: Pos2,

    /// Has the pointer moved past the drag threshold?
    pub moved: bool,
}

impl DragSession {
    pub(super) fn from_tab(window: WindowId, source: ContainerId, start: Pos2) -> Self {
        Self {
            window,
            source: Some(source),
            start,
            current: start,
            moved: false,
        }
    }

    pub(super) fn from_floating(window: WindowId, start: Pos2) -> Self {
        Self {
            window,
            source: None,
            start,
            current: start,
            moved: false,
        }
    }

    pub fn is_floating(&self) -> bool {
        self.source.is_none()
    }
}

/// How a tab drag ended.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum DragOutcome {
    /// Released before the threshold: an ordinary tab click, handled by the container.
    Click(DragSession),

    /// Released after moving.
    Drop(DragSession),
}

/// `Idle → PressedOnTab → Dragging → (drop | click) → Idle`.
#[derive(Clone, Debug, Default, PartialEq)]
pub(super) enum DragState {
    #[default]
    Idle,
    PressedOnTab(DragSession),
    Dragging(DragSession),
}

impl DragState {
    pub(super) fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::PressedOnTab(session) | Self::Dragging(session) => Some(session),
        }
    }

    /// A tab drag past the threshold, or a floating window moving itself.
    pub(super) fn dragging(&self) -> Option<&DragSession> {
        match self {
            Self::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub(super) fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// A tab drag (pressed or moving) is in progress.
    pub(super) fn is_tab_drag(&self) -> bool {
        self.session().is_some_and(|s| !s.is_floating())
    }

    pub(super) fn press(&mut self, session: DragSession) {
        if self.is_idle() {
            log::trace!(
                "drag PRESS window={} source={:?} at={:?}",
                session.window,
                session.source,
                session.start
            );
            *self = Self::PressedOnTab(session);
        }
    }

    pub(super) fn begin_floating(&mut self, window: WindowId, at: Pos2) {
        if self.is_idle() {
            log::trace!("drag FLOATING START window={window} at={at:?}");
            *self = Self::Dragging(DragSession::from_floating(window, at));
        }
    }

    /// End a floating-window drag, returning its session.
    pub(super) fn finish_floating(&mut self, window: WindowId) -> Option<DragSession> {
        if !self
            .dragging()
            .is_some_and(|s| s.is_floating() && s.window == window)
        {
            return None;
        }
        match std::mem::take(self) {
            Self::Dragging(session) => {
                log::trace!("drag FLOATING END window={window}");
                Some(session)
            }
            _ => None,
        }
    }

    pub(super) fn cancel(&mut self) {
        if let Some(session) = self.session() {
            log::trace!("drag CANCEL window={}", session.window);
        }
        *self = Self::Idle;
    }

    /// Cancel if the session carries `window`.
    pub(super) fn cancel_for(&mut self, window: WindowId) {
        if self.session().is_some_and(|s| s.window == window) {
            self.cancel();
        }
    }

    /// Advance with this frame's input.
    ///
    /// Tab drags end on release; floating drags only track the pointer here and end through
    /// [`Self::finish_floating`]. Either kind only counts as moved past `threshold`.
    pub(super) fn step(&mut self, input: &FrameInput, threshold: f32) -> Option<DragOutcome> {
        let mut session = match std::mem::take(self) {
            Self::Idle => return None,
            Self::PressedOnTab(session) | Self::Dragging(session) => session,
        };

        if let Some(pos) = input.pointer_pos {
            session.current = pos;
        }

        if !session.moved && exceeds_drag_threshold(session.start, session.current, threshold) {
            log::trace!("drag MOVED window={}", session.window);
            session.moved = true;
        }

        if session.is_floating() {
            *self = Self::Dragging(session);
            return None;
        }

        if input.primary_released || !input.primary_down {
            return Some(if session.moved {
                DragOutcome::Drop(session)
            } else {
                DragOutcome::Click(session)
            });
        }

        *self = if session.moved {
            Self::Dragging(session)
        } else {
            Self::PressedOnTab(session)
        };
        None
    }
}
