//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use crate::canvas::Canvas;
use crate::input::FrameInput;
use crate::window::{DockWindow, WindowHost, WindowId};

pub(crate) fn w(id: u64) -> WindowId {
    WindowId(id)
}

/// A window with a title bar it can be dragged by while floating.
#[derive(Clone, Debug)]
pub(crate) struct TestWindow {
    pub title: String,
    pub bounds: Rect,
    pub allow_close: bool,
    pub enabled: bool,
    pub allow_drag: bool,
    pub persist_id: Option<String>,
    pub drag_grab: Option<Vec2>,
}

impl TestWindow {
    pub const TITLE_BAR_HEIGHT: f32 = 20.0;

    pub fn new(id: u64) -> Self {
        Self {
            title: format!("Window {id}"),
            bounds: Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 150.0)),
            allow_close: true,
            enabled: true,
            allow_drag: true,
            persist_id: Some(format!("win-{id}")),
            drag_grab: None,
        }
    }

    pub fn title_bar(&self) -> Rect {
        Rect::from_min_size(
            self.bounds.min,
            Vec2::new(self.bounds.width(), Self::TITLE_BAR_HEIGHT),
        )
    }
}

impl DockWindow for TestWindow {
    fn title(&self) -> &str {
        &self.title
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn allow_close(&self) -> bool {
        self.allow_close
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn allow_drag(&self) -> bool {
        self.allow_drag
    }

    fn is_dragging(&self) -> bool {
        self.drag_grab.is_some()
    }

    fn persist_id(&self) -> Option<&str> {
        self.persist_id.as_deref()
    }

    fn update_floating(&mut self, input: &FrameInput) {
        if let Some(pos) = input.pressed_at() {
            if self.allow_drag && self.title_bar().contains(pos) {
                self.drag_grab = Some(pos - self.bounds.min);
            }
        }
        if let (Some(grab), Some(pos)) = (self.drag_grab, input.pointer_pos) {
            if input.primary_down {
                self.bounds = Rect::from_min_size(pos - grab, self.bounds.size());
            }
        }
        if !input.primary_down {
            self.drag_grab = None;
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.text(self.bounds.left_top(), &self.title, Color32::WHITE);
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestHost {
    pub windows: BTreeMap<WindowId, TestWindow>,
}

impl TestHost {
    pub fn with_windows(ids: impl IntoIterator<Item = u64>) -> Self {
        let mut host = Self::default();
        for id in ids {
            host.add(id);
        }
        host
    }

    pub fn add(&mut self, id: u64) -> &mut TestWindow {
        self.windows.entry(w(id)).or_insert_with(|| TestWindow::new(id))
    }

    pub fn get(&self, id: u64) -> &TestWindow {
        &self.windows[&w(id)]
    }

    pub fn get_mut(&mut self, id: u64) -> &mut TestWindow {
        self.windows.get_mut(&w(id)).expect("unknown test window")
    }

    /// `persist_id -> handle` lookup, the way a host would restore a layout.
    pub fn by_persist_id(&self) -> ahash::HashMap<String, WindowId> {
        self.windows
            .iter()
            .filter_map(|(id, win)| Some((win.persist_id.clone()?, *id)))
            .collect()
    }
}

impl WindowHost for TestHost {
    fn window(&self, id: WindowId) -> Option<&dyn DockWindow> {
        self.windows.window(id)
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut dyn DockWindow> {
        self.windows.window_mut(id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawCall {
    Fill(Rect, Color32),
    Stroke(Rect, Stroke),
    Text(Pos2, String),
    PushClip(Rect),
    PopClip,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(_, t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn fills_with(&self, color: Color32) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Fill(r, fill) if *fill == color => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.calls.push(DrawCall::Stroke(rect, stroke));
    }

    fn text(&mut self, pos: Pos2, text: &str, _color: Color32) {
        self.calls.push(DrawCall::Text(pos, text.to_owned()));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.calls.push(DrawCall::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.calls.push(DrawCall::PopClip);
    }
}
