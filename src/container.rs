use egui::{Pos2, Rect, Vec2};

use crate::canvas::Canvas;
use crate::geometry::exceeds_drag_threshold;
use crate::input::FrameInput;
use crate::style::ContainerStyle;
use crate::window::{WindowHost, WindowId};

/// Stable key of a dock container.
///
/// The root container is always `"root"`. Containers created by splitting are numbered
/// `"dock-1"`, `"dock-2"`, … and keep their key across capture/restore cycles.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ContainerId(String);

impl ContainerId {
    pub const ROOT: &'static str = "root";
    const NUMBERED_PREFIX: &'static str = "dock-";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn root() -> Self {
        Self(Self::ROOT.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub(crate) fn numbered(serial: u64) -> Self {
        Self(format!("{}{serial}", Self::NUMBERED_PREFIX))
    }

    /// The counter value of a `"dock-N"` key.
    pub(crate) fn serial(&self) -> Option<u64> {
        self.0.strip_prefix(Self::NUMBERED_PREFIX)?.parse().ok()
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something that happened inside a container during [`DockContainer::update`].
#[derive(Clone, Debug, PartialEq)]
pub enum ContainerEvent {
    /// A tab was clicked (pressed and released without dragging).
    Activated(WindowId),

    /// A tab's close glyph was clicked and the window was removed from the container.
    Closed(WindowId),

    /// A tab was dragged to a new position within the strip.
    Reordered {
        window: WindowId,
        from: usize,
        to: usize,
    },

    /// A tab was dragged out of a standalone container and released outside of it.
    ///
    /// Never emitted when [`DockContainer::external_drag_handling`] is set.
    DetachRequested { window: WindowId, pointer: Pos2 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainerResponse {
    pub events: Vec<ContainerEvent>,
}

#[derive(Clone, Copy, Debug)]
struct Tab {
    window: WindowId,
    width: f32,
    closable: bool,
    enabled: bool,
}

#[derive(Clone, Copy, Debug)]
struct TabPress {
    window: WindowId,
    start: Pos2,
    draggable: bool,
    moved: bool,
}

/// A tabbed group of windows with one active window.
///
/// The container owns its tab strip: activation by click, closing, scrolling when the tabs
/// overflow, and reordering by dragging a tab along the strip. The region below the strip is
/// handed to the active window.
#[derive(Clone, Debug)]
pub struct DockContainer {
    id: ContainerId,
    tabs: Vec<Tab>,
    active: Option<usize>,
    scroll_offset: f32,
    style: ContainerStyle,
    bounds: Rect,
    press: Option<TabPress>,

    /// Set when the container is embedded in a [`crate::Workspace`]: drags that leave the strip
    /// are left to the workspace and the container never asks to detach a tab.
    pub external_drag_handling: bool,

    /// May tabs be dragged out of this container?
    pub allow_detach: bool,

    /// Pointer travel (on either axis) before a press on a tab becomes a drag.
    ///
    /// A workspace overwrites this with its own threshold every frame.
    pub drag_threshold: f32,
}

impl DockContainer {
    pub const DEFAULT_DRAG_THRESHOLD: f32 = 6.0;

    pub fn new(id: ContainerId, style: ContainerStyle) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active: None,
            scroll_offset: 0.0,
            style,
            bounds: Rect::NOTHING,
            press: None,
            external_drag_handling: false,
            allow_detach: true,
            drag_threshold: Self::DEFAULT_DRAG_THRESHOLD,
        }
    }

    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    pub fn style(&self) -> &ContainerStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ContainerStyle) {
        self.style = style;
        self.clamp_scroll();
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.tabs.iter().map(|tab| tab.window)
    }

    pub fn window_at(&self, index: usize) -> Option<WindowId> {
        self.tabs.get(index).map(|tab| tab.window)
    }

    pub fn index_of(&self, window: WindowId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.window == window)
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.index_of(window).is_some()
    }

    /// Index of the active tab; `None` exactly when the container is empty.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.active.and_then(|index| self.window_at(index))
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    // ------------------------------------------------------------------------
    // Window list

    /// Append `window`. The first window added becomes active. No-op if already present.
    pub fn add_window(&mut self, window: WindowId) {
        if self.contains(window) {
            return;
        }
        self.tabs.push(self.new_tab(window));
        if self.active.is_none() {
            self.active = Some(0);
        }
    }

    /// Insert `window` at `index` (clamped). If it is already present it is moved there instead.
    pub fn insert_window(&mut self, window: WindowId, index: usize) {
        if let Some(from) = self.index_of(window) {
            self.move_window(from, index);
            return;
        }

        let index = index.min(self.tabs.len());
        self.tabs.insert(index, self.new_tab(window));
        self.active = match self.active {
            None => Some(index),
            Some(active) if active >= index => Some(active + 1),
            Some(active) => Some(active),
        };
    }

    /// Remove `window`, returning whether it was present.
    ///
    /// When the active window is removed, activation falls to the tab that takes its place (or
    /// the new last tab).
    pub fn remove_window(&mut self, window: WindowId) -> bool {
        let Some(index) = self.index_of(window) else {
            return false;
        };

        self.tabs.remove(index);
        self.active = match self.active {
            _ if self.tabs.is_empty() => None,
            Some(active) if active == index => Some(index.min(self.tabs.len() - 1)),
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        if self.press.is_some_and(|press| press.window == window) {
            self.press = None;
        }
        self.clamp_scroll();
        true
    }

    /// Move the tab at `from` to `to` (clamped). The moved window becomes active.
    pub fn move_window(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tabs.len() {
            return false;
        }
        let to = to.min(self.tabs.len() - 1);
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        self.active = Some(to);
        true
    }

    /// Make the tab at `index` active. Out-of-range indices are ignored.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.active = Some(index);
        self.scroll_to_tab(index);
        true
    }

    /// Remove every window, returning them in tab order.
    pub(crate) fn take_windows(&mut self) -> Vec<WindowId> {
        self.active = None;
        self.press = None;
        self.scroll_offset = 0.0;
        self.tabs.drain(..).map(|tab| tab.window).collect()
    }

    /// Close the tab at `index` if the window allows it and it isn't the last tab.
    fn close_tab(&mut self, index: usize, host: &dyn WindowHost) -> Option<WindowId> {
        if self.tabs.len() <= 1 {
            return None;
        }
        let window = self.window_at(index)?;
        if !host.window(window).is_some_and(|w| w.allow_close()) {
            return None;
        }
        self.remove_window(window).then_some(window)
    }

    fn new_tab(&self, window: WindowId) -> Tab {
        Tab {
            window,
            width: self.style.initial_tab_width(),
            closable: false,
            enabled: true,
        }
    }

    // ------------------------------------------------------------------------
    // Geometry

    pub fn strip_rect(&self) -> Rect {
        let height = self.style.tab_strip_height.min(self.bounds.height()).max(0.0);
        Rect::from_min_size(self.bounds.min, Vec2::new(self.bounds.width(), height))
    }

    pub fn content_rect(&self) -> Rect {
        let strip = self.strip_rect();
        Rect::from_min_max(egui::pos2(self.bounds.left(), strip.bottom()), self.bounds.max)
    }

    pub fn is_point_in_strip(&self, point: Pos2) -> bool {
        self.strip_rect().contains(point)
    }

    fn total_tab_width(&self) -> f32 {
        self.tabs.iter().map(|tab| tab.width).sum()
    }

    /// Do the tabs need more room than the strip has?
    pub fn overflows(&self) -> bool {
        self.total_tab_width() > self.strip_rect().width()
    }

    /// The part of the strip the tabs scroll within.
    fn tabs_viewport(&self) -> Rect {
        let strip = self.strip_rect();
        if self.overflows() {
            let buttons = (2.0 * self.style.scroll_button_width).min(strip.width());
            Rect::from_min_max(strip.min, egui::pos2(strip.right() - buttons, strip.bottom()))
        } else {
            strip
        }
    }

    /// The (scroll back, scroll forward) hot zones at the right end of an overflowing strip.
    pub fn scroll_buttons(&self) -> Option<(Rect, Rect)> {
        if !self.overflows() {
            return None;
        }
        let strip = self.strip_rect();
        let w = self.style.scroll_button_width;
        let forward = Rect::from_min_max(egui::pos2(strip.right() - w, strip.top()), strip.max);
        let back = forward.translate(Vec2::new(-w, 0.0));
        Some((back, forward))
    }

    fn max_scroll(&self) -> f32 {
        (self.total_tab_width() - self.tabs_viewport().width()).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_offset += delta;
        self.clamp_scroll();
    }

    fn scroll_to_tab(&mut self, index: usize) {
        let Some(tab) = self.tab_rect(index) else {
            return;
        };
        let viewport = self.tabs_viewport();
        if tab.left() < viewport.left() {
            self.scroll_by(tab.left() - viewport.left());
        } else if tab.right() > viewport.right() {
            self.scroll_by(tab.right() - viewport.right());
        }
    }

    /// On-screen rectangle of the tab at `index`, honoring the scroll offset.
    pub fn tab_rect(&self, index: usize) -> Option<Rect> {
        let tab = self.tabs.get(index)?;
        let viewport = self.tabs_viewport();
        let x = viewport.left() - self.scroll_offset
            + self.tabs[..index].iter().map(|t| t.width).sum::<f32>();
        Some(Rect::from_min_size(
            egui::pos2(x, viewport.top()),
            Vec2::new(tab.width, viewport.height()),
        ))
    }

    /// The close glyph hot zone of the tab at `index`, if that tab is closable.
    pub fn close_rect(&self, index: usize) -> Option<Rect> {
        let tab = self.tabs.get(index)?;
        if !tab.closable {
            return None;
        }
        let rect = self.tab_rect(index)?;
        let size = self.style.close_glyph_size.min(rect.height());
        let center = egui::pos2(
            rect.right() - self.style.tab_padding * 0.5 - size * 0.5,
            rect.center().y,
        );
        Some(Rect::from_center_size(center, Vec2::splat(size)))
    }

    fn visible_tab_at(&self, point: Pos2) -> Option<usize> {
        let viewport = self.tabs_viewport();
        if !viewport.contains(point) {
            return None;
        }
        (0..self.tabs.len()).find(|&i| self.tab_rect(i).is_some_and(|r| r.contains(point)))
    }

    /// Index of the tab under `point`, excluding its close glyph.
    pub fn tab_index_at(&self, point: Pos2) -> Option<usize> {
        let index = self.visible_tab_at(point)?;
        if self.close_rect(index).is_some_and(|r| r.contains(point)) {
            return None;
        }
        Some(index)
    }

    /// Index of the tab whose close glyph is under `point`.
    pub fn close_button_at(&self, point: Pos2) -> Option<usize> {
        let index = self.visible_tab_at(point)?;
        self.close_rect(index)
            .is_some_and(|r| r.contains(point))
            .then_some(index)
    }

    /// Where a dragged tab should land for a pointer at `point` inside the strip.
    fn reorder_index_at(&self, point: Pos2) -> Option<usize> {
        if self.tabs.is_empty() || !self.is_point_in_strip(point) {
            return None;
        }
        let viewport = self.tabs_viewport();
        let x = point.x.clamp(viewport.left(), viewport.right());
        let probe = egui::pos2(x, viewport.center().y);
        Some(
            self.visible_tab_at(probe)
                .unwrap_or_else(|| if x <= viewport.left() { 0 } else { self.tabs.len() - 1 }),
        )
    }

    // ------------------------------------------------------------------------
    // Frame

    /// Assign the container its rectangle and hand the content region to the active window.
    pub fn layout(&mut self, bounds: Rect, host: &mut dyn WindowHost) {
        self.bounds = bounds;

        for tab in &mut self.tabs {
            if let Some(window) = host.window(tab.window) {
                tab.closable = window.allow_close();
                tab.enabled = window.enabled();
                tab.width = self.style.tab_width_for(window.title(), tab.closable);
            }
        }
        self.clamp_scroll();

        let content = self.content_rect();
        if let Some(window) = self.active_window().and_then(|id| host.window_mut(id)) {
            window.set_bounds(content);
        }
    }

    /// Handle tab strip interaction for this frame.
    pub fn update(&mut self, input: &FrameInput, host: &dyn WindowHost) -> ContainerResponse {
        let mut response = ContainerResponse::default();

        if let Some(pos) = input.pressed_at() {
            self.handle_press(pos, host, &mut response);
        }

        if input.primary_down {
            if let (Some(pos), Some(press)) = (input.pointer_pos, self.press) {
                self.handle_drag(pos, press, &mut response);
            }
        }

        if input.primary_released {
            if let Some(press) = self.press.take() {
                self.handle_release(input.pointer_pos, press, &mut response);
            }
        } else if !input.primary_down {
            // The release happened somewhere we didn't see.
            self.press = None;
        }

        response
    }

    fn handle_press(&mut self, pos: Pos2, host: &dyn WindowHost, response: &mut ContainerResponse) {
        if !self.is_point_in_strip(pos) {
            return;
        }

        if let Some((back, forward)) = self.scroll_buttons() {
            if back.contains(pos) {
                self.scroll_by(-self.style.scroll_step);
                return;
            }
            if forward.contains(pos) {
                self.scroll_by(self.style.scroll_step);
                return;
            }
        }

        if let Some(index) = self.close_button_at(pos) {
            if let Some(window) = self.close_tab(index, host) {
                response.events.push(ContainerEvent::Closed(window));
            }
            return;
        }

        if let Some(index) = self.tab_index_at(pos) {
            let tab = self.tabs[index];
            self.press = Some(TabPress {
                window: tab.window,
                start: pos,
                draggable: tab.enabled,
                moved: false,
            });
        }
    }

    fn handle_drag(&mut self, pos: Pos2, mut press: TabPress, response: &mut ContainerResponse) {
        if !press.draggable {
            return;
        }
        if !press.moved && exceeds_drag_threshold(press.start, pos, self.drag_threshold) {
            press.moved = true;
            self.press = Some(press);
        }
        if !press.moved {
            return;
        }

        // Outside the strip the drag either belongs to the workspace or waits for release.
        let (Some(from), Some(to)) = (self.index_of(press.window), self.reorder_index_at(pos))
        else {
            return;
        };
        if from != to && self.move_window(from, to) {
            response.events.push(ContainerEvent::Reordered {
                window: press.window,
                from,
                to,
            });
        }
    }

    fn handle_release(
        &mut self,
        pos: Option<Pos2>,
        press: TabPress,
        response: &mut ContainerResponse,
    ) {
        let Some(index) = self.index_of(press.window) else {
            // Moved elsewhere by the owner while the button was held.
            return;
        };

        if !press.moved {
            if self.activate(index) {
                response.events.push(ContainerEvent::Activated(press.window));
            }
            return;
        }

        if self.external_drag_handling || !self.allow_detach {
            return;
        }
        if let Some(pointer) = pos.filter(|p| !self.bounds.contains(*p)) {
            response.events.push(ContainerEvent::DetachRequested {
                window: press.window,
                pointer,
            });
        }
    }

    pub fn paint(&self, canvas: &mut dyn Canvas, host: &dyn WindowHost) {
        let style = &self.style;
        let strip = self.strip_rect();

        canvas.push_clip(self.bounds);
        canvas.fill_rect(strip, style.strip_fill);

        canvas.push_clip(self.tabs_viewport());
        for (index, tab) in self.tabs.iter().enumerate() {
            let Some(rect) = self.tab_rect(index) else {
                continue;
            };
            let fill = if self.active == Some(index) {
                style.active_tab_fill
            } else {
                style.inactive_tab_fill
            };
            canvas.fill_rect(rect.shrink2(Vec2::new(0.5, 0.0)), fill);

            let color = if tab.enabled {
                style.text_color
            } else {
                style.disabled_text_color
            };
            let title = crate::window::title_of(host, tab.window);
            let title_pos = egui::pos2(rect.left() + style.tab_padding, rect.center().y);
            canvas.text(title_pos, &title, color);

            if let Some(close) = self.close_rect(index) {
                let glyph_pos = egui::pos2(close.left(), close.center().y);
                canvas.text(glyph_pos, "×", style.close_glyph_color);
            }
        }
        canvas.pop_clip();

        if let Some((back, forward)) = self.scroll_buttons() {
            for (rect, glyph) in [(back, "<"), (forward, ">")] {
                canvas.fill_rect(rect, style.scroll_button_fill);
                let glyph_pos = egui::pos2(rect.left() + 3.0, rect.center().y);
                canvas.text(glyph_pos, glyph, style.text_color);
            }
        }

        let content = self.content_rect();
        canvas.fill_rect(content, style.content_fill);
        if let Some(window) = self.active_window().and_then(|id| host.window(id)) {
            canvas.push_clip(content);
            window.paint(canvas);
            canvas.pop_clip();
        }

        canvas.stroke_rect(self.bounds, style.border);
        canvas.pop_clip();
    }
}
