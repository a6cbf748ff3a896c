use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind};

/// The drawing primitives the docking engine needs from a renderer.
///
/// The engine only ever fills and outlines rectangles, draws single-line labels and nests clip
/// rectangles. [`EguiCanvas`] implements this over an [`egui::Painter`]; other backends can
/// implement it directly.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color32);

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    /// Draw a single line of text with its left edge at `pos.x`, vertically centered on `pos.y`.
    fn text(&mut self, pos: Pos2, text: &str, color: Color32);

    /// Restrict subsequent drawing to `rect`, intersected with the current clip.
    fn push_clip(&mut self, rect: Rect);

    /// Undo the matching [`Self::push_clip`].
    fn pop_clip(&mut self);
}

/// [`Canvas`] over an egui [`Painter`].
pub struct EguiCanvas {
    painter: Painter,
    font: FontId,
    clip_stack: Vec<Rect>,
}

impl EguiCanvas {
    pub fn new(painter: Painter) -> Self {
        Self {
            painter,
            font: FontId::proportional(13.0),
            clip_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }
}

impl Canvas for EguiCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(rect, 0.0, color);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.painter.rect_stroke(rect, 0.0, stroke, StrokeKind::Inside);
    }

    fn text(&mut self, pos: Pos2, text: &str, color: Color32) {
        self.painter
            .text(pos, Align2::LEFT_CENTER, text, self.font.clone(), color);
    }

    fn push_clip(&mut self, rect: Rect) {
        let current = self.painter.clip_rect();
        self.clip_stack.push(current);
        self.painter.set_clip_rect(current.intersect(rect));
    }

    fn pop_clip(&mut self) {
        if let Some(previous) = self.clip_stack.pop() {
            self.painter.set_clip_rect(previous);
        }
    }
}

/// Anything that can bound where overlays (drop previews, floating windows) may appear.
///
/// The workspace clamps previews and floating placement to these bounds when a provider is
/// installed with [`crate::Workspace::set_clip_bounds_provider`], and to its own bounds otherwise.
pub trait ClipBoundsProvider {
    fn clip_bounds(&self) -> Option<Rect>;
}

impl ClipBoundsProvider for Rect {
    fn clip_bounds(&self) -> Option<Rect> {
        self.is_positive().then_some(*self)
    }
}
