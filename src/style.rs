use egui::{Color32, Stroke};

/// How wide each tab in a container's strip is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TabWidth {
    /// Every tab has the same width.
    Fixed(f32),

    /// Width follows the title: `glyph count * glyph_width + 2 * padding`, plus room for the
    /// close glyph, clamped to `min..=max`.
    Auto { min: f32, max: f32 },
}

/// Visual style of a dock container.
///
/// Cloned as a whole whenever a container is split, so that the new container looks like the one
/// it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerStyle {
    /// Height of the tab strip. The rest of the container is the content region.
    pub tab_strip_height: f32,

    pub tab_width: TabWidth,

    /// Assumed advance of a single glyph, used by [`TabWidth::Auto`].
    pub glyph_width: f32,

    /// Horizontal padding on each side of a tab title.
    pub tab_padding: f32,

    /// Side of the square close glyph hot zone at the right end of a closable tab.
    pub close_glyph_size: f32,

    /// Width of each of the two scroll buttons shown when the tabs overflow the strip.
    pub scroll_button_width: f32,

    /// How far a scroll button moves the strip.
    pub scroll_step: f32,

    pub strip_fill: Color32,
    pub active_tab_fill: Color32,
    pub inactive_tab_fill: Color32,
    pub content_fill: Color32,
    pub text_color: Color32,
    pub disabled_text_color: Color32,
    pub close_glyph_color: Color32,
    pub scroll_button_fill: Color32,
    pub border: Stroke,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            tab_strip_height: 24.0,
            tab_width: TabWidth::Auto {
                min: 48.0,
                max: 220.0,
            },
            glyph_width: 7.0,
            tab_padding: 8.0,
            close_glyph_size: 12.0,
            scroll_button_width: 16.0,
            scroll_step: 48.0,
            strip_fill: Color32::from_rgb(14, 14, 19),
            active_tab_fill: Color32::from_rgb(36, 36, 48),
            inactive_tab_fill: Color32::from_rgb(22, 22, 29),
            content_fill: Color32::from_rgb(27, 27, 34),
            text_color: Color32::from_rgb(200, 200, 215),
            disabled_text_color: Color32::from_rgb(110, 110, 120),
            close_glyph_color: Color32::from_rgb(160, 160, 170),
            scroll_button_fill: Color32::from_rgb(40, 40, 52),
            border: Stroke::new(1.0, Color32::from_rgb(50, 50, 64)),
        }
    }
}

impl ContainerStyle {
    /// Width of a tab whose title is `title`.
    pub fn tab_width_for(&self, title: &str, closable: bool) -> f32 {
        match self.tab_width {
            TabWidth::Fixed(width) => width,
            TabWidth::Auto { min, max } => {
                let glyphs = title.chars().count() as f32;
                let close = if closable {
                    self.close_glyph_size + self.tab_padding * 0.5
                } else {
                    0.0
                };
                let width = glyphs * self.glyph_width + 2.0 * self.tab_padding + close;
                width.clamp(min, max.max(min))
            }
        }
    }

    /// Width a tab gets before its title is known.
    pub(crate) fn initial_tab_width(&self) -> f32 {
        match self.tab_width {
            TabWidth::Fixed(width) => width,
            TabWidth::Auto { min, .. } => min,
        }
    }
}
