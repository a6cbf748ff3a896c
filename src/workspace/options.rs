use egui::{Color32, Stroke, Vec2};

/// Options for [`super::Workspace`].
#[derive(Clone, Debug)]
pub struct WorkspaceOptions {
    /// Pointer travel (in points, on either axis) before a press on a tab becomes a drag.
    ///
    /// Also handed to every container for its own tab reordering.
    pub drag_threshold: f32,

    /// Side of each of the five square drop-target probes shown over the hovered container.
    pub drop_probe_size: f32,

    /// Size of a window torn out of a container into a floating window.
    pub default_floating_size: Vec2,

    /// If false, dropping a tab outside every container cancels the drag instead of floating
    /// the window.
    pub allow_undock: bool,

    /// Thickness of the hot zone around each split boundary that resizes the split.
    pub splitter_width: f32,

    pub overlay: OverlayStyle,

    /// If true, run structural checks after every edit and log issues (debug-only aid).
    pub debug_integrity: bool,

    /// If true, panic on integrity issues (debug-only).
    pub debug_integrity_panic: bool,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            drag_threshold: 6.0,
            drop_probe_size: 32.0,
            default_floating_size: Vec2::new(320.0, 240.0),
            allow_undock: true,
            splitter_width: 6.0,
            overlay: OverlayStyle::default(),
            debug_integrity: false,
            debug_integrity_panic: false,
        }
    }
}

/// Colors of the drag preview and drop-target probes.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayStyle {
    pub preview_fill: Color32,
    pub preview_stroke: Stroke,
    pub probe_fill: Color32,
    pub probe_hovered_fill: Color32,
    pub probe_stroke: Stroke,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        let accent = Color32::from_rgb(66, 150, 250);
        Self {
            preview_fill: Color32::from_rgba_unmultiplied(66, 150, 250, 60),
            preview_stroke: Stroke::new(1.5, accent),
            probe_fill: Color32::from_rgba_unmultiplied(40, 40, 52, 220),
            probe_hovered_fill: accent,
            probe_stroke: Stroke::new(1.0, Color32::from_gray(180)),
        }
    }
}
