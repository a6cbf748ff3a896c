use egui::Pos2;

use crate::canvas::Canvas;

use super::{DropPreview, OverlayStyle};

/// Paint where the dragged window would land, plus the drop-target probes over the hovered
/// container.
pub(super) fn paint_drop_preview(
    canvas: &mut dyn Canvas,
    preview: &DropPreview,
    title: &str,
    style: &OverlayStyle,
) {
    let rect = preview.rect.shrink(1.0);
    canvas.fill_rect(rect, style.preview_fill);
    canvas.stroke_rect(rect, style.preview_stroke);
    canvas.text(
        Pos2::new(rect.left() + 6.0, rect.top() + 10.0),
        title,
        style.preview_stroke.color,
    );

    let Some(probes) = &preview.probes else {
        return;
    };
    for &(target, probe) in probes {
        let fill = if preview.target == Some(target) {
            style.probe_hovered_fill
        } else {
            style.probe_fill
        };
        canvas.fill_rect(probe, fill);
        canvas.stroke_rect(probe, style.probe_stroke);
    }
}
