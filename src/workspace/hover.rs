use egui::Rect;

use crate::container::ContainerId;
use crate::drop_target::{DropTarget, preview_rect, probe_rects, resolve_drop_target};
use crate::geometry::clamp_rect_inside;
use crate::window::WindowHost;

use super::{DragSession, Workspace};

/// Where a dragged window would go if released now.
#[derive(Clone, Debug, PartialEq)]
pub struct DropPreview {
    /// The container under the pointer; `None` means the window will float.
    pub hovered: Option<ContainerId>,

    /// `None` exactly when `hovered` is `None`.
    pub target: Option<DropTarget>,

    /// The region the window would occupy.
    pub rect: Rect,

    /// The five probes over the hovered container.
    pub probes: Option<[(DropTarget, Rect); 5]>,
}

impl Workspace {
    /// Resolve the drop under the session's pointer.
    ///
    /// `None` means releasing here does nothing: the drag hasn't moved yet, or the tab is being
    /// reordered inside its own strip.
    pub(super) fn resolve_hover(
        &self,
        session: &DragSession,
        host: &dyn WindowHost,
    ) -> Option<DropPreview> {
        if !session.moved {
            return None;
        }
        let pointer = session.current;

        if let Some(source) = &session.source {
            if self
                .containers
                .get(source)
                .is_some_and(|c| c.is_point_in_strip(pointer))
            {
                return None;
            }
        }

        let hovered = self
            .last_layout
            .containers
            .iter()
            .find(|(_, rect)| rect.contains(pointer));

        let Some((id, container_rect)) = hovered else {
            let bounds = self.overlay_bounds();
            let rect = if session.is_floating() {
                // A floating window dropped over empty space stays where it was put.
                host.window(session.window)?.bounds()
            } else {
                Rect::from_center_size(pointer, self.options.default_floating_size)
            };
            let rect = if bounds.is_positive() {
                clamp_rect_inside(rect, bounds)
            } else {
                rect
            };
            return Some(DropPreview {
                hovered: None,
                target: None,
                rect,
                probes: None,
            });
        };

        let probe_size = self.options.drop_probe_size;
        let target = resolve_drop_target(*container_rect, pointer, probe_size);
        Some(DropPreview {
            hovered: Some(id.clone()),
            target: Some(target),
            rect: preview_rect(*container_rect, target),
            probes: Some(probe_rects(*container_rect, probe_size)),
        })
    }
}
