use egui::{Pos2, Rect, Vec2};

use crate::tree::Orientation;

/// Where a dragged window lands relative to the container under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropTarget {
    /// Dock as a tab of the hovered container.
    Center,
    Left,
    Right,
    Top,
    Bottom,
}

impl DropTarget {
    pub const ALL: [Self; 5] = [Self::Center, Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// How splitting toward this side divides the container, or `None` for [`Self::Center`].
    pub fn split_orientation(self) -> Option<Orientation> {
        match self {
            Self::Center => None,
            Self::Left | Self::Right => Some(Orientation::Vertical),
            Self::Top | Self::Bottom => Some(Orientation::Horizontal),
        }
    }

    /// Does the new container go before the old one?
    pub fn new_goes_first(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }

    /// Offset (in units of the probe size) of this target's probe from the container center.
    fn probe_offset(self) -> Vec2 {
        match self {
            Self::Center => Vec2::ZERO,
            Self::Left => Vec2::new(-2.0, 0.0),
            Self::Right => Vec2::new(2.0, 0.0),
            Self::Top => Vec2::new(0.0, -2.0),
            Self::Bottom => Vec2::new(0.0, 2.0),
        }
    }
}

/// The five square probes shown over a hovered container, each `probe_size` on a side.
///
/// Center sits on the container center; the side probes are `2 * probe_size` away from it.
pub fn probe_rects(container: Rect, probe_size: f32) -> [(DropTarget, Rect); 5] {
    let center = container.center();
    DropTarget::ALL.map(|target| {
        let rect = Rect::from_center_size(
            center + target.probe_offset() * probe_size,
            Vec2::splat(probe_size),
        );
        (target, rect)
    })
}

/// The probe under `pointer`, falling back to [`DropTarget::Center`].
pub fn resolve_drop_target(container: Rect, pointer: Pos2, probe_size: f32) -> DropTarget {
    probe_rects(container, probe_size)
        .into_iter()
        .find(|(_, rect)| rect.contains(pointer))
        .map_or(DropTarget::Center, |(target, _)| target)
}

/// The region a window dropped with `target` would end up occupying.
pub fn preview_rect(container: Rect, target: DropTarget) -> Rect {
    let half_w = container.width() * 0.5;
    let half_h = container.height() * 0.5;
    match target {
        DropTarget::Center => container,
        DropTarget::Left => {
            Rect::from_min_size(container.min, Vec2::new(half_w, container.height()))
        }
        DropTarget::Right => Rect::from_min_max(
            Pos2::new(container.right() - half_w, container.top()),
            container.max,
        ),
        DropTarget::Top => {
            Rect::from_min_size(container.min, Vec2::new(container.width(), half_h))
        }
        DropTarget::Bottom => Rect::from_min_max(
            Pos2::new(container.left(), container.bottom() - half_h),
            container.max,
        ),
    }
}
