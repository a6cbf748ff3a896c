use egui::{Pos2, Rect, Vec2};

use crate::tree::Orientation;

/// Partition `rect` in two along `orientation`, giving `ratio` of the extent to the first half.
///
/// [`Orientation::Horizontal`] stacks the halves top/bottom, [`Orientation::Vertical`] places
/// them left/right.
pub(crate) fn split_rect(rect: Rect, orientation: Orientation, ratio: f32) -> (Rect, Rect) {
    let ratio = ratio.clamp(0.0, 1.0);
    match orientation {
        Orientation::Horizontal => {
            let y = rect.top() + rect.height() * ratio;
            (
                Rect::from_min_max(rect.min, Pos2::new(rect.right(), y)),
                Rect::from_min_max(Pos2::new(rect.left(), y), rect.max),
            )
        }
        Orientation::Vertical => {
            let x = rect.left() + rect.width() * ratio;
            (
                Rect::from_min_max(rect.min, Pos2::new(x, rect.bottom())),
                Rect::from_min_max(Pos2::new(x, rect.top()), rect.max),
            )
        }
    }
}

/// Move `rect` (without resizing it) so that it lies inside `bounds`.
///
/// When `rect` is larger than `bounds` along an axis it is aligned to the min edge.
pub(crate) fn clamp_rect_inside(rect: Rect, bounds: Rect) -> Rect {
    let size = rect.size();
    let max_x = (bounds.right() - size.x).max(bounds.left());
    let max_y = (bounds.bottom() - size.y).max(bounds.top());
    let min = Pos2::new(
        rect.left().clamp(bounds.left(), max_x),
        rect.top().clamp(bounds.top(), max_y),
    );
    Rect::from_min_size(min, size)
}

/// Has the pointer moved further than `threshold` from `start` along either axis?
pub(crate) fn exceeds_drag_threshold(start: Pos2, current: Pos2, threshold: f32) -> bool {
    let delta: Vec2 = current - start;
    delta.x.abs() > threshold || delta.y.abs() > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(Pos2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn vertical_split_partitions_width() {
        let (a, b) = split_rect(rect(0.0, 0.0, 200.0, 100.0), Orientation::Vertical, 0.25);
        assert_eq!(a, rect(0.0, 0.0, 50.0, 100.0));
        assert_eq!(b, rect(50.0, 0.0, 150.0, 100.0));
    }

    #[test]
    fn horizontal_split_partitions_height() {
        let (a, b) = split_rect(rect(10.0, 10.0, 100.0, 100.0), Orientation::Horizontal, 0.5);
        assert_eq!(a, rect(10.0, 10.0, 100.0, 50.0));
        assert_eq!(b, rect(10.0, 60.0, 100.0, 50.0));
    }

    #[test]
    fn clamp_keeps_size_and_moves_inside() {
        let bounds = rect(0.0, 0.0, 800.0, 600.0);
        let clamped = clamp_rect_inside(rect(700.0, -20.0, 200.0, 100.0), bounds);
        assert_eq!(clamped, rect(600.0, 0.0, 200.0, 100.0));

        let oversized = clamp_rect_inside(rect(50.0, 50.0, 1000.0, 100.0), bounds);
        assert_eq!(oversized.min, Pos2::new(0.0, 50.0));
        assert_eq!(oversized.size(), Vec2::new(1000.0, 100.0));
    }

    #[test]
    fn threshold_is_per_axis_and_exclusive() {
        let start = Pos2::new(10.0, 10.0);
        assert!(!exceeds_drag_threshold(start, Pos2::new(11.0, 10.0), 6.0));
        assert!(!exceeds_drag_threshold(start, Pos2::new(16.0, 16.0), 6.0));
        assert!(exceeds_drag_threshold(start, Pos2::new(10.0, 17.0), 6.0));
        assert!(exceeds_drag_threshold(start, Pos2::new(3.0, 10.0), 6.0));
    }
}
