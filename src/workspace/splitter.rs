use crate::input::FrameInput;
use crate::tree::Orientation;

use super::Workspace;

impl Workspace {
    /// Resize splits by dragging the boundary between their halves.
    ///
    /// Returns `true` while a splitter owns the pointer (including the frame it is grabbed and
    /// the frame it is released), so nothing else reacts to that input.
    pub(super) fn update_splitter(&mut self, input: &FrameInput) -> bool {
        if let Some(node) = self.splitter_drag {
            if !input.primary_down {
                log::trace!("splitter release {node:?}");
                self.splitter_drag = None;
                return true;
            }
            let splitter = self.last_layout.splitters.iter().find(|s| s.node == node);
            if let (Some(pos), Some(splitter)) = (input.pointer_pos, splitter) {
                let parent = splitter.parent;
                let ratio = match splitter.orientation {
                    Orientation::Horizontal => (pos.y - parent.top()) / parent.height(),
                    Orientation::Vertical => (pos.x - parent.left()) / parent.width(),
                };
                self.tree.set_ratio(node, ratio);
            }
            return true;
        }

        if !self.drag.is_idle() {
            return false;
        }
        let Some(pos) = input.pressed_at() else {
            return false;
        };

        // Nested splits come later in the layout; the innermost one wins.
        let Some(splitter) = self
            .last_layout
            .splitters
            .iter()
            .rev()
            .find(|s| s.handle.contains(pos))
        else {
            return false;
        };
        log::trace!("splitter grab {:?}", splitter.node);
        self.splitter_drag = Some(splitter.node);
        true
    }
}
