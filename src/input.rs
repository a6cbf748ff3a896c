use egui::Pos2;

/// The per-frame pointer snapshot the docking engine reads.
///
/// Build one from egui with [`FrameInput::from_egui`], or fill it in directly when driving the
/// engine from another event loop (or from tests).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Latest pointer position, `None` when the pointer is outside the surface.
    pub pointer_pos: Option<Pos2>,

    /// The primary button is held this frame.
    pub primary_down: bool,

    /// The primary button went down this frame.
    pub primary_pressed: bool,

    /// The primary button went up this frame.
    pub primary_released: bool,
}

impl FrameInput {
    pub fn from_egui(input: &egui::InputState) -> Self {
        let pointer = &input.pointer;
        Self {
            pointer_pos: pointer.interact_pos().or_else(|| pointer.latest_pos()),
            primary_down: pointer.primary_down(),
            primary_pressed: pointer.primary_pressed(),
            primary_released: pointer.primary_released(),
        }
    }

    /// Pointer moved to `pos` with no button transitions.
    pub fn hover(pos: Pos2) -> Self {
        Self {
            pointer_pos: Some(pos),
            ..Default::default()
        }
    }

    /// Primary button went down at `pos`.
    pub fn press(pos: Pos2) -> Self {
        Self {
            pointer_pos: Some(pos),
            primary_down: true,
            primary_pressed: true,
            primary_released: false,
        }
    }

    /// Primary button held while the pointer is at `pos`.
    pub fn drag(pos: Pos2) -> Self {
        Self {
            pointer_pos: Some(pos),
            primary_down: true,
            primary_pressed: false,
            primary_released: false,
        }
    }

    /// Primary button released at `pos`.
    pub fn release(pos: Pos2) -> Self {
        Self {
            pointer_pos: Some(pos),
            primary_down: false,
            primary_pressed: false,
            primary_released: true,
        }
    }

    /// The same snapshot with the pointer hidden.
    ///
    /// Used for surfaces that sit underneath something else the pointer is over, so they still
    /// see button releases but can't be hit.
    pub(crate) fn occluded(self) -> Self {
        Self {
            pointer_pos: None,
            primary_pressed: false,
            ..self
        }
    }

    /// Where the primary button went down, if it did this frame.
    pub fn pressed_at(&self) -> Option<Pos2> {
        if self.primary_pressed {
            self.pointer_pos
        } else {
            None
        }
    }
}
