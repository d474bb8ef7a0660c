//! Frame-coherent pointer state.
//!
//! [`PointerState`] accumulates cursor and primary-button events during a frame and exposes
//! both the level (held) and edge (pressed/released this frame) state the tools need.

use glam::Vec2;

/// Physical state change of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Button went down.
    Pressed,
    /// Button went up.
    Released,
}

/// Per-button press/release tracking for a single frame.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
}

/// Frame-coherent pointer state.
///
/// # Usage
///
/// 1. Forward window events via the `on_*` methods during event collection.
/// 2. Hand the state to [`ToolDispatcher::dispatch`](crate::ToolDispatcher::dispatch).
/// 3. Call [`clear_transients`](Self::clear_transients) at end of frame.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Vec2,
    primary: ButtonFrame,
}

impl PointerState {
    /// Creates a pointer at the origin with the button up.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a cursor move, in window pixels.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x as f32, y as f32);
    }

    /// Process a primary button event.
    pub fn on_button(&mut self, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                self.primary.pressed = true;
                self.primary.just_pressed = true;
            }
            ButtonState::Released => {
                self.primary.pressed = false;
                self.primary.just_released = true;
            }
        }
    }

    /// Clears per-frame edges.
    pub fn clear_transients(&mut self) {
        self.primary.just_pressed = false;
        self.primary.just_released = false;
    }

    /// Cursor position in window pixels.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn is_primary_down(&self) -> bool {
        self.primary.pressed
    }

    /// Whether the primary button went down this frame.
    #[must_use]
    pub fn just_pressed(&self) -> bool {
        self.primary.just_pressed
    }

    /// Whether the primary button went up this frame.
    #[must_use]
    pub fn just_released(&self) -> bool {
        self.primary.just_released
    }
}
