use std::collections::HashSet;

use super::types::{Key, MouseButton};

/// Per-frame input deltas, cleared by the runtime after every frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys that went down this frame. Repeats are not included.
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    pub buttons_pressed: HashSet<MouseButton>,

    /// Accumulated raw pointer motion.
    pub pointer_delta: (f32, f32),

    /// The window lost focus this frame.
    pub focus_lost: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.pointer_delta = (0.0, 0.0);
        self.focus_lost = false;
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }
}
