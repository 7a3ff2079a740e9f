/// Keyboard key identifier.
///
/// Only keys that something in the workspace binds are named; everything else
/// arrives as `Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Shift,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    A, C, D, E, F, Q, R, S, T, W, Z,

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when the event is a key repeat.
        repeat: bool,
    },

    PointerButton {
        button: MouseButton,
        state: KeyState,
    },

    /// Raw pointer motion in device units, independent of cursor position.
    /// Still reported while the cursor is grabbed.
    PointerMotion { dx: f32, dy: f32 },

    Focused(bool),
}
