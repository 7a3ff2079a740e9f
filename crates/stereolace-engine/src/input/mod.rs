//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! [`platform`] translates winit events into [`InputEvent`]s; the runtime
//! folds them into an [`InputState`] and the current [`InputFrame`].

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, MouseButton};
