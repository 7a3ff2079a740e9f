//! Frame timing.
//!
//! One [`FrameClock`] per window; `tick()` once per frame gives the clamped
//! delta that movement is scaled by.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
