//! Contracts between the runtime loop and applications.
//!
//! The runtime owns the window, GPU context and input state; applications see
//! them only through [`FrameCtx`] for the length of one callback.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
