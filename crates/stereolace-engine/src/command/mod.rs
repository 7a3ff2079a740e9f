//! Deferred state changes for the stereo pipeline.
//!
//! Input and window callbacks never touch the pipeline directly; they push
//! [`StereoCommand`]s, and the frame loop drains the queue once per tick
//! before rendering. A frame therefore sees either all or none of a tick's
//! updates.

mod queue;

pub use queue::{CommandQueue, StereoCommand};
