//! Stereo pipeline: ties the rig, capture targets and compositor together.
//!
//! ```text
//! Uninitialized --handle_resize--> Ready
//! Ready --render--> Rendering --> Ready
//! Ready --handle_resize--> Resizing --> Ready
//! ```

mod config;
mod stereo;

pub use config::StereoConfig;
pub use stereo::{FrameOutcome, PipelineState, StereoPipeline};
