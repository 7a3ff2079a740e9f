//! Stereo rig: one parent transform carrying two eye cameras.
//!
//! Eyes are fixed children offset along the rig's local X axis. Rotating or
//! moving the rig moves both, so the viewing axes always stay parallel.

mod camera;
mod projection;

pub use camera::{Eye, EyeCamera, StereoRig};
pub use projection::Projection;
