//! Stereolace engine crate.
//!
//! Renders one scene from two eye cameras and interlaces the views by row or
//! column parity for interlaced 3D displays. The stereo core (orientation,
//! rig, capture targets, compositor, pipeline) sits on top of the platform
//! pieces it runs on: a wgpu device, a winit runtime, input and frame timing.

pub mod backend;
pub mod command;
pub mod compositor;
pub mod coords;
pub mod core;
pub mod device;
pub mod error;
pub mod input;
pub mod logging;
pub mod orientation;
pub mod pipeline;
pub mod rig;
pub mod targets;
pub mod time;
pub mod window;

pub use error::{StereoError, StereoResult};
