//! Resolution types shared by the pipeline, targets and backends.
//!
//! Two spaces exist:
//! - logical units reported by the windowing side
//! - device pixels, which every buffer and the compositor work in
//!
//! Conversion happens once, in [`DeviceSize::resolution`].

mod resolution;

pub use resolution::{DeviceSize, Resolution};
