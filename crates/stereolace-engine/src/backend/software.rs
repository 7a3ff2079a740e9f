//! CPU backend: capture targets are plain RGBA8 buffers and the interlace
//! pass runs in [`crate::compositor::interlace`].
//!
//! Useful headless (screenshots, CI) and as the reference the GPU shader is
//! checked against.

use std::collections::BTreeSet;

use anyhow::anyhow;

use crate::compositor::{self, CompositeParams};
use crate::coords::Resolution;
use crate::error::{StereoError, StereoResult};
use crate::rig::Eye;
use crate::targets::{CaptureTarget, TargetId};

use super::StereoBackend;

/// Straight (non-premultiplied) RGBA, 8 bits per channel.
pub type Rgba8 = [u8; 4];

/// Row-major pixel buffer, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    resolution: Resolution,
    pixels: Vec<Rgba8>,
}

impl PixelBuffer {
    /// Transparent black buffer.
    pub fn new(resolution: Resolution) -> Self {
        Self::filled(resolution, [0, 0, 0, 0])
    }

    pub fn filled(resolution: Resolution, color: Rgba8) -> Self {
        Self {
            resolution,
            pixels: vec![color; resolution.pixel_count()],
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes a pixel; out of range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.resolution.width || y >= self.resolution.height {
            return None;
        }
        Some(y as usize * self.resolution.width as usize + x as usize)
    }
}

/// Capture target backed by a [`PixelBuffer`].
#[derive(Debug)]
pub struct SoftwareTarget {
    id: TargetId,
    eye: Eye,
    buffer: PixelBuffer,
}

impl SoftwareTarget {
    /// Wraps `buffer` under a fresh id.
    pub fn new(eye: Eye, buffer: PixelBuffer) -> Self {
        Self {
            id: TargetId::next(),
            eye,
            buffer,
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}

impl CaptureTarget for SoftwareTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn eye(&self) -> Eye {
        self.eye
    }

    fn resolution(&self) -> Resolution {
        self.buffer.resolution()
    }
}

/// Output frame under construction.
#[derive(Debug)]
pub struct SoftwareFrame {
    output: PixelBuffer,
    bound: Option<TargetId>,
}

impl SoftwareFrame {
    /// Target currently bound for drawing, `None` when the default output is
    /// active.
    pub fn bound_target(&self) -> Option<TargetId> {
        self.bound
    }
}

/// Eye pass over a software target. Dropping it restores the default output.
pub struct SoftwarePass<'p> {
    binding: &'p mut Option<TargetId>,
    target: &'p mut SoftwareTarget,
}

impl SoftwarePass<'_> {
    pub fn eye(&self) -> Eye {
        self.target.eye
    }

    pub fn target_id(&self) -> TargetId {
        self.target.id
    }

    pub fn resolution(&self) -> Resolution {
        self.target.buffer.resolution()
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.target.buffer
    }

    pub fn clear(&mut self, color: Rgba8) {
        self.target.buffer.fill(color);
    }
}

impl Drop for SoftwarePass<'_> {
    fn drop(&mut self) {
        *self.binding = None;
    }
}

/// Counters exposed for diagnostics.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct SoftwareStats {
    pub targets_allocated: u64,
    pub targets_released: u64,
    pub surface_resizes: u64,
    pub frames_presented: u64,
}

/// CPU implementation of [`StereoBackend`].
#[derive(Debug)]
pub struct SoftwareBackend {
    surface: Resolution,
    max_dimension: u32,
    live: BTreeSet<TargetId>,
    presented: Option<PixelBuffer>,
    stats: SoftwareStats,
}

impl SoftwareBackend {
    /// Largest target side accepted by default, matching common GPU limits.
    pub const DEFAULT_MAX_DIMENSION: u32 = 8192;

    pub fn new() -> Self {
        Self::with_max_dimension(Self::DEFAULT_MAX_DIMENSION)
    }

    /// Backend that refuses targets wider or taller than `max_dimension`.
    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self {
            surface: Resolution::default(),
            max_dimension,
            live: BTreeSet::new(),
            presented: None,
            stats: SoftwareStats::default(),
        }
    }

    pub fn surface_resolution(&self) -> Resolution {
        self.surface
    }

    /// Last presented image.
    pub fn presented(&self) -> Option<&PixelBuffer> {
        self.presented.as_ref()
    }

    /// Ids of targets allocated and not yet released.
    pub fn live_targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.live.iter().copied()
    }

    pub fn stats(&self) -> SoftwareStats {
        self.stats
    }
}

impl Default for SoftwareBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StereoBackend for SoftwareBackend {
    type Target = SoftwareTarget;
    type Frame = SoftwareFrame;
    type EyePass<'p>
        = SoftwarePass<'p>
    where
        Self: 'p;

    fn allocate_target(&mut self, eye: Eye, resolution: Resolution) -> StereoResult<SoftwareTarget> {
        if resolution.is_empty() {
            return Err(StereoError::ZeroResolution {
                width: resolution.width,
                height: resolution.height,
            });
        }
        if resolution.width > self.max_dimension || resolution.height > self.max_dimension {
            return Err(StereoError::TargetAllocation {
                eye,
                resolution,
                source: anyhow!("exceeds maximum dimension {}", self.max_dimension),
            });
        }

        let target = SoftwareTarget::new(eye, PixelBuffer::new(resolution));
        self.live.insert(target.id);
        self.stats.targets_allocated += 1;
        log::trace!("software: allocated {eye:?} target {:?} at {resolution}", target.id);
        Ok(target)
    }

    fn release_target(&mut self, target: SoftwareTarget) {
        if self.live.remove(&target.id) {
            self.stats.targets_released += 1;
        }
    }

    fn resize_surface(&mut self, resolution: Resolution) {
        self.surface = resolution;
        self.stats.surface_resizes += 1;
    }

    fn begin_frame(&mut self) -> StereoResult<Option<SoftwareFrame>> {
        if self.surface.is_empty() {
            return Err(StereoError::SurfaceLost);
        }
        Ok(Some(SoftwareFrame {
            output: PixelBuffer::new(self.surface),
            bound: None,
        }))
    }

    fn eye_pass<'p>(
        &'p mut self,
        frame: &'p mut SoftwareFrame,
        target: &'p mut SoftwareTarget,
    ) -> SoftwarePass<'p> {
        frame.bound = Some(target.id);
        SoftwarePass {
            binding: &mut frame.bound,
            target,
        }
    }

    fn composite(
        &mut self,
        frame: &mut SoftwareFrame,
        left: &SoftwareTarget,
        right: &SoftwareTarget,
        params: &CompositeParams,
    ) -> StereoResult<()> {
        debug_assert!(frame.bound.is_none(), "eye pass still bound during composite");
        compositor::interlace_into(&mut frame.output, left, right, params)
    }

    fn present(&mut self, frame: SoftwareFrame) {
        self.stats.frames_presented += 1;
        self.presented = Some(frame.output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_access_is_bounds_checked() {
        let mut buf = PixelBuffer::new(Resolution::new(2, 2));
        buf.set_pixel(1, 1, [9, 9, 9, 9]);
        buf.set_pixel(5, 0, [1, 1, 1, 1]);
        assert_eq!(buf.pixel(1, 1), Some([9, 9, 9, 9]));
        assert_eq!(buf.pixel(2, 0), None);
        assert_eq!(buf.pixels().iter().filter(|p| **p == [1, 1, 1, 1]).count(), 0);
    }

    #[test]
    fn allocation_tracks_live_targets() {
        let mut backend = SoftwareBackend::new();
        let a = backend.allocate_target(Eye::Left, Resolution::new(4, 4)).unwrap();
        let b = backend.allocate_target(Eye::Right, Resolution::new(4, 4)).unwrap();
        assert_eq!(backend.live_targets().count(), 2);
        backend.release_target(a);
        assert_eq!(backend.live_targets().collect::<Vec<_>>(), vec![b.id()]);
        assert_eq!(backend.stats().targets_released, 1);
    }

    #[test]
    fn oversized_target_is_refused() {
        let mut backend = SoftwareBackend::with_max_dimension(64);
        let err = backend
            .allocate_target(Eye::Left, Resolution::new(65, 10))
            .unwrap_err();
        assert!(matches!(err, StereoError::TargetAllocation { eye: Eye::Left, .. }));
        assert_eq!(backend.live_targets().count(), 0);
    }

    #[test]
    fn zero_target_is_refused() {
        let mut backend = SoftwareBackend::new();
        let err = backend.allocate_target(Eye::Right, Resolution::new(0, 10)).unwrap_err();
        assert!(matches!(err, StereoError::ZeroResolution { width: 0, height: 10 }));
    }

    #[test]
    fn pass_binds_and_unbinds() {
        let mut backend = SoftwareBackend::new();
        backend.resize_surface(Resolution::new(2, 2));
        let mut frame = backend.begin_frame().unwrap().unwrap();
        let mut target = backend.allocate_target(Eye::Left, Resolution::new(2, 2)).unwrap();
        let id = target.id();
        {
            let mut pass = backend.eye_pass(&mut frame, &mut target);
            assert_eq!(pass.target_id(), id);
            pass.clear([1, 2, 3, 4]);
        }
        assert_eq!(frame.bound_target(), None);
        assert_eq!(target.buffer().pixel(1, 1), Some([1, 2, 3, 4]));
    }

    #[test]
    fn unconfigured_surface_cannot_begin_frame() {
        let mut backend = SoftwareBackend::new();
        assert!(matches!(backend.begin_frame(), Err(StereoError::SurfaceLost)));
    }
}
