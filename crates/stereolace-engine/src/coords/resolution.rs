use std::fmt;

/// Size in device pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height. Returns `1.0` for empty resolutions.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_empty() {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    #[inline]
    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Drawable size as reported by the windowing side.
///
/// `scale_factor` is the device pixel ratio between logical units and
/// framebuffer pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DeviceSize {
    pub logical_width: f64,
    pub logical_height: f64,
    pub scale_factor: f64,
}

impl DeviceSize {
    #[inline]
    pub const fn new(logical_width: f64, logical_height: f64, scale_factor: f64) -> Self {
        Self {
            logical_width,
            logical_height,
            scale_factor,
        }
    }

    /// Builds a size from a physical pixel size, the form winit reports.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = sanitize_scale(scale_factor);
        Self::new(width as f64 / scale, height as f64 / scale, scale)
    }

    /// Device-pixel resolution: logical size times the pixel ratio, rounded.
    ///
    /// Negative or non-finite inputs collapse to zero; callers reject the
    /// resulting empty resolution.
    pub fn resolution(self) -> Resolution {
        let scale = sanitize_scale(self.scale_factor);
        Resolution::new(
            to_device_px(self.logical_width, scale),
            to_device_px(self.logical_height, scale),
        )
    }
}

fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}

fn to_device_px(logical: f64, scale: f64) -> u32 {
    let px = (logical * scale).round();
    if px.is_finite() && px > 0.0 {
        px.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_scales_by_pixel_ratio() {
        let size = DeviceSize::new(400.0, 300.0, 2.0);
        assert_eq!(size.resolution(), Resolution::new(800, 600));
    }

    #[test]
    fn fractional_ratio_rounds() {
        let size = DeviceSize::new(1024.0, 768.0, 1.25);
        assert_eq!(size.resolution(), Resolution::new(1280, 960));
    }

    #[test]
    fn physical_size_survives_round_trip() {
        let size = DeviceSize::from_physical(1366, 767, 1.5);
        assert_eq!(size.resolution(), Resolution::new(1366, 767));
    }

    #[test]
    fn bad_scale_falls_back_to_one() {
        assert_eq!(DeviceSize::new(10.0, 20.0, 0.0).resolution(), Resolution::new(10, 20));
        assert_eq!(DeviceSize::new(10.0, 20.0, f64::NAN).resolution(), Resolution::new(10, 20));
    }

    #[test]
    fn negative_size_is_empty() {
        assert!(DeviceSize::new(-5.0, 20.0, 1.0).resolution().is_empty());
    }

    #[test]
    fn aspect_of_empty_is_one() {
        assert_eq!(Resolution::new(0, 600).aspect(), 1.0);
        assert_eq!(Resolution::new(800, 400).aspect(), 2.0);
    }

    #[test]
    fn display_is_width_x_height() {
        assert_eq!(Resolution::new(800, 600).to_string(), "800x600");
    }
}
