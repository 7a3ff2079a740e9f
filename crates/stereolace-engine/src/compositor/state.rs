use crate::coords::Resolution;
use crate::error::{StereoError, StereoResult};
use crate::targets::CaptureTarget;

use super::mode::InterlaceMode;

/// Everything a backend needs to run the interlace pass for one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CompositeParams {
    /// Output resolution in device pixels; also the required size of both
    /// eye targets.
    pub resolution: Resolution,
    pub mode: InterlaceMode,
}

/// Backend-independent compositor state.
#[derive(Debug, Clone)]
pub struct InterlaceCompositor {
    params: CompositeParams,
}

impl InterlaceCompositor {
    pub fn new(resolution: Resolution, mode: InterlaceMode) -> Self {
        Self {
            params: CompositeParams { resolution, mode },
        }
    }

    pub fn params(&self) -> CompositeParams {
        self.params
    }

    pub fn mode(&self) -> InterlaceMode {
        self.params.mode
    }

    pub fn set_mode(&mut self, mode: InterlaceMode) {
        self.params.mode = mode;
    }

    /// Flips between horizontal and vertical; returns the new mode.
    pub fn toggle(&mut self) -> InterlaceMode {
        self.params.mode = self.params.mode.toggled();
        self.params.mode
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.params.resolution = resolution;
    }

    /// Checks that both targets match the output resolution.
    pub fn validate<T: CaptureTarget>(&self, left: &T, right: &T) -> StereoResult<()> {
        validate_targets(&self.params, left, right)
    }
}

pub(crate) fn validate_targets<T: CaptureTarget>(
    params: &CompositeParams,
    left: &T,
    right: &T,
) -> StereoResult<()> {
    for target in [left, right] {
        if target.resolution() != params.resolution {
            return Err(StereoError::TargetMismatch {
                eye: target.eye(),
                id: target.id(),
                actual: target.resolution(),
                expected: params.resolution,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::software::{PixelBuffer, SoftwareTarget};
    use crate::rig::Eye;

    #[test]
    fn toggle_only_changes_mode() {
        let mut c = InterlaceCompositor::new(Resolution::new(8, 8), InterlaceMode::Horizontal);
        assert_eq!(c.toggle(), InterlaceMode::Vertical);
        assert_eq!(c.params().resolution, Resolution::new(8, 8));
        assert_eq!(c.toggle(), InterlaceMode::Horizontal);
    }

    #[test]
    fn validate_names_the_mismatched_eye() {
        let c = InterlaceCompositor::new(Resolution::new(4, 4), InterlaceMode::default());
        let left = SoftwareTarget::new(Eye::Left, PixelBuffer::new(Resolution::new(4, 4)));
        let right = SoftwareTarget::new(Eye::Right, PixelBuffer::new(Resolution::new(4, 2)));

        assert!(c.validate(&left, &left).is_ok());
        let err = c.validate(&left, &right).unwrap_err();
        assert!(matches!(
            err,
            StereoError::TargetMismatch { eye: Eye::Right, actual, .. } if actual == Resolution::new(4, 2)
        ));
    }
}
