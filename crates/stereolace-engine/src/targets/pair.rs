use crate::backend::StereoBackend;
use crate::coords::Resolution;
use crate::error::{StereoError, StereoResult};
use crate::rig::Eye;

use super::CaptureTarget;

/// Left/right target pair at one resolution.
#[derive(Debug)]
pub struct CaptureTargets<T> {
    left: T,
    right: T,
}

impl<T: CaptureTarget> CaptureTargets<T> {
    /// Allocates a fresh pair. Zero-sized resolutions are rejected before the
    /// backend is asked for anything.
    pub fn allocate<B>(backend: &mut B, resolution: Resolution) -> StereoResult<Self>
    where
        B: StereoBackend<Target = T>,
    {
        if resolution.is_empty() {
            return Err(StereoError::ZeroResolution {
                width: resolution.width,
                height: resolution.height,
            });
        }

        let left = backend.allocate_target(Eye::Left, resolution)?;
        let right = match backend.allocate_target(Eye::Right, resolution) {
            Ok(t) => t,
            Err(e) => {
                backend.release_target(left);
                return Err(e);
            }
        };

        Ok(Self { left, right })
    }

    /// Replaces the pair with one at `resolution`.
    ///
    /// The new pair is fully allocated first; on failure the current pair is
    /// left untouched. On success the old pair goes back to the backend.
    pub fn resize<B>(&mut self, backend: &mut B, resolution: Resolution) -> StereoResult<()>
    where
        B: StereoBackend<Target = T>,
    {
        let fresh = Self::allocate(backend, resolution)?;
        self.replace(fresh).release(backend);
        Ok(())
    }

    /// Swaps in `fresh` and returns the previous pair.
    pub fn replace(&mut self, fresh: Self) -> Self {
        std::mem::replace(self, fresh)
    }

    /// Hands both targets back to the backend.
    pub fn release<B>(self, backend: &mut B)
    where
        B: StereoBackend<Target = T>,
    {
        log::trace!(
            "releasing capture targets {:?}/{:?}",
            self.left.id(),
            self.right.id()
        );
        backend.release_target(self.left);
        backend.release_target(self.right);
    }

    pub fn left(&self) -> &T {
        &self.left
    }

    pub fn right(&self) -> &T {
        &self.right
    }

    pub fn get(&self, eye: Eye) -> &T {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }

    pub(crate) fn get_mut(&mut self, eye: Eye) -> &mut T {
        match eye {
            Eye::Left => &mut self.left,
            Eye::Right => &mut self.right,
        }
    }

    /// Both targets always share one resolution; this reads the left one.
    pub fn resolution(&self) -> Resolution {
        self.left.resolution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::software::SoftwareBackend;

    #[test]
    fn allocate_rejects_zero_without_touching_backend() {
        let mut backend = SoftwareBackend::new();
        let err = CaptureTargets::allocate(&mut backend, Resolution::new(0, 0)).unwrap_err();
        assert!(matches!(err, StereoError::ZeroResolution { .. }));
        assert_eq!(backend.stats().targets_allocated, 0);
    }

    #[test]
    fn resize_swaps_ids_and_releases_old_pair() {
        let mut backend = SoftwareBackend::new();
        let mut targets = CaptureTargets::allocate(&mut backend, Resolution::new(8, 6)).unwrap();
        let old = [targets.left().id(), targets.right().id()];

        targets.resize(&mut backend, Resolution::new(16, 12)).unwrap();

        assert_eq!(targets.resolution(), Resolution::new(16, 12));
        assert_eq!(targets.right().resolution(), Resolution::new(16, 12));
        let live: Vec<_> = backend.live_targets().collect();
        assert_eq!(live.len(), 2);
        assert!(old.iter().all(|id| !live.contains(id)));
        assert!(targets.left().id() > old[1]);
        assert_eq!(backend.stats().targets_released, 2);
    }

    #[test]
    fn failed_resize_keeps_current_pair() {
        let mut backend = SoftwareBackend::with_max_dimension(32);
        let mut targets = CaptureTargets::allocate(&mut backend, Resolution::new(8, 8)).unwrap();
        let before = (targets.left().id(), targets.right().id());

        let err = targets.resize(&mut backend, Resolution::new(64, 8)).unwrap_err();
        assert!(matches!(err, StereoError::TargetAllocation { .. }));

        assert_eq!((targets.left().id(), targets.right().id()), before);
        assert_eq!(targets.resolution(), Resolution::new(8, 8));
        assert_eq!(backend.live_targets().count(), 2);
    }

    #[test]
    fn eyes_map_to_their_targets() {
        let mut backend = SoftwareBackend::new();
        let targets = CaptureTargets::allocate(&mut backend, Resolution::new(2, 2)).unwrap();
        assert_eq!(targets.get(Eye::Left).eye(), Eye::Left);
        assert_eq!(targets.get(Eye::Right).eye(), Eye::Right);
        assert_ne!(targets.left().id(), targets.right().id());
    }
}
