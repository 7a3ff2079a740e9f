use glam::Vec3;

use crate::compositor::InterlaceMode;
use crate::coords::DeviceSize;

/// One queued change.
#[derive(Debug, Clone, PartialEq)]
pub enum StereoCommand {
    /// Look delta, radians. See [`crate::orientation::OrientationState::apply_delta`].
    Rotate {
        delta_yaw: f32,
        delta_pitch: f32,
        delta_roll: f32,
    },
    /// Translation in rig-local axes (+X right, +Y up, -Z forward).
    Move(Vec3),
    /// Back to the initial position and orientation.
    Reset,
    ToggleInterlace,
    SetInterlace(InterlaceMode),
    /// New drawable size. Only the last resize of a tick is applied.
    Resize(DeviceSize),
}

/// FIFO of commands, drained by the frame loop.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<StereoCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: StereoCommand) {
        self.commands.push(command);
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32, delta_roll: f32) {
        self.push(StereoCommand::Rotate {
            delta_yaw,
            delta_pitch,
            delta_roll,
        });
    }

    pub fn move_local(&mut self, delta: Vec3) {
        if delta != Vec3::ZERO {
            self.push(StereoCommand::Move(delta));
        }
    }

    pub fn reset(&mut self) {
        self.push(StereoCommand::Reset);
    }

    pub fn toggle_interlace(&mut self) {
        self.push(StereoCommand::ToggleInterlace);
    }

    pub fn set_interlace(&mut self, mode: InterlaceMode) {
        self.push(StereoCommand::SetInterlace(mode));
    }

    pub fn resize(&mut self, size: DeviceSize) {
        self.push(StereoCommand::Resize(size));
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Takes every queued command in arrival order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, StereoCommand> {
        self.commands.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut q = CommandQueue::new();
        q.rotate(0.1, 0.0, 0.0);
        q.toggle_interlace();
        q.reset();
        let drained: Vec<_> = q.drain().collect();
        assert_eq!(
            drained,
            vec![
                StereoCommand::Rotate { delta_yaw: 0.1, delta_pitch: 0.0, delta_roll: 0.0 },
                StereoCommand::ToggleInterlace,
                StereoCommand::Reset,
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn zero_move_is_not_queued() {
        let mut q = CommandQueue::new();
        q.move_local(Vec3::ZERO);
        assert_eq!(q.len(), 0);
        q.move_local(Vec3::X);
        assert_eq!(q.len(), 1);
    }
}
