use glam::Vec3;

use stereolace_engine::command::CommandQueue;
use stereolace_engine::input::{InputFrame, InputState, Key, MouseButton};
use stereolace_engine::pipeline::StereoConfig;

/// Something the runtime has to do on the controls' behalf.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ControlRequest {
    GrabCursor,
    ReleaseCursor,
    Exit,
}

/// Fly-camera bindings. Turns held keys and pointer motion into queued
/// stereo commands, scaled by the frame delta.
#[derive(Debug, Default)]
pub struct FlyControls {
    grabbed: bool,
}

impl FlyControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn update(
        &mut self,
        input: &InputState,
        frame: &InputFrame,
        dt: f32,
        config: &StereoConfig,
        commands: &mut CommandQueue,
    ) -> Option<ControlRequest> {
        let request = self.update_grab(frame);

        if frame.key_pressed(Key::R) {
            commands.reset();
        }
        if frame.key_pressed(Key::T) {
            commands.toggle_interlace();
        }

        let speed = if input.key_down(Key::F) {
            config.move_speed * config.boost_multiplier
        } else {
            config.move_speed
        };
        commands.move_local(movement_axis(input) * speed * dt);

        let turn = config.turn_speed * dt;
        let (mut yaw, mut pitch, mut roll) = (0.0, 0.0, 0.0);
        yaw += turn * (axis(input, Key::Z, Key::C) + axis(input, Key::ArrowRight, Key::ArrowLeft));
        pitch += turn * axis(input, Key::ArrowDown, Key::ArrowUp);
        roll += turn * axis(input, Key::Q, Key::E);

        if self.grabbed {
            let (dx, dy) = frame.pointer_delta;
            yaw += dx * config.mouse_sensitivity;
            pitch += dy * config.mouse_sensitivity;
        }

        if yaw != 0.0 || pitch != 0.0 || roll != 0.0 {
            commands.rotate(yaw, pitch, roll);
        }

        request
    }

    fn update_grab(&mut self, frame: &InputFrame) -> Option<ControlRequest> {
        if frame.focus_lost && self.grabbed {
            self.grabbed = false;
            return Some(ControlRequest::ReleaseCursor);
        }
        if frame.key_pressed(Key::Escape) {
            if self.grabbed {
                self.grabbed = false;
                return Some(ControlRequest::ReleaseCursor);
            }
            return Some(ControlRequest::Exit);
        }
        if !self.grabbed && frame.button_pressed(MouseButton::Left) {
            self.grabbed = true;
            return Some(ControlRequest::GrabCursor);
        }
        None
    }
}

/// `1.0` while only `positive` is held, `-1.0` for only `negative`.
fn axis(input: &InputState, positive: Key, negative: Key) -> f32 {
    f32::from(u8::from(input.key_down(positive))) - f32::from(u8::from(input.key_down(negative)))
}

/// Local move direction from held keys: +X right, +Y up, -Z forward.
fn movement_axis(input: &InputState) -> Vec3 {
    let dir = Vec3::new(
        axis(input, Key::D, Key::A),
        axis(input, Key::Space, Key::Shift),
        axis(input, Key::S, Key::W),
    );
    dir.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereolace_engine::command::StereoCommand;

    fn held(keys: &[Key]) -> InputState {
        let mut input = InputState {
            focused: true,
            ..Default::default()
        };
        input.keys_down.extend(keys.iter().copied());
        input
    }

    fn run(controls: &mut FlyControls, input: &InputState, frame: &InputFrame) -> Vec<StereoCommand> {
        let mut queue = CommandQueue::new();
        controls.update(input, frame, 0.5, &StereoConfig::default(), &mut queue);
        queue.drain().collect()
    }

    #[test]
    fn forward_moves_along_minus_z_scaled_by_dt() {
        let mut controls = FlyControls::new();
        let cmds = run(&mut controls, &held(&[Key::W]), &InputFrame::default());
        assert_eq!(cmds, vec![StereoCommand::Move(Vec3::new(0.0, 0.0, -1.5))]);
    }

    #[test]
    fn boost_multiplies_speed() {
        let mut controls = FlyControls::new();
        let cmds = run(&mut controls, &held(&[Key::D, Key::F]), &InputFrame::default());
        assert_eq!(cmds, vec![StereoCommand::Move(Vec3::new(9.0, 0.0, 0.0))]);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut controls = FlyControls::new();
        let cmds = run(&mut controls, &held(&[Key::W, Key::S, Key::Q, Key::E]), &InputFrame::default());
        assert!(cmds.is_empty());
    }

    #[test]
    fn pointer_motion_only_counts_while_grabbed() {
        let mut controls = FlyControls::new();
        let input = held(&[]);
        let mut frame = InputFrame {
            pointer_delta: (100.0, 0.0),
            ..Default::default()
        };
        assert!(run(&mut controls, &input, &frame).is_empty());

        frame.buttons_pressed.insert(MouseButton::Left);
        let cmds = run(&mut controls, &input, &frame);
        assert!(controls.grabbed());
        match cmds.as_slice() {
            [StereoCommand::Rotate { delta_yaw, delta_pitch, delta_roll }] => {
                assert!((delta_yaw - 0.2).abs() < 1e-6);
                assert_eq!((*delta_pitch, *delta_roll), (0.0, 0.0));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn focus_loss_drops_the_grab() {
        let mut controls = FlyControls::new();
        let mut click = InputFrame::default();
        click.buttons_pressed.insert(MouseButton::Left);
        run(&mut controls, &held(&[]), &click);

        let lost = InputFrame {
            focus_lost: true,
            ..Default::default()
        };
        let mut queue = CommandQueue::new();
        let request = controls.update(&held(&[]), &lost, 0.1, &StereoConfig::default(), &mut queue);
        assert_eq!(request, Some(ControlRequest::ReleaseCursor));
        assert!(!controls.grabbed());
    }

    #[test]
    fn escape_releases_then_exits() {
        let mut controls = FlyControls::new();
        let input = held(&[]);
        let mut queue = CommandQueue::new();
        let config = StereoConfig::default();

        let mut click = InputFrame::default();
        click.buttons_pressed.insert(MouseButton::Left);
        assert_eq!(
            controls.update(&input, &click, 0.0, &config, &mut queue),
            Some(ControlRequest::GrabCursor)
        );

        let mut esc = InputFrame::default();
        esc.keys_pressed.insert(Key::Escape);
        assert_eq!(
            controls.update(&input, &esc, 0.0, &config, &mut queue),
            Some(ControlRequest::ReleaseCursor)
        );
        assert_eq!(
            controls.update(&input, &esc, 0.0, &config, &mut queue),
            Some(ControlRequest::Exit)
        );
    }

    fn yaw_from(keys: &[Key]) -> f32 {
        let mut controls = FlyControls::new();
        let mut queue = CommandQueue::new();
        controls.update(&held(keys), &InputFrame::default(), 1.0, &StereoConfig::default(), &mut queue);
        match queue.drain().collect::<Vec<_>>().as_slice() {
            [StereoCommand::Rotate { delta_yaw, .. }] => *delta_yaw,
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn yaw_keys_turn_in_opposite_directions() {
        let turn = StereoConfig::default().turn_speed;
        assert_eq!(yaw_from(&[Key::Z]), turn);
        assert_eq!(yaw_from(&[Key::C]), -turn);
        assert_eq!(yaw_from(&[Key::ArrowRight]), turn);
        assert_eq!(yaw_from(&[Key::ArrowLeft]), -turn);
    }

    #[test]
    fn reset_and_toggle_fire_on_press_edges() {
        let mut controls = FlyControls::new();
        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::R);
        frame.keys_pressed.insert(Key::T);
        let cmds = run(&mut controls, &held(&[Key::R, Key::T]), &frame);
        assert_eq!(cmds, vec![StereoCommand::Reset, StereoCommand::ToggleInterlace]);

        // Still held next frame: no repeat.
        let cmds = run(&mut controls, &held(&[Key::R, Key::T]), &InputFrame::default());
        assert!(cmds.is_empty());
    }
}
