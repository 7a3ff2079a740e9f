use winit::event::WindowEvent;

use crate::coords::DeviceSize;

use super::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Drawable size changed, including the first size once the window
    /// exists. The runtime does not resize the surface itself.
    fn on_resize(&mut self, size: DeviceSize) {
        let _ = size;
    }

    /// Raw window events, after input translation.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
