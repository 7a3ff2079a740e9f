//! Parity interlacing of the two eye targets into one output image.
//!
//! Rule, in device pixels with a top-left origin: an output pixel whose row
//! (horizontal mode) or column (vertical mode) index is even comes from the
//! left eye, odd from the right eye.
//!
//! [`InterlaceCompositor`] holds the backend-independent state (output
//! resolution + mode) and checks preconditions. Backends execute it either on
//! the CPU ([`interlace`]) or as a full-screen wgpu pass ([`InterlacePass`]).

mod cpu;
mod gpu;
mod mode;
mod state;

pub use cpu::interlace;
pub(crate) use cpu::interlace_into;
pub use gpu::InterlacePass;
pub use mode::InterlaceMode;
pub use state::{CompositeParams, InterlaceCompositor};
pub(crate) use state::validate_targets;
