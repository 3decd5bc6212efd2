//! The window, and things to handle the rendering loop and events.

mod canvas;
mod window;

pub use canvas::Canvas;
pub use window::{run, run_demo};
