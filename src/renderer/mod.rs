//! GPU drawing of the scene blocks.

pub use self::block_renderer::{BlockData, BlockRenderer, FrameUniforms};

mod block_renderer;
