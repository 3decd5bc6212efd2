//! Colors used by the demo.
//!
//! Components are RGBA `f32` in `[0.0, 1.0]`. Scene colors are usually written as
//! `0xRRGGBB` integers (see [`from_hex`]), which is also how the options file stores them.

pub use rgb::Rgba;

/// The color type used throughout the crate. RGBA with f32 components in [0.0, 1.0].
pub type Color = Rgba<f32>;

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 0, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Red (255, 0, 0)</div>
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 255, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Lime (0, 255, 0)</div>
pub const LIME: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 0, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Blue (0, 0, 255)</div>
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(128, 128, 128);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Grey (128, 128, 128)</div>
pub const GREY: Color = from_hex(0x808080);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 255, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>White (255, 255, 255)</div>
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(173, 216, 230);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Light blue (173, 216, 230)</div>
pub const LIGHT_BLUE: Color = from_hex(0xadd8e6);

/// The flat grey a block takes while it is marked as removed.
pub const REMOVED_COLOR: Color = GREY;

/// Converts a `0xRRGGBB` integer into an opaque [`Color`].
///
/// Bits above the lowest 24 are ignored.
///
/// # Example
/// ```
/// # use disassembly_demo::color::{self, from_hex};
/// assert_eq!(from_hex(0xff0000), color::RED);
/// ```
pub const fn from_hex(hex: u32) -> Color {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Color::new(r, g, b, 1.0)
}

/// Converts a [`Color`] back into a `0xRRGGBB` integer, dropping alpha.
pub fn to_hex(color: Color) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(color.r) << 16) | (channel(color.g) << 8) | channel(color.b)
}

/// The RGB part of a color scaled by `intensity`, as an array suitable for GPU upload.
#[inline]
pub fn scaled_rgb(color: Color, intensity: f32) -> [f32; 3] {
    [
        color.r * intensity,
        color.g * intensity,
        color.b * intensity,
    ]
}
