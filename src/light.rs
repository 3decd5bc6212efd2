//! Lighting of the demo scene.
//!
//! The scene has a uniform ambient term and a single directional light placed at a
//! position and shining toward the origin.

use crate::color::{self, Color};
use crate::options::LightingOptions;
use glamx::Vec3;

/// A directional light (like the sun).
///
/// # Examples
/// ```
/// # use disassembly_demo::prelude::*;
/// let sun = Light::directional(Vec3::new(5.0, 10.0, 7.0))
///     .with_color(WHITE)
///     .with_intensity(0.8);
/// assert!(sun.direction().y < 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    /// Where the light comes from. Only its direction from the origin matters.
    pub position: Vec3,
    /// The color of the light (RGBA, each component 0.0-1.0).
    pub color: Color,
    /// The intensity multiplier for the light.
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 10.0, 7.0),
            color: color::WHITE,
            intensity: 0.8,
        }
    }
}

impl Light {
    /// Creates a white directional light placed at `position`.
    pub fn directional(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Sets the light color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the light intensity.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Unit vector along which the light travels.
    ///
    /// A light placed at the origin shines straight down.
    pub fn direction(&self) -> Vec3 {
        (-self.position).try_normalize().unwrap_or(-Vec3::Y)
    }
}

/// Every light of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Lighting {
    /// Ambient light color, added uniformly to every surface.
    pub ambient: Color,
    /// The directional light.
    pub sun: Light,
    /// Specular exponent of the block material.
    pub shininess: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

impl Lighting {
    /// Builds the lighting described by `options`.
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            ambient: color::from_hex(options.ambient),
            sun: Light::directional(Vec3::from_array(options.position))
                .with_color(color::from_hex(options.directional_color))
                .with_intensity(options.intensity),
            shininess: options.shininess,
        }
    }
}
