//! Demo settings with TOML file support.
//!
//! Every section uses `#[serde(default)]`, so a file only needs to list what it
//! overrides. Colors are written as hexadecimal integers, e.g. `color = 0xff0000`.

use crate::color::{self, Color};
use crate::error::OptionsError;
use glamx::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

/// Environment variable naming the options file read by [`DemoOptions::from_env`].
pub const OPTIONS_ENV_VAR: &str = "DISASSEMBLY_DEMO_OPTIONS";

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoOptions {
    /// Display color of removed blocks.
    pub removed_color: u32,
    /// Window title, size and clear color.
    pub window: WindowOptions,
    /// Projection and orbit controls.
    pub camera: CameraOptions,
    /// Ambient and directional light.
    pub lighting: LightingOptions,
    /// The clickable blocks, created in this order.
    pub blocks: Vec<BlockOptions>,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            removed_color: color::to_hex(color::REMOVED_COLOR),
            window: WindowOptions::default(),
            camera: CameraOptions::default(),
            lighting: LightingOptions::default(),
            blocks: vec![
                BlockOptions::new("redBlock", [0.0, 0.0, 0.0], 0xff0000),
                BlockOptions::new("greenBlock", [2.1, 0.0, 0.0], 0x00ff00),
                BlockOptions::new("blueBlock", [0.0, 2.1, 0.0], 0x0000ff),
            ],
        }
    }
}

impl DemoOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse options from TOML text, then [`validate`](Self::validate) them.
    pub fn parse(content: &str) -> Result<Self, OptionsError> {
        let options: Self = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects values that would break the projection, the orbit controls or the blocks.
    ///
    /// Non-finite numbers are always rejected, including `nan` and `inf` which TOML accepts.
    pub fn validate(&self) -> Result<(), OptionsError> {
        self.window.validate()?;
        self.camera.validate()?;
        self.lighting.validate()?;

        for block in &self.blocks {
            block.validate()?;
        }

        Ok(())
    }

    /// Load the file named by [`OPTIONS_ENV_VAR`], or the defaults if it is unset.
    pub fn from_env() -> Result<Self, OptionsError> {
        match std::env::var_os(OPTIONS_ENV_VAR) {
            Some(path) => {
                let path = Path::new(&path);
                log::info!("Loading options from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Serialize to pretty-printed TOML.
    pub fn to_toml(&self) -> Result<String, OptionsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Display color of removed blocks.
    pub fn removed_color(&self) -> Color {
        color::from_hex(self.removed_color)
    }
}

/// Window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Clear color.
    pub background: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Disassembly demo".to_owned(),
            width: 1024,
            height: 768,
            background: color::to_hex(color::LIGHT_BLUE),
        }
    }
}

impl WindowOptions {
    pub fn background(&self) -> Color {
        color::from_hex(self.background)
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        Ok(())
    }
}

/// Camera projection and orbit control settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view, in degrees.
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per 60 Hz frame.
    pub damping_factor: f32,
    /// Polar angle limits in radians, measured from the up axis.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            eye: [0.0, 5.0, 10.0],
            target: [0.0, 0.0, 0.0],
            enable_damping: true,
            damping_factor: 0.25,
            min_polar_angle: 0.0,
            max_polar_angle: FRAC_PI_2,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }
}

impl CameraOptions {
    fn validate(&self) -> Result<(), OptionsError> {
        let eye = Vec3::from_array(self.eye);
        let target = Vec3::from_array(self.target);

        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.znear > 0.0 && self.znear.is_finite()) {
            return Err(invalid(format!("camera.znear must be positive, got {}", self.znear)));
        }
        if !(self.zfar > self.znear && self.zfar.is_finite()) {
            return Err(invalid(format!(
                "camera.zfar must be greater than znear ({}), got {}",
                self.znear, self.zfar
            )));
        }
        if !eye.is_finite() || !target.is_finite() {
            return Err(invalid("camera.eye and camera.target must be finite".to_owned()));
        }
        if eye.distance(target) <= f32::EPSILON {
            return Err(invalid("camera.eye and camera.target must differ".to_owned()));
        }
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(invalid(format!(
                "camera.damping_factor must be in [0, 1], got {}",
                self.damping_factor
            )));
        }
        if !(self.min_polar_angle.is_finite()
            && self.max_polar_angle.is_finite()
            && self.min_polar_angle <= self.max_polar_angle)
        {
            return Err(invalid(format!(
                "camera.min_polar_angle ({}) must not exceed max_polar_angle ({})",
                self.min_polar_angle, self.max_polar_angle
            )));
        }

        for (name, speed) in [
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("pan_speed", self.pan_speed),
        ] {
            if !speed.is_finite() {
                return Err(invalid(format!("camera.{name} must be finite, got {speed}")));
            }
        }

        Ok(())
    }
}

/// Lighting parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingOptions {
    pub ambient: u32,
    pub directional_color: u32,
    pub intensity: f32,
    /// Position of the directional light; it shines toward the origin.
    pub position: [f32; 3],
    pub shininess: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0x404040,
            directional_color: 0xffffff,
            intensity: 0.8,
            position: [5.0, 10.0, 7.0],
            shininess: 30.0,
        }
    }
}

impl LightingOptions {
    fn validate(&self) -> Result<(), OptionsError> {
        if !(self.intensity >= 0.0 && self.intensity.is_finite()) {
            return Err(invalid(format!(
                "lighting.intensity must be a non-negative number, got {}",
                self.intensity
            )));
        }
        if !(self.shininess >= 0.0 && self.shininess.is_finite()) {
            return Err(invalid(format!(
                "lighting.shininess must be a non-negative number, got {}",
                self.shininess
            )));
        }
        if !Vec3::from_array(self.position).is_finite() {
            return Err(invalid("lighting.position must be finite".to_owned()));
        }

        Ok(())
    }
}

/// One clickable block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockOptions {
    pub name: String,
    pub position: [f32; 3],
    pub color: u32,
    #[serde(default = "BlockOptions::default_size")]
    pub size: [f32; 3],
}

impl BlockOptions {
    pub fn new(name: &str, position: [f32; 3], color: u32) -> Self {
        Self {
            name: name.to_owned(),
            position,
            color,
            size: Self::default_size(),
        }
    }

    fn default_size() -> [f32; 3] {
        [2.0, 2.0, 2.0]
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if !Vec3::from_array(self.position).is_finite() {
            return Err(invalid(format!("block `{}` has a non-finite position", self.name)));
        }
        if !self.size.iter().all(|s| *s > 0.0 && s.is_finite()) {
            return Err(invalid(format!(
                "block `{}` must have a positive size, got {:?}",
                self.name, self.size
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> OptionsError {
    OptionsError::Invalid(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = DemoOptions::default();
        let toml_str = opts.to_toml().unwrap();
        let parsed = DemoOptions::parse(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
damping_factor = 0.1

[[blocks]]
name = 'lonely'
position = [1.0, 2.0, 3.0]
color = 0xffcc00
";
        let opts = DemoOptions::parse(toml_str).unwrap();
        assert_eq!(opts.camera.damping_factor, 0.1);
        assert_eq!(opts.camera.fov_degrees, 75.0);
        assert_eq!(opts.lighting.ambient, 0x404040);
        assert_eq!(opts.removed_color, 0x808080);
        assert_eq!(opts.blocks.len(), 1);
        assert_eq!(opts.blocks[0].size, [2.0, 2.0, 2.0]);
        assert_eq!(opts.blocks[0].color, 0xffcc00);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DemoOptions::parse("[camera]\nfov_degrees = 'wide'").unwrap_err();
        assert!(matches!(err, OptionsError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DemoOptions::load(Path::new("/nonexistent/disassembly.toml")).unwrap_err();
        assert!(matches!(err, OptionsError::Io { .. }));
    }

    fn assert_invalid(toml_str: &str, field: &str) {
        match DemoOptions::parse(toml_str) {
            Err(OptionsError::Invalid(message)) => {
                assert!(message.contains(field), "`{message}` should name `{field}`")
            }
            other => panic!("expected `{field}` to be rejected, got {other:?}"),
        }
    }

    #[test]
    fn default_options_are_valid() {
        DemoOptions::default().validate().unwrap();
    }

    #[test]
    fn nan_damping_is_rejected() {
        assert_invalid("[camera]\ndamping_factor = nan", "damping_factor");
        assert_invalid("[camera]\ndamping_factor = 1.5", "damping_factor");
    }

    #[test]
    fn non_positive_fov_is_rejected() {
        assert_invalid("[camera]\nfov_degrees = 0.0", "fov_degrees");
        assert_invalid("[camera]\nfov_degrees = -30.0", "fov_degrees");
        assert_invalid("[camera]\nfov_degrees = 180.0", "fov_degrees");
    }

    #[test]
    fn non_positive_znear_is_rejected() {
        assert_invalid("[camera]\nznear = 0.0", "znear");
        assert_invalid("[camera]\nznear = -1.0", "znear");
    }

    #[test]
    fn zfar_not_beyond_znear_is_rejected() {
        assert_invalid("[camera]\nznear = 10.0\nzfar = 10.0", "zfar");
        assert_invalid("[camera]\nzfar = inf", "zfar");
    }

    #[test]
    fn eye_on_the_target_is_rejected() {
        assert_invalid("[camera]\neye = [0.0, 0.0, 0.0]", "eye");
    }

    #[test]
    fn inverted_polar_limits_are_rejected() {
        assert_invalid(
            "[camera]\nmin_polar_angle = 1.0\nmax_polar_angle = 0.5",
            "polar_angle",
        );
    }

    #[test]
    fn non_finite_speed_is_rejected() {
        assert_invalid("[camera]\nzoom_speed = nan", "zoom_speed");
    }

    #[test]
    fn negative_light_is_rejected() {
        assert_invalid("[lighting]\nintensity = -0.5", "intensity");
        assert_invalid("[lighting]\nshininess = nan", "shininess");
    }

    #[test]
    fn empty_window_is_rejected() {
        assert_invalid("[window]\nwidth = 0", "window size");
    }

    #[test]
    fn flat_block_is_rejected() {
        let toml_str = r"
[[blocks]]
name = 'flat'
position = [0.0, 0.0, 0.0]
color = 0xff0000
size = [2.0, 0.0, 2.0]
";
        assert_invalid(toml_str, "flat");
    }

    #[test]
    fn default_scene_is_the_three_blocks() {
        let names: Vec<_> = DemoOptions::default()
            .blocks
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["redBlock", "greenBlock", "blueBlock"]);
    }
}
