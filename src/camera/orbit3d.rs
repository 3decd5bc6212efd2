use crate::camera::Camera3d;
use crate::event::{Action, Key, MouseButton, WindowEvent};
use crate::options::CameraOptions;
use glamx::{Mat4, Vec2, Vec3};
use std::f32;

/// Keeps the camera off the exact poles, where the view matrix degenerates.
const POLE_MARGIN: f32 = 0.01;
/// The frame rate the damping factor is expressed for.
const DAMPING_REFERENCE_FPS: f32 = 60.0;
/// Base of the exponential zoom applied per wheel line.
const ZOOM_BASE: f32 = 0.95;
const MIN_DISTANCE: f32 = 0.1;

/// Orbit camera turning around a target point.
///
/// # Default Controls
/// - **Left mouse + drag**: Rotate around the target
/// - **Right mouse + drag**: Pan the target on the horizontal plane
/// - **Mouse wheel**: Zoom in/out
/// - **Enter**: Reset to the initial view
///
/// Motion is eased: drags accumulate a pending motion that
/// [`update`](Camera3d::update) applies progressively, a fixed fraction per frame. The
/// polar angle is clamped so that the camera never goes below the target by default.
///
/// # Example
/// ```
/// # use disassembly_demo::prelude::*;
/// let mut camera = OrbitCamera3d::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
/// camera.set_viewport(800, 600);
/// assert!((camera.eye() - Vec3::new(0.0, 5.0, 10.0)).length() < 1.0e-4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera3d {
    target: Vec3,
    dist: f32,
    /// Azimuth around the Y axis, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,

    pending_rotation: Vec2,
    pending_pan: Vec3,

    enable_damping: bool,
    damping_factor: f32,
    min_polar_angle: f32,
    max_polar_angle: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    pan_speed: f32,
    rotate_button: Option<MouseButton>,
    drag_button: Option<MouseButton>,
    reset_key: Option<Key>,

    rotating: bool,
    panning: bool,
    last_cursor_pos: Vec2,
    viewport: Vec2,

    initial_eye: Vec3,
    initial_target: Vec3,

    fov: f32,
    znear: f32,
    zfar: f32,
    proj: Mat4,
    view: Mat4,
    proj_view: Mat4,
    inverse_proj_view: Mat4,
}

impl OrbitCamera3d {
    /// Creates a new orbit camera with the default settings.
    ///
    /// Default frustum: 75° vertical field of view, near plane at 0.1, far plane at 1000.
    /// Damping is enabled with a factor of 0.25 and the polar angle is limited to
    /// `[0, π/2]`.
    pub fn new(eye: Vec3, at: Vec3) -> OrbitCamera3d {
        let mut options = CameraOptions::default();
        options.eye = eye.to_array();
        options.target = at.to_array();
        OrbitCamera3d::from_options(&options)
    }

    /// Creates an orbit camera configured by `options`.
    pub fn from_options(options: &CameraOptions) -> OrbitCamera3d {
        let eye = Vec3::from_array(options.eye);
        let at = Vec3::from_array(options.target);

        let mut res = OrbitCamera3d {
            target: at,
            dist: 1.0,
            theta: 0.0,
            phi: f32::consts::FRAC_PI_2,
            pending_rotation: Vec2::ZERO,
            pending_pan: Vec3::ZERO,
            enable_damping: options.enable_damping,
            damping_factor: options.damping_factor.clamp(0.0, 1.0),
            min_polar_angle: options.min_polar_angle,
            max_polar_angle: options.max_polar_angle,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            pan_speed: options.pan_speed,
            rotate_button: Some(MouseButton::Button1),
            drag_button: Some(MouseButton::Button2),
            reset_key: Some(Key::Return),
            rotating: false,
            panning: false,
            last_cursor_pos: Vec2::ZERO,
            viewport: Vec2::new(800.0, 600.0),
            initial_eye: eye,
            initial_target: at,
            fov: options.fov_degrees.to_radians(),
            znear: options.znear,
            zfar: options.zfar,
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            proj_view: Mat4::IDENTITY,
            inverse_proj_view: Mat4::IDENTITY,
        };

        res.look_at(eye, at);

        res
    }

    /// The point the camera orbits around.
    pub fn at(&self) -> Vec3 {
        self.target
    }

    /// Distance between the eye and the target.
    pub fn dist(&self) -> f32 {
        self.dist
    }

    /// Azimuth of the eye around the target, in radians.
    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    /// Angle between the up axis and the target-to-eye direction, in radians.
    pub fn polar_angle(&self) -> f32 {
        self.phi
    }

    /// Rotation (azimuth, polar) not applied yet by damping.
    pub fn pending_rotation(&self) -> Vec2 {
        self.pending_rotation
    }

    /// Enables or disables damping. Without damping, motions apply fully on the next update.
    pub fn set_damping(&mut self, enabled: bool) {
        self.enable_damping = enabled;
    }

    /// Sets the allowed range of the polar angle.
    pub fn set_polar_limits(&mut self, min: f32, max: f32) {
        self.min_polar_angle = min;
        self.max_polar_angle = max;
        self.update_restrictions();
        self.update_projviews();
    }

    /// The button used to rotate the camera.
    pub fn rotate_button(&self) -> Option<MouseButton> {
        self.rotate_button
    }

    /// Set the button used to rotate the camera.
    /// Use None to disable rotation.
    pub fn rebind_rotate_button(&mut self, new_button: Option<MouseButton>) {
        self.rotate_button = new_button;
        self.rotating = false;
    }

    /// The button used to pan the camera.
    pub fn drag_button(&self) -> Option<MouseButton> {
        self.drag_button
    }

    /// Set the button used to pan the camera.
    /// Use None to disable panning.
    pub fn rebind_drag_button(&mut self, new_button: Option<MouseButton>) {
        self.drag_button = new_button;
        self.panning = false;
    }

    /// The key used to reset the view.
    pub fn reset_key(&self) -> Option<Key> {
        self.reset_key
    }

    /// Set the key used to reset the view.
    pub fn rebind_reset_key(&mut self, new_key: Option<Key>) {
        self.reset_key = new_key;
    }

    /// Changes the orientation and position of the camera to look at the specified point.
    ///
    /// Pending motions are discarded.
    pub fn look_at(&mut self, eye: Vec3, at: Vec3) {
        let offset = eye - at;
        let dist = offset.length().max(MIN_DISTANCE);

        self.target = at;
        self.dist = dist;
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / dist).clamp(-1.0, 1.0).acos();
        self.pending_rotation = Vec2::ZERO;
        self.pending_pan = Vec3::ZERO;
        self.update_restrictions();
        self.update_projviews();
    }

    /// Goes back to the view the camera was created with.
    pub fn reset(&mut self) {
        self.look_at(self.initial_eye, self.initial_target);
    }

    fn update_restrictions(&mut self) {
        let min = self.min_polar_angle.max(POLE_MARGIN);
        let max = self.max_polar_angle.min(f32::consts::PI - POLE_MARGIN);
        self.phi = self.phi.clamp(min, max.max(min));
        self.dist = self.dist.max(MIN_DISTANCE);
    }

    #[doc(hidden)]
    pub fn handle_left_button_displacement(&mut self, dpos: Vec2) {
        let height = self.viewport.y.max(1.0);
        let per_pixel = 2.0 * f32::consts::PI / height * self.rotate_speed;

        self.pending_rotation -= dpos * per_pixel;
    }

    #[doc(hidden)]
    pub fn handle_right_button_displacement(&mut self, dpos: Vec2) {
        let height = self.viewport.y.max(1.0);
        let target_distance = self.dist * (self.fov / 2.0).tan();
        let scale = 2.0 * target_distance / height * self.pan_speed;

        let (sin, cos) = self.theta.sin_cos();
        let right = Vec3::new(cos, 0.0, -sin);
        let forward = Vec3::new(-sin, 0.0, -cos);

        self.pending_pan += -right * (dpos.x * scale) + forward * (dpos.y * scale);
    }

    #[doc(hidden)]
    pub fn handle_scroll(&mut self, yoff: f32) {
        self.dist *= ZOOM_BASE.powf(yoff * self.zoom_speed);
        self.update_restrictions();
        self.update_projviews();
    }

    fn update_projviews(&mut self) {
        self.view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        let aspect = self.viewport.x / self.viewport.y;
        self.proj = Mat4::perspective_rh(self.fov, aspect, self.znear, self.zfar);
        self.proj_view = self.proj * self.view;
        self.inverse_proj_view = self.proj_view.inverse();
    }
}

impl Camera3d for OrbitCamera3d {
    fn handle_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y) => {
                let curr_pos = Vec2::new(x as f32, y as f32);
                let dpos = curr_pos - self.last_cursor_pos;

                if self.rotating {
                    self.handle_left_button_displacement(dpos)
                }

                if self.panning {
                    self.handle_right_button_displacement(dpos)
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::MouseButton(button, action) => {
                let pressed = action == Action::Press;

                if Some(button) == self.rotate_button {
                    self.rotating = pressed;
                }

                if Some(button) == self.drag_button {
                    self.panning = pressed;
                }
            }
            WindowEvent::Scroll(_, off) => self.handle_scroll(off as f32),
            WindowEvent::Key(key, Action::Press) if Some(key) == self.reset_key => self.reset(),
            WindowEvent::FramebufferSize(w, h) => self.set_viewport(w, h),
            _ => {}
        }
    }

    fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();

        self.target + Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.dist
    }

    fn target(&self) -> Vec3 {
        self.target
    }

    fn transformation(&self) -> Mat4 {
        self.proj_view
    }

    fn inverse_transformation(&self) -> Mat4 {
        self.inverse_proj_view
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.viewport = Vec2::new(width as f32, height as f32);
        self.update_projviews();
    }

    fn update(&mut self, dt: f32) {
        let fraction = if self.enable_damping {
            1.0 - (1.0 - self.damping_factor).powf(dt.max(0.0) * DAMPING_REFERENCE_FPS)
        } else {
            1.0
        };

        self.theta += self.pending_rotation.x * fraction;
        self.phi += self.pending_rotation.y * fraction;
        self.target += self.pending_pan * fraction;

        self.pending_rotation *= 1.0 - fraction;
        self.pending_pan *= 1.0 - fraction;

        self.update_restrictions();
        self.update_projviews();
    }
}
