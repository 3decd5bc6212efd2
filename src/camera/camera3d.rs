use crate::event::WindowEvent;
use crate::picking;
use glamx::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

/// Trait that all camera implementations must implement.
///
/// Cameras control the viewpoint from which the scene is rendered and picked. The
/// projection follows the wgpu conventions: right-handed view space and a `[0, 1]`
/// depth range in normalized device coordinates.
pub trait Camera3d {
    // ==================
    // Event handling
    // ==================

    /// Handles window events to update camera state.
    ///
    /// This is called for each window event (mouse, keyboard, resize) before it reaches
    /// the rest of the application.
    fn handle_event(&mut self, event: &WindowEvent);

    // ==================
    // Transformation-related methods
    // ==================

    /// Returns the camera's position in world space.
    fn eye(&self) -> Vec3;

    /// Returns the point the camera looks at.
    fn target(&self) -> Vec3;

    /// Returns the combined projection and view transformation matrix.
    ///
    /// This matrix transforms points from world coordinates to normalized device coordinates.
    fn transformation(&self) -> Mat4;

    /// Returns the inverse of [`transformation()`](Self::transformation).
    fn inverse_transformation(&self) -> Mat4;

    /// Returns the near and far clipping plane distances.
    fn clip_planes(&self) -> (f32, f32);

    // ==================
    // Update
    // ==================

    /// Sets the size in pixels of the surface the camera renders to.
    ///
    /// The projection aspect ratio is derived from it.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Advances the camera by `dt` seconds.
    ///
    /// This is called once at the beginning of each frame, before rendering.
    fn update(&mut self, dt: f32);

    /// Projects a 3D point in world coordinates to 2D screen coordinates.
    ///
    /// # Returns
    /// The position in pixels, with the origin at the top-left corner of a viewport of
    /// size `size`.
    fn project(&self, world_coord: Vec3, size: Vec2) -> Vec2 {
        let h_normalized_coord = self.transformation() * world_coord.extend(1.0);
        let normalized_coord = h_normalized_coord.xyz() / h_normalized_coord.w;

        Vec2::new(
            (1.0 + normalized_coord.x) * size.x / 2.0,
            (1.0 - normalized_coord.y) * size.y / 2.0,
        )
    }

    /// Unprojects a 2D screen point to a 3D ray in world space.
    ///
    /// # Arguments
    /// * `window_coord` - The 2D point in screen coordinates (origin at top-left)
    /// * `size` - The size of the screen/viewport in pixels
    ///
    /// # Returns
    /// A tuple `(origin, direction)` where `origin` lies on the near plane and
    /// `direction` is normalized, or `None` if `size` is degenerate.
    fn unproject(&self, window_coord: Vec2, size: Vec2) -> Option<(Vec3, Vec3)> {
        let normalized_coord = picking::screen_to_ndc(window_coord, size)?;

        let normalized_begin = Vec4::new(normalized_coord.x, normalized_coord.y, 0.0, 1.0);
        let normalized_end = Vec4::new(normalized_coord.x, normalized_coord.y, 1.0, 1.0);

        let cam = self.inverse_transformation();

        let h_unprojected_begin = cam * normalized_begin;
        let h_unprojected_end = cam * normalized_end;

        let unprojected_begin = h_unprojected_begin.xyz() / h_unprojected_begin.w;
        let unprojected_end = h_unprojected_end.xyz() / h_unprojected_end.w;

        Some((
            unprojected_begin,
            (unprojected_end - unprojected_begin).normalize(),
        ))
    }
}
