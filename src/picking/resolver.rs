use crate::camera::Camera3d;
use crate::picking::Ray;
use crate::scene::SceneObject;
use glamx::Vec2;

/// Converts a window position in pixels (origin at the top-left corner, y pointing down)
/// into normalized device coordinates in `[-1, 1]` (y pointing up).
///
/// Returns `None` for a degenerate viewport.
pub fn screen_to_ndc(screen: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }

    Some(Vec2::new(
        2.0 * screen.x / viewport.x - 1.0,
        1.0 - 2.0 * screen.y / viewport.y,
    ))
}

/// An object hit by a pick ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickHit<'a> {
    /// The object that was hit.
    pub object: &'a SceneObject,
    /// Distance from the camera eye to the hit point.
    pub toi: f32,
}

/// Casts `ray` against every object and returns the nearest hit.
///
/// When two hits are exactly as far, the object registered first wins.
pub fn cast_ray<'a>(ray: &Ray, objects: &'a [SceneObject]) -> Option<PickHit<'a>> {
    let mut best: Option<PickHit<'a>> = None;

    for object in objects {
        if let Some(toi) = object.aabb().cast_ray(ray) {
            if best.map_or(true, |b| toi < b.toi) {
                best = Some(PickHit { object, toi });
            }
        }
    }

    best
}

/// Finds the object under the screen position `screen`, as seen from `camera`.
///
/// `screen` is in pixels with the origin at the top-left corner of a viewport of size
/// `viewport`. Returns `None` when the position shows only background. This is a pure
/// function of the camera and the object geometry.
pub fn resolve<'a>(
    screen: Vec2,
    viewport: Vec2,
    camera: &dyn Camera3d,
    objects: &'a [SceneObject],
) -> Option<&'a SceneObject> {
    let ray = Ray::from_camera(screen, viewport, camera)?;
    cast_ray(&ray, objects).map(|hit| hit.object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera3d;
    use crate::color::{BLUE, LIME, RED};
    use crate::scene::Registry;
    use glamx::Vec3;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn camera(eye: Vec3, at: Vec3) -> OrbitCamera3d {
        let mut camera = OrbitCamera3d::new(eye, at);
        camera.set_viewport(VIEWPORT.x as u32, VIEWPORT.y as u32);
        camera
    }

    fn center() -> Vec2 {
        VIEWPORT * 0.5
    }

    #[test]
    fn ndc_axes() {
        assert_eq!(screen_to_ndc(Vec2::ZERO, VIEWPORT), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(screen_to_ndc(VIEWPORT, VIEWPORT), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(screen_to_ndc(center(), VIEWPORT), Some(Vec2::ZERO));
        assert_eq!(screen_to_ndc(Vec2::ZERO, Vec2::new(0.0, 600.0)), None);
    }

    #[test]
    fn empty_space_resolves_to_nothing() {
        let mut registry = Registry::new();
        registry.create_object(Vec3::ZERO, RED, "redBlock").unwrap();
        let camera = camera(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);

        assert_eq!(resolve(Vec2::ZERO, VIEWPORT, &camera, registry.objects()), None);
        assert_eq!(resolve(VIEWPORT, VIEWPORT, &camera, registry.objects()), None);
    }

    #[test]
    fn empty_registry_resolves_to_nothing() {
        let camera = camera(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
        assert_eq!(resolve(center(), VIEWPORT, &camera, &[]), None);
    }

    #[test]
    fn single_object_on_the_ray() {
        let mut registry = Registry::new();
        registry.create_object(Vec3::ZERO, RED, "redBlock").unwrap();
        registry
            .create_object(Vec3::new(2.1, 0.0, 0.0), LIME, "greenBlock")
            .unwrap();
        let camera = camera(Vec3::new(2.1, 0.0, 10.0), Vec3::new(2.1, 0.0, 0.0));

        let hit = resolve(center(), VIEWPORT, &camera, registry.objects()).unwrap();
        assert_eq!(hit.name(), "greenBlock");
    }

    #[test]
    fn nearest_of_two_overlapping_objects_wins() {
        let mut registry = Registry::new();
        // Registered far-first so that insertion order cannot explain the result.
        registry
            .create_object(Vec3::new(0.0, 0.0, -5.0), BLUE, "far")
            .unwrap();
        registry.create_object(Vec3::ZERO, RED, "near").unwrap();
        let camera = camera(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        let hit = resolve(center(), VIEWPORT, &camera, registry.objects()).unwrap();
        assert_eq!(hit.name(), "near");

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let hit = cast_ray(&ray, registry.objects()).unwrap();
        assert!((hit.toi - 9.0).abs() < 1.0e-4);
    }

    #[test]
    fn equally_near_objects_resolve_to_the_first_registered() {
        let mut registry = Registry::new();
        registry.create_object(Vec3::ZERO, RED, "first").unwrap();
        registry.create_object(Vec3::ZERO, BLUE, "second").unwrap();
        let camera = camera(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);

        let hit = resolve(center(), VIEWPORT, &camera, registry.objects()).unwrap();
        assert_eq!(hit.name(), "first");
    }

    #[test]
    fn off_center_click_reaches_a_side_block() {
        let mut registry = Registry::new();
        registry.create_object(Vec3::ZERO, RED, "redBlock").unwrap();
        registry
            .create_object(Vec3::new(2.1, 0.0, 0.0), LIME, "greenBlock")
            .unwrap();
        let camera = camera(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        let screen = camera.project(Vec3::new(2.1, 0.0, 1.0), VIEWPORT);
        let hit = resolve(screen, VIEWPORT, &camera, registry.objects()).unwrap();
        assert_eq!(hit.name(), "greenBlock");
    }
}
