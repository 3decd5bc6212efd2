use crate::camera::Camera3d;
use glamx::{Vec2, Vec3};

/// A half-line starting at `origin` and going along the unit vector `dir`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Starting point.
    pub origin: Vec3,
    /// Normalized direction.
    pub dir: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `dir`.
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }

    /// The point at distance `toi` along the ray.
    #[inline]
    pub fn point_at(&self, toi: f32) -> Vec3 {
        self.origin + self.dir * toi
    }

    /// The ray leaving the camera eye through the screen position `screen`, in pixels
    /// from the top-left corner of a viewport of size `viewport`.
    ///
    /// The direction is the camera's own [`unproject`](Camera3d::unproject) of `screen`.
    /// Returns `None` for a degenerate viewport.
    pub fn from_camera(screen: Vec2, viewport: Vec2, camera: &dyn Camera3d) -> Option<Self> {
        let (_, dir) = camera.unproject(screen, viewport)?;
        Some(Ray::new(camera.eye(), dir))
    }
}

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Smallest corner.
    pub mins: Vec3,
    /// Largest corner.
    pub maxs: Vec3,
}

impl Aabb {
    /// The box spanned by two opposite corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            mins: a.min(b),
            maxs: a.max(b),
        }
    }

    /// The box of full size `extents` centered on `center`.
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        let half = extents.abs() * 0.5;
        Self {
            mins: center - half,
            maxs: center + half,
        }
    }

    /// Whether `point` lies inside or on the boundary of the box.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.mins).all() && point.cmple(self.maxs).all()
    }

    /// Distance along `ray` to the first point of the box, if the ray hits it.
    ///
    /// A ray starting inside the box hits at distance `0`. Hits behind the origin are
    /// ignored.
    pub fn cast_ray(&self, ray: &Ray) -> Option<f32> {
        let mut tmin = 0.0f32;
        let mut tmax = f32::INFINITY;

        for i in 0..3 {
            let origin = ray.origin[i];
            let dir = ray.dir[i];

            if dir.abs() < f32::EPSILON {
                // Parallel to the slab: must already be between its planes.
                if origin < self.mins[i] || origin > self.maxs[i] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t1 = (self.mins[i] - origin) * inv;
            let mut t2 = (self.maxs[i] - origin) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            tmin = tmin.max(t1);
            tmax = tmax.min(t2);

            if tmin > tmax {
                return None;
            }
        }

        Some(tmin)
    }
}
