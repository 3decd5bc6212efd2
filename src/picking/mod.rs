//! Screen-space picking: which block lies under the cursor.

pub use self::ray::{Aabb, Ray};
pub use self::resolver::{cast_ray, resolve, screen_to_ndc, PickHit};

mod ray;
mod resolver;
