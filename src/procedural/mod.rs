//! Procedural generation of the block mesh.

pub use self::cuboid::unit_cuboid;
pub use self::render_mesh::RenderMesh;

mod cuboid;
mod render_mesh;
