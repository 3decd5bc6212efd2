use super::RenderMesh;
use glamx::Vec3;

/// Generates a unit cuboid mesh.
///
/// The cube is centered at the origin with dimensions 1x1x1. Each face has its own four
/// vertices so that normals stay flat; triangles are counter-clockwise when seen from
/// outside.
pub fn unit_cuboid() -> RenderMesh {
    // (normal, u, v) with u × v = normal.
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (-Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, Vec3::Y, Vec3::X),
    ];

    let mut coords = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(12);

    for (normal, u, v) in faces {
        let base = coords.len() as u32;

        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            coords.push(normal * 0.5 + u * su + v * sv);
            normals.push(normal);
        }

        indices.push([base, base + 1, base + 2]);
        indices.push([base, base + 2, base + 3]);
    }

    RenderMesh::new(coords, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cuboid_layout() {
        let mesh = unit_cuboid();
        assert_eq!(mesh.coords.len(), 24);
        assert_eq!(mesh.num_triangles(), 12);
        assert_eq!(mesh.flat_indices().len(), 36);

        for c in &mesh.coords {
            assert_eq!(c.abs(), Vec3::splat(0.5));
        }
    }

    #[test]
    fn triangles_face_outward() {
        let mesh = unit_cuboid();

        for [a, b, c] in &mesh.indices {
            let (a, b, c) = (*a as usize, *b as usize, *c as usize);
            let face_normal = (mesh.coords[b] - mesh.coords[a]).cross(mesh.coords[c] - mesh.coords[a]);
            assert!(face_normal.dot(mesh.normals[a]) > 0.0);
            assert!(mesh.coords[a].dot(mesh.normals[a]) > 0.0);
        }
    }
}
