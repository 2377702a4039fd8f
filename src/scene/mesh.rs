//! Static geometry for the 3D demos
//!
//! Faces are given as corner lists and re-wound on the way in so that every
//! triangle is counter-clockwise seen from outside; the mesh pipeline culls
//! back faces.

use glam::Vec3;

use crate::renderer::MeshVertex;

/// Face colours of the pyramid: front, right, back, left, base
pub const PYRAMID_FACE_COLORS: [[f32; 3]; 5] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
];

/// Corner colours of the spinning cube, indexed like `CUBE_CORNERS`
const CUBE_CORNER_COLORS: [[f32; 3]; 8] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 0.5],
    [0.5, 0.5, 0.5],
];

/// Unit cube corners: front (z = -1) TL, TR, BR, BL then back (z = +1)
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
];

/// Corner indices per cube face (front, top, back, bottom, right, left)
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [0, 1, 5, 4],
    [4, 5, 6, 7],
    [3, 2, 6, 7],
    [1, 2, 6, 5],
    [0, 3, 7, 4],
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Append a flat convex polygon. `inside` is any point behind the face;
    /// the corners are reversed if needed so the face points away from it.
    fn push_face(&mut self, corners: &[Vec3], colors: &[[f32; 3]], inside: Vec3) {
        debug_assert!(corners.len() >= 3 && corners.len() == colors.len());

        let mut order: Vec<usize> = (0..corners.len()).collect();
        let mut normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[0])
            .normalize_or_zero();
        if normal.dot(corners[0] - inside) < 0.0 {
            order.reverse();
            normal = -normal;
        }

        let base = self.vertices.len() as u16;
        for &i in &order {
            self.vertices.push(MeshVertex::new(
                corners[i].to_array(),
                normal.to_array(),
                colors[i],
            ));
        }
        for i in 1..corners.len() as u16 - 1 {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corners of each triangle
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(self.vertices[i as usize].position))
        })
    }
}

/// 2x2x2 cube with a colour per corner, interpolated across faces
pub fn colored_cube() -> MeshData {
    let mut mesh = MeshData::default();
    for face in CUBE_FACES {
        let corners = face.map(|i| Vec3::from_array(CUBE_CORNERS[i]));
        let colors = face.map(|i| CUBE_CORNER_COLORS[i]);
        mesh.push_face(&corners, &colors, Vec3::ZERO);
    }
    mesh
}

/// Square pyramid with apex at y = 1 and base at y = -1, one colour per face
pub fn pyramid() -> MeshData {
    let apex = Vec3::new(0.0, 1.0, 0.0);
    let front_left = Vec3::new(-1.0, -1.0, 1.0);
    let front_right = Vec3::new(1.0, -1.0, 1.0);
    let back_right = Vec3::new(1.0, -1.0, -1.0);
    let back_left = Vec3::new(-1.0, -1.0, -1.0);
    let inside = Vec3::new(0.0, -0.5, 0.0);

    let sides = [
        [apex, front_left, front_right],
        [apex, front_right, back_right],
        [apex, back_right, back_left],
        [apex, back_left, front_left],
    ];

    let mut mesh = MeshData::default();
    for (corners, color) in sides.iter().zip(PYRAMID_FACE_COLORS) {
        mesh.push_face(corners, &[color; 3], inside);
    }
    mesh.push_face(
        &[front_left, back_left, back_right, front_right],
        &[PYRAMID_FACE_COLORS[4]; 4],
        inside,
    );
    mesh
}

/// Axis-aligned box centred on the origin in one colour
pub fn solid_box(size: Vec3, color: [f32; 3]) -> MeshData {
    let half = size * 0.5;
    let mut mesh = MeshData::default();
    for face in CUBE_FACES {
        let corners = face.map(|i| Vec3::from_array(CUBE_CORNERS[i]) * half);
        mesh.push_face(&corners, &[color; 4], Vec3::ZERO);
    }
    mesh
}

/// Horizontal `width x depth` plane at y = 0 facing up
pub fn plane(width: f32, depth: f32, color: [f32; 3]) -> MeshData {
    let (hw, hd) = (width * 0.5, depth * 0.5);
    let mut mesh = MeshData::default();
    mesh.push_face(
        &[
            Vec3::new(-hw, 0.0, -hd),
            Vec3::new(hw, 0.0, -hd),
            Vec3::new(hw, 0.0, hd),
            Vec3::new(-hw, 0.0, hd),
        ],
        &[color; 4],
        Vec3::NEG_Y,
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every triangle's CCW normal points away from `centre`
    fn assert_outward(mesh: &MeshData, centre: Vec3) {
        for [a, b, c] in mesh.triangles() {
            let normal = (b - a).cross(c - a);
            let mid = (a + b + c) / 3.0;
            assert!(
                normal.dot(mid - centre) > 0.0,
                "inward triangle {:?} {:?} {:?}",
                a,
                b,
                c
            );
        }
    }

    #[test]
    fn test_cube_winding_and_counts() {
        let mesh = colored_cube();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn test_cube_keeps_corner_colours() {
        let mesh = colored_cube();
        let front_top_left = mesh
            .vertices
            .iter()
            .find(|v| v.position == [-1.0, 1.0, -1.0])
            .unwrap();
        assert_eq!(front_top_left.color, [1.0, 0.0, 0.0]);
        let back_bottom_left = mesh
            .vertices
            .iter()
            .find(|v| v.position == [-1.0, -1.0, 1.0])
            .unwrap();
        assert_eq!(back_bottom_left.color, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_pyramid_faces() {
        let mesh = pyramid();
        assert_eq!(mesh.triangle_count(), 6);
        assert_outward(&mesh, Vec3::new(0.0, -0.5, 0.0));

        // Base triangles are magenta and face down
        for v in &mesh.vertices[12..] {
            assert_eq!(v.color, PYRAMID_FACE_COLORS[4]);
            assert_eq!(v.normal, [0.0, -1.0, 0.0]);
        }
        // Front face is red and leans towards +z
        assert_eq!(mesh.vertices[0].color, [1.0, 0.0, 0.0]);
        assert!(mesh.vertices[0].normal[2] > 0.0);
    }

    #[test]
    fn test_solid_box_size() {
        let mesh = solid_box(Vec3::splat(0.65), [0.0, 0.5, 1.0]);
        assert_outward(&mesh, Vec3::ZERO);
        for v in &mesh.vertices {
            for c in v.position {
                assert!((c.abs() - 0.325).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_plane_faces_up() {
        let mesh = plane(10.0, 10.0, [0.8; 3]);
        assert_eq!(mesh.triangle_count(), 2);
        for [a, b, c] in mesh.triangles() {
            assert!((b - a).cross(c - a).y > 0.0);
        }
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }
}
