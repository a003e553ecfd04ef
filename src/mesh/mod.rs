//! Convex polygon meshes and render output
//!
//! [`Polyhedron`] is the editable mesh that cuts operate on. [`MeshData`] is the
//! engine-agnostic triangle soup produced from it for rendering.

mod bisect;
mod icosphere;

pub use bisect::PLANE_EPSILON;

use glam::{DAffine3, DVec3};

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
///
/// Faces are flat shaded, so every triangle owns its vertices.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions (3D coordinates)
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals (flat face normal)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append another mesh, offsetting its indices
    pub fn append(&mut self, other: &MeshData) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }
}

/// Indexed polygon mesh
///
/// Faces list vertex indices counter-clockwise when seen from outside.
/// Meshes built by this crate are convex and closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<DVec3>,
    faces: Vec<Vec<u32>>,
}

impl Polyhedron {
    /// Create a polyhedron from raw vertices and faces
    pub fn new(vertices: Vec<DVec3>, faces: Vec<Vec<u32>>) -> Self {
        Self { vertices, faces }
    }

    /// Vertex positions
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Faces as vertex index loops
    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Get the number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the polyhedron has no faces
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Average of all vertices, or zero for an empty mesh
    pub fn centroid(&self) -> DVec3 {
        if self.vertices.is_empty() {
            return DVec3::ZERO;
        }
        self.vertices.iter().copied().sum::<DVec3>() / self.vertices.len() as f64
    }

    /// Enclosed volume (positive for outward-facing closed meshes)
    pub fn volume(&self) -> f64 {
        let mut six_volume = 0.0;
        for face in &self.faces {
            let Some((&first, rest)) = face.split_first() else {
                continue;
            };
            let v0 = self.vertices[first as usize];
            for pair in rest.windows(2) {
                let v1 = self.vertices[pair[0] as usize];
                let v2 = self.vertices[pair[1] as usize];
                six_volume += v0.dot(v1.cross(v2));
            }
        }
        six_volume / 6.0
    }

    /// Unit normal of a face (Newell's method), zero for degenerate faces
    pub fn face_normal(&self, face: usize) -> DVec3 {
        let Some(indices) = self.faces.get(face) else {
            return DVec3::ZERO;
        };
        let mut normal = DVec3::ZERO;
        for (i, &a) in indices.iter().enumerate() {
            let b = indices[(i + 1) % indices.len()];
            let current = self.vertices[a as usize];
            let next = self.vertices[b as usize];
            normal += DVec3::new(
                (current.y - next.y) * (current.z + next.z),
                (current.z - next.z) * (current.x + next.x),
                (current.x - next.x) * (current.y + next.y),
            );
        }
        normal.normalize_or_zero()
    }

    /// Minimum and maximum signed distance of the vertices to a plane
    ///
    /// Returns `None` for a mesh without vertices.
    pub fn signed_distance_range(&self, point: DVec3, normal: DVec3) -> Option<(f64, f64)> {
        self.vertices
            .iter()
            .map(|v| (*v - point).dot(normal))
            .fold(None, |range, d| match range {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }

    /// Apply a transform to every vertex
    pub fn transformed(&self, matrix: &DAffine3) -> Polyhedron {
        Polyhedron {
            vertices: self
                .vertices
                .iter()
                .map(|v| matrix.transform_point3(*v))
                .collect(),
            faces: self.faces.clone(),
        }
    }

    /// Triangulate into flat-shaded render data after applying `matrix`
    pub fn to_mesh_data(&self, matrix: &DAffine3) -> MeshData {
        let world = self.transformed(matrix);
        let mut mesh = MeshData::default();
        for (face_idx, face) in world.faces.iter().enumerate() {
            if face.len() < 3 {
                continue;
            }
            let normal = world.face_normal(face_idx);
            let corners: Vec<DVec3> = face.iter().map(|&i| world.vertices[i as usize]).collect();
            triangulate_face(&corners, normal, &mut mesh);
        }
        mesh
    }
}

/// Triangulate a single convex face as a triangle fan
fn triangulate_face(corners: &[DVec3], normal: DVec3, mesh: &mut MeshData) {
    let base_idx = mesh.positions.len() as u32;
    let normal = normal.as_vec3();

    for corner in corners {
        let corner = corner.as_vec3();
        mesh.positions.push([corner.x, corner.y, corner.z]);
        mesh.normals.push([normal.x, normal.y, normal.z]);
    }

    // Fan around the first corner
    for i in 1..corners.len() as u32 - 1 {
        mesh.indices.push(base_idx);
        mesh.indices.push(base_idx + i);
        mesh.indices.push(base_idx + i + 1);
    }
}
