//! Icosphere primitive
//!
//! Subdivision levels follow the usual modeling-tool convention: level 1 is the
//! bare icosahedron, each further level splits every triangle into four and
//! pushes the new midpoints out onto the sphere.

use std::collections::HashMap;

use glam::DVec3;

use super::Polyhedron;

/// Icosahedron faces, counter-clockwise from outside
const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    // 5 faces around vertex 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    // 5 adjacent faces
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // 5 faces around vertex 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    // 5 adjacent faces
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

impl Polyhedron {
    /// Build an icosphere of the given subdivision level and radius
    ///
    /// Level 0 is treated as level 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use crystal_genesis::mesh::Polyhedron;
    ///
    /// let ico = Polyhedron::icosphere(1, 1.0);
    /// assert_eq!(ico.vertex_count(), 12);
    /// assert_eq!(ico.face_count(), 20);
    /// ```
    pub fn icosphere(subdivisions: u32, radius: f64) -> Polyhedron {
        // Golden ratio
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let len = (1.0 + phi * phi).sqrt();
        let a = 1.0 / len;
        let b = phi / len;

        let mut vertices = vec![
            DVec3::new(-a, b, 0.0),
            DVec3::new(a, b, 0.0),
            DVec3::new(-a, -b, 0.0),
            DVec3::new(a, -b, 0.0),
            DVec3::new(0.0, -a, b),
            DVec3::new(0.0, a, b),
            DVec3::new(0.0, -a, -b),
            DVec3::new(0.0, a, -b),
            DVec3::new(b, 0.0, -a),
            DVec3::new(b, 0.0, a),
            DVec3::new(-b, 0.0, -a),
            DVec3::new(-b, 0.0, a),
        ];
        let mut faces: Vec<[u32; 3]> = ICOSAHEDRON_FACES.to_vec();

        for _ in 1..subdivisions.max(1) {
            let mut new_faces = Vec::with_capacity(faces.len() * 4);
            let mut midpoint_cache: HashMap<(u32, u32), u32> = HashMap::new();

            let mut midpoint = |v1: u32, v2: u32, verts: &mut Vec<DVec3>| -> u32 {
                let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };
                if let Some(&idx) = midpoint_cache.get(&key) {
                    return idx;
                }
                let mid = ((verts[v1 as usize] + verts[v2 as usize]) / 2.0).normalize();
                let idx = verts.len() as u32;
                verts.push(mid);
                midpoint_cache.insert(key, idx);
                idx
            };

            for &[a, b, c] in &faces {
                let ab = midpoint(a, b, &mut vertices);
                let bc = midpoint(b, c, &mut vertices);
                let ca = midpoint(c, a, &mut vertices);

                new_faces.push([a, ab, ca]);
                new_faces.push([b, bc, ab]);
                new_faces.push([c, ca, bc]);
                new_faces.push([ab, bc, ca]);
            }

            faces = new_faces;
        }

        Polyhedron::new(
            vertices.into_iter().map(|v| v * radius).collect(),
            faces.into_iter().map(|f| f.to_vec()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_counts() {
        let ico = Polyhedron::icosphere(1, 1.0);
        assert_eq!(ico.vertex_count(), 12);
        assert_eq!(ico.face_count(), 20);
        // Level 0 falls back to the icosahedron
        assert_eq!(Polyhedron::icosphere(0, 1.0), ico);
    }

    #[test]
    fn test_subdivision_counts() {
        let ico = Polyhedron::icosphere(2, 1.0);
        assert_eq!(ico.vertex_count(), 42);
        assert_eq!(ico.face_count(), 80);

        let ico = Polyhedron::icosphere(3, 1.0);
        assert_eq!(ico.vertex_count(), 162);
        assert_eq!(ico.face_count(), 320);
    }

    #[test]
    fn test_vertices_on_sphere() {
        let radius = 2.5;
        let ico = Polyhedron::icosphere(3, radius);
        for v in ico.vertices() {
            assert!(
                (v.length() - radius).abs() < 1e-12,
                "Vertex distance {} should be {}",
                v.length(),
                radius
            );
        }
    }

    #[test]
    fn test_faces_point_outward() {
        let ico = Polyhedron::icosphere(2, 1.0);
        for (i, face) in ico.faces().iter().enumerate() {
            let center: DVec3 =
                face.iter().map(|&v| ico.vertices()[v as usize]).sum::<DVec3>() / 3.0;
            assert!(ico.face_normal(i).dot(center) > 0.0, "face {} points inward", i);
        }
        assert!(ico.volume() > 0.0);
    }

    #[test]
    fn test_icosahedron_volume() {
        // Regular icosahedron with circumradius 1 has edge length 1.0515...
        let ico = Polyhedron::icosphere(1, 1.0);
        let edge = ico.vertices()[0].distance(ico.vertices()[1]);
        let expected = 5.0 * (3.0 + 5.0_f64.sqrt()) / 12.0 * edge.powi(3);
        assert!((ico.volume() - expected).abs() < 1e-12);
    }
}
