//! Planar bisection of convex polyhedra
//!
//! Every face is clipped against the plane (Sutherland-Hodgman), the requested
//! halves are kept and, when only one half survives, the opening is closed with
//! a cap polygon. Intersection points are cached per edge so neighbouring faces
//! share the exact same cut vertex.

use std::collections::HashMap;

use glam::DVec3;

use super::Polyhedron;

/// Vertices closer than this to the cut plane count as lying on it
pub const PLANE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Inner,
    On,
    Outer,
}

impl Side {
    fn of(distance: f64) -> Self {
        if distance < -PLANE_EPSILON {
            Side::Inner
        } else if distance > PLANE_EPSILON {
            Side::Outer
        } else {
            Side::On
        }
    }
}

/// Output vertex bookkeeping shared by all faces of one bisect
struct Remap<'a> {
    source: &'a Polyhedron,
    distances: &'a [f64],
    vertices: Vec<DVec3>,
    on_plane: Vec<bool>,
    kept: HashMap<u32, u32>,
    cuts: HashMap<(u32, u32), u32>,
}

impl<'a> Remap<'a> {
    fn vertex(&mut self, old: u32) -> u32 {
        if let Some(&idx) = self.kept.get(&old) {
            return idx;
        }
        let idx = self.vertices.len() as u32;
        self.vertices.push(self.source.vertices[old as usize]);
        self.on_plane
            .push(Side::of(self.distances[old as usize]) == Side::On);
        self.kept.insert(old, idx);
        idx
    }

    fn cut(&mut self, a: u32, b: u32) -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&idx) = self.cuts.get(&key) {
            return idx;
        }
        let (lo, hi) = key;
        let d_lo = self.distances[lo as usize];
        let d_hi = self.distances[hi as usize];
        let v_lo = self.source.vertices[lo as usize];
        let v_hi = self.source.vertices[hi as usize];
        let t = d_lo / (d_lo - d_hi);

        let idx = self.vertices.len() as u32;
        self.vertices.push(v_lo + (v_hi - v_lo) * t);
        self.on_plane.push(true);
        self.cuts.insert(key, idx);
        idx
    }

    /// Clip one face, keeping the part on `keep` (plus on-plane vertices)
    ///
    /// Output vertices are only created once the clipped face is accepted.
    fn clip(&mut self, face: &[u32], sides: &[Side], keep: Side) -> Option<Vec<u32>> {
        let mut corners = Vec::with_capacity(face.len() + 2);
        let mut has_strict = false;

        for i in 0..face.len() {
            let a = face[i];
            let b = face[(i + 1) % face.len()];
            let side_a = sides[a as usize];
            let side_b = sides[b as usize];

            if side_a != opposite(keep) {
                corners.push(Corner::Kept(a));
                has_strict |= side_a == keep;
            }
            let crosses = matches!(
                (side_a, side_b),
                (Side::Inner, Side::Outer) | (Side::Outer, Side::Inner)
            );
            if crosses {
                corners.push(Corner::Cut(a.min(b), a.max(b)));
            }
        }

        corners.dedup();
        if corners.len() > 1 && corners.first() == corners.last() {
            corners.pop();
        }
        if !has_strict || corners.len() < 3 {
            return None;
        }

        let polygon = corners
            .into_iter()
            .map(|corner| match corner {
                Corner::Kept(v) => self.vertex(v),
                Corner::Cut(a, b) => self.cut(a, b),
            })
            .collect();
        Some(polygon)
    }
}

/// Corner of a clipped face in source indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    Kept(u32),
    Cut(u32, u32),
}

fn opposite(side: Side) -> Side {
    match side {
        Side::Inner => Side::Outer,
        Side::Outer => Side::Inner,
        Side::On => Side::On,
    }
}

impl Polyhedron {
    /// Split the mesh by the plane through `point` with unit `normal`
    ///
    /// The inner half-space is `(x - point) · normal <= 0`. With `fill` set and
    /// exactly one half kept, the opening is closed by a cap facing away from
    /// the kept half. Applying the same cut twice changes nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use crystal_genesis::mesh::Polyhedron;
    /// use glam::DVec3;
    ///
    /// let ico = Polyhedron::icosphere(1, 1.0);
    /// let cut = ico.bisect(DVec3::new(0.0, 0.0, 0.3), DVec3::Z, true, true, false);
    ///
    /// let (_, highest) = cut.signed_distance_range(DVec3::ZERO, DVec3::Z).unwrap();
    /// assert!(highest <= 0.3 + 1e-9);
    /// assert!(cut.volume() < ico.volume());
    /// ```
    pub fn bisect(
        &self,
        point: DVec3,
        normal: DVec3,
        fill: bool,
        keep_inner: bool,
        keep_outer: bool,
    ) -> Polyhedron {
        let distances: Vec<f64> = self
            .vertices
            .iter()
            .map(|v| (*v - point).dot(normal))
            .collect();
        let sides: Vec<Side> = distances.iter().map(|&d| Side::of(d)).collect();

        let mut remap = Remap {
            source: self,
            distances: &distances,
            vertices: Vec::with_capacity(self.vertices.len() + 8),
            on_plane: Vec::with_capacity(self.vertices.len() + 8),
            kept: HashMap::new(),
            cuts: HashMap::new(),
        };
        let mut faces = Vec::with_capacity(self.faces.len() + 1);

        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.iter().all(|&v| sides[v as usize] == Side::On) {
                // Face lies in the cut plane: it bounds whichever half it faces away from
                let facing = self.face_normal(face_idx).dot(normal);
                if (facing > 0.0 && keep_inner) || (facing < 0.0 && keep_outer) {
                    faces.push(face.iter().map(|&v| remap.vertex(v)).collect());
                }
                continue;
            }
            if keep_inner {
                if let Some(polygon) = remap.clip(face, &sides, Side::Inner) {
                    faces.push(polygon);
                }
            }
            if keep_outer {
                if let Some(polygon) = remap.clip(face, &sides, Side::Outer) {
                    faces.push(polygon);
                }
            }
        }

        let discarded_any = if keep_inner && !keep_outer {
            sides.contains(&Side::Outer)
        } else if keep_outer && !keep_inner {
            sides.contains(&Side::Inner)
        } else {
            false
        };

        if fill && discarded_any {
            let cap_normal = if keep_inner { normal } else { -normal };
            if let Some(cap) = cap_polygon(&remap.vertices, &remap.on_plane, &faces, cap_normal) {
                faces.push(cap);
            }
        }

        Polyhedron::new(remap.vertices, faces)
    }
}

/// Order the on-plane vertices of the kept faces into a cap facing `cap_normal`
fn cap_polygon(
    vertices: &[DVec3],
    on_plane: &[bool],
    faces: &[Vec<u32>],
    cap_normal: DVec3,
) -> Option<Vec<u32>> {
    let mut boundary: Vec<u32> = faces
        .iter()
        .flatten()
        .copied()
        .filter(|&v| on_plane[v as usize])
        .collect();
    boundary.sort_unstable();
    boundary.dedup();
    if boundary.len() < 3 {
        return None;
    }

    let center = boundary
        .iter()
        .map(|&v| vertices[v as usize])
        .sum::<DVec3>()
        / boundary.len() as f64;
    let u = cap_normal.any_orthonormal_vector();
    let w = cap_normal.cross(u);

    // Counter-clockwise around cap_normal
    let angle = |v: u32| {
        let offset = vertices[v as usize] - center;
        offset.dot(w).atan2(offset.dot(u))
    };
    boundary.sort_by(|&a, &b| angle(a).total_cmp(&angle(b)));
    Some(boundary)
}
