//! Gene decoding
//!
//! Pure functions turning a [`Genotype`] into crystal parameters. All
//! arithmetic is done in `f64` on the gene fraction `gene / 2^32`, in the same
//! operation order everywhere, so identical genotypes always decode to
//! bit-identical parameters.

use std::f64::consts::PI;

use glam::DVec3;

use crate::genotype::{Genotype, GENOTYPE_LEN};
use crate::geometry::spherical_to_cartesian;

/// Upper bound (exclusive) of the sub-crystal count formula's scaled term
const SUB_CRYSTAL_SPAN: f64 = 3.0;

/// Cut counts range over 0..MAX_CUTS
pub const MAX_CUTS: usize = 64;

/// Cut anchors lie at most this far from the world origin
pub const MAX_CUT_RADIUS: f64 = 0.9;

/// Number of genes cycled through by cut planes
const CUT_GENES: usize = 6;

/// First gene used by cut planes
const FIRST_CUT_GENE: usize = 2;

/// First of the three dual-use scale/orientation genes
const FIRST_SHAPE_GENE: usize = 8;

/// Largest sub-crystal count any genotype can produce
pub const MAX_SUB_CRYSTALS: usize = 3;

/// Number of sub-crystals: `floor(g[0] / 2^32 * 3 + 1)`, in 1..=3
#[inline]
pub fn sub_crystal_count(genotype: &Genotype) -> usize {
    (genotype.fraction(0) * SUB_CRYSTAL_SPAN + 1.0).floor() as usize
}

/// Number of cuts of sub-crystal `n`: `floor(g[1 + n] / 2^32 * 64)`, in 0..64
#[inline]
pub fn cut_count(genotype: &Genotype, n: usize) -> usize {
    (genotype.fraction(1 + n) * MAX_CUTS as f64).floor() as usize
}

/// Gene index for component `k` of cut `i` of sub-crystal `n`, in 2..=7
#[inline]
pub fn cut_gene_index(i: usize, n: usize, k: usize) -> usize {
    (i + n + k) % CUT_GENES + FIRST_CUT_GENE
}

/// Indices of the three dual-use shape genes of sub-crystal `n`
#[inline]
pub fn shape_gene_indices(n: usize) -> [usize; 3] {
    [
        (FIRST_SHAPE_GENE + n) % GENOTYPE_LEN,
        (FIRST_SHAPE_GENE + 1 + n) % GENOTYPE_LEN,
        (FIRST_SHAPE_GENE + 2 + n) % GENOTYPE_LEN,
    ]
}

/// Spherical coordinates of a cut plane anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutAnchor {
    /// Radians in [0, 2π)
    pub azimuth: f64,
    /// Radians in [0, 2π)
    pub polar: f64,
    /// Distance from the world origin, in [0, 0.9)
    pub radius: f64,
}

impl CutAnchor {
    /// World-space point the cut plane passes through
    #[inline]
    pub fn point(&self) -> DVec3 {
        spherical_to_cartesian(self.azimuth, self.polar, self.radius)
    }
}

/// Anchor of cut `i` of sub-crystal `n`
pub fn cut_anchor(genotype: &Genotype, i: usize, n: usize) -> CutAnchor {
    CutAnchor {
        azimuth: genotype.fraction(cut_gene_index(i, n, 0)) * 2.0 * PI,
        polar: genotype.fraction(cut_gene_index(i, n, 1)) * 2.0 * PI,
        radius: genotype.fraction(cut_gene_index(i, n, 2)) * MAX_CUT_RADIUS,
    }
}

/// Non-uniform scale of sub-crystal `n`, each component in [1, 3)
pub fn scale(genotype: &Genotype, n: usize) -> DVec3 {
    let [x, y, z] = shape_gene_indices(n);
    DVec3::new(
        genotype.fraction(x) * 2.0 + 1.0,
        genotype.fraction(y) * 2.0 + 1.0,
        genotype.fraction(z) * 2.0 + 1.0,
    )
}

/// Orientation and placement of a sub-crystal
///
/// Decoded from the same genes as [`scale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Rotation about Z and placement azimuth, in [0, 2π)
    pub azimuth: f64,
    /// Rotation about X and placement polar angle, in [0, 2π)
    pub polar: f64,
    /// Distance from the build origin, in {1, 2, 3}
    pub radius: u32,
}

impl Placement {
    /// Offset of the sub-crystal from the build origin
    #[inline]
    pub fn displacement(&self) -> DVec3 {
        spherical_to_cartesian(self.azimuth, self.polar, f64::from(self.radius))
    }
}

/// Orientation and placement of sub-crystal `n`
pub fn placement(genotype: &Genotype, n: usize) -> Placement {
    let [azimuth, polar, radius] = shape_gene_indices(n);
    Placement {
        azimuth: genotype.fraction(azimuth) * 2.0 * PI,
        polar: genotype.fraction(polar) * 2.0 * PI,
        radius: (genotype.fraction(radius) * 3.0).floor() as u32 + 1,
    }
}
