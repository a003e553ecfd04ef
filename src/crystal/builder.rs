//! Crystal construction
//!
//! Drives a [`MeshHost`] through the cut-scale-place pipeline for each
//! sub-crystal encoded in a genotype.

use glam::DVec3;
use log::{debug, trace, warn};

use super::genes;
use crate::config::{BuilderConfig, DegeneratePlanePolicy};
use crate::error::{CrystalError, Result};
use crate::genotype::Genotype;
use crate::geometry::Transform;
use crate::host::{Axis, Bisect, EditMode, MeshHost, ObjectId};
use crate::ids::UniqueIdAllocator;

/// Prefix of generated object names
pub const OBJECT_PREFIX: &str = "Crystal";

/// Outcome of one sub-crystal pass
#[derive(Debug, Clone, PartialEq)]
pub struct SubCrystal {
    /// Position in the build order (0-based)
    pub index: usize,
    /// Host object realizing this sub-crystal
    pub object: ObjectId,
    /// Cuts encoded in the genotype
    pub cuts_requested: usize,
    /// Cuts actually applied to the mesh
    pub cuts_applied: usize,
    /// Cuts skipped because their plane was degenerate
    pub cuts_skipped: usize,
    /// Final object transform
    pub transform: Transform,
}

/// Builds crystals from genotypes
///
/// # Example
///
/// ```rust
/// use crystal_genesis::*;
/// use glam::DVec3;
///
/// let ids = UniqueIdAllocator::new();
/// let mut scene = Scene::new();
/// let builder = CrystalBuilder::new(BuilderConfig::default(), &ids);
///
/// let genotype = Genotype::from_seed(42);
/// let parts = builder.build(&mut scene, &genotype, DVec3::ZERO).unwrap();
///
/// assert!((1..=3).contains(&parts.len()));
/// assert_eq!(scene.len(), parts.len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CrystalBuilder<'a> {
    config: BuilderConfig,
    ids: &'a UniqueIdAllocator,
}

impl<'a> CrystalBuilder<'a> {
    /// Create a builder drawing object ids from `ids`
    pub fn new(config: BuilderConfig, ids: &'a UniqueIdAllocator) -> Self {
        Self { config, ids }
    }

    /// Get the builder configuration
    #[inline]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build every sub-crystal of `genotype` around `origin`
    ///
    /// Sub-crystals are created in order; if one fails, those already built stay
    /// in the host and the error is returned.
    pub fn build<H>(&self, host: &mut H, genotype: &Genotype, origin: DVec3) -> Result<Vec<SubCrystal>>
    where
        H: MeshHost + ?Sized,
    {
        let count = genes::sub_crystal_count(genotype);
        debug!("building {} sub-crystal(s) for {}", count, genotype);

        (0..count)
            .map(|n| self.build_sub_crystal(host, genotype, n, origin))
            .collect()
    }

    /// Build sub-crystal `n` of `genotype` around `origin`
    pub fn build_sub_crystal<H>(
        &self,
        host: &mut H,
        genotype: &Genotype,
        n: usize,
        origin: DVec3,
    ) -> Result<SubCrystal>
    where
        H: MeshHost + ?Sized,
    {
        // Step 1: base icosphere with a fresh name
        let name = format!("{}{}", OBJECT_PREFIX, self.ids.next_id());
        let object = host.create_icosphere(&name, self.config.subdivisions, self.config.size, origin)?;
        debug!("created {} for sub-crystal {}", object, n);

        // Step 2: successive cuts
        let cuts_requested = genes::cut_count(genotype, n);
        let center = host.location(&object)?;
        let mut cuts_applied = 0;
        let mut cuts_skipped = 0;

        for i in 0..cuts_requested {
            let anchor = genes::cut_anchor(genotype, i, n);
            let plane_point = anchor.point();
            let Some(plane_normal) = (plane_point - center).try_normalize() else {
                match self.config.degenerate_planes {
                    DegeneratePlanePolicy::Skip => {
                        warn!("skipping degenerate cut {} on {}", i, object);
                        cuts_skipped += 1;
                        continue;
                    }
                    DegeneratePlanePolicy::Fail => {
                        return Err(CrystalError::DegeneratePlane {
                            object: object.to_string(),
                            cut: i,
                        });
                    }
                }
            };

            trace!("cut {} on {}: point {} normal {}", i, object, plane_point, plane_normal);
            host.select_all_geometry(&object)?;
            host.bisect(&object, &Bisect::clear_outer(plane_point, plane_normal))?;
            cuts_applied += 1;
        }

        // Step 3: scale
        host.set_edit_mode(&object, EditMode::Object)?;
        let scale = genes::scale(genotype, n);
        host.set_scale(&object, scale)?;

        // Step 4: orientation and placement from the same genes
        let placement = genes::placement(genotype, n);
        let location = origin + placement.displacement();
        host.set_location(&object, location)?;
        host.set_rotation_axis(&object, Axis::Z, placement.azimuth)?;
        host.set_rotation_axis(&object, Axis::X, placement.polar)?;

        let transform = Transform {
            location,
            rotation: DVec3::new(placement.polar, 0.0, placement.azimuth),
            scale,
        };
        debug!(
            "{} done: {}/{} cuts, scale {}, location {}, rotation {} rad",
            object, cuts_applied, cuts_requested, scale, location, transform.rotation
        );

        Ok(SubCrystal {
            index: n,
            object,
            cuts_requested,
            cuts_applied,
            cuts_skipped,
            transform,
        })
    }
}
