//! The crystal species

use std::fmt;

use glam::DVec3;
use log::debug;
use rand::RngCore;

use super::builder::{CrystalBuilder, SubCrystal};
use super::genes;
use crate::config::BuilderConfig;
use crate::error::Result;
use crate::genotype::Genotype;
use crate::host::{MeshHost, ObjectId};
use crate::ids::UniqueIdAllocator;
use crate::individual::{Fitness, Individual};

/// A crystal individual: genotype plus the objects it was last built as
///
/// # Example
///
/// ```rust
/// use crystal_genesis::*;
/// use glam::DVec3;
///
/// let ids = UniqueIdAllocator::new();
/// let mut scene = Scene::new();
/// let mut crystal = CrystalIndividual::from_genotype(Genotype::new([0; 11]));
///
/// crystal.compute_individual(&mut scene, &ids, DVec3::ZERO).unwrap();
/// assert_eq!(crystal.generated().map(|id| id.as_str()), Some("Crystal0"));
/// assert_eq!(
///     crystal.to_string(),
///     "# 0x0 0x0 0x0 0x0 0x0 0x0 0x0 0x0 0x0 0x0 0x0 (Crystal0)"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CrystalIndividual {
    genotype: Genotype,
    generated: Vec<ObjectId>,
    sub_crystals: Vec<SubCrystal>,
    fitness: Option<Fitness>,
    parent: Option<String>,
    config: BuilderConfig,
}

impl CrystalIndividual {
    /// New individual with a random genotype
    pub fn new<R: RngCore>(rng: &mut R) -> Self {
        Self::from_genotype(Self::random_genotype(rng))
    }

    /// New individual with a random genotype and an advisory parent name
    pub fn with_parent<R: RngCore>(rng: &mut R, parent: impl Into<String>) -> Self {
        let mut individual = Self::new(rng);
        individual.parent = Some(parent.into());
        individual
    }

    /// Individual with an explicit genotype
    pub fn from_genotype(genotype: Genotype) -> Self {
        Self {
            genotype,
            generated: Vec::new(),
            sub_crystals: Vec::new(),
            fitness: None,
            parent: None,
            config: BuilderConfig::default(),
        }
    }

    /// Use a non-default builder configuration
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Genotype this individual was created with
    #[inline]
    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// Advisory parent name, if any
    #[inline]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Builder configuration used by `compute_individual`
    #[inline]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Per-sub-crystal reports of the last successful build
    #[inline]
    pub fn sub_crystals(&self) -> &[SubCrystal] {
        &self.sub_crystals
    }

    /// Number of sub-crystals this genotype encodes
    #[inline]
    pub fn sub_crystal_count(&self) -> usize {
        genes::sub_crystal_count(&self.genotype)
    }
}

impl Individual for CrystalIndividual {
    type Genotype = Genotype;

    fn random_genotype(rng: &mut dyn RngCore) -> Genotype {
        Genotype::random(rng)
    }

    fn compute_individual(
        &mut self,
        host: &mut dyn MeshHost,
        ids: &UniqueIdAllocator,
        origin: DVec3,
    ) -> Result<&[ObjectId]> {
        debug!("{} sub-crystal(s) for {}", self.sub_crystal_count(), self.genotype);

        let parts = CrystalBuilder::new(self.config, ids).build(host, &self.genotype, origin)?;
        self.generated = parts.iter().map(|p| p.object.clone()).collect();
        self.sub_crystals = parts;
        Ok(&self.generated)
    }

    fn compute_fitness(&self) -> Option<Fitness> {
        self.fitness
    }

    fn genotype_as_string(&self) -> String {
        self.genotype.to_string()
    }

    fn generated_objects(&self) -> &[ObjectId] {
        &self.generated
    }
}

impl fmt::Display for CrystalIndividual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.generated() {
            Some(object) => write!(f, "{} ({})", self.genotype, object),
            None => write!(f, "{} (None)", self.genotype),
        }
    }
}
