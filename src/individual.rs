//! Genetic individuals
//!
//! An individual couples a genotype with the phenotype it renders as. Every
//! species implements [`Individual`]; [`CrystalIndividual`](crate::CrystalIndividual)
//! is the crystal species.

use glam::DVec3;
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CrystalError, Result};
use crate::host::{MeshHost, ObjectId};
use crate::ids::UniqueIdAllocator;

/// Fitness score in [0, 1]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Fitness(f64);

impl Fitness {
    /// # Errors
    ///
    /// Returns `InvalidFitness` for values outside [0, 1] and NaN
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CrystalError::InvalidFitness(value))
        }
    }

    /// Raw score in [0, 1]
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Protocol shared by all individual species
///
/// The trait is object safe once the genotype type is fixed, e.g.
/// `Box<dyn Individual<Genotype = Genotype>>`.
pub trait Individual {
    type Genotype;

    /// Produce a random genotype for this species
    fn random_genotype(rng: &mut dyn RngCore) -> Self::Genotype
    where
        Self: Sized;

    /// Realize the phenotype around `origin` and return the generated objects
    ///
    /// On error the previously generated objects stay recorded.
    fn compute_individual(
        &mut self,
        host: &mut dyn MeshHost,
        ids: &UniqueIdAllocator,
        origin: DVec3,
    ) -> Result<&[ObjectId]>;

    /// Fitness of the individual, `None` while not evaluated
    fn compute_fitness(&self) -> Option<Fitness>;

    /// Canonical text form of the genotype
    fn genotype_as_string(&self) -> String;

    /// Objects generated by the last successful build, in creation order
    fn generated_objects(&self) -> &[ObjectId];

    /// Last generated object
    fn generated(&self) -> Option<&ObjectId> {
        self.generated_objects().last()
    }
}
