//! Crystal genotype
//!
//! A genotype is a fixed sequence of [`GENOTYPE_LEN`] unsigned 32-bit genes.
//! Every shape parameter of a crystal is decoded from these values (see
//! [`crate::crystal::genes`]), so the same genotype always yields the same crystal.
//!
//! # Layout
//!
//! | index            | meaning                                            |
//! |------------------|----------------------------------------------------|
//! | 0                | sub-crystal count                                  |
//! | 1 + n            | cut count of sub-crystal n                         |
//! | 2..=7 (cyclic)   | azimuth, polar angle, radius of successive cuts    |
//! | (8..=10 + n) % 11| scale, then orientation and placement (dual use)   |
//!
//! # Text form
//!
//! Genotypes render as `#` followed by each gene in lowercase hex:
//!
//! ```rust
//! use crystal_genesis::Genotype;
//!
//! let genotype = Genotype::new([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0xdeadbeef]);
//! let text = genotype.to_string();
//! assert_eq!(text, "# 0x0 0x1 0x2 0x3 0x4 0x5 0x6 0x7 0x8 0x9 0xdeadbeef");
//! assert_eq!(text.parse::<Genotype>().unwrap(), genotype);
//! ```

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CrystalError, Result};

/// Number of genes in a crystal genotype
pub const GENOTYPE_LEN: usize = 11;

/// 2^32, the exclusive upper bound of a gene value
pub(crate) const GENE_RANGE: f64 = 4_294_967_296.0;

/// Immutable crystal genotype
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Genotype([u32; GENOTYPE_LEN]);

impl Genotype {
    /// Wrap explicit gene values
    pub const fn new(genes: [u32; GENOTYPE_LEN]) -> Self {
        Self(genes)
    }

    /// Draw every gene uniformly from `rng`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut genes = [0u32; GENOTYPE_LEN];
        for gene in genes.iter_mut() {
            *gene = rng.gen();
        }
        Self(genes)
    }

    /// Deterministic random genotype
    ///
    /// The same seed always produces the same genotype.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(&mut rng)
    }

    /// All genes in order
    #[inline]
    pub fn genes(&self) -> &[u32; GENOTYPE_LEN] {
        &self.0
    }

    /// Gene at `index`, wrapped modulo the genotype length
    #[inline]
    pub fn gene(&self, index: usize) -> u32 {
        self.0[index % GENOTYPE_LEN]
    }

    /// Gene at `index` as a fraction in [0, 1)
    #[inline]
    pub fn fraction(&self, index: usize) -> f64 {
        f64::from(self.gene(index)) / GENE_RANGE
    }
}

impl From<[u32; GENOTYPE_LEN]> for Genotype {
    fn from(genes: [u32; GENOTYPE_LEN]) -> Self {
        Self(genes)
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        for gene in &self.0 {
            write!(f, " {:#x}", gene)?;
        }
        Ok(())
    }
}

impl FromStr for Genotype {
    type Err = CrystalError;

    fn from_str(s: &str) -> Result<Self> {
        let body = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| CrystalError::InvalidGenotype("missing leading '#'".into()))?;

        let mut genes = [0u32; GENOTYPE_LEN];
        let mut count = 0;
        for token in body.split_whitespace() {
            if count == GENOTYPE_LEN {
                return Err(CrystalError::InvalidGenotype(format!(
                    "expected {} genes, found more",
                    GENOTYPE_LEN
                )));
            }
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(CrystalError::InvalidGenotype(format!(
                    "bad gene {:?}: expected hex digits",
                    token
                )));
            }
            genes[count] = u32::from_str_radix(digits, 16).map_err(|e| {
                CrystalError::InvalidGenotype(format!("bad gene {:?}: {}", token, e))
            })?;
            count += 1;
        }

        if count != GENOTYPE_LEN {
            return Err(CrystalError::InvalidGenotype(format!(
                "expected {} genes, found {}",
                GENOTYPE_LEN, count
            )));
        }
        Ok(Self(genes))
    }
}
