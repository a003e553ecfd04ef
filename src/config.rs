//! Crystal Builder Configuration
//!
//! This module provides the configuration consumed by [`CrystalBuilder`](crate::CrystalBuilder).
//! Genotypes carry everything that varies between crystals; the configuration only
//! covers the base primitive and how degenerate cuts are treated.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CrystalError, Result};

/// Maximum icosphere subdivision level accepted by the builder
pub const MAX_SUBDIVISIONS: u32 = 6;

/// What to do when a cut plane has a zero-length normal
///
/// A normal is degenerate when the plane anchor coincides with the
/// sub-crystal center, as with a zero radius gene on a crystal built at the
/// world origin.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePlanePolicy {
    /// Skip the cut, log a warning and keep building (default)
    #[default]
    Skip,
    /// Abort the build with [`CrystalError::DegeneratePlane`]
    Fail,
}

/// Configuration for crystal building
///
/// # Example
///
/// ```rust
/// use crystal_genesis::*;
///
/// let config = BuilderConfigBuilder::new()
///     .subdivisions(2)
///     .unwrap()
///     .degenerate_planes(DegeneratePlanePolicy::Fail)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.subdivisions, 2);
/// assert_eq!(config.size, 1.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuilderConfig {
    /// Icosphere subdivision level of the base primitive
    ///
    /// - 1: plain icosahedron, 12 vertices (default)
    /// - 2: 42 vertices
    /// - each level multiplies the face count by 4
    pub subdivisions: u32,

    /// Radius of the base icosphere
    pub size: f64,

    /// Handling of cut planes whose normal cannot be normalized
    pub degenerate_planes: DegeneratePlanePolicy,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            subdivisions: 1,
            size: 1.0,
            degenerate_planes: DegeneratePlanePolicy::Skip,
        }
    }
}

/// Builder for creating BuilderConfig with validation
#[derive(Debug, Clone)]
pub struct BuilderConfigBuilder {
    config: BuilderConfig,
}

impl BuilderConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - subdivisions: 1 (icosahedron)
    /// - size: 1.0 (unit radius)
    /// - degenerate_planes: Skip
    pub fn new() -> Self {
        Self {
            config: BuilderConfig::default(),
        }
    }

    /// Set the icosphere subdivision level
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the level is 0 or above [`MAX_SUBDIVISIONS`]
    pub fn subdivisions(mut self, subdivisions: u32) -> Result<Self> {
        if subdivisions == 0 || subdivisions > MAX_SUBDIVISIONS {
            return Err(CrystalError::InvalidConfig(format!(
                "subdivisions must be in 1..={} (got {})",
                MAX_SUBDIVISIONS, subdivisions
            )));
        }
        self.config.subdivisions = subdivisions;
        Ok(self)
    }

    /// Set the base icosphere radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if size is not a positive finite number
    pub fn size(mut self, size: f64) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(CrystalError::InvalidConfig(format!(
                "size must be positive and finite (got {})",
                size
            )));
        }
        self.config.size = size;
        Ok(self)
    }

    /// Set the degenerate cut plane policy
    pub fn degenerate_planes(mut self, policy: DegeneratePlanePolicy) -> Self {
        self.config.degenerate_planes = policy;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BuilderConfig> {
        Ok(self.config)
    }
}

impl Default for BuilderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
