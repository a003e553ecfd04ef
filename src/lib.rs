//! Genotype-driven procedural crystal generation
//!
//! A crystal is grown from an 11-gene genotype: an icosphere is trimmed by a
//! sequence of plane cuts, then scaled, rotated and placed around an origin.
//! Mesh editing goes through the [`MeshHost`] trait so any modeling backend can
//! be driven; [`Scene`] is a self-contained in-memory host.
//!
//! # Quick Start
//!
//! ```rust
//! use crystal_genesis::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let ids = UniqueIdAllocator::new();
//! let mut scene = Scene::new();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! // Create a random individual and grow it at the world origin
//! let mut crystal = CrystalIndividual::new(&mut rng);
//! crystal.compute_individual(&mut scene, &ids, DVec3::ZERO).unwrap();
//!
//! // Triangles for rendering
//! let mesh = scene.combined_mesh();
//! println!("{} -> {} triangles", crystal, mesh.triangle_count());
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for genotypes, configuration and transforms

// Modules
pub mod error;
pub mod config;
pub mod genotype;
pub mod geometry;
pub mod mesh;
pub mod host;
pub mod ids;
pub mod individual;
pub mod crystal;

// Re-export core types for convenience
pub use error::{CrystalError, HostError, HostResult, Result};
pub use config::{BuilderConfig, BuilderConfigBuilder, DegeneratePlanePolicy};
pub use genotype::{Genotype, GENOTYPE_LEN};
pub use geometry::Transform;
pub use mesh::{MeshData, Polyhedron};
pub use host::{Axis, Bisect, EditMode, MeshHost, ObjectId, Scene, SceneObject};
pub use ids::UniqueIdAllocator;
pub use individual::{Fitness, Individual};
pub use crystal::{CrystalBuilder, CrystalIndividual, SubCrystal};

// Re-export glam::DVec3 for convenience
pub use glam::DVec3;
