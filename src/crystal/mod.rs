//! Crystal species: gene decoding, construction and the individual wrapper
//!
//! A crystal is one to three sub-crystals. Each sub-crystal starts as an
//! icosphere at the build origin, is trimmed by up to 63 plane cuts, then
//! scaled, rotated and pushed out from the origin.

pub mod genes;
mod builder;
mod individual;

pub use builder::{CrystalBuilder, SubCrystal, OBJECT_PREFIX};
pub use individual::CrystalIndividual;
