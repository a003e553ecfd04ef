//! Mesh-editing host interface
//!
//! Crystal building only needs a handful of primitive editing operations. They
//! are gathered in the [`MeshHost`] trait so the builder can drive any modeling
//! backend; [`Scene`] is the in-memory implementation shipped with the crate.

mod scene;

pub use scene::{Scene, SceneObject};

use std::fmt;

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{HostError, HostResult};

/// Name of an object living in a mesh host
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap an object name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Object name as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Editing mode of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Transform-level editing (location, rotation, scale)
    #[default]
    Object,
    /// Geometry editing (selection, bisect)
    Edit,
}

impl EditMode {
    /// Human-readable mode name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            EditMode::Object => "object",
            EditMode::Edit => "edit",
        }
    }
}

/// Rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index (X = 0, Y = 1, Z = 2)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = HostError;

    fn try_from(index: usize) -> HostResult<Self> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(HostError::InvalidAxis(other)),
        }
    }
}

/// Parameters of a planar bisect
///
/// The plane is given in world space. Inner is the half-space the normal points
/// away from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisect {
    pub plane_point: DVec3,
    pub plane_normal: DVec3,
    /// Close the opening left by a cleared half
    pub fill: bool,
    pub keep_inner: bool,
    pub keep_outer: bool,
}

impl Bisect {
    /// Cut that keeps the inner half and caps it, as crystal cuts do
    pub fn clear_outer(plane_point: DVec3, plane_normal: DVec3) -> Self {
        Self {
            plane_point,
            plane_normal,
            fill: true,
            keep_inner: true,
            keep_outer: false,
        }
    }
}

/// Primitive mesh-editing operations a crystal builder needs
///
/// Every call that names an object fails with [`HostError::ObjectNotFound`]
/// when the id is unknown.
pub trait MeshHost {
    /// Add an icosphere at `location`; the new object becomes active and enters
    /// edit mode
    fn create_icosphere(
        &mut self,
        name: &str,
        subdivisions: u32,
        size: f64,
        location: DVec3,
    ) -> HostResult<ObjectId>;

    /// Select all geometry of an object in edit mode
    fn select_all_geometry(&mut self, object: &ObjectId) -> HostResult<()>;

    /// Split the selected geometry by a plane
    fn bisect(&mut self, object: &ObjectId, bisect: &Bisect) -> HostResult<()>;

    fn set_edit_mode(&mut self, object: &ObjectId, mode: EditMode) -> HostResult<()>;

    fn location(&self, object: &ObjectId) -> HostResult<DVec3>;

    fn set_location(&mut self, object: &ObjectId, location: DVec3) -> HostResult<()>;

    fn set_scale(&mut self, object: &ObjectId, scale: DVec3) -> HostResult<()>;

    /// Set a single Euler rotation component (radians)
    fn set_rotation_axis(&mut self, object: &ObjectId, axis: Axis, angle: f64) -> HostResult<()>;

    /// Remove every object
    fn delete_all_objects(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_index() {
        assert_eq!(Axis::try_from(0).unwrap(), Axis::X);
        assert_eq!(Axis::try_from(2).unwrap(), Axis::Z);
        assert_eq!(Axis::try_from(3), Err(HostError::InvalidAxis(3)));
        assert_eq!(Axis::Y.index(), 1);
    }

    #[test]
    fn test_object_id_display() {
        let id = ObjectId::new("Crystal7");
        assert_eq!(id.to_string(), "Crystal7");
        assert_eq!(id, ObjectId::from("Crystal7"));
    }
}
