//! In-memory mesh host

use glam::DVec3;
use log::trace;

use super::{Axis, Bisect, EditMode, MeshHost, ObjectId};
use crate::config::MAX_SUBDIVISIONS;
use crate::error::{HostError, HostResult};
use crate::geometry::Transform;
use crate::mesh::{MeshData, Polyhedron};

/// One object in a [`Scene`]
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Unique object name
    pub id: ObjectId,
    /// Geometry in object space
    pub mesh: Polyhedron,
    pub transform: Transform,
    pub mode: EditMode,
    /// Whether all geometry is selected for editing
    pub selected: bool,
}

impl SceneObject {
    /// Triangulated geometry in world space
    pub fn mesh_data(&self) -> MeshData {
        self.mesh.to_mesh_data(&self.transform.matrix())
    }

    /// Geometry with the object transform applied
    pub fn world_mesh(&self) -> Polyhedron {
        self.mesh.transformed(&self.transform.matrix())
    }
}

/// Ordered collection of editable objects
///
/// Objects keep their creation order. The most recently created object is the
/// active one.
///
/// # Example
///
/// ```rust
/// use crystal_genesis::host::{Bisect, EditMode, MeshHost, Scene};
/// use glam::DVec3;
///
/// let mut scene = Scene::new();
/// let ico = scene.create_icosphere("Gem", 1, 1.0, DVec3::ZERO).unwrap();
/// scene.select_all_geometry(&ico).unwrap();
/// scene
///     .bisect(&ico, &Bisect::clear_outer(DVec3::new(0.0, 0.0, 0.5), DVec3::Z))
///     .unwrap();
/// scene.set_edit_mode(&ico, EditMode::Object).unwrap();
///
/// assert_eq!(scene.len(), 1);
/// assert!(scene.mesh_data(&ico).unwrap().triangle_count() > 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    active: Option<usize>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of objects
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in creation order
    #[inline]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Look up an object by id
    pub fn object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    /// The most recently created object, if any
    pub fn active_object(&self) -> Option<&SceneObject> {
        self.active.and_then(|idx| self.objects.get(idx))
    }

    /// World-space render data of one object
    pub fn mesh_data(&self, id: &ObjectId) -> HostResult<MeshData> {
        self.get(id).map(SceneObject::mesh_data)
    }

    /// World-space render data of every object in the scene
    pub fn combined_mesh(&self) -> MeshData {
        let mut combined = MeshData::default();
        for object in &self.objects {
            combined.append(&object.mesh_data());
        }
        combined
    }

    fn get(&self, id: &ObjectId) -> HostResult<&SceneObject> {
        self.object(id)
            .ok_or_else(|| HostError::ObjectNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &ObjectId) -> HostResult<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| HostError::ObjectNotFound(id.to_string()))
    }

    /// First free name, suffixing `.001`, `.002`, ... on collisions
    fn unique_name(&self, name: &str) -> ObjectId {
        let taken = |candidate: &str| self.objects.iter().any(|o| o.id.as_str() == candidate);
        if !taken(name) {
            return ObjectId::new(name);
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{}.{:03}", name, suffix);
            if !taken(&candidate) {
                return ObjectId::new(candidate);
            }
            suffix += 1;
        }
    }
}

fn ensure_finite(label: &str, v: DVec3) -> HostResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(HostError::InvalidParameter(format!(
            "{} must be finite (got {})",
            label, v
        )))
    }
}

impl MeshHost for Scene {
    fn create_icosphere(
        &mut self,
        name: &str,
        subdivisions: u32,
        size: f64,
        location: DVec3,
    ) -> HostResult<ObjectId> {
        if subdivisions == 0 || subdivisions > MAX_SUBDIVISIONS {
            return Err(HostError::InvalidParameter(format!(
                "icosphere subdivisions must be in 1..={} (got {})",
                MAX_SUBDIVISIONS, subdivisions
            )));
        }
        if !size.is_finite() || size <= 0.0 {
            return Err(HostError::InvalidParameter(format!(
                "icosphere size must be positive (got {})",
                size
            )));
        }
        ensure_finite("location", location)?;

        // Only the new object stays in edit mode
        for object in &mut self.objects {
            object.mode = EditMode::Object;
        }

        let id = self.unique_name(name);
        trace!("creating icosphere {} at {}", id, location);
        self.objects.push(SceneObject {
            id: id.clone(),
            mesh: Polyhedron::icosphere(subdivisions, size),
            transform: Transform::at(location),
            mode: EditMode::Edit,
            selected: false,
        });
        self.active = Some(self.objects.len() - 1);
        Ok(id)
    }

    fn select_all_geometry(&mut self, object: &ObjectId) -> HostResult<()> {
        let object = self.get_mut(object)?;
        if object.mode != EditMode::Edit {
            return Err(HostError::WrongMode {
                object: object.id.to_string(),
                expected: EditMode::Edit.name(),
            });
        }
        object.selected = true;
        Ok(())
    }

    fn bisect(&mut self, object: &ObjectId, bisect: &Bisect) -> HostResult<()> {
        ensure_finite("plane point", bisect.plane_point)?;
        ensure_finite("plane normal", bisect.plane_normal)?;

        let object = self.get_mut(object)?;
        if object.mode != EditMode::Edit {
            return Err(HostError::WrongMode {
                object: object.id.to_string(),
                expected: EditMode::Edit.name(),
            });
        }
        if !object.selected {
            return Err(HostError::NothingSelected(object.id.to_string()));
        }

        // Bring the world-space plane into object space
        let matrix = object.transform.matrix();
        let point = matrix.inverse().transform_point3(bisect.plane_point);
        let normal = (matrix.matrix3.transpose() * bisect.plane_normal).normalize_or_zero();
        if normal == DVec3::ZERO {
            return Err(HostError::InvalidParameter(format!(
                "plane normal must be non-zero (got {})",
                bisect.plane_normal
            )));
        }

        object.mesh = object.mesh.bisect(
            point,
            normal,
            bisect.fill,
            bisect.keep_inner,
            bisect.keep_outer,
        );
        object.selected = false;
        Ok(())
    }

    fn set_edit_mode(&mut self, object: &ObjectId, mode: EditMode) -> HostResult<()> {
        let object = self.get_mut(object)?;
        if object.mode != mode {
            object.mode = mode;
            object.selected = false;
        }
        Ok(())
    }

    fn location(&self, object: &ObjectId) -> HostResult<DVec3> {
        self.get(object).map(|o| o.transform.location)
    }

    fn set_location(&mut self, object: &ObjectId, location: DVec3) -> HostResult<()> {
        ensure_finite("location", location)?;
        self.get_mut(object)?.transform.location = location;
        Ok(())
    }

    fn set_scale(&mut self, object: &ObjectId, scale: DVec3) -> HostResult<()> {
        ensure_finite("scale", scale)?;
        if scale.cmpeq(DVec3::ZERO).any() {
            return Err(HostError::InvalidParameter(format!(
                "scale components must be non-zero (got {})",
                scale
            )));
        }
        self.get_mut(object)?.transform.scale = scale;
        Ok(())
    }

    fn set_rotation_axis(&mut self, object: &ObjectId, axis: Axis, angle: f64) -> HostResult<()> {
        if !angle.is_finite() {
            return Err(HostError::InvalidParameter(format!(
                "rotation angle must be finite (got {})",
                angle
            )));
        }
        self.get_mut(object)?.transform.rotation[axis.index()] = angle;
        Ok(())
    }

    fn delete_all_objects(&mut self) {
        self.objects.clear();
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn scene_with_ico() -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let id = scene
            .create_icosphere("Crystal0", 1, 1.0, DVec3::ZERO)
            .unwrap();
        (scene, id)
    }

    #[test]
    fn test_create_icosphere() {
        let (scene, id) = scene_with_ico();
        let object = scene.object(&id).unwrap();

        assert_eq!(object.mode, EditMode::Edit);
        assert_eq!(object.mesh.vertex_count(), 12);
        assert_eq!(scene.active_object().unwrap().id, id);
    }

    #[test]
    fn test_duplicate_names_get_suffix() {
        let (mut scene, _) = scene_with_ico();
        let second = scene
            .create_icosphere("Crystal0", 1, 1.0, DVec3::ZERO)
            .unwrap();
        let third = scene
            .create_icosphere("Crystal0", 1, 1.0, DVec3::ZERO)
            .unwrap();

        assert_eq!(second.as_str(), "Crystal0.001");
        assert_eq!(third.as_str(), "Crystal0.002");
        // Previously created objects leave edit mode
        assert_eq!(scene.objects()[0].mode, EditMode::Object);
    }

    #[test]
    fn test_invalid_icosphere_size() {
        let mut scene = Scene::new();
        assert!(matches!(
            scene.create_icosphere("Bad", 1, 0.0, DVec3::ZERO),
            Err(HostError::InvalidParameter(_))
        ));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_invalid_icosphere_subdivisions() {
        let mut scene = Scene::new();
        for subdivisions in [0, MAX_SUBDIVISIONS + 1, 40] {
            assert!(matches!(
                scene.create_icosphere("Bad", subdivisions, 1.0, DVec3::ZERO),
                Err(HostError::InvalidParameter(_))
            ));
        }
        assert!(scene.is_empty());

        scene
            .create_icosphere("Fine", MAX_SUBDIVISIONS, 1.0, DVec3::ZERO)
            .unwrap();
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_bisect_requires_selection() {
        let (mut scene, id) = scene_with_ico();
        let cut = Bisect::clear_outer(DVec3::new(0.0, 0.0, 0.5), DVec3::Z);

        assert_eq!(
            scene.bisect(&id, &cut),
            Err(HostError::NothingSelected("Crystal0".into()))
        );

        scene.select_all_geometry(&id).unwrap();
        scene.bisect(&id, &cut).unwrap();
        // Selection is consumed by the cut
        assert!(!scene.object(&id).unwrap().selected);
    }

    #[test]
    fn test_bisect_requires_edit_mode() {
        let (mut scene, id) = scene_with_ico();
        scene.set_edit_mode(&id, EditMode::Object).unwrap();

        assert!(matches!(
            scene.select_all_geometry(&id),
            Err(HostError::WrongMode { .. })
        ));
        assert!(matches!(
            scene.bisect(&id, &Bisect::clear_outer(DVec3::ZERO, DVec3::Z)),
            Err(HostError::WrongMode { .. })
        ));
    }

    #[test]
    fn test_bisect_uses_world_space() {
        let mut scene = Scene::new();
        let id = scene
            .create_icosphere("Offset", 1, 1.0, DVec3::new(10.0, 0.0, 0.0))
            .unwrap();
        scene.select_all_geometry(&id).unwrap();
        scene
            .bisect(&id, &Bisect::clear_outer(DVec3::new(10.0, 0.0, 0.5), DVec3::Z))
            .unwrap();

        let world = scene.object(&id).unwrap().world_mesh();
        let (_, hi) = world
            .signed_distance_range(DVec3::new(10.0, 0.0, 0.5), DVec3::Z)
            .unwrap();
        assert!(hi <= 1e-9);
    }

    #[test]
    fn test_bisect_rejects_zero_normal() {
        let (mut scene, id) = scene_with_ico();
        scene.select_all_geometry(&id).unwrap();
        assert!(matches!(
            scene.bisect(&id, &Bisect::clear_outer(DVec3::ZERO, DVec3::ZERO)),
            Err(HostError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_transforms() {
        let (mut scene, id) = scene_with_ico();
        scene.set_location(&id, DVec3::new(1.0, 2.0, 3.0)).unwrap();
        scene.set_scale(&id, DVec3::new(2.0, 2.0, 2.0)).unwrap();
        scene.set_rotation_axis(&id, Axis::Z, FRAC_PI_2).unwrap();

        let transform = scene.object(&id).unwrap().transform;
        assert_eq!(scene.location(&id).unwrap(), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.scale, DVec3::splat(2.0));
        assert_eq!(transform.rotation, DVec3::new(0.0, 0.0, FRAC_PI_2));
        assert!(scene.set_scale(&id, DVec3::new(1.0, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_unknown_object() {
        let mut scene = Scene::new();
        let ghost = ObjectId::new("Ghost");

        assert_eq!(
            scene.location(&ghost),
            Err(HostError::ObjectNotFound("Ghost".into()))
        );
        assert!(scene.set_scale(&ghost, DVec3::ONE).is_err());
        assert!(scene.set_edit_mode(&ghost, EditMode::Object).is_err());
        assert!(scene.mesh_data(&ghost).is_err());
    }

    #[test]
    fn test_delete_all_objects() {
        let (mut scene, _) = scene_with_ico();
        scene.create_icosphere("Other", 2, 1.0, DVec3::X).unwrap();
        assert_eq!(scene.len(), 2);
        assert!(!scene.combined_mesh().is_empty());

        scene.delete_all_objects();
        assert!(scene.is_empty());
        assert!(scene.active_object().is_none());
        assert!(scene.combined_mesh().is_empty());
    }
}
