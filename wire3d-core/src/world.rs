//! World space: the live, named collection of placed objects
use std::collections::BTreeMap;

use crate::error::SceneError;
use crate::geometry::Object;
use crate::transform::Matrix;

#[derive(Debug, Clone, Default)]
pub struct WorldSpace {
    objects: BTreeMap<String, Object>,
}

impl WorldSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `template` at `(x, y, z)` under the template's name
    pub fn import(&mut self, template: &Object, x: f64, y: f64, z: f64) -> Result<&Object, SceneError> {
        let placed = template.import(x, y, z)?;
        self.insert(placed)
    }

    /// Add an already placed object
    pub fn insert(&mut self, object: Object) -> Result<&Object, SceneError> {
        object.validate()?;
        match self.objects.entry(object.name.clone()) {
            std::collections::btree_map::Entry::Occupied(_) => Err(SceneError::DuplicateObject(object.name)),
            std::collections::btree_map::Entry::Vacant(slot) => Ok(&*slot.insert(object)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Object> {
        self.objects.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in name order
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Transform every object in place
    pub fn apply(&mut self, m: &Matrix) {
        for object in self.objects.values_mut() {
            object.apply(m);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;
    use crate::shapes;
    use crate::transform::Transform;

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut world = WorldSpace::new();
        let cube = shapes::cube("cube", 1.0, Color::RED);
        world.import(&cube, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(
            world.import(&cube, 1.0, 0.0, 0.0).unwrap_err(),
            SceneError::DuplicateObject("cube".into())
        );
        world.import(&cube.clone().with_name("cube-2"), 1.0, 0.0, 0.0).unwrap();
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_apply_moves_every_object() {
        let mut world = WorldSpace::new();
        let cube = shapes::cube("a", 1.0, Color::RED);
        world.import(&cube, 0.0, 0.0, 0.0).unwrap();
        world.import(&cube.clone().with_name("b"), 0.0, 0.0, 5.0).unwrap();

        world.apply(&Transform::translate(&Transform::identity(), 0.0, 2.0, 0.0));

        assert_eq!(world.get("a").unwrap().midpoint.y, 2.0);
        assert_eq!(world.get("b").unwrap().midpoint.y, 2.0);
        assert_eq!(world.get("b").unwrap().midpoint.z, 5.0);
    }

    #[test]
    fn test_bad_indices_never_enter_the_world() {
        let mut world = WorldSpace::new();
        let mut cube = shapes::cube("cube", 1.0, Color::RED);
        let placed = world.import(&cube, 0.0, 0.0, 3.0).unwrap();
        assert_eq!(placed.midpoint.z, 3.0);

        cube.edges.push((0, 99));
        assert!(matches!(
            world.insert(cube.with_name("broken")),
            Err(SceneError::EdgeOutOfRange { index: 99, .. })
        ));
        assert!(world.get("broken").is_none());
        assert_eq!(world.len(), 1);
    }
}
