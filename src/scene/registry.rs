use crate::color::{Color, REMOVED_COLOR};
use crate::scene::removal::RemovalRule;
use crate::scene::{ObjectId, SceneObject};
use glamx::Vec3;
use std::collections::HashMap;
use thiserror::Error;

/// Size of a block created without explicit extents.
pub const DEFAULT_BLOCK_EXTENTS: Vec3 = Vec3::splat(2.0);

/// Errors raised by the [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// An object with this name already exists.
    #[error("an object named `{0}` already exists")]
    DuplicateName(String),
    /// No object with this name was ever registered.
    #[error("no object named `{0}` is registered")]
    UnknownObject(String),
}

/// What a call to [`Registry::toggle`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The object went from normal to removed.
    Removed,
    /// The object went from removed back to normal.
    Restored,
    /// The removal rule refused the removal; nothing changed.
    Blocked,
}

/// Owner of every interactive object of the scene.
///
/// Objects are kept in insertion order, and the color each object was created with is
/// remembered separately so that a removed object can be restored. Nothing is ever
/// deleted from the registry: "removing" a block only flags it.
#[derive(Clone, Debug)]
pub struct Registry {
    objects: Vec<SceneObject>,
    original_colors: HashMap<String, Color>,
    removed_color: Color,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_removed_color(REMOVED_COLOR)
    }
}

impl Registry {
    /// Creates an empty registry drawing removed objects in [`REMOVED_COLOR`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry drawing removed objects in `removed_color`.
    pub fn with_removed_color(removed_color: Color) -> Self {
        Self {
            objects: Vec::new(),
            original_colors: HashMap::new(),
            removed_color,
        }
    }

    /// The display color of removed objects.
    #[inline]
    pub fn removed_color(&self) -> Color {
        self.removed_color
    }

    /// Creates a block of the default 2x2x2 size.
    ///
    /// See [`create_object_with_extents`](Self::create_object_with_extents).
    pub fn create_object(
        &mut self,
        position: Vec3,
        color: Color,
        name: &str,
    ) -> Result<&SceneObject, RegistryError> {
        self.create_object_with_extents(position, DEFAULT_BLOCK_EXTENTS, color, name)
    }

    /// Creates and registers a new cuboid.
    ///
    /// The object starts in the normal state with `color` as both its display and its
    /// original color.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateName`] if `name` is already taken. The registry
    /// is left untouched in that case.
    pub fn create_object_with_extents(
        &mut self,
        position: Vec3,
        extents: Vec3,
        color: Color,
        name: &str,
    ) -> Result<&SceneObject, RegistryError> {
        if self.original_colors.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_owned()));
        }

        let id = ObjectId(self.objects.len());
        self.original_colors.insert(name.to_owned(), color);
        self.objects.push(SceneObject {
            id,
            name: name.to_owned(),
            position,
            extents,
            color,
            is_removed: false,
        });

        log::debug!("registered block {} `{}` at {:?}", id, name, position);
        Ok(&self.objects[id.0])
    }

    /// The color the named object was created with.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownObject`] if no object has this name.
    pub fn find_original_color(&self, name: &str) -> Result<Color, RegistryError> {
        self.original_colors
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownObject(name.to_owned()))
    }

    /// Flips the removed state of an object.
    ///
    /// A normal object is checked against `rule` and, if allowed, turns grey and is
    /// flagged removed. A removed object always gets its original color back.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this registry, or if the original color of the
    /// object is missing. Both mean the registry is corrupted.
    pub fn toggle(&mut self, id: ObjectId, rule: &dyn RemovalRule) -> ToggleOutcome {
        let object = &self.objects[id.0];

        if object.is_removed {
            let original = self
                .find_original_color(&object.name)
                .unwrap_or_else(|e| panic!("registry corrupted: {e}"));
            let object = &mut self.objects[id.0];
            object.color = original;
            object.is_removed = false;
            ToggleOutcome::Restored
        } else if rule.can_remove(object, self) {
            let removed_color = self.removed_color;
            let object = &mut self.objects[id.0];
            object.color = removed_color;
            object.is_removed = true;
            ToggleOutcome::Removed
        } else {
            ToggleOutcome::Blocked
        }
    }

    /// All objects, in insertion order.
    #[inline]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Iterates over all objects, in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// The object with the given handle.
    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// The object with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.name == name)
    }

    /// Number of registered objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no object was registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects currently flagged removed.
    pub fn removed_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_removed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, GREY, LIME, RED};
    use crate::scene::{AlwaysRemovable, BlockState};

    fn three_blocks() -> Registry {
        let mut registry = Registry::new();
        registry.create_object(Vec3::ZERO, RED, "redBlock").unwrap();
        registry
            .create_object(Vec3::new(2.1, 0.0, 0.0), LIME, "greenBlock")
            .unwrap();
        registry
            .create_object(Vec3::new(0.0, 2.1, 0.0), BLUE, "blueBlock")
            .unwrap();
        registry
    }

    #[test]
    fn objects_keep_insertion_order() {
        let registry = three_blocks();
        let names: Vec<_> = registry.iter().map(|o| o.name()).collect();
        assert_eq!(names, ["redBlock", "greenBlock", "blueBlock"]);
        for (i, object) in registry.iter().enumerate() {
            assert_eq!(object.id().index(), i);
            assert_eq!(object.state(), BlockState::Normal);
            assert_eq!(object.extents(), DEFAULT_BLOCK_EXTENTS);
        }
    }

    #[test]
    fn original_color_is_the_creation_color() {
        let mut registry = three_blocks();
        let red = registry.find_by_name("redBlock").unwrap().id();

        for _ in 0..3 {
            registry.toggle(red, &AlwaysRemovable);
            assert_eq!(registry.find_original_color("redBlock"), Ok(RED));
            assert_eq!(registry.find_original_color("greenBlock"), Ok(LIME));
            assert_eq!(registry.find_original_color("blueBlock"), Ok(BLUE));
        }
    }

    #[test]
    fn unknown_name_has_no_original_color() {
        let registry = three_blocks();
        assert_eq!(
            registry.find_original_color("purpleBlock"),
            Err(RegistryError::UnknownObject("purpleBlock".to_owned()))
        );
    }

    #[test]
    fn duplicate_name_is_rejected_without_corruption() {
        let mut registry = Registry::new();
        registry.create_object(Vec3::ZERO, RED, "block").unwrap();

        let err = registry
            .create_object(Vec3::new(5.0, 0.0, 0.0), BLUE, "block")
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("block".to_owned()));

        assert_eq!(registry.len(), 1);
        let first = registry.find_by_name("block").unwrap();
        assert_eq!(first.position(), Vec3::ZERO);
        assert_eq!(first.color(), RED);
        assert_eq!(registry.find_original_color("block"), Ok(RED));
    }

    #[test]
    fn toggle_greys_out_then_restores() {
        let mut registry = three_blocks();
        let green = registry.find_by_name("greenBlock").unwrap().id();

        assert_eq!(registry.toggle(green, &AlwaysRemovable), ToggleOutcome::Removed);
        let object = registry.get(green).unwrap();
        assert!(object.is_removed());
        assert_eq!(object.color(), GREY);
        assert_eq!(registry.removed_count(), 1);

        assert_eq!(registry.toggle(green, &AlwaysRemovable), ToggleOutcome::Restored);
        let object = registry.get(green).unwrap();
        assert!(!object.is_removed());
        assert_eq!(object.color(), LIME);
        assert_eq!(registry.removed_count(), 0);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut registry = three_blocks();
        let before = registry.clone();

        for object in before.iter() {
            registry.toggle(object.id(), &AlwaysRemovable);
            registry.toggle(object.id(), &AlwaysRemovable);
        }

        assert_eq!(registry.objects(), before.objects());
    }

    #[test]
    fn toggle_only_touches_its_target() {
        let mut registry = three_blocks();
        let blue = registry.find_by_name("blueBlock").unwrap().id();
        registry.toggle(blue, &AlwaysRemovable);

        assert!(!registry.find_by_name("redBlock").unwrap().is_removed());
        assert_eq!(registry.find_by_name("redBlock").unwrap().color(), RED);
        assert!(!registry.find_by_name("greenBlock").unwrap().is_removed());
    }

    #[test]
    fn refusing_rule_blocks_removal() {
        let mut registry = three_blocks();
        let red = registry.find_by_name("redBlock").unwrap().id();
        let never = |_: &SceneObject, _: &Registry| false;

        assert_eq!(registry.toggle(red, &never), ToggleOutcome::Blocked);
        let object = registry.get(red).unwrap();
        assert!(!object.is_removed());
        assert_eq!(object.color(), RED);
    }

    #[test]
    fn refusing_rule_never_blocks_restoring() {
        let mut registry = three_blocks();
        let red = registry.find_by_name("redBlock").unwrap().id();
        registry.toggle(red, &AlwaysRemovable);

        let never = |_: &SceneObject, _: &Registry| false;
        assert_eq!(registry.toggle(red, &never), ToggleOutcome::Restored);
        assert_eq!(registry.get(red).unwrap().color(), RED);
    }

    #[test]
    fn custom_removed_color() {
        let dark = crate::color::from_hex(0x202020);
        let mut registry = Registry::with_removed_color(dark);
        let id = registry.create_object(Vec3::ZERO, RED, "block").unwrap().id();

        registry.toggle(id, &AlwaysRemovable);
        assert_eq!(registry.get(id).unwrap().color(), dark);
        assert_eq!(registry.removed_color(), dark);
    }
}
