use crate::color::Color;
use crate::picking::Aabb;
use glamx::Vec3;
use std::fmt;

/// Stable handle of a [`SceneObject`] inside its [`Registry`](crate::scene::Registry).
///
/// Handles are insertion indices: the registry never deletes objects, so a handle stays
/// valid for the whole session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    /// The insertion index this handle refers to.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two states a block can be in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum BlockState {
    /// The block shows its original color.
    #[default]
    Normal,
    /// The block has been clicked away and is drawn grey.
    Removed,
}

/// An interactive axis-aligned cuboid.
///
/// Everything except the removal flag and the display color is fixed at creation.
/// Objects are created through [`Registry::create_object`](crate::scene::Registry::create_object)
/// and are only mutated by [`Registry::toggle`](crate::scene::Registry::toggle).
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub(crate) id: ObjectId,
    pub(crate) name: String,
    pub(crate) position: Vec3,
    pub(crate) extents: Vec3,
    pub(crate) color: Color,
    pub(crate) is_removed: bool,
}

impl SceneObject {
    /// The handle of this object in its registry.
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The unique name given at creation.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World-space center of the cuboid.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Full size of the cuboid along each axis.
    #[inline]
    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    /// The color the object is currently drawn with.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the object is marked as removed.
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.is_removed
    }

    /// The state machine view of [`is_removed`](Self::is_removed).
    #[inline]
    pub fn state(&self) -> BlockState {
        if self.is_removed {
            BlockState::Removed
        } else {
            BlockState::Normal
        }
    }

    /// The world-space bounding box used for picking.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(self.position, self.extents)
    }
}
