use crate::scene::{Registry, SceneObject};

/// Decides whether a block may be marked as removed.
///
/// This is where puzzle rules plug in ("are all the screws holding this block gone?").
/// The rule is only consulted when a block goes from normal to removed; restoring a
/// block is always allowed.
///
/// Any `Fn(&SceneObject, &Registry) -> bool` closure is a rule:
///
/// ```
/// # use disassembly_demo::scene::{Registry, RemovalRule, SceneObject};
/// let top_only = |block: &SceneObject, _: &Registry| block.position().y > 1.0;
/// # fn takes(_: &dyn RemovalRule) {}
/// # takes(&top_only);
/// ```
pub trait RemovalRule {
    /// Returns `true` if `object` may be removed given the current `registry` state.
    fn can_remove(&self, object: &SceneObject, registry: &Registry) -> bool;
}

/// The rule used by the demo: every block can always be removed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AlwaysRemovable;

impl RemovalRule for AlwaysRemovable {
    #[inline]
    fn can_remove(&self, _: &SceneObject, _: &Registry) -> bool {
        true
    }
}

impl<F> RemovalRule for F
where
    F: Fn(&SceneObject, &Registry) -> bool,
{
    #[inline]
    fn can_remove(&self, object: &SceneObject, registry: &Registry) -> bool {
        self(object, registry)
    }
}
