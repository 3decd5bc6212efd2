//! The interactive objects of the demo and their removed/normal state.

pub use self::object::{BlockState, ObjectId, SceneObject};
pub use self::registry::{Registry, RegistryError, ToggleOutcome, DEFAULT_BLOCK_EXTENTS};
pub use self::removal::{AlwaysRemovable, RemovalRule};

mod object;
mod registry;
mod removal;
