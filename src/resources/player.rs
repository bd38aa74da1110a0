use bevy_ecs::prelude::{Entity, Resource};

/// Handle to the single entity tagged `"player"`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHandle {
    pub entity: Entity,
}
