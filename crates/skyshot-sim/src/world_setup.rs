//! Entity spawn factories for the simulation world.

use glam::Vec3;
use hecs::{Entity, World};

use skyshot_core::config::{BallisticTuning, FlightTuning};
use skyshot_core::types::ActorId;

use crate::airplane::Airplane;
use crate::bullet::Bullet;
use crate::dice::TernaryDice;

/// Spawn a single airplane entity.
pub fn spawn_airplane(
    world: &mut World,
    position: Vec3,
    tuning: FlightTuning,
    dice: &mut dyn TernaryDice,
) -> Entity {
    world.spawn((Airplane::with_tuning(position, tuning, dice),))
}

/// Spawn a single bullet entity.
pub fn spawn_bullet(
    world: &mut World,
    origin: Vec3,
    aim: Vec3,
    tuning: BallisticTuning,
    dice: &mut dyn TernaryDice,
) -> Entity {
    world.spawn((Bullet::with_tuning(origin, aim, tuning, dice),))
}

/// Public identifier for an entity.
pub fn actor_id(entity: Entity) -> ActorId {
    ActorId(entity.to_bits().get())
}

/// Entity for a public identifier, if the bits are well formed.
pub fn entity_of(id: ActorId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
