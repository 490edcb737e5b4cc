//! Dropped-item pickups - free-floating stacks resolved by the same physics
//! as the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::inventory::ItemStack;
use crate::world::physics::Body;

/// A stack lying in the world, waiting to be picked up. The canonical way
/// inventory-add leftovers and block drops re-enter the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDrop {
    pub position: Vec2,
    pub velocity: Vec2,
    #[serde(skip)]
    pub on_ground: bool,
    pub stack: ItemStack,
    /// Seconds since the drop spawned
    pub age: f32,
}

impl ItemDrop {
    pub const SIZE: f32 = 8.0; // pixels
    /// Drops despawn after five minutes
    pub const MAX_AGE: f32 = 300.0;

    pub fn new(position: Vec2, stack: ItemStack) -> Self {
        ItemDrop {
            position,
            velocity: Vec2::ZERO,
            on_ground: false,
            stack,
            age: 0.0,
        }
    }

    pub fn tick_age(&mut self, dt: f32) {
        self.age += dt;
    }

    pub fn expired(&self) -> bool {
        self.age >= Self::MAX_AGE
    }
}

impl Body for ItemDrop {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn size(&self) -> Vec2 {
        Vec2::splat(Self::SIZE)
    }

    fn on_ground(&self) -> bool {
        self.on_ground
    }

    fn set_on_ground(&mut self, grounded: bool) {
        self.on_ground = grounded;
    }

    // Pickups never step up ledges; the default capability flags stand.
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::BlockId;

    #[test]
    fn test_drop_ages_out() {
        let mut drop = ItemDrop::new(Vec2::ZERO, ItemStack::new(BlockId::COAL, 2));
        assert!(!drop.expired());

        drop.tick_age(ItemDrop::MAX_AGE - 0.1);
        assert!(!drop.expired());
        drop.tick_age(0.2);
        assert!(drop.expired());
    }

    #[test]
    fn test_drop_does_not_step_up() {
        let drop = ItemDrop::new(Vec2::ZERO, ItemStack::new(BlockId::COAL, 1));
        assert!(!drop.steps_up());
        assert!(!drop.flying());
    }
}
