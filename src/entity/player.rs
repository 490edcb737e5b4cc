//! The player entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use crate::world::physics::Body;

/// The player: a walking body with an inventory and a hotbar selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the bounding box, world pixels
    pub position: Vec2,
    pub velocity: Vec2,
    /// Is the player standing on ground?
    #[serde(skip)]
    pub on_ground: bool,
    /// Creative-style flight; disables gravity while set
    pub flying: bool,
    pub inventory: Inventory,
    /// Currently selected inventory slot (hotbar)
    pub selected_slot: usize,
}

impl Player {
    pub const WIDTH: f32 = 12.0; // pixels
    pub const HEIGHT: f32 = 28.0; // pixels, under two blocks so steps fit

    pub const INVENTORY_SLOTS: usize = 36;

    /// Create a new player at the specified position
    pub fn new(position: Vec2) -> Self {
        Player {
            position,
            velocity: Vec2::ZERO,
            on_ground: false, // Start in air
            flying: false,
            inventory: Inventory::new(Self::INVENTORY_SLOTS),
            selected_slot: 0,
        }
    }

    /// Stack in the selected hotbar slot, if any
    pub fn held_stack(&self) -> Option<&super::inventory::ItemStack> {
        self.inventory.get(self.selected_slot)
    }
}

impl Body for Player {
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
        Vec2::new(Self::WIDTH, Self::HEIGHT)
    }

    fn on_ground(&self) -> bool {
        self.on_ground
    }

    fn set_on_ground(&mut self, grounded: bool) {
        self.on_ground = grounded;
    }

    fn flying(&self) -> bool {
        self.flying
    }

    fn steps_up(&self) -> bool {
        true
    }
}
