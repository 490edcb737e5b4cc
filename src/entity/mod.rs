//! Entities - the player, item pickups and the inventory container they
//! share with block entities

pub mod inventory;
pub mod item_drop;
pub mod player;

pub use inventory::{Inventory, ItemStack};
pub use item_drop::ItemDrop;
pub use player::Player;
