//! Furnace state machine - fuel consumption and smelt progress per tick
//!
//! Each block entity advances independently; no state is shared between
//! furnaces and a tick over zero entities is a no-op.

use super::blocks::BlockRegistry;
use super::recipes::RecipeBook;
use crate::entity::ItemStack;
use crate::world::BlockEntity;

/// Furnace slot layout
pub const SLOT_INPUT: usize = 0;
pub const SLOT_FUEL: usize = 1;
pub const SLOT_OUTPUT: usize = 2;

/// Advance one furnace by `dt` seconds.
///
/// Fuel is consumed one unit at a time, and only when a valid recipe could
/// actually run: a recognized input with output space for its result.
/// Progress accumulates only while fuel burns; losing the recipe or running
/// dry resets progress without consuming anything.
pub fn tick(entity: &mut BlockEntity, recipes: &RecipeBook, registry: &BlockRegistry, dt: f32) {
    let recipe = entity
        .inventory
        .get(SLOT_INPUT)
        .and_then(|stack| recipes.recipe_for(stack.item))
        .copied();

    let output_has_room = recipe.map_or(false, |recipe| {
        match entity.inventory.get(SLOT_OUTPUT) {
            None => true,
            Some(out) => {
                out.item == recipe.output && out.count < registry.get(recipe.output).max_stack
            }
        }
    });

    let Some(recipe) = recipe.filter(|_| output_has_room) else {
        entity.smelt_time = 0.0;
        if entity.fuel_time > 0.0 {
            entity.fuel_time -= dt;
        }
        return;
    };

    if entity.fuel_time <= 0.0 {
        if let Some(fuel) = entity.inventory.get(SLOT_FUEL) {
            let burn_time = recipes.burn_time(fuel.item);
            // Non-fuels burn for zero seconds and are never consumed
            if burn_time > 0.0 && entity.inventory.remove(SLOT_FUEL, 1) {
                entity.fuel_time = burn_time;
                entity.max_fuel_time = burn_time;
            }
        }
    }

    if entity.fuel_time > 0.0 {
        entity.fuel_time -= dt;
        entity.smelt_time += dt;

        if entity.smelt_time >= recipe.cook_time {
            entity.smelt_time = 0.0;
            entity.inventory.remove(SLOT_INPUT, 1);
            let leftover = entity.inventory.add_to_slot(
                ItemStack::new(recipe.output, 1),
                SLOT_OUTPUT,
                registry,
            );
            debug_assert!(leftover.is_none(), "output capacity checked above");
        }
    } else {
        entity.smelt_time = 0.0;
    }
}
