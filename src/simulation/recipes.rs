//! Smelting recipes and fuel burn times

use super::blocks::BlockId;

/// One smelting transformation
#[derive(Debug, Clone, Copy)]
pub struct SmeltingRecipe {
    pub input: u8,
    pub output: u8,
    /// Seconds of lit furnace time per item
    pub cook_time: f32,
}

/// Lookup tables for the furnace state machine. Built once; unknown ids
/// smelt into nothing and burn for zero seconds.
pub struct RecipeBook {
    recipes: Vec<SmeltingRecipe>,
    fuels: Vec<(u8, f32)>,
}

impl RecipeBook {
    pub fn new() -> Self {
        let mut book = Self {
            recipes: Vec::new(),
            fuels: Vec::new(),
        };

        book.register_recipe(BlockId::IRON_ORE, BlockId::IRON_INGOT, 10.0);
        book.register_recipe(BlockId::SAND, BlockId::GLASS, 10.0);
        book.register_recipe(BlockId::WOOD, BlockId::CHARCOAL, 10.0);
        book.register_recipe(BlockId::COBBLESTONE, BlockId::STONE, 10.0);

        book.register_fuel(BlockId::COAL, 80.0);
        book.register_fuel(BlockId::CHARCOAL, 80.0);
        book.register_fuel(BlockId::WOOD, 15.0);
        book.register_fuel(BlockId::PLANKS, 15.0);
        book.register_fuel(BlockId::SAPLING, 5.0);

        book
    }

    pub fn register_recipe(&mut self, input: u8, output: u8, cook_time: f32) {
        self.recipes.push(SmeltingRecipe {
            input,
            output,
            cook_time,
        });
    }

    pub fn register_fuel(&mut self, item: u8, burn_time: f32) {
        self.fuels.push((item, burn_time));
    }

    /// Recipe whose input matches the given item, if any
    pub fn recipe_for(&self, input: u8) -> Option<&SmeltingRecipe> {
        self.recipes.iter().find(|r| r.input == input)
    }

    /// Burn time for a fuel item; 0 for anything that is not a fuel
    pub fn burn_time(&self, item: u8) -> f32 {
        self.fuels
            .iter()
            .find(|(fuel, _)| *fuel == item)
            .map(|(_, time)| *time)
            .unwrap_or(0.0)
    }
}

impl Default for RecipeBook {
    fn default() -> Self {
        Self::new()
    }
}
