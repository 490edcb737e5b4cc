//! Fixed-slot inventory - ordered item stacks with registry-sourced limits

use serde::{Deserialize, Serialize};

use crate::simulation::BlockRegistry;

/// A stack of items occupying one inventory slot.
///
/// A present stack always has `count > 0`; anything that would drop it to
/// zero collapses the slot to empty instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: u8,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: u8, count: u32) -> Self {
        ItemStack { item, count }
    }
}

/// Fixed-length ordered container of optional item stacks.
///
/// Used by the player, chests and furnace block entities. All accessors are
/// total: out-of-range slots answer with empty/false rather than panicking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    /// Create an inventory with the given number of empty slots
    pub fn new(slot_count: usize) -> Self {
        Inventory {
            slots: vec![None; slot_count],
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Add a stack, topping up compatible non-full stacks in slot order
    /// first, then filling empty slots. Returns whatever could not be
    /// placed; `None` means fully absorbed.
    pub fn add(&mut self, stack: ItemStack, registry: &BlockRegistry) -> Option<ItemStack> {
        if stack.count == 0 {
            return None;
        }
        let max_stack = registry.get(stack.item).max_stack;
        let mut remaining = stack.count;

        // Top up existing stacks of the same item first
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if let Some(existing) = slot {
                if existing.item == stack.item && existing.count < max_stack {
                    let space = max_stack - existing.count;
                    let moved = remaining.min(space);
                    existing.count += moved;
                    remaining -= moved;
                }
            }
        }

        // Then open fresh stacks in empty slots
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let moved = remaining.min(max_stack);
                *slot = Some(ItemStack::new(stack.item, moved));
                remaining -= moved;
            }
        }

        (remaining > 0).then(|| ItemStack::new(stack.item, remaining))
    }

    /// Add a stack to one specific slot, merging if compatible or placing if
    /// empty. Returns the whole stack unmoved when the slot is out of range
    /// or holds a different item.
    pub fn add_to_slot(
        &mut self,
        stack: ItemStack,
        slot: usize,
        registry: &BlockRegistry,
    ) -> Option<ItemStack> {
        if stack.count == 0 {
            return None;
        }
        let max_stack = registry.get(stack.item).max_stack;

        let Some(target) = self.slots.get_mut(slot) else {
            return Some(stack);
        };

        match target {
            None => {
                let moved = stack.count.min(max_stack);
                *target = Some(ItemStack::new(stack.item, moved));
                let remaining = stack.count - moved;
                (remaining > 0).then(|| ItemStack::new(stack.item, remaining))
            }
            Some(existing) if existing.item == stack.item => {
                let space = max_stack.saturating_sub(existing.count);
                let moved = stack.count.min(space);
                existing.count += moved;
                let remaining = stack.count - moved;
                (remaining > 0).then(|| ItemStack::new(stack.item, remaining))
            }
            Some(_) => Some(stack),
        }
    }

    /// Remove up to `count` items from a slot, clearing it when it reaches
    /// zero. Returns false if the slot was already empty or out of range.
    pub fn remove(&mut self, slot: usize, count: u32) -> bool {
        let Some(target) = self.slots.get_mut(slot) else {
            return false;
        };
        let Some(stack) = target else {
            return false;
        };

        if stack.count > count {
            stack.count -= count;
        } else {
            *target = None;
        }
        true
    }

    /// Direct slot read; `None` for empty or out-of-range slots
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Direct slot write; no-op on out-of-range slots. A zero-count stack
    /// collapses to empty.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) {
        if let Some(target) = self.slots.get_mut(slot) {
            *target = stack.filter(|s| s.count > 0);
        }
    }

    /// All slots in order, empty gaps included
    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    /// Total count of a given item across all slots
    pub fn count_of(&self, item: u8) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.item == item)
            .map(|s| s.count)
            .sum()
    }

    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Rebuild an inventory of exactly `slot_count` slots from a serialized
    /// slot list, preserving order and gaps; excess slots are dropped.
    pub fn from_slots_sized(slots: Vec<Option<ItemStack>>, slot_count: usize) -> Self {
        let mut inventory = Inventory::new(slot_count);
        for (i, slot) in slots.into_iter().take(slot_count).enumerate() {
            inventory.set(i, slot);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{BlockId, BlockRegistry};

    fn registry() -> BlockRegistry {
        BlockRegistry::new()
    }

    #[test]
    fn test_add_fills_in_slot_order() {
        let registry = registry();
        let mut inv = Inventory::new(4);

        assert!(inv.add(ItemStack::new(BlockId::DIRT, 10), &registry).is_none());
        assert!(inv.add(ItemStack::new(BlockId::DIRT, 5), &registry).is_none());

        // Merged into the first slot, not spread out
        assert_eq!(inv.get(0), Some(&ItemStack::new(BlockId::DIRT, 15)));
        assert_eq!(inv.occupied_slots(), 1);
    }

    #[test]
    fn test_add_occupies_ceil_of_count_over_max_stack() {
        let registry = registry();
        let max = registry.get(BlockId::DIRT).max_stack;
        let mut inv = Inventory::new(10);

        let count = max * 2 + 7;
        assert!(inv.add(ItemStack::new(BlockId::DIRT, count), &registry).is_none());

        assert_eq!(inv.occupied_slots(), 3); // ceil(count / max)
        assert_eq!(inv.get(0).unwrap().count, max);
        assert_eq!(inv.get(1).unwrap().count, max);
        assert_eq!(inv.get(2).unwrap().count, 7);
    }

    #[test]
    fn test_add_returns_leftover_when_full() {
        let registry = registry();
        let max = registry.get(BlockId::STONE).max_stack;
        let mut inv = Inventory::new(1);

        let leftover = inv.add(ItemStack::new(BlockId::STONE, max + 13), &registry);
        assert_eq!(leftover, Some(ItemStack::new(BlockId::STONE, 13)));
        assert_eq!(inv.get(0).unwrap().count, max);
    }

    #[test]
    fn test_add_tops_up_before_opening_new_slots() {
        let registry = registry();
        let max = registry.get(BlockId::SAND).max_stack;
        let mut inv = Inventory::new(4);
        inv.set(2, Some(ItemStack::new(BlockId::SAND, max - 1)));

        assert!(inv.add(ItemStack::new(BlockId::SAND, 3), &registry).is_none());
        assert_eq!(inv.get(2).unwrap().count, max);
        assert_eq!(inv.get(0).unwrap().count, 2);
    }

    #[test]
    fn test_add_to_slot() {
        let registry = registry();
        let mut inv = Inventory::new(3);

        // Place into empty
        assert!(inv
            .add_to_slot(ItemStack::new(BlockId::DIRT, 4), 1, &registry)
            .is_none());
        // Merge compatible
        assert!(inv
            .add_to_slot(ItemStack::new(BlockId::DIRT, 2), 1, &registry)
            .is_none());
        assert_eq!(inv.get(1), Some(&ItemStack::new(BlockId::DIRT, 6)));

        // Incompatible comes back unmoved
        let back = inv.add_to_slot(ItemStack::new(BlockId::STONE, 9), 1, &registry);
        assert_eq!(back, Some(ItemStack::new(BlockId::STONE, 9)));

        // Out of range comes back unmoved
        let back = inv.add_to_slot(ItemStack::new(BlockId::STONE, 9), 99, &registry);
        assert_eq!(back, Some(ItemStack::new(BlockId::STONE, 9)));
    }

    #[test]
    fn test_add_to_slot_respects_stack_ceiling() {
        let registry = registry();
        let max = registry.get(BlockId::DIRT).max_stack;
        let mut inv = Inventory::new(1);
        inv.set(0, Some(ItemStack::new(BlockId::DIRT, max - 2)));

        let leftover = inv.add_to_slot(ItemStack::new(BlockId::DIRT, 5), 0, &registry);
        assert_eq!(leftover, Some(ItemStack::new(BlockId::DIRT, 3)));
        assert_eq!(inv.get(0).unwrap().count, max);
    }

    #[test]
    fn test_remove() {
        let registry = registry();
        let mut inv = Inventory::new(2);
        inv.add(ItemStack::new(BlockId::DIRT, 10), &registry);

        assert!(inv.remove(0, 4));
        assert_eq!(inv.get(0).unwrap().count, 6);

        // Removing past zero clears the slot
        assert!(inv.remove(0, 100));
        assert!(inv.get(0).is_none());

        // Already empty / out of range
        assert!(!inv.remove(0, 1));
        assert!(!inv.remove(42, 1));
    }

    #[test]
    fn test_set_collapses_zero_counts() {
        let mut inv = Inventory::new(2);
        inv.set(0, Some(ItemStack::new(BlockId::DIRT, 0)));
        assert!(inv.get(0).is_none());

        // Out of range is a no-op, not a panic
        inv.set(17, Some(ItemStack::new(BlockId::DIRT, 1)));
        assert_eq!(inv.slot_count(), 2);
    }

    #[test]
    fn test_serialization_preserves_order_and_gaps() {
        let mut inv = Inventory::new(5);
        inv.set(1, Some(ItemStack::new(BlockId::STONE, 12)));
        inv.set(4, Some(ItemStack::new(BlockId::DIRT, 3)));

        let bytes =
            bincode_next::serde::encode_to_vec(&inv, bincode_next::config::standard()).unwrap();
        let (restored, _): (Inventory, _) =
            bincode_next::serde::decode_from_slice(&bytes, bincode_next::config::standard())
                .unwrap();

        assert_eq!(restored, inv);
        assert!(restored.get(0).is_none());
        assert_eq!(restored.get(1), Some(&ItemStack::new(BlockId::STONE, 12)));
    }

    #[test]
    fn test_from_slots_sized_truncates_and_pads() {
        let slots = vec![
            Some(ItemStack::new(BlockId::DIRT, 1)),
            None,
            Some(ItemStack::new(BlockId::STONE, 2)),
        ];

        let shrunk = Inventory::from_slots_sized(slots.clone(), 2);
        assert_eq!(shrunk.slot_count(), 2);
        assert_eq!(shrunk.get(0), Some(&ItemStack::new(BlockId::DIRT, 1)));
        assert!(shrunk.get(1).is_none());

        let grown = Inventory::from_slots_sized(slots, 5);
        assert_eq!(grown.slot_count(), 5);
        assert_eq!(grown.get(2), Some(&ItemStack::new(BlockId::STONE, 2)));
        assert!(grown.get(4).is_none());
    }
}
