//! Block type registry - static descriptor table consulted by generation,
//! physics and simulation

use rand::Rng;

use crate::entity::ItemStack;

/// Built-in block ids. Items dropped or smelted share the same id space;
/// 0 is reserved for empty.
pub struct BlockId;

impl BlockId {
    pub const AIR: u8 = 0;
    pub const GRASS: u8 = 1;
    pub const DIRT: u8 = 2;
    pub const STONE: u8 = 3;
    pub const COBBLESTONE: u8 = 4;
    pub const BEDROCK: u8 = 5;
    pub const WOOD: u8 = 6;
    pub const LEAVES: u8 = 7;
    pub const SAND: u8 = 8;
    pub const COAL_ORE: u8 = 9;
    pub const IRON_ORE: u8 = 10;
    pub const PLANKS: u8 = 11;
    pub const FURNACE: u8 = 12;
    pub const FURNACE_LIT: u8 = 13;
    pub const CHEST: u8 = 14;
    pub const TORCH: u8 = 15;

    // Item-only ids (never generated into terrain)
    pub const COAL: u8 = 16;
    pub const IRON_INGOT: u8 = 17;
    pub const CHARCOAL: u8 = 18;
    pub const GLASS: u8 = 19;
    pub const SAPLING: u8 = 20;
}

/// Tool families recognized by break requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Pickaxe,
    Axe,
    Shovel,
}

/// Tool quality tiers, ordered weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToolTier {
    Wood,
    Stone,
    Iron,
}

/// What a block yields when broken
#[derive(Debug, Clone, Copy)]
pub struct DropSpec {
    pub item: u8,
    /// Inclusive count range rolled per break
    pub min: u32,
    pub max: u32,
}

impl DropSpec {
    pub const fn one(item: u8) -> Self {
        Self { item, min: 1, max: 1 }
    }
}

/// Immutable descriptor for one block type
#[derive(Debug, Clone)]
pub struct BlockDef {
    pub name: &'static str,
    /// Whether bodies collide with this block
    pub solid: bool,
    /// Seconds to break with a bare hand
    pub break_time: f32,
    /// Tool family and minimum tier required to harvest the drop
    pub tool: Option<(ToolKind, ToolTier)>,
    /// Emitted light level, 0-15
    pub light: Option<u8>,
    pub drop: Option<DropSpec>,
    /// Cannot be broken or replaced at all
    pub indestructible: bool,
    /// Inventory slot count for the attached block entity; `Some` marks the
    /// block as entity-bearing
    pub entity_slots: Option<usize>,
    /// Merge ceiling when this id is stacked in an inventory
    pub max_stack: u32,
}

impl Default for BlockDef {
    fn default() -> Self {
        Self {
            name: "unknown",
            solid: false,
            break_time: 0.0,
            tool: None,
            light: None,
            drop: None,
            indestructible: false,
            entity_slots: None,
            max_stack: 64,
        }
    }
}

/// Registry of all block types. Built once at startup; no mutation API.
pub struct BlockRegistry {
    defs: Vec<BlockDef>,
    fallback: BlockDef,
}

impl BlockRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            defs: Vec::new(),
            fallback: BlockDef::default(),
        };
        registry.register_defaults();
        registry
    }

    fn register(&mut self, id: u8, def: BlockDef) {
        let index = id as usize;
        if index >= self.defs.len() {
            self.defs.resize(index + 1, BlockDef::default());
        }
        self.defs[index] = def;
    }

    fn register_defaults(&mut self) {
        self.register(
            BlockId::AIR,
            BlockDef {
                name: "air",
                ..Default::default()
            },
        );
        self.register(
            BlockId::GRASS,
            BlockDef {
                name: "grass",
                solid: true,
                break_time: 0.6,
                drop: Some(DropSpec::one(BlockId::DIRT)),
                ..Default::default()
            },
        );
        self.register(
            BlockId::DIRT,
            BlockDef {
                name: "dirt",
                solid: true,
                break_time: 0.5,
                drop: Some(DropSpec::one(BlockId::DIRT)),
                ..Default::default()
            },
        );
        self.register(
            BlockId::STONE,
            BlockDef {
                name: "stone",
                solid: true,
                break_time: 1.5,
                tool: Some((ToolKind::Pickaxe, ToolTier::Wood)),
                drop: Some(DropSpec::one(BlockId::COBBLESTONE)),
                ..Default::default()
            },
        );
        self.register(
            BlockId::COBBLESTONE,
            BlockDef {
                name: "cobblestone",
                solid: true,
                break_time: 2.0,
                tool: Some((ToolKind::Pickaxe, ToolTier::Wood)),
                drop: Some(DropSpec::one(BlockId::COBBLESTONE)),
                ..Default::default()
            },
        );
        self.register(
            BlockId::BEDROCK,
            BlockDef {
                name: "bedrock",
                solid: true,
                break_time: f32::INFINITY,
                indestructible: true,
                ..Default::default()
            },
        );
        self.register(
            BlockId::WOOD,
            BlockDef {
                name: "wood",
                solid: true,
                break_time: 2.0,
                drop: Some(DropSpec::one(BlockId::WOOD)),
                ..Default::default()
            },
        );
        self.register(
            BlockId::LEAVES,
            BlockDef {
                name: "leaves",
                solid: true,
                break_time: 0.2,
                drop: Some(DropSpec {
                    item: BlockId::SAPLING,
                    min: 0,
                    max: 1,
                }),
                ..Default::default()
            },
        );
        self.register(
            BlockId::SAND,
            BlockDef {
                name: "sand",
                solid: true,
                break_time: 0.5,
                tool: Some((ToolKind::Shovel, ToolTier::Wood)),
                drop: Some(DropSpec::one(BlockId::SAND)),
                ..Default::default()
            },
        );
        self.register(
            BlockId::COAL_ORE,
            BlockDef {
                name: "coal_ore",
                solid: true,
                break_time: 3.0,
                tool: Some((ToolKind::Pickaxe, ToolTier::Wood)),
                drop: Some(DropSpec {
                    item: BlockId::COAL,
                    min: 1,
                    max: 2,
                }),
                ..Default::default()
            },
        );
        self.register(
            BlockId::IRON_ORE,
            BlockDef {
                name: "iron_ore",
                solid: true,
                break_time: 3.0,
                tool: Some((ToolKind::Pickaxe, ToolTier::Stone)),
                drop: Some(DropSpec::one(BlockId::IRON_ORE)),
                ..Default::default()
            },
        );
        self.register(
            BlockId::PLANKS,
            BlockDef {
                name: "planks",
                solid: true,
                break_time: 1.5,
                tool: Some((ToolKind::Axe, ToolTier::Wood)),
                drop: Some(DropSpec::one(BlockId::PLANKS)),
                ..Default::default()
            },
        );
        self.register(
            BlockId::FURNACE,
            BlockDef {
                name: "furnace",
                solid: true,
                break_time: 3.5,
                tool: Some((ToolKind::Pickaxe, ToolTier::Wood)),
                drop: Some(DropSpec::one(BlockId::FURNACE)),
                entity_slots: Some(3),
                ..Default::default()
            },
        );
        self.register(
            BlockId::FURNACE_LIT,
            BlockDef {
                name: "furnace_lit",
                solid: true,
                break_time: 3.5,
                tool: Some((ToolKind::Pickaxe, ToolTier::Wood)),
                light: Some(13),
                drop: Some(DropSpec::one(BlockId::FURNACE)),
                entity_slots: Some(3),
                ..Default::default()
            },
        );
        self.register(
            BlockId::CHEST,
            BlockDef {
                name: "chest",
                solid: true,
                break_time: 2.5,
                tool: Some((ToolKind::Axe, ToolTier::Wood)),
                drop: Some(DropSpec::one(BlockId::CHEST)),
                entity_slots: Some(27),
                ..Default::default()
            },
        );
        self.register(
            BlockId::TORCH,
            BlockDef {
                name: "torch",
                break_time: 0.1,
                light: Some(14),
                drop: Some(DropSpec::one(BlockId::TORCH)),
                ..Default::default()
            },
        );
        self.register(
            BlockId::COAL,
            BlockDef {
                name: "coal",
                ..Default::default()
            },
        );
        self.register(
            BlockId::IRON_INGOT,
            BlockDef {
                name: "iron_ingot",
                ..Default::default()
            },
        );
        self.register(
            BlockId::CHARCOAL,
            BlockDef {
                name: "charcoal",
                ..Default::default()
            },
        );
        self.register(
            BlockId::GLASS,
            BlockDef {
                name: "glass",
                solid: true,
                break_time: 0.3,
                ..Default::default()
            },
        );
        self.register(
            BlockId::SAPLING,
            BlockDef {
                name: "sapling",
                break_time: 0.1,
                drop: Some(DropSpec::one(BlockId::SAPLING)),
                ..Default::default()
            },
        );
    }

    /// Look up a descriptor. Total: unknown ids resolve to a default
    /// (non-solid, no drop) descriptor instead of failing.
    pub fn get(&self, id: u8) -> &BlockDef {
        self.defs.get(id as usize).unwrap_or(&self.fallback)
    }

    pub fn is_solid(&self, id: u8) -> bool {
        self.get(id).solid
    }

    pub fn is_entity_bearing(&self, id: u8) -> bool {
        self.get(id).entity_slots.is_some()
    }

    /// Minimum tool tier needed to harvest this block's drop, if a tool is
    /// required at all. Derived from the descriptor, not separately stored.
    pub fn min_tool_tier(&self, id: u8) -> Option<ToolTier> {
        self.get(id).tool.map(|(_, tier)| tier)
    }

    /// Whether a held tool (or bare hand, `None`) harvests this block
    pub fn harvestable_with(&self, id: u8, held: Option<(ToolKind, ToolTier)>) -> bool {
        match self.get(id).tool {
            None => true,
            Some((kind, tier)) => {
                matches!(held, Some((held_kind, held_tier)) if held_kind == kind && held_tier >= tier)
            }
        }
    }

    /// Roll the drop for a broken block. `None` for blocks with no drop
    /// spec or a roll of zero.
    pub fn roll_drop<R: Rng>(&self, id: u8, rng: &mut R) -> Option<ItemStack> {
        let spec = self.get(id).drop?;
        let count = rng.gen_range(spec.min..=spec.max);
        (count > 0).then(|| ItemStack::new(spec.item, count))
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
