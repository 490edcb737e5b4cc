//! World - sparse chunk store with streaming load/unload and block access

use std::collections::HashMap;

use glam::{IVec2, Vec2};

use crate::config::WorldConfig;
use crate::simulation::{furnace, BlockId, BlockRegistry, RecipeBook};
use crate::world::chunk::{local_key, split_local_key, BlockEntity, Chunk, BLOCK_SIZE, CHUNK_SIZE};
use crate::world::generation::TerrainGenerator;

/// The game world: a sparse map of chunks plus the generator that fills
/// them on demand.
///
/// Querying any coordinate never fails - an absent chunk is generated
/// synchronously on first access.
pub struct World {
    chunks: HashMap<IVec2, Chunk>,
    generator: TerrainGenerator,
    registry: BlockRegistry,
    seed: String,
    view_distance: i32,
    evict_margin: i32,
}

impl World {
    pub fn new(seed: &str, registry: BlockRegistry, config: WorldConfig) -> Self {
        log::info!("Creating world (seed: {:?})", seed);
        Self {
            chunks: HashMap::new(),
            generator: TerrainGenerator::new(seed, config.gen),
            registry,
            seed: seed.to_string(),
            view_distance: config.view_distance,
            evict_margin: config.evict_margin,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Convert world block coordinates to chunk coordinates + local offset
    pub fn world_to_chunk_coords(world_x: i32, world_y: i32) -> (IVec2, usize, usize) {
        let chunk_x = world_x.div_euclid(CHUNK_SIZE as i32);
        let chunk_y = world_y.div_euclid(CHUNK_SIZE as i32);
        let local_x = world_x.rem_euclid(CHUNK_SIZE as i32) as usize;
        let local_y = world_y.rem_euclid(CHUNK_SIZE as i32) as usize;
        (IVec2::new(chunk_x, chunk_y), local_x, local_y)
    }

    fn ensure_chunk(&mut self, pos: IVec2) {
        if self.chunks.contains_key(&pos) {
            return;
        }
        let mut chunk = Chunk::new(pos.x, pos.y);
        self.generator.fill_chunk(&mut chunk);
        log::debug!(
            "[GEN] Chunk ({}, {}) generated - {} non-empty cells",
            pos.x,
            pos.y,
            chunk.count_non_empty()
        );
        self.chunks.insert(pos, chunk);
    }

    /// Get the chunk at chunk coordinates, generating it on first access
    pub fn get_chunk(&mut self, chunk_x: i32, chunk_y: i32) -> &Chunk {
        let pos = IVec2::new(chunk_x, chunk_y);
        self.ensure_chunk(pos);
        &self.chunks[&pos]
    }

    /// Loaded chunk at chunk coordinates, if any
    pub fn get_chunk_if_loaded(&self, chunk_x: i32, chunk_y: i32) -> Option<&Chunk> {
        self.chunks.get(&IVec2::new(chunk_x, chunk_y))
    }

    pub fn chunk_mut(&mut self, pos: IVec2) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    /// Block id at world block coordinates. Always defined.
    pub fn get_block(&mut self, world_x: i32, world_y: i32) -> u8 {
        let (pos, local_x, local_y) = Self::world_to_chunk_coords(world_x, world_y);
        self.ensure_chunk(pos);
        self.chunks[&pos].get_block(local_x, local_y)
    }

    /// Write a block id at world block coordinates.
    ///
    /// A silent no-op when the current block is indestructible. Marks the
    /// chunk dirty and synchronizes block-entity state: entity-bearing ids
    /// get a freshly sized inventory provisioned (if none exists yet),
    /// anything else deletes prior entity state at that coordinate.
    pub fn set_block(&mut self, world_x: i32, world_y: i32, id: u8) {
        let (pos, local_x, local_y) = Self::world_to_chunk_coords(world_x, world_y);
        self.ensure_chunk(pos);

        let registry = &self.registry;
        let Some(chunk) = self.chunks.get_mut(&pos) else {
            return;
        };

        let current = chunk.get_block(local_x, local_y);
        if registry.get(current).indestructible {
            return;
        }

        chunk.set_block(local_x, local_y, id);

        let key = local_key(local_x, local_y);
        match registry.get(id).entity_slots {
            Some(slots) => {
                if chunk.block_entity(key).is_none() {
                    chunk.insert_block_entity(key, BlockEntity::new(slots));
                }
            }
            None => {
                chunk.remove_block_entity(key);
            }
        }
    }

    /// Block entity at world block coordinates, if the chunk is loaded and
    /// an entity exists there.
    pub fn block_entity_at(&self, world_x: i32, world_y: i32) -> Option<&BlockEntity> {
        let (pos, local_x, local_y) = Self::world_to_chunk_coords(world_x, world_y);
        self.chunks
            .get(&pos)?
            .block_entity(local_key(local_x, local_y))
    }

    /// Mutable block entity access; this is the handle UI collaborators
    /// use to edit a furnace or chest inventory in place.
    pub fn block_entity_at_mut(&mut self, world_x: i32, world_y: i32) -> Option<&mut BlockEntity> {
        let (pos, local_x, local_y) = Self::world_to_chunk_coords(world_x, world_y);
        self.chunks
            .get_mut(&pos)?
            .block_entity_mut(local_key(local_x, local_y))
    }

    /// Stream chunks around a focus position (world pixels): everything
    /// within the view distance is loaded, everything beyond the view
    /// distance plus the hysteresis margin is evicted.
    ///
    /// Eviction does not persist - export dirty chunks first.
    pub fn update(&mut self, focus: Vec2) {
        let chunk_pixels = CHUNK_SIZE as f32 * BLOCK_SIZE;
        let focus_chunk = IVec2::new(
            (focus.x / chunk_pixels).floor() as i32,
            (focus.y / chunk_pixels).floor() as i32,
        );

        for cy in (focus_chunk.y - self.view_distance)..=(focus_chunk.y + self.view_distance) {
            for cx in (focus_chunk.x - self.view_distance)..=(focus_chunk.x + self.view_distance) {
                self.ensure_chunk(IVec2::new(cx, cy));
            }
        }

        let keep = self.view_distance + self.evict_margin;
        let stale: Vec<IVec2> = self
            .chunks
            .keys()
            .filter(|pos| {
                let dist = (pos.x - focus_chunk.x)
                    .abs()
                    .max((pos.y - focus_chunk.y).abs());
                dist > keep
            })
            .copied()
            .collect();

        for pos in stale {
            if let Some(chunk) = self.chunks.remove(&pos) {
                if chunk.dirty {
                    log::warn!(
                        "Evicting dirty chunk ({}, {}) - unsaved mutations lost",
                        pos.x,
                        pos.y
                    );
                } else {
                    log::debug!("Evicted chunk ({}, {})", pos.x, pos.y);
                }
            }
        }
    }

    /// Advance every loaded smelter-type block entity by `dt` seconds.
    ///
    /// Each furnace runs its state machine independently; the lit/unlit
    /// block variant is written back only when it actually changes, so an
    /// idle furnace never dirties its chunk.
    pub fn update_block_entities(&mut self, recipes: &RecipeBook, dt: f32) {
        let mut variant_changes: Vec<(i32, i32, u8)> = Vec::new();
        let positions: Vec<IVec2> = self.chunks.keys().copied().collect();

        for pos in positions {
            let registry = &self.registry;
            let Some(chunk) = self.chunks.get_mut(&pos) else {
                continue;
            };

            for key in chunk.block_entity_keys() {
                let (local_x, local_y) = split_local_key(key);
                let id = chunk.get_block(local_x, local_y);
                if id != BlockId::FURNACE && id != BlockId::FURNACE_LIT {
                    continue;
                }
                let Some(entity) = chunk.block_entity_mut(key) else {
                    continue;
                };

                furnace::tick(entity, recipes, registry, dt);

                let variant = if entity.is_lit() {
                    BlockId::FURNACE_LIT
                } else {
                    BlockId::FURNACE
                };
                if variant != id {
                    variant_changes.push((
                        pos.x * CHUNK_SIZE as i32 + local_x as i32,
                        pos.y * CHUNK_SIZE as i32 + local_y as i32,
                        variant,
                    ));
                }
            }
        }

        for (world_x, world_y, id) in variant_changes {
            self.set_block(world_x, world_y, id);
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn loaded_chunk_positions(&self) -> Vec<IVec2> {
        self.chunks.keys().copied().collect()
    }

    /// Positions of chunks carrying unsaved mutations
    pub fn dirty_positions(&self) -> Vec<IVec2> {
        self.chunks
            .iter()
            .filter(|(_, chunk)| chunk.dirty)
            .map(|(&pos, _)| pos)
            .collect()
    }

    /// Reset the dirty flag on every loaded chunk; called by the save
    /// collaborator after a successful export.
    pub fn clear_dirty(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.mark_clean();
        }
    }

    pub(crate) fn chunks(&self) -> &HashMap<IVec2, Chunk> {
        &self.chunks
    }

    pub(crate) fn insert_chunk(&mut self, chunk: Chunk) {
        self.chunks.insert(IVec2::new(chunk.x, chunk.y), chunk);
    }
}
