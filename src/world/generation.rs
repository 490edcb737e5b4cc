//! Terrain generator - noise-driven strata and tree placement
//!
//! Generation is a pure function of seed + chunk coordinate: filling the
//! same chunk twice yields byte-identical grids. All randomness flows from
//! the seeded noise field and per-column PRNG streams; nothing here touches
//! a global RNG.

use crate::config::GenConfig;
use crate::simulation::BlockId;
use crate::world::chunk::{Chunk, CHUNK_SIZE};
use crate::world::noise::{hash_seed, NoiseField, SeedRng};

/// World generator bound to one seed
pub struct TerrainGenerator {
    seed_state: [u32; 4],
    height_noise: NoiseField,
    config: GenConfig,
}

impl TerrainGenerator {
    pub fn new(seed: &str, config: GenConfig) -> Self {
        let seed_state = hash_seed(seed);
        Self {
            seed_state,
            height_noise: NoiseField::from_state(seed_state),
            config,
        }
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Surface row for a column (y grows downward; smaller = higher)
    pub fn height_at(&self, world_x: i32) -> i32 {
        let sample = self.height_noise.sample(world_x as f64 * self.config.frequency);
        (self.config.base_height + self.config.amplitude * sample).floor() as i32
    }

    /// Fill a chunk with terrain strata, then run the tree pass.
    /// The chunk comes out clean: generated content is regenerable and
    /// must not be flagged for persistence.
    pub fn fill_chunk(&self, chunk: &mut Chunk) {
        let origin_x = chunk.x * CHUNK_SIZE as i32;
        let origin_y = chunk.y * CHUNK_SIZE as i32;

        for local_x in 0..CHUNK_SIZE {
            let world_x = origin_x + local_x as i32;
            let surface = self.height_at(world_x);

            for local_y in 0..CHUNK_SIZE {
                let world_y = origin_y + local_y as i32;
                chunk.set_block(local_x, local_y, self.stratum(world_y, surface));
            }
        }

        self.place_trees(chunk, origin_x, origin_y);

        chunk.mark_clean();
    }

    /// Block for a cell given its depth relative to the column surface.
    /// Checked deepest-first so depth rules override surface rules.
    fn stratum(&self, world_y: i32, surface: i32) -> u8 {
        if world_y >= self.config.floor_y {
            BlockId::BEDROCK
        } else if world_y > surface + self.config.soil_depth {
            BlockId::STONE
        } else if world_y > surface {
            BlockId::DIRT
        } else if world_y == surface {
            BlockId::GRASS
        } else {
            BlockId::AIR
        }
    }

    /// Second pass: for each column whose surface lies inside this chunk,
    /// roll the per-column tree chance and grow a trunk + canopy. Writes
    /// are clipped to the chunk.
    fn place_trees(&self, chunk: &mut Chunk, origin_x: i32, origin_y: i32) {
        let span = origin_y..origin_y + CHUNK_SIZE as i32;

        for local_x in 0..CHUNK_SIZE {
            let world_x = origin_x + local_x as i32;
            let surface = self.height_at(world_x);
            if !span.contains(&surface) {
                continue;
            }

            let mut rng = self.column_rng(world_x);
            if rng.next_f32() >= self.config.tree_chance {
                continue;
            }

            let trunk_height =
                rng.range_inclusive(self.config.trunk_min, self.config.trunk_max) as i32;

            for dy in 1..=trunk_height {
                self.place(chunk, origin_x, origin_y, world_x, surface - dy, BlockId::WOOD);
            }

            // Canopy around the trunk top; only fills cells that are still
            // empty, so it never eats the trunk or terrain.
            let top = surface - trunk_height;
            let radius = self.config.canopy_radius;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy > radius * radius {
                        continue;
                    }
                    self.place_if_empty(
                        chunk,
                        origin_x,
                        origin_y,
                        world_x + dx,
                        top + dy,
                        BlockId::LEAVES,
                    );
                }
            }
        }
    }

    /// Deterministic per-column random stream, independent of the noise
    /// field samples.
    fn column_rng(&self, world_x: i32) -> SeedRng {
        let mix = (world_x as u32).wrapping_mul(0x9E37_79B9);
        SeedRng::new([
            self.seed_state[0] ^ mix,
            self.seed_state[1].wrapping_add(mix),
            self.seed_state[2] ^ mix.rotate_left(13),
            self.seed_state[3].wrapping_add(mix.rotate_left(17)),
        ])
    }

    fn place(&self, chunk: &mut Chunk, origin_x: i32, origin_y: i32, wx: i32, wy: i32, id: u8) {
        let lx = wx - origin_x;
        let ly = wy - origin_y;
        if (0..CHUNK_SIZE as i32).contains(&lx) && (0..CHUNK_SIZE as i32).contains(&ly) {
            chunk.set_block(lx as usize, ly as usize, id);
        }
    }

    fn place_if_empty(
        &self,
        chunk: &mut Chunk,
        origin_x: i32,
        origin_y: i32,
        wx: i32,
        wy: i32,
        id: u8,
    ) {
        let lx = wx - origin_x;
        let ly = wy - origin_y;
        if (0..CHUNK_SIZE as i32).contains(&lx)
            && (0..CHUNK_SIZE as i32).contains(&ly)
            && chunk.get_block(lx as usize, ly as usize) == BlockId::AIR
        {
            chunk.set_block(lx as usize, ly as usize, id);
        }
    }
}
