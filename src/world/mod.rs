//! World management - chunks, generation, streaming, persistence, physics

mod chunk;
pub mod generation;
pub mod noise;
pub mod persistence;
pub mod physics;
#[allow(clippy::module_inception)]
mod world;

pub use chunk::{
    local_key, split_local_key, BlockEntity, Chunk, BLOCK_SIZE, CHUNK_AREA, CHUNK_SIZE,
};
pub use generation::TerrainGenerator;
pub use noise::{hash_seed, NoiseField, SeedRng};
pub use persistence::{
    decode_snapshot, encode_snapshot, ChunkSnapshot, SnapshotError, WorldSnapshot,
};
pub use physics::{check_aabb_collision, Aabb, Body, Physics};
pub use world::World;
