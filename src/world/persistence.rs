//! Chunk snapshots - exporting dirty chunks and restoring them
//!
//! Only chunks with unsaved mutations are ever exported; clean chunks are
//! regenerable from the seed and never appear in a snapshot. Where the
//! bytes go (disk, network, save slot) is the caller's concern; this module
//! provides the snapshot structure and a compressed byte codec.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::chunk::{split_local_key, BlockEntity, Chunk, CHUNK_AREA, CHUNK_SIZE};
use crate::world::world::World;

/// Serialized state of one dirty chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSnapshot {
    pub x: i32,
    pub y: i32,
    /// Flat block-id array, row-major, CHUNK_AREA cells
    pub blocks: Vec<u8>,
    /// Block entities keyed by packed local coordinate
    pub entities: Vec<(u16, BlockEntity)>,
}

impl ChunkSnapshot {
    pub fn capture(chunk: &Chunk) -> Self {
        Self {
            x: chunk.x,
            y: chunk.y,
            blocks: chunk.blocks().to_vec(),
            entities: chunk
                .block_entities()
                .map(|(key, entity)| (key, entity.clone()))
                .collect(),
        }
    }
}

/// Serialized state of every dirty chunk in a world
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub chunks: Vec<ChunkSnapshot>,
}

/// Why a single chunk record was rejected during restore
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("chunk ({x}, {y}): block array has {got} cells, expected {expected}")]
    BlockArraySize {
        x: i32,
        y: i32,
        got: usize,
        expected: usize,
    },
}

impl World {
    /// Export every dirty chunk. Clean chunks are omitted; they regenerate
    /// bit-identically from the seed.
    pub fn to_snapshot(&self) -> WorldSnapshot {
        let chunks: Vec<ChunkSnapshot> = self
            .chunks()
            .values()
            .filter(|chunk| chunk.dirty)
            .map(ChunkSnapshot::capture)
            .collect();
        log::debug!("[SAVE] Snapshot of {} dirty chunks", chunks.len());
        WorldSnapshot { chunks }
    }

    /// Restore chunks from a snapshot. A malformed record skips that one
    /// chunk rather than aborting the whole load.
    pub fn from_snapshot(&mut self, snapshot: WorldSnapshot) {
        let total = snapshot.chunks.len();
        let mut restored = 0;

        for record in snapshot.chunks {
            let (x, y) = (record.x, record.y);
            match self.restore_chunk(record) {
                Ok(()) => restored += 1,
                Err(e) => log::warn!("[LOAD] Skipping chunk ({}, {}): {}", x, y, e),
            }
        }

        log::info!("[LOAD] Restored {}/{} snapshot chunks", restored, total);
    }

    fn restore_chunk(&mut self, record: ChunkSnapshot) -> std::result::Result<(), SnapshotError> {
        let mut blocks = [0u8; CHUNK_AREA];
        if record.blocks.len() != CHUNK_AREA {
            return Err(SnapshotError::BlockArraySize {
                x: record.x,
                y: record.y,
                got: record.blocks.len(),
                expected: CHUNK_AREA,
            });
        }
        blocks.copy_from_slice(&record.blocks);

        let mut chunk = Chunk::new(record.x, record.y);
        chunk.set_blocks(blocks);
        // Restored content is by definition mutated - a later export must
        // still include it.
        chunk.dirty = true;

        for (key, entity) in record.entities {
            let (local_x, local_y) = split_local_key(key);
            if local_x >= CHUNK_SIZE || local_y >= CHUNK_SIZE {
                log::warn!(
                    "[LOAD] Chunk ({}, {}): dropping entity with bad key {:#06x}",
                    record.x,
                    record.y,
                    key
                );
                continue;
            }

            // Entity sizing is re-derived from the block id actually present
            // at the coordinate, not from serialized metadata; stale entity
            // records under non-entity blocks are dropped.
            let id = chunk.get_block(local_x, local_y);
            let Some(slots) = self.registry().get(id).entity_slots else {
                log::warn!(
                    "[LOAD] Chunk ({}, {}): dropping entity at ({}, {}) under non-entity block {}",
                    record.x,
                    record.y,
                    local_x,
                    local_y,
                    id
                );
                continue;
            };

            let mut restored = BlockEntity::new(slots);
            restored.inventory = crate::entity::Inventory::from_slots_sized(
                entity.inventory.slots().to_vec(),
                slots,
            );
            restored.smelt_time = entity.smelt_time;
            restored.fuel_time = entity.fuel_time;
            restored.max_fuel_time = entity.max_fuel_time;
            chunk.insert_block_entity(key, restored);
        }

        self.insert_chunk(chunk);
        Ok(())
    }
}

/// Serialize and compress a snapshot for storage or transfer
pub fn encode_snapshot(snapshot: &WorldSnapshot) -> Result<Vec<u8>> {
    let serialized =
        bincode_next::serde::encode_to_vec(snapshot, bincode_next::config::standard())
            .context("failed to serialize world snapshot")?;
    Ok(lz4_flex::compress_prepend_size(&serialized))
}

/// Inverse of [`encode_snapshot`]
pub fn decode_snapshot(bytes: &[u8]) -> Result<WorldSnapshot> {
    let serialized = lz4_flex::decompress_size_prepended(bytes)
        .context("failed to decompress world snapshot")?;
    let (snapshot, _): (WorldSnapshot, _) =
        bincode_next::serde::decode_from_slice(&serialized, bincode_next::config::standard())
            .map_err(|e| anyhow::anyhow!("failed to deserialize world snapshot: {:?}", e))?;
    Ok(snapshot)
}
