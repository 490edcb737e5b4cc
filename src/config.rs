//! World configuration - serializable parameters for streaming, generation
//! and physics
//!
//! Constructors take the config explicitly; there are no module-level
//! settings globals. Serializable to RON for presets.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Complete world configuration.
///
/// The seed is NOT part of the config - same config + different seed =
/// different world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chebyshev radius (in chunks) kept loaded around the focus position
    pub view_distance: i32,
    /// Extra chunks beyond `view_distance` kept loaded before eviction.
    /// Prevents load/unload thrashing when the focus oscillates at a
    /// chunk boundary.
    pub evict_margin: i32,
    /// Terrain generation parameters
    pub gen: GenConfig,
    /// Body physics parameters
    pub physics: PhysicsConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            view_distance: 2,
            evict_margin: 1,
            gen: GenConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parse a config from a RON string (missing fields fall back to
    /// defaults).
    pub fn from_ron_str(s: &str) -> Result<Self> {
        ron::from_str(s).context("failed to parse world config")
    }
}

/// Terrain generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Baseline surface row (y grows downward)
    pub base_height: f64,
    /// Height variation above/below the baseline, in rows
    pub amplitude: f64,
    /// Noise sample stride per column
    pub frequency: f64,
    /// Rows of soil between the surface and the stone layer
    pub soil_depth: i32,
    /// Absolute row of the indestructible floor; everything at or below
    /// it is floor
    pub floor_y: i32,
    /// Per-column tree placement probability
    pub tree_chance: f32,
    /// Trunk height range (inclusive)
    pub trunk_min: u32,
    pub trunk_max: u32,
    /// Canopy radius in cells (squared-distance circle)
    pub canopy_radius: i32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            base_height: 64.0,
            amplitude: 24.0,
            frequency: 0.05,
            soil_depth: 3,
            floor_y: 255,
            tree_chance: 0.08,
            trunk_min: 3,
            trunk_max: 5,
            canopy_radius: 2,
        }
    }
}

/// Body physics parameters (per-step units, px and px/step)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per step
    pub gravity: f32,
    /// Terminal fall speed
    pub max_fall_speed: f32,
    /// Horizontal damping factor per step (< 1)
    pub friction: f32,
    /// Vertical lift applied when mounting a one-block ledge
    pub step_lift: f32,
    /// Horizontal nudge applied along the motion direction when stepping up
    pub step_nudge: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            max_fall_speed: 12.0,
            friction: 0.8,
            step_lift: crate::world::BLOCK_SIZE,
            step_nudge: 1.0,
        }
    }
}
