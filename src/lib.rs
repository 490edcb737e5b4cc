//! Simulation core for a 2D tile sandbox: a chunked world store with
//! deterministic seeded terrain generation, AABB collision for game bodies,
//! and a tick-driven smelting simulation for block entities.

pub mod config;
pub mod entity;
pub mod simulation;
pub mod world;
