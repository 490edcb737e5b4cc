//! Body physics - gravity, friction and AABB collision against the block
//! grid, including the step-up heuristic for walking bodies
//!
//! Coordinates are world pixels with y growing downward. A body's position
//! is the top-left corner of its bounding box.

use glam::Vec2;

use crate::config::PhysicsConfig;
use crate::world::chunk::BLOCK_SIZE;
use crate::world::world::World;

/// Axis-aligned bounding box in world pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Separating-axis rectangle intersection. Strict inequalities: boxes
    /// that merely touch do not collide.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    fn cell(cell_x: i32, cell_y: i32) -> Aabb {
        Aabb::new(
            cell_x as f32 * BLOCK_SIZE,
            cell_y as f32 * BLOCK_SIZE,
            BLOCK_SIZE,
            BLOCK_SIZE,
        )
    }
}

/// Reusable AABB overlap test (the only collision primitive collaborators
/// get to call directly).
pub fn check_aabb_collision(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// Capability every physically simulated thing implements.
///
/// The resolver never asks what a body concretely is; players and item
/// pickups resolve identically, differing only in the capability flags.
pub trait Body {
    /// Top-left corner of the bounding box, world pixels
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);

    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    /// Width/height of the bounding box
    fn size(&self) -> Vec2;

    fn on_ground(&self) -> bool;
    fn set_on_ground(&mut self, grounded: bool);

    /// Flying bodies ignore gravity entirely
    fn flying(&self) -> bool {
        false
    }

    /// Whether the body mounts one-block ledges while walking
    fn steps_up(&self) -> bool {
        false
    }

    fn aabb(&self) -> Aabb {
        let position = self.position();
        let size = self.size();
        Aabb::new(position.x, position.y, size.x, size.y)
    }
}

/// Physics resolver for bodies moving through the block grid
pub struct Physics {
    config: PhysicsConfig,
}

impl Physics {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Accelerate the body downward, clamped to terminal velocity. No-op
    /// for flying bodies.
    pub fn apply_gravity<B: Body>(&self, body: &mut B) {
        if body.flying() {
            return;
        }
        let mut velocity = body.velocity();
        velocity.y = (velocity.y + self.config.gravity).min(self.config.max_fall_speed);
        body.set_velocity(velocity);
    }

    /// Damp horizontal velocity
    pub fn apply_friction<B: Body>(&self, body: &mut B) {
        let mut velocity = body.velocity();
        velocity.x *= self.config.friction;
        body.set_velocity(velocity);
    }

    /// Integrate velocity into position, resolving collisions one axis at
    /// a time: horizontal first (with step-up), then vertical (recording
    /// the on-ground state).
    pub fn update_position_and_collision<B: Body>(&self, world: &mut World, body: &mut B) {
        let size = body.size();
        let mut position = body.position();
        let mut velocity = body.velocity();

        // Horizontal pass
        position.x += velocity.x;
        if velocity.x != 0.0 {
            let direction = velocity.x.signum();
            let mut aabb = Aabb::new(position.x, position.y, size.x, size.y);
            let (x0, x1, y0, y1) = cell_range(&aabb);

            'cells: for cell_y in y0..=y1 {
                for cell_x in x0..=x1 {
                    if !solid(world, cell_x, cell_y) {
                        continue;
                    }
                    let cell = Aabb::cell(cell_x, cell_y);
                    if !aabb.intersects(&cell) {
                        continue;
                    }

                    // Step-up: an obstruction at the foot line with two
                    // clear cells above it becomes a step instead of a wall.
                    if body.steps_up()
                        && cell.top() >= aabb.bottom() - BLOCK_SIZE
                        && !solid(world, cell_x, cell_y - 1)
                        && !solid(world, cell_x, cell_y - 2)
                    {
                        position.y -= self.config.step_lift;
                        position.x += direction * self.config.step_nudge;
                        break 'cells;
                    }

                    // Halt at the obstruction's face on the approach side
                    if direction > 0.0 {
                        position.x = cell.left() - size.x;
                    } else {
                        position.x = cell.right();
                    }
                    velocity.x = 0.0;
                    aabb = Aabb::new(position.x, position.y, size.x, size.y);
                }
            }
        }

        // Vertical pass
        position.y += velocity.y;
        if velocity.y != 0.0 {
            let moving_down = velocity.y > 0.0;
            let mut grounded = false;
            let mut aabb = Aabb::new(position.x, position.y, size.x, size.y);
            let (x0, x1, y0, y1) = cell_range(&aabb);

            for cell_y in y0..=y1 {
                for cell_x in x0..=x1 {
                    if !solid(world, cell_x, cell_y) {
                        continue;
                    }
                    let cell = Aabb::cell(cell_x, cell_y);
                    if !aabb.intersects(&cell) {
                        continue;
                    }

                    if moving_down {
                        // Land on top of the block
                        position.y = cell.top() - size.y;
                        velocity.y = 0.0;
                        grounded = true;
                    } else {
                        // Bump the ceiling
                        position.y = cell.bottom();
                        velocity.y = 0.0;
                    }
                    aabb = Aabb::new(position.x, position.y, size.x, size.y);
                }
            }

            body.set_on_ground(grounded);
        }

        body.set_position(position);
        body.set_velocity(velocity);
    }
}

/// Inclusive block-cell range covered by a bounding box
fn cell_range(aabb: &Aabb) -> (i32, i32, i32, i32) {
    (
        (aabb.left() / BLOCK_SIZE).floor() as i32,
        (aabb.right() / BLOCK_SIZE).floor() as i32,
        (aabb.top() / BLOCK_SIZE).floor() as i32,
        (aabb.bottom() / BLOCK_SIZE).floor() as i32,
    )
}

fn solid(world: &mut World, cell_x: i32, cell_y: i32) -> bool {
    let id = world.get_block(cell_x, cell_y);
    world.registry().is_solid(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenConfig, PhysicsConfig, WorldConfig};
    use crate::simulation::{BlockId, BlockRegistry};

    /// Minimal walking body for resolver tests
    struct TestBody {
        position: Vec2,
        velocity: Vec2,
        size: Vec2,
        on_ground: bool,
        flying: bool,
        steps_up: bool,
    }

    impl TestBody {
        fn new(x: f32, y: f32) -> Self {
            Self {
                position: Vec2::new(x, y),
                velocity: Vec2::ZERO,
                size: Vec2::new(12.0, 28.0),
                on_ground: false,
                flying: false,
                steps_up: false,
            }
        }
    }

    impl Body for TestBody {
        fn position(&self) -> Vec2 {
            self.position
        }
        fn set_position(&mut self, position: Vec2) {
            self.position = position;
        }
        fn velocity(&self) -> Vec2 {
            self.velocity
        }
        fn set_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
        }
        fn size(&self) -> Vec2 {
            self.size
        }
        fn on_ground(&self) -> bool {
            self.on_ground
        }
        fn set_on_ground(&mut self, grounded: bool) {
            self.on_ground = grounded;
        }
        fn flying(&self) -> bool {
            self.flying
        }
        fn steps_up(&self) -> bool {
            self.steps_up
        }
    }

    /// Flat world whose surface row sits at base_height
    fn flat_world(seed: &str) -> World {
        let config = WorldConfig {
            gen: GenConfig {
                amplitude: 0.0,
                tree_chance: 0.0,
                ..GenConfig::default()
            },
            ..WorldConfig::default()
        };
        World::new(seed, BlockRegistry::new(), config)
    }

    fn physics() -> Physics {
        Physics::new(PhysicsConfig::default())
    }

    /// Assert a body's box overlaps no solid cell
    fn assert_contained(world: &mut World, body: &TestBody, context: &str) {
        let aabb = body.aabb();
        let (x0, x1, y0, y1) = cell_range(&aabb);
        for cell_y in y0..=y1 {
            for cell_x in x0..=x1 {
                if solid(world, cell_x, cell_y) {
                    assert!(
                        !aabb.intersects(&Aabb::cell(cell_x, cell_y)),
                        "{}: body at {:?} overlaps solid cell ({}, {})",
                        context,
                        body.position,
                        cell_x,
                        cell_y
                    );
                }
            }
        }
    }

    #[test]
    fn test_aabb_intersection() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Aabb::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Aabb::new(-5.0, -5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Aabb::new(20.0, 0.0, 5.0, 5.0)));
        // Touching edges do not collide
        assert!(!a.intersects(&Aabb::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Aabb::new(0.0, 10.0, 5.0, 5.0)));
        assert!(check_aabb_collision(&a, &Aabb::new(9.9, 9.9, 1.0, 1.0)));
    }

    #[test]
    fn test_gravity_accumulates_and_clamps() {
        let physics = physics();
        let config = PhysicsConfig::default();
        let mut body = TestBody::new(0.0, 0.0);

        physics.apply_gravity(&mut body);
        assert_eq!(body.velocity.y, config.gravity);

        for _ in 0..1000 {
            physics.apply_gravity(&mut body);
        }
        assert_eq!(body.velocity.y, config.max_fall_speed);
    }

    #[test]
    fn test_gravity_skips_flying_bodies() {
        let physics = physics();
        let mut body = TestBody::new(0.0, 0.0);
        body.flying = true;

        physics.apply_gravity(&mut body);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_friction_damps_horizontal_velocity() {
        let physics = physics();
        let mut body = TestBody::new(0.0, 0.0);
        body.velocity.x = 10.0;

        physics.apply_friction(&mut body);
        assert_eq!(body.velocity.x, 10.0 * PhysicsConfig::default().friction);

        for _ in 0..200 {
            physics.apply_friction(&mut body);
        }
        assert!(body.velocity.x.abs() < 0.001);
    }

    #[test]
    fn test_falling_body_lands_on_surface() {
        let mut world = flat_world("landing");
        let physics = physics();
        let surface = GenConfig::default().base_height as i32;
        let floor_top = surface as f32 * BLOCK_SIZE;

        // Drop from well above the surface
        let mut body = TestBody::new(40.0, floor_top - 200.0);
        for step in 0..200 {
            physics.apply_gravity(&mut body);
            physics.update_position_and_collision(&mut world, &mut body);
            assert_contained(&mut world, &body, &format!("step {}", step));
        }

        assert!(body.on_ground);
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.aabb().bottom(), floor_top);
    }

    #[test]
    fn test_horizontal_motion_halts_at_wall() {
        let mut world = flat_world("wall");
        let surface = GenConfig::default().base_height as i32;
        let physics = physics();

        // Build a two-block wall ahead of the body
        let wall_x = 10;
        world.set_block(wall_x, surface - 1, BlockId::STONE);
        world.set_block(wall_x, surface - 2, BlockId::STONE);

        let floor_top = surface as f32 * BLOCK_SIZE;
        let mut body = TestBody::new(wall_x as f32 * BLOCK_SIZE - 40.0, floor_top - 28.0);

        for _ in 0..40 {
            body.velocity.x = 3.0;
            physics.apply_gravity(&mut body);
            physics.update_position_and_collision(&mut world, &mut body);
            assert_contained(&mut world, &body, "walking into wall");
        }

        // Flush against the wall face, not inside it
        assert_eq!(body.aabb().right(), wall_x as f32 * BLOCK_SIZE);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_rising_body_bumps_ceiling() {
        let mut world = flat_world("ceiling");
        let surface = GenConfig::default().base_height as i32;
        let physics = physics();
        let floor_top = surface as f32 * BLOCK_SIZE;

        // Ceiling three blocks above the floor
        let ceiling_y = surface - 4;
        for x in -2..4 {
            world.set_block(x, ceiling_y, BlockId::STONE);
        }

        let mut body = TestBody::new(0.0, floor_top - 28.0);
        for _ in 0..5 {
            body.velocity.y = -10.0;
            physics.update_position_and_collision(&mut world, &mut body);
        }

        assert_eq!(body.aabb().top(), (ceiling_y + 1) as f32 * BLOCK_SIZE);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!body.on_ground);
    }

    #[test]
    fn test_step_up_mounts_single_block_ledge() {
        let mut world = flat_world("ledge");
        let surface = GenConfig::default().base_height as i32;
        let physics = physics();

        // Raise the floor by one block for every column right of the ledge
        let ledge_x = 12;
        for x in ledge_x..ledge_x + 20 {
            world.set_block(x, surface - 1, BlockId::STONE);
        }

        let floor_top = surface as f32 * BLOCK_SIZE;
        let mut body = TestBody::new(ledge_x as f32 * BLOCK_SIZE - 60.0, floor_top - 28.0);
        body.steps_up = true;

        for step in 0..60 {
            body.velocity.x = 2.0;
            physics.apply_gravity(&mut body);
            physics.update_position_and_collision(&mut world, &mut body);
            assert_contained(&mut world, &body, &format!("step {}", step));
        }

        // Resting on top of the ledge, not halted at its face
        assert!(body.on_ground);
        assert_eq!(body.aabb().bottom(), (surface - 1) as f32 * BLOCK_SIZE);
        assert!(body.position.x > ledge_x as f32 * BLOCK_SIZE);
    }

    #[test]
    fn test_no_step_up_without_capability() {
        let mut world = flat_world("no-step");
        let surface = GenConfig::default().base_height as i32;
        let physics = physics();

        let ledge_x = 12;
        for x in ledge_x..ledge_x + 20 {
            world.set_block(x, surface - 1, BlockId::STONE);
        }

        let floor_top = surface as f32 * BLOCK_SIZE;
        let mut body = TestBody::new(ledge_x as f32 * BLOCK_SIZE - 60.0, floor_top - 28.0);
        // steps_up stays false: the ledge is a wall for this body

        for _ in 0..60 {
            body.velocity.x = 2.0;
            physics.apply_gravity(&mut body);
            physics.update_position_and_collision(&mut world, &mut body);
        }

        assert_eq!(body.aabb().right(), ledge_x as f32 * BLOCK_SIZE);
        assert_eq!(body.aabb().bottom(), floor_top);
    }

    #[test]
    fn test_no_step_up_without_headroom() {
        let mut world = flat_world("low-roof");
        let surface = GenConfig::default().base_height as i32;
        let physics = physics();

        // One-block ledge with a roof directly above it
        let ledge_x = 12;
        for x in ledge_x..ledge_x + 20 {
            world.set_block(x, surface - 1, BlockId::STONE);
        }
        world.set_block(ledge_x, surface - 2, BlockId::STONE);

        let floor_top = surface as f32 * BLOCK_SIZE;
        let mut body = TestBody::new(ledge_x as f32 * BLOCK_SIZE - 60.0, floor_top - 28.0);
        body.steps_up = true;

        for _ in 0..60 {
            body.velocity.x = 2.0;
            physics.apply_gravity(&mut body);
            physics.update_position_and_collision(&mut world, &mut body);
        }

        // Blocked: the step would not fit
        assert_eq!(body.aabb().right(), ledge_x as f32 * BLOCK_SIZE);
        assert_eq!(body.aabb().bottom(), floor_top);
    }
}
