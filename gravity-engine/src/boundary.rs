// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Reflective bounding box with optional explosion spawning
//!
//! A particle that leaves the box is clamped back onto the wall it crossed
//! and its velocity component normal to that wall is turned inward. The
//! tangential component is untouched, so a bounce conserves speed.
//!
//! With a non-zero explosion count every bounce also emits that many copies
//! of the bouncing particle on the *opposite* wall, each heading into the box
//! at the bouncing particle's speed. Copies are returned as
//! [`ParticleInit`]s and only become particles when the simulation inserts
//! them after the integration pass.
//!
//! The x axis is checked before the y axis and both may fire in one call,
//! in which case a corner bounce emits two batches of copies.

use crate::error::SimulationError;
use crate::particle::{Particle, ParticleInit, Position, Velocity};
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI};

/// Axis-aligned rectangle in simulation coordinates
///
/// # Examples
///
/// ```
/// use gravity_engine::boundary::BoundingBox;
/// use gravity_engine::particle::Position;
///
/// let bbox = BoundingBox::symmetric(Position::new(-100.0, 50.0)).unwrap();
/// assert_eq!(bbox.min_x(), -100.0);
/// assert_eq!(bbox.max_y(), 50.0);
/// assert!(bbox.contains(&Position::new(99.0, -50.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl BoundingBox {
    /// Create a box from its corners
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if any bound is not
    /// finite or the box has no area.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, SimulationError> {
        let finite = [min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite());
        if !finite || min_x >= max_x || min_y >= max_y {
            return Err(SimulationError::InvalidParameter(format!(
                "bounding box must be finite with min < max on both axes, got ({}, {})..({}, {})",
                min_x, min_y, max_x, max_y
            )));
        }
        Ok(BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Box centered on the origin with `corner` as one of its corners
    pub fn symmetric(corner: Position) -> Result<Self, SimulationError> {
        let hx = corner.x().abs();
        let hy = corner.y().abs();
        BoundingBox::new(-hx, -hy, hx, hy)
    }

    /// Left edge
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Lower edge
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Right edge
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Upper edge
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Extent along x
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along y
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check whether a point lies inside the box or on its edge
    pub fn contains(&self, point: &Position) -> bool {
        point.x() >= self.min_x
            && point.x() <= self.max_x
            && point.y() >= self.min_y
            && point.y() <= self.max_y
    }
}

/// One of the four walls of a [`BoundingBox`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    /// `x = min_x`
    MinX,
    /// `x = max_x`
    MaxX,
    /// `y = min_y`
    MinY,
    /// `y = max_y`
    MaxY,
}

impl Wall {
    /// The wall across the box
    pub fn opposite(self) -> Wall {
        match self {
            Wall::MinX => Wall::MaxX,
            Wall::MaxX => Wall::MinX,
            Wall::MinY => Wall::MaxY,
            Wall::MaxY => Wall::MinY,
        }
    }

    /// Direction of the inward normal, in radians from +x
    pub fn inward_angle(self) -> f64 {
        match self {
            Wall::MinX => 0.0,
            Wall::MaxX => PI,
            Wall::MinY => FRAC_PI_2,
            Wall::MaxY => -FRAC_PI_2,
        }
    }
}

/// Applies a bounding box to particles one at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryHandler {
    bbox: BoundingBox,
    explosion_count: usize,
}

impl BoundaryHandler {
    /// Create a handler for `bbox` spawning `explosion_count` copies per bounce
    pub fn new(bbox: BoundingBox, explosion_count: usize) -> Self {
        BoundaryHandler {
            bbox,
            explosion_count,
        }
    }

    /// The box being enforced
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Copies emitted per bounce
    pub fn explosion_count(&self) -> usize {
        self.explosion_count
    }

    /// Clamp and reflect `particle`, pushing explosion copies onto `spawns`
    ///
    /// Returns the walls that were crossed, x axis first.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        particle: &mut Particle,
        rng: &mut R,
        spawns: &mut Vec<ParticleInit>,
    ) -> Vec<Wall> {
        let speed = particle.speed();
        let mut crossed = Vec::new();

        let mut position = particle.position();
        let mut velocity = particle.velocity();

        if position.x() < self.bbox.min_x {
            position.set_x(self.bbox.min_x);
            velocity.set_dx(velocity.dx().abs());
            crossed.push(Wall::MinX);
        } else if position.x() > self.bbox.max_x {
            position.set_x(self.bbox.max_x);
            velocity.set_dx(-velocity.dx().abs());
            crossed.push(Wall::MaxX);
        }

        if position.y() > self.bbox.max_y {
            position.set_y(self.bbox.max_y);
            velocity.set_dy(-velocity.dy().abs());
            crossed.push(Wall::MaxY);
        } else if position.y() < self.bbox.min_y {
            position.set_y(self.bbox.min_y);
            velocity.set_dy(velocity.dy().abs());
            crossed.push(Wall::MinY);
        }

        if crossed.is_empty() {
            return crossed;
        }

        particle.set_state(position, velocity);

        for wall in &crossed {
            for _ in 0..self.explosion_count {
                spawns.push(self.spawn_on(wall.opposite(), particle, speed, rng));
            }
        }

        crossed
    }

    /// Copy of `source` on `wall`, heading into the box at `speed`
    fn spawn_on<R: Rng + ?Sized>(
        &self,
        wall: Wall,
        source: &Particle,
        speed: f64,
        rng: &mut R,
    ) -> ParticleInit {
        let b = &self.bbox;
        let position = match wall {
            Wall::MinX => Position::new(b.min_x, rng.gen_range(b.min_y..=b.max_y)),
            Wall::MaxX => Position::new(b.max_x, rng.gen_range(b.min_y..=b.max_y)),
            Wall::MinY => Position::new(rng.gen_range(b.min_x..=b.max_x), b.min_y),
            Wall::MaxY => Position::new(rng.gen_range(b.min_x..=b.max_x), b.max_y),
        };
        let angle = wall.inward_angle() + rng.gen_range(-FRAC_PI_2..=FRAC_PI_2);

        ParticleInit::new(
            source.name(),
            position,
            Velocity::from_polar(speed, angle),
            source.mass(),
            source.color(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Color, ParticleId};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn particle(pos: (f64, f64), vel: (f64, f64)) -> Particle {
        Particle::from_init(
            ParticleId::new(0),
            ParticleInit::new(
                "Bouncer",
                Position::new(pos.0, pos.1),
                Velocity::new(vel.0, vel.1),
                8.0,
                Color::YELLOW,
            ),
        )
    }

    fn square() -> BoundingBox {
        BoundingBox::new(-100.0, -100.0, 100.0, 100.0).unwrap()
    }

    #[test]
    fn test_box_validation() {
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_ok());
        assert!(BoundingBox::new(1.0, 0.0, 1.0, 1.0).is_err());
        assert!(BoundingBox::new(0.0, 2.0, 1.0, 1.0).is_err());
        assert!(BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(BoundingBox::symmetric(Position::new(0.0, 5.0)).is_err());

        let b = BoundingBox::symmetric(Position::new(30.0, -20.0)).unwrap();
        assert_eq!((b.min_x(), b.min_y(), b.max_x(), b.max_y()), (-30.0, -20.0, 30.0, 20.0));
        assert_eq!(b.width(), 60.0);
        assert_eq!(b.height(), 40.0);
    }

    #[test]
    fn test_reflection_at_max_x() {
        let handler = BoundaryHandler::new(square(), 0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut spawns = Vec::new();
        let mut p = particle((101.0, 0.0), (5.0, 2.0));

        let walls = handler.apply(&mut p, &mut rng, &mut spawns);

        assert_eq!(walls, vec![Wall::MaxX]);
        assert_eq!(p.position(), Position::new(100.0, 0.0));
        assert_eq!(p.velocity(), Velocity::new(-5.0, 2.0));
        assert!(spawns.is_empty());
    }

    #[test]
    fn test_reflection_keeps_inward_velocity() {
        // Already heading back inside: only the position is clamped
        let handler = BoundaryHandler::new(square(), 0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut spawns = Vec::new();
        let mut p = particle((-0.5, -120.0), (1.0, 3.0));

        let walls = handler.apply(&mut p, &mut rng, &mut spawns);

        assert_eq!(walls, vec![Wall::MinY]);
        assert_eq!(p.position(), Position::new(-0.5, -100.0));
        assert_eq!(p.velocity(), Velocity::new(1.0, 3.0));
    }

    #[test]
    fn test_corner_crossing_fires_both_axes() {
        let handler = BoundaryHandler::new(square(), 2);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut spawns = Vec::new();
        let mut p = particle((-150.0, 130.0), (-3.0, 4.0));

        let walls = handler.apply(&mut p, &mut rng, &mut spawns);

        assert_eq!(walls, vec![Wall::MinX, Wall::MaxY]);
        assert_eq!(p.position(), Position::new(-100.0, 100.0));
        assert_eq!(p.velocity(), Velocity::new(3.0, -4.0));
        assert_eq!(spawns.len(), 4);
        assert!(spawns[..2].iter().all(|s| s.position.x() == 100.0));
        assert!(spawns[2..].iter().all(|s| s.position.y() == -100.0));
    }

    #[test]
    fn test_inside_particle_untouched() {
        let handler = BoundaryHandler::new(square(), 5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut spawns = Vec::new();
        let mut p = particle((100.0, -100.0), (50.0, -50.0));
        let before = p.clone();

        assert!(handler.apply(&mut p, &mut rng, &mut spawns).is_empty());
        assert_eq!(p, before);
        assert!(spawns.is_empty());
    }

    #[test]
    fn test_explosion_spawns_on_opposite_wall() {
        let handler = BoundaryHandler::new(square(), 3);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut spawns = Vec::new();
        let mut p = particle((101.0, 0.0), (5.0, 0.0));

        handler.apply(&mut p, &mut rng, &mut spawns);

        assert_eq!(spawns.len(), 3);
        for spawn in &spawns {
            assert_eq!(spawn.name, "Bouncer");
            assert_eq!(spawn.mass, 8.0);
            assert_eq!(spawn.color, Color::YELLOW);
            assert_eq!(spawn.position.x(), -100.0);
            assert!(spawn.position.y() >= -100.0 && spawn.position.y() <= 100.0);
            assert!((spawn.velocity.magnitude() - 5.0).abs() < 1e-9);
            assert!(spawn.velocity.dx() >= -1e-9, "spawn must head into the box");
        }
    }

    #[test]
    fn test_spawn_directions_per_wall() {
        let b = square();
        let handler = BoundaryHandler::new(b, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let source = particle((0.0, 0.0), (0.0, 0.0));

        for _ in 0..50 {
            let s = handler.spawn_on(Wall::MaxY, &source, 10.0, &mut rng);
            assert_eq!(s.position.y(), 100.0);
            assert!(s.velocity.dy() <= 1e-9);

            let s = handler.spawn_on(Wall::MinY, &source, 10.0, &mut rng);
            assert_eq!(s.position.y(), -100.0);
            assert!(s.velocity.dy() >= -1e-9);

            let s = handler.spawn_on(Wall::MaxX, &source, 10.0, &mut rng);
            assert!(s.velocity.dx() <= 1e-9);
            assert!(b.contains(&s.position));
        }
    }

    #[test]
    fn test_non_finite_position_is_ignored() {
        let handler = BoundaryHandler::new(square(), 1);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut spawns = Vec::new();
        let mut p = particle((0.0, 0.0), (0.0, 0.0));
        p.set_state(Position::new(f64::NAN, 0.0), Velocity::zero());

        assert!(handler.apply(&mut p, &mut rng, &mut spawns).is_empty());
        assert!(spawns.is_empty());
    }
}
