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
//! Point-mass particle state

use super::{Acceleration, Color, ParticleId, Position, Velocity};
use crate::error::SimulationError;

/// Radius of a body of the given mass
///
/// Bodies are treated as having unit density, so the radius is the cube
/// root of the mass.
pub fn radius_for_mass(mass: f64) -> f64 {
    mass.cbrt()
}

/// Description of a particle that has not been inserted yet
///
/// Scene generators and explosion spawning produce these; the simulation
/// validates them and assigns a [`ParticleId`] on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleInit {
    /// Presentation label
    pub name: String,
    /// Initial position
    pub position: Position,
    /// Initial velocity
    pub velocity: Velocity,
    /// Mass, strictly positive
    pub mass: f64,
    /// Presentation color
    pub color: Color,
}

impl ParticleInit {
    /// Create a new particle description
    pub fn new(
        name: impl Into<String>,
        position: Position,
        velocity: Velocity,
        mass: f64,
        color: Color,
    ) -> Self {
        ParticleInit {
            name: name.into(),
            position,
            velocity,
            mass,
            color,
        }
    }

    /// Check that the description can become a particle
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParticleParameters`] for a
    /// non-finite position or velocity, or a mass that is not strictly
    /// positive and finite.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.position.is_valid() {
            return Err(SimulationError::InvalidParticleParameters(format!(
                "position of '{}' must be finite, got ({}, {})",
                self.name,
                self.position.x(),
                self.position.y()
            )));
        }
        if !self.velocity.is_valid() {
            return Err(SimulationError::InvalidParticleParameters(format!(
                "velocity of '{}' must be finite, got ({}, {})",
                self.name,
                self.velocity.dx(),
                self.velocity.dy()
            )));
        }
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(SimulationError::InvalidParticleParameters(format!(
                "mass of '{}' must be positive and finite, got {}",
                self.name, self.mass
            )));
        }
        Ok(())
    }
}

/// A point mass in the simulation
///
/// Fields are private so that code outside the engine can read a particle
/// but never break its invariants: the radius is always `cbrt(mass)` and
/// only changes together with the mass.
///
/// # Examples
///
/// ```
/// use gravity_engine::Simulation;
/// use gravity_engine::particle::{Color, Position, Velocity};
///
/// let mut sim = Simulation::default();
/// let id = sim
///     .add_particle("P1", Position::new(0.0, 0.0), Velocity::zero(), 1000.0, Color::WHITE)
///     .unwrap();
/// let particle = sim.particle(id).unwrap();
/// assert!((particle.radius() - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    id: ParticleId,
    name: String,
    position: Position,
    velocity: Velocity,
    acceleration: Acceleration,
    mass: f64,
    radius: f64,
    color: Color,
    initial_position: Position,
    initial_velocity: Velocity,
}

impl Particle {
    /// Build a particle from a validated description
    pub(crate) fn from_init(id: ParticleId, init: ParticleInit) -> Self {
        Particle {
            id,
            name: init.name,
            position: init.position,
            velocity: init.velocity,
            acceleration: Acceleration::zero(),
            mass: init.mass,
            radius: radius_for_mass(init.mass),
            color: init.color,
            initial_position: init.position,
            initial_velocity: init.velocity,
        }
    }

    /// Handle of this particle
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// Presentation label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Acceleration computed during the most recent step
    pub fn acceleration(&self) -> Acceleration {
        self.acceleration
    }

    /// Mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Radius, always `cbrt(mass)`
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Presentation color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Position captured at creation
    pub fn initial_position(&self) -> Position {
        self.initial_position
    }

    /// Velocity captured at creation
    pub fn initial_velocity(&self) -> Velocity {
        self.initial_velocity
    }

    /// Speed (magnitude of the velocity)
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Linear momentum `(px, py)`
    pub fn momentum(&self) -> (f64, f64) {
        (self.mass * self.velocity.dx(), self.mass * self.velocity.dy())
    }

    /// Kinetic energy `0.5 * m * v²`
    pub fn kinetic_energy(&self) -> f64 {
        let v = self.velocity.magnitude();
        0.5 * self.mass * v * v
    }

    /// Check whether `point` lies strictly inside the particle's disk
    pub fn contains(&self, point: &Position) -> bool {
        self.position.distance_to(point) < self.radius
    }

    /// Check whether the disks of two particles overlap
    pub fn overlaps(&self, other: &Particle) -> bool {
        self.position.distance_to(&other.position) < self.radius + other.radius
    }

    pub(crate) fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    pub(crate) fn velocity_mut(&mut self) -> &mut Velocity {
        &mut self.velocity
    }

    pub(crate) fn set_acceleration(&mut self, acceleration: Acceleration) {
        self.acceleration = acceleration;
    }

    /// Set position and velocity together, as boundary clamping and merging do
    pub(crate) fn set_state(&mut self, position: Position, velocity: Velocity) {
        self.position = position;
        self.velocity = velocity;
    }

    /// Change the mass and recompute the radius with it
    pub(crate) fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.radius = radius_for_mass(mass);
    }

    /// Restore the creation-time position and velocity
    pub(crate) fn reset(&mut self) {
        self.position = self.initial_position;
        self.velocity = self.initial_velocity;
        self.acceleration = Acceleration::zero();
    }

    /// Description that reproduces this particle's current state
    pub fn to_init(&self) -> ParticleInit {
        ParticleInit::new(
            self.name.clone(),
            self.position,
            self.velocity,
            self.mass,
            self.color,
        )
    }
}
