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
//! Newtonian gravitational field with contact detection
//!
//! Computes the net acceleration on one particle from every other particle
//! by direct summation:
//!
//! **a = Σ G * mⱼ / r² * r̂**
//!
//! Where:
//! - G is the simulation's gravitational constant (scaled, default 20)
//! - mⱼ is the mass of the attracting particle
//! - r is the center-to-center distance and r̂ the unit vector towards mⱼ
//!
//! # Contact Detection
//!
//! The same loop that sums accelerations also flags particles whose disks
//! overlap. A pair is recorded from the target's side only when the other
//! particle is at least as heavy, so across one step an ordinary pair is
//! recorded once and an equal-mass pair twice.
//!
//! # Coincident Centers
//!
//! There is no softening. When two centers coincide exactly (`r == 0`) the
//! pair contributes no acceleration and is recorded as a collision candidate
//! instead, so the merge step removes the singularity.
//!
//! # Complexity
//!
//! O(n) per target and O(n²) per full evaluation. No tree or grid
//! acceleration is attempted.

use super::{CandidateList, CollisionCandidate};
use crate::error::SimulationError;
use crate::particle::{Acceleration, Particle};
use log::warn;

/// Default gravitational constant, scaled for interactive units
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 20.0;

/// Gravitational field configuration
///
/// # Example
///
/// ```
/// use gravity_engine::forces::{GravityField, DEFAULT_GRAVITATIONAL_CONSTANT};
///
/// let mut field = GravityField::default();
/// assert_eq!(field.g_constant(), DEFAULT_GRAVITATIONAL_CONSTANT);
///
/// assert!(field.set_g_constant(-1.0).is_err());
/// assert_eq!(field.g_constant(), DEFAULT_GRAVITATIONAL_CONSTANT);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GravityField {
    /// Gravitational constant (default: DEFAULT_GRAVITATIONAL_CONSTANT)
    g_constant: f64,
    /// Whether to warn about invalid calculations
    warn_on_invalid: bool,
}

impl GravityField {
    /// Create a field with the given gravitational constant
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if `g_constant` is
    /// negative or not finite.
    pub fn new(g_constant: f64) -> Result<Self, SimulationError> {
        let mut field = GravityField {
            g_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            warn_on_invalid: true,
        };
        field.set_g_constant(g_constant)?;
        Ok(field)
    }

    /// Get the gravitational constant
    pub fn g_constant(&self) -> f64 {
        self.g_constant
    }

    /// Set the gravitational constant
    ///
    /// The previous value is kept if the new one is rejected.
    pub fn set_g_constant(&mut self, g_constant: f64) -> Result<(), SimulationError> {
        if !(g_constant >= 0.0 && g_constant.is_finite()) {
            return Err(SimulationError::InvalidParameter(format!(
                "gravitational constant must be non-negative and finite, got {}",
                g_constant
            )));
        }
        self.g_constant = g_constant;
        Ok(())
    }

    /// Set whether to warn about invalid acceleration contributions
    pub fn set_warn_on_invalid(&mut self, warn: bool) {
        self.warn_on_invalid = warn;
    }

    /// Acceleration of `target` caused by `source` alone
    ///
    /// Returns `None` when the centers coincide or the result is not finite.
    pub fn pairwise_acceleration(&self, target: &Particle, source: &Particle) -> Option<Acceleration> {
        let (dx, dy) = target.position().displacement_to(&source.position());
        let r = dx.hypot(dy);
        if r == 0.0 {
            return None;
        }

        let magnitude = self.g_constant * source.mass() / (r * r);
        let ax = magnitude * dx / r;
        let ay = magnitude * dy / r;

        if !ax.is_finite() || !ay.is_finite() {
            if self.warn_on_invalid {
                warn!(
                    "Invalid acceleration on {} from {} at distance {:e}",
                    target.id(),
                    source.id(),
                    r
                );
            }
            return None;
        }

        Some(Acceleration::new(ax, ay))
    }

    /// Net acceleration on `particles[target]` from every other particle
    ///
    /// Overlapping pairs where the other particle is at least as heavy, and
    /// every pair with coincident centers, are appended to `candidates`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is out of bounds.
    pub fn acceleration_on(
        &self,
        target: usize,
        particles: &[Particle],
        candidates: &mut CandidateList,
    ) -> Acceleration {
        let this = &particles[target];
        let mut total = Acceleration::zero();

        for (index, other) in particles.iter().enumerate() {
            // Skip self-interaction
            if index == target {
                continue;
            }

            let r = this.position().distance_to(&other.position());
            if r == 0.0 {
                candidates.push(CollisionCandidate::between(other, this));
                continue;
            }

            if other.mass() >= this.mass() && r < other.radius() + this.radius() {
                candidates.push(CollisionCandidate::new(other.id(), this.id()));
            }

            if let Some(a) = self.pairwise_acceleration(this, other) {
                total.add(a.ax(), a.ay());
            }
        }

        total
    }

    /// Gravitational potential energy of a pair, `-G * m₁ * m₂ / r`
    ///
    /// Coincident pairs contribute zero.
    pub fn pair_potential(&self, a: &Particle, b: &Particle) -> f64 {
        let r = a.position().distance_to(&b.position());
        if r == 0.0 {
            return 0.0;
        }
        -self.g_constant * a.mass() * b.mass() / r
    }
}

impl Default for GravityField {
    fn default() -> Self {
        GravityField {
            g_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            warn_on_invalid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Color, ParticleId, ParticleInit, Position, Velocity};

    fn particle(id: u64, x: f64, y: f64, mass: f64) -> Particle {
        Particle::from_init(
            ParticleId::new(id),
            ParticleInit::new(
                format!("P{}", id),
                Position::new(x, y),
                Velocity::zero(),
                mass,
                Color::WHITE,
            ),
        )
    }

    #[test]
    fn test_field_creation() {
        let field = GravityField::new(20.0).unwrap();
        assert_eq!(field.g_constant(), 20.0);
        assert!(GravityField::new(0.0).is_ok());
        assert!(GravityField::new(-0.5).is_err());
        assert!(GravityField::new(f64::NAN).is_err());
        assert!(GravityField::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_inverse_square_magnitude() {
        let field = GravityField::new(20.0).unwrap();
        let particles = vec![particle(0, 0.0, 0.0, 1000.0), particle(1, 10.0, 0.0, 1000.0)];
        let mut candidates = CandidateList::new();

        let a0 = field.acceleration_on(0, &particles, &mut candidates);
        let a1 = field.acceleration_on(1, &particles, &mut candidates);

        // 20 * 1000 / 10² = 200, directed at the other particle
        assert_eq!(a0.ax(), 200.0);
        assert_eq!(a0.ay(), 0.0);
        assert_eq!(a1.ax(), -200.0);
        assert_eq!(a1.ay(), 0.0);
    }

    #[test]
    fn test_overlap_recorded_from_lighter_side_only() {
        let field = GravityField::default();
        // radii 10 and 2, distance 5
        let particles = vec![particle(0, 0.0, 0.0, 1000.0), particle(1, 5.0, 0.0, 8.0)];
        let mut candidates = CandidateList::new();

        field.acceleration_on(0, &particles, &mut candidates);
        assert!(candidates.is_empty());

        field.acceleration_on(1, &particles, &mut candidates);
        assert_eq!(candidates.len(), 1);
        let c = candidates.iter().next().unwrap();
        assert_eq!(c.survivor(), ParticleId::new(0));
        assert_eq!(c.absorbed(), ParticleId::new(1));
    }

    #[test]
    fn test_equal_masses_recorded_from_both_sides() {
        let field = GravityField::default();
        let particles = vec![particle(0, 0.0, 0.0, 27.0), particle(1, 1.0, 0.0, 27.0)];
        let mut candidates = CandidateList::new();

        field.acceleration_on(0, &particles, &mut candidates);
        field.acceleration_on(1, &particles, &mut candidates);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_coincident_centers_are_safe() {
        let mut field = GravityField::default();
        field.set_warn_on_invalid(false);
        let particles = vec![particle(0, 3.0, 3.0, 10.0), particle(1, 3.0, 3.0, 5.0)];
        let mut candidates = CandidateList::new();

        let a = field.acceleration_on(1, &particles, &mut candidates);
        assert!(a.is_valid());
        assert_eq!(a, Acceleration::zero());
        assert_eq!(candidates.len(), 1);
        let c = candidates.iter().next().unwrap();
        assert_eq!(c.survivor(), ParticleId::new(0));

        assert!(field.pairwise_acceleration(&particles[0], &particles[1]).is_none());
    }

    #[test]
    fn test_distant_particles_not_flagged() {
        let field = GravityField::default();
        let particles = vec![particle(0, 0.0, 0.0, 1.0), particle(1, 100.0, 0.0, 1.0)];
        let mut candidates = CandidateList::new();

        field.acceleration_on(0, &particles, &mut candidates);
        field.acceleration_on(1, &particles, &mut candidates);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_zero_g_gives_zero_acceleration() {
        let field = GravityField::new(0.0).unwrap();
        let particles = vec![particle(0, 0.0, 0.0, 1.0), particle(1, 100.0, 0.0, 1e6)];
        let mut candidates = CandidateList::new();
        let a = field.acceleration_on(0, &particles, &mut candidates);
        assert_eq!(a.magnitude(), 0.0);
    }

    #[test]
    fn test_pair_potential() {
        let field = GravityField::new(2.0).unwrap();
        let a = particle(0, 0.0, 0.0, 3.0);
        let b = particle(1, 0.0, 4.0, 5.0);
        assert_eq!(field.pair_potential(&a, &b), -2.0 * 3.0 * 5.0 / 4.0);
        assert_eq!(field.pair_potential(&a, &a), 0.0);
    }
}
