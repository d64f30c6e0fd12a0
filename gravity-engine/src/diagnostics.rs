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
//! Conservation diagnostics
//!
//! Read-only summaries of a particle set, used by tests and demos to watch
//! mass, momentum and energy over time. Merges conserve mass and momentum
//! but dissipate kinetic energy, and boundary bounces and explosion spawns
//! break all three, so these are measurements, not invariants.
//!
//! The potential energy is an O(n²) pair sum. With the `parallel` feature
//! it is split across the rayon thread pool by outer index.

use crate::forces::GravityField;
use crate::particle::{Particle, Position};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Snapshot of conserved quantities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    /// Number of particles measured
    pub particle_count: usize,
    /// Sum of masses
    pub total_mass: f64,
    /// Total linear momentum `(px, py)`
    pub momentum: (f64, f64),
    /// Sum of `0.5 * m * v²`
    pub kinetic_energy: f64,
    /// Sum of `-G * mᵢ * mⱼ / r` over distinct pairs
    pub potential_energy: f64,
    /// Mass-weighted mean position, `None` for an empty set
    pub center_of_mass: Option<Position>,
}

impl Diagnostics {
    /// Measure a particle set under `field`
    pub fn measure(particles: &[Particle], field: &GravityField) -> Self {
        let total_mass = total_mass(particles);
        Diagnostics {
            particle_count: particles.len(),
            total_mass,
            momentum: total_momentum(particles),
            kinetic_energy: kinetic_energy(particles),
            potential_energy: potential_energy(particles, field),
            center_of_mass: center_of_mass(particles),
        }
    }

    /// Kinetic plus potential energy
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }

    /// Magnitude of the total momentum
    pub fn momentum_magnitude(&self) -> f64 {
        self.momentum.0.hypot(self.momentum.1)
    }
}

/// Sum of masses
pub fn total_mass(particles: &[Particle]) -> f64 {
    particles.iter().map(Particle::mass).sum()
}

/// Total linear momentum `(px, py)`
pub fn total_momentum(particles: &[Particle]) -> (f64, f64) {
    particles.iter().fold((0.0, 0.0), |(px, py), p| {
        let (mx, my) = p.momentum();
        (px + mx, py + my)
    })
}

/// Total kinetic energy
pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(Particle::kinetic_energy).sum()
}

/// Total gravitational potential energy over distinct pairs
pub fn potential_energy(particles: &[Particle], field: &GravityField) -> f64 {
    #[cfg(feature = "parallel")]
    {
        (0..particles.len())
            .into_par_iter()
            .map(|i| potential_from(i, particles, field))
            .sum()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..particles.len())
            .map(|i| potential_from(i, particles, field))
            .sum()
    }
}

/// Potential of particle `i` with every particle after it
fn potential_from(i: usize, particles: &[Particle], field: &GravityField) -> f64 {
    let a = &particles[i];
    particles[i + 1..]
        .iter()
        .map(|b| field.pair_potential(a, b))
        .sum()
}

/// Mass-weighted mean position
pub fn center_of_mass(particles: &[Particle]) -> Option<Position> {
    let mass = total_mass(particles);
    if particles.is_empty() || mass <= 0.0 {
        return None;
    }
    let (sx, sy) = particles.iter().fold((0.0, 0.0), |(sx, sy), p| {
        (sx + p.mass() * p.position().x(), sy + p.mass() * p.position().y())
    });
    Some(Position::new(sx / mass, sy / mass))
}
