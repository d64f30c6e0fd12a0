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
//! Perfectly inelastic merging of touching particles
//!
//! Candidates recorded during the integration pass are resolved in recording
//! order once the pass is complete. A merge keeps the survivor's id, name and
//! color and combines the pair as:
//!
//! ```text
//! m  = m₁ + m₂
//! v  = (m₁·v₁ + m₂·v₂) / m
//! x  = (m₁·x₁ + m₂·x₂) / m
//! ```
//!
//! using the masses and positions from before the merge. Mass and linear
//! momentum are conserved exactly up to rounding; kinetic energy is not.
//!
//! A candidate is skipped unless both of its ids are still registered, which
//! makes duplicates and chains (A absorbs B, then C absorbs A) safe.

use crate::forces::{CandidateList, CollisionCandidate};
use crate::particle::{Particle, ParticleId, ParticleRegistry, Position, Velocity};
use log::debug;

/// Combined state of a merged pair: `(mass, position, velocity)`
pub fn merged_state(survivor: &Particle, absorbed: &Particle) -> (f64, Position, Velocity) {
    let m1 = survivor.mass();
    let m2 = absorbed.mass();
    let mass = m1 + m2;

    let (p1x, p1y) = survivor.momentum();
    let (p2x, p2y) = absorbed.momentum();
    let velocity = Velocity::new((p1x + p2x) / mass, (p1y + p2y) / mass);

    let x1 = survivor.position();
    let x2 = absorbed.position();
    let position = Position::new(
        (m1 * x1.x() + m2 * x2.x()) / mass,
        (m1 * x1.y() + m2 * x2.y()) / mass,
    );

    (mass, position, velocity)
}

/// Resolves collision candidates into merges
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    total_merges: u64,
}

impl CollisionResolver {
    /// Create a resolver with no merge history
    pub fn new() -> Self {
        CollisionResolver { total_merges: 0 }
    }

    /// Merges performed over the resolver's lifetime
    pub fn total_merges(&self) -> u64 {
        self.total_merges
    }

    /// Merge every actionable candidate and empty the list
    ///
    /// Absorbed particles are removed from `particles` (preserving the order
    /// of the rest) and released from `registry`. Returns the number of
    /// merges performed.
    pub fn resolve(
        &mut self,
        candidates: &mut CandidateList,
        particles: &mut Vec<Particle>,
        registry: &mut ParticleRegistry,
    ) -> usize {
        let mut merged = 0;

        for candidate in candidates.drain() {
            if self.merge(candidate, particles, registry) {
                merged += 1;
            }
        }

        self.total_merges += merged as u64;
        merged
    }

    fn merge(
        &self,
        candidate: CollisionCandidate,
        particles: &mut Vec<Particle>,
        registry: &mut ParticleRegistry,
    ) -> bool {
        let survivor_id = candidate.survivor();
        let absorbed_id = candidate.absorbed();

        if survivor_id == absorbed_id
            || !registry.is_alive(survivor_id)
            || !registry.is_alive(absorbed_id)
        {
            return false;
        }

        let (Some(survivor_index), Some(absorbed_index)) =
            (index_of(particles, survivor_id), index_of(particles, absorbed_id))
        else {
            return false;
        };

        let (mass, position, velocity) =
            merged_state(&particles[survivor_index], &particles[absorbed_index]);

        let absorbed = particles.remove(absorbed_index);
        registry.release(absorbed_id);

        let survivor_index = if absorbed_index < survivor_index {
            survivor_index - 1
        } else {
            survivor_index
        };
        let survivor = &mut particles[survivor_index];
        survivor.set_mass(mass);
        survivor.set_state(position, velocity);

        debug!(
            "{} ('{}') absorbed {} ('{}'), mass now {}",
            survivor.id(),
            survivor.name(),
            absorbed.id(),
            absorbed.name(),
            mass
        );

        true
    }
}

fn index_of(particles: &[Particle], id: ParticleId) -> Option<usize> {
    particles.iter().position(|p| p.id() == id)
}
