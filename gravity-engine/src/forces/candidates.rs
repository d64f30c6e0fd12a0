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
//! Collision candidates recorded during force accumulation

use crate::particle::{Particle, ParticleId};

/// A pair of particles flagged for merging
///
/// The survivor is the heavier member; on equal masses the first particle
/// passed to [`CollisionCandidate::between`] survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionCandidate {
    survivor: ParticleId,
    absorbed: ParticleId,
}

impl CollisionCandidate {
    /// Create a candidate with an explicit survivor
    pub fn new(survivor: ParticleId, absorbed: ParticleId) -> Self {
        CollisionCandidate { survivor, absorbed }
    }

    /// Create a candidate for two particles, heavier one first
    pub fn between(a: &Particle, b: &Particle) -> Self {
        if a.mass() >= b.mass() {
            CollisionCandidate::new(a.id(), b.id())
        } else {
            CollisionCandidate::new(b.id(), a.id())
        }
    }

    /// The particle that absorbs the other
    pub fn survivor(&self) -> ParticleId {
        self.survivor
    }

    /// The particle that is removed by the merge
    pub fn absorbed(&self) -> ParticleId {
        self.absorbed
    }
}

/// Candidates gathered over one step
///
/// The list is deliberately not deduplicated: an equal-mass pair is usually
/// recorded once from each side, and the resolver skips whatever entry no
/// longer refers to two live particles.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    candidates: Vec<CollisionCandidate>,
}

impl CandidateList {
    /// Create an empty list
    pub fn new() -> Self {
        CandidateList {
            candidates: Vec::new(),
        }
    }

    /// Record a candidate
    pub fn push(&mut self, candidate: CollisionCandidate) {
        self.candidates.push(candidate);
    }

    /// Number of recorded candidates, duplicates included
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterate over recorded candidates in recording order
    pub fn iter(&self) -> impl Iterator<Item = &CollisionCandidate> {
        self.candidates.iter()
    }

    /// Check whether the unordered pair `{a, b}` has been recorded
    pub fn contains_pair(&self, a: ParticleId, b: ParticleId) -> bool {
        self.candidates.iter().any(|c| {
            (c.survivor == a && c.absorbed == b) || (c.survivor == b && c.absorbed == a)
        })
    }

    /// Take every candidate out, leaving the list empty
    pub fn drain(&mut self) -> std::vec::Drain<'_, CollisionCandidate> {
        self.candidates.drain(..)
    }

    /// Drop every candidate
    pub fn clear(&mut self) {
        self.candidates.clear();
    }
}

impl FromIterator<CollisionCandidate> for CandidateList {
    fn from_iter<I: IntoIterator<Item = CollisionCandidate>>(iter: I) -> Self {
        CandidateList {
            candidates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Color, ParticleInit, Position, Velocity};

    fn particle(id: u64, mass: f64) -> Particle {
        Particle::from_init(
            ParticleId::new(id),
            ParticleInit::new("P", Position::zero(), Velocity::zero(), mass, Color::WHITE),
        )
    }

    #[test]
    fn test_between_orders_heavier_first() {
        let light = particle(1, 1.0);
        let heavy = particle(2, 10.0);

        let c = CollisionCandidate::between(&light, &heavy);
        assert_eq!(c.survivor(), heavy.id());
        assert_eq!(c.absorbed(), light.id());
    }

    #[test]
    fn test_between_keeps_argument_order_on_tie() {
        let a = particle(1, 5.0);
        let b = particle(2, 5.0);
        assert_eq!(CollisionCandidate::between(&a, &b).survivor(), a.id());
        assert_eq!(CollisionCandidate::between(&b, &a).survivor(), b.id());
    }

    #[test]
    fn test_list_keeps_duplicates() {
        let a = ParticleId::new(1);
        let b = ParticleId::new(2);
        let mut list = CandidateList::new();
        list.push(CollisionCandidate::new(a, b));
        list.push(CollisionCandidate::new(b, a));

        assert_eq!(list.len(), 2);
        assert!(list.contains_pair(a, b));
        assert!(!list.contains_pair(a, ParticleId::new(3)));

        let drained: Vec<_> = list.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(list.is_empty());
    }
}
