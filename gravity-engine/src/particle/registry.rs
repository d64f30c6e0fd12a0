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
//! Live-particle bookkeeping

use super::ParticleId;
use std::collections::HashSet;

/// Allocates particle handles and tracks which of them are still alive
///
/// The collision resolver consults the registry before every merge, which is
/// what makes duplicate or stale collision candidates harmless.
#[derive(Debug, Clone, Default)]
pub struct ParticleRegistry {
    next_id: u64,
    alive: HashSet<ParticleId>,
}

impl ParticleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ParticleRegistry {
            next_id: 0,
            alive: HashSet::new(),
        }
    }

    /// Allocate a fresh handle and mark it alive
    pub fn allocate(&mut self) -> ParticleId {
        let id = ParticleId::new(self.next_id);
        self.next_id += 1;
        self.alive.insert(id);
        id
    }

    /// Release a handle
    ///
    /// Returns false if the handle was not alive.
    pub fn release(&mut self, id: ParticleId) -> bool {
        self.alive.remove(&id)
    }

    /// Check if a handle is alive
    pub fn is_alive(&self, id: ParticleId) -> bool {
        self.alive.contains(&id)
    }

    /// Get the number of alive particles
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// Check whether no particle is alive
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Release every handle
    ///
    /// The id counter keeps running so handles issued before the clear can
    /// never alias particles created after it.
    pub fn clear(&mut self) {
        self.alive.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lifecycle() {
        let mut registry = ParticleRegistry::new();

        let a = registry.allocate();
        let b = registry.allocate();
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        assert!(registry.release(a));
        assert!(!registry.release(a));
        assert!(!registry.is_alive(a));
        assert!(registry.is_alive(b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_does_not_reuse_ids() {
        let mut registry = ParticleRegistry::new();
        let before = registry.allocate();
        registry.clear();
        assert!(registry.is_empty());

        let after = registry.allocate();
        assert_ne!(before, after);
        assert!(!registry.is_alive(before));
    }
}
