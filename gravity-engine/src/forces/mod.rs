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
//! Gravitational force accumulation
//!
//! The field is the only force in the engine. Contact pairs are a by-product
//! of the same all-pairs sweep and are handed to the collision resolver as a
//! [`CandidateList`].

mod candidates;
mod gravity;

pub use candidates::{CandidateList, CollisionCandidate};
pub use gravity::{GravityField, DEFAULT_GRAVITATIONAL_CONSTANT};
