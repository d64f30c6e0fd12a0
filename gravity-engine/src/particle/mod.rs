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
//! Particles and their bookkeeping
//!
//! A particle is a point mass with a derived radius, a presentation name and
//! color, and the position/velocity it was created with. Particles are owned
//! by the [`Simulation`](crate::Simulation) and referred to from outside by
//! [`ParticleId`] handles, which stop resolving once the particle is merged
//! away or removed.

mod components;
mod id;
mod registry;
mod state;

pub use components::{Acceleration, Color, Position, Velocity};
pub use id::ParticleId;
pub use registry::ParticleRegistry;
pub use state::{radius_for_mass, Particle, ParticleInit};
