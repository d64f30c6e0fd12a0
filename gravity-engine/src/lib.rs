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
//! # Gravity Engine
//!
//! A 2D gravitational N-body engine for interactive simulators.
//!
//! ## Features
//!
//! - **Direct Summation**: all-pairs Newtonian gravity, no approximation tree
//! - **Leapfrog Integration**: symplectic kick-drift-kick stepping
//! - **Inelastic Merging**: touching bodies combine, conserving mass and momentum
//! - **Bounding Box**: optional reflective walls that can spawn "explosion" copies
//! - **Scenes**: seeded generators for clouds, lattices, star systems and more
//! - **Parallelization**: optional Rayon integration for energy diagnostics
//!
//! Rendering, input handling and windowing live outside this crate. They read
//! particle state through [`Simulation::particles`] and issue commands through
//! the other `Simulation` methods.
//!
//! ## Example
//!
//! ```rust
//! use gravity_engine::{Simulation, SimulationConfig};
//! use gravity_engine::particle::{Color, Position, Velocity};
//!
//! let mut sim = Simulation::new(SimulationConfig::default().with_seed(3)).unwrap();
//! let star = sim
//!     .add_particle("Star", Position::zero(), Velocity::zero(), 1.0e6, Color::WHITE)
//!     .unwrap();
//! sim.add_particle("Moon", Position::new(300.0, 0.0), Velocity::new(0.0, 258.0), 10.0, Color::BLUE)
//!     .unwrap();
//!
//! for _ in 0..60 {
//!     sim.tick().unwrap();
//! }
//! assert_eq!(sim.len(), 2);
//! assert_eq!(sim.most_massive().map(|p| p.id()), Some(star));
//! ```

#![warn(missing_docs)]

/// Reflective bounding box and explosion spawning
pub mod boundary;

/// Inelastic collision resolution
pub mod collision;

/// Simulation configuration
pub mod config;

/// Conservation diagnostics
pub mod diagnostics;

/// Error types
pub mod error;

/// Gravitational force accumulation
pub mod forces;

/// Numerical integration methods
pub mod integration;

/// Particle state and handles
pub mod particle;

/// Initial particle configurations
pub mod scenes;

/// Step orchestration
pub mod simulation;

pub use boundary::BoundingBox;
pub use config::SimulationConfig;
pub use error::SimulationError;
pub use scenes::{Preset, Scene};
pub use simulation::{Simulation, StepReport};
