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
//! Numerical integration of particle motion
//!
//! An integrator advances every particle by one timestep, evaluating the
//! gravitational field itself as often as its scheme requires. The engine
//! ships a single scheme:
//!
//! - **Leapfrog (kick-drift-kick)**: symplectic, two field evaluations per
//!   particle, bounded energy error on orbital motion
//!
//! # Timestep Guidelines
//!
//! The effective timestep is `nominal_timestep * time_acceleration`. It may
//! be negative (the simulation then runs backwards), but never zero or
//! non-finite.
//!
//! - Too small: numerical precision issues and wasted computation
//! - Too large: close encounters are skipped over and orbits gain energy
//! - Recommended: the default 1/60 with a time acceleration near 1

use crate::forces::{CandidateList, GravityField};
use crate::particle::Particle;

mod leapfrog;

pub use leapfrog::LeapfrogIntegrator;

/// Trait for numerical integration methods
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Validate a timestep for stability
    ///
    /// Returns `Err` with a message for a zero or non-finite timestep, and
    /// also for timesteps that are usable but likely to misbehave. Callers
    /// decide which of these are fatal; the simulation only logs the
    /// latter.
    fn validate_timestep(&self, dt: f64) -> Result<(), String> {
        if dt == 0.0 || !dt.is_finite() {
            return Err(format!("Invalid timestep: {}. Must be non-zero and finite.", dt));
        }

        if dt.abs() < 1e-9 {
            return Err(format!(
                "Warning: Timestep {} is extremely small and may cause precision loss with f64.",
                dt
            ));
        }

        if dt.abs() > 1.0 {
            return Err(format!(
                "Warning: Timestep {} is large and may cause instability. \
                Consider a smaller time acceleration.",
                dt
            ));
        }

        Ok(())
    }

    /// Advance every particle by `dt`
    ///
    /// Particles are updated in place and in collection order, so later
    /// particles see the already-updated positions of earlier ones.
    /// `after_update` runs on each particle right after its own update and
    /// before the next particle is touched; the simulation uses it for
    /// boundary handling. Contact pairs found by the field are appended to
    /// `candidates`.
    ///
    /// # Returns
    ///
    /// Number of particles left with a finite position and velocity
    fn integrate(
        &mut self,
        particles: &mut [Particle],
        dt: f64,
        field: &GravityField,
        candidates: &mut CandidateList,
        after_update: &mut dyn FnMut(&mut Particle),
    ) -> usize;
}
