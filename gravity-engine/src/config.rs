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
//! Simulation configuration

use crate::boundary::BoundingBox;
use crate::error::SimulationError;
use crate::forces::DEFAULT_GRAVITATIONAL_CONSTANT;

/// Nominal timestep of one frame, in simulated seconds
pub const DEFAULT_TIMESTEP: f64 = 1.0 / 60.0;

/// Initial settings for a [`Simulation`](crate::Simulation)
///
/// # Example
///
/// ```
/// use gravity_engine::SimulationConfig;
///
/// let config = SimulationConfig::default()
///     .with_gravitational_constant(5.0)
///     .with_explosion_count(2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Gravitational constant
    pub gravitational_constant: f64,
    /// Multiplier applied to the nominal timestep by [`tick`](crate::Simulation::tick)
    pub time_acceleration: f64,
    /// Timestep at a time acceleration of 1
    pub nominal_timestep: f64,
    /// Optional reflective box
    pub bounding_box: Option<BoundingBox>,
    /// Copies spawned per boundary bounce
    pub explosion_count: usize,
    /// Seed for the simulation's random number generator; entropy when `None`
    pub seed: Option<u64>,
    /// Upper bound on the particle count that explosion spawning respects
    pub max_particles: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            time_acceleration: 1.0,
            nominal_timestep: DEFAULT_TIMESTEP,
            bounding_box: None,
            explosion_count: 0,
            seed: None,
            max_particles: None,
        }
    }
}

impl SimulationConfig {
    /// Set the gravitational constant
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Set the time acceleration
    pub fn with_time_acceleration(mut self, time_acceleration: f64) -> Self {
        self.time_acceleration = time_acceleration;
        self
    }

    /// Set the nominal timestep
    pub fn with_nominal_timestep(mut self, dt: f64) -> Self {
        self.nominal_timestep = dt;
        self
    }

    /// Enforce a bounding box from the start
    pub fn with_bounding_box(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox);
        self
    }

    /// Set the explosion count
    pub fn with_explosion_count(mut self, count: usize) -> Self {
        self.explosion_count = count;
        self
    }

    /// Seed the random number generator
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cap the number of particles explosion spawning may create
    pub fn with_max_particles(mut self, max: usize) -> Self {
        self.max_particles = Some(max);
        self
    }

    /// Check every setting
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] for a negative or
    /// non-finite gravitational constant, a zero or non-finite time
    /// acceleration, or a nominal timestep that is not positive and finite.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let g = self.gravitational_constant;
        if !(g >= 0.0 && g.is_finite()) {
            return Err(SimulationError::InvalidParameter(format!(
                "gravitational constant must be non-negative and finite, got {}",
                g
            )));
        }
        validate_time_acceleration(self.time_acceleration)?;
        if !(self.nominal_timestep > 0.0 && self.nominal_timestep.is_finite()) {
            return Err(SimulationError::InvalidParameter(format!(
                "nominal timestep must be positive and finite, got {}",
                self.nominal_timestep
            )));
        }
        Ok(())
    }
}

/// Reject a time acceleration that is zero or not finite
pub(crate) fn validate_time_acceleration(time_acceleration: f64) -> Result<f64, SimulationError> {
    if time_acceleration == 0.0 || !time_acceleration.is_finite() {
        return Err(SimulationError::InvalidParameter(format!(
            "time acceleration must be non-zero and finite, got {}",
            time_acceleration
        )));
    }
    Ok(time_acceleration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.gravitational_constant, 20.0);
        assert_eq!(config.time_acceleration, 1.0);
        assert_eq!(config.nominal_timestep, 1.0 / 60.0);
        assert_eq!(config.bounding_box, None);
        assert_eq!(config.explosion_count, 0);
        assert_eq!(config.max_particles, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(SimulationConfig::default()
            .with_gravitational_constant(-1.0)
            .validate()
            .is_err());
        assert!(SimulationConfig::default()
            .with_time_acceleration(0.0)
            .validate()
            .is_err());
        assert!(SimulationConfig::default()
            .with_time_acceleration(-4.0)
            .validate()
            .is_ok());
        assert!(SimulationConfig::default()
            .with_nominal_timestep(-0.1)
            .validate()
            .is_err());
        assert!(SimulationConfig::default()
            .with_nominal_timestep(f64::NAN)
            .validate()
            .is_err());
    }
}
