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
//! Error types for simulation commands
//!
//! Nothing in the engine is fatal. Every error here is raised at a command
//! boundary (particle creation, parameter setters, scene generation) before
//! any simulation state is touched, so the previous state always survives a
//! rejected command.
//!
//! Coincident particle centers are not an error: the force accumulator turns
//! them into collision candidates instead of dividing by zero.

use crate::particle::ParticleId;
use std::error::Error;
use std::fmt;

/// Errors raised by simulation commands
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A particle was described with a non-finite position or velocity, or
    /// with a mass that is not strictly positive and finite
    InvalidParticleParameters(String),
    /// A global parameter or scene parameter was out of range
    InvalidParameter(String),
    /// The referenced particle is no longer part of the simulation
    ParticleNotFound(ParticleId),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidParticleParameters(msg) => {
                write!(f, "Invalid particle parameters: {}", msg)
            }
            SimulationError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            SimulationError::ParticleNotFound(id) => write!(f, "{} not found", id),
        }
    }
}

impl Error for SimulationError {}

/// Reject a non-finite value with an [`SimulationError::InvalidParameter`]
pub(crate) fn require_finite(name: &str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

/// Reject a value that is not strictly positive and finite
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64, SimulationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

/// Reject a `(min, max)` pair that is non-finite or reversed
pub(crate) fn require_range(name: &str, range: (f64, f64)) -> Result<(f64, f64), SimulationError> {
    let (min, max) = range;
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(range)
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "{} must be a finite range with min <= max, got ({}, {})",
            name, min, max
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimulationError::InvalidParameter("G must be non-negative".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: G must be non-negative");

        let err = SimulationError::ParticleNotFound(ParticleId::new(7));
        assert_eq!(err.to_string(), "Particle(7) not found");
    }

    #[test]
    fn test_require_helpers() {
        assert!(require_finite("x", 1.0).is_ok());
        assert!(require_finite("x", f64::NAN).is_err());
        assert!(require_positive("mass", 0.0).is_err());
        assert!(require_positive("mass", f64::INFINITY).is_err());
        assert_eq!(require_positive("mass", 2.5), Ok(2.5));
        assert!(require_range("position", (1.0, -1.0)).is_err());
        assert!(require_range("position", (-1.0, -1.0)).is_ok());
    }
}
