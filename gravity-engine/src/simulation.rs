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
//! The simulation: particle ownership and step orchestration
//!
//! One step runs three phases in order:
//!
//! 1. **Integrate**: every particle is advanced in collection order by the
//!    leapfrog integrator, with boundary handling applied to each particle
//!    right after its own update. Explosion copies are queued, not inserted.
//! 2. **Spawn**: queued copies are inserted at the end of the collection,
//!    subject to the particle cap. They are first integrated next step.
//! 3. **Merge**: the collision candidates gathered during phase 1 are
//!    resolved and the candidate list is emptied.
//!
//! The simulation is an explicit value; several can run side by side.

use crate::boundary::{BoundaryHandler, BoundingBox};
use crate::collision::CollisionResolver;
use crate::config::{validate_time_acceleration, SimulationConfig};
use crate::diagnostics::Diagnostics;
use crate::error::SimulationError;
use crate::forces::{CandidateList, GravityField};
use crate::integration::{Integrator, LeapfrogIntegrator};
use crate::particle::{
    Color, Particle, ParticleId, ParticleInit, ParticleRegistry, Position, Velocity,
};
use crate::scenes::{Preset, Scene};
use log::{debug, trace, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Outcome of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// Effective timestep used
    pub dt: f64,
    /// Particles left in a finite state by the integrator
    pub integrated: usize,
    /// Explosion copies inserted
    pub spawned: usize,
    /// Explosion copies dropped because of the particle cap
    pub dropped_spawns: usize,
    /// Merges performed
    pub merged: usize,
}

/// A gravitational N-body simulation
///
/// # Example
///
/// ```
/// use gravity_engine::{Preset, Simulation, SimulationConfig};
///
/// let mut sim = Simulation::new(SimulationConfig::default().with_seed(1)).unwrap();
/// sim.load_preset(Preset::ThreeBody).unwrap();
/// assert_eq!(sim.len(), 3);
///
/// let report = sim.advance(1.0).unwrap();
/// assert_eq!(report.integrated, 3);
/// assert_eq!(sim.step_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    particles: Vec<Particle>,
    registry: ParticleRegistry,
    field: GravityField,
    integrator: LeapfrogIntegrator,
    resolver: CollisionResolver,
    candidates: CandidateList,
    rng: ChaCha8Rng,
    bounding_box: Option<BoundingBox>,
    explosion_count: usize,
    time_acceleration: f64,
    nominal_timestep: f64,
    max_particles: Option<usize>,
    paused: bool,
    show_labels: bool,
    elapsed: f64,
    step_count: u64,
}

impl Simulation {
    /// Create an empty simulation
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if the configuration
    /// does not validate.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let field = GravityField::new(config.gravitational_constant)?;
        Ok(Simulation::with_field(config, field))
    }

    fn with_field(config: SimulationConfig, field: GravityField) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Simulation {
            particles: Vec::new(),
            registry: ParticleRegistry::new(),
            field,
            integrator: LeapfrogIntegrator::new(),
            resolver: CollisionResolver::new(),
            candidates: CandidateList::new(),
            rng,
            bounding_box: config.bounding_box,
            explosion_count: config.explosion_count,
            time_acceleration: config.time_acceleration,
            nominal_timestep: config.nominal_timestep,
            max_particles: config.max_particles,
            paused: false,
            show_labels: true,
            elapsed: 0.0,
            step_count: 0,
        }
    }

    /// Advance the simulation by one step of `nominal_timestep * time_acceleration`
    ///
    /// Runs regardless of the pause flag; see [`tick`](Self::tick).
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] for a zero or
    /// non-finite time acceleration. The simulation is left untouched.
    pub fn advance(&mut self, time_acceleration: f64) -> Result<StepReport, SimulationError> {
        validate_time_acceleration(time_acceleration)?;
        let dt = self.nominal_timestep * time_acceleration;
        if dt == 0.0 || !dt.is_finite() {
            return Err(SimulationError::InvalidParameter(format!(
                "time acceleration {} gives an unusable timestep {}",
                time_acceleration, dt
            )));
        }
        if let Err(message) = self.integrator.validate_timestep(dt) {
            warn!("{}", message);
        }

        // Phase 1: integrate with per-particle boundary handling
        let handler = self
            .bounding_box
            .map(|bbox| BoundaryHandler::new(bbox, self.explosion_count));
        let rng = &mut self.rng;
        let mut spawns = Vec::new();
        let integrated = self.integrator.integrate(
            &mut self.particles,
            dt,
            &self.field,
            &mut self.candidates,
            &mut |particle| {
                if let Some(handler) = &handler {
                    handler.apply(particle, rng, &mut spawns);
                }
            },
        );

        // Phase 2: insert explosion copies
        let (spawned, dropped_spawns) = self.insert_spawns(spawns);

        // Phase 3: merge
        let candidate_count = self.candidates.len();
        let merged = self
            .resolver
            .resolve(&mut self.candidates, &mut self.particles, &mut self.registry);

        self.elapsed += dt;
        self.step_count += 1;

        trace!(
            "Step {}: dt={}, {} particles, {} candidates, {} merged, {} spawned",
            self.step_count,
            dt,
            self.particles.len(),
            candidate_count,
            merged,
            spawned
        );

        Ok(StepReport {
            dt,
            integrated,
            spawned,
            dropped_spawns,
            merged,
        })
    }

    /// Advance one step with the stored time acceleration unless paused
    pub fn tick(&mut self) -> Result<Option<StepReport>, SimulationError> {
        if self.paused {
            return Ok(None);
        }
        self.advance(self.time_acceleration).map(Some)
    }

    fn insert_spawns(&mut self, spawns: Vec<ParticleInit>) -> (usize, usize) {
        let mut spawned = 0;
        let mut dropped = 0;

        for init in spawns {
            if let Some(max) = self.max_particles {
                if self.particles.len() >= max {
                    dropped += 1;
                    continue;
                }
            }
            match self.insert(init) {
                Ok(_) => spawned += 1,
                Err(e) => {
                    warn!("Dropping explosion copy: {}", e);
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            warn!(
                "Dropped {} explosion copies ({} particles, cap {:?})",
                dropped,
                self.particles.len(),
                self.max_particles
            );
        }

        (spawned, dropped)
    }

    /// Create a particle
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParticleParameters`] for a
    /// non-finite position or velocity, or a mass that is not strictly
    /// positive and finite. Nothing is inserted in that case.
    pub fn add_particle(
        &mut self,
        name: impl Into<String>,
        position: Position,
        velocity: Velocity,
        mass: f64,
        color: Color,
    ) -> Result<ParticleId, SimulationError> {
        self.insert(ParticleInit::new(name, position, velocity, mass, color))
    }

    /// Create a particle from a description
    pub fn insert(&mut self, init: ParticleInit) -> Result<ParticleId, SimulationError> {
        init.validate()?;
        let id = self.registry.allocate();
        self.particles.push(Particle::from_init(id, init));
        Ok(id)
    }

    /// Remove a particle, returning it if it was still alive
    pub fn remove_particle(&mut self, id: ParticleId) -> Option<Particle> {
        if !self.registry.release(id) {
            return None;
        }
        let index = self.particles.iter().position(|p| p.id() == id)?;
        debug!("Removed {}", id);
        Some(self.particles.remove(index))
    }

    /// Restore a particle's creation-time position and velocity
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ParticleNotFound`] if `id` is not alive.
    pub fn reset_particle(&mut self, id: ParticleId) -> Result<(), SimulationError> {
        let particle = self
            .particles
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(SimulationError::ParticleNotFound(id))?;
        particle.reset();
        Ok(())
    }

    /// All particles in collection order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Look up a particle; `None` once it has been merged away or removed
    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        if !self.registry.is_alive(id) {
            return None;
        }
        self.particles.iter().find(|p| p.id() == id)
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Check whether the simulation has no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// First particle whose disk contains `point`
    pub fn particle_at(&self, point: Position) -> Option<ParticleId> {
        self.particles
            .iter()
            .find(|p| p.contains(&point))
            .map(Particle::id)
    }

    /// Heaviest particle, the earliest one on ties
    pub fn most_massive(&self) -> Option<&Particle> {
        self.particles
            .iter()
            .reduce(|best, p| if p.mass() > best.mass() { p } else { best })
    }

    /// Replace every particle with the contents of `scene`
    ///
    /// The scene is validated as a whole first; if any particle is invalid
    /// the current particles are kept. Elapsed time and the step counter
    /// restart from zero. Returns the number of particles loaded.
    pub fn load_scene(&mut self, scene: Scene) -> Result<usize, SimulationError> {
        for init in &scene.particles {
            init.validate()?;
        }

        self.clear_particles();
        self.show_labels = scene.show_labels;
        for init in scene.particles {
            self.insert(init)?;
        }
        self.elapsed = 0.0;
        self.step_count = 0;

        debug!("Loaded scene with {} particles", self.particles.len());
        Ok(self.particles.len())
    }

    /// Generate a built-in scene with the current gravitational constant and load it
    pub fn load_preset(&mut self, preset: Preset) -> Result<usize, SimulationError> {
        let scene = preset.generate(&mut self.rng, self.field.g_constant())?;
        debug!("Loading preset '{}'", preset.name());
        self.load_scene(scene)
    }

    fn clear_particles(&mut self) {
        self.particles.clear();
        self.registry.clear();
        self.candidates.clear();
    }

    /// Remove every particle and restore the default gravitational constant,
    /// time acceleration and (absent) bounding box
    ///
    /// The explosion count, pause state and particle cap are kept.
    pub fn reset(&mut self) {
        self.clear_particles();
        self.time_acceleration = 1.0;
        self.bounding_box = None;
        self.field = GravityField::default();
        self.elapsed = 0.0;
        self.step_count = 0;
        debug!("Simulation reset");
    }

    /// Set or clear the bounding box
    pub fn set_bounding_box(&mut self, bbox: Option<BoundingBox>) {
        self.bounding_box = bbox;
    }

    /// The enforced bounding box, if any
    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bounding_box.as_ref()
    }

    /// Set the gravitational constant; the old value is kept on error
    pub fn set_gravitational_constant(&mut self, g: f64) -> Result<(), SimulationError> {
        self.field.set_g_constant(g)
    }

    /// The gravitational constant
    pub fn gravitational_constant(&self) -> f64 {
        self.field.g_constant()
    }

    /// Raise the gravitational constant by one
    pub fn increase_gravity(&mut self) {
        let g = self.field.g_constant() + 1.0;
        if self.field.set_g_constant(g).is_err() {
            warn!("Gravitational constant cannot grow past {}", self.field.g_constant());
        }
    }

    /// Lower the gravitational constant by one, stopping at zero
    pub fn decrease_gravity(&mut self) {
        let g = (self.field.g_constant() - 1.0).max(0.0);
        if self.field.set_g_constant(g).is_err() {
            warn!("Gravitational constant {} cannot be lowered", self.field.g_constant());
        }
    }

    /// Set the number of copies spawned per boundary bounce
    pub fn set_explosion_count(&mut self, count: usize) {
        self.explosion_count = count;
    }

    /// Copies spawned per boundary bounce
    pub fn explosion_count(&self) -> usize {
        self.explosion_count
    }

    /// Spawn one more copy per bounce
    pub fn increase_explosion_count(&mut self) {
        self.explosion_count = self.explosion_count.saturating_add(1);
    }

    /// Spawn one fewer copy per bounce, stopping at zero
    pub fn decrease_explosion_count(&mut self) {
        self.explosion_count = self.explosion_count.saturating_sub(1);
    }

    /// Set the time acceleration used by [`tick`](Self::tick)
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] for zero or a
    /// non-finite value; the old value is kept.
    pub fn set_time_acceleration(&mut self, time_acceleration: f64) -> Result<(), SimulationError> {
        self.time_acceleration = validate_time_acceleration(time_acceleration)?;
        Ok(())
    }

    /// Time acceleration used by [`tick`](Self::tick)
    pub fn time_acceleration(&self) -> f64 {
        self.time_acceleration
    }

    /// Double the time acceleration
    pub fn speed_up(&mut self) {
        if self.set_time_acceleration(self.time_acceleration * 2.0).is_err() {
            warn!("Time acceleration cannot grow past {}", self.time_acceleration);
        }
    }

    /// Halve the time acceleration
    pub fn slow_down(&mut self) {
        if self.set_time_acceleration(self.time_acceleration / 2.0).is_err() {
            warn!("Time acceleration cannot shrink below {}", self.time_acceleration);
        }
    }

    /// Timestep at a time acceleration of 1
    pub fn nominal_timestep(&self) -> f64 {
        self.nominal_timestep
    }

    /// Cap on the particle count that explosion spawning respects
    pub fn max_particles(&self) -> Option<usize> {
        self.max_particles
    }

    /// Set or lift the particle cap
    pub fn set_max_particles(&mut self, max: Option<usize>) {
        self.max_particles = max;
    }

    /// Flip the pause flag, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Set the pause flag
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether [`tick`](Self::tick) is currently a no-op
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the renderer should draw particle names
    pub fn labels_visible(&self) -> bool {
        self.show_labels
    }

    /// Flip label visibility, returning the new state
    pub fn toggle_labels(&mut self) -> bool {
        self.show_labels = !self.show_labels;
        self.show_labels
    }

    /// Simulated time since creation, the last reset or the last scene load
    ///
    /// Negative time accelerations count backwards.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Steps taken since creation, the last reset or the last scene load
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// The gravitational field in use
    pub fn field(&self) -> &GravityField {
        &self.field
    }

    /// Merges performed since creation
    pub fn total_merges(&self) -> u64 {
        self.resolver.total_merges()
    }

    /// Measure mass, momentum and energy of the current particles
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::measure(&self.particles, &self.field)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::with_field(SimulationConfig::default(), GravityField::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::DEFAULT_GRAVITATIONAL_CONSTANT;

    fn seeded() -> Simulation {
        Simulation::new(SimulationConfig::default().with_seed(7)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let sim = Simulation::default();
        assert_eq!(sim.gravitational_constant(), DEFAULT_GRAVITATIONAL_CONSTANT);
        assert_eq!(sim.time_acceleration(), 1.0);
        assert_eq!(sim.nominal_timestep(), 1.0 / 60.0);
        assert_eq!(sim.explosion_count(), 0);
        assert!(sim.bounding_box().is_none());
        assert!(!sim.is_paused());
        assert!(sim.labels_visible());
        assert!(sim.is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig::default().with_gravitational_constant(f64::NAN);
        assert!(matches!(
            Simulation::new(config),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_new_uses_configured_gravity() {
        for g in [0.0, 7.5, 1.0e4] {
            let sim = Simulation::new(SimulationConfig::default().with_gravitational_constant(g))
                .unwrap();
            assert_eq!(sim.gravitational_constant(), g);
            assert_eq!(sim.field().g_constant(), g);
        }
    }

    #[test]
    fn test_add_and_remove() {
        let mut sim = seeded();
        let a = sim
            .add_particle("A", Position::zero(), Velocity::zero(), 1.0, Color::RED)
            .unwrap();
        let b = sim
            .add_particle("B", Position::new(50.0, 0.0), Velocity::zero(), 2.0, Color::BLUE)
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(sim.len(), 2);

        let removed = sim.remove_particle(a).unwrap();
        assert_eq!(removed.name(), "A");
        assert!(sim.particle(a).is_none());
        assert!(sim.remove_particle(a).is_none());
        assert_eq!(sim.particles()[0].id(), b);
    }

    #[test]
    fn test_add_rejects_invalid_particle() {
        let mut sim = seeded();
        let result = sim.add_particle("bad", Position::zero(), Velocity::zero(), 0.0, Color::WHITE);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParticleParameters(_))
        ));
        assert!(sim.is_empty());
    }

    #[test]
    fn test_tick_respects_pause() {
        let mut sim = seeded();
        sim.add_particle("A", Position::zero(), Velocity::new(60.0, 0.0), 1.0, Color::WHITE)
            .unwrap();

        assert!(sim.toggle_pause());
        assert_eq!(sim.tick().unwrap(), None);
        assert_eq!(sim.step_count(), 0);

        // advance ignores the pause flag
        sim.advance(1.0).unwrap();
        assert_eq!(sim.step_count(), 1);

        assert!(!sim.toggle_pause());
        let report = sim.tick().unwrap().unwrap();
        assert_eq!(report.integrated, 1);
        assert!((sim.particles()[0].position().x() - 2.0).abs() < 1e-12);
        assert!((sim.elapsed() - 2.0 / 60.0).abs() < 1e-15);
    }

    #[test]
    fn test_time_acceleration_controls() {
        let mut sim = seeded();
        sim.speed_up();
        sim.speed_up();
        assert_eq!(sim.time_acceleration(), 4.0);
        sim.slow_down();
        assert_eq!(sim.time_acceleration(), 2.0);

        assert!(sim.set_time_acceleration(0.0).is_err());
        assert!(sim.set_time_acceleration(f64::INFINITY).is_err());
        assert_eq!(sim.time_acceleration(), 2.0);

        sim.set_time_acceleration(-1.0).unwrap();
        assert_eq!(sim.time_acceleration(), -1.0);
    }

    #[test]
    fn test_gravity_and_explosion_controls() {
        let mut sim = seeded();
        sim.set_gravitational_constant(0.5).unwrap();
        sim.decrease_gravity();
        assert_eq!(sim.gravitational_constant(), 0.0);
        sim.decrease_gravity();
        assert_eq!(sim.gravitational_constant(), 0.0);
        sim.increase_gravity();
        assert_eq!(sim.gravitational_constant(), 1.0);

        sim.decrease_explosion_count();
        assert_eq!(sim.explosion_count(), 0);
        sim.increase_explosion_count();
        sim.increase_explosion_count();
        assert_eq!(sim.explosion_count(), 2);
    }

    #[test]
    fn test_reset() {
        let mut sim = seeded();
        sim.load_preset(Preset::ThreeBody).unwrap();
        sim.set_gravitational_constant(3.0).unwrap();
        sim.set_time_acceleration(8.0).unwrap();
        sim.set_explosion_count(4);
        sim.set_bounding_box(Some(BoundingBox::new(-1.0, -1.0, 1.0, 1.0).unwrap()));
        sim.advance(1.0).unwrap();

        sim.reset();
        assert!(sim.is_empty());
        assert_eq!(sim.gravitational_constant(), 20.0);
        assert_eq!(sim.time_acceleration(), 1.0);
        assert!(sim.bounding_box().is_none());
        assert_eq!(sim.explosion_count(), 4);
        assert_eq!(sim.step_count(), 0);
    }

    #[test]
    fn test_particle_at_and_most_massive() {
        let mut sim = seeded();
        let small = sim
            .add_particle("small", Position::new(100.0, 0.0), Velocity::zero(), 8.0, Color::WHITE)
            .unwrap();
        let big = sim
            .add_particle("big", Position::zero(), Velocity::zero(), 1000.0, Color::WHITE)
            .unwrap();

        assert_eq!(sim.particle_at(Position::new(101.0, 0.5)), Some(small));
        assert_eq!(sim.particle_at(Position::new(-5.0, 5.0)), Some(big));
        assert_eq!(sim.particle_at(Position::new(50.0, 50.0)), None);
        assert_eq!(sim.most_massive().map(Particle::id), Some(big));
    }

    #[test]
    fn test_load_scene_is_all_or_nothing() {
        let mut sim = seeded();
        sim.load_preset(Preset::ThreeBody).unwrap();

        let bad = Scene::new(
            vec![
                ParticleInit::new("ok", Position::zero(), Velocity::zero(), 1.0, Color::WHITE),
                ParticleInit::new("bad", Position::zero(), Velocity::zero(), -1.0, Color::WHITE),
            ],
            false,
        );
        assert!(sim.load_scene(bad).is_err());
        assert_eq!(sim.len(), 3);
        assert!(sim.labels_visible());

        assert_eq!(sim.load_preset(Preset::Lattice).unwrap(), 441);
        assert!(!sim.labels_visible());
    }

    #[test]
    fn test_spawn_cap() {
        let config = SimulationConfig::default()
            .with_seed(3)
            .with_gravitational_constant(0.0)
            .with_bounding_box(BoundingBox::new(-10.0, -10.0, 10.0, 10.0).unwrap())
            .with_explosion_count(5)
            .with_max_particles(3);
        let mut sim = Simulation::new(config).unwrap();
        sim.add_particle("P", Position::new(9.99, 0.0), Velocity::new(60.0, 0.0), 1.0, Color::WHITE)
            .unwrap();

        let report = sim.advance(1.0).unwrap();
        assert_eq!(report.spawned, 2);
        assert_eq!(report.dropped_spawns, 3);
        assert_eq!(sim.len(), 3);
    }
}
