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
//! Initial particle configurations
//!
//! Every generator is a pure function of its parameters and the injected
//! random number generator, so a seeded generator always reproduces the same
//! scene. Generators return [`ParticleInit`]s; loading a [`Scene`] into a
//! [`Simulation`](crate::Simulation) assigns the ids.
//!
//! # Example
//!
//! ```
//! use gravity_engine::scenes::{lattice, LatticeParams};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let scene = lattice(&mut rng, &LatticeParams::default()).unwrap();
//! assert_eq!(scene.particles.len(), 21 * 21);
//! assert!(!scene.show_labels);
//! ```

use crate::error::{require_finite, require_positive, require_range, SimulationError};
use crate::particle::{Color, ParticleInit, Position, Velocity};
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, TAU};

/// A generated set of particles plus the label preference that goes with it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    /// Particles in insertion order
    pub particles: Vec<ParticleInit>,
    /// Whether the renderer should draw particle names
    pub show_labels: bool,
}

impl Scene {
    /// Create a scene
    pub fn new(particles: Vec<ParticleInit>, show_labels: bool) -> Self {
        Scene {
            particles,
            show_labels,
        }
    }

    /// Number of particles in the scene
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Check whether the scene has no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Largest number of particles a single generator will produce
pub const MAX_SCENE_PARTICLES: usize = 1_000_000;

/// Reject a scene whose particle count, computed in `f64`, exceeds
/// [`MAX_SCENE_PARTICLES`]
fn require_scene_size(name: &str, count: f64) -> Result<usize, SimulationError> {
    if count >= 0.0 && count <= MAX_SCENE_PARTICLES as f64 {
        Ok(count as usize)
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "{} would hold {} particles, more than the limit of {}",
            name, count, MAX_SCENE_PARTICLES
        )))
    }
}

/// Uniform sample from `[min, max)`, or `min` when the range is a single point
fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn require_probability(name: &str, p: f64) -> Result<f64, SimulationError> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "{} must be a probability in [0, 1], got {}",
            name, p
        )))
    }
}

fn require_gravity(g: f64) -> Result<f64, SimulationError> {
    if g >= 0.0 && g.is_finite() {
        Ok(g)
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "gravitational constant must be non-negative and finite, got {}",
            g
        )))
    }
}

/// Circular-orbit velocity at `position` about a mass at the origin
fn orbital_velocity(g: f64, central_mass: f64, radius: f64, angle: f64) -> Velocity {
    let speed = (g * central_mass / radius).sqrt();
    Velocity::from_polar(speed, angle + FRAC_PI_2)
}

/// Parameters for [`random_cloud`]
#[derive(Debug, Clone, PartialEq)]
pub struct CloudParams {
    /// Inclusive range for the number of particles
    pub count: (usize, usize),
    /// Range for each position coordinate
    pub position_range: (f64, f64),
    /// Range for each velocity component
    pub velocity_range: (f64, f64),
    /// Range for the base-10 exponent of the mass
    pub log_mass_range: (f64, f64),
}

impl Default for CloudParams {
    fn default() -> Self {
        CloudParams {
            count: (2, 10),
            position_range: (-500.0, 500.0),
            velocity_range: (-150.0, 150.0),
            log_mass_range: (0.0, 7.0),
        }
    }
}

/// A handful of randomly placed bodies with masses spread over many decades
pub fn random_cloud<R: Rng + ?Sized>(
    rng: &mut R,
    params: &CloudParams,
) -> Result<Scene, SimulationError> {
    let (min_count, max_count) = params.count;
    if min_count > max_count {
        return Err(SimulationError::InvalidParameter(format!(
            "particle count range must have min <= max, got ({}, {})",
            min_count, max_count
        )));
    }
    require_scene_size("random cloud", max_count as f64)?;
    let position_range = require_range("position range", params.position_range)?;
    let velocity_range = require_range("velocity range", params.velocity_range)?;
    let log_mass_range = require_range("log mass range", params.log_mass_range)?;

    let count = rng.gen_range(min_count..=max_count);
    let particles = (0..count)
        .map(|i| {
            let position = Position::new(
                sample(rng, position_range),
                sample(rng, position_range),
            );
            let velocity = Velocity::new(
                sample(rng, velocity_range),
                sample(rng, velocity_range),
            );
            let mass = 10f64.powf(sample(rng, log_mass_range));
            ParticleInit::new(format!("P{}", i), position, velocity, mass, Color::random(rng))
        })
        .collect();

    Ok(Scene::new(particles, true))
}

/// Parameters for [`lattice`]
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeParams {
    /// Distance between neighbouring grid points
    pub spacing: f64,
    /// Half-width of the grid; points reach `±floor(extent / spacing) * spacing`
    pub extent: f64,
    /// Probability that a point gets the heavy mass
    pub heavy_probability: f64,
    /// Mass of heavy points
    pub heavy_mass: f64,
    /// Mass of light points
    pub light_mass: f64,
}

impl Default for LatticeParams {
    fn default() -> Self {
        LatticeParams {
            spacing: 50.0,
            extent: 500.0,
            heavy_probability: 2.0 / 3.0,
            heavy_mass: 100.0,
            light_mass: 1.0,
        }
    }
}

/// A square grid of resting bodies that collapses under its own gravity
pub fn lattice<R: Rng + ?Sized>(
    rng: &mut R,
    params: &LatticeParams,
) -> Result<Scene, SimulationError> {
    let spacing = require_positive("lattice spacing", params.spacing)?;
    let extent = require_finite("lattice extent", params.extent)?;
    if extent < 0.0 {
        return Err(SimulationError::InvalidParameter(format!(
            "lattice extent must not be negative, got {}",
            extent
        )));
    }
    let heavy_probability = require_probability("heavy probability", params.heavy_probability)?;
    let heavy_mass = require_positive("heavy mass", params.heavy_mass)?;
    let light_mass = require_positive("light mass", params.light_mass)?;

    let half_side = (extent / spacing).floor();
    let side = 2.0 * half_side + 1.0;
    let total = require_scene_size("lattice", side * side)?;
    let steps = half_side as i64;
    let mut particles = Vec::with_capacity(total);

    for i in -steps..=steps {
        for j in -steps..=steps {
            let x = i as f64 * spacing;
            let y = j as f64 * spacing;
            let mass = if rng.gen_bool(heavy_probability) {
                heavy_mass
            } else {
                light_mass
            };
            particles.push(ParticleInit::new(
                format!("P{},{}", x, y),
                Position::new(x, y),
                Velocity::zero(),
                mass,
                Color::random(rng),
            ));
        }
    }

    Ok(Scene::new(particles, false))
}

/// Parameters for [`star_system`]
#[derive(Debug, Clone, PartialEq)]
pub struct StarSystemParams {
    /// Mass of the central star
    pub star_mass: f64,
    /// Orbit radius of the innermost body
    pub first_radius: f64,
    /// Orbit radii stop before this value
    pub end_radius: f64,
    /// Radial distance between consecutive bodies
    pub radius_step: f64,
    /// Mass of each orbiting body
    pub body_mass: f64,
}

impl Default for StarSystemParams {
    fn default() -> Self {
        StarSystemParams {
            star_mass: 1.0e6,
            first_radius: 200.0,
            end_radius: 1000.0,
            radius_step: 3.0,
            body_mass: 100.0,
        }
    }
}

/// A heavy star at rest with one body on a circular orbit per radius
///
/// Orbits run counter-clockwise and ignore the pull of the other bodies, so
/// the system slowly heats up as neighbours perturb each other.
pub fn star_system<R: Rng + ?Sized>(
    rng: &mut R,
    params: &StarSystemParams,
    g: f64,
) -> Result<Scene, SimulationError> {
    let g = require_gravity(g)?;
    let star_mass = require_positive("star mass", params.star_mass)?;
    let first_radius = require_positive("first orbit radius", params.first_radius)?;
    let end_radius = require_finite("end orbit radius", params.end_radius)?;
    let radius_step = require_positive("orbit radius step", params.radius_step)?;
    let body_mass = require_positive("body mass", params.body_mass)?;

    let orbits = if end_radius > first_radius {
        ((end_radius - first_radius) / radius_step).ceil()
    } else {
        0.0
    };
    let total = require_scene_size("star system", orbits + 1.0)?;
    let count = total - 1;

    let mut particles = Vec::with_capacity(total);
    particles.push(ParticleInit::new(
        "Star",
        Position::zero(),
        Velocity::zero(),
        star_mass,
        Color::WHITE,
    ));

    for k in 0..count {
        let r = first_radius + k as f64 * radius_step;
        let theta = rng.gen_range(0.0..TAU);
        particles.push(ParticleInit::new(
            format!("C{}", r),
            Position::new(r * theta.cos(), r * theta.sin()),
            orbital_velocity(g, star_mass, r, theta),
            body_mass,
            Color::random(rng),
        ));
    }

    Ok(Scene::new(particles, false))
}

/// Parameters for [`three_body`]
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeBodyParams {
    /// Mass of each body
    pub mass: f64,
    /// Radius of the circle the bodies start on
    pub radius: f64,
}

impl Default for ThreeBodyParams {
    fn default() -> Self {
        ThreeBodyParams {
            mass: 10_000.0,
            radius: 100.0,
        }
    }
}

/// Three equal masses on an equilateral triangle in rigid rotation
///
/// Each body moves counter-clockwise at `sqrt(G·m·3 / (2·radius))`.
pub fn three_body(params: &ThreeBodyParams, g: f64) -> Result<Scene, SimulationError> {
    let g = require_gravity(g)?;
    let mass = require_positive("body mass", params.mass)?;
    let radius = require_positive("circle radius", params.radius)?;

    let speed = (g * mass * 3.0 / (2.0 * radius)).sqrt();
    let colors = [Color::RED, Color::GREEN, Color::BLUE];

    let particles = colors
        .iter()
        .enumerate()
        .map(|(k, &color)| {
            let angle = k as f64 * TAU / 3.0;
            ParticleInit::new(
                format!("Body{}", k + 1),
                Position::new(radius * angle.cos(), radius * angle.sin()),
                Velocity::from_polar(speed, angle + FRAC_PI_2),
                mass,
                color,
            )
        })
        .collect();

    Ok(Scene::new(particles, true))
}

/// Parameters for [`accretion_disk`]
#[derive(Debug, Clone, PartialEq)]
pub struct DiskParams {
    /// Mass of the central star
    pub star_mass: f64,
    /// Number of orbiting bodies
    pub count: usize,
    /// Range of orbit radii
    pub radius_range: (f64, f64),
    /// Range of body masses
    pub mass_range: (f64, f64),
}

impl Default for DiskParams {
    fn default() -> Self {
        DiskParams {
            star_mass: 1.0e6,
            count: 200,
            radius_range: (200.0, 800.0),
            mass_range: (1.0, 10.0),
        }
    }
}

/// A central star surrounded by a disk of bodies on circular orbits
pub fn accretion_disk<R: Rng + ?Sized>(
    rng: &mut R,
    params: &DiskParams,
    g: f64,
) -> Result<Scene, SimulationError> {
    let g = require_gravity(g)?;
    let star_mass = require_positive("star mass", params.star_mass)?;
    let radius_range = require_range("disk radius range", params.radius_range)?;
    require_positive("inner disk radius", radius_range.0)?;
    let mass_range = require_range("disk mass range", params.mass_range)?;
    require_positive("minimum body mass", mass_range.0)?;

    let total = require_scene_size("accretion disk", params.count as f64 + 1.0)?;

    let mut particles = Vec::with_capacity(total);
    particles.push(ParticleInit::new(
        "Star",
        Position::zero(),
        Velocity::zero(),
        star_mass,
        Color::YELLOW,
    ));

    for i in 0..params.count {
        let r = sample(rng, radius_range);
        let theta = rng.gen_range(0.0..TAU);
        let mass = sample(rng, mass_range);
        particles.push(ParticleInit::new(
            format!("D{}", i),
            Position::new(r * theta.cos(), r * theta.sin()),
            orbital_velocity(g, star_mass, r, theta),
            mass,
            Color::random(rng),
        ));
    }

    Ok(Scene::new(particles, false))
}

/// Built-in scenes with their default parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    /// [`random_cloud`]
    RandomCloud,
    /// [`lattice`]
    Lattice,
    /// [`star_system`]
    StarSystem,
    /// [`three_body`]
    #[default]
    ThreeBody,
    /// [`accretion_disk`]
    AccretionDisk,
}

impl Preset {
    /// Every preset, in menu order
    pub const ALL: [Preset; 5] = [
        Preset::RandomCloud,
        Preset::Lattice,
        Preset::StarSystem,
        Preset::ThreeBody,
        Preset::AccretionDisk,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Preset::RandomCloud => "random cloud",
            Preset::Lattice => "lattice",
            Preset::StarSystem => "star system",
            Preset::ThreeBody => "three body",
            Preset::AccretionDisk => "accretion disk",
        }
    }

    /// Generate the preset for gravitational constant `g`
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R, g: f64) -> Result<Scene, SimulationError> {
        match self {
            Preset::RandomCloud => random_cloud(rng, &CloudParams::default()),
            Preset::Lattice => lattice(rng, &LatticeParams::default()),
            Preset::StarSystem => star_system(rng, &StarSystemParams::default(), g),
            Preset::ThreeBody => three_body(&ThreeBodyParams::default(), g),
            Preset::AccretionDisk => accretion_disk(rng, &DiskParams::default(), g),
        }
    }
}
