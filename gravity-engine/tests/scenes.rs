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
//! Scene generation and loading through the simulation

use gravity_engine::particle::Position;
use gravity_engine::scenes::{star_system, three_body, StarSystemParams, ThreeBodyParams};
use gravity_engine::{Preset, Scene, Simulation, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn seeded(seed: u64) -> Simulation {
    Simulation::new(SimulationConfig::default().with_seed(seed)).unwrap()
}

#[test]
fn test_seeded_presets_reproduce_runs() {
    for preset in [Preset::RandomCloud, Preset::ThreeBody, Preset::AccretionDisk] {
        let run = || {
            let mut sim = seeded(31);
            sim.load_preset(preset).unwrap();
            for _ in 0..20 {
                sim.advance(1.0).unwrap();
            }
            sim.particles().to_vec()
        };
        assert_eq!(run(), run(), "{} is not reproducible", preset.name());
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut a = seeded(1);
    let mut b = seeded(2);
    a.load_preset(Preset::Lattice).unwrap();
    b.load_preset(Preset::Lattice).unwrap();

    let masses = |sim: &Simulation| sim.particles().iter().map(|p| p.mass()).collect::<Vec<_>>();
    assert_ne!(masses(&a), masses(&b));
}

#[test]
fn test_preset_label_preferences() {
    let mut sim = seeded(4);
    let expected = [
        (Preset::RandomCloud, true),
        (Preset::Lattice, false),
        (Preset::StarSystem, false),
        (Preset::ThreeBody, true),
        (Preset::AccretionDisk, false),
    ];
    for (preset, labels) in expected {
        sim.load_preset(preset).unwrap();
        assert_eq!(sim.labels_visible(), labels, "{}", preset.name());
        assert_eq!(sim.step_count(), 0);
    }
}

#[test]
fn test_star_system_uses_current_gravity() {
    let mut sim = seeded(6);
    sim.set_gravitational_constant(5.0).unwrap();
    sim.load_preset(Preset::StarSystem).unwrap();

    let star = sim.most_massive().unwrap();
    assert_eq!(star.name(), "Star");
    let body = &sim.particles()[1];
    let r = body.position().distance_to(&Position::zero());
    assert!((body.speed() - (5.0 * 1.0e6 / r).sqrt()).abs() < 1e-9);
}

#[test]
fn test_star_system_conserves_mass_over_time() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let params = StarSystemParams {
        end_radius: 400.0,
        radius_step: 10.0,
        ..StarSystemParams::default()
    };
    let scene = star_system(&mut rng, &params, 20.0).unwrap();
    assert_eq!(scene.len(), 21);

    let mut sim = seeded(12);
    sim.load_scene(scene).unwrap();
    let initial = sim.diagnostics();

    for _ in 0..120 {
        sim.tick().unwrap();
    }

    let d = sim.diagnostics();
    assert!((d.total_mass - initial.total_mass).abs() <= 1e-12 * initial.total_mass);
    assert!(sim.particles().iter().all(|p| p.position().is_valid()));
}

#[test]
fn test_three_body_center_of_mass_stays_put() {
    let scene = three_body(&ThreeBodyParams::default(), 20.0).unwrap();
    let mut sim = seeded(0);
    sim.load_scene(scene).unwrap();

    let start = sim.diagnostics().center_of_mass.unwrap();
    assert!(start.distance_to(&Position::zero()) < 1e-9);

    for _ in 0..30 {
        sim.tick().unwrap();
    }
    let end = sim.diagnostics().center_of_mass.unwrap();
    assert!(end.distance_to(&Position::zero()) < 1.0, "center drifted to {:?}", end);
    assert_eq!(sim.len(), 3);
}

#[test]
fn test_empty_scene_clears_simulation() {
    let mut sim = seeded(0);
    sim.load_preset(Preset::ThreeBody).unwrap();
    assert_eq!(sim.load_scene(Scene::default()).unwrap(), 0);
    assert!(sim.is_empty());
    sim.advance(1.0).unwrap();
}
