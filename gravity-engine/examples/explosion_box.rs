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
//! Explosion Box Example
//!
//! Drops a random cloud into a reflective box with explosion spawning
//! turned on. Every bounce emits copies of the bouncing body on the opposite
//! wall, so the particle count grows until merges or the particle cap hold it
//! back.
//!
//! # Running
//!
//! ```bash
//! cargo run --example explosion_box --release
//!
//! # Larger box, more copies per bounce, watch dropped spawns
//! RUST_LOG=warn cargo run --example explosion_box --release -- --half-size 800 --explosions 3 --cap 400
//! ```

use gravity_engine::particle::Position;
use gravity_engine::{BoundingBox, Preset, Simulation, SimulationConfig};

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i + 1).map(|s| s.parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            eprintln!("Error: invalid value '{}' for {}", args[i + 1], flag);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: {} requires an argument", flag);
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut half_size = 400.0;
    let mut explosions: usize = 1;
    let mut cap: usize = 250;
    let mut steps: u64 = 600;
    let mut seed: u64 = 11;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--half-size" => {
                half_size = parse_value(&args, i, "--half-size");
                i += 2;
            }
            "--explosions" => {
                explosions = parse_value(&args, i, "--explosions");
                i += 2;
            }
            "--cap" => {
                cap = parse_value(&args, i, "--cap");
                i += 2;
            }
            "--steps" => {
                steps = parse_value(&args, i, "--steps");
                i += 2;
            }
            "--seed" => {
                seed = parse_value(&args, i, "--seed");
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bbox = match BoundingBox::symmetric(Position::new(half_size, half_size)) {
        Ok(bbox) => bbox,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let config = SimulationConfig::default()
        .with_bounding_box(bbox)
        .with_explosion_count(explosions)
        .with_max_particles(cap)
        .with_seed(seed);

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = sim.load_preset(Preset::RandomCloud) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("==========================================================");
    println!("       Explosion Box");
    println!("==========================================================");
    println!("  box = ±{}  explosions per bounce = {}  cap = {}", half_size, explosions, cap);
    println!("  starting particles = {}", sim.len());
    println!();

    let mut spawned = 0;
    let mut dropped = 0;
    let mut merged = 0;
    println!("{:>6} {:>10} {:>10} {:>10} {:>10} {:>14}", "step", "particles", "spawned", "dropped", "merged", "total mass");
    for step in 1..=steps {
        let report = match sim.tick() {
            Ok(Some(report)) => report,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        spawned += report.spawned;
        dropped += report.dropped_spawns;
        merged += report.merged;

        if step % 60 == 0 {
            println!(
                "{:>6} {:>10} {:>10} {:>10} {:>10} {:>14.4e}",
                step,
                sim.len(),
                spawned,
                dropped,
                merged,
                sim.diagnostics().total_mass
            );
        }
    }

    if let Some(heaviest) = sim.most_massive() {
        println!();
        println!(
            "Heaviest body: {} ({:.3e}) at ({:.1}, {:.1})",
            heaviest.name(),
            heaviest.mass(),
            heaviest.position().x(),
            heaviest.position().y()
        );
    }
}
