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
//! Three-Body Example
//!
//! Loads three equal masses on an equilateral triangle and prints
//! conservation diagnostics while the system evolves. The configuration is
//! the one the interactive simulator offers on its "3" key; with the default
//! gravitational constant the bodies are not bound and eventually scatter.
//!
//! # Running
//!
//! ```bash
//! # Default: 10 simulated seconds at G = 20
//! cargo run --example three_body --release
//!
//! # Stronger gravity and a longer run, with per-step logging
//! RUST_LOG=trace cargo run --example three_body --release -- --g 60 --seconds 30
//!
//! # Faster clock
//! cargo run --example three_body --release -- --time-acceleration 4
//! ```

use gravity_engine::{Preset, Simulation, SimulationConfig};

struct DemoConfig {
    gravitational_constant: f64,
    seconds: f64,
    time_acceleration: f64,
    seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            gravitational_constant: 20.0,
            seconds: 10.0,
            time_acceleration: 1.0,
            seed: 3,
        }
    }
}

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
    let mut demo = DemoConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--g" => {
                demo.gravitational_constant = parse_value(&args, i, "--g");
                i += 2;
            }
            "--seconds" => {
                demo.seconds = parse_value(&args, i, "--seconds");
                i += 2;
            }
            "--time-acceleration" => {
                demo.time_acceleration = parse_value(&args, i, "--time-acceleration");
                i += 2;
            }
            "--seed" => {
                demo.seed = parse_value(&args, i, "--seed");
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let config = SimulationConfig::default()
        .with_gravitational_constant(demo.gravitational_constant)
        .with_time_acceleration(demo.time_acceleration)
        .with_seed(demo.seed);
    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = sim.load_preset(Preset::ThreeBody) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("==========================================================");
    println!("       Three-Body Simulation");
    println!("==========================================================");
    println!("  G = {}", sim.gravitational_constant());
    println!("  time acceleration = {}", sim.time_acceleration());
    println!("  duration = {} s", demo.seconds);
    println!();

    let initial = sim.diagnostics();
    let steps = (demo.seconds / (sim.nominal_timestep() * sim.time_acceleration().abs())).ceil() as u64;
    let report_every = (steps / 10).max(1);

    println!("{:>8} {:>14} {:>14} {:>12}", "time", "energy", "rel. error", "|p|");
    for step in 1..=steps {
        if let Err(e) = sim.tick() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        if step % report_every == 0 || step == steps {
            let d = sim.diagnostics();
            let error = (d.total_energy() - initial.total_energy()) / initial.total_energy().abs();
            println!(
                "{:>8.2} {:>14.6e} {:>14.3e} {:>12.3e}",
                sim.elapsed(),
                d.total_energy(),
                error,
                d.momentum_magnitude()
            );
        }
    }

    println!();
    for p in sim.particles() {
        println!(
            "  {:<6} mass {:>10.1}  at ({:>9.2}, {:>9.2})  speed {:>8.2}",
            p.name(),
            p.mass(),
            p.position().x(),
            p.position().y(),
            p.speed()
        );
    }
    println!("  merges: {}", sim.total_merges());
}
