/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use vacuum_cleaner::{simulate_with, AgentVariant, Rng, SimulationConfig};

use report::Report;

// Chapter 2 Intelligent Agents Exercise 11, with an energy budget.
//
// A single agent walks a row of rooms until they are all clean, it runs out of energy, or it runs
// out of time. Prints every tick, the final layout, the action log and why the run stopped.
#[derive(Parser, Debug)]
#[command(version, about = "Vacuum agent simulation", long_about = None)]
struct Args {
    /// Policy driving the agent: baseline or heuristic
    #[arg(long, default_value_t = AgentVariant::Baseline)]
    agent: AgentVariant,

    /// Number of rooms
    #[arg(long, default_value_t = 5)]
    rooms: usize,

    /// Maximum number of ticks
    #[arg(long, default_value_t = 100)]
    steps: usize,

    /// Probability that each room starts dirty
    #[arg(long, default_value_t = vacuum_cleaner::DEFAULT_DIRT_PROBABILITY)]
    dirt_probability: f64,

    /// Seed for the random generator. Drawn at random when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the outcome as JSON instead of the report
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            room_count: self.rooms,
            dirt_probability: self.dirt_probability,
            max_steps: self.steps,
            agent: self.agent,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(?config, seed, "starting");

    let mut rng = Rng::seed_from_u64(seed);
    let outcome = simulate_with(&config, &mut rng).context("invalid simulation parameters")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", Report::new(&config, seed, &outcome));
    }
    Ok(())
}
