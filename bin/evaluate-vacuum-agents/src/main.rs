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

#![warn(missing_docs)]

//! Chapter 2, Exercise 12, Evaluate Vacuum Agents.

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing_subscriber::EnvFilter;
use vacuum_cleaner::{simulate, AgentVariant, Float, Outcome, Rng, TerminationReason};

// Exercise 12:
//
// Run the environment with each agent for many initial dirt configurations. Record the
// performance of each run and the overall average. Every run gets its own generator seeded from
// base_seed + run index, so runs can go in parallel and still give the same numbers every time.
#[derive(Parser, Debug)]
#[command(version, about = "Compare vacuum agent policies over seeded runs", long_about = None)]
struct Args {
    /// Number of runs per policy
    #[arg(long, default_value_t = 1000)]
    runs: u64,

    /// Number of rooms
    #[arg(long, default_value_t = 5)]
    rooms: usize,

    /// Maximum number of ticks per run
    #[arg(long, default_value_t = 100)]
    steps: usize,

    /// Seed of the first run
    #[arg(long, default_value_t = 0)]
    base_seed: u64,
}

/// Averages over every run of one policy.
#[derive(Debug, Clone, PartialEq)]
struct Summary {
    variant: AgentVariant,
    runs: usize,
    mean_cleaned: Float,
    mean_energy_consumed: Float,
    mean_steps: Float,
    mean_dirt_left: Float,
    terminations: FxHashMap<Option<TerminationReason>, usize>,
}

impl Summary {
    fn from_outcomes(variant: AgentVariant, outcomes: &[Outcome]) -> Self {
        let runs = outcomes.len();
        let mean = |total: Float| {
            if runs == 0 {
                0.0
            } else {
                total / runs as Float
            }
        };
        let mut terminations = FxHashMap::default();
        for outcome in outcomes {
            *terminations.entry(outcome.termination()).or_insert(0) += 1;
        }
        Self {
            variant,
            runs,
            mean_cleaned: mean(outcomes.iter().map(|o| o.agent.cleaned() as Float).sum()),
            mean_energy_consumed: mean(outcomes.iter().map(Outcome::energy_consumed).sum()),
            mean_steps: mean(outcomes.iter().map(|o| o.history.len() as Float).sum()),
            mean_dirt_left: mean(
                outcomes
                    .iter()
                    .map(|o| Float::from(o.environment.total_dirtiness()))
                    .sum(),
            ),
            terminations,
        }
    }

    fn termination_count(&self, reason: Option<TerminationReason>) -> usize {
        self.terminations.get(&reason).copied().unwrap_or(0)
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({} runs)", self.variant, self.runs)?;
        writeln!(f, "  mean rooms cleaned:    {:.2}", self.mean_cleaned)?;
        writeln!(f, "  mean energy consumed:  {:.2}", self.mean_energy_consumed)?;
        writeln!(f, "  mean simulation steps: {:.2}", self.mean_steps)?;
        writeln!(f, "  mean dirt left:        {:.2}", self.mean_dirt_left)?;
        for reason in [
            TerminationReason::AllClean,
            TerminationReason::EnergyExhausted,
            TerminationReason::TimeLimit,
        ] {
            writeln!(
                f,
                "  {:<22} {}",
                format!("{}:", reason),
                self.termination_count(Some(reason))
            )?;
        }
        let unknown = self.termination_count(None);
        if unknown > 0 {
            writeln!(f, "  {:<22} {}", "unknown:", unknown)?;
        }
        Ok(())
    }
}

fn evaluate(variant: AgentVariant, args: &Args) -> Result<Summary> {
    let outcomes = (0..args.runs)
        .into_par_iter()
        .map(|run| {
            let mut rng = Rng::seed_from_u64(args.base_seed.wrapping_add(run));
            simulate(variant, args.rooms, args.steps, &mut rng)
        })
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("evaluating {}", variant))?;
    Ok(Summary::from_outcomes(variant, &outcomes))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!(?args, "starting evaluation");

    for variant in AgentVariant::ALL {
        let summary = evaluate(variant, &args)?;
        println!("{}", summary);
    }
    Ok(())
}
