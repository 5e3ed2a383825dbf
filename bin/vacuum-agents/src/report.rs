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

//! Text report for a finished run.

use vacuum_cleaner::{ActionRecord, Dirtiness, Outcome, SimulationConfig, TerminationReason};

const WIDE_RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

fn room_label(dirtiness: Dirtiness) -> String {
    if dirtiness == 0 {
        "CLEAN".to_string()
    } else {
        format!("D{}", dirtiness)
    }
}

fn agent_room_label(dirtiness: Dirtiness) -> String {
    if dirtiness == 0 {
        "AGENT".to_string()
    } else {
        format!("AGENT-D{}", dirtiness)
    }
}

fn action_prefix(record: &ActionRecord) -> &'static str {
    match record {
        ActionRecord::Suck { .. } => "[CLEAN]",
        ActionRecord::MoveRight { .. } => "[RIGHT]",
        ActionRecord::MoveLeft { .. } => "[LEFT] ",
    }
}

fn section(f: &mut std::fmt::Formatter<'_>, title: &str) -> std::fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", WIDE_RULE)?;
    writeln!(f, "   {}", title)?;
    writeln!(f, "{}", WIDE_RULE)
}

/// Text report of a finished run: settings, dirt after every tick, final state, action log and
/// why the run stopped.
pub struct Report<'a> {
    config: &'a SimulationConfig,
    seed: u64,
    outcome: &'a Outcome,
}

impl<'a> Report<'a> {
    pub fn new(config: &'a SimulationConfig, seed: u64, outcome: &'a Outcome) -> Self {
        Self {
            config,
            seed,
            outcome,
        }
    }

    fn final_layout(&self) -> Vec<String> {
        let position = self.outcome.agent.position();
        self.outcome
            .environment
            .rooms()
            .iter()
            .map(|room| {
                if room.index() == position {
                    agent_room_label(room.dirtiness())
                } else {
                    room_label(room.dirtiness())
                }
            })
            .collect()
    }
}

impl std::fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config;
        let outcome = self.outcome;
        let agent = &outcome.agent;

        section(
            f,
            &format!("{} AGENT SIMULATION", config.agent.name().to_uppercase()),
        )?;
        writeln!(f, "  Environment:     {} rooms", config.room_count)?;
        writeln!(f, "  Max Steps:       {}", config.max_steps)?;
        writeln!(f, "  Initial Energy:  {:.1} units", agent.initial_energy())?;
        writeln!(f, "  Seed:            {}", self.seed)?;
        writeln!(f, "{}", THIN_RULE)?;

        writeln!(f)?;
        writeln!(f, "   SIMULATION PROGRESS:")?;
        writeln!(f, "{}", THIN_RULE)?;
        for (step, snapshot) in outcome.history.iter().enumerate() {
            let rooms: Vec<String> = snapshot.iter().map(|&d| room_label(d)).collect();
            writeln!(f, "  Step {:2}: [{}]", step + 1, rooms.join("  "))?;
        }

        section(f, "SIMULATION RESULTS")?;
        writeln!(f, "  Final Layout:    [{}]", self.final_layout().join("  "))?;
        writeln!(f, "  Agent Position:  Room {}", agent.position())?;
        writeln!(f)?;
        writeln!(f, "  Rooms Cleaned:     {}", agent.cleaned())?;
        writeln!(
            f,
            "  Energy Consumed:    {:.1} / {:.1}",
            agent.energy_consumed(),
            agent.initial_energy()
        )?;
        writeln!(f, "  Energy Remaining:   {:.1}", agent.energy())?;
        writeln!(f, "  Steps Taken:       {}", agent.steps())?;
        writeln!(f, "  Simulation Steps:   {}", outcome.history.len())?;

        section(f, "ACTION SEQUENCE")?;
        if agent.action_sequence().is_empty() {
            writeln!(f, "  No actions taken")?;
        }
        for (i, record) in agent.action_sequence().iter().enumerate() {
            writeln!(f, "  {:2}. {} {}", i + 1, action_prefix(record), record)?;
        }

        section(f, "TERMINATION REASON")?;
        match outcome.termination() {
            Some(TerminationReason::AllClean) => {
                writeln!(f, "  STATUS: SUCCESS - All rooms are clean!")?;
                writeln!(f, "  RESULT: Mission accomplished!")?;
            }
            Some(TerminationReason::EnergyExhausted) => {
                writeln!(f, "  STATUS: ENERGY DEPLETED - Agent ran out of energy")?;
                writeln!(
                    f,
                    "  REASON: Remaining energy ({:.1}) insufficient for any action",
                    agent.energy()
                )?;
            }
            Some(TerminationReason::TimeLimit) => {
                writeln!(f, "  STATUS: TIME LIMIT - Maximum steps reached")?;
                writeln!(
                    f,
                    "  ADVICE: Consider increasing step limit for better performance"
                )?;
            }
            None => {
                writeln!(f, "  STATUS: UNKNOWN - Unexpected termination")?;
            }
        }
        writeln!(f, "{}", WIDE_RULE)?;
        writeln!(f, "   SIMULATION COMPLETE")?;
        writeln!(f, "{}", WIDE_RULE)?;
        writeln!(f)
    }
}
