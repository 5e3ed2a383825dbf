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

//! Decision policies for the vacuum agent.

use rand::Rng as _;
use serde::Serialize;

use crate::agent::{Action, Percept};
use crate::{Float, Rng, VacuumError};

/// Actions to try in order. The agent performs the first one it can afford and that is not
/// blocked by a wall, and none of the rest.
pub type Plan = Vec<Action>;

/// A Policy decides what the agent does in a Performance, Environment, Action, Sensing (PEAS)
/// cycle. For a given Percept, the Policy returns a Plan.
///
/// Notice that the Policy is not aware of the Environment, its only interface is the Percept
/// coming in then the Plan going out. Randomness comes from the caller's generator so that a
/// whole run stays reproducible from one seed.
pub trait Policy {
    /// Short name, used in logs and reports.
    fn name(&self) -> &'static str;

    /// Decide what to try this cycle.
    fn decide(&mut self, percept: &Percept, rng: &mut Rng) -> Plan;
}

/// The plan both policies use when the current room is dirty and they can pay for it.
fn clean_if_affordable(percept: &Percept) -> Option<Plan> {
    (percept.is_dirty && percept.can_suck()).then(|| vec![Action::Suck])
}

/// Clean a dirty room when affordable, otherwise head right, bouncing left off the last room.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaselinePolicy {}

impl BaselinePolicy {
    /// Create a new baseline policy.
    pub fn new() -> Self {
        Self {}
    }
}

impl Policy for BaselinePolicy {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn decide(&mut self, percept: &Percept, _rng: &mut Rng) -> Plan {
        clean_if_affordable(percept).unwrap_or_else(|| vec![Action::MoveRight, Action::MoveLeft])
    }
}

/// Clean a dirty room when affordable, otherwise pick a direction with a fair coin, falling back
/// to the other direction at a wall.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicPolicy {}

impl HeuristicPolicy {
    /// Create a new heuristic policy.
    pub fn new() -> Self {
        Self {}
    }
}

impl Policy for HeuristicPolicy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn decide(&mut self, percept: &Percept, rng: &mut Rng) -> Plan {
        if let Some(plan) = clean_if_affordable(percept) {
            return plan;
        }
        if rng.gen::<Float>() < 0.5 {
            vec![Action::MoveRight, Action::MoveLeft]
        } else {
            vec![Action::MoveLeft, Action::MoveRight]
        }
    }
}

/// Which policy drives the agent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentVariant {
    /// [`BaselinePolicy`].
    #[default]
    Baseline,

    /// [`HeuristicPolicy`].
    Heuristic,
}

impl AgentVariant {
    /// Every variant, in a stable order.
    pub const ALL: [AgentVariant; 2] = [AgentVariant::Baseline, AgentVariant::Heuristic];

    /// Lowercase name, as accepted by [`std::str::FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            AgentVariant::Baseline => "baseline",
            AgentVariant::Heuristic => "heuristic",
        }
    }
}

impl std::fmt::Display for AgentVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for AgentVariant {
    type Err = VacuumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(AgentVariant::Baseline),
            "heuristic" => Ok(AgentVariant::Heuristic),
            _ => Err(VacuumError::UnknownAgentVariant(s.to_string())),
        }
    }
}
