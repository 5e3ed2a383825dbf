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

//! The simulation driver.

use serde::Serialize;
use tracing::{debug, info};

use crate::agent::Agent;
use crate::environment::{validate_probability, Environment};
use crate::policy::{AgentVariant, BaselinePolicy, HeuristicPolicy, Policy};
use crate::{Float, Rng, Snapshot, VacuumError, DEFAULT_DIRT_PROBABILITY};

/// Parameters for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationConfig {
    /// Number of rooms in the row.
    pub room_count: usize,

    /// Probability that each room starts dirty.
    pub dirt_probability: Float,

    /// Upper bound on the number of ticks.
    pub max_steps: usize,

    /// Which policy drives the agent.
    pub agent: AgentVariant,
}

impl SimulationConfig {
    /// Create a config with the default dirt probability.
    pub fn new(agent: AgentVariant, room_count: usize, max_steps: usize) -> Self {
        Self {
            room_count,
            dirt_probability: DEFAULT_DIRT_PROBABILITY,
            max_steps,
            agent,
        }
    }

    /// Reject configurations that would give a degenerate run.
    pub fn validate(&self) -> Result<(), VacuumError> {
        if self.room_count == 0 {
            return Err(VacuumError::InvalidRoomCount(self.room_count));
        }
        validate_probability(self.dirt_probability)?;
        validate_max_steps(self.max_steps)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(AgentVariant::Baseline, 5, 100)
    }
}

fn validate_max_steps(max_steps: usize) -> Result<(), VacuumError> {
    if max_steps == 0 {
        return Err(VacuumError::InvalidMaxSteps(max_steps));
    }
    Ok(())
}

/// Why a run stopped. Not stored anywhere; it is worked out from the final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TerminationReason {
    /// Every room is clean.
    AllClean,

    /// The agent cannot afford to clean its room or to move.
    EnergyExhausted,

    /// The step limit was reached.
    TimeLimit,
}

impl TerminationReason {
    /// Work out why a run stopped from its final state. Checked in order: all clean, then out of
    /// energy, then out of time. None means the run could have kept going.
    pub fn infer(
        agent: &Agent,
        environment: &Environment,
        completed_steps: usize,
        max_steps: usize,
    ) -> Option<Self> {
        if environment.all_clean() {
            Some(TerminationReason::AllClean)
        } else if !agent.can_act(environment) {
            Some(TerminationReason::EnergyExhausted)
        } else if completed_steps >= max_steps {
            Some(TerminationReason::TimeLimit)
        } else {
            None
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::AllClean => write!(f, "all clean"),
            TerminationReason::EnergyExhausted => write!(f, "energy exhausted"),
            TerminationReason::TimeLimit => write!(f, "time limit"),
        }
    }
}

/// A Simulation runs a single Agent in multiple Performance, Environment, Action, Sensing (PEAS)
/// cycles and records the dirt in every room after each one.
///
/// The Simulation owns the Environment, the Agent and the Policy. The Agent is handed the
/// Environment for each action rather than keeping a reference to it.
#[derive(Debug, Clone)]
pub struct Simulation<_Policy>
where
    _Policy: Policy,
{
    environment: Environment,
    agent: Agent,
    policy: _Policy,
    max_steps: usize,
    history: Vec<Snapshot>,
}

impl<_Policy> Simulation<_Policy>
where
    _Policy: Policy,
{
    /// Create a simulation from an environment and an agent standing in it.
    pub fn new(
        environment: Environment,
        agent: Agent,
        policy: _Policy,
        max_steps: usize,
    ) -> Result<Self, VacuumError> {
        validate_max_steps(max_steps)?;
        if agent.position() >= environment.len() {
            return Err(VacuumError::PositionOutOfBounds {
                position: agent.position(),
                room_count: environment.len(),
            });
        }
        Ok(Self {
            environment,
            agent,
            policy,
            max_steps,
            history: Vec::with_capacity(max_steps.min(1024)),
        })
    }

    /// Create a fresh random environment from `rng` with the agent in the leftmost room.
    pub fn from_config(
        config: &SimulationConfig,
        policy: _Policy,
        rng: &mut Rng,
    ) -> Result<Self, VacuumError> {
        config.validate()?;
        let environment = Environment::new(config.room_count, config.dirt_probability, rng)?;
        let agent = Agent::at_start(&environment);
        Self::new(environment, agent, policy, config.max_steps)
    }

    /// The environment as it is now.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The agent as it is now.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// One snapshot per completed tick.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Ticks completed so far.
    pub fn completed_steps(&self) -> usize {
        self.history.len()
    }

    /// Run one tick: the agent decides and acts once, then dirt may reappear, then the rooms are
    /// recorded. Returns false, without changing anything, if the step limit is used up or the
    /// agent cannot afford any useful action.
    pub fn tick(&mut self, rng: &mut Rng) -> bool {
        if self.history.len() >= self.max_steps || !self.agent.can_act(&self.environment) {
            return false;
        }

        let percept = self.agent.perceive(&self.environment);
        let plan = self.policy.decide(&percept, rng);
        let taken = self.agent.execute(&plan, &mut self.environment);
        self.environment.step_dirt_reappearance(rng);
        self.history.push(self.environment.snapshot());

        debug!(
            step = self.history.len(),
            policy = self.policy.name(),
            action = ?taken,
            position = self.agent.position(),
            energy = self.agent.energy(),
            "tick"
        );
        true
    }

    /// Tick until every room is clean, the agent runs out of energy, or the step limit is hit.
    /// The all-clean check only happens after a tick, so at least one tick runs whenever the
    /// agent can act at all.
    pub fn run(mut self, rng: &mut Rng) -> Outcome {
        while self.tick(rng) {
            if self.environment.all_clean() {
                break;
            }
        }

        let outcome = Outcome {
            policy: self.policy.name().to_string(),
            max_steps: self.max_steps,
            history: self.history,
            agent: self.agent,
            environment: self.environment,
        };
        info!(
            policy = %outcome.policy,
            steps = outcome.history.len(),
            cleaned = outcome.agent.cleaned(),
            energy = outcome.agent.energy(),
            termination = ?outcome.termination(),
            "simulation finished"
        );
        outcome
    }
}

/// Everything a finished run leaves behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Name of the policy that drove the agent.
    pub policy: String,

    /// Step limit the run was given.
    pub max_steps: usize,

    /// Dirt in every room after each tick, oldest first.
    pub history: Vec<Snapshot>,

    /// The agent, with its final position, energy, counters and action log.
    pub agent: Agent,

    /// The rooms as they were left.
    pub environment: Environment,
}

impl Outcome {
    /// Why the run stopped, worked out from the final state.
    pub fn termination(&self) -> Option<TerminationReason> {
        TerminationReason::infer(
            &self.agent,
            &self.environment,
            self.history.len(),
            self.max_steps,
        )
    }

    /// Energy the agent used over the run.
    pub fn energy_consumed(&self) -> Float {
        self.agent.energy_consumed()
    }
}

/// Run one simulation: a fresh random environment of `room_count` rooms, each dirty with
/// probability [`DEFAULT_DIRT_PROBABILITY`], and an agent of the given variant in the leftmost
/// room.
pub fn simulate(
    variant: AgentVariant,
    room_count: usize,
    max_steps: usize,
    rng: &mut Rng,
) -> Result<Outcome, VacuumError> {
    simulate_with(&SimulationConfig::new(variant, room_count, max_steps), rng)
}

/// Run one simulation from a full config.
pub fn simulate_with(config: &SimulationConfig, rng: &mut Rng) -> Result<Outcome, VacuumError> {
    let outcome = match config.agent {
        AgentVariant::Baseline => {
            Simulation::from_config(config, BaselinePolicy::new(), rng)?.run(rng)
        }
        AgentVariant::Heuristic => {
            Simulation::from_config(config, HeuristicPolicy::new(), rng)?.run(rng)
        }
    };
    Ok(outcome)
}
