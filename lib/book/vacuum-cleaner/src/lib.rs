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

//! Energy-limited vacuum world.
//!
//! PEAS - Performance, Environment, Action, Sensing
//!
//! A vacuum agent walks a single row of rooms, sucking up dirt and paying for every action out
//! of a finite energy budget. Clean rooms may get dirty again on every tick. The [`Simulation`]
//! drives the loop until the rooms are all clean, the agent cannot afford any action, or the
//! step limit is hit.
//!
//! See:
//! -  Chapter 2: Intelligent Agents, page 40

pub mod agent;
pub mod environment;
pub mod policy;
pub mod room;
pub mod simulation;

pub use agent::{Action, ActionRecord, Agent, Percept};
pub use environment::Environment;
pub use policy::{AgentVariant, BaselinePolicy, HeuristicPolicy, Plan, Policy};
pub use room::Room;
pub use simulation::{
    simulate, simulate_with, Outcome, Simulation, SimulationConfig, TerminationReason,
};

/// Energy is a real number. It starts at [`ENERGY_PER_ROOM`] times the number of rooms.
pub type Float = f64;

/// Dirt level of a room, 0 (clean) to [`MAX_DIRTINESS`]. Also the energy cost of cleaning it.
pub type Dirtiness = u8;

/// The single random source shared by the environment and the policies.
pub type Rng = rand_pcg::Pcg64;

/// Dirtiness of every room in room order, recorded once per tick.
pub type Snapshot = Vec<Dirtiness>;

/// Highest dirt level a room can have.
pub const MAX_DIRTINESS: Dirtiness = 5;

/// Energy cost of moving one room left or right.
pub const MOVE_COST: Float = 2.0;

/// Initial energy granted per room in the environment.
pub const ENERGY_PER_ROOM: Float = 2.5;

/// Probability that a room starts out dirty, unless configured otherwise.
pub const DEFAULT_DIRT_PROBABILITY: Float = 0.5;

/// Probability that a clean room gets dirty again on each tick.
pub const REAPPEARANCE_PROBABILITY: Float = 0.1;

/// Vacuum world error. These only come from constructing things with bad parameters; an action
/// the agent cannot afford is not an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VacuumError {
    /// There must be at least one room.
    #[error("room count must be positive, got {0}")]
    InvalidRoomCount(usize),

    /// Dirt probability must lie in [0, 1].
    #[error("dirt probability must be within [0, 1], got {0}")]
    InvalidDirtProbability(Float),

    /// The step limit must be positive.
    #[error("max steps must be positive, got {0}")]
    InvalidMaxSteps(usize),

    /// The agent must start inside the row of rooms.
    #[error("position {position} is outside rooms 0..{room_count}")]
    PositionOutOfBounds {
        /// Requested position.
        position: usize,

        /// Number of rooms in the environment.
        room_count: usize,
    },

    /// Agent variant name not recognised.
    #[error("unknown agent variant: {0} (expected baseline or heuristic)")]
    UnknownAgentVariant(String),
}
