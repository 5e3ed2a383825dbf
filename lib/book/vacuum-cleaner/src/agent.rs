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

//! The vacuum agent's body: where it is, how much energy it has left, and what it has done.
//!
//! The body does not decide anything. A [`crate::Policy`] looks at a [`Percept`] and returns a
//! plan; the body checks each action against its energy and position before carrying it out.
//! The body never holds on to the [`Environment`], it is handed one for every call.

use serde::Serialize;

use crate::environment::Environment;
use crate::{Dirtiness, Float, VacuumError, ENERGY_PER_ROOM, MOVE_COST};

/// Whatever the agent can sense about the room it stands in, e.g imagine a dirt sensor looking
/// right down plus a battery gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percept {
    /// Index of the current room.
    pub room_index: usize,

    /// Whether the current room has any dirt.
    pub is_dirty: bool,

    /// Dirt level of the current room.
    pub dirtiness_level: Dirtiness,

    /// Energy the agent has left.
    pub remaining_energy: Float,
}

impl Percept {
    /// Whether the agent could afford to clean the current room.
    pub fn can_suck(&self) -> bool {
        can_suck(self.remaining_energy, self.dirtiness_level)
    }

    /// Whether the agent could afford a move.
    pub fn can_move(&self) -> bool {
        can_move(self.remaining_energy)
    }
}

/// An action a policy can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    /// Clean the current room.
    Suck,

    /// Move one room to the right.
    MoveRight,

    /// Move one room to the left.
    MoveLeft,
}

/// An action that actually happened, as kept in the agent's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionRecord {
    /// Cleaned `room`, paying its dirt level.
    Suck {
        /// Room that was cleaned.
        room: usize,

        /// Energy paid, equal to the dirt level before cleaning.
        cost: Dirtiness,
    },

    /// Moved right, arriving in room `to`.
    MoveRight {
        /// Room arrived in.
        to: usize,
    },

    /// Moved left, arriving in room `to`.
    MoveLeft {
        /// Room arrived in.
        to: usize,
    },
}

impl ActionRecord {
    /// Energy this action consumed.
    pub fn cost(&self) -> Float {
        match self {
            ActionRecord::Suck { cost, .. } => Float::from(*cost),
            ActionRecord::MoveRight { .. } | ActionRecord::MoveLeft { .. } => MOVE_COST,
        }
    }

    /// The kind of action this record is for.
    pub fn action(&self) -> Action {
        match self {
            ActionRecord::Suck { .. } => Action::Suck,
            ActionRecord::MoveRight { .. } => Action::MoveRight,
            ActionRecord::MoveLeft { .. } => Action::MoveLeft,
        }
    }
}

impl std::fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionRecord::Suck { room, cost } => write!(f, "Suck (room {}, cost: {})", room, cost),
            ActionRecord::MoveRight { to } => write!(f, "MoveRight to room {}", to),
            ActionRecord::MoveLeft { to } => write!(f, "MoveLeft to room {}", to),
        }
    }
}

/// Enough energy to clean a room at this dirt level.
pub fn can_suck(energy: Float, dirtiness: Dirtiness) -> bool {
    energy >= Float::from(dirtiness)
}

/// Enough energy to move.
pub fn can_move(energy: Float) -> bool {
    energy >= MOVE_COST
}

/// The agent body. Energy is never replenished, and every action checks it can be paid for
/// before changing anything, so energy never goes negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    position: usize,
    energy: Float,
    initial_energy: Float,
    steps: usize,
    cleaned: usize,
    action_sequence: Vec<ActionRecord>,
}

impl Agent {
    /// Create an agent standing in the leftmost room with [`ENERGY_PER_ROOM`] energy per room.
    pub fn at_start(environment: &Environment) -> Self {
        // room counts are far below 2^52, the conversion is exact.
        let initial_energy = ENERGY_PER_ROOM * environment.len() as Float;
        Self {
            position: 0,
            energy: initial_energy,
            initial_energy,
            steps: 0,
            cleaned: 0,
            action_sequence: Vec::new(),
        }
    }

    /// Create an agent standing in room `position`.
    pub fn new(environment: &Environment, position: usize) -> Result<Self, VacuumError> {
        let room_count = environment.len();
        if position >= room_count {
            return Err(VacuumError::PositionOutOfBounds {
                position,
                room_count,
            });
        }
        Ok(Self {
            position,
            ..Self::at_start(environment)
        })
    }

    /// Current room index.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Energy left.
    pub fn energy(&self) -> Float {
        self.energy
    }

    /// Energy the agent started with.
    pub fn initial_energy(&self) -> Float {
        self.initial_energy
    }

    /// Energy used so far.
    pub fn energy_consumed(&self) -> Float {
        self.initial_energy - self.energy
    }

    /// Number of completed decision cycles, whether or not anything happened in them.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of successful cleans.
    pub fn cleaned(&self) -> usize {
        self.cleaned
    }

    /// Every action taken, oldest first.
    pub fn action_sequence(&self) -> &[ActionRecord] {
        &self.action_sequence
    }

    fn current_dirtiness(&self, environment: &Environment) -> Dirtiness {
        environment
            .room(self.position)
            .map_or(0, |room| room.dirtiness())
    }

    /// Sense the current room. Changes nothing.
    pub fn perceive(&self, environment: &Environment) -> Percept {
        let dirtiness_level = self.current_dirtiness(environment);
        Percept {
            room_index: self.position,
            is_dirty: dirtiness_level > 0,
            dirtiness_level,
            remaining_energy: self.energy,
        }
    }

    /// Enough energy to clean the current room.
    pub fn can_suck(&self, environment: &Environment) -> bool {
        can_suck(self.energy, self.current_dirtiness(environment))
    }

    /// Enough energy to move.
    pub fn can_move(&self) -> bool {
        can_move(self.energy)
    }

    /// Whether there is anything useful the agent can still do: clean a dirty room it can
    /// afford, or move.
    pub fn can_act(&self, environment: &Environment) -> bool {
        let dirty = self.current_dirtiness(environment) > 0;
        (dirty && self.can_suck(environment)) || self.can_move()
    }

    /// Clean the current room if it is dirty and affordable. Costs exactly the dirt level.
    pub fn suck(&mut self, environment: &mut Environment) -> bool {
        if !self.can_suck(environment) {
            return false;
        }
        let position = self.position;
        let room = match environment.room_mut(position) {
            Some(room) if room.is_dirty() => room,
            _ => return false,
        };
        let cost = room.dirtiness();
        room.clean();
        self.energy -= Float::from(cost);
        self.cleaned += 1;
        self.action_sequence.push(ActionRecord::Suck {
            room: position,
            cost,
        });
        true
    }

    /// Move one room right, unless already in the last room or out of energy.
    pub fn move_right(&mut self, environment: &Environment) -> bool {
        if !self.can_move() || self.position + 1 >= environment.len() {
            return false;
        }
        self.position += 1;
        self.energy -= MOVE_COST;
        self.action_sequence
            .push(ActionRecord::MoveRight { to: self.position });
        true
    }

    /// Move one room left, unless already in the first room or out of energy.
    pub fn move_left(&mut self) -> bool {
        if !self.can_move() || self.position == 0 {
            return false;
        }
        self.position -= 1;
        self.energy -= MOVE_COST;
        self.action_sequence
            .push(ActionRecord::MoveLeft { to: self.position });
        true
    }

    /// Try a single action.
    pub fn perform(&mut self, action: Action, environment: &mut Environment) -> bool {
        match action {
            Action::Suck => self.suck(environment),
            Action::MoveRight => self.move_right(environment),
            Action::MoveLeft => self.move_left(),
        }
    }

    /// Carry out one decision cycle: try the plan's actions in order until one succeeds, then
    /// count the step. At most one action succeeds. Returns the action taken, if any.
    pub fn execute(&mut self, plan: &[Action], environment: &mut Environment) -> Option<Action> {
        let taken = plan
            .iter()
            .copied()
            .find(|&action| self.perform(action, environment));
        self.steps += 1;
        taken
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    fn env(levels: &[Dirtiness]) -> Environment {
        Environment::from_dirtiness(levels).expect("valid environment")
    }

    #[test]
    fn test_initial_energy_is_two_and_a_half_per_room() {
        let environment = env(&[0, 0, 0, 0]);
        let agent = Agent::at_start(&environment);
        assert_relative_eq!(agent.initial_energy(), 10.0);
        assert_relative_eq!(agent.energy(), 10.0);
        assert_eq!(agent.position(), 0);
        assert_eq!(agent.steps(), 0);
        assert_eq!(agent.cleaned(), 0);
        assert!(agent.action_sequence().is_empty());
    }

    #[test]
    fn test_start_position_must_be_inside_rooms() {
        let environment = env(&[0, 0]);
        assert!(Agent::new(&environment, 1).is_ok());
        assert_eq!(
            Agent::new(&environment, 2),
            Err(VacuumError::PositionOutOfBounds {
                position: 2,
                room_count: 2
            })
        );
    }

    #[test]
    fn test_perceive_reports_current_room() {
        let environment = env(&[0, 4]);
        let agent = Agent::new(&environment, 1).expect("valid agent");
        let percept = agent.perceive(&environment);
        assert_eq!(percept.room_index, 1);
        assert!(percept.is_dirty);
        assert_eq!(percept.dirtiness_level, 4);
        assert_relative_eq!(percept.remaining_energy, 5.0);
        assert!(percept.can_suck());
        assert!(percept.can_move());
    }

    #[test]
    fn test_suck_cleans_and_pays_dirt_level() {
        let mut environment = env(&[3, 2]);
        let mut agent = Agent::at_start(&environment);
        assert!(agent.suck(&mut environment));
        assert_eq!(environment.snapshot(), vec![0, 2]);
        assert_eq!(agent.cleaned(), 1);
        assert_relative_eq!(agent.energy(), 2.0);
        assert_eq!(
            agent.action_sequence(),
            &[ActionRecord::Suck { room: 0, cost: 3 }]
        );
    }

    #[test]
    fn test_suck_on_clean_room_does_nothing() {
        let mut environment = env(&[0, 2]);
        let mut agent = Agent::at_start(&environment);
        assert!(!agent.suck(&mut environment));
        assert_eq!(agent.cleaned(), 0);
        assert_relative_eq!(agent.energy(), agent.initial_energy());
        assert!(agent.action_sequence().is_empty());
    }

    #[test]
    fn test_suck_without_enough_energy_does_nothing() {
        // 2 rooms give 5 energy, two moves leave 1, not enough for a level 5 room
        let mut environment = env(&[0, 5]);
        let mut agent = Agent::new(&environment, 1).expect("valid agent");
        assert!(agent.move_left());
        assert!(agent.move_right(&environment));
        assert_relative_eq!(agent.energy(), 1.0);

        let before = agent.clone();
        assert!(!agent.can_suck(&environment));
        assert!(!agent.suck(&mut environment));
        assert_eq!(agent, before);
        assert_eq!(environment.snapshot(), vec![0, 5]);
    }

    #[test]
    fn test_moves_stop_at_boundaries() {
        let environment = env(&[0, 0, 0]);
        let mut agent = Agent::at_start(&environment);
        assert!(!agent.move_left());
        assert!(agent.move_right(&environment));
        assert!(agent.move_right(&environment));
        assert_eq!(agent.position(), 2);
        assert!(!agent.move_right(&environment));
        assert_eq!(agent.position(), 2);
        assert_relative_eq!(agent.energy(), 7.5 - 4.0);
        assert_eq!(
            agent.action_sequence(),
            &[
                ActionRecord::MoveRight { to: 1 },
                ActionRecord::MoveRight { to: 2 }
            ]
        );
    }

    #[test]
    fn test_cannot_move_below_two_energy() {
        // 2 rooms give 5 energy, two moves leave 1
        let environment = env(&[0, 0]);
        let mut agent = Agent::at_start(&environment);
        assert!(agent.move_right(&environment));
        assert!(agent.move_left());
        assert_relative_eq!(agent.energy(), 1.0);
        assert!(!agent.can_move());
        assert!(!agent.move_right(&environment));
        assert_eq!(agent.position(), 0);
        assert_relative_eq!(agent.energy(), 1.0);
    }

    #[test]
    fn test_execute_takes_first_feasible_action() {
        let mut environment = env(&[0, 0, 0]);
        let mut agent = Agent::new(&environment, 2).expect("valid agent");
        let taken = agent.execute(
            &[Action::Suck, Action::MoveRight, Action::MoveLeft],
            &mut environment,
        );
        assert_eq!(taken, Some(Action::MoveLeft));
        assert_eq!(agent.position(), 1);
        assert_eq!(agent.steps(), 1);
        assert_eq!(agent.action_sequence().len(), 1);
    }

    #[test]
    fn test_execute_counts_step_even_when_nothing_happens() {
        let mut environment = env(&[0]);
        let mut agent = Agent::at_start(&environment);
        let before_energy = agent.energy();
        let taken = agent.execute(&[Action::MoveRight, Action::MoveLeft], &mut environment);
        assert_eq!(taken, None);
        assert_eq!(agent.steps(), 1);
        assert_relative_eq!(agent.energy(), before_energy);
        assert!(agent.action_sequence().is_empty());
    }

    #[test]
    fn test_can_act() {
        // a single room still counts as able to move while energy lasts
        let environment = env(&[2]);
        let agent = Agent::at_start(&environment);
        assert!(agent.can_act(&environment));

        let mut environment = env(&[0, 0]);
        let mut agent = Agent::at_start(&environment);
        agent.execute(&[Action::MoveRight], &mut environment);
        agent.execute(&[Action::MoveLeft], &mut environment);
        assert!(!agent.can_act(&environment));
    }

    #[test]
    fn test_action_record_display() {
        assert_eq!(
            ActionRecord::Suck { room: 0, cost: 3 }.to_string(),
            "Suck (room 0, cost: 3)"
        );
        assert_eq!(
            ActionRecord::MoveRight { to: 1 }.to_string(),
            "MoveRight to room 1"
        );
        assert_eq!(
            ActionRecord::MoveLeft { to: 0 }.to_string(),
            "MoveLeft to room 0"
        );
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Suck),
            Just(Action::MoveRight),
            Just(Action::MoveLeft)
        ]
    }

    proptest! {
        #[test]
        fn test_energy_accounting_matches_log(
            levels in prop::collection::vec(0..=5u8, 1..8),
            actions in prop::collection::vec(action(), 0..64),
        ) {
            let mut environment = env(&levels);
            let mut agent = Agent::at_start(&environment);
            let mut previous_energy = agent.energy();
            for action in actions {
                let before = agent.clone();
                let dirtiness = environment.rooms()[agent.position()].dirtiness();
                let succeeded = agent.perform(action, &mut environment);

                prop_assert!(agent.energy() <= previous_energy);
                prop_assert!(agent.energy() >= 0.0);
                prop_assert!(agent.position() < environment.len());
                previous_energy = agent.energy();

                if !succeeded {
                    prop_assert_eq!(&agent, &before);
                    continue;
                }
                match action {
                    Action::Suck => {
                        prop_assert!(dirtiness > 0);
                        prop_assert!(before.energy() >= Float::from(dirtiness));
                    }
                    Action::MoveRight => {
                        prop_assert!(before.position() + 1 < environment.len());
                        prop_assert!(before.energy() >= MOVE_COST);
                    }
                    Action::MoveLeft => {
                        prop_assert!(before.position() > 0);
                        prop_assert!(before.energy() >= MOVE_COST);
                    }
                }
            }

            let logged: Float = agent.action_sequence().iter().map(ActionRecord::cost).sum();
            prop_assert!((agent.energy_consumed() - logged).abs() < 1e-9);
            let sucks = agent
                .action_sequence()
                .iter()
                .filter(|record| record.action() == Action::Suck)
                .count();
            prop_assert_eq!(sucks, agent.cleaned());
        }
    }
}
