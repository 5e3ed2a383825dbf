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

//! The row of rooms.

use serde::Serialize;

use crate::room::Room;
use crate::{Dirtiness, Float, Rng, Snapshot, VacuumError, REAPPEARANCE_PROBABILITY};

/// Environment is a fixed-length row of rooms. It owns every room; the row is never resized
/// after construction.
///
/// Notice that the Environment is not aware of an Agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Environment {
    rooms: Vec<Room>,
}

impl Environment {
    /// Build `room_count` rooms, each independently dirty with probability `dirt_probability`.
    /// Rooms draw from `rng` in index order.
    pub fn new(
        room_count: usize,
        dirt_probability: Float,
        rng: &mut Rng,
    ) -> Result<Self, VacuumError> {
        validate_room_count(room_count)?;
        validate_probability(dirt_probability)?;
        let rooms = (0..room_count)
            .map(|index| Room::random(index, dirt_probability, rng))
            .collect();
        Ok(Self { rooms })
    }

    /// Build an environment with known dirt levels, one per room. Handy for setting up a
    /// particular situation.
    pub fn from_dirtiness(levels: &[Dirtiness]) -> Result<Self, VacuumError> {
        validate_room_count(levels.len())?;
        let rooms = levels
            .iter()
            .enumerate()
            .map(|(index, &level)| Room::new(index, level))
            .collect();
        Ok(Self { rooms })
    }

    /// All rooms, in index order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms. Always at least one.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether there are no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Get a room.
    pub fn room(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    /// Get a mutable room.
    pub fn room_mut(&mut self, index: usize) -> Option<&mut Room> {
        self.rooms.get_mut(index)
    }

    /// True iff no room has any dirt.
    pub fn all_clean(&self) -> bool {
        self.rooms.iter().all(|room| !room.is_dirty())
    }

    /// Total dirt across every room.
    pub fn total_dirtiness(&self) -> u32 {
        self.rooms
            .iter()
            .map(|room| u32::from(room.dirtiness()))
            .sum()
    }

    /// Every clean room may get dirty again with [`REAPPEARANCE_PROBABILITY`]. Rooms are visited
    /// in index order so a seeded `rng` always gives the same result.
    pub fn step_dirt_reappearance(&mut self, rng: &mut Rng) {
        for room in self.rooms.iter_mut() {
            if room.maybe_get_dirty(REAPPEARANCE_PROBABILITY, rng) {
                tracing::trace!(
                    room = room.index(),
                    dirtiness = room.dirtiness(),
                    "dirt reappeared"
                );
            }
        }
    }

    /// Dirt level of every room, in room order.
    pub fn snapshot(&self) -> Snapshot {
        self.rooms.iter().map(Room::dirtiness).collect()
    }
}

fn validate_room_count(room_count: usize) -> Result<(), VacuumError> {
    if room_count == 0 {
        return Err(VacuumError::InvalidRoomCount(room_count));
    }
    Ok(())
}

pub(crate) fn validate_probability(probability: Float) -> Result<(), VacuumError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(VacuumError::InvalidDirtProbability(probability));
    }
    Ok(())
}
