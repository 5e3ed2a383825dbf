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

//! A single room in the row.

use rand::Rng as _;
use serde::Serialize;

use crate::{Dirtiness, Float, Rng, MAX_DIRTINESS};

/// A room has a fixed index and a dirt level. Dirt only changes through [`Room::clean`] and
/// [`Room::maybe_get_dirty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Room {
    index: usize,
    dirtiness: Dirtiness,
}

impl Room {
    /// Create a room with a known dirt level. Levels above [`MAX_DIRTINESS`] are capped.
    pub fn new(index: usize, dirtiness: Dirtiness) -> Self {
        Self {
            index,
            dirtiness: dirtiness.min(MAX_DIRTINESS),
        }
    }

    /// Create a room that is dirty with probability `dirt_probability`, at a uniformly random
    /// level in [1, 5]. The probability draw always happens; the level draw only when dirty.
    pub fn random(index: usize, dirt_probability: Float, rng: &mut Rng) -> Self {
        let dirtiness = if rng.gen::<Float>() < dirt_probability {
            random_dirt_level(rng)
        } else {
            0
        };
        Self { index, dirtiness }
    }

    /// Position of this room in the row.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current dirt level, 0 when clean.
    pub fn dirtiness(&self) -> Dirtiness {
        self.dirtiness
    }

    /// True iff there is any dirt.
    pub fn is_dirty(&self) -> bool {
        self.dirtiness > 0
    }

    /// Remove all dirt.
    pub fn clean(&mut self) {
        self.dirtiness = 0;
    }

    /// A clean room gets dirty with the given probability. Dirty rooms are left alone and do not
    /// consume any random draws. Returns true if the room just got dirty.
    pub fn maybe_get_dirty(&mut self, probability: Float, rng: &mut Rng) -> bool {
        if self.is_dirty() || rng.gen::<Float>() >= probability {
            return false;
        }
        self.dirtiness = random_dirt_level(rng);
        true
    }
}

fn random_dirt_level(rng: &mut Rng) -> Dirtiness {
    rng.gen_range(1..=MAX_DIRTINESS)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{Rng as _, SeedableRng};

    use super::*;
    use crate::Rng;

    #[test]
    fn test_new_room_caps_dirtiness() {
        let room = Room::new(3, 9);
        assert_eq!(room.index(), 3);
        assert_eq!(room.dirtiness(), MAX_DIRTINESS);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut room = Room::new(0, 4);
        room.clean();
        let once = room;
        room.clean();
        assert_eq!(room, once);
        assert!(!room.is_dirty());
    }

    #[test]
    fn test_dirty_room_never_changes_on_maybe_get_dirty() {
        let mut rng = Rng::seed_from_u64(42);
        let mut room = Room::new(0, 2);
        for _ in 0..100 {
            assert!(!room.maybe_get_dirty(1.0, &mut rng));
            assert_eq!(room.dirtiness(), 2);
        }
    }

    #[test]
    fn test_dirty_room_does_not_consume_random_draws() {
        let mut rng = Rng::seed_from_u64(7);
        let mut untouched = Rng::seed_from_u64(7);
        let mut room = Room::new(0, 1);
        room.maybe_get_dirty(0.5, &mut rng);
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_clean_room_with_certain_probability_gets_dirty() {
        let mut rng = Rng::seed_from_u64(42);
        let mut room = Room::new(0, 0);
        assert!(room.maybe_get_dirty(1.0, &mut rng));
        assert!(room.is_dirty());
    }

    #[test]
    fn test_clean_room_with_zero_probability_stays_clean() {
        let mut rng = Rng::seed_from_u64(42);
        let mut room = Room::new(0, 0);
        for _ in 0..100 {
            assert!(!room.maybe_get_dirty(0.0, &mut rng));
        }
        assert!(!room.is_dirty());
    }

    #[test]
    fn test_random_room_respects_extreme_probabilities() {
        let mut rng = Rng::seed_from_u64(1);
        for index in 0..50 {
            assert!(Room::random(index, 1.0, &mut rng).is_dirty());
            assert!(!Room::random(index, 0.0, &mut rng).is_dirty());
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum RoomOp {
        Clean,
        MaybeGetDirty(Float),
    }

    fn room_op() -> impl Strategy<Value = RoomOp> {
        prop_oneof![
            Just(RoomOp::Clean),
            (0.0..=1.0f64).prop_map(RoomOp::MaybeGetDirty),
        ]
    }

    proptest! {
        #[test]
        fn test_dirtiness_stays_in_range(
            seed in any::<u64>(),
            initial in 0..=MAX_DIRTINESS,
            ops in prop::collection::vec(room_op(), 0..64),
        ) {
            let mut rng = Rng::seed_from_u64(seed);
            let mut room = Room::new(0, initial);
            for op in ops {
                match op {
                    RoomOp::Clean => room.clean(),
                    RoomOp::MaybeGetDirty(p) => {
                        room.maybe_get_dirty(p, &mut rng);
                    }
                }
                prop_assert!(room.dirtiness() <= MAX_DIRTINESS);
                prop_assert_eq!(room.is_dirty(), room.dirtiness() > 0);
            }
        }

        #[test]
        fn test_random_room_dirt_level_in_range(seed in any::<u64>(), p in 0.0..=1.0f64) {
            let mut rng = Rng::seed_from_u64(seed);
            let room = Room::random(0, p, &mut rng);
            prop_assert!(room.dirtiness() <= MAX_DIRTINESS);
        }
    }
}
