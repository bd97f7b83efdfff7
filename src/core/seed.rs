use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::slot_clock::SLOTS_PER_DAY;
use crate::core::types::{DateKey, SlotIndex};

/// Source of the reservations a day starts with.
pub trait SlotSeeder {
    fn reserved_for(&mut self, date: DateKey) -> Vec<SlotIndex>;
}

/// Draws between 10 and 29 random picks per day; repeated picks collapse,
/// so a day ends up with at most that many reserved slots.
#[derive(Debug)]
pub struct RandomSeeder {
    rng: StdRng,
}

impl RandomSeeder {
    pub const MIN_PICKS: usize = 10;
    pub const MAX_PICKS: usize = 30;

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl SlotSeeder for RandomSeeder {
    fn reserved_for(&mut self, _date: DateKey) -> Vec<SlotIndex> {
        let picks = self.rng.gen_range(Self::MIN_PICKS..Self::MAX_PICKS);
        (0..picks)
            .filter_map(|_| SlotIndex::try_new(self.rng.gen_range(0..SLOTS_PER_DAY) as i64).ok())
            .collect()
    }
}

/// Hands out a fixed set of slots per day; unknown days get nothing.
#[derive(Debug, Default, Clone)]
pub struct FixedSeeder {
    slots: BTreeMap<DateKey, Vec<SlotIndex>>,
}

impl FixedSeeder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, date: DateKey, slots: impl IntoIterator<Item = SlotIndex>) -> Self {
        self.slots.entry(date).or_default().extend(slots);
        self
    }
}

impl SlotSeeder for FixedSeeder {
    fn reserved_for(&mut self, date: DateKey) -> Vec<SlotIndex> {
        self.slots.get(&date).cloned().unwrap_or_default()
    }
}
