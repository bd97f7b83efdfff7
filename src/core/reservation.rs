use std::collections::{BTreeMap, BTreeSet};

use crate::core::seed::SlotSeeder;
use crate::core::types::{DateKey, SlotIndex};

/// Reserved slots per day. Only ever grows.
#[derive(Debug, Default, Clone)]
pub struct ReservationStore {
    days: BTreeMap<DateKey, BTreeSet<SlotIndex>>,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give every date in `dates` its starting reservations.
    pub fn seed(&mut self, dates: &[DateKey], seeder: &mut dyn SlotSeeder) {
        for date in dates {
            let seeded = seeder.reserved_for(*date);
            self.days.entry(*date).or_default().extend(seeded);
        }
    }

    pub fn reserved_slots(&self, date: DateKey) -> BTreeSet<SlotIndex> {
        self.days.get(&date).cloned().unwrap_or_default()
    }

    pub fn is_reserved(&self, date: DateKey, slot: SlotIndex) -> bool {
        self.days
            .get(&date)
            .is_some_and(|reserved| reserved.contains(&slot))
    }

    /// Subset of `slots` already reserved on `date`, in the given order.
    pub fn conflicts(&self, date: DateKey, slots: &[SlotIndex]) -> Vec<SlotIndex> {
        slots
            .iter()
            .copied()
            .filter(|slot| self.is_reserved(date, *slot))
            .collect()
    }

    /// Mark `slots` reserved on `date`. Returns how many were newly added.
    pub fn reserve(&mut self, date: DateKey, slots: &[SlotIndex]) -> usize {
        let reserved = self.days.entry(date).or_default();
        slots.iter().filter(|slot| reserved.insert(**slot)).count()
    }

    pub fn reserved_count(&self, date: DateKey) -> usize {
        self.days.get(&date).map_or(0, BTreeSet::len)
    }

    pub fn dates(&self) -> impl Iterator<Item = &DateKey> {
        self.days.keys()
    }
}
