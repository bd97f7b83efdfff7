use chrono::Duration;

use crate::core::types::{DateKey, SlotIndex};
use crate::errors::{Error, Result};

/// Slots picked for the active date, kept ascending and duplicate-free.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionState {
    slots: Vec<SlotIndex>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `slot` if picked, otherwise add it. Returns whether it is picked now.
    pub fn toggle(&mut self, slot: SlotIndex) -> bool {
        match self.slots.binary_search(&slot) {
            Ok(pos) => {
                self.slots.remove(pos);
                false
            }
            Err(pos) => {
                self.slots.insert(pos, slot);
                true
            }
        }
    }

    /// Drop `slot` if picked. Returns whether it was.
    pub fn remove(&mut self, slot: SlotIndex) -> bool {
        match self.slots.binary_search(&slot) {
            Ok(pos) => {
                self.slots.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn contains(&self, slot: SlotIndex) -> bool {
        self.slots.binary_search(&slot).is_ok()
    }

    pub fn slots(&self) -> &[SlotIndex] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

/// The bookable window: consecutive days starting at `start`, exactly one active.
#[derive(Debug, Clone)]
pub struct DateStrip {
    days: Vec<DateKey>,
    active: usize,
}

impl DateStrip {
    pub const DEFAULT_DAYS: u32 = 7;

    pub fn new(start: DateKey, days: u32) -> Self {
        let days = days.max(1);
        Self {
            days: (0..days)
                .map(|offset| DateKey(start.0 + Duration::days(offset as i64)))
                .collect(),
            active: 0,
        }
    }

    pub fn starting_today() -> Self {
        Self::new(DateKey::today(), Self::DEFAULT_DAYS)
    }

    pub fn days(&self) -> &[DateKey] {
        &self.days
    }

    pub fn active(&self) -> DateKey {
        self.days[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn position(&self, date: DateKey) -> Option<usize> {
        self.days.iter().position(|d| *d == date)
    }

    /// Make `date` active. Changing days drops the in-progress selection.
    /// Returns whether the active day changed.
    pub fn select(&mut self, date: DateKey, selection: &mut SelectionState) -> Result<bool> {
        let idx = self.position(date).ok_or_else(|| {
            Error::Parse(format!(
                "Date {} is outside the bookable window ({} to {}).",
                date,
                self.days[0],
                self.days[self.days.len() - 1]
            ))
        })?;
        Ok(self.activate(idx, selection))
    }

    pub fn select_index(&mut self, idx: usize, selection: &mut SelectionState) -> Result<bool> {
        if idx >= self.days.len() {
            return Err(Error::Parse(format!(
                "Invalid date index: {}. Please enter 0..{}.",
                idx,
                self.days.len() - 1
            )));
        }
        Ok(self.activate(idx, selection))
    }

    fn activate(&mut self, idx: usize, selection: &mut SelectionState) -> bool {
        if idx == self.active {
            return false;
        }
        self.active = idx;
        selection.clear();
        true
    }
}
