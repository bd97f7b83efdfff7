use crate::core::reservation::ReservationStore;
use crate::core::selection::SelectionState;
use crate::core::slot_clock::SLOTS_PER_HOUR;
use crate::core::types::{DateKey, SlotIndex};
use crate::errors::{Error, Result};

pub const BAND_HOURS: u8 = 4;
pub const BANDS: u8 = 24 / BAND_HOURS;
pub const CELLS_PER_BAND: u8 = BAND_HOURS * SLOTS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    /// Usage overview; nothing reacts to clicks.
    ReadOnly,
    /// Booking grid; available cells toggle the selection.
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Reserved,
    Available,
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub slot: SlotIndex,
    pub state: CellState,
    pub clickable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBand {
    pub start_hour: u8,
    pub cells: Vec<GridCell>,
}

/// Snapshot of one day's 48 slots laid out as 6 four-hour bands of 8 cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineGrid {
    date: DateKey,
    mode: GridMode,
    bands: Vec<GridBand>,
}

impl TimelineGrid {
    pub fn build(
        date: DateKey,
        store: &ReservationStore,
        selection: &SelectionState,
        mode: GridMode,
    ) -> Self {
        let reserved = store.reserved_slots(date);
        let bands = (0..BANDS)
            .map(|band| {
                let start_hour = band * BAND_HOURS;
                let cells = (0..CELLS_PER_BAND)
                    .filter_map(|i| SlotIndex::try_new((start_hour * SLOTS_PER_HOUR + i) as i64).ok())
                    .map(|slot| {
                        if reserved.contains(&slot) {
                            return GridCell {
                                slot,
                                state: CellState::Reserved,
                                clickable: false,
                            };
                        }
                        let interactive = mode == GridMode::Interactive;
                        let state = if interactive && selection.contains(slot) {
                            CellState::Selected
                        } else {
                            CellState::Available
                        };
                        GridCell {
                            slot,
                            state,
                            clickable: interactive,
                        }
                    })
                    .collect();
                GridBand { start_hour, cells }
            })
            .collect();

        Self { date, mode, bands }
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn mode(&self) -> GridMode {
        self.mode
    }

    pub fn bands(&self) -> &[GridBand] {
        &self.bands
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.bands.iter().flat_map(|b| b.cells.iter())
    }

    pub fn cell(&self, slot: SlotIndex) -> Option<&GridCell> {
        self.cells().find(|c| c.slot == slot)
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells().filter(|c| c.state == state).count()
    }

    /// Click `slot`. Only clickable cells toggle; the grid repaints that cell.
    pub fn click(&mut self, slot: SlotIndex, selection: &mut SelectionState) -> Result<CellState> {
        let date = self.date;
        let cell = self
            .bands
            .iter_mut()
            .flat_map(|b| b.cells.iter_mut())
            .find(|c| c.slot == slot)
            .ok_or_else(|| Error::Parse(format!("Slot {slot} is not on the grid.")))?;

        if cell.state == CellState::Reserved {
            return Err(Error::SlotUnavailable {
                date,
                slots: vec![slot],
            });
        }
        if !cell.clickable {
            return Err(Error::Domain(format!(
                "The usage grid for {date} is read-only; open the booking grid to select slots."
            )));
        }

        cell.state = if selection.toggle(slot) {
            CellState::Selected
        } else {
            CellState::Available
        };
        Ok(cell.state)
    }
}
