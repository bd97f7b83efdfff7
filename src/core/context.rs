use crate::config::Config;
use crate::core::grid::{CellState, GridMode, TimelineGrid};
use crate::core::models::{JobQueueEntry, PendingJobRequest, Quote};
use crate::core::queue::JobQueue;
use crate::core::quote::QuoteEngine;
use crate::core::reservation::ReservationStore;
use crate::core::seed::{RandomSeeder, SlotSeeder};
use crate::core::selection::{DateStrip, SelectionState};
use crate::core::types::{DateKey, SlotIndex};
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use std::path::PathBuf;

/// All session state. Owned by the prompt loop and lent to commands and flows.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub reservations: ReservationStore,
    pub selection: SelectionState,
    pub dates: DateStrip,
    pub queue: JobQueue,
    pub quotes: QuoteEngine,
    pub logger: Logger,
    pub startup_displayed: bool,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppContext {
    pub fn new_with_paths(config_path: PathBuf, logs_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from(&config_path)?;
        let mut seeder = RandomSeeder::from_config(config.random_seed());
        Self::assemble(config, config_path, logs_dir, DateStrip::starting_today(), &mut seeder)
    }

    /// Same as [`AppContext::new_with_paths`] but with a caller-chosen window
    /// and seeder, so tests get deterministic reservations.
    pub fn with_seeder(
        config_path: PathBuf,
        logs_dir: PathBuf,
        dates: DateStrip,
        seeder: &mut dyn SlotSeeder,
    ) -> Result<Self> {
        let config = Config::load_from(&config_path)?;
        Self::assemble(config, config_path, logs_dir, dates, seeder)
    }

    fn assemble(
        config: Config,
        config_path: PathBuf,
        logs_dir: PathBuf,
        dates: DateStrip,
        seeder: &mut dyn SlotSeeder,
    ) -> Result<Self> {
        let logger = Logger::in_dir(&logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());

        let mut reservations = ReservationStore::new();
        reservations.seed(dates.days(), seeder);
        let seeded: usize = dates
            .days()
            .iter()
            .map(|d| reservations.reserved_count(*d))
            .sum();
        logger.info(
            format!(
                "Seeded {} reserved slot(s) across {} day(s) starting {}.",
                seeded,
                dates.days().len(),
                dates.days()[0]
            ),
            LogTarget::FileOnly,
        );

        let quotes = QuoteEngine::new(config.unit_price(), config.quote_delay());

        Ok(Self {
            config,
            reservations,
            selection: SelectionState::new(),
            dates,
            queue: JobQueue::with_fixtures(),
            quotes,
            logger,
            startup_displayed: false,
            config_path,
            logs_dir,
        })
    }

    pub fn active_date(&self) -> DateKey {
        self.dates.active()
    }

    /// Read-only usage grid for the first day of the window.
    pub fn usage_grid(&self) -> TimelineGrid {
        TimelineGrid::build(
            self.dates.days()[0],
            &self.reservations,
            &self.selection,
            GridMode::ReadOnly,
        )
    }

    /// Booking grid for the active day, painted with the current selection.
    pub fn booking_grid(&self) -> TimelineGrid {
        TimelineGrid::build(
            self.active_date(),
            &self.reservations,
            &self.selection,
            GridMode::Interactive,
        )
    }

    /// Click each slot on the booking grid in order. Stops at the first
    /// rejected click; toggles before it stay applied.
    pub fn toggle_slots(&mut self, slots: &[SlotIndex]) -> Result<Vec<(SlotIndex, CellState)>> {
        let mut grid = self.booking_grid();
        let mut outcomes = Vec::with_capacity(slots.len());
        for &slot in slots {
            match grid.click(slot, &mut self.selection) {
                Ok(state) => {
                    self.logger
                        .trace(format!("Toggled slot {} on {} -> {:?}", slot, grid.date(), state));
                    outcomes.push((slot, state));
                }
                Err(err) => {
                    self.logger.warn(err.to_string(), LogTarget::FileOnly);
                    return Err(err);
                }
            }
        }
        Ok(outcomes)
    }

    /// Switch the active day. Returns whether it changed.
    pub fn change_date(&mut self, date: DateKey) -> Result<bool> {
        let changed = self.dates.select(date, &mut self.selection)?;
        self.log_date_change(changed);
        Ok(changed)
    }

    pub fn change_date_index(&mut self, idx: usize) -> Result<bool> {
        let changed = self.dates.select_index(idx, &mut self.selection)?;
        self.log_date_change(changed);
        Ok(changed)
    }

    fn log_date_change(&self, changed: bool) {
        if changed {
            self.logger.info(
                format!("Active date set to {}; selection cleared.", self.active_date()),
                LogTarget::FileOnly,
            );
        }
    }

    /// Commit an approved quote for the active date.
    pub fn confirm(&mut self, request: &PendingJobRequest, quote: &Quote) -> Result<JobQueueEntry> {
        let date = self.active_date();
        let requester = self.config.requester().to_string();
        let result = self.queue.confirm(
            request,
            quote,
            date,
            &requester,
            &mut self.reservations,
            &mut self.selection,
        );
        match result {
            Ok(entry) => {
                let entry = entry.clone();
                self.logger.info(
                    format!(
                        "Queued {} '{}' on {} {}-{} ({}).",
                        entry.id,
                        entry.name,
                        date,
                        entry.start_time,
                        entry.end_time,
                        quote.cost_label()
                    ),
                    LogTarget::FileOnly,
                );
                Ok(entry)
            }
            Err(err) => {
                self.logger
                    .warn(format!("Commit rejected: {err}"), LogTarget::FileOnly);
                if let Error::SlotUnavailable { slots, .. } = &err {
                    self.drop_taken_slots(slots);
                }
                Err(err)
            }
        }
    }

    /// Slots reserved behind the user's back can't stay selected.
    fn drop_taken_slots(&mut self, taken: &[SlotIndex]) {
        let dropped: Vec<String> = taken
            .iter()
            .filter(|slot| self.selection.remove(**slot))
            .map(|slot| slot.to_string())
            .collect();
        if !dropped.is_empty() {
            self.logger.info(
                format!("Dropped slot(s) {} from the selection.", dropped.join(", ")),
                LogTarget::FileOnly,
            );
        }
    }

    /// Rebuild the quote engine after the price or delay changed in config.
    pub fn refresh_quote_engine(&mut self) {
        self.quotes = QuoteEngine::new(self.config.unit_price(), self.config.quote_delay());
    }
}
