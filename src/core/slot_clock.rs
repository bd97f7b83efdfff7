use crate::core::types::SlotIndex;

pub const SLOT_MINUTES: u8 = 30;
pub const SLOTS_PER_HOUR: u8 = 60 / SLOT_MINUTES;
pub const SLOTS_PER_DAY: u8 = 24 * SLOTS_PER_HOUR;

/// Conversions between slot indices and wall-clock labels.
pub struct SlotClock;

impl SlotClock {
    /// Start of `slot` as `HH:MM`.
    pub fn slot_to_time(slot: SlotIndex) -> String {
        Self::boundary_to_time(slot.get())
    }

    /// Slot boundary `0..=48` as `HH:MM`. Boundary 48 is the end of the day (`24:00`).
    pub fn boundary_to_time(boundary: u8) -> String {
        let boundary = boundary.min(SLOTS_PER_DAY);
        let hour = boundary / SLOTS_PER_HOUR;
        let minute = (boundary % SLOTS_PER_HOUR) as u16 * SLOT_MINUTES as u16;
        format!("{hour:02}:{minute:02}")
    }

    /// End of `slot`, i.e. the start of the following one.
    pub fn slot_end_time(slot: SlotIndex) -> String {
        Self::boundary_to_time(slot.get() + 1)
    }

    /// Half-open interval covering `start..=end` as (start time, end time).
    pub fn slot_range_label(start: SlotIndex, end: SlotIndex) -> (String, String) {
        (Self::slot_to_time(start), Self::slot_end_time(end))
    }
}
