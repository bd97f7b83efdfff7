use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

use crate::core::types::{DateKey, SlotIndex};

/// Everything that can go wrong while booking slots and queueing jobs.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Parsing & Routing --------------------------------------------------
    /// Bad arguments, slot numbers, dates or enum values.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No resolver matched the command word.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    // ---- Booking ------------------------------------------------------------
    /// A submission is missing its name, type or slots.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A slot the user wanted is already reserved for that day.
    #[error("Slot(s) {} on {date} are already reserved. Please re-select.", join_slots(.slots))]
    SlotUnavailable { date: DateKey, slots: Vec<SlotIndex> },

    /// No queue entry carries this id.
    #[error("No job with id #{0} in the queue.")]
    JobNotFound(u32),

    // ---- Plumbing / Wrappers ------------------------------------------------
    #[error("{0}")]
    Domain(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_slots(slots: &[SlotIndex]) -> String {
    slots
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn unknown<S: Into<String>>(cmd: S) -> Self {
        Error::UnknownCommand(cmd.into())
    }
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }
}
