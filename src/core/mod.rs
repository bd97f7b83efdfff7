pub mod cli;
pub mod context;
pub mod grid;
pub mod models;
pub mod queue;
pub mod quote;
pub mod reservation;
pub mod seed;
pub mod selection;
pub mod slot_clock;
pub mod types;
pub mod validation;
