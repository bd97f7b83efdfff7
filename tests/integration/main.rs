mod command;
mod common;
mod config;
mod core;
