//! CLI library components for `drg-cost`.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
pub mod settings;
