//! Tickdown - a keyboard-driven terminal countdown timer
//!
//! This library provides the countdown state machine, the background
//! ticker task that drives the one-second tick, and the terminal UI.

pub mod config;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, CountdownState, Phase};
pub use tasks::ticker_task;
pub use utils::signals::shutdown_signal;
