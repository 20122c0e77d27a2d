//! State management module
//!
//! This module contains the countdown state machine and the shared
//! application state that fans changes out to the ticker and the view.

pub mod countdown;
pub mod app_state;

// Re-export main types
pub use countdown::{CountdownState, Phase};
pub use app_state::AppState;
