//! Shared application state and change notification

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::CountdownState;

/// Shared application state: the countdown itself plus the channels that
/// fan its changes out to the ticker task and the terminal view
#[derive(Debug)]
pub struct AppState {
    /// The countdown state machine
    pub countdown: Arc<Mutex<CountdownState>>,
    /// Process start, for the uptime readout
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for control-change notifications (consumed by the ticker)
    pub control_change_tx: broadcast::Sender<CountdownState>,
    /// Channel carrying state snapshots for redraws
    pub view_update_tx: watch::Sender<CountdownState>,
    /// Keep the receiver alive to prevent channel closure
    _view_update_rx: watch::Receiver<CountdownState>,
}

impl AppState {
    /// Create a new AppState with the countdown at `initial_count`, not running
    pub fn new(initial_count: u64) -> Self {
        let (control_change_tx, _) = broadcast::channel(100);
        let (view_update_tx, view_update_rx) =
            watch::channel(CountdownState::new(initial_count));

        Self {
            countdown: Arc::new(Mutex::new(CountdownState::new(initial_count))),
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            control_change_tx,
            view_update_tx,
            _view_update_rx: view_update_rx,
        }
    }

    /// Apply a control mutation and notify both the ticker and the view
    pub fn update_countdown<F>(&self, action: &str, updater: F) -> Result<CountdownState, String>
    where
        F: FnOnce(&mut CountdownState),
    {
        // Lock the countdown and apply the update
        let mut countdown = self.countdown.lock()
            .map_err(|e| format!("Failed to lock countdown state: {}", e))?;

        updater(&mut *countdown);
        let snapshot = countdown.clone();
        drop(countdown); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        // Notify the ticker (this re-evaluates whether ticking should be active)
        if let Err(e) = self.control_change_tx.send(snapshot.clone()) {
            warn!("Failed to send control change notification: {}", e);
        }

        // Notify the view
        if let Err(e) = self.view_update_tx.send(snapshot.clone()) {
            warn!("Failed to send view update: {}", e);
        }

        Ok(snapshot)
    }

    /// Start the countdown
    pub fn start(&self) -> Result<CountdownState, String> {
        info!("Starting countdown");
        self.update_countdown("start", |countdown| countdown.start())
    }

    /// Pause the countdown
    pub fn pause(&self) -> Result<CountdownState, String> {
        info!("Pausing countdown");
        self.update_countdown("pause", |countdown| countdown.pause())
    }

    /// Reset the countdown to the initial count
    pub fn reset(&self) -> Result<CountdownState, String> {
        info!("Resetting countdown");
        self.update_countdown("reset", |countdown| countdown.reset())
    }

    /// Apply one tick. Ticks only notify the view; the ticker that caused
    /// them decides locally whether to keep going.
    pub fn apply_tick(&self) -> Result<CountdownState, String> {
        let mut countdown = self.countdown.lock()
            .map_err(|e| format!("Failed to lock countdown state: {}", e))?;

        countdown.tick();
        let snapshot = countdown.clone();
        drop(countdown);

        if let Err(e) = self.view_update_tx.send(snapshot.clone()) {
            warn!("Failed to send view update: {}", e);
        }

        Ok(snapshot)
    }

    /// Get a snapshot of the current countdown state
    pub fn get_countdown(&self) -> Result<CountdownState, String> {
        self.countdown.lock()
            .map(|countdown| countdown.clone())
            .map_err(|e| format!("Failed to lock countdown state: {}", e))
    }

    /// Subscribe to state snapshots for redraws
    pub fn subscribe_view(&self) -> watch::Receiver<CountdownState> {
        self.view_update_tx.subscribe()
    }

    /// Calculate session uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_state_is_idle_at_initial_count() {
        let state = AppState::new(7);
        let countdown = state.get_countdown().unwrap();

        assert_eq!(countdown.remaining, 7);
        assert!(!countdown.running);
        assert_eq!(countdown.phase(), Phase::Idle);
    }

    #[test]
    fn control_actions_notify_ticker_and_view() {
        let state = AppState::new(3);
        let mut control_rx = state.control_change_tx.subscribe();
        let mut view_rx = state.subscribe_view();

        let snapshot = state.start().unwrap();
        assert!(snapshot.running);

        let from_control = control_rx.try_recv().unwrap();
        assert_eq!(from_control, snapshot);

        assert!(view_rx.has_changed().unwrap());
        assert_eq!(*view_rx.borrow_and_update(), snapshot);
    }

    #[test]
    fn ticks_notify_the_view_only() {
        let state = AppState::new(3);
        state.start().unwrap();

        let mut control_rx = state.control_change_tx.subscribe();
        let mut view_rx = state.subscribe_view();
        view_rx.borrow_and_update();

        let snapshot = state.apply_tick().unwrap();
        assert_eq!(snapshot.remaining, 2);

        assert!(control_rx.try_recv().is_err());
        assert!(view_rx.has_changed().unwrap());
        assert_eq!(view_rx.borrow_and_update().remaining, 2);
    }

    #[test]
    fn reset_restores_initial_and_records_action() {
        let state = AppState::new(5);
        state.start().unwrap();
        state.apply_tick().unwrap();
        state.apply_tick().unwrap();

        let snapshot = state.reset().unwrap();
        assert_eq!(snapshot.remaining, 5);
        assert!(!snapshot.running);

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("reset"));
        assert!(time.is_some());
    }
}
