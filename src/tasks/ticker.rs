//! Countdown ticker background task

use std::{sync::Arc, time::Duration};
use tokio::{sync::broadcast::error::RecvError, time::sleep};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Background task that drives the one-second tick while the countdown
/// is running and above zero.
///
/// The task reconciles against the current state when it first runs and
/// after every notification, so a control action applied before the task
/// is polled, or while its receiver lagged, is never lost. It only holds
/// an interval while the ticking condition is satisfied; leaving the
/// inner loop drops the interval, so at most one repeating tick exists
/// at any moment no matter how often the countdown is started and paused.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut control_rx = state.control_change_tx.subscribe();

    // A start may already have been applied before this task was polled;
    // begin from the current state rather than the next notification.
    let mut snapshot = match state.get_countdown() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to read countdown state: {}", e);
            return;
        }
    };

    loop {
        if snapshot.should_tick() {
            info!("Countdown active, ticking from {}", snapshot.remaining);

            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick completes immediately; consume it so
            // the first decrement lands a full second after activation.
            interval.tick().await;

            loop {
                tokio::select! {
                    // Cancellation takes priority over a tick due at the
                    // same instant
                    biased;

                    // Control change - check if we should cancel the tick
                    Ok(snapshot) = control_rx.recv() => {
                        if !snapshot.should_tick() {
                            info!("Countdown paused or reset, cancelling tick");
                            break;
                        }
                        // Redundant start while already ticking; keep going.
                        debug!("Control change kept ticking condition, continuing");
                    }

                    // Timer tick - decrement the count
                    _ = interval.tick() => {
                        match state.apply_tick() {
                            Ok(snapshot) => {
                                debug!("Tick: remaining={}", snapshot.remaining);
                                if snapshot.remaining == 0 {
                                    info!("Countdown finished");
                                    break;
                                }
                            }
                            Err(e) => {
                                error!("Failed to apply tick: {}", e);
                                break;
                            }
                        }
                    }
                }
            }
        }

        // Wait for the next control change
        match control_rx.recv().await {
            Ok(next) => {
                debug!("Ticker received control change: running={}, remaining={}",
                       next.running, next.remaining);
                snapshot = next;
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Ticker lagged behind {} control changes, re-reading state", missed);
                match state.get_countdown() {
                    Ok(current) => snapshot = current,
                    Err(e) => {
                        error!("Failed to read countdown state: {}", e);
                        // Wait a bit before retrying
                        sleep(Duration::from_secs(1)).await;
                    }
                }
            }
            Err(RecvError::Closed) => {
                info!("Control channel closed, stopping ticker task");
                return;
            }
        }
    }
}
