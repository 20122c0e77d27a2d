//! End-to-end countdown scenarios with the real ticker task under
//! paused tokio time.

use std::{sync::Arc, time::Duration};

use pretty_assertions::assert_eq;
use tokio::{task::yield_now, time::sleep};

use tickdown::{ticker_task, AppState, Phase};

/// Build the state and spawn the ticker. The ticker reconciles against
/// the current state on its first poll, so control actions may fire
/// immediately.
fn spawn(initial: u64) -> Arc<AppState> {
    let state = Arc::new(AppState::new(initial));
    tokio::spawn(ticker_task(Arc::clone(&state)));
    state
}

#[tokio::test(start_paused = true)]
async fn fresh_countdown_is_idle_at_initial_count() {
    for initial in [0, 3, 60] {
        let state = spawn(initial);
        let countdown = state.get_countdown().unwrap();

        assert_eq!(countdown.remaining, initial);
        assert!(!countdown.running);
    }
}

#[tokio::test(start_paused = true)]
async fn counts_down_to_zero() {
    let state = spawn(3);
    state.start().unwrap();

    sleep(Duration::from_millis(3100)).await;

    let countdown = state.get_countdown().unwrap();
    assert_eq!(countdown.remaining, 0);
    assert_eq!(countdown.phase(), Phase::Finished);
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_and_reset_restores() {
    let state = spawn(5);

    // Two full seconds of ticking, then pause
    state.start().unwrap();
    sleep(Duration::from_millis(2500)).await;
    state.pause().unwrap();
    yield_now().await;
    assert_eq!(state.get_countdown().unwrap().remaining, 3);

    // No ticking while paused
    sleep(Duration::from_secs(2)).await;
    assert_eq!(state.get_countdown().unwrap().remaining, 3);

    // Reset restores the initial count and stays idle
    state.reset().unwrap();
    yield_now().await;
    let countdown = state.get_countdown().unwrap();
    assert_eq!(countdown.remaining, 5);
    assert!(!countdown.running);

    sleep(Duration::from_secs(3)).await;
    assert_eq!(state.get_countdown().unwrap().remaining, 5);
}

#[tokio::test(start_paused = true)]
async fn count_never_goes_negative() {
    let state = spawn(1);
    state.start().unwrap();

    sleep(Duration::from_secs(30)).await;

    assert_eq!(state.get_countdown().unwrap().remaining, 0);
}

#[tokio::test(start_paused = true)]
async fn repeated_start_pause_cycles_tick_once_per_second() {
    let state = spawn(20);

    // Three cycles of 2.5s running, 5s paused: 2 ticks land per cycle
    for _ in 0..3 {
        state.start().unwrap();
        sleep(Duration::from_millis(2500)).await;
        state.pause().unwrap();
        yield_now().await;
        sleep(Duration::from_secs(5)).await;
    }

    assert_eq!(state.get_countdown().unwrap().remaining, 14);
}

#[tokio::test(start_paused = true)]
async fn restart_after_finish_requires_reset() {
    let state = spawn(2);
    state.start().unwrap();
    sleep(Duration::from_millis(2100)).await;

    // Starting again at zero sets the flag but nothing ticks
    state.start().unwrap();
    sleep(Duration::from_secs(5)).await;
    let countdown = state.get_countdown().unwrap();
    assert_eq!(countdown.remaining, 0);
    assert_eq!(countdown.phase(), Phase::Finished);

    // Reset escapes the finished state, and a new run counts down again
    state.reset().unwrap();
    yield_now().await;
    state.start().unwrap();
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(state.get_countdown().unwrap().remaining, 1);
}
