//! Signal handling for graceful shutdown

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{debug, error};

/// Wait for a shutdown signal (SIGTERM or SIGINT) and return which one
/// arrived, so the caller can say what ended the session
pub async fn shutdown_signal() -> i32 {
    let mut signals = match Signals::new([SIGTERM, SIGINT]) {
        Ok(signals) => signals,
        Err(e) => {
            // Without a handler the UI can still be quit from the keyboard
            error!("Failed to register signal handler: {}", e);
            return futures::future::pending().await;
        }
    };

    while let Some(signal) = signals.next().await {
        debug!("Received {}", signal_name(signal));
        return signal;
    }

    // The signal stream only ends when its handle is closed, which
    // nothing here does
    futures::future::pending().await
}

/// Human-readable name for the signals this process listens for
pub fn signal_name(signal: i32) -> &'static str {
    match signal {
        SIGTERM => "SIGTERM",
        SIGINT => "SIGINT",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_handled_signals() {
        assert_eq!(signal_name(SIGTERM), "SIGTERM");
        assert_eq!(signal_name(SIGINT), "SIGINT");
        assert_eq!(signal_name(0), "unknown");
    }
}
