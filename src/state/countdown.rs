//! Countdown state structure and transitions

/// Coarse view of the countdown used for display and logging.
///
/// `Finished` is derived from the count alone and dominates `Active`:
/// a countdown at zero reports `Finished` even while `running` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::Finished => "finished",
        }
    }
}

/// Countdown state: the remaining count, the running flag, and the
/// configured initial count kept around so `reset` can restore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    pub remaining: u64,
    pub running: bool,
    initial: u64,
}

impl CountdownState {
    /// Create a new countdown, not running, with `remaining` at the initial count
    pub fn new(initial: u64) -> Self {
        Self {
            remaining: initial,
            running: false,
            initial,
        }
    }

    /// Get the configured initial count
    pub fn initial(&self) -> u64 {
        self.initial
    }

    /// Start ticking. A no-op when already running; intentionally does not
    /// check the count, so starting at zero sets the flag without any ticking.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop ticking, keeping the current count
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Restore the initial count and stop ticking
    pub fn reset(&mut self) {
        self.remaining = self.initial;
        self.running = false;
    }

    /// One decrement step. Saturates at zero and never touches `running`.
    pub fn tick(&mut self) {
        if self.remaining > 0 {
            self.remaining -= 1;
        }
    }

    /// Whether a repeating tick should currently be scheduled
    pub fn should_tick(&self) -> bool {
        self.running && self.remaining > 0
    }

    pub fn phase(&self) -> Phase {
        if self.remaining == 0 {
            Phase::Finished
        } else if self.running {
            Phase::Active
        } else {
            Phase::Idle
        }
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new(0)
    }
}
