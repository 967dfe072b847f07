//! Countdown clock for a timed session.
//!
//! The timer counts ticks, not wall time: every tick removes exactly one
//! second of remaining time. In scheduled mode a tokio task produces the
//! ticks; in manual mode the host calls [`CountdownTimer::tick`] itself.
//!
//! At most one tick task is alive per timer. Reconfiguring, stopping or
//! dropping the timer aborts the previous task before anything else, and
//! every tick is tagged with the generation it was scheduled for so a task
//! that is already mid-tick cannot touch a newer countdown.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use exam_core::model::SessionSettings;

use crate::error::TimerError;

/// Observable countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// Bumped on every (re)configuration.
    pub generation: u64,
}

impl TimerSnapshot {
    /// Remaining time reached zero. Reacting to it (auto-submit, lock the
    /// UI) is up to the observer.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.remaining_secs == 0
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs.saturating_sub(self.remaining_secs)
    }
}

/// Where ticks come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMode {
    /// A tokio task ticks once per period.
    Scheduled(Duration),
    /// The owner calls `tick()`.
    Manual,
}

/// Single countdown clock with a cancellable periodic tick.
pub struct CountdownTimer {
    state: Arc<watch::Sender<TimerSnapshot>>,
    mode: TickMode,
    ticker: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    #[must_use]
    pub fn scheduled(period: Duration) -> Self {
        Self::with_mode(TickMode::Scheduled(period))
    }

    #[must_use]
    pub fn manual() -> Self {
        Self::with_mode(TickMode::Manual)
    }

    /// Scheduled timer ticking at the configured session interval.
    #[must_use]
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::scheduled(settings.tick_interval())
    }

    fn with_mode(mode: TickMode) -> Self {
        let (tx, _rx) = watch::channel(TimerSnapshot::default());
        Self {
            state: Arc::new(tx),
            mode,
            ticker: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> TickMode {
        self.mode
    }

    /// Reset the countdown to `time_limit_minutes * 60` seconds and start
    /// ticking. Any previous tick task is cancelled first. A limit of zero or
    /// less yields an already expired countdown with no tick task.
    ///
    /// # Errors
    ///
    /// In scheduled mode, returns `TimerError::InvalidPeriod` for a zero tick
    /// period and `TimerError::NoRuntime` when called outside a tokio runtime.
    /// The timer is left untouched in both cases.
    pub fn configure(&mut self, time_limit_minutes: i64) -> Result<TimerSnapshot, TimerError> {
        let runtime = match self.mode {
            TickMode::Scheduled(period) if period.is_zero() => {
                warn!("countdown rejected zero tick period");
                return Err(TimerError::InvalidPeriod);
            }
            TickMode::Scheduled(period) => Some((
                Handle::try_current().map_err(|_| TimerError::NoRuntime)?,
                period,
            )),
            TickMode::Manual => None,
        };

        self.cancel_ticker();

        let total = total_seconds(time_limit_minutes);
        let generation = self.state.borrow().generation.wrapping_add(1);
        let snapshot = TimerSnapshot {
            remaining_secs: total,
            total_secs: total,
            generation,
        };
        self.state.send_replace(snapshot);
        info!(time_limit_minutes, total_secs = total, generation, "countdown configured");

        if let Some((handle, period)) = runtime.filter(|_| total > 0) {
            let state = Arc::clone(&self.state);
            self.ticker = Some(handle.spawn(run_ticker(state, period, generation)));
        }

        Ok(snapshot)
    }

    /// Apply one tick to the current countdown. Stays at zero once expired.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NotManual` in scheduled mode, where the tick task
    /// is the only tick source. The countdown is left untouched.
    pub fn tick(&self) -> Result<TimerSnapshot, TimerError> {
        if self.mode != TickMode::Manual {
            warn!("manual tick rejected on scheduled countdown");
            return Err(TimerError::NotManual);
        }
        let generation = self.state.borrow().generation;
        Ok(apply_tick(&self.state, generation))
    }

    /// Cancel the tick task, freezing the remaining time.
    pub fn stop(&mut self) {
        if self.cancel_ticker() {
            debug!(
                remaining_secs = self.state.borrow().remaining_secs,
                "countdown stopped"
            );
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        *self.state.borrow()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u64 {
        self.snapshot().remaining_secs
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.snapshot().expired()
    }

    /// Whether a tick task is currently alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }

    /// Receiver notified on every tick and reconfiguration.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.state.subscribe()
    }

    fn cancel_ticker(&mut self) -> bool {
        match self.ticker.take() {
            Some(ticker) => {
                ticker.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("mode", &self.mode)
            .field("snapshot", &self.snapshot())
            .field("running", &self.is_running())
            .finish()
    }
}

fn total_seconds(time_limit_minutes: i64) -> u64 {
    u64::try_from(time_limit_minutes).map_or(0, |minutes| minutes.saturating_mul(60))
}

fn apply_tick(state: &watch::Sender<TimerSnapshot>, generation: u64) -> TimerSnapshot {
    state.send_if_modified(|snapshot| {
        if snapshot.generation != generation || snapshot.remaining_secs == 0 {
            return false;
        }
        snapshot.remaining_secs -= 1;
        true
    });
    *state.borrow()
}

async fn run_ticker(state: Arc<watch::Sender<TimerSnapshot>>, period: Duration, generation: u64) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        let snapshot = apply_tick(&state, generation);
        if snapshot.generation != generation {
            break;
        }
        if snapshot.expired() {
            info!(generation, "countdown reached zero");
            break;
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
