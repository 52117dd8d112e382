//! Client-side reconciliation of the local clock with the lottery server.
//!
//! The server reports its own `now` alongside each lottery record. The
//! difference between that value and the local time at which the request was
//! started is kept as a single additive correction. It folds the one-way
//! network delay into the estimate, so corrected times err towards the
//! server's future: the countdown reaches zero slightly early rather than late.

use crate::lottery::SyncedLottery;

/// Source of local wall-clock time in milliseconds since the epoch.
pub trait TimeSource {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockSkew {
    latency_ms: i64,
}

impl ClockSkew {
    pub fn estimate(server_now: i64, local_at_request_start: i64) -> Self {
        Self {
            latency_ms: server_now.saturating_sub(local_at_request_start),
        }
    }

    pub fn from_latency(latency_ms: i64) -> Self {
        Self { latency_ms }
    }

    pub fn latency_ms(&self) -> i64 {
        self.latency_ms
    }

    /// Local instant `local` expressed in approximate server time.
    pub fn corrected(&self, local: i64) -> i64 {
        local.saturating_add(self.latency_ms)
    }
}

/// Where a corrected instant falls relative to `[open, close]`.
///
/// Variants are ordered by time so that `max` gives the later state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LotteryWindow {
    Pending,
    Active,
    Closed,
}

impl LotteryWindow {
    /// Both boundaries belong to `Active`.
    pub fn classify(corrected: i64, open: i64, close: i64) -> Self {
        if corrected < open {
            Self::Pending
        } else if corrected <= close {
            Self::Active
        } else {
            Self::Closed
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Closed
    }
}

pub fn remaining_ms(now: i64, future: i64) -> i64 {
    future.saturating_sub(now)
}

/// Renders a countdown the way the page shows it, e.g. `0.5 seconds`.
pub fn format_countdown(remaining_ms: i64) -> String {
    format!("{} seconds", remaining_ms as f64 / 1000.0)
}

/// Keeps the reported window from ever moving backwards.
///
/// The local wall clock can be stepped back by the OS; a lottery that has
/// been seen open or closed stays that way for the life of the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowTracker {
    latest: Option<LotteryWindow>,
}

impl WindowTracker {
    pub fn observe(&mut self, window: LotteryWindow) -> LotteryWindow {
        let next = match self.latest {
            Some(latest) => latest.max(window),
            None => window,
        };
        self.latest = Some(next);
        next
    }

    pub fn latest(&self) -> Option<LotteryWindow> {
        self.latest
    }
}

/// One evaluation of the corrected clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectedSample {
    pub time: i64,
    pub window: LotteryWindow,
    /// Time left until the next boundary; `None` once the lottery has closed.
    pub remaining_ms: Option<i64>,
}

impl CorrectedSample {
    pub fn countdown(&self) -> Option<String> {
        self.remaining_ms.map(format_countdown)
    }
}

#[derive(Debug, Clone)]
pub struct WindowEstimator {
    open: i64,
    close: i64,
    skew: ClockSkew,
    tracker: WindowTracker,
}

impl WindowEstimator {
    pub fn new(lottery: &SyncedLottery) -> Self {
        Self::with_bounds(lottery.open(), lottery.close(), lottery.skew())
    }

    pub fn with_bounds(open: i64, close: i64, skew: ClockSkew) -> Self {
        Self {
            open,
            close,
            skew,
            tracker: WindowTracker::default(),
        }
    }

    pub fn sample(&mut self, local_now: i64) -> CorrectedSample {
        let time = self.skew.corrected(local_now);
        let window = self
            .tracker
            .observe(LotteryWindow::classify(time, self.open, self.close));
        let remaining_ms = match window {
            LotteryWindow::Pending => Some(remaining_ms(time, self.open)),
            LotteryWindow::Active => Some(remaining_ms(time, self.close).max(0)),
            LotteryWindow::Closed => None,
        };
        CorrectedSample {
            time,
            window,
            remaining_ms,
        }
    }

    pub fn sample_from(&mut self, clock: &impl TimeSource) -> CorrectedSample {
        self.sample(clock.now_millis())
    }
}

/// Periodic re-evaluation of one lottery's window.
///
/// A scope yields samples until the first `Closed` one, which it still
/// delivers, and then stays released. Whoever owns the timer driving it
/// stops the timer once `is_released` turns true.
#[derive(Debug, Clone)]
pub struct TickScope {
    estimator: WindowEstimator,
    released: bool,
}

impl TickScope {
    pub fn new(lottery: &SyncedLottery) -> Self {
        Self::from_estimator(WindowEstimator::new(lottery))
    }

    pub fn from_estimator(estimator: WindowEstimator) -> Self {
        Self {
            estimator,
            released: false,
        }
    }

    pub fn tick(&mut self, local_now: i64) -> Option<CorrectedSample> {
        if self.released {
            return None;
        }
        let sample = self.estimator.sample(local_now);
        if sample.window.is_terminal() {
            self.released = true;
        }
        Some(sample)
    }

    pub fn tick_from(&mut self, clock: &impl TimeSource) -> Option<CorrectedSample> {
        self.tick(clock.now_millis())
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Ends the scope early, e.g. on unmount. Returns `true` only for the call
    /// that actually released it.
    pub fn release(&mut self) -> bool {
        !std::mem::replace(&mut self.released, true)
    }
}
