//! Time sources for the update loop.
//!
//! - [`FrameClock`] turns raw frame timestamps into a clamped `dt` so a
//!   backgrounded tab or a debugger pause can never apply one enormous step.
//! - [`Interval`] is a cooperative periodic timer checked against the
//!   simulation's monotonic clock each tick.
//! - [`Throttle`] gates work (rendering) to a fixed cadence.
//! - [`WallClock`] supplies real epoch time for persistence, offline
//!   progress and daily resets.

use std::cell::Cell;
use std::rc::Rc;

/// Epoch milliseconds. Injected so tests control "now".
pub trait WallClock {
    fn now_ms(&self) -> f64;
}

/// The platform clock: `Date.now()` in the browser, `SystemTime` elsewhere.
pub struct SystemClock;

impl WallClock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// A settable clock. Clones share the same instant.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.now.set(self.now.get() + secs * 1000.0);
    }
}

impl WallClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Converts per-frame timestamps (from `performance.now()` or similar)
/// into clamped deltas in seconds.
pub struct FrameClock {
    max_dt: f64,
    last_timestamp: Option<f64>,
    /// Total simulated seconds handed out so far.
    pub total_secs: f64,
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self {
            max_dt,
            last_timestamp: None,
            total_secs: 0.0,
        }
    }

    /// Feed a frame timestamp in milliseconds; returns `dt` in seconds.
    ///
    /// The first frame yields 0. Negative or non-finite gaps yield 0.
    pub fn update(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_timestamp {
            Some(prev) => clamp_dt((now_ms - prev) / 1000.0, self.max_dt),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);
        self.total_secs += dt;
        dt
    }
}

/// Clamp a raw delta into `[0, max_dt]`, mapping NaN to 0.
pub fn clamp_dt(dt: f64, max_dt: f64) -> f64 {
    if dt.is_finite() {
        dt.clamp(0.0, max_dt)
    } else {
        0.0
    }
}

/// Periodic cooperative timer measured against a monotonic clock.
#[derive(Clone, Debug)]
pub struct Interval {
    pub period: f64,
    last: f64,
}

impl Interval {
    pub fn new(period: f64) -> Self {
        Self { period, last: 0.0 }
    }

    /// True once per elapsed period; re-arms from `now`.
    pub fn due(&mut self, now: f64) -> bool {
        if now - self.last >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Restart the period from `now` with a new length.
    pub fn rearm(&mut self, now: f64, period: f64) {
        self.last = now;
        self.period = period;
    }
}

/// Accumulator gate: lets work through at most `hz` times per second.
pub struct Throttle {
    secs_per_pass: f64,
    accumulator: f64,
}

impl Throttle {
    pub fn new(secs_per_pass: f64) -> Self {
        Self {
            secs_per_pass,
            // Let the very first frame through.
            accumulator: secs_per_pass,
        }
    }

    pub fn ready(&mut self, dt: f64) -> bool {
        self.accumulator += dt;
        if self.accumulator >= self.secs_per_pass {
            // Drop the backlog; rendering twice in a frame is useless.
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }
}
