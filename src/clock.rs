use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic milliseconds.
///
/// The counter is a `u32` that wraps on overflow (about 49.7 days), like the
/// `millis()` tick of a microcontroller. All elapsed-time math in this crate
/// uses wrapping subtraction, so a wrap between two readings is harmless as
/// long as the real interval is shorter than the full counter range.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch, wrapping
    fn now_ms(&self) -> u32;
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// Host clock backed by [`Instant`], truncated to a wrapping `u32`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the wrap.
        self.epoch.elapsed().as_millis() as u32
    }
}

/// Hand-driven clock for tests and simulations.
///
/// Interior mutability lets the clock be advanced through a shared reference
/// while a [`Tempo`](crate::Tempo) owns it.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        ManualClock {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: u32) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u32) {
        self.now.set(self.now.get().wrapping_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}
