use crate::clock::Clock;
use crate::error::{TempoError, TimerKind};
use crate::format::parse_hms;
use crate::id::TimerId;
use crate::tempo::{Slot, Tempo};

/// Single-shot timer bound to one identifier.
///
/// Typical uses are delays, timeouts and watchdogs. The timer is idle until
/// [`start`](Self::start)ed, running until its window has elapsed, then done
/// until it is restarted or cancelled.
///
/// Every method resolves the identifier first, so even a read on an unknown
/// identifier allocates an idle slot for it.
pub struct OneShot<'a, C, const N: usize> {
    tempo: &'a mut Tempo<C, N>,
    id: TimerId,
}

impl<'a, C: Clock, const N: usize> OneShot<'a, C, N> {
    pub(crate) fn new(tempo: &'a mut Tempo<C, N>, id: TimerId) -> Self {
        OneShot { tempo, id }
    }

    /// Start (or restart) the timer with a window of `duration_ms`
    pub fn start(&mut self, duration_ms: u32) {
        let _ = self.try_start(duration_ms);
    }

    /// Start the timer with a strict `"HH:MM:SS"` window.
    ///
    /// A malformed window is recorded as [`TempoError::InvalidFormat`] and
    /// the timer keeps its previous state.
    pub fn start_hms(&mut self, duration: &str) {
        let _ = self.try_start_hms(duration);
    }

    pub fn try_start(&mut self, duration_ms: u32) -> Result<(), TempoError> {
        let handle = self.tempo.resolve(self.id, TimerKind::OneShot)?;
        let now = self.tempo.now_ms();
        let slot = self.tempo.slot_mut(handle);
        slot.duration = duration_ms;
        slot.anchor = now;
        slot.active = true;
        Ok(())
    }

    pub fn try_start_hms(&mut self, duration: &str) -> Result<(), TempoError> {
        let duration_ms = parse_hms(duration).map_err(|e| self.tempo.record(e.into()))?;
        self.try_start(duration_ms)
    }

    /// Re-arm with the current window. No-op unless the timer is active.
    pub fn restart(&mut self) {
        let now = self.tempo.now_ms();
        if let Some(slot) = self.active_slot() {
            slot.anchor = now;
        }
    }

    /// Stop the timer; anchor and window are kept until the next start
    pub fn cancel(&mut self) {
        if let Ok(handle) = self.tempo.resolve(self.id, TimerKind::OneShot) {
            self.tempo.slot_mut(handle).active = false;
        }
    }

    /// Active and still inside its window
    pub fn running(&mut self) -> bool {
        self.elapsed_window()
            .is_some_and(|(elapsed, duration)| elapsed < duration)
    }

    /// Active and at or past the end of its window
    pub fn done(&mut self) -> bool {
        self.elapsed_window()
            .is_some_and(|(elapsed, duration)| elapsed >= duration)
    }

    /// Milliseconds since start, 0 when inactive. Keeps growing after expiry.
    pub fn elapsed(&mut self) -> u32 {
        self.elapsed_window().map_or(0, |(elapsed, _)| elapsed)
    }

    /// Milliseconds left in the window, 0 when inactive or expired
    pub fn remaining(&mut self) -> u32 {
        self.elapsed_window()
            .map_or(0, |(elapsed, duration)| duration.saturating_sub(elapsed))
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    fn active_slot(&mut self) -> Option<&mut Slot> {
        let handle = self.tempo.resolve(self.id, TimerKind::OneShot).ok()?;
        let slot = self.tempo.slot_mut(handle);
        slot.active.then_some(slot)
    }

    fn elapsed_window(&mut self) -> Option<(u32, u32)> {
        let now = self.tempo.now_ms();
        self.active_slot()
            .map(|slot| (now.wrapping_sub(slot.anchor), slot.duration))
    }
}
