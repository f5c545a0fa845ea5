use crate::clock::Clock;
use crate::error::{TempoError, TimerKind};
use crate::format::parse_hms;
use crate::id::TimerId;
use crate::tempo::Tempo;

/// Periodic, auto-rearming timer bound to one identifier.
///
/// The first poll arms the timer and never fires. After that, each poll at
/// or past the next boundary fires once and moves the anchor forward by
/// exactly one period, so late polls do not accumulate drift. A poll that
/// is several periods late still fires only once; the following polls fire
/// back-to-back until the anchor has caught up.
pub struct Interval<'a, C, const N: usize> {
    tempo: &'a mut Tempo<C, N>,
    id: TimerId,
}

impl<'a, C: Clock, const N: usize> Interval<'a, C, N> {
    pub(crate) fn new(tempo: &'a mut Tempo<C, N>, id: TimerId) -> Self {
        Interval { tempo, id }
    }

    /// Poll the timer, returning `true` if a period just expired.
    ///
    /// `period_ms` is only read when the timer is armed; later calls keep the
    /// period they were armed with. Returns `false` if no slot is available.
    pub fn every(&mut self, period_ms: u32) -> bool {
        self.try_every(period_ms).unwrap_or(false)
    }

    /// Same as [`every`](Self::every) with a strict `"HH:MM:SS"` period.
    ///
    /// A malformed period is recorded as [`TempoError::InvalidFormat`] and
    /// the timer is neither armed nor polled.
    pub fn every_hms(&mut self, period: &str) -> bool {
        self.try_every_hms(period).unwrap_or(false)
    }

    pub fn try_every(&mut self, period_ms: u32) -> Result<bool, TempoError> {
        let handle = self.tempo.resolve(self.id, TimerKind::Interval)?;
        let now = self.tempo.now_ms();
        let slot = self.tempo.slot_mut(handle);

        if !slot.active {
            slot.duration = period_ms;
            slot.anchor = now;
            slot.active = true;
            return Ok(false);
        }

        if now.wrapping_sub(slot.anchor) >= slot.duration {
            slot.anchor = slot.anchor.wrapping_add(slot.duration);
            return Ok(true);
        }

        Ok(false)
    }

    pub fn try_every_hms(&mut self, period: &str) -> Result<bool, TempoError> {
        let period_ms = parse_hms(period).map_err(|e| self.tempo.record(e.into()))?;
        self.try_every(period_ms)
    }

    pub fn id(&self) -> TimerId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::ErrorCode;

    const BLINK: TimerId = TimerId::from_name("BLINK");

    fn registry(start_ms: u32) -> Tempo<ManualClock, 8> {
        let _ = env_logger::builder().is_test(true).try_init();
        Tempo::new("interval-test", ManualClock::new(start_ms))
    }

    #[test]
    fn test_first_poll_never_fires() {
        let mut tempo = registry(0);
        for (raw, period) in [(1u32, 0u32), (2, 1), (3, 1_000), (4, u32::MAX)] {
            assert!(!tempo.interval(raw).every(period));
        }
        assert_eq!(tempo.len(), 4);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut tempo = registry(0);
        assert!(!tempo.interval(BLINK).every(100));

        let mut fired = Vec::new();
        for t in 1..=350u32 {
            tempo.clock().set(t);
            if tempo.interval(BLINK).every(100) {
                fired.push(t);
            }
        }
        assert_eq!(fired, vec![100, 200, 300]);
    }

    #[test]
    fn test_anchor_advances_by_period_not_to_now() {
        const T0: u32 = 5_000;
        const P: u32 = 250;
        const K: u32 = 17;

        let mut tempo = registry(T0);
        assert!(!tempo.interval(BLINK).every(P));

        // Late detection at T0 + P + K.
        tempo.clock().set(T0 + P + K);
        assert!(tempo.interval(BLINK).every(P));
        assert_eq!(tempo.slot(BLINK).unwrap().anchor, T0 + P);

        // The next boundary is T0 + 2P, not T0 + 2P + K.
        tempo.clock().set(T0 + 2 * P - 1);
        assert!(!tempo.interval(BLINK).every(P));
        tempo.clock().set(T0 + 2 * P);
        assert!(tempo.interval(BLINK).every(P));
    }

    #[test]
    fn test_backlog_drains_one_period_per_poll() {
        let mut tempo = registry(0);
        assert!(!tempo.interval(BLINK).every(10));

        tempo.clock().set(35);
        assert!(tempo.interval(BLINK).every(10));
        assert!(tempo.interval(BLINK).every(10));
        assert!(tempo.interval(BLINK).every(10));
        assert!(!tempo.interval(BLINK).every(10));
        assert_eq!(tempo.slot(BLINK).unwrap().anchor, 30);
    }

    #[test]
    fn test_period_fixed_at_arming() {
        let mut tempo = registry(0);
        assert!(!tempo.interval(BLINK).every(100));
        tempo.clock().set(50);
        assert!(!tempo.interval(BLINK).every(10));
        assert_eq!(tempo.slot(BLINK).unwrap().duration, 100);
    }

    #[test]
    fn test_clock_wraparound() {
        let mut tempo = registry(u32::MAX - 49);
        assert!(!tempo.interval(BLINK).every(100));

        tempo.clock().advance(99);
        assert!(!tempo.interval(BLINK).every(100));
        tempo.clock().advance(1);
        assert_eq!(tempo.now_ms(), 50);
        assert!(tempo.interval(BLINK).every(100));
        assert_eq!(tempo.slot(BLINK).unwrap().anchor, 50);
    }

    #[test]
    fn test_every_hms() {
        let mut tempo = registry(0);
        assert!(!tempo.interval(BLINK).every_hms("00:00:01"));
        assert_eq!(tempo.slot(BLINK).unwrap().duration, 1_000);

        tempo.clock().set(1_000);
        assert!(tempo.interval(BLINK).every_hms("00:00:01"));
        assert_eq!(tempo.last_error_code(), ErrorCode::None);
    }

    #[test]
    fn test_every_hms_invalid_does_not_arm() {
        let mut tempo = registry(0);
        assert!(!tempo.interval(BLINK).every_hms("1:2:3"));
        assert_eq!(tempo.last_error_code(), ErrorCode::InvalidFormat);
        assert!(tempo.slot(BLINK).is_none());

        let err = tempo.interval(BLINK).try_every_hms("00:00:60").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidFormat);
    }
}
