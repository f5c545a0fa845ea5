use crate::clock::Clock;
use crate::error::{ErrorCode, TempoError, TimerKind};
use crate::format::{format_into, Format};
use crate::id::TimerId;
use crate::interval::Interval;
use crate::one_shot::OneShot;

/// Default number of timer slots
pub const DEFAULT_CAPACITY: usize = 32;

/// State record for one identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub(crate) id: TimerId,
    pub(crate) kind: TimerKind,
    /// Clock reading when the timer was last (re)armed
    pub(crate) anchor: u32,
    /// Period (Interval) or window (OneShot), in ms
    pub(crate) duration: u32,
    pub(crate) active: bool,
}

impl Slot {
    const VACANT: Slot = Slot {
        id: TimerId::new(0),
        kind: TimerKind::Interval,
        anchor: 0,
        duration: 0,
        active: false,
    };

    fn state(&self) -> SlotState {
        SlotState {
            id: self.id,
            kind: self.kind,
            anchor: self.anchor,
            duration: self.duration,
            active: self.active,
        }
    }
}

/// Read-only snapshot of an allocated slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotState {
    pub id: TimerId,
    pub kind: TimerKind,
    pub anchor: u32,
    pub duration: u32,
    pub active: bool,
}

/// Opaque reference to an allocated slot, valid for the registry that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotHandle(usize);

/// Fixed-capacity timer registry.
///
/// Slots are allocated lazily, the first time an identifier is presented,
/// and are never freed. Once all `N` slots are taken, requests for new
/// identifiers fail with [`TempoError::SlotTableFull`] and existing slots are
/// left untouched.
///
/// Every error is also recorded in a side channel ([`Tempo::last_error`]).
/// Reading it does not clear it, and the next error overwrites it.
///
/// The registry is meant for a single cooperative loop. It provides no
/// locking; sharing one across threads or interrupt contexts is unsupported.
pub struct Tempo<C, const N: usize = DEFAULT_CAPACITY> {
    /// Instance name for logging
    name: String,

    /// Millisecond source
    clock: C,

    /// Slot table, `slots[..len]` allocated
    slots: [Slot; N],
    len: usize,

    last_error: Option<TempoError>,
}

impl<C: Clock, const N: usize> Tempo<C, N> {
    /// Create an empty registry
    ///
    /// # Arguments
    /// * `name` - Registry instance name, used in log messages
    /// * `clock` - Millisecond source shared by every timer in the table
    pub fn new(name: impl Into<String>, clock: C) -> Self {
        Tempo {
            name: name.into(),
            clock,
            slots: [Slot::VACANT; N],
            len: 0,
            last_error: None,
        }
    }

    /// Find the slot bound to `id`, allocating it on first use.
    ///
    /// A kind mismatch is recorded as [`TempoError::IdKindMismatch`] but the
    /// existing slot is still returned with its original kind.
    pub fn resolve(&mut self, id: TimerId, kind: TimerKind) -> Result<SlotHandle, TempoError> {
        if let Some(index) = self.position(id) {
            let bound = self.slots[index].kind;
            if bound != kind {
                self.record(TempoError::IdKindMismatch {
                    id,
                    bound,
                    requested: kind,
                });
            }
            return Ok(SlotHandle(index));
        }

        if self.len == N {
            return Err(self.record(TempoError::SlotTableFull { id, capacity: N }));
        }

        let index = self.len;
        self.slots[index] = Slot {
            id,
            kind,
            ..Slot::VACANT
        };
        self.len += 1;
        log::debug!(
            "Timer {} allocated as {} in '{}' ({}/{})",
            id,
            kind,
            self.name,
            self.len,
            N
        );
        Ok(SlotHandle(index))
    }

    /// Periodic timer facade for `id`
    pub fn interval(&mut self, id: impl Into<TimerId>) -> Interval<'_, C, N> {
        Interval::new(self, id.into())
    }

    /// Single-shot timer facade for `id`
    pub fn one_shot(&mut self, id: impl Into<TimerId>) -> OneShot<'_, C, N> {
        OneShot::new(self, id.into())
    }

    /// Elapsed time of the OneShot `id`, formatted into `out`
    pub fn elapsed_str<'b>(
        &mut self,
        id: impl Into<TimerId>,
        format: Format,
        out: &'b mut [u8],
    ) -> &'b str {
        let ms = self.one_shot(id).elapsed();
        format_into(ms, format, out)
    }

    /// Remaining time of the OneShot `id`, formatted into `out`
    pub fn remaining_str<'b>(
        &mut self,
        id: impl Into<TimerId>,
        format: Format,
        out: &'b mut [u8],
    ) -> &'b str {
        let ms = self.one_shot(id).remaining();
        format_into(ms, format, out)
    }

    /// Current clock reading
    pub fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

impl<C, const N: usize> Tempo<C, N> {
    /// Most recent error, if any
    pub fn last_error(&self) -> Option<&TempoError> {
        self.last_error.as_ref()
    }

    /// Most recent error as a flat code
    pub fn last_error_code(&self) -> ErrorCode {
        self.last_error
            .as_ref()
            .map_or(ErrorCode::None, TempoError::code)
    }

    /// Forget the recorded error
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Snapshot of the slot bound to `id`, without allocating
    pub fn slot(&self, id: impl Into<TimerId>) -> Option<SlotState> {
        let id = id.into();
        self.position(id).map(|index| self.slots[index].state())
    }

    /// Kind bound to `id`, if allocated
    pub fn kind_of(&self, id: impl Into<TimerId>) -> Option<TimerKind> {
        self.slot(id).map(|state| state.kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of allocated slots
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub(crate) fn slot_mut(&mut self, handle: SlotHandle) -> &mut Slot {
        &mut self.slots[handle.0]
    }

    /// Store `err` in the side channel and hand it back
    pub(crate) fn record(&mut self, err: TempoError) -> TempoError {
        log::warn!("Timer registry '{}': {}", self.name, err);
        self.last_error = Some(err.clone());
        err
    }

    fn position(&self, id: TimerId) -> Option<usize> {
        self.slots[..self.len].iter().position(|slot| slot.id == id)
    }
}

impl<C, const N: usize> std::fmt::Debug for Tempo<C, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tempo")
            .field("name", &self.name)
            .field("slots", &&self.slots[..self.len])
            .field("capacity", &N)
            .field("last_error", &self.last_error)
            .finish()
    }
}
