use thiserror::Error;

use crate::id::TimerId;

/// Timer kind bound to a slot at first use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Interval,
    OneShot,
}

impl std::fmt::Display for TimerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerKind::Interval => f.write_str("Interval"),
            TimerKind::OneShot => f.write_str("OneShot"),
        }
    }
}

/// Why a duration string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected \"HH:MM:SS\"")]
    Malformed,

    #[error("{field} out of range: {value} (max 59)")]
    OutOfRange { field: &'static str, value: u32 },

    #[error("duration does not fit in 32-bit milliseconds")]
    Overflow,
}

/// Non-fatal conditions recorded by [`Tempo`](crate::Tempo).
///
/// None of these interrupt an operation: the infallible facades fall back to
/// an inert result and leave the condition in the registry's side channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TempoError {
    #[error("slot table full ({capacity} slots), cannot allocate timer {id}")]
    SlotTableFull { id: TimerId, capacity: usize },

    #[error("invalid duration format: {0}")]
    InvalidFormat(#[from] ParseError),

    #[error("timer {id} is bound to {bound}, used as {requested}")]
    IdKindMismatch {
        id: TimerId,
        bound: TimerKind,
        requested: TimerKind,
    },
}

/// Flat status code mirroring [`TempoError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCode {
    #[default]
    None,
    SlotTableFull,
    InvalidFormat,
    IdKindMismatch,
}

impl TempoError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TempoError::SlotTableFull { .. } => ErrorCode::SlotTableFull,
            TempoError::InvalidFormat(_) => ErrorCode::InvalidFormat,
            TempoError::IdKindMismatch { .. } => ErrorCode::IdKindMismatch,
        }
    }
}
