//! # Tempo Timers
//!
//! Non-blocking timers with symbolic IDs for cooperative control loops.
//!
//! Instead of comparing clock readings by hand, a loop registers logical
//! timers by identifier and polls them on every iteration. All state lives
//! in a fixed-size [`Tempo`] table owned by the caller; nothing allocates
//! after construction and no call ever blocks.
//!
//! ## Features
//!
//! - **Interval**: periodic, auto-rearming and drift-resistant
//! - **OneShot**: delays, timeouts and watchdogs with `running`/`done`/`remaining`
//! - **Symbolic IDs**: FNV-1a hashed names, computed at compile time
//! - **Any Clock**: a wrapping `u32` millisecond counter, from hardware or a closure
//! - **Formatting**: `HH:MM:SS.mmm`, `HH:MM:SS`, raw ms, or `"5 sec"` into caller buffers
//! - **Loop Driver**: a Tokio-based heartbeat loop for running on a host
//!
//! ## Quick Start
//!
//! ```rust
//! use tempo_timers::{timer_id, Format, ManualClock, Tempo, TimerId};
//!
//! const HEARTBEAT: TimerId = timer_id!("HEARTBEAT");
//! const WATCHDOG: TimerId = timer_id!("WATCHDOG");
//!
//! let mut tempo: Tempo<ManualClock> = Tempo::new("main", ManualClock::new(0));
//!
//! // Arms on the first poll, then fires once per second.
//! assert!(!tempo.interval(HEARTBEAT).every(1000));
//! tempo.one_shot(WATCHDOG).start_hms("00:00:05");
//!
//! tempo.clock().advance(1000);
//! assert!(tempo.interval(HEARTBEAT).every(1000));
//! assert!(tempo.one_shot(WATCHDOG).running());
//!
//! let mut buf = [0u8; 16];
//! assert_eq!(tempo.remaining_str(WATCHDOG, Format::Hms, &mut buf), "00:00:04");
//! ```
//!
//! ## Errors
//!
//! Operations never fail loudly. A full slot table, a malformed duration
//! string or an identifier reused across timer kinds is recorded in
//! [`Tempo::last_error`] and the call returns an inert result. The `try_*`
//! variants return the same condition as a [`TempoError`].

mod clock;
mod driver;
mod error;
mod format;
mod id;
mod interval;
mod one_shot;
mod tempo;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::LoopDriver;
pub use error::{ErrorCode, ParseError, TempoError, TimerKind};
pub use format::{format, format_into, parse_hms, Format, Formatted};
pub use id::{fnv1a, TimerId};
pub use interval::Interval;
pub use one_shot::OneShot;
pub use tempo::{SlotHandle, SlotState, Tempo, DEFAULT_CAPACITY};

// Re-export commonly used types for convenience
pub use std::ops::ControlFlow;
pub use std::time::Duration;
pub use tokio_util::sync::CancellationToken;
