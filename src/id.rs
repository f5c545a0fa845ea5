use std::fmt;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash, usable in `const` context.
pub const fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Opaque identifier naming a logical timer.
///
/// Usually derived from a readable name with [`TimerId::from_name`] or the
/// [`timer_id!`](crate::timer_id) macro, but any raw `u32` is equally valid.
/// Collisions are not detected; keeping names distinct is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

impl TimerId {
    /// Wrap a raw identifier
    pub const fn new(raw: u32) -> Self {
        TimerId(raw)
    }

    /// Derive an identifier from a name (FNV-1a over its UTF-8 bytes)
    pub const fn from_name(name: &str) -> Self {
        TimerId(fnv1a(name.as_bytes()))
    }

    /// Raw 32-bit value
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for TimerId {
    fn from(raw: u32) -> Self {
        TimerId(raw)
    }
}

impl From<TimerId> for u32 {
    fn from(id: TimerId) -> Self {
        id.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Build a [`TimerId`] from a string literal at compile time.
///
/// ```rust
/// use tempo_timers::{timer_id, TimerId};
///
/// const HEARTBEAT: TimerId = timer_id!("HEARTBEAT");
/// assert_eq!(HEARTBEAT, TimerId::from_name("HEARTBEAT"));
/// ```
#[macro_export]
macro_rules! timer_id {
    ($name:literal) => {{
        const ID: $crate::TimerId = $crate::TimerId::from_name($name);
        ID
    }};
}
