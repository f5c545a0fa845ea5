use std::ops::ControlFlow;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;
use crate::tempo::Tempo;

/// Host-side cooperative loop around a [`Tempo`] registry.
///
/// Plays the role of a microcontroller's main loop: the tick closure runs
/// once per heartbeat and polls whatever timers it likes. The driver adds no
/// ordering or fairness guarantees between timers.
pub struct LoopDriver {
    /// Instance name for logging
    name: String,

    /// Pause between loop iterations
    heartbeat_interval: Duration,

    /// Cancellation token for graceful shutdown
    cancel_token: CancellationToken,
}

impl LoopDriver {
    /// Create a new LoopDriver
    ///
    /// # Arguments
    /// * `name` - Driver instance name
    /// * `heartbeat_interval` - How often the tick closure runs (clamped to at least 1 ms)
    /// * `cancel_token` - Stops the loop when cancelled
    pub fn new(
        name: impl Into<String>,
        heartbeat_interval: Duration,
        cancel_token: CancellationToken,
    ) -> Self {
        LoopDriver {
            name: name.into(),
            heartbeat_interval: heartbeat_interval.max(Duration::from_millis(1)),
            cancel_token,
        }
    }

    /// Run the loop until cancelled or until `tick` returns
    /// [`ControlFlow::Break`], then hand the registry back.
    pub async fn run<C, const N: usize, F>(self, mut tempo: Tempo<C, N>, mut tick: F) -> Tempo<C, N>
    where
        C: Clock,
        F: FnMut(&mut Tempo<C, N>) -> ControlFlow<()>,
    {
        let mut heartbeat = interval(self.heartbeat_interval);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Skip);

        log::info!("Loop driver '{}' started", self.name);
        let mut iterations: u64 = 0;

        loop {
            tokio::select! {
                biased;

                _ = self.cancel_token.cancelled() => {
                    log::info!("Loop driver '{}' cancelled via token", self.name);
                    break;
                },

                _ = heartbeat.tick() => {
                    iterations += 1;
                    if tick(&mut tempo).is_break() {
                        log::info!("Loop driver '{}' finished by tick", self.name);
                        break;
                    }
                },
            }
        }

        log::info!(
            "Loop driver '{}' stopped after {} iteration(s)",
            self.name,
            iterations
        );
        tempo
    }
}
