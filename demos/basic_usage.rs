//! Basic usage example for tempo timers

use tempo_timers::{
    timer_id, CancellationToken, ControlFlow, Duration, ErrorCode, Format, LoopDriver,
    SystemClock, Tempo, TimerId,
};

const HEARTBEAT: TimerId = timer_id!("HEARTBEAT");
const COUNTDOWN: TimerId = timer_id!("COUNTDOWN");
const SHUTDOWN: TimerId = timer_id!("SHUTDOWN");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cancel_token = CancellationToken::new();
    let mut tempo: Tempo<SystemClock, 8> = Tempo::new("example", SystemClock::new());
    let driver = LoopDriver::new("example_loop", Duration::from_millis(10), cancel_token.clone());

    // Ctrl-C stops the loop early
    let ctrl_c_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    tempo.one_shot(COUNTDOWN).start_hms("00:00:03");
    if tempo.last_error_code() == ErrorCode::InvalidFormat {
        return Err("bad countdown duration".into());
    }

    println!("Polling timers every 10 ms...");

    let mut buf = [0u8; 16];
    let tempo = driver
        .run(tempo, |tempo| {
            if tempo.interval(HEARTBEAT).every(500) {
                println!(
                    "tick: countdown at {} ({} left)",
                    tempo.elapsed_str(COUNTDOWN, Format::HmsMs, &mut buf),
                    tempo.one_shot(COUNTDOWN).remaining(),
                );
            }

            if tempo.one_shot(COUNTDOWN).done() {
                println!("Countdown finished!");
                tempo.one_shot(COUNTDOWN).cancel();
                tempo.one_shot(SHUTDOWN).start(1_000);
            }

            if tempo.one_shot(SHUTDOWN).done() {
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        })
        .await;

    println!(
        "Loop finished with {}/{} timer slots in use",
        tempo.len(),
        tempo.capacity()
    );
    Ok(())
}
