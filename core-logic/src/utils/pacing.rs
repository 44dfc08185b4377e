use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Uniform random duration in `[min_ms, max_ms]`.
pub fn random_delay(min_ms: u64, max_ms: u64) -> Duration {
    if min_ms >= max_ms {
        return Duration::from_millis(min_ms);
    }
    Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
}

/// Sleeps for a random duration in `[min_ms, max_ms]` and returns it.
pub async fn pause(min_ms: u64, max_ms: u64) -> Duration {
    let delay = random_delay(min_ms, max_ms);
    if !delay.is_zero() {
        sleep(delay).await;
    }
    delay
}
