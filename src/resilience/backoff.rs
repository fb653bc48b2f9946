//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// Delay before the next attempt: base doubled per attempt, capped, with
/// up to 10% jitter on top.
///
/// Attempt numbers start at 1; attempt 0 yields no delay.
pub fn backoff_delay(attempt: u32, base: Duration, cap: Duration) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let exponent = 2u32.saturating_pow(attempt - 1);
    let delay = base.saturating_mul(exponent).min(cap);

    let jitter_range = delay.as_millis() as u64 / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    delay + Duration::from_millis(jitter)
}
