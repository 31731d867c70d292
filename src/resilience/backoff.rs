//! Linear fixed-step backoff.

use std::time::Duration;

/// Delay before the next attempt: `base * attempt`.
///
/// Deliberately linear rather than exponential; this gateway serves
/// low-volume internal traffic and a fixed step keeps worst-case
/// latency predictable.
pub fn linear_backoff(attempt: u32, base: Duration) -> Duration {
    base.saturating_mul(attempt)
}
