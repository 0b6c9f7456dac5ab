use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;
use governor::{Quota, RateLimiter};
use governor::state::{NotKeyed, InMemoryState};
use governor::clock::{Clock, DefaultClock};

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Limiter sized for the public directions API (300 requests per minute).
pub fn directions_limiter() -> Limiter {
    let quota = Quota::per_minute(NonZeroU32::new(300).unwrap());
    Arc::new(RateLimiter::direct(quota))
}

/// Blocks the current thread until the limiter admits one more request.
pub fn wait_for_slot(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        thread::sleep(not_until.wait_time_from(clock.now()));
    }
}
