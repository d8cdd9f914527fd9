// Shared test doubles
// Allow dead code since helpers are used by different test files compiled separately
#![allow(dead_code)]

pub mod fakes;

use std::thread;
use std::time::{Duration, Instant};

/// Default upper bound for waiting on the timer thread.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Polls `condition` until it holds or `timeout` expires. Returns whether it held.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}
