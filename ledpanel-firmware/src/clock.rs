//! Millisecond clock backed by the embassy time driver

use embassy_time::Instant;
use ledpanel_core::traits::Clock;

/// Uptime clock, wraps after ~49 days
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_millis(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
