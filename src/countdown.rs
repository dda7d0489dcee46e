use std::time::Duration;

pub const DEFAULT_RESEND_TIMEOUT: Duration = Duration::from_secs(45);

/// Seconds until another verification code may be requested.
///
/// Driven by one [`Countdown::tick`] per elapsed second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
    period: u64,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Countdown {
            remaining: period.as_secs(),
            period: period.as_secs(),
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }

    pub fn can_resend(&self) -> bool {
        !self.is_running()
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Restarts the countdown if it has run out. Returns whether it did.
    pub fn resend(&mut self) -> bool {
        if self.is_running() {
            log::debug!("resend requested with {}s left", self.remaining);
            return false;
        }
        self.remaining = self.period;
        true
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Countdown::new(DEFAULT_RESEND_TIMEOUT)
    }
}
