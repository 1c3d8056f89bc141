//! Explicit waits on top of thirtyfour element queries

use std::time::Duration;
use thirtyfour::prelude::*;
use tracing::debug;

use crate::config::WaitConfig;
use crate::error::{E2eError, E2eResult};

/// Polling parameters shared by every explicit wait of a session
#[derive(Debug, Clone, Copy)]
pub struct Waits {
    timeout: Duration,
    interval: Duration,
}

impl Waits {
    pub fn new(config: &WaitConfig) -> Self {
        Self {
            timeout: config.timeout(),
            interval: config.poll_interval(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wait until the element is displayed and enabled
    pub async fn clickable(&self, driver: &WebDriver, by: By, what: &str) -> E2eResult<WebElement> {
        debug!("Waiting for {} to be clickable", what);
        driver
            .query(by)
            .wait(self.timeout, self.interval)
            .and_clickable()
            .first()
            .await
            .map_err(|e| self.timed_out(what, "clickable", e))
    }

    /// Wait until the element is displayed
    pub async fn visible(&self, driver: &WebDriver, by: By, what: &str) -> E2eResult<WebElement> {
        debug!("Waiting for {} to be visible", what);
        driver
            .query(by)
            .wait(self.timeout, self.interval)
            .and_displayed()
            .first()
            .await
            .map_err(|e| self.timed_out(what, "visible", e))
    }

    fn timed_out(&self, what: &str, state: &str, err: WebDriverError) -> E2eError {
        E2eError::Timeout(format!(
            "{} to be {} after {} ms ({})",
            what,
            state,
            self.timeout.as_millis(),
            err
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waits_follow_config() {
        let waits = Waits::new(&WaitConfig {
            timeout_ms: 3_000,
            poll_interval_ms: 100,
            ..Default::default()
        });
        assert_eq!(waits.timeout(), Duration::from_secs(3));
        assert_eq!(waits.interval, Duration::from_millis(100));
    }
}
