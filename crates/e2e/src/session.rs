//! One browser session per test case

use std::path::Path;
use std::time::Duration;
use thirtyfour::prelude::*;
use thirtyfour::{Capabilities, ChromiumLikeCapabilities};
use tracing::{debug, warn};

use crate::config::{BrowserConfig, BrowserKind, SuiteConfig};
use crate::error::E2eResult;
use crate::pages::{HomePage, OrderPage};
use crate::wait::Waits;

/// An open browser sitting on the app's home page with the cookie banner dismissed
pub struct BrowserSession {
    driver: WebDriver,
    waits: Waits,
    dropdown_settle: Duration,
}

impl BrowserSession {
    /// Start a browser on `endpoint_url`, open the home page and accept cookies
    pub async fn open(endpoint_url: &str, config: &SuiteConfig) -> E2eResult<Self> {
        debug!("Opening {} session on {}", config.browser.kind.as_str(), endpoint_url);

        let driver = WebDriver::new(endpoint_url, capabilities(&config.browser)?).await?;
        let session = Self {
            driver,
            waits: Waits::new(&config.wait),
            dropdown_settle: config.wait.dropdown_settle(),
        };

        if let Err(e) = session.prepare(&config.base_url).await {
            if let Err(quit_err) = session.quit().await {
                warn!("Failed to quit session after setup error: {}", quit_err);
            }
            return Err(e);
        }

        Ok(session)
    }

    async fn prepare(&self, base_url: &str) -> E2eResult<()> {
        self.driver.goto(base_url).await?;
        self.home().accept_cookies().await
    }

    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    pub fn home(&self) -> HomePage<'_> {
        HomePage::new(&self.driver, self.waits)
    }

    pub fn order(&self) -> OrderPage<'_> {
        OrderPage::new(&self.driver, self.waits, self.dropdown_settle)
    }

    /// Save a PNG of the current viewport
    pub async fn screenshot(&self, path: &Path) -> E2eResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.driver.screenshot(path).await?;
        Ok(())
    }

    /// End the browser session
    pub async fn quit(self) -> E2eResult<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

/// Command-line arguments passed to Chrome
pub fn chrome_args(browser: &BrowserConfig) -> Vec<String> {
    let mut args = browser.args.clone();
    if browser.headless {
        args.push("--headless=new".to_string());
    }
    args.push(format!(
        "--window-size={},{}",
        browser.window_width, browser.window_height
    ));
    args
}

fn capabilities(browser: &BrowserConfig) -> E2eResult<Capabilities> {
    match browser.kind {
        BrowserKind::Chrome => {
            let mut caps = DesiredCapabilities::chrome();
            for arg in chrome_args(browser) {
                caps.add_arg(&arg)?;
            }
            Ok(caps.into())
        }
        BrowserKind::Firefox => {
            let mut caps = DesiredCapabilities::firefox();
            if browser.headless {
                caps.set_headless()?;
            }
            Ok(caps.into())
        }
    }
}
