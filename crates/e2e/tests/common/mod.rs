//! Shared setup for the live browser tests

use scooter_e2e::driver::DriverEndpoint;
use scooter_e2e::{BrowserSession, SuiteConfig};

/// A running WebDriver plus a session opened on the home page
pub struct Live {
    pub session: BrowserSession,
    // kept alive for the duration of the test
    _endpoint: DriverEndpoint,
}

/// Connect to the browser, or `None` when live tests are not enabled
pub async fn live() -> Option<Live> {
    live_with(|_| {}).await
}

/// Same as [`live`], with a chance to tweak the config before the session opens
pub async fn live_with(adjust: impl FnOnce(&mut SuiteConfig)) -> Option<Live> {
    if std::env::var_os("SCOOTER_E2E_LIVE").is_none() {
        eprintln!("Skipping: set SCOOTER_E2E_LIVE=1 to run browser tests");
        return None;
    }

    let mut config = SuiteConfig::default();
    config.apply_env().expect("valid SCOOTER_E2E_* environment");
    adjust(&mut config);

    let endpoint = DriverEndpoint::start(&config.webdriver, config.browser.kind)
        .await
        .expect("start WebDriver");
    let session = BrowserSession::open(endpoint.url(), &config)
        .await
        .expect("open browser session");

    Some(Live {
        session,
        _endpoint: endpoint,
    })
}
