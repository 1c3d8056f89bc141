//! Suite configuration
//!
//! Values come from three layers, each overriding the previous one:
//! defaults, an optional TOML file, then `SCOOTER_E2E_*` environment variables.
//! The harness binary applies its command-line flags on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{E2eError, E2eResult};

pub const DEFAULT_BASE_URL: &str = "https://qa-scooter.praktikum-services.ru/";

/// Suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Home page of the application under test
    pub base_url: String,

    /// WebDriver server configuration
    pub webdriver: WebDriverConfig,

    /// Browser configuration
    pub browser: BrowserConfig,

    /// Explicit wait configuration
    pub wait: WaitConfig,

    /// Directory with scenario YAML files (built-in cases are used when empty)
    pub specs_dir: PathBuf,

    /// Output directory for results and failure screenshots
    pub output_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            webdriver: WebDriverConfig::default(),
            browser: BrowserConfig::default(),
            wait: WaitConfig::default(),
            specs_dir: PathBuf::from("tests/e2e/specs"),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Where the WebDriver server lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebDriverConfig {
    /// URL of an already running WebDriver server. When unset a local driver is spawned.
    pub url: Option<String>,

    /// Driver binary to spawn. Defaults to chromedriver or geckodriver for the browser in use.
    pub binary_path: Option<PathBuf>,

    /// Port for the spawned driver (None = find free port)
    pub port: Option<u16>,

    /// Timeout for the spawned driver to report ready
    pub startup_timeout_secs: u64,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            url: None,
            binary_path: None,
            port: None,
            startup_timeout_secs: 30,
        }
    }
}

impl WebDriverConfig {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }

    /// The binary to spawn for `kind` when none is configured explicitly
    pub fn binary_for(&self, kind: BrowserKind) -> PathBuf {
        self.binary_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(kind.driver_binary()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }

    /// Name of the WebDriver executable that speaks to this browser
    pub fn driver_binary(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chromedriver",
            BrowserKind::Firefox => "geckodriver",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            other => Err(E2eError::Config(format!("unknown browser '{}'", other))),
        }
    }
}

/// Browser session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub kind: BrowserKind,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,

    /// Extra command-line arguments for Chrome
    pub args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            kind: BrowserKind::Chrome,
            headless: true,
            window_width: 1920,
            window_height: 1080,
            args: vec!["--remote-allow-origins=*".to_string()],
        }
    }
}

/// Explicit wait configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,

    /// Pause after opening the metro station dropdown before typing into it
    pub dropdown_settle_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            poll_interval_ms: 250,
            dropdown_settle_ms: 1_000,
        }
    }
}

impl WaitConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn dropdown_settle(&self) -> Duration {
        Duration::from_millis(self.dropdown_settle_ms)
    }
}

impl SuiteConfig {
    /// Load configuration from file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> E2eResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `SCOOTER_E2E_*` overrides from the process environment
    pub fn apply_env(&mut self) -> E2eResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> E2eResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SCOOTER_E2E_BASE_URL") {
            self.base_url = url;
        }
        if let Some(url) = lookup("SCOOTER_E2E_WEBDRIVER_URL") {
            self.webdriver.url = if url.is_empty() { None } else { Some(url) };
        }
        if let Some(path) = lookup("SCOOTER_E2E_DRIVER_BINARY") {
            self.webdriver.binary_path = if path.is_empty() { None } else { Some(PathBuf::from(path)) };
        }
        if let Some(kind) = lookup("SCOOTER_E2E_BROWSER") {
            self.browser.kind = kind.parse()?;
        }
        if let Some(headless) = lookup("SCOOTER_E2E_HEADLESS") {
            self.browser.headless = parse_bool("SCOOTER_E2E_HEADLESS", &headless)?;
        }
        if let Some(ms) = lookup("SCOOTER_E2E_WAIT_TIMEOUT_MS") {
            self.wait.timeout_ms = ms.trim().parse().map_err(|_| {
                E2eError::Config(format!("SCOOTER_E2E_WAIT_TIMEOUT_MS is not a number: {}", ms))
            })?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> E2eResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(E2eError::Config(format!("{} is not a boolean: {}", key, value))),
    }
}
