//! WebDriver server management - spawning and status checking chromedriver/geckodriver

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{BrowserKind, WebDriverConfig};
use crate::error::{E2eError, E2eResult};

/// Handle to a locally spawned WebDriver process
pub struct DriverHandle {
    child: Child,
    stopped: bool,
    pub url: String,
    pub port: u16,
}

impl DriverHandle {
    /// Spawn the driver binary and wait until it reports ready
    pub async fn spawn(binary: &Path, config: &WebDriverConfig) -> E2eResult<Self> {
        let port = match config.port {
            Some(port) => port,
            None => find_free_port()?,
        };
        let url = format!("http://127.0.0.1:{}", port);

        info!("Spawning {} on port {}", binary.display(), port);

        let mut cmd = Command::new(binary);
        cmd.arg(format!("--port={}", port))
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().map_err(|e| {
            E2eError::DriverStartup(format!(
                "Failed to spawn {}: {}",
                binary.display(),
                e
            ))
        })?;

        let handle = DriverHandle {
            child,
            stopped: false,
            url,
            port,
        };

        handle.wait_for_ready(config.startup_timeout()).await?;

        info!("WebDriver is ready at {}", handle.url);
        Ok(handle)
    }

    /// Poll `GET /status` until the driver accepts new sessions
    async fn wait_for_ready(&self, timeout_duration: Duration) -> E2eResult<()> {
        let status_url = format!("{}/status", self.url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&status_url).send().await {
                Ok(resp) if resp.status().is_success() => match resp.json::<StatusResponse>().await {
                    Ok(status) if status.value.ready => return Ok(()),
                    Ok(status) => {
                        warn!("WebDriver not ready yet: {}", status.value.message);
                    }
                    Err(e) => {
                        warn!("Unreadable status response: {}", e);
                    }
                },
                Ok(resp) => {
                    warn!("Status check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for WebDriver to start...");
                    }
                    // Connection refused is expected while the driver is starting
                    if !e.is_connect() {
                        warn!("Status check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(E2eError::DriverHealthCheck(attempts))
    }

    /// Stop the driver
    pub fn stop(&mut self) -> E2eResult<()> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;
        info!("Stopping WebDriver (pid: {})", self.child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(200));
            }
        }

        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    value: StatusValue,
}

#[derive(Debug, Deserialize)]
struct StatusValue {
    #[serde(default)]
    ready: bool,
    #[serde(default)]
    message: String,
}

/// The WebDriver server the suite talks to
pub enum DriverEndpoint {
    /// A server started elsewhere (Selenium grid, a chromedriver in CI, ...)
    Remote(String),
    /// A driver process owned by this run
    Local(DriverHandle),
}

impl DriverEndpoint {
    /// Use the configured remote URL, or spawn a local driver for `browser`
    pub async fn start(config: &WebDriverConfig, browser: BrowserKind) -> E2eResult<Self> {
        match &config.url {
            Some(url) => {
                info!("Using remote WebDriver at {}", url);
                Ok(DriverEndpoint::Remote(url.clone()))
            }
            None => {
                let binary = config.binary_for(browser);
                Ok(DriverEndpoint::Local(DriverHandle::spawn(&binary, config).await?))
            }
        }
    }

    pub fn url(&self) -> &str {
        match self {
            DriverEndpoint::Remote(url) => url,
            DriverEndpoint::Local(handle) => &handle.url,
        }
    }
}

/// Find a free port to use
fn find_free_port() -> E2eResult<u16> {
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
