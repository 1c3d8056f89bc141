//! E2E test harness entry point
//!
//! This file is the test binary that runs the FAQ and order cases against a live browser.
//! Run with: SCOOTER_E2E_LIVE=1 cargo test --package scooter-e2e --test e2e -- [ARGS]
//!
//! Without `SCOOTER_E2E_LIVE` it exits successfully without touching the network, so a
//! plain `cargo test` stays offline.

use std::path::PathBuf;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scooter_e2e::runner::{CaseKind, TestSuiteResult};
use scooter_e2e::{E2eResult, SuiteConfig, TestRunner};

#[derive(Parser, Debug)]
#[command(name = "scooter-e2e")]
#[command(about = "E2E test runner for the scooter rental app")]
struct Args {
    /// Path to a TOML config file (missing file = defaults)
    #[arg(short, long, default_value = "e2e.toml")]
    config: PathBuf,

    /// Path to scenario specs directory
    #[arg(short, long)]
    specs: Option<PathBuf>,

    /// Run only one kind of case (faq, order)
    #[arg(short, long)]
    kind: Option<String>,

    /// Run only a specific case by name (e.g. faq-3, order-footer)
    #[arg(short, long)]
    name: Option<String>,

    /// Home page of the app under test
    #[arg(long)]
    base_url: Option<String>,

    /// URL of a running WebDriver server (otherwise one is spawned)
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Driver binary to spawn when no WebDriver URL is given
    #[arg(long)]
    driver_binary: Option<PathBuf>,

    /// Browser to use (chrome, firefox)
    #[arg(long)]
    browser: Option<String>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Explicit wait timeout in milliseconds
    #[arg(long)]
    wait_timeout_ms: Option<u64>,

    /// Output directory for results
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    if std::env::var_os("SCOOTER_E2E_LIVE").is_none() {
        eprintln!("Skipping live E2E run: set SCOOTER_E2E_LIVE=1 to drive a browser");
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn build_config(args: &Args) -> E2eResult<SuiteConfig> {
    let mut config = SuiteConfig::load(&args.config)?;
    config.apply_env()?;

    if let Some(specs) = &args.specs {
        config.specs_dir = specs.clone();
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(url) = &args.webdriver_url {
        config.webdriver.url = Some(url.clone());
    }
    if let Some(binary) = &args.driver_binary {
        config.webdriver.binary_path = Some(binary.clone());
    }
    if let Some(browser) = &args.browser {
        config.browser.kind = browser.parse()?;
    }
    if args.headed {
        config.browser.headless = false;
    }
    if let Some(ms) = args.wait_timeout_ms {
        config.wait.timeout_ms = ms;
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    Ok(config)
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let config = build_config(&args)?;
    let mut runner = TestRunner::new(config);

    runner.start_driver().await?;

    let results = if let Some(name) = &args.name {
        let result = runner.run_case(name).await?;
        let duration_ms = result.duration_ms;
        TestSuiteResult::from_results(vec![result], 0, duration_ms)
    } else if let Some(kind) = &args.kind {
        runner.run_tagged(kind.parse::<CaseKind>()?).await?
    } else {
        runner.run_all().await?
    };

    runner.write_results(&results)?;
    runner.stop_driver();

    Ok(results.all_passed())
}
