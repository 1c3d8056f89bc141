//! Main test runner that orchestrates the WebDriver server, browser sessions and reporting

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::SuiteConfig;
use crate::driver::DriverEndpoint;
use crate::error::{E2eError, E2eResult};
use crate::flows;
use crate::scenario::{FaqCase, OrderCase, ScenarioFile};
use crate::session::BrowserSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseKind {
    Faq,
    Order,
}

impl FromStr for CaseKind {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faq" => Ok(CaseKind::Faq),
            "order" | "orders" => Ok(CaseKind::Order),
            other => Err(E2eError::Config(format!("unknown case kind '{}'", other))),
        }
    }
}

/// A single runnable case
#[derive(Debug, Clone)]
pub enum Case {
    Faq(FaqCase),
    Order(OrderCase),
}

impl Case {
    pub fn name(&self) -> String {
        match self {
            Case::Faq(case) => case.name(),
            Case::Order(case) => case.name.clone(),
        }
    }

    pub fn kind(&self) -> CaseKind {
        match self {
            Case::Faq(_) => CaseKind::Faq,
            Case::Order(_) => CaseKind::Order,
        }
    }

    /// Flatten a scenario file, FAQ cases first
    pub fn from_scenarios(file: ScenarioFile) -> Vec<Case> {
        file.faq
            .into_iter()
            .map(Case::Faq)
            .chain(file.orders.into_iter().map(Case::Order))
            .collect()
    }
}

/// Result of running a single test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub kind: CaseKind,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub screenshot_path: Option<String>,
}

/// Result of running all tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    /// Summarize executed cases. `skipped` counts cases left out by a filter.
    pub fn from_results(results: Vec<TestResult>, skipped: usize, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len() + skipped,
            passed,
            failed: results.len() - passed,
            skipped,
            duration_ms,
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Main E2E test runner
pub struct TestRunner {
    config: SuiteConfig,

    /// WebDriver server (if started)
    endpoint: Option<DriverEndpoint>,
}

impl TestRunner {
    pub fn new(config: SuiteConfig) -> Self {
        Self {
            config,
            endpoint: None,
        }
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Cases from the specs directory, or the built-in ones when it holds none
    pub fn load_cases(&self) -> E2eResult<Vec<Case>> {
        let dir = &self.config.specs_dir;
        let scenarios = if dir.is_dir() {
            ScenarioFile::load_all(dir)?
        } else {
            ScenarioFile::default()
        };

        if scenarios.is_empty() {
            info!("No scenarios in {}, using built-in cases", dir.display());
            return Ok(Case::from_scenarios(ScenarioFile::builtin()));
        }
        Ok(Case::from_scenarios(scenarios))
    }

    /// Start (or connect to) the WebDriver server
    pub async fn start_driver(&mut self) -> E2eResult<()> {
        if self.endpoint.is_some() {
            return Ok(());
        }
        self.endpoint = Some(
            DriverEndpoint::start(&self.config.webdriver, self.config.browser.kind).await?,
        );
        Ok(())
    }

    /// Stop the WebDriver server if this runner spawned it
    pub fn stop_driver(&mut self) {
        if let Some(DriverEndpoint::Local(mut handle)) = self.endpoint.take() {
            if let Err(e) = handle.stop() {
                warn!("Failed to stop WebDriver: {}", e);
            }
        }
    }

    /// Run every case
    pub async fn run_all(&mut self) -> E2eResult<TestSuiteResult> {
        let cases = self.load_cases()?;
        self.run_cases(&cases).await
    }

    /// Run only FAQ or only order cases
    pub async fn run_tagged(&mut self, kind: CaseKind) -> E2eResult<TestSuiteResult> {
        let (cases, skipped) = split_by_kind(self.load_cases()?, kind);
        self.execute(&cases, skipped).await
    }

    /// Run a specific case by name
    pub async fn run_case(&mut self, name: &str) -> E2eResult<TestResult> {
        let case = self
            .load_cases()?
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| E2eError::ScenarioParse(format!("Test not found: {}", name)))?;

        self.start_driver().await?;
        Ok(self.run_one(&case).await)
    }

    /// Run a list of cases, one browser session each
    pub async fn run_cases(&mut self, cases: &[Case]) -> E2eResult<TestSuiteResult> {
        self.execute(cases, 0).await
    }

    async fn execute(&mut self, cases: &[Case], skipped: usize) -> E2eResult<TestSuiteResult> {
        let start = Instant::now();
        let mut results = Vec::with_capacity(cases.len());

        self.start_driver().await?;

        info!("Running {} test(s)...", cases.len());

        for case in cases {
            let result = self.run_one(case).await;
            if result.success {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                error!("✗ {} - {}", result.name, result.error.as_deref().unwrap_or("unknown error"));
            }
            results.push(result);
        }

        let suite =
            TestSuiteResult::from_results(results, skipped, start.elapsed().as_millis() as u64);

        info!(
            "Test Results: {} passed, {} failed, {} skipped ({} ms)",
            suite.passed, suite.failed, suite.skipped, suite.duration_ms
        );

        Ok(suite)
    }

    /// Run one case in a fresh session. Failures of any kind end up in the result.
    async fn run_one(&self, case: &Case) -> TestResult {
        let start = Instant::now();
        let name = case.name();
        debug!("Running test: {}", name);

        let (outcome, screenshot_path) = match self.endpoint.as_ref() {
            None => (Err(E2eError::DriverStartup("WebDriver is not started".to_string())), None),
            Some(endpoint) => match BrowserSession::open(endpoint.url(), &self.config).await {
                Err(e) => (Err(e), None),
                Ok(session) => {
                    let outcome = match case {
                        Case::Faq(faq) => flows::faq_answer(&session, faq).await,
                        Case::Order(order) => {
                            flows::place_order(&session, order, Local::now().date_naive()).await
                        }
                    };

                    let screenshot = match &outcome {
                        Err(_) => self.capture_failure(&session, &name).await,
                        Ok(()) => None,
                    };

                    if let Err(e) = session.quit().await {
                        warn!("Failed to quit session for {}: {}", name, e);
                    }
                    (outcome, screenshot)
                }
            },
        };

        TestResult {
            name,
            kind: case.kind(),
            success: outcome.is_ok(),
            duration_ms: start.elapsed().as_millis() as u64,
            error: outcome.err().map(|e| e.to_string()),
            screenshot_path,
        }
    }

    /// Best-effort screenshot of a failed case
    async fn capture_failure(&self, session: &BrowserSession, name: &str) -> Option<String> {
        let path = self.screenshot_path(name);
        match session.screenshot(&path).await {
            Ok(()) => Some(path.to_string_lossy().to_string()),
            Err(e) => {
                warn!("Could not capture failure screenshot for {}: {}", name, e);
                None
            }
        }
    }

    fn screenshot_path(&self, name: &str) -> PathBuf {
        self.config
            .output_dir
            .join("screenshots")
            .join(format!("{}.png", name))
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

/// Keep the cases of one kind and count the rest as skipped
fn split_by_kind(cases: Vec<Case>, kind: CaseKind) -> (Vec<Case>, usize) {
    let total = cases.len();
    let kept: Vec<Case> = cases.into_iter().filter(|c| c.kind() == kind).collect();
    let skipped = total - kept.len();
    (kept, skipped)
}

impl Drop for TestRunner {
    fn drop(&mut self) {
        self.stop_driver();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, success: bool) -> TestResult {
        TestResult {
            name: name.to_string(),
            kind: CaseKind::Faq,
            success,
            duration_ms: 10,
            error: (!success).then(|| "boom".to_string()),
            screenshot_path: None,
        }
    }

    #[test]
    fn test_suite_counts() {
        let suite = TestSuiteResult::from_results(
            vec![result("faq-0", true), result("faq-1", false), result("faq-2", true)],
            2,
            30,
        );
        assert_eq!(suite.total, 5);
        assert_eq!(suite.passed, 2);
        assert_eq!(suite.failed, 1);
        assert_eq!(suite.skipped, 2);
        assert!(!suite.all_passed());
    }

    #[test]
    fn test_report_has_skipped_field() {
        let report = serde_json::to_value(TestSuiteResult::from_results(vec![], 0, 0)).unwrap();
        assert_eq!(report.get("skipped").and_then(|v| v.as_u64()), Some(0));
        assert_eq!(report.get("total").and_then(|v| v.as_u64()), Some(0));
    }

    #[test]
    fn test_filtering_by_kind_counts_skipped() {
        let cases = Case::from_scenarios(ScenarioFile::builtin());
        let (orders, skipped) = split_by_kind(cases.clone(), CaseKind::Order);
        assert_eq!(orders.len(), 2);
        assert_eq!(skipped, 8);

        let (faq, skipped) = split_by_kind(cases, CaseKind::Faq);
        assert_eq!(faq.len(), 8);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_case_kind_parsing() {
        assert_eq!("FAQ".parse::<CaseKind>().unwrap(), CaseKind::Faq);
        assert_eq!("orders".parse::<CaseKind>().unwrap(), CaseKind::Order);
        assert!("checkout".parse::<CaseKind>().is_err());
    }

    #[test]
    fn test_falls_back_to_builtin_cases() {
        let dir = tempfile::tempdir().unwrap();
        let runner = TestRunner::new(SuiteConfig {
            specs_dir: dir.path().join("missing"),
            ..Default::default()
        });
        let cases = runner.load_cases().unwrap();
        assert_eq!(cases.len(), 10);
        assert_eq!(cases[0].name(), "faq-0");
        assert_eq!(cases[9].kind(), CaseKind::Order);
    }

    #[test]
    fn test_specs_dir_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("faq.yaml"),
            "faq:\n  - index: 4\n    expected_answer: text\n",
        )
        .unwrap();
        let runner = TestRunner::new(SuiteConfig {
            specs_dir: dir.path().to_path_buf(),
            ..Default::default()
        });
        let names: Vec<String> = runner.load_cases().unwrap().iter().map(Case::name).collect();
        assert_eq!(names, vec!["faq-4".to_string()]);
    }

    #[tokio::test]
    async fn test_case_without_driver_fails_cleanly() {
        let runner = TestRunner::new(SuiteConfig::default());
        let case = Case::from_scenarios(ScenarioFile::builtin()).remove(0);
        let result = runner.run_one(&case).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("not started"));
    }

    #[test]
    fn test_write_results() {
        let dir = tempfile::tempdir().unwrap();
        let runner = TestRunner::new(SuiteConfig {
            output_dir: dir.path().join("out"),
            ..Default::default()
        });
        let suite = TestSuiteResult::from_results(vec![result("order-header", true)], 0, 5);
        let path = runner.write_results(&suite).unwrap();

        let written: TestSuiteResult =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written.total, 1);
        assert_eq!(written.skipped, 0);
        assert_eq!(written.results[0].name, "order-header");
        assert_eq!(runner.screenshot_path("faq-2"), dir.path().join("out/screenshots/faq-2.png"));
    }
}
