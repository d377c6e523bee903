//! Sequential test runner with a per-run report.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{info, warn};

// ---------------------------------------------------------------------------
// TestCase trait
// ---------------------------------------------------------------------------

/// One executable check.
///
/// `execute` writes a human-readable diagnostic into `diagnostic` whether it
/// passes or fails. A returned error or a panic counts as a failure.
pub trait TestCase {
    /// Run the check.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the check failed.
    fn execute(&self, diagnostic: &mut String) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// Result of one registered test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    /// Whatever the test wrote while executing.
    pub diagnostic: String,
    /// Returned error or panic message, for failed tests.
    pub error: Option<String>,
}

/// Outcome of a full run, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<TestResult>,
}

impl RunReport {
    /// Always `passed + failed`.
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// `OKNum=<passed>, TotalNum=<total>`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("OKNum={}, TotalNum={}", self.passed, self.total())
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    fn record(&mut self, result: TestResult) {
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }
}

// ---------------------------------------------------------------------------
// TestHarness
// ---------------------------------------------------------------------------

/// Ordered list of named tests, run one after another.
///
/// A failing test never stops the run: every registered test executes
/// exactly once per `fire_all_tests` call, in registration order.
#[derive(Default)]
pub struct TestHarness {
    tests: Vec<(String, Box<dyn TestCase>)>,
}

impl TestHarness {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a test. Names are for reporting only and need not be unique.
    pub fn register_test<T>(&mut self, test: T, name: impl Into<String>)
    where
        T: TestCase + 'static,
    {
        self.tests.push((name.into(), Box::new(test)));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Registered names, in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(|(name, _)| name.as_str())
    }

    /// Run every registered test and return a fresh report.
    #[must_use]
    pub fn fire_all_tests(&self) -> RunReport {
        let mut report = RunReport::default();
        for (name, test) in &self.tests {
            let result = run_one(name, test.as_ref());
            if result.passed {
                info!(test = %name, "passed");
            } else {
                warn!(
                    test = %name,
                    error = result.error.as_deref().unwrap_or(""),
                    diagnostic = %result.diagnostic,
                    "failed"
                );
            }
            report.record(result);
        }
        info!(passed = report.passed, total = report.total(), "run complete");
        report
    }
}

fn run_one(name: &str, test: &dyn TestCase) -> TestResult {
    let mut diagnostic = String::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| test.execute(&mut diagnostic)));
    let error = match outcome {
        Ok(Ok(())) => None,
        Ok(Err(err)) => Some(format!("{err:#}")),
        Err(payload) => Some(format!("panicked: {}", panic_message(payload.as_ref()))),
    };
    TestResult {
        name: name.to_string(),
        passed: error.is_none(),
        diagnostic,
        error,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "non-string panic payload"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
