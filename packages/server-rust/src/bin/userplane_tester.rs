use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use userplane_oam::harness::{register_crud_tests, userplane_gateway, HarnessConfig, TestHarness};
use userplane_oam::telemetry::init_tracing;

#[derive(Parser, Debug)]
#[command(
    name = "userplane-tester",
    version,
    about = "Runs the userplane CRUD checks against the in-process gateway"
)]
struct Args {
    /// Log filter directives (tracing `EnvFilter` syntax).
    #[arg(long, env = "USERPLANE_LOG")]
    log_filter: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,

    /// Exit with status 0 even when tests fail.
    #[arg(long)]
    no_fail_exit: bool,
}

impl Args {
    fn into_config(self) -> HarnessConfig {
        let defaults = HarnessConfig::default();
        HarnessConfig {
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
            json_logs: self.json_logs,
            fail_exit: !self.no_fail_exit,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let config = Args::parse().into_config();
    init_tracing(&config)?;

    println!("[==========] Starting register tester");
    let gateway = userplane_gateway().context("register userplane handlers")?;
    let mut harness = TestHarness::new();
    register_crud_tests(&mut harness, &gateway);

    println!("[==========] Running tester");
    let report = harness.fire_all_tests();
    for failure in report.failures() {
        println!(
            "[  FAILED  ] {}: {} ({})",
            failure.name,
            failure.error.as_deref().unwrap_or("failed"),
            failure.diagnostic
        );
    }
    println!("\n[==========] Completed tester: {}", report.summary_line());

    Ok(ExitCode::from(config.exit_code(report.failed)))
}
