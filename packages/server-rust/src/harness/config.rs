/// Settings for a harness run and its logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,
    /// Exit with a failure status when any test fails.
    pub fail_exit: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            log_filter: "userplane_oam=info,userplane_core=info".to_string(),
            json_logs: false,
            fail_exit: true,
        }
    }
}

impl HarnessConfig {
    /// Process exit status for a run with `failed` failures.
    #[must_use]
    pub fn exit_code(&self, failed: usize) -> u8 {
        u8::from(self.fail_exit && failed > 0)
    }
}
