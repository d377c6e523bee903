//! Sequential test harness and the userplane CRUD cases it drives.
//!
//! 1. **Runner** (`runner`): `TestCase` contract, `TestHarness`, `RunReport`
//! 2. **Cases** (`cases`): Post/Patch/Get/Delete checks against the gateway
//! 3. **Config** (`config`): run and logging settings

pub mod cases;
pub mod config;
pub mod runner;

pub use cases::{
    register_crud_tests, userplane_gateway, DelUserplanesTester, GetUserplanesTester,
    PatchUserplanesTester, PostUserplanesTester,
};
pub use config::HarnessConfig;
pub use runner::{RunReport, TestCase, TestHarness, TestResult};
