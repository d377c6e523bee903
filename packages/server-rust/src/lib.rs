//! Userplane OAM front end: action dispatch, error translation, and a
//! sequential CRUD test harness.

pub mod harness;
pub mod service;
pub mod telemetry;

pub use harness::{HarnessConfig, RunReport, TestCase, TestHarness};
pub use service::{Gateway, RegistryError, RequestDispatcher};
