//! End-to-end CRUD checks against the userplane handlers.
//!
//! The four cases share one gateway and are meant to run in the order
//! Post, Patch, Get, Delete: each one depends on the state the previous one
//! left behind.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{ensure, Context};
use http::{Method, StatusCode};
use serde_json::json;
use userplane_core::{Params, Response};

use super::runner::{TestCase, TestHarness};
use crate::service::domain::userplane::{
    register_userplane_handlers, UserplaneStore, USERPLANES_ACTION,
};
use crate::service::{Gateway, RegistryError};

/// Userplane id the CRUD cases operate on.
pub const TEST_USERPLANE_ID: &str = "1";

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Sends one request, records it in `diagnostic`, and checks the status.
fn exchange(
    gateway: &Gateway,
    method: &Method,
    params: &Params,
    expected: StatusCode,
    diagnostic: &mut String,
) -> anyhow::Result<Response> {
    let resp = gateway.handle(method, USERPLANES_ACTION, params);
    write!(
        diagnostic,
        "{method} {USERPLANES_ACTION} -> {} {}",
        resp.status.as_u16(),
        serde_json::to_string(&resp.body)?
    )?;
    ensure!(
        resp.status == expected,
        "expected status {}, got {}",
        expected.as_u16(),
        resp.status.as_u16()
    );
    Ok(resp)
}

/// Creates the test userplane and expects `201 ADDED_USERPLANE`.
pub struct PostUserplanesTester {
    gateway: Arc<Gateway>,
}

impl PostUserplanesTester {
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

impl TestCase for PostUserplanesTester {
    fn execute(&self, diagnostic: &mut String) -> anyhow::Result<()> {
        let body = json!({ "id": TEST_USERPLANE_ID, "function": "SGW" }).to_string();
        let resp = exchange(
            &self.gateway,
            &Method::POST,
            &params(&[("body", body.as_str())]),
            StatusCode::CREATED,
            diagnostic,
        )?;
        ensure!(
            resp.result_message() == Some("ADDED_USERPLANE"),
            "unexpected result message {:?}",
            resp.result_message()
        );
        Ok(())
    }
}

/// Switches the test userplane to `PGW` and expects the updated record back.
pub struct PatchUserplanesTester {
    gateway: Arc<Gateway>,
}

impl PatchUserplanesTester {
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

impl TestCase for PatchUserplanesTester {
    fn execute(&self, diagnostic: &mut String) -> anyhow::Result<()> {
        let body = json!({ "function": "PGW" }).to_string();
        let resp = exchange(
            &self.gateway,
            &Method::PATCH,
            &params(&[("id", TEST_USERPLANE_ID), ("body", body.as_str())]),
            StatusCode::OK,
            diagnostic,
        )?;
        ensure!(
            resp.body.get("function") == Some(&json!("PGW")),
            "function not updated: {:?}",
            resp.body.get("function")
        );
        Ok(())
    }
}

/// Reads the test userplane back and expects the patched record.
pub struct GetUserplanesTester {
    gateway: Arc<Gateway>,
}

impl GetUserplanesTester {
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

impl TestCase for GetUserplanesTester {
    fn execute(&self, diagnostic: &mut String) -> anyhow::Result<()> {
        let resp = exchange(
            &self.gateway,
            &Method::GET,
            &params(&[("id", TEST_USERPLANE_ID)]),
            StatusCode::OK,
            diagnostic,
        )?;
        let expected = json!({ "id": TEST_USERPLANE_ID, "function": "PGW" });
        ensure!(
            expected.as_object() == Some(&resp.body),
            "unexpected body {}",
            serde_json::to_string(&resp.body)?
        );
        Ok(())
    }
}

/// Deletes the test userplane and expects `204`.
pub struct DelUserplanesTester {
    gateway: Arc<Gateway>,
}

impl DelUserplanesTester {
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

impl TestCase for DelUserplanesTester {
    fn execute(&self, diagnostic: &mut String) -> anyhow::Result<()> {
        exchange(
            &self.gateway,
            &Method::DELETE,
            &params(&[("id", TEST_USERPLANE_ID)]),
            StatusCode::NO_CONTENT,
            diagnostic,
        )
        .context("delete userplane")?;
        Ok(())
    }
}

/// Gateway with the userplane handlers bound to a fresh store.
///
/// # Errors
///
/// Returns `RegistryError` if handler registration collides.
pub fn userplane_gateway() -> Result<Arc<Gateway>, RegistryError> {
    let store = Arc::new(UserplaneStore::new());
    let mut gateway = Gateway::new();
    register_userplane_handlers(&mut gateway, &store)?;
    Ok(Arc::new(gateway))
}

/// Registers the four CRUD cases in Post, Patch, Get, Delete order.
pub fn register_crud_tests(harness: &mut TestHarness, gateway: &Arc<Gateway>) {
    harness.register_test(PostUserplanesTester::new(gateway.clone()), "PostUserplanes Test");
    harness.register_test(PatchUserplanesTester::new(gateway.clone()), "PatchUserplanes Test");
    harness.register_test(GetUserplanesTester::new(gateway.clone()), "GetUserplanes Test");
    harness.register_test(DelUserplanesTester::new(gateway.clone()), "DelUserplanes Test");
}
