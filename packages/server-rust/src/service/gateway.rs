//! Request boundary: picks the dispatcher for a method and translates failures.
//!
//! Each HTTP method owns its own `RequestDispatcher`, so the same action name
//! can be bound once per method. `Gateway::route` is a transparent pass-through
//! to the dispatcher; `Gateway::handle` is the one place where codes become
//! status/message pairs.

use std::collections::HashMap;

use http::Method;
use tracing::{debug, warn};
use userplane_core::{ErrorCode, HandlerError, Outcome, Params, RequestHandler, Response};

use super::dispatcher::{RegistryError, RequestDispatcher};

/// Method-level front for the per-method dispatchers.
#[derive(Debug, Default)]
pub struct Gateway {
    dispatchers: HashMap<Method, RequestDispatcher>,
}

impl Gateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to `action` under `method`, creating the method's
    /// dispatcher on first use.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateAction` if the pair is already bound.
    pub fn register_handler<H>(
        &mut self,
        method: Method,
        action: impl Into<String>,
        handler: H,
    ) -> Result<(), RegistryError>
    where
        H: RequestHandler + 'static,
    {
        self.dispatchers
            .entry(method)
            .or_default()
            .register_handler(action, handler)
    }

    /// Returns the dispatcher serving `method`, if any handler was bound to it.
    #[must_use]
    pub fn dispatcher(&self, method: &Method) -> Option<&RequestDispatcher> {
        self.dispatchers.get(method)
    }

    /// Routes a request without translating its result.
    ///
    /// # Errors
    ///
    /// Returns `DISPATCH_NOTYPE` for a method with no dispatcher, otherwise
    /// whatever the method's dispatcher returned.
    pub fn route(
        &self,
        method: &Method,
        action: &str,
        params: &Params,
    ) -> Result<Outcome, HandlerError> {
        let Some(dispatcher) = self.dispatchers.get(method) else {
            return Err(HandlerError::with_detail(
                ErrorCode::DispatchNoType,
                format!("unsupported method `{method}`"),
            ));
        };
        dispatcher.dispatch_request(action, params)
    }

    /// Routes a request and resolves it into a response.
    ///
    /// Handler-built responses pass through unchanged. Signalled codes and
    /// failures are translated exactly once here.
    #[must_use]
    pub fn handle(&self, method: &Method, action: &str, params: &Params) -> Response {
        match self.route(method, action, params) {
            Ok(outcome) => {
                let resp = outcome.into_response();
                debug!(%method, action, status = resp.status.as_u16(), "request handled");
                resp
            }
            Err(err) => {
                let resp = Response::from_error(&err);
                warn!(
                    %method,
                    action,
                    code = %err.code,
                    status = resp.status.as_u16(),
                    detail = err.detail.as_deref().unwrap_or(""),
                    "request failed"
                );
                resp
            }
        }
    }
}
