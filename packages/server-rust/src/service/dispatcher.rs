//! Action routing: dispatches a request to the handler registered for its action.

use std::collections::HashMap;

use userplane_core::{ErrorCode, HandlerError, Outcome, Params, RequestHandler};

/// Configuration error raised while building a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("handler already registered for action `{action}`")]
    DuplicateAction { action: String },
}

/// Routes an action to the one handler registered under it.
///
/// Handlers are registered during setup through `&mut self`. Once the
/// dispatcher is shared, the registry is read-only. Actions are matched
/// case-sensitively. Handler failures are returned to the caller untouched;
/// translating them is the boundary's job.
pub struct RequestDispatcher {
    handlers: HashMap<String, Box<dyn RequestHandler>>,
}

impl RequestDispatcher {
    /// Create a new empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind a handler to an action.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateAction` if the action is already bound.
    /// The existing handler is kept.
    pub fn register_handler<H>(
        &mut self,
        action: impl Into<String>,
        handler: H,
    ) -> Result<(), RegistryError>
    where
        H: RequestHandler + 'static,
    {
        let action = action.into();
        if self.handlers.contains_key(&action) {
            return Err(RegistryError::DuplicateAction { action });
        }
        self.handlers.insert(action, Box::new(handler));
        Ok(())
    }

    /// Invoke the handler bound to `action`.
    ///
    /// # Errors
    ///
    /// Returns `DISPATCH_NOTARGET` when no handler is bound, otherwise
    /// whatever the handler returned.
    pub fn dispatch_request(&self, action: &str, params: &Params) -> Result<Outcome, HandlerError> {
        match self.handlers.get(action) {
            Some(handler) => handler.handle(params),
            None => Err(HandlerError::with_detail(
                ErrorCode::DispatchNoTarget,
                format!("no handler for action `{action}`"),
            )),
        }
    }

    #[must_use]
    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Registered actions, sorted.
    #[must_use]
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for RequestDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("actions", &self.actions())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use http::StatusCode;
    use proptest::prelude::*;
    use serde_json::json;
    use userplane_core::{translate, Response};

    use super::*;

    /// Handler that echoes its `id` parameter back in a 200 response.
    struct EchoHandler;

    impl RequestHandler for EchoHandler {
        fn handle(&self, params: &Params) -> Result<Outcome, HandlerError> {
            let id = params.get("id").cloned().unwrap_or_default();
            Ok(Outcome::Response(
                Response::try_json(StatusCode::OK, json!({ "id": id }))?
                    .with_header("content-type", "application/json"),
            ))
        }
    }

    /// Handler that always fails with the given code.
    struct FailingHandler(ErrorCode);

    impl RequestHandler for FailingHandler {
        fn handle(&self, _params: &Params) -> Result<Outcome, HandlerError> {
            Err(HandlerError::new(self.0))
        }
    }

    /// Handler that counts its invocations.
    struct CountingHandler(Arc<AtomicU32>);

    impl RequestHandler for CountingHandler {
        fn handle(&self, _params: &Params) -> Result<Outcome, HandlerError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::Response(Response::new(StatusCode::NO_CONTENT)))
        }
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn crud_dispatcher() -> RequestDispatcher {
        let mut dispatcher = RequestDispatcher::new();
        dispatcher.register_handler("create", EchoHandler).unwrap();
        dispatcher.register_handler("patch", EchoHandler).unwrap();
        dispatcher.register_handler("get", EchoHandler).unwrap();
        dispatcher.register_handler("delete", EchoHandler).unwrap();
        dispatcher
    }

    #[test]
    fn get_returns_handler_response_unchanged() {
        let dispatcher = crud_dispatcher();
        let outcome = dispatcher
            .dispatch_request("get", &params(&[("id", "42")]))
            .unwrap();

        let expected = Response::try_json(StatusCode::OK, json!({ "id": "42" }))
            .unwrap()
            .with_header("content-type", "application/json");
        assert_eq!(outcome, Outcome::Response(expected));
    }

    #[test]
    fn unregistered_action_is_no_target() {
        let dispatcher = crud_dispatcher();
        let err = dispatcher
            .dispatch_request("frobnicate", &Params::new())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DispatchNoTarget);

        let t = translate(err.code);
        assert_eq!(t.status, StatusCode::NOT_FOUND);
        assert_eq!(t.message, "404 not found");
    }

    #[test]
    fn handler_failure_is_returned_untranslated() {
        let mut dispatcher = RequestDispatcher::new();
        dispatcher
            .register_handler("get", FailingHandler(ErrorCode::UserplaneNotFound))
            .unwrap();

        let err = dispatcher.dispatch_request("get", &Params::new()).unwrap_err();
        assert_eq!(err, HandlerError::new(ErrorCode::UserplaneNotFound));
        assert_eq!(translate(err.code).message, "USERPLANE_NOT_FOUND");
    }

    #[test]
    fn duplicate_registration_is_rejected_and_keeps_first() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut dispatcher = RequestDispatcher::new();
        dispatcher
            .register_handler("get", CountingHandler(calls.clone()))
            .unwrap();

        let err = dispatcher
            .register_handler("get", FailingHandler(ErrorCode::InternalSoftwareError))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateAction {
                action: "get".to_string()
            }
        );

        assert!(dispatcher.dispatch_request("get", &Params::new()).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn actions_are_case_sensitive() {
        let dispatcher = crud_dispatcher();
        assert!(dispatcher.contains("get"));
        assert!(!dispatcher.contains("GET"));
        let err = dispatcher.dispatch_request("Get", &Params::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DispatchNoTarget);
    }

    #[test]
    fn closures_register_as_handlers() {
        let mut dispatcher = RequestDispatcher::new();
        dispatcher
            .register_handler("ping", |_: &Params| -> Result<Outcome, HandlerError> {
                Ok(Outcome::Signal(ErrorCode::AddedUserplane))
            })
            .unwrap();

        let outcome = dispatcher.dispatch_request("ping", &Params::new()).unwrap();
        assert_eq!(outcome, Outcome::Signal(ErrorCode::AddedUserplane));
    }

    #[test]
    fn lists_registered_actions_sorted() {
        let dispatcher = crud_dispatcher();
        assert_eq!(dispatcher.actions(), vec!["create", "delete", "get", "patch"]);
        assert!(RequestDispatcher::default().is_empty());
    }

    proptest! {
        #[test]
        fn any_unregistered_action_is_no_target(action in "[a-zA-Z]{1,12}") {
            let dispatcher = crud_dispatcher();
            prop_assume!(!dispatcher.contains(&action));
            let err = dispatcher.dispatch_request(&action, &Params::new()).unwrap_err();
            prop_assert_eq!(err.code, ErrorCode::DispatchNoTarget);
        }

        #[test]
        fn registered_action_passes_response_through(id in "[0-9]{1,6}") {
            let dispatcher = crud_dispatcher();
            let outcome = dispatcher.dispatch_request("patch", &params(&[("id", id.as_str())])).unwrap();
            let resp = outcome.into_response();
            prop_assert_eq!(resp.status, StatusCode::OK);
            prop_assert_eq!(&resp.body["id"], &json!(id));
        }
    }
}
