use crate::error::HandlerError;
use crate::types::{Outcome, Params};

/// Processes the parameters of one action.
///
/// Implementations hold no state shared with other handlers that this layer
/// relies on; each call is driven by its parameters alone. Failures are
/// reported through `HandlerError` and left for the boundary to translate.
pub trait RequestHandler: Send + Sync {
    /// Handle one request.
    ///
    /// # Errors
    ///
    /// Returns a `HandlerError` carrying the failure code.
    fn handle(&self, params: &Params) -> Result<Outcome, HandlerError>;
}

impl<F> RequestHandler for F
where
    F: Fn(&Params) -> Result<Outcome, HandlerError> + Send + Sync,
{
    fn handle(&self, params: &Params) -> Result<Outcome, HandlerError> {
        self(params)
    }
}
