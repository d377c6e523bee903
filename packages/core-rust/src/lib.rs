//! Userplane OAM core: outcome codes, the status table, and the handler contract.

pub mod error;
pub mod status;
pub mod traits;
pub mod types;

pub use error::{ErrorCode, HandlerError};
pub use status::{translate, Translation};
pub use traits::RequestHandler;
pub use types::{required_param, Outcome, Params, Response};
