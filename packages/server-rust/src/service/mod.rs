//! Request routing and error translation.
//!
//! 1. **Dispatch** (`dispatcher`): action -> handler lookup, no translation
//! 2. **Gateway** (`gateway`): method -> dispatcher, translation at the boundary
//! 3. **Domain handlers** (`domain`): the userplane CRUD handlers

pub mod dispatcher;
pub mod domain;
pub mod gateway;

pub use dispatcher::{RegistryError, RequestDispatcher};
pub use gateway::Gateway;
