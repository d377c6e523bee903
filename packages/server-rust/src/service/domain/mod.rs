//! Domain handlers bound to the gateway.

pub mod userplane;

pub use userplane::{register_userplane_handlers, Userplane, UserplaneStore, USERPLANES_ACTION};
