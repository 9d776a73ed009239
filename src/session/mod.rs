mod store;
mod types;

pub use store::{SessionLimits, SessionStore};
pub use types::*;
