pub mod config;
pub mod error;
pub mod prediction;
pub mod render;
pub mod server;
pub mod session;

pub use error::{Error, Result};
