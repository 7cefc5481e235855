pub mod config;
pub mod detection;
pub mod error;
pub mod server;
pub mod vision;

pub use error::{Error, Result};
