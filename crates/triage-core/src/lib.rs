pub mod config;
pub mod error;

pub use config::TriageConfig;
pub use error::{CoreError, Result};
