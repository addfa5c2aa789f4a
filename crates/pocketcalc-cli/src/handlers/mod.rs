//! Command handlers - extracted from main.rs for testability
//!
//! Handlers write to any `io::Write` so tests can capture their output.

pub mod config;
pub mod eval;
pub mod guide;
pub mod keys;

pub use config::execute_config;
pub use eval::execute_eval;
pub use guide::execute_guide;
pub use keys::execute_keys;
