//! CPU Pipeline Library
//!
//! Runs a fixed sequence of CPU-bound steps per HTTP request and keeps the
//! finished runs in memory for later lookup.

pub mod config;
pub mod executor;
pub mod http;
pub mod metrics;
pub mod state;
pub mod store;

pub use config::Config;
pub use state::AppState;
pub use store::PipelineStore;
