//! Batch Compute Runner Library
//!
//! Accepts CPU-bound jobs over HTTP, runs them on a fixed-size worker pool,
//! and tracks their status in memory until the process exits.

pub mod config;
pub mod http;
pub mod metrics;
pub mod pool;
pub mod state;
pub mod store;

pub use config::Config;
pub use pool::{JobHandle, WorkerPool};
pub use state::AppState;
pub use store::JobStore;
