//! Compute runner configuration.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

use compute_core::CoreError;

/// Compute runner configuration.
///
/// Every option can be set from the environment, which is how the platform
/// configures the service.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "compute-runner",
    about = "Run CPU-bound jobs on a worker pool via a simple HTTP API",
    version
)]
pub struct Config {
    /// Number of worker threads in the compute pool.
    #[arg(long, env = "COMPUTE_WORKERS", default_value_t = 4)]
    pub workers: usize,

    /// Maximum number of jobs tracked at once.
    #[arg(long, env = "COMPUTE_MAX_JOBS", default_value_t = 100)]
    pub max_jobs: usize,

    /// Address to listen on.
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
}

impl Config {
    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.workers == 0 {
            return Err(CoreError::InvalidConfig(
                "COMPUTE_WORKERS must be at least 1".to_string(),
            ));
        }
        if self.max_jobs == 0 {
            return Err(CoreError::InvalidConfig(
                "COMPUTE_MAX_JOBS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP server bind address.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: 4,
            max_jobs: 100,
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
        }
    }
}
