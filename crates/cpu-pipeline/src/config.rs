//! Pipeline service configuration.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

use compute_core::CoreError;

/// Pipeline service configuration.
///
/// Every option can be set from the environment, which is how the platform
/// configures the service.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cpu-pipeline",
    about = "Run a multi-step compute pipeline via a simple HTTP API",
    version
)]
pub struct Config {
    /// Upper bound on steps per run; larger requests are clamped.
    #[arg(long, env = "PIPELINE_MAX_STEPS", default_value_t = 10)]
    pub max_steps: u32,

    /// Steps to run when a request does not say.
    #[arg(long, env = "PIPELINE_DEFAULT_STEPS", default_value_t = 3)]
    pub default_steps: u32,

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
        if self.max_steps == 0 {
            return Err(CoreError::InvalidConfig(
                "PIPELINE_MAX_STEPS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Step count for a request: `None` and `Some(0)` take the default, and
    /// the result never exceeds `max_steps`.
    pub fn effective_steps(&self, requested: Option<u64>) -> u32 {
        let steps = requested
            .filter(|n| *n > 0)
            .unwrap_or(u64::from(self.default_steps))
            .min(u64::from(self.max_steps));
        u32::try_from(steps).unwrap_or(self.max_steps)
    }

    /// HTTP server bind address.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_steps: 10,
            default_steps: 3,
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
        }
    }
}
