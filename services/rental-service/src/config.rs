//! Service configuration
//!
//! Every setting can be passed as a flag or injected through the environment.

use clap::Parser;
use reqwest::Url;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// URL of the first-name service queried by `/bonjour-php`
    #[arg(long, env = "PHP_SERVICE_URL")]
    pub upstream_url: Url,

    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// Timeout applied to each upstream request, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    /// Emit log lines as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
