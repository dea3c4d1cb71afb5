pub mod config;
pub mod passes;

use anyhow::Context;
use clap::Args;
use flyover_core::Config;
use std::path::Path;

/// Per-invocation overrides layered over the config file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "FLYOVER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Number of passes to request
    #[arg(long, global = true, env = "FLYOVER_PASS_COUNT")]
    pub count: Option<u32>,

    /// IP-echo service URL
    #[arg(long, global = true, env = "FLYOVER_IP_ENDPOINT")]
    pub ip_endpoint: Option<String>,

    /// Geolocation service base URL (the IP is appended)
    #[arg(long, global = true, env = "FLYOVER_GEO_ENDPOINT")]
    pub geo_endpoint: Option<String>,

    /// Pass-prediction service URL
    #[arg(long, global = true, env = "FLYOVER_PASS_ENDPOINT")]
    pub pass_endpoint: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(t) = self.timeout {
            config.timeout_secs = t;
        }
        if let Some(n) = self.count {
            config.pass_count = Some(n);
        }
        if let Some(url) = &self.ip_endpoint {
            config.endpoints.ip = url.clone();
        }
        if let Some(url) = &self.geo_endpoint {
            config.endpoints.geo = url.clone();
        }
        if let Some(url) = &self.pass_endpoint {
            config.endpoints.pass = url.clone();
        }
    }
}

pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(path).context("failed to load config")?;
    overrides.apply(&mut config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut config = Config::default();
        let overrides = Overrides {
            timeout: Some(3),
            pass_endpoint: Some("http://localhost:1234/pass".to_string()),
            ..Overrides::default()
        };
        overrides.apply(&mut config);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.endpoints.pass, "http://localhost:1234/pass");
        assert_eq!(config.endpoints.ip, Config::default().endpoints.ip);
        assert_eq!(config.pass_count, None);
    }
}
