use crate::error::{FlyoverError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org/?format=json";
pub const DEFAULT_GEO_ENDPOINT: &str = "https://ipvigilante.com/";
pub const DEFAULT_PASS_ENDPOINT: &str = "http://api.open-notify.org/iss-pass.json";

/// Base URLs of the three lookup services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_ip")]
    pub ip: String,
    /// The IP address is appended as the final path segment.
    #[serde(default = "default_geo")]
    pub geo: String,
    /// `lat`, `lon` (and optionally `n`) are appended as query parameters.
    #[serde(default = "default_pass")]
    pub pass: String,
}

fn default_ip() -> String {
    DEFAULT_IP_ENDPOINT.to_string()
}

fn default_geo() -> String {
    DEFAULT_GEO_ENDPOINT.to_string()
}

fn default_pass() -> String {
    DEFAULT_PASS_ENDPOINT.to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            geo: default_geo(),
            pass: default_pass(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: Endpoints,
    /// Per-request timeout. A stalled call fails its stage as a transport error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of passes to ask the pass service for (`n=`). Provider default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_count: Option<u32>,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout_secs: default_timeout_secs(),
            pass_count: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FlyoverError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load `path` if given and present, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(p) => {
                tracing::debug!(path = %p.display(), "config file absent, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let endpoints = [
            ("endpoints.ip", &self.endpoints.ip),
            ("endpoints.geo", &self.endpoints.geo),
            ("endpoints.pass", &self.endpoints.pass),
        ];
        for (key, url) in endpoints {
            if url.starts_with("https://") {
                continue;
            }
            if url.starts_with("http://") {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("{key} uses plain http: {url}"),
                });
            } else {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{key} must be an http(s) URL, got '{url}'"),
                });
            }
        }

        if self.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "timeout_secs must be greater than 0".to_string(),
            });
        } else if self.timeout_secs > 120 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "timeout_secs={}, >120 is unusual for a single lookup",
                    self.timeout_secs
                ),
            });
        }

        match self.pass_count {
            Some(0) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "pass_count must be at least 1".to_string(),
            }),
            Some(n) if n > 100 => warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("pass_count={n}, >100 is unusual"),
            }),
            _ => {}
        }

        warnings
    }
}
