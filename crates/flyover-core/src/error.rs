use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised while setting up a pipeline, before any stage runs.
#[derive(Debug, Error)]
pub enum FlyoverError {
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, FlyoverError>;

/// One of the three sequential lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    IpLookup,
    GeoLookup,
    PassLookup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::IpLookup => "ip lookup",
            Stage::GeoLookup => "geo lookup",
            Stage::PassLookup => "pass lookup",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No response was received (connect error, timeout, broken body).
    Transport,
    /// A response arrived with a non-200 status.
    Status,
    /// A 200 response whose body did not have the expected shape.
    Decode,
}

/// The outcome of a failed stage. A run surfaces at most one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{stage} failed: {message}")]
pub struct Failure {
    pub stage: Stage,
    pub kind: FailureKind,
    pub status_code: Option<u16>,
    pub message: String,
}

impl Failure {
    pub fn transport(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind: FailureKind::Transport,
            status_code: None,
            message: message.into(),
        }
    }

    pub fn status(stage: Stage, status_code: u16, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind: FailureKind::Status,
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    pub fn decode(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind: FailureKind::Decode,
            status_code: None,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_stage() {
        let f = Failure::status(Stage::PassLookup, 400, "error Reason: bad request");
        assert_eq!(
            f.to_string(),
            "pass lookup failed: error Reason: bad request"
        );
    }

    #[test]
    fn only_status_failures_carry_a_code() {
        assert_eq!(Failure::transport(Stage::IpLookup, "x").status_code, None);
        assert_eq!(Failure::decode(Stage::GeoLookup, "x").status_code, None);
        assert_eq!(Failure::status(Stage::GeoLookup, 503, "x").status_code, Some(503));
    }

    #[test]
    fn serializes_snake_case() {
        let f = Failure::decode(Stage::GeoLookup, "bad");
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["stage"], "geo_lookup");
        assert_eq!(v["kind"], "decode");
        assert!(v["status_code"].is_null());
    }
}
