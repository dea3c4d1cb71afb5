use serde::{Deserialize, Serialize};
use std::fmt;

/// Public address reported by the IP-echo service. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpAddress(String);

impl IpAddress {
    /// Wrap `value`, or `None` if it is empty or all whitespace.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A predicted visibility window: start time and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassWindow {
    /// Unix seconds.
    pub risetime: i64,
    /// Seconds.
    pub duration: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_address_rejects_blank() {
        assert!(IpAddress::new("").is_none());
        assert!(IpAddress::new("   ").is_none());
        assert_eq!(IpAddress::new("1.2.3.4").unwrap().as_str(), "1.2.3.4");
    }

    #[test]
    fn pass_window_reads_provider_shape() {
        let w: PassWindow =
            serde_json::from_str(r#"{"risetime": 1000000000, "duration": 600}"#).unwrap();
        assert_eq!(
            w,
            PassWindow {
                risetime: 1_000_000_000,
                duration: 600
            }
        );
    }
}
