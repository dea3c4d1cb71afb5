use crate::error::{Failure, Stage};
use crate::http;
use crate::types::IpAddress;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct IpBody {
    ip: String,
}

/// Asks an IP-echo service for the caller's public address.
#[derive(Debug, Clone)]
pub struct IpResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl IpResolver {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// One GET to the endpoint; expects `{"ip": "<address>"}` with status 200.
    pub async fn resolve(&self) -> Result<IpAddress, Failure> {
        debug!(url = %self.endpoint, "fetching public ip");
        let resp = http::send(Stage::IpLookup, self.client.get(&self.endpoint)).await?;

        if !resp.is_ok() {
            let code = resp.status.as_u16();
            return Err(Failure::status(
                Stage::IpLookup,
                code,
                format!(
                    "Error when fetching IP address, Status code: {code}, response: {}",
                    resp.body
                ),
            ));
        }

        let parsed: IpBody = serde_json::from_str(&resp.body).map_err(|e| {
            Failure::decode(Stage::IpLookup, format!("invalid ip response: {e}"))
        })?;
        IpAddress::new(parsed.ip)
            .ok_or_else(|| Failure::decode(Stage::IpLookup, "ip field is empty"))
    }
}
