use crate::error::{Failure, Stage};
use crate::http;
use crate::types::{Coordinates, PassWindow};
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct PassBody {
    response: Vec<PassWindow>,
}

#[derive(Deserialize, Default)]
struct ServiceError {
    message: Option<String>,
    reason: Option<String>,
}

/// Fetches predicted pass windows for a location.
#[derive(Debug, Clone)]
pub struct PassResolver {
    client: reqwest::Client,
    base: String,
    count: Option<u32>,
}

impl PassResolver {
    pub fn new(client: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
            count: None,
        }
    }

    /// Ask the provider for `count` passes instead of its default.
    pub fn with_count(mut self, count: Option<u32>) -> Self {
        self.count = count;
        self
    }

    fn query(&self, coords: Coordinates) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
        ];
        if let Some(n) = self.count {
            params.push(("n", n.to_string()));
        }
        params
    }

    /// Windows come back in provider order. An empty list is a success.
    pub async fn resolve(&self, coords: Coordinates) -> Result<Vec<PassWindow>, Failure> {
        debug!(url = %self.base, lat = coords.latitude, lon = coords.longitude, "fetching passes");
        let request = self.client.get(&self.base).query(&self.query(coords));
        let resp = http::send(Stage::PassLookup, request).await?;

        if !resp.is_ok() {
            let code = resp.status.as_u16();
            return Err(Failure::status(
                Stage::PassLookup,
                code,
                status_message(code, &resp.body),
            ));
        }

        let parsed: PassBody = serde_json::from_str(&resp.body).map_err(|e| {
            Failure::decode(Stage::PassLookup, format!("invalid pass response: {e}"))
        })?;
        Ok(parsed.response)
    }
}

/// Prefer the service's own `message`/`reason`; fall back to the raw body.
fn status_message(code: u16, body: &str) -> String {
    let err: ServiceError = serde_json::from_str(body).unwrap_or_default();
    let detail = match (err.message, err.reason) {
        (Some(m), Some(r)) => format!("{m} Reason: {r}"),
        (Some(m), None) => m,
        (None, Some(r)) => format!("Reason: {r}"),
        (None, None) => format!("response: {body}"),
    };
    format!("Error when fetching pass times, Status code: {code}, {detail}")
}
