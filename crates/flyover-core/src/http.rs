use crate::error::{Failure, Stage};
use reqwest::StatusCode;
use tracing::debug;

/// A response that made it back from the server, body fully read.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// Send `request` once. Anything that prevents a full response from
/// arriving is a transport failure of `stage`.
pub(crate) async fn send(
    stage: Stage,
    request: reqwest::RequestBuilder,
) -> Result<RawResponse, Failure> {
    let response = request
        .send()
        .await
        .map_err(|e| Failure::transport(stage, describe(&e)))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Failure::transport(stage, describe(&e)))?;
    debug!(%stage, status = status.as_u16(), bytes = body.len(), "response received");
    Ok(RawResponse { status, body })
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}
