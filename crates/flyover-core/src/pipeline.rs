use crate::config::{Config, WarnLevel};
use crate::error::{Failure, FlyoverError, Result};
use crate::geo::{decode_coordinates, GeoResolver};
use crate::ip::IpResolver;
use crate::pass::PassResolver;
use crate::types::PassWindow;
use std::fmt;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// Where a single run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    NotStarted,
    AwaitingIp,
    AwaitingGeo,
    AwaitingPasses,
    Succeeded,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed)
    }

    /// Stages only move forward, one at a time; any awaiting state may fail.
    pub fn can_advance_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (NotStarted, AwaitingIp)
                | (AwaitingIp, AwaitingGeo)
                | (AwaitingGeo, AwaitingPasses)
                | (AwaitingPasses, Succeeded)
                | (AwaitingIp | AwaitingGeo | AwaitingPasses, Failed)
        )
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.can_advance_to(next),
            "illegal transition {self} -> {next}"
        );
        debug!(from = %self, to = %next, "pipeline transition");
        *self = next;
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineState::NotStarted => "not_started",
            PipelineState::AwaitingIp => "awaiting_ip",
            PipelineState::AwaitingGeo => "awaiting_geo",
            PipelineState::AwaitingPasses => "awaiting_passes",
            PipelineState::Succeeded => "succeeded",
            PipelineState::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Ip → Geo → Pass, strictly in order, each stage attempted once.
///
/// Holds no per-run state, so one instance can serve concurrent runs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    ip: IpResolver,
    geo: GeoResolver,
    pass: PassResolver,
}

impl Pipeline {
    /// Build the HTTP client (with the configured per-request timeout) and
    /// the three resolvers. Configs with error-level warnings are refused.
    pub fn new(config: &Config) -> Result<Self> {
        let errors: Vec<String> = config
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if !errors.is_empty() {
            return Err(FlyoverError::InvalidConfig(errors.join("; ")));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(FlyoverError::Client)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        let endpoints = &config.endpoints;
        Self {
            ip: IpResolver::new(client.clone(), endpoints.ip.clone()),
            geo: GeoResolver::new(client.clone(), endpoints.geo.clone()),
            pass: PassResolver::new(client, endpoints.pass.clone()).with_count(config.pass_count),
        }
    }

    /// Run all three stages. The first failure is returned unchanged and no
    /// later stage is contacted.
    pub async fn run(&self) -> std::result::Result<Vec<PassWindow>, Failure> {
        let mut state = PipelineState::NotStarted;
        let outcome = self.drive(&mut state).await;

        match &outcome {
            Ok(windows) => {
                state.advance(PipelineState::Succeeded);
                info!(passes = windows.len(), "pass lookup complete");
            }
            Err(failure) => {
                state.advance(PipelineState::Failed);
                warn!(stage = %failure.stage, kind = ?failure.kind, "pipeline failed: {}", failure.message);
            }
        }
        outcome
    }

    async fn drive(
        &self,
        state: &mut PipelineState,
    ) -> std::result::Result<Vec<PassWindow>, Failure> {
        state.advance(PipelineState::AwaitingIp);
        let ip = self.ip.resolve().await?;

        state.advance(PipelineState::AwaitingGeo);
        let raw = self.geo.resolve(&ip).await?;
        let coords = decode_coordinates(&raw)?;
        debug!(%ip, lat = coords.latitude, lon = coords.longitude, "located");

        state.advance(PipelineState::AwaitingPasses);
        self.pass.resolve(coords).await
    }
}
