//! `flyover-core`: find upcoming ISS passes over the caller's location.
//!
//! Three leaf resolvers, each doing exactly one HTTP round-trip, are chained
//! by [`Pipeline`]:
//!
//! ```text
//! IpResolver   ← GET ip-echo service, extract `ip`
//!     │
//!     ▼
//! GeoResolver  ← GET <geo-base>/<ip>, raw text body
//!     │
//!     ▼  decode_coordinates (payload is JSON text nested in the body)
//! PassResolver ← GET <pass-base>?lat=..&lon=.., extract `response`
//! ```
//!
//! The first failing stage ends the run; its [`Failure`] is returned as-is.
//!
//! ```rust,ignore
//! use flyover_core::{Config, Pipeline};
//!
//! let pipeline = Pipeline::new(&Config::default())?;
//! for window in pipeline.run().await? {
//!     println!("{} for {}s", window.risetime, window.duration);
//! }
//! ```

pub mod config;
pub mod error;
pub mod geo;
pub(crate) mod http;
pub mod ip;
pub mod pass;
pub mod pipeline;
pub mod types;

pub use config::{Config, ConfigWarning, Endpoints, WarnLevel};
pub use error::{Failure, FailureKind, FlyoverError, Result, Stage};
pub use geo::{decode_coordinates, GeoResolver, RawGeoPayload};
pub use ip::IpResolver;
pub use pass::PassResolver;
pub use pipeline::{Pipeline, PipelineState};
pub use types::{Coordinates, IpAddress, PassWindow};
