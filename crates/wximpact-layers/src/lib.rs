//! Weather-impact layer handling for wximpact.
//!
//! Covers everything the map client needs to know about its impact layers
//! short of rendering them: fetching each layer's `valid_time` attribute
//! from the upstream feature service, parsing the compact Zulu range format,
//! producing Eastern-time display labels, and tracking single-select layer
//! visibility.

pub mod client;
pub mod error;
pub mod registry;
pub mod types;
pub mod valid_time;
pub mod visibility;

pub use client::FeatureClient;
pub use error::LayerError;
pub use registry::{LayerRegistry, ResolvedLabel};
pub use types::{LayerId, LayerSpec};
pub use valid_time::{format_eastern, parse_token, resolve_valid_time, ValidTimeRange};
pub use visibility::{compute_visibility, LayerSelection};
