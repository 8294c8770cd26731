//! Layer identity and configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a map layer, as referenced by configuration and
/// selection state. Distinct from the layer's display title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One map layer as known to this client: identity, human-readable title,
/// and the sublayer index it occupies in the upstream feature service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: LayerId,
    pub title: String,
    pub sublayer: u32,
}
