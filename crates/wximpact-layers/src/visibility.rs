//! Single-select layer visibility.
//!
//! Visibility is not toggled by mutating layer handles in place. The selected
//! key is an explicit value owned by one state holder, and the per-layer
//! visibility mapping is derived from it by a pure function; the UI layer
//! applies that mapping to its layer handles.

use std::collections::HashMap;

use crate::types::LayerId;

/// Derive the visibility mapping for a single-select layer group: exactly
/// the selected key maps to `true`.
///
/// A selected key not present in `all` produces an all-false mapping; the
/// holder never invents layers.
pub fn compute_visibility(selected: &LayerId, all: &[LayerId]) -> HashMap<LayerId, bool> {
    all.iter()
        .map(|id| (id.clone(), id == selected))
        .collect()
}

/// Owner of the currently selected layer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSelection {
    selected: LayerId,
}

impl LayerSelection {
    pub fn new(initial: LayerId) -> Self {
        Self { selected: initial }
    }

    pub fn selected(&self) -> &LayerId {
        &self.selected
    }

    /// Switch the selection to another layer key.
    pub fn select(&mut self, id: LayerId) {
        if self.selected != id {
            tracing::debug!("layer selection changed: {} -> {}", self.selected, id);
            self.selected = id;
        }
    }

    /// Current visibility mapping over the given layer set.
    pub fn visibility(&self, all: &[LayerId]) -> HashMap<LayerId, bool> {
        compute_visibility(&self.selected, all)
    }
}
