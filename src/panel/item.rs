//! Panel identity and per-panel layout state

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Placement;

/// Default flexible weight: one star unit
pub const DEFAULT_WEIGHT: f32 = 1.0;

/// Durable panel identity used for lookups and persistence
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelKey(String);

impl PanelKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for PanelKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PanelKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for PanelKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Opaque handle to the renderable content of a panel
///
/// The engine never looks inside it; the host maps it back to whatever it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContentHandle(pub u64);

/// A named, persistent UI content unit
#[derive(Debug, Clone)]
pub struct Panel {
    key: PanelKey,
    pub title: String,
    pub content: ContentHandle,
    weight: f32,
    /// Last known floating window geometry, if the panel has ever floated
    pub float_placement: Option<Placement>,
}

impl Panel {
    pub fn new(key: impl Into<PanelKey>, title: impl Into<String>, content: ContentHandle) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            content,
            weight: DEFAULT_WEIGHT,
            float_placement: None,
        }
    }

    pub fn key(&self) -> &PanelKey {
        &self.key
    }

    /// Proportional share of the stacking axis
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Set the weight. Non-finite or non-positive values are ignored.
    ///
    /// Returns whether the weight was accepted.
    pub fn set_weight(&mut self, weight: f32) -> bool {
        if weight.is_finite() && weight > 0.0 {
            self.weight = weight;
            true
        } else {
            tracing::warn!(panel = %self.key, weight, "Rejected invalid panel weight");
            false
        }
    }

    /// Whether the remembered floating placement can be used to open a window
    pub fn has_valid_placement(&self) -> bool {
        self.float_placement.is_some_and(|p| p.is_valid())
    }
}
