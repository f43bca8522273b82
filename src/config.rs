//! Layout configuration persistence
//!
//! Stores layout metrics and the dock/panel registry in
//! `~/.config/dockyard/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::floating::{FloatingOptions, WindowHost};
use crate::layout::{LayoutMetrics, DIVIDER_THICKNESS, MIN_SLOT_LENGTH};
use crate::manager::{ContentProvider, Manager, PanelContent};
use crate::panel::{ContentHandle, Panel};

/// A panel declared in the config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub key: String,
    /// Display title, defaults to the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PanelConfig {
    fn new(key: &str, title: &str) -> Self {
        Self {
            key: key.to_string(),
            title: Some(title.to_string()),
        }
    }
}

/// A dock region and the panels docked there by default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    pub key: String,
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
}

/// Layout configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Thickness of the dividers between stacked slots
    #[serde(default = "default_divider_thickness")]
    pub divider_thickness: f32,

    /// Minimum length of a slot, regardless of weight
    #[serde(default = "default_min_slot_length")]
    pub min_slot_length: f32,

    /// Geometry for floating windows without a remembered placement
    #[serde(default)]
    pub floating: FloatingOptions,

    /// Dock regions in registration order. Panels not restored from a saved
    /// layout are recovered into the last one.
    #[serde(default = "default_docks")]
    pub docks: Vec<DockConfig>,
}

fn default_divider_thickness() -> f32 {
    DIVIDER_THICKNESS
}

fn default_min_slot_length() -> f32 {
    MIN_SLOT_LENGTH
}

fn default_docks() -> Vec<DockConfig> {
    vec![
        DockConfig {
            key: "left".to_string(),
            panels: vec![
                PanelConfig::new("folders", "Folders"),
                PanelConfig::new("bookmarks", "Bookmarks"),
            ],
        },
        DockConfig {
            key: "right".to_string(),
            panels: vec![
                PanelConfig::new("properties", "Properties"),
                PanelConfig::new("history", "History"),
            ],
        },
    ]
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            divider_thickness: default_divider_thickness(),
            min_slot_length: default_min_slot_length(),
            floating: FloatingOptions::default(),
            docks: default_docks(),
        }
    }
}

impl LayoutConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Replace out-of-range metrics with defaults
    fn sanitized(mut self) -> Self {
        if !self.divider_thickness.is_finite() || self.divider_thickness < 0.0 {
            tracing::warn!(value = self.divider_thickness, "Invalid divider_thickness, using default");
            self.divider_thickness = DIVIDER_THICKNESS;
        }
        if !self.min_slot_length.is_finite() || self.min_slot_length <= 0.0 {
            tracing::warn!(value = self.min_slot_length, "Invalid min_slot_length, using default");
            self.min_slot_length = MIN_SLOT_LENGTH;
        }
        self
    }

    pub fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            divider_thickness: self.divider_thickness,
            min_slot_length: self.min_slot_length,
        }
    }

    /// Build a manager with every configured dock and panel registered
    pub fn build_manager(&self, host: Box<dyn WindowHost>) -> Result<Manager> {
        let mut manager = Manager::with_options(host, self.floating);
        for dock in &self.docks {
            manager.register_dock(dock.key.as_str())?;
            for panel in &dock.panels {
                let content = self.content(&panel.key).unwrap_or(PanelContent {
                    title: panel.key.clone(),
                    handle: ContentHandle::default(),
                });
                manager.register_panel(
                    Panel::new(panel.key.as_str(), content.title, content.handle),
                    &dock.key,
                )?;
            }
        }
        Ok(manager)
    }
}

/// Panels declared in the config get their title from it and a handle from
/// their declaration order.
impl ContentProvider for LayoutConfig {
    fn content(&self, key: &str) -> Option<PanelContent> {
        self.docks
            .iter()
            .flat_map(|d| d.panels.iter())
            .enumerate()
            .find(|(_, p)| p.key == key)
            .map(|(index, p)| PanelContent {
                title: p.title.clone().unwrap_or_else(|| p.key.clone()),
                handle: ContentHandle(index as u64),
            })
    }
}
