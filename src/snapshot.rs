//! Layout persistence
//!
//! A snapshot records every panel's weight and window placement, each region's
//! group lists and selection, and which panels were floating. Restoring is
//! tolerant: keys that no longer exist are dropped, missing fields default, and
//! every registered panel ends up placed somewhere.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::manager::Manager;
use crate::panel::{PanelGroup, PanelKey, Placement, DEFAULT_WEIGHT};

fn default_weight() -> f32 {
    DEFAULT_WEIGHT
}

/// Persisted per-panel state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSnapshot {
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub float_placement: Option<Placement>,
}

/// Persisted per-region state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockSnapshot {
    /// Groups as lists of panel keys, in stack order
    #[serde(default)]
    pub groups: Vec<Vec<String>>,
    #[serde(default)]
    pub selected_group_first_key: Option<String>,
}

/// Persisted floating window state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingSnapshot {
    #[serde(default)]
    pub open_panel_keys: Vec<String>,
}

/// Serializable record of all placement state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    /// Schema version for forward compatibility
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub panels: BTreeMap<String, PanelSnapshot>,
    #[serde(default)]
    pub docks: BTreeMap<String, DockSnapshot>,
    #[serde(default)]
    pub floating_windows: FloatingSnapshot,
}

impl LayoutSnapshot {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// What a restore had to drop or repair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Snapshot panel keys that are no longer registered
    pub unknown_panels: Vec<String>,
    /// Snapshot dock keys that are no longer registered
    pub unknown_docks: Vec<String>,
    /// Registered panels missing from the snapshot's groups, appended to the last dock
    pub recovered_panels: Vec<PanelKey>,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_panels.is_empty() && self.unknown_docks.is_empty() && self.recovered_panels.is_empty()
    }
}

impl Manager {
    /// Capture the current layout, including up-to-date floating window geometry
    pub fn create_snapshot(&mut self) -> LayoutSnapshot {
        self.windows.snapshot_all(&mut self.panels);

        let panels = self
            .panels
            .values()
            .map(|p| {
                (
                    p.key().to_string(),
                    PanelSnapshot {
                        weight: p.weight(),
                        float_placement: p.float_placement,
                    },
                )
            })
            .collect();

        let docks = self
            .docks
            .iter()
            .map(|d| {
                let groups = d
                    .groups()
                    .iter()
                    .map(|g| g.panels().iter().map(PanelKey::to_string).collect())
                    .collect();
                let selected = d
                    .selected_group()
                    .and_then(PanelGroup::leader)
                    .map(PanelKey::to_string);
                (
                    d.key().to_string(),
                    DockSnapshot {
                        groups,
                        selected_group_first_key: selected,
                    },
                )
            })
            .collect();

        let open_panel_keys = self.windows.open_panels().map(PanelKey::to_string).collect();

        LayoutSnapshot {
            version: LayoutSnapshot::CURRENT_VERSION,
            panels,
            docks,
            floating_windows: FloatingSnapshot { open_panel_keys },
        }
    }

    /// Replace the current layout with `snapshot`.
    ///
    /// Never fails: stale keys are skipped and any panel left without a group is
    /// appended to the last region.
    pub fn restore(&mut self, snapshot: &LayoutSnapshot) -> RestoreReport {
        let mut report = RestoreReport::default();
        self.windows.close_all(&mut self.panels);

        for (key, state) in &snapshot.panels {
            match self.panels.get_mut(key.as_str()) {
                Some(panel) => {
                    panel.set_weight(state.weight);
                    panel.float_placement = state.float_placement.filter(Placement::is_valid);
                }
                None => report.unknown_panels.push(key.clone()),
            }
        }

        for key in snapshot.docks.keys() {
            if !self.docks.iter().any(|d| d.key().as_str() == key) {
                report.unknown_docks.push(key.clone());
            }
        }

        let panels = &self.panels;
        let mut claimed: HashSet<PanelKey> = HashSet::new();
        for dock in &mut self.docks {
            let Some(state) = snapshot.docks.get(dock.key().as_str()) else {
                continue;
            };
            let mut groups = Vec::with_capacity(state.groups.len());
            let mut selected = None;
            for keys in &state.groups {
                let members: Vec<PanelKey> = keys
                    .iter()
                    .filter_map(|k| panels.get_key_value(k.as_str()).map(|(k, _)| k.clone()))
                    .filter(|k| claimed.insert(k.clone()))
                    .collect();
                if members.is_empty() {
                    continue;
                }
                let group = PanelGroup::from_panels(members);
                if selected.is_none()
                    && state.selected_group_first_key.as_deref() == group.leader().map(PanelKey::as_str)
                {
                    selected = Some(group.id());
                }
                groups.push(group);
            }
            dock.replace_groups(groups, selected);
        }

        // Regions absent from the snapshot keep their groups, minus claimed panels
        for dock in &mut self.docks {
            if !snapshot.docks.contains_key(dock.key().as_str()) {
                dock.retain_panels(|k| !claimed.contains(k));
            }
        }

        for key in self.unplaced_panels() {
            match self.docks.last_mut() {
                Some(dock) => {
                    if dock.add_panel(key.clone()).is_ok() {
                        report.recovered_panels.push(key);
                    }
                }
                None => tracing::warn!(panel = %key, "No dock region to recover panel into"),
            }
        }

        for key in &snapshot.floating_windows.open_panel_keys {
            if !self.panels.contains_key(key.as_str()) {
                continue;
            }
            if let Err(e) = self.open_window(key, None) {
                tracing::warn!(panel = %key, "Failed to reopen floating window: {}", e);
            }
        }

        for dock in &mut self.docks {
            dock.mark_reloaded();
        }

        if !report.is_clean() {
            tracing::warn!(
                unknown_panels = ?report.unknown_panels,
                unknown_docks = ?report.unknown_docks,
                recovered = ?report.recovered_panels,
                "Restored layout from stale snapshot"
            );
        }
        tracing::info!(docks = self.docks.len(), panels = self.panels.len(), "Restored layout");
        report
    }
}

// ============================================================================
// Storage
// ============================================================================

/// Where snapshots are persisted
pub trait SnapshotStore {
    /// Read the stored snapshot. `Ok(None)` when nothing usable is stored.
    fn load(&self) -> Result<Option<LayoutSnapshot>>;

    fn save(&self, snapshot: &LayoutSnapshot) -> Result<()>;
}

/// Snapshot stored as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/dockyard/layout.json`
    pub fn default_location() -> Option<Self> {
        crate::config_paths::layout_file().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the stored snapshot, if any
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<LayoutSnapshot>> {
        if !self.path.exists() {
            tracing::debug!("No saved layout at {}", self.path.display());
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read layout from {}", self.path.display()))?;
        match LayoutSnapshot::from_json(&content) {
            Ok(snapshot) => {
                tracing::info!("Loaded layout from {}", self.path.display());
                Ok(Some(snapshot))
            }
            Err(e) => {
                tracing::warn!("Failed to parse layout at {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &LayoutSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = snapshot.to_json().context("Failed to serialize layout")?;

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        tracing::info!("Saved layout to {}", self.path.display());
        Ok(())
    }
}
