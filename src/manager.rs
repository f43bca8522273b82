//! Layout manager - registries of panels and dock regions
//!
//! The manager is the single owner of all placement state. Every panel it
//! knows about is a member of exactly one group in one region; a floating
//! panel keeps that membership so it can return to the same spot when docked.

use std::collections::BTreeMap;

use crate::error::{DockError, Result};
use crate::floating::{FloatingOptions, FloatingWindowManager, WindowHandle, WindowHost};
use crate::panel::{
    ContentHandle, DockEvent, DockKey, DockRegion, GroupId, Panel, PanelGroup, PanelKey, Placement,
};

/// Logical placement state of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// The panel's group is its region's selected group
    DockedVisible,
    /// The panel's group exists in a region but is not selected
    DockedHidden,
    /// The panel is hosted in a floating window
    Floating,
    /// Registered but not a member of any group
    Unplaced,
}

/// Title and content supplied for a panel at registration time
#[derive(Debug, Clone, PartialEq)]
pub struct PanelContent {
    pub title: String,
    pub handle: ContentHandle,
}

/// Source of panel titles and content handles
pub trait ContentProvider {
    fn content(&self, key: &str) -> Option<PanelContent>;
}

/// Top-level orchestrator of docked and floating panels
#[derive(Debug)]
pub struct Manager {
    pub(crate) panels: BTreeMap<PanelKey, Panel>,
    /// Regions in registration order
    pub(crate) docks: Vec<DockRegion>,
    pub(crate) windows: FloatingWindowManager,
}

impl Manager {
    pub fn new(host: Box<dyn WindowHost>) -> Self {
        Self::with_options(host, FloatingOptions::default())
    }

    pub fn with_options(host: Box<dyn WindowHost>, options: FloatingOptions) -> Self {
        Self {
            panels: BTreeMap::new(),
            docks: Vec::new(),
            windows: FloatingWindowManager::new(host, options),
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register an empty dock region
    pub fn register_dock(&mut self, key: impl Into<DockKey>) -> Result<()> {
        let key = key.into();
        if self.find_dock(key.as_str()).is_some() {
            return Err(DockError::DuplicateKey(key.to_string()));
        }
        tracing::debug!(dock = %key, "Registered dock region");
        self.docks.push(DockRegion::new(key));
        Ok(())
    }

    /// Register a panel and dock it as a standalone group at the end of `dock`
    pub fn register_panel(&mut self, panel: Panel, dock: &str) -> Result<()> {
        let index = self.dock_index(dock)?;
        if self.panels.contains_key(panel.key().as_str()) {
            return Err(DockError::DuplicateKey(panel.key().to_string()));
        }
        let key = panel.key().clone();
        self.docks[index].add_panel(key.clone())?;
        self.panels.insert(key.clone(), panel);
        tracing::debug!(panel = %key, dock, "Registered panel");
        Ok(())
    }

    /// Register every key in `keys` using titles and content from `provider`.
    ///
    /// Keys the provider does not know are skipped with a warning.
    pub fn register_from(
        &mut self,
        provider: &dyn ContentProvider,
        dock: &str,
        keys: &[&str],
    ) -> Result<()> {
        for key in keys {
            match provider.content(key) {
                Some(content) => {
                    self.register_panel(Panel::new(*key, content.title, content.handle), dock)?
                }
                None => tracing::warn!(panel = *key, "No content provided, panel not registered"),
            }
        }
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn panels(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.panels.values()
    }

    pub fn panel_keys(&self) -> impl Iterator<Item = &PanelKey> + '_ {
        self.panels.keys()
    }

    pub fn find_panel(&self, key: &str) -> Option<&Panel> {
        self.panels.get(key)
    }

    pub fn panel_mut(&mut self, key: &str) -> Option<&mut Panel> {
        self.panels.get_mut(key)
    }

    pub fn docks(&self) -> &[DockRegion] {
        &self.docks
    }

    pub fn find_dock(&self, key: &str) -> Option<&DockRegion> {
        self.docks.iter().find(|d| d.key().as_str() == key)
    }

    pub fn windows(&self) -> &FloatingWindowManager {
        &self.windows
    }

    fn dock_index(&self, key: &str) -> Result<usize> {
        self.docks
            .iter()
            .position(|d| d.key().as_str() == key)
            .ok_or_else(|| DockError::UnknownDock(key.into()))
    }

    /// Region and group currently holding `panel`
    pub fn locate(&self, panel: &str) -> Option<(&DockKey, GroupId)> {
        self.docks.iter().find_map(|d| {
            d.first_group_containing(panel)
                .map(|g| (d.key(), g.id()))
        })
    }

    fn locate_index(&self, panel: &str) -> Option<usize> {
        self.docks.iter().position(|d| d.contains_panel(panel))
    }

    /// Registered key for `panel`, or `NotRegistered`
    fn require(&self, panel: &str) -> Result<PanelKey> {
        self.panels
            .get_key_value(panel)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| DockError::NotRegistered(panel.into()))
    }

    /// Index of the region holding `panel`, or `NotRegistered`
    fn require_placed(&self, panel: &str) -> Result<usize> {
        self.locate_index(panel)
            .ok_or_else(|| DockError::NotRegistered(panel.into()))
    }

    /// First member of `group` that is not floating; it occupies the group's slot
    pub fn representative<'a>(&self, group: &'a PanelGroup) -> Option<&'a PanelKey> {
        group
            .panels()
            .iter()
            .find(|k| !self.windows.is_open(k.as_str()))
    }

    /// Drain change notifications queued by a region
    pub fn take_dock_events(&mut self, dock: &str) -> Vec<DockEvent> {
        self.docks
            .iter_mut()
            .find(|d| d.key().as_str() == dock)
            .map(DockRegion::take_events)
            .unwrap_or_default()
    }

    /// Tell the region holding `panel` that its floating state changed
    fn floating_changed_in_region_of(&mut self, panel: &str) {
        if let Some(index) = self.locate_index(panel) {
            self.docks[index].floating_changed();
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_panel_floating(&self, panel: &str) -> bool {
        self.windows.is_open(panel)
    }

    /// Floating, or in the selected group of some region
    pub fn is_panel_selected(&self, panel: &str) -> bool {
        self.is_panel_floating(panel) || self.docks.iter().any(|d| d.is_panel_selected(panel))
    }

    /// Floating, or the visible tab of a selected group
    pub fn is_panel_visible(&self, panel: &str) -> bool {
        if self.is_panel_floating(panel) {
            return true;
        }
        self.docks.iter().any(|d| {
            d.selected_group()
                .is_some_and(|g| self.representative(g).is_some_and(|k| k.as_str() == panel))
        })
    }

    /// Placement state of a registered panel
    pub fn panel_state(&self, panel: &str) -> Option<PanelState> {
        if !self.panels.contains_key(panel) {
            return None;
        }
        let state = if self.is_panel_floating(panel) {
            PanelState::Floating
        } else if self.docks.iter().any(|d| d.is_panel_selected(panel)) {
            PanelState::DockedVisible
        } else if self.locate_index(panel).is_some() {
            PanelState::DockedHidden
        } else {
            PanelState::Unplaced
        };
        Some(state)
    }

    /// Registered panels that are not a member of any group
    pub fn unplaced_panels(&self) -> Vec<PanelKey> {
        self.panels
            .keys()
            .filter(|k| self.locate_index(k.as_str()).is_none())
            .cloned()
            .collect()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Show a panel the way it was last shown: floating if it has a usable window
    /// placement or is already floating, docked otherwise.
    pub fn open(&mut self, panel: &str) -> Result<()> {
        let key = self.require(panel)?;
        let floating = self.is_panel_floating(panel)
            || self.panels.get(&key).is_some_and(Panel::has_valid_placement);
        if floating {
            self.open_window(panel, None).map(|_| ())
        } else {
            self.open_dock(panel)
        }
    }

    /// Float a panel in its own window.
    ///
    /// The panel is first split out of its group and deselected in its dock, so
    /// it keeps a standalone dock membership to return to.
    pub fn open_window(&mut self, panel: &str, placement: Option<Placement>) -> Result<WindowHandle> {
        let key = self.require(panel)?;
        let index = self.require_placed(panel)?;
        self.docks[index].stand_alone(&key)?;
        self.close_dock(panel);

        let handle = match self.panels.get(&key) {
            Some(p) => self.windows.open(p, placement)?,
            None => return Err(DockError::NotRegistered(key)),
        };
        self.docks[index].floating_changed();
        tracing::debug!(panel = %key, "Panel is floating");
        Ok(handle)
    }

    /// Dock a panel and make its group the selected one in its region
    pub fn open_dock(&mut self, panel: &str) -> Result<()> {
        let key = self.require(panel)?;
        let was_floating = self.windows.close(panel, &mut self.panels);
        let index = self.require_placed(panel)?;
        if was_floating {
            self.docks[index].floating_changed();
        }

        let group = self.docks[index]
            .first_group_containing(panel)
            .map(PanelGroup::id)
            .ok_or_else(|| DockError::NotRegistered(key.clone()))?;
        self.docks[index].set_selected(Some(group));
        tracing::debug!(panel = %key, dock = %self.docks[index].key(), "Panel is docked");
        Ok(())
    }

    /// Hide a panel: close its window and deselect its group
    pub fn close(&mut self, panel: &str) -> Result<()> {
        self.require(panel)?;
        if self.windows.close(panel, &mut self.panels) {
            self.floating_changed_in_region_of(panel);
        }
        self.close_dock(panel);
        Ok(())
    }

    /// Deselect the panel's group in every region where it is selected
    pub fn close_dock(&mut self, panel: &str) {
        for dock in &mut self.docks {
            if dock.is_panel_selected(panel) {
                dock.set_selected(None);
            }
        }
    }

    /// Close if selected or floating, open otherwise
    pub fn toggle(&mut self, panel: &str) -> Result<()> {
        if self.is_panel_selected(panel) {
            self.close(panel)
        } else {
            self.open(panel)
        }
    }

    /// Split a panel out of its group into a new standalone group beside it.
    ///
    /// No-op if the panel is already standalone.
    pub fn stand_alone(&mut self, panel: &str) -> Result<GroupId> {
        let key = self.require(panel)?;
        let index = self.require_placed(panel)?;
        self.docks[index].stand_alone(&key)
    }

    /// Detach a panel completely: close its window and remove it from every region
    pub fn remove(&mut self, panel: &str) -> Result<()> {
        self.require(panel)?;
        self.windows.close(panel, &mut self.panels);
        for dock in &mut self.docks {
            dock.remove_panel(panel);
        }
        tracing::debug!(panel, "Removed panel from all docks");
        Ok(())
    }

    /// Re-dock a panel at group granularity into `dock` at `index`.
    ///
    /// A group leader brings its whole group along; any other member is split off
    /// into a new standalone group.
    pub fn move_panel(&mut self, dock: &str, index: usize, panel: &str) -> Result<()> {
        let key = self.require(panel)?;
        let target = self.dock_index(dock)?;
        let source = self.require_placed(panel)?;

        if source == target {
            return self.docks[target].move_panel(index, &key);
        }

        let region = &mut self.docks[source];
        let is_leader = region
            .first_group_containing(panel)
            .is_some_and(|g| g.leader() == Some(&key));
        let group = if is_leader {
            let id = region
                .first_group_containing(panel)
                .map(PanelGroup::id)
                .ok_or_else(|| DockError::NotRegistered(key.clone()))?;
            region
                .remove(id)
                .ok_or_else(|| DockError::NotRegistered(key.clone()))?
        } else {
            region.remove_panel(panel);
            PanelGroup::standalone(key.clone())
        };
        self.docks[target].insert_group(index, group);
        tracing::debug!(panel = %key, dock, index, "Moved panel across docks");
        Ok(())
    }

    /// Tab `panel` into the existing `group` of `dock` at tab position `index`.
    ///
    /// The panel leaves its current group, wherever that is. Floating state is
    /// unchanged.
    pub fn join_group(&mut self, dock: &str, group: GroupId, index: usize, panel: &str) -> Result<()> {
        let key = self.require(panel)?;
        let target = self.dock_index(dock)?;
        if self.docks[target].group(group).is_none() {
            return Err(DockError::UnknownGroup(group, self.docks[target].key().clone()));
        }
        if let Some(source) = self.locate_index(panel) {
            if source != target {
                self.docks[source].remove_panel(panel);
            }
        }
        self.docks[target].move_panel_within_or_across_groups(group, index, &key)?;
        tracing::debug!(panel = %key, dock, ?group, index, "Joined group");
        Ok(())
    }

    /// Reorder the groups of a region
    pub fn move_group(&mut self, dock: &str, old_index: usize, new_index: usize) -> Result<()> {
        let index = self.dock_index(dock)?;
        self.docks[index].move_group(old_index, new_index);
        Ok(())
    }

    /// Dock an unplaced panel as a new standalone group at `index` in `dock`
    pub fn insert_standalone(&mut self, dock: &str, index: usize, panel: &PanelKey) -> Result<GroupId> {
        let key = self.require(panel.as_str())?;
        let target = self.dock_index(dock)?;
        if let Some((placed, _)) = self.locate(panel.as_str()) {
            return Err(DockError::AlreadyPlaced {
                panel: key,
                dock: placed.clone(),
            });
        }
        let group = PanelGroup::standalone(key);
        let id = group.id();
        self.docks[target].insert_group(index, group);
        Ok(id)
    }

    /// Host callback: a floating window was closed from outside
    pub fn window_closed(&mut self, panel: &str, placement: Option<Placement>) {
        if self.windows.closed(panel, placement, &mut self.panels) {
            self.floating_changed_in_region_of(panel);
            tracing::debug!(panel, "Floating window closed by host");
        }
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Describe every violated placement invariant. Empty when consistent.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let mut seen: BTreeMap<&PanelKey, &DockKey> = BTreeMap::new();

        for dock in &self.docks {
            if let Some(id) = dock.selected() {
                if dock.group(id).is_none() {
                    violations.push(format!("dock '{}' selects missing group {:?}", dock.key(), id));
                }
            }
            for group in dock.groups() {
                if group.is_empty() {
                    violations.push(format!("dock '{}' holds empty group {:?}", dock.key(), group.id()));
                }
                for key in group.panels() {
                    if !self.panels.contains_key(key) {
                        violations.push(format!("dock '{}' holds unregistered panel '{}'", dock.key(), key));
                    }
                    if let Some(other) = seen.insert(key, dock.key()) {
                        violations.push(format!(
                            "panel '{}' is in more than one group ('{}' and '{}')",
                            key,
                            other,
                            dock.key()
                        ));
                    }
                }
            }
        }

        for key in self.windows.open_panels() {
            if !self.panels.contains_key(key) {
                violations.push(format!("floating window for unregistered panel '{}'", key));
            }
        }
        violations
    }

    /// True when every placement invariant holds
    pub fn check_invariants(&self) -> bool {
        self.invariant_violations().is_empty()
    }

    /// Panic in debug builds if any invariant is violated
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let violations = self.invariant_violations();
        assert!(violations.is_empty(), "layout invariants violated: {:?}", violations);
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}
