//! Dock regions and their group lists
//!
//! A region owns an ordered list of panel groups and a pointer to the selected
//! group. Every mutation queues a `DockEvent` so the layout renderer can rebuild.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GroupId, PanelGroup, PanelKey};
use crate::error::{DockError, Result};

/// Name of a dock region (e.g. "left", "right")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DockKey(String);

impl DockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for DockKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DockKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for DockKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Change notification raised by a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockEvent {
    /// Groups were added, removed, reordered, or had members change
    GroupsChanged,
    /// A member started or stopped floating; the groups themselves are unchanged
    FloatingChanged,
    /// Groups were replaced wholesale from a saved layout
    Reloaded,
    /// The selected group changed
    SelectionChanged(Option<GroupId>),
}

/// A named container of panel groups with one selected group
#[derive(Debug, Clone)]
pub struct DockRegion {
    key: DockKey,
    groups: Vec<PanelGroup>,
    selected: Option<GroupId>,
    events: Vec<DockEvent>,
}

impl DockRegion {
    pub fn new(key: impl Into<DockKey>) -> Self {
        Self {
            key: key.into(),
            groups: Vec::new(),
            selected: None,
            events: Vec::new(),
        }
    }

    pub fn key(&self) -> &DockKey {
        &self.key
    }

    pub fn groups(&self) -> &[PanelGroup] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&PanelGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    pub fn group_index(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id() == id)
    }

    /// Index of the group holding `panel`
    pub fn group_index_of_panel(&self, panel: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(panel))
    }

    pub fn first_group_containing(&self, panel: &str) -> Option<&PanelGroup> {
        self.groups.iter().find(|g| g.contains(panel))
    }

    pub fn contains_panel(&self, panel: &str) -> bool {
        self.first_group_containing(panel).is_some()
    }

    /// All panels in the region, in group then tab order
    pub fn panel_keys(&self) -> impl Iterator<Item = &PanelKey> + '_ {
        self.groups.iter().flat_map(|g| g.panels().iter())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn selected(&self) -> Option<GroupId> {
        self.selected
    }

    pub fn selected_group(&self) -> Option<&PanelGroup> {
        self.selected.and_then(|id| self.group(id))
    }

    /// Set the selected group.
    ///
    /// A group that is not a member of this region is rejected and the previous
    /// selection is kept. Returns whether the selection was accepted.
    pub fn set_selected(&mut self, selected: Option<GroupId>) -> bool {
        if let Some(id) = selected {
            if self.group_index(id).is_none() {
                tracing::warn!(dock = %self.key, group = ?id, "Rejected selection of foreign group");
                return false;
            }
        }
        if self.selected != selected {
            self.selected = selected;
            self.events.push(DockEvent::SelectionChanged(selected));
        }
        true
    }

    /// Whether the selected group contains `panel`
    pub fn is_panel_selected(&self, panel: &str) -> bool {
        self.selected_group().is_some_and(|g| g.contains(panel))
    }

    // ========================================================================
    // Group operations
    // ========================================================================

    /// Append a group unless it is already present. Returns whether it was added.
    pub fn add(&mut self, group: PanelGroup) -> bool {
        if self.group_index(group.id()).is_some() {
            return false;
        }
        self.groups.push(group);
        self.groups_changed();
        true
    }

    /// Insert a group at `index` (clamped to the list length) unless already present
    pub fn insert_group(&mut self, index: usize, group: PanelGroup) -> bool {
        if self.group_index(group.id()).is_some() {
            return false;
        }
        let index = index.min(self.groups.len());
        self.groups.insert(index, group);
        self.groups_changed();
        true
    }

    /// Remove a group, clearing the selection if it pointed at it
    pub fn remove(&mut self, id: GroupId) -> Option<PanelGroup> {
        let index = self.group_index(id)?;
        let group = self.groups.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
            self.events.push(DockEvent::SelectionChanged(None));
        }
        self.groups_changed();
        Some(group)
    }

    /// Move the group at `old_index` to `new_index`. Panics if either is out of range.
    pub fn move_group(&mut self, old_index: usize, new_index: usize) {
        if old_index == new_index {
            assert!(old_index < self.groups.len(), "group index out of range");
            return;
        }
        let group = self.groups.remove(old_index);
        self.groups.insert(new_index, group);
        self.groups_changed();
    }

    // ========================================================================
    // Panel operations
    // ========================================================================

    /// Wrap `panel` in a new standalone group and append it
    pub fn add_panel(&mut self, panel: PanelKey) -> Result<GroupId> {
        if self.contains_panel(panel.as_str()) {
            return Err(DockError::AlreadyPlaced {
                panel,
                dock: self.key.clone(),
            });
        }
        let group = PanelGroup::standalone(panel);
        let id = group.id();
        self.groups.push(group);
        self.groups_changed();
        Ok(id)
    }

    /// Detach `panel`, deleting its group if it was the sole member.
    ///
    /// Returns whether the panel was found.
    pub fn remove_panel(&mut self, panel: &str) -> bool {
        let Some(index) = self.group_index_of_panel(panel) else {
            return false;
        };
        if self.groups[index].len() == 1 {
            let id = self.groups[index].id();
            self.remove(id);
        } else {
            self.groups[index].remove(panel);
            self.groups_changed();
        }
        true
    }

    /// Put `panel` at `index` inside `target`.
    ///
    /// Reorders in place when the panel is already in `target`, otherwise detaches
    /// it from its current group (deleting that group if emptied) first.
    pub fn move_panel_within_or_across_groups(
        &mut self,
        target: GroupId,
        index: usize,
        panel: &PanelKey,
    ) -> Result<()> {
        let target_index = self
            .group_index(target)
            .ok_or_else(|| DockError::UnknownGroup(target, self.key.clone()))?;

        match self.group_index_of_panel(panel.as_str()) {
            Some(current) if current == target_index => {
                let group = &mut self.groups[current];
                if let Some(old) = group.index_of(panel.as_str()) {
                    let new = index.min(group.len() - 1);
                    group.move_panel(old, new);
                }
            }
            Some(current) => {
                if self.groups[current].len() == 1 {
                    let id = self.groups[current].id();
                    self.remove(id);
                } else {
                    self.groups[current].remove(panel.as_str());
                }
                self.insert_into_group(target, index, panel.clone());
            }
            None => self.insert_into_group(target, index, panel.clone()),
        }
        self.groups_changed();
        Ok(())
    }

    fn insert_into_group(&mut self, target: GroupId, index: usize, panel: PanelKey) {
        if let Some(group) = self.groups.iter_mut().find(|g| g.id() == target) {
            let index = index.min(group.len());
            group.insert(index, panel);
        }
    }

    /// Re-dock `panel` at group granularity.
    ///
    /// A group leader takes its whole group to `index`; any other member is split
    /// off into a new standalone group inserted at `index`. The index is clamped to
    /// the resulting list length.
    pub fn move_panel(&mut self, index: usize, panel: &PanelKey) -> Result<()> {
        let current = self
            .group_index_of_panel(panel.as_str())
            .ok_or_else(|| DockError::NotRegistered(panel.clone()))?;

        if self.groups[current].leader() == Some(panel) {
            let group = self.groups.remove(current);
            let index = index.min(self.groups.len());
            self.groups.insert(index, group);
        } else {
            self.groups[current].remove(panel.as_str());
            let index = index.min(self.groups.len());
            self.groups
                .insert(index, PanelGroup::standalone(panel.clone()));
        }
        self.groups_changed();
        Ok(())
    }

    /// Split `panel` out of its group into a new standalone group next to it.
    ///
    /// A leader's new group goes before the remainder of its old group, any other
    /// member's goes right after, so tab order is preserved across the stack.
    /// Returns the id of the panel's (possibly unchanged) group.
    pub fn stand_alone(&mut self, panel: &PanelKey) -> Result<GroupId> {
        let current = self
            .group_index_of_panel(panel.as_str())
            .ok_or_else(|| DockError::NotRegistered(panel.clone()))?;

        let group = &mut self.groups[current];
        if group.is_standalone(panel.as_str()) {
            return Ok(group.id());
        }

        let was_leader = group.leader() == Some(panel);
        group.remove(panel.as_str());
        let standalone = PanelGroup::standalone(panel.clone());
        let id = standalone.id();
        let index = if was_leader { current } else { current + 1 };
        self.groups.insert(index, standalone);
        self.groups_changed();
        Ok(id)
    }

    // ========================================================================
    // Bulk updates (restore)
    // ========================================================================

    /// Replace the whole group list and selection
    pub(crate) fn replace_groups(&mut self, groups: Vec<PanelGroup>, selected: Option<GroupId>) {
        self.groups = groups.into_iter().filter(|g| !g.is_empty()).collect();
        let selected = selected.filter(|id| self.group_index(*id).is_some());
        if self.selected != selected {
            self.selected = selected;
            self.events.push(DockEvent::SelectionChanged(selected));
        }
        self.groups_changed();
    }

    /// Drop panels rejected by `keep`, deleting groups that become empty
    pub(crate) fn retain_panels(&mut self, mut keep: impl FnMut(&PanelKey) -> bool) {
        let before: usize = self.groups.iter().map(PanelGroup::len).sum();
        for group in &mut self.groups {
            group.retain(&mut keep);
        }
        let emptied: Vec<GroupId> = self
            .groups
            .iter()
            .filter(|g| g.is_empty())
            .map(PanelGroup::id)
            .collect();
        for id in emptied {
            self.remove(id);
        }
        let after: usize = self.groups.iter().map(PanelGroup::len).sum();
        if before != after {
            self.groups_changed();
        }
    }

    // ========================================================================
    // Change notification
    // ========================================================================

    /// Queue a floating state change of a member
    pub(crate) fn floating_changed(&mut self) {
        self.push_coalesced(DockEvent::FloatingChanged);
    }

    /// Collapse queued structural changes into a single `Reloaded`.
    ///
    /// Groups rebuilt from a snapshot carry placements that are current, so the
    /// region must not report them as a regroup.
    pub(crate) fn mark_reloaded(&mut self) {
        let before = self.events.len();
        self.events
            .retain(|e| !matches!(e, DockEvent::GroupsChanged | DockEvent::FloatingChanged));
        if self.events.len() != before {
            self.events.push(DockEvent::Reloaded);
        }
    }

    fn groups_changed(&mut self) {
        self.push_coalesced(DockEvent::GroupsChanged);
    }

    fn push_coalesced(&mut self, event: DockEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    /// Drain queued change notifications
    pub fn take_events(&mut self) -> Vec<DockEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}
