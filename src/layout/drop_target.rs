//! Slot views and the drag-and-drop protocol
//!
//! Every slot in a dock stack is a drop target. Dropping onto the upper half
//! inserts before the slot, onto the lower half after it.

use super::Rect;
use crate::error::{DockError, Result};
use crate::manager::Manager;
use crate::panel::{DockKey, GroupId, Panel, PanelKey};

/// Edge of a slot a drop is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEdge {
    Top,
    Bottom,
}

/// Visual insertion indicator shown while dragging over a slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropIndicator {
    pub edge: DropEdge,
    pub rect: Rect,
}

/// Result of dropping a panel onto a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing dropped, dropped onto itself, or onto its own group
    Rejected,
    /// A group of the same region was moved within the stack
    Reordered { from: usize, to: usize },
    /// The panel was detached from wherever it was and docked as a new group
    Relocated { index: usize },
}

/// The visual slot of one group in a dock stack
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    dock: DockKey,
    group: GroupId,
    panel: PanelKey,
    /// Set by `LayoutRenderer::arrange`
    pub rect: Rect,
    indicator: Option<DropIndicator>,
}

impl SlotView {
    pub fn new(dock: DockKey, group: GroupId, panel: PanelKey) -> Self {
        Self {
            dock,
            group,
            panel,
            rect: Rect::default(),
            indicator: None,
        }
    }

    pub fn dock(&self) -> &DockKey {
        &self.dock
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    /// The panel representing this slot's group
    pub fn panel(&self) -> &PanelKey {
        &self.panel
    }

    pub fn indicator(&self) -> Option<DropIndicator> {
        self.indicator
    }

    /// Reset transient state after a rebuild and forget the panel's floating rectangle
    pub fn snap(&mut self, panel: Option<&mut Panel>) {
        self.indicator = None;
        if let Some(panel) = panel {
            if panel.float_placement.take().is_some() {
                tracing::debug!(panel = %panel.key(), "Cleared floating placement of docked panel");
            }
        }
    }

    /// Which edge a pointer at vertical position `y` is aiming for
    pub fn hit_test(&self, y: f32) -> DropEdge {
        if y < self.rect.y + self.rect.height / 2.0 {
            DropEdge::Top
        } else {
            DropEdge::Bottom
        }
    }

    fn accepts(&self, payload: Option<&PanelKey>) -> bool {
        payload.is_some_and(|p| *p != self.panel)
    }

    /// Update the insertion indicator for a drag at `y`
    pub fn drag_over(&mut self, payload: Option<&PanelKey>, y: f32) -> Option<DropIndicator> {
        self.indicator = if self.accepts(payload) {
            let edge = self.hit_test(y);
            let rect = match edge {
                DropEdge::Top => self.rect.top_half(),
                DropEdge::Bottom => self.rect.bottom_half(),
            };
            Some(DropIndicator { edge, rect })
        } else {
            None
        };
        self.indicator
    }

    /// Abandon the drag. No state changes.
    pub fn drag_leave(&mut self) {
        self.indicator = None;
    }

    /// Drop `payload` at vertical position `y`.
    ///
    /// A panel that already represents another group of this region reorders that
    /// group. Any other panel is detached from wherever it lives and docked as a new
    /// standalone group beside this slot, splitting this slot's weight evenly
    /// with it.
    pub fn drop(
        &mut self,
        manager: &mut Manager,
        payload: Option<&PanelKey>,
        y: f32,
    ) -> Result<DropOutcome> {
        self.indicator = None;
        let Some(dropped) = payload.filter(|p| **p != self.panel) else {
            return Ok(DropOutcome::Rejected);
        };
        let edge = self.hit_test(y);
        let after = usize::from(edge == DropEdge::Bottom);

        let region = manager
            .find_dock(self.dock.as_str())
            .ok_or_else(|| DockError::UnknownDock(self.dock.clone()))?;
        let target = region
            .group_index(self.group)
            .ok_or_else(|| DockError::UnknownGroup(self.group, self.dock.clone()))?;

        let represented = region
            .groups()
            .iter()
            .position(|g| manager.representative(g) == Some(dropped));

        if let Some(old) = represented {
            if old == target {
                return Ok(DropOutcome::Rejected);
            }
            let before = usize::from(old < target);
            let last = region.groups().len() - 1;
            let new = (target + after - before).min(last);
            manager.move_group(self.dock.as_str(), old, new)?;
            tracing::debug!(dock = %self.dock, panel = %dropped, from = old, to = new, "Reordered group by drop");
            return Ok(DropOutcome::Reordered { from: old, to: new });
        }

        let dropped = dropped.clone();
        manager.remove(dropped.as_str())?;

        let half = manager
            .find_panel(self.panel.as_str())
            .map(|p| p.weight() / 2.0)
            .unwrap_or(crate::panel::DEFAULT_WEIGHT / 2.0);
        if let Some(panel) = manager.panel_mut(self.panel.as_str()) {
            panel.set_weight(half);
        }
        if let Some(panel) = manager.panel_mut(dropped.as_str()) {
            panel.set_weight(half);
            panel.float_placement = None;
        }

        // Removal may have shifted this slot's group
        let target = manager
            .find_dock(self.dock.as_str())
            .and_then(|r| r.group_index(self.group))
            .ok_or_else(|| DockError::UnknownGroup(self.group, self.dock.clone()))?;
        let index = target + after;
        manager.insert_standalone(self.dock.as_str(), index, &dropped)?;
        tracing::debug!(dock = %self.dock, panel = %dropped, index, "Relocated panel by drop");
        Ok(DropOutcome::Relocated { index })
    }
}
