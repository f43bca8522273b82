//! Dock slot layout - stacks a region's groups with resizable dividers
//!
//! Each visible group gets one slot. Slot lengths along the vertical axis are
//! proportional to the representative panel's weight, subject to a minimum
//! floor. Dividers have a fixed thickness and sit between consecutive slots.

mod drop_target;

pub use drop_target::{DropEdge, DropIndicator, DropOutcome, SlotView};

use crate::manager::Manager;
use crate::panel::{DockEvent, DockKey};

// ============================================================================
// Layout Primitives
// ============================================================================

/// Rectangle for layout calculations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn top_half(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height / 2.0)
    }

    pub fn bottom_half(&self) -> Rect {
        let half = self.height / 2.0;
        Rect::new(self.x, self.y + half, self.width, self.height - half)
    }
}

/// Default divider thickness in logical pixels
pub const DIVIDER_THICKNESS: f32 = 5.0;

/// Default minimum slot length in logical pixels
pub const MIN_SLOT_LENGTH: f32 = 40.0;

/// Smallest share of a divider pair's combined weight either side may keep
const MIN_WEIGHT_SHARE: f32 = 0.001;

/// Fixed sizes used by the slot layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub divider_thickness: f32,
    pub min_slot_length: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            divider_thickness: DIVIDER_THICKNESS,
            min_slot_length: MIN_SLOT_LENGTH,
        }
    }
}

/// A draggable divider between two adjacent slots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    /// Hit-testing rectangle
    pub rect: Rect,
    /// The divider sits between slot `index` and slot `index + 1`
    pub index: usize,
}

#[derive(Debug, Clone, Copy)]
struct DividerDrag {
    index: usize,
    start_coord: f32,
    original_lengths: (f32, f32),
    original_weights: (f32, f32),
}

// ============================================================================
// Sizing
// ============================================================================

/// Split `available` length by `weights`, pinning any slot whose share would fall
/// below `min_length` to exactly `min_length`.
///
/// Pinned slots are removed from the proportional pool and the remainder is
/// redistributed until every unpinned share clears the floor. When the floors
/// alone exceed `available`, every slot gets the floor.
pub fn distribute(available: f32, weights: &[f32], min_length: f32) -> Vec<f32> {
    let count = weights.len();
    let mut pinned = vec![false; count];
    let mut lengths = vec![min_length; count];

    loop {
        let pinned_count = pinned.iter().filter(|p| **p).count();
        if pinned_count == count {
            return lengths;
        }

        let free_space = available - pinned_count as f32 * min_length;
        let free_weight: f32 = weights
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| !**p)
            .map(|(w, _)| w.max(0.0))
            .sum();
        let unpinned = (count - pinned_count) as f32;

        let mut newly_pinned = false;
        for i in 0..count {
            if pinned[i] {
                continue;
            }
            let share = if free_weight > 0.0 {
                free_space * weights[i].max(0.0) / free_weight
            } else {
                free_space / unpinned
            };
            if share < min_length {
                pinned[i] = true;
                lengths[i] = min_length;
                newly_pinned = true;
            } else {
                lengths[i] = share;
            }
        }

        if !newly_pinned {
            return lengths;
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Slot layout for one dock region
#[derive(Debug)]
pub struct LayoutRenderer {
    dock: DockKey,
    metrics: LayoutMetrics,
    bounds: Rect,
    slots: Vec<SlotView>,
    dividers: Vec<Divider>,
    drag: Option<DividerDrag>,
}

impl LayoutRenderer {
    pub fn new(dock: impl Into<DockKey>, metrics: LayoutMetrics) -> Self {
        Self {
            dock: dock.into(),
            metrics,
            bounds: Rect::default(),
            slots: Vec::new(),
            dividers: Vec::new(),
            drag: None,
        }
    }

    pub fn dock(&self) -> &DockKey {
        &self.dock
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn slots(&self) -> &[SlotView] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [SlotView] {
        &mut self.slots
    }

    pub fn dividers(&self) -> &[Divider] {
        &self.dividers
    }

    /// Drain the region's change notifications and bring the slots up to date.
    ///
    /// A regroup rebuilds and snaps every slot. Floating changes and reloaded
    /// layouts only refresh the slots, so remembered placements survive.
    /// Returns whether the slots were recomputed.
    pub fn sync(&mut self, manager: &mut Manager) -> bool {
        let events = manager.take_dock_events(self.dock.as_str());
        if events.contains(&DockEvent::GroupsChanged) {
            self.rebuild(manager);
            true
        } else if events
            .iter()
            .any(|e| matches!(e, DockEvent::FloatingChanged | DockEvent::Reloaded))
        {
            self.refresh(manager);
            true
        } else {
            false
        }
    }

    /// Discard all slots and dividers and rebuild them from the region's groups.
    ///
    /// Every new slot is snapped afterwards, which drops the panel's remembered
    /// floating rectangle now that it is docked.
    pub fn rebuild(&mut self, manager: &mut Manager) {
        self.collect_slots(manager);
        for slot in &mut self.slots {
            let key = slot.panel().clone();
            slot.snap(manager.panel_mut(key.as_str()));
        }
        tracing::debug!(dock = %self.dock, slots = self.slots.len(), "Rebuilt dock layout");
        self.arrange(self.bounds, manager);
    }

    /// Recompute the slots from the region's groups without snapping them
    pub fn refresh(&mut self, manager: &Manager) {
        self.collect_slots(manager);
        tracing::debug!(dock = %self.dock, slots = self.slots.len(), "Refreshed dock layout");
        self.arrange(self.bounds, manager);
    }

    fn collect_slots(&mut self, manager: &Manager) {
        self.drag = None;
        self.slots.clear();
        self.dividers.clear();

        let Some(region) = manager.find_dock(self.dock.as_str()) else {
            tracing::warn!(dock = %self.dock, "Cannot lay out unknown dock");
            return;
        };

        self.slots = region
            .groups()
            .iter()
            .filter_map(|g| {
                manager
                    .representative(g)
                    .map(|p| SlotView::new(self.dock.clone(), g.id(), p.clone()))
            })
            .collect();
    }

    /// Recompute slot and divider geometry within `bounds`
    pub fn arrange(&mut self, bounds: Rect, manager: &Manager) {
        self.bounds = bounds;
        self.dividers.clear();
        if self.slots.is_empty() {
            return;
        }

        let thickness = self.metrics.divider_thickness;
        let divider_total = thickness * (self.slots.len() - 1) as f32;
        let available = (bounds.height - divider_total).max(0.0);
        let weights: Vec<f32> = self
            .slots
            .iter()
            .map(|slot| {
                manager
                    .find_panel(slot.panel().as_str())
                    .map(|p| p.weight())
                    .unwrap_or(crate::panel::DEFAULT_WEIGHT)
            })
            .collect();
        let lengths = distribute(available, &weights, self.metrics.min_slot_length);

        let mut offset = bounds.y;
        let last = self.slots.len() - 1;
        for (i, (slot, length)) in self.slots.iter_mut().zip(lengths).enumerate() {
            slot.rect = Rect::new(bounds.x, offset, bounds.width, length);
            offset += length;
            if i < last {
                self.dividers.push(Divider {
                    rect: Rect::new(bounds.x, offset, bounds.width, thickness),
                    index: i,
                });
                offset += thickness;
            }
        }
    }

    /// Find the slot at a point
    pub fn slot_at_point(&self, x: f32, y: f32) -> Option<usize> {
        self.slots.iter().position(|s| s.rect.contains(x, y))
    }

    /// Find the divider at a point
    pub fn divider_at_point(&self, x: f32, y: f32) -> Option<usize> {
        self.dividers.iter().position(|d| d.rect.contains(x, y))
    }

    // ========================================================================
    // Divider dragging
    // ========================================================================

    /// Start dragging divider `index` from vertical coordinate `coord`
    pub fn begin_divider_drag(&mut self, index: usize, coord: f32, manager: &Manager) -> bool {
        let (Some(first), Some(second)) = (self.slots.get(index), self.slots.get(index + 1)) else {
            return false;
        };
        let weight_of = |slot: &SlotView| {
            manager
                .find_panel(slot.panel().as_str())
                .map(|p| p.weight())
                .unwrap_or(crate::panel::DEFAULT_WEIGHT)
        };
        self.drag = Some(DividerDrag {
            index,
            start_coord: coord,
            original_lengths: (first.rect.height, second.rect.height),
            original_weights: (weight_of(first), weight_of(second)),
        });
        true
    }

    /// Move the dragged divider to `coord`.
    ///
    /// Only the two slots adjacent to the divider change: their combined length is
    /// split at the new position (clamped so neither drops below the floor) and
    /// their combined weight is split in the same proportion.
    pub fn update_divider_drag(&mut self, coord: f32, manager: &mut Manager) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let (a0, b0) = drag.original_lengths;
        let total = a0 + b0;
        if total <= 0.0 {
            return false;
        }

        let min = self.metrics.min_slot_length;
        let first_length = if total < 2.0 * min {
            total / 2.0
        } else {
            (a0 + coord - drag.start_coord).clamp(min, total - min)
        };

        // Both weights stay positive so the pair keeps its combined total
        let weight_sum = drag.original_weights.0 + drag.original_weights.1;
        let epsilon = weight_sum * MIN_WEIGHT_SHARE;
        let first_weight = (weight_sum * first_length / total).clamp(epsilon, weight_sum - epsilon);
        let second_weight = weight_sum - first_weight;

        let first_key = self.slots[drag.index].panel().clone();
        let second_key = self.slots[drag.index + 1].panel().clone();
        if let Some(panel) = manager.panel_mut(first_key.as_str()) {
            panel.set_weight(first_weight);
        }
        if let Some(panel) = manager.panel_mut(second_key.as_str()) {
            panel.set_weight(second_weight);
        }

        self.arrange(self.bounds, manager);
        true
    }

    pub fn end_divider_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging_divider(&self) -> bool {
        self.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_distribute_proportional() {
        let lengths = distribute(300.0, &[1.0, 2.0], 40.0);
        assert!(approx(lengths[0], 100.0));
        assert!(approx(lengths[1], 200.0));
    }

    #[test]
    fn test_distribute_pins_small_shares_to_floor() {
        let lengths = distribute(400.0, &[0.05, 1.0, 1.0], 40.0);
        assert!(approx(lengths[0], 40.0));
        assert!(approx(lengths[1], 180.0));
        assert!(approx(lengths[2], 180.0));
    }

    #[test]
    fn test_distribute_floors_exceed_space() {
        let lengths = distribute(50.0, &[1.0, 1.0, 1.0], 40.0);
        assert_eq!(lengths, vec![40.0, 40.0, 40.0]);
    }

    #[test]
    fn test_distribute_empty() {
        assert!(distribute(100.0, &[], 40.0).is_empty());
    }

    #[test]
    fn test_rect_halves() {
        let r = Rect::new(0.0, 100.0, 50.0, 81.0);
        assert_eq!(r.top_half(), Rect::new(0.0, 100.0, 50.0, 40.5));
        assert_eq!(r.bottom_half(), Rect::new(0.0, 140.5, 50.0, 40.5));
        assert!(r.contains(0.0, 100.0));
        assert!(!r.contains(50.0, 100.0));
    }
}
