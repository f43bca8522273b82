//! Tests for dropping panels onto dock slots

mod common;

use common::{groups, register, test_manager};
use dockyard::layout::{DropEdge, DropOutcome, LayoutMetrics, LayoutRenderer, Rect};
use dockyard::manager::Manager;
use dockyard::panel::PanelKey;

/// Renderer for "left" laid out in a 200x405 area: two 200px slots, one divider
fn renderer(manager: &mut Manager) -> LayoutRenderer {
    let mut renderer = LayoutRenderer::new("left", LayoutMetrics::default());
    renderer.rebuild(manager);
    renderer.arrange(Rect::new(0.0, 0.0, 200.0, 405.0), manager);
    renderer
}

fn weight(manager: &Manager, key: &str) -> f32 {
    manager.find_panel(key).unwrap().weight()
}

// ============================================================================
// Relocation
// ============================================================================

#[test]
fn test_drop_tab_below_slot_relocates_it() {
    let (mut manager, _) = test_manager();
    let mut renderer = renderer(&mut manager);
    let p3 = PanelKey::from("P3");

    let outcome = renderer.slots_mut()[0]
        .drop(&mut manager, Some(&p3), 150.0)
        .unwrap();

    assert_eq!(outcome, DropOutcome::Relocated { index: 1 });
    assert_eq!(groups(&manager, "left"), vec![vec!["P1"], vec!["P3"], vec!["P2"]]);
    assert_eq!(weight(&manager, "P1"), 0.5);
    assert_eq!(weight(&manager, "P3"), 0.5);
    assert_eq!(weight(&manager, "P2"), 1.0);
    manager.assert_invariants();
}

#[test]
fn test_drop_above_slot_inserts_before_it() {
    let (mut manager, _) = test_manager();
    let mut renderer = renderer(&mut manager);
    let p3 = PanelKey::from("P3");

    let outcome = renderer.slots_mut()[1]
        .drop(&mut manager, Some(&p3), 210.0)
        .unwrap();

    // P3 leaves [P2, P3] and lands in front of the P2 slot it was dropped on
    assert_eq!(outcome, DropOutcome::Relocated { index: 1 });
    assert_eq!(groups(&manager, "left"), vec![vec!["P1"], vec!["P3"], vec!["P2"]]);
    assert_eq!(weight(&manager, "P2"), 0.5);
}

#[test]
fn test_drop_from_other_dock() {
    let (mut manager, _) = test_manager();
    manager.register_dock("right").unwrap();
    register(&mut manager, "R1", "right");
    let mut renderer = renderer(&mut manager);

    let outcome = renderer.slots_mut()[0]
        .drop(&mut manager, Some(&PanelKey::from("R1")), 10.0)
        .unwrap();

    assert_eq!(outcome, DropOutcome::Relocated { index: 0 });
    assert_eq!(groups(&manager, "left"), vec![vec!["R1"], vec!["P1"], vec!["P2", "P3"]]);
    assert!(groups(&manager, "right").is_empty());
    manager.assert_invariants();
}

#[test]
fn test_drop_floating_panel_docks_it() {
    let (mut manager, _) = test_manager();
    manager.open_window("P1", None).unwrap();
    let mut renderer = renderer(&mut manager);
    assert_eq!(renderer.slots().len(), 1);

    let outcome = renderer.slots_mut()[0]
        .drop(&mut manager, Some(&PanelKey::from("P1")), 390.0)
        .unwrap();

    assert_eq!(outcome, DropOutcome::Relocated { index: 1 });
    assert!(!manager.is_panel_floating("P1"));
    assert_eq!(manager.find_panel("P1").unwrap().float_placement, None);
    assert_eq!(groups(&manager, "left"), vec![vec!["P2", "P3"], vec!["P1"]]);
}

// ============================================================================
// Reordering
// ============================================================================

#[test]
fn test_drop_slot_owner_above_reorders() {
    let (mut manager, _) = test_manager();
    let mut renderer = renderer(&mut manager);

    let outcome = renderer.slots_mut()[0]
        .drop(&mut manager, Some(&PanelKey::from("P2")), 20.0)
        .unwrap();

    assert_eq!(outcome, DropOutcome::Reordered { from: 1, to: 0 });
    assert_eq!(groups(&manager, "left"), vec![vec!["P2", "P3"], vec!["P1"]]);
    // Reorders never touch weights
    assert_eq!(weight(&manager, "P1"), 1.0);
    assert_eq!(weight(&manager, "P2"), 1.0);
}

#[test]
fn test_drop_slot_owner_below_reorders() {
    let (mut manager, _) = test_manager();
    let mut renderer = renderer(&mut manager);

    let outcome = renderer.slots_mut()[1]
        .drop(&mut manager, Some(&PanelKey::from("P1")), 400.0)
        .unwrap();

    assert_eq!(outcome, DropOutcome::Reordered { from: 0, to: 1 });
    assert_eq!(groups(&manager, "left"), vec![vec!["P2", "P3"], vec!["P1"]]);
}

#[test]
fn test_rebuild_after_drop() {
    let (mut manager, _) = test_manager();
    let mut renderer = renderer(&mut manager);
    manager.take_dock_events("left");

    renderer.slots_mut()[0]
        .drop(&mut manager, Some(&PanelKey::from("P3")), 150.0)
        .unwrap();

    assert!(renderer.sync(&mut manager));
    let panels: Vec<_> = renderer.slots().iter().map(|s| s.panel().to_string()).collect();
    assert_eq!(panels, vec!["P1", "P3", "P2"]);
}

// ============================================================================
// Rejection and indicators
// ============================================================================

#[test]
fn test_drop_rejects_missing_or_own_payload() {
    let (mut manager, _) = test_manager();
    let mut renderer = renderer(&mut manager);
    let before = groups(&manager, "left");

    let slot = &mut renderer.slots_mut()[0];
    assert_eq!(slot.drop(&mut manager, None, 10.0).unwrap(), DropOutcome::Rejected);
    assert_eq!(
        slot.drop(&mut manager, Some(&PanelKey::from("P1")), 10.0).unwrap(),
        DropOutcome::Rejected
    );
    assert_eq!(groups(&manager, "left"), before);
}

#[test]
fn test_drag_over_shows_half_slot_indicator() {
    let (mut manager, _) = test_manager();
    let mut renderer = renderer(&mut manager);
    let slot = &mut renderer.slots_mut()[1];

    let indicator = slot.drag_over(Some(&PanelKey::from("P1")), 380.0).unwrap();
    assert_eq!(indicator.edge, DropEdge::Bottom);
    assert_eq!(indicator.rect, Rect::new(0.0, 305.0, 200.0, 100.0));

    let indicator = slot.drag_over(Some(&PanelKey::from("P1")), 206.0).unwrap();
    assert_eq!(indicator.edge, DropEdge::Top);
    assert_eq!(indicator.rect, Rect::new(0.0, 205.0, 200.0, 100.0));

    assert_eq!(slot.drag_over(Some(&PanelKey::from("P2")), 380.0), None);
    assert_eq!(slot.indicator(), None);
}

#[test]
fn test_drag_leave_clears_indicator_only() {
    let (mut manager, _) = test_manager();
    let mut renderer = renderer(&mut manager);
    let before = groups(&manager, "left");
    let slot = &mut renderer.slots_mut()[0];

    slot.drag_over(Some(&PanelKey::from("P3")), 10.0);
    assert!(slot.indicator().is_some());
    slot.drag_leave();

    assert_eq!(slot.indicator(), None);
    assert_eq!(groups(&manager, "left"), before);
}
