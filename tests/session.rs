//! End-to-end tests driving messages through `update` the way a host does:
//! every `Cmd::Relayout` syncs the dock renderers, every `Cmd::SaveLayout`
//! goes to the store.

mod common;

use common::{empty_manager, groups, register, selected_leader, test_manager};
use dockyard::commands::Cmd;
use dockyard::layout::{LayoutMetrics, LayoutRenderer, Rect};
use dockyard::manager::{Manager, PanelState};
use dockyard::messages::{Msg, PanelMsg, SessionMsg};
use dockyard::panel::{PanelKey, Placement};
use dockyard::snapshot::{JsonFileStore, SnapshotStore};
use dockyard::update::update;

/// A minimal host: one renderer for "left" and a file store
struct Host {
    manager: Manager,
    renderer: LayoutRenderer,
    store: JsonFileStore,
    relayouts: usize,
}

impl Host {
    fn new(mut manager: Manager, store: JsonFileStore) -> Self {
        let mut renderer = LayoutRenderer::new("left", LayoutMetrics::default());
        renderer.rebuild(&mut manager);
        renderer.arrange(Rect::new(0.0, 0.0, 200.0, 600.0), &manager);
        Self {
            manager,
            renderer,
            store,
            relayouts: 0,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.manager, msg).unwrap() {
            self.run(cmd);
        }
    }

    fn run(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Relayout => {
                self.renderer.sync(&mut self.manager);
                self.relayouts += 1;
            }
            Cmd::SaveLayout(snapshot) => self.store.save(&snapshot).unwrap(),
            Cmd::Batch(cmds) => cmds.into_iter().for_each(|c| self.run(c)),
        }
    }

    fn slot_panels(&self) -> Vec<String> {
        self.renderer.slots().iter().map(|s| s.panel().to_string()).collect()
    }

    fn placement(&self, key: &str) -> Option<Placement> {
        self.manager.find_panel(key).unwrap().float_placement
    }
}

fn float_at(panel: &str, placement: Placement) -> Msg {
    Msg::Panel(PanelMsg::Float {
        panel: PanelKey::from(panel),
        placement: Some(placement),
    })
}

// ============================================================================
// Float / close / reopen
// ============================================================================

#[test]
fn test_float_close_open_through_messages() {
    let dir = tempfile::tempdir().unwrap();
    let (manager, log) = test_manager();
    let mut host = Host::new(manager, JsonFileStore::new(dir.path().join("layout.json")));
    let window = Placement::new(5.0, 5.0, 200.0, 100.0);

    host.dispatch(float_at("P1", window));
    assert_eq!(host.slot_panels(), vec!["P2"]);

    host.dispatch(Msg::close("P1"));
    assert_eq!(host.slot_panels(), vec!["P1", "P2"]);
    assert_eq!(host.manager.panel_state("P1"), Some(PanelState::DockedHidden));
    assert_eq!(host.placement("P1"), Some(window));

    host.dispatch(Msg::open("P1"));

    assert!(host.manager.is_panel_floating("P1"));
    assert_eq!(log.borrow().created.len(), 2);
    assert_eq!(log.borrow().created[1], (PanelKey::from("P1"), window));
    assert_eq!(host.relayouts, 3);
}

#[test]
fn test_host_closed_window_reopens_where_it_was_left() {
    let dir = tempfile::tempdir().unwrap();
    let (manager, log) = test_manager();
    let mut host = Host::new(manager, JsonFileStore::new(dir.path().join("layout.json")));
    let moved = Placement::new(600.0, 50.0, 320.0, 480.0);

    host.dispatch(Msg::float("P1"));
    host.dispatch(Msg::window_closed("P1", Some(moved)));
    host.dispatch(Msg::toggle("P1"));

    assert!(host.manager.is_panel_floating("P1"));
    assert_eq!(log.borrow().created.last(), Some(&(PanelKey::from("P1"), moved)));
}

// ============================================================================
// Save / restore round trip
// ============================================================================

#[test]
fn test_save_and_restore_round_trip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    let (manager, _) = test_manager();
    let mut host = Host::new(manager, JsonFileStore::new(&path));
    let floating = Placement::new(700.0, 80.0, 300.0, 260.0);
    let remembered = Placement::new(40.0, 30.0, 320.0, 240.0);

    host.dispatch(float_at("P3", floating));
    host.dispatch(float_at("P1", remembered));
    host.dispatch(Msg::close("P1"));
    host.manager.panel_mut("P2").unwrap().set_weight(1.5);
    host.dispatch(Msg::Session(SessionMsg::Save));
    let saved = host.store.load().unwrap().unwrap();

    // Next session: panels registered fresh, then the saved layout restored
    let (mut fresh, log) = empty_manager();
    for key in ["P1", "P2", "P3"] {
        register(&mut fresh, key, "left");
    }
    let mut next = Host::new(fresh, JsonFileStore::new(&path));
    next.dispatch(Msg::restore(saved.clone()));

    assert_eq!(groups(&next.manager, "left"), vec![vec!["P1"], vec!["P2"], vec!["P3"]]);
    assert_eq!(selected_leader(&next.manager, "left").as_deref(), Some("P2"));
    assert_eq!(next.slot_panels(), vec!["P1", "P2"]);
    assert!(next.manager.is_panel_floating("P3"));
    assert!(!next.manager.is_panel_floating("P1"));
    assert_eq!(next.placement("P3"), Some(floating));
    assert_eq!(next.placement("P1"), Some(remembered));
    assert_eq!(next.manager.find_panel("P2").unwrap().weight(), 1.5);
    assert_eq!(log.borrow().created, vec![(PanelKey::from("P3"), floating)]);
    assert_eq!(next.manager.create_snapshot(), saved);

    next.dispatch(Msg::open("P1"));
    assert!(next.manager.is_panel_floating("P1"));
    assert_eq!(log.borrow().created.last(), Some(&(PanelKey::from("P1"), remembered)));
}
