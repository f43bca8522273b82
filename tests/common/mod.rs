//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use dockyard::error::HostError;
use dockyard::floating::{WindowHandle, WindowHost};
use dockyard::layout::Rect;
use dockyard::manager::Manager;
use dockyard::panel::{ContentHandle, Panel, PanelKey, Placement};
use dockyard::snapshot::{DockSnapshot, LayoutSnapshot};

/// Everything a `RecordingHost` was asked to do, plus knobs to make it fail
#[derive(Debug, Default)]
pub struct HostLog {
    pub created: Vec<(PanelKey, Placement)>,
    pub activated: Vec<WindowHandle>,
    pub closed: Vec<WindowHandle>,
    /// Current geometry of each live window, as the user would have left it
    pub geometry: BTreeMap<WindowHandle, Placement>,
    pub fail_create: bool,
    pub fail_capture: bool,
    next_id: u64,
}

impl HostLog {
    /// Handle of the live window for `panel`
    pub fn window_for(&self, panel: &str) -> Option<WindowHandle> {
        let index = self.created.iter().rposition(|(k, _)| k.as_str() == panel)?;
        let handle = WindowHandle(index as u64 + 1);
        self.geometry.contains_key(&handle).then_some(handle)
    }

    /// Simulate the user dragging/resizing a window
    pub fn move_window(&mut self, panel: &str, placement: Placement) {
        if let Some(handle) = self.window_for(panel) {
            self.geometry.insert(handle, placement);
        }
    }
}

/// Window host that records calls into a shared log
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub log: Rc<RefCell<HostLog>>,
}

impl WindowHost for RecordingHost {
    fn create(&mut self, panel: &Panel, placement: Placement) -> Result<WindowHandle, HostError> {
        let mut log = self.log.borrow_mut();
        if log.fail_create {
            return Err(HostError::Create(panel.key().clone(), "refused".into()));
        }
        log.next_id += 1;
        let handle = WindowHandle(log.next_id);
        log.created.push((panel.key().clone(), placement));
        log.geometry.insert(handle, placement);
        Ok(handle)
    }

    fn activate(&mut self, window: WindowHandle) {
        self.log.borrow_mut().activated.push(window);
    }

    fn capture_placement(&mut self, window: WindowHandle) -> Result<Placement, HostError> {
        let log = self.log.borrow();
        if log.fail_capture {
            return Err(HostError::Geometry("window is gone".into()));
        }
        log.geometry
            .get(&window)
            .copied()
            .ok_or_else(|| HostError::Geometry(format!("unknown window {:?}", window)))
    }

    fn close(&mut self, window: WindowHandle) {
        let mut log = self.log.borrow_mut();
        log.geometry.remove(&window);
        log.closed.push(window);
    }

    fn owner_bounds(&self) -> Option<Rect> {
        Some(Rect::new(100.0, 100.0, 1280.0, 800.0))
    }
}

/// Manager with an empty "left" region and a recording host
pub fn empty_manager() -> (Manager, Rc<RefCell<HostLog>>) {
    let host = RecordingHost::default();
    let log = Rc::clone(&host.log);
    let mut manager = Manager::new(Box::new(host));
    manager.register_dock("left").unwrap();
    (manager, log)
}

pub fn register(manager: &mut Manager, key: &str, dock: &str) {
    manager
        .register_panel(Panel::new(key, key.to_uppercase(), ContentHandle::default()), dock)
        .unwrap();
}

/// Region "left" holding `[[P1],[P2,P3]]` with `[P2,P3]` selected
pub fn test_manager() -> (Manager, Rc<RefCell<HostLog>>) {
    let (mut manager, log) = empty_manager();
    for key in ["P1", "P2", "P3"] {
        register(&mut manager, key, "left");
    }
    let (_, group) = manager.locate("P2").unwrap();
    manager.join_group("left", group, 1, "P3").unwrap();
    manager.open_dock("P2").unwrap();
    manager.take_dock_events("left");
    (manager, log)
}

/// Panel keys of every group in `dock`, in stack order
pub fn groups(manager: &Manager, dock: &str) -> Vec<Vec<String>> {
    manager
        .find_dock(dock)
        .unwrap()
        .groups()
        .iter()
        .map(|g| g.panels().iter().map(|k| k.to_string()).collect())
        .collect()
}

/// Leader of the selected group in `dock`
pub fn selected_leader(manager: &Manager, dock: &str) -> Option<String> {
    manager
        .find_dock(dock)
        .unwrap()
        .selected_group()
        .and_then(|g| g.leader())
        .map(|k| k.to_string())
}

/// Snapshot with a single dock, built from nested key lists
pub fn snapshot_with(dock: &str, groups: &[&[&str]], selected: Option<&str>) -> LayoutSnapshot {
    let mut snapshot = LayoutSnapshot {
        version: LayoutSnapshot::CURRENT_VERSION,
        ..LayoutSnapshot::default()
    };
    snapshot.docks.insert(
        dock.to_string(),
        DockSnapshot {
            groups: groups
                .iter()
                .map(|g| g.iter().map(|k| k.to_string()).collect())
                .collect(),
            selected_group_first_key: selected.map(str::to_string),
        },
    );
    snapshot
}
