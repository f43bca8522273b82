//! Shared helpers for benchmarks

use dockyard::floating::HeadlessHost;
use dockyard::manager::Manager;
use dockyard::panel::{ContentHandle, Panel};

/// Create a manager whose "left" dock holds `panels` standalone panels
#[allow(dead_code)]
pub fn make_manager(panels: usize) -> Manager {
    let mut manager = Manager::new(Box::new(HeadlessHost::default()));
    let _ = manager.register_dock("left");
    for i in 0..panels {
        let key = format!("panel-{i}");
        let _ = manager.register_panel(
            Panel::new(key.as_str(), key.clone(), ContentHandle(i as u64)),
            "left",
        );
    }
    manager
}
