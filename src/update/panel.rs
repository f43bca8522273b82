//! Panel placement update handlers
//!
//! Handles show/hide/float/re-dock messages against the manager.

use crate::commands::Cmd;
use crate::error::Result;
use crate::manager::Manager;
use crate::messages::PanelMsg;

/// Update function for panel messages
pub fn update_panel(manager: &mut Manager, msg: PanelMsg) -> Result<Option<Cmd>> {
    match msg {
        PanelMsg::Open(panel) => manager.open(panel.as_str())?,
        PanelMsg::Close(panel) => manager.close(panel.as_str())?,
        PanelMsg::Toggle(panel) => manager.toggle(panel.as_str())?,
        PanelMsg::Float { panel, placement } => {
            manager.open_window(panel.as_str(), placement)?;
        }
        PanelMsg::Dock(panel) => manager.open_dock(panel.as_str())?,
        PanelMsg::StandAlone(panel) => {
            manager.stand_alone(panel.as_str())?;
        }
        PanelMsg::Move { panel, dock, index } => {
            manager.move_panel(&dock, index, panel.as_str())?;
        }
        PanelMsg::MoveGroup { dock, from, to } => {
            // Out-of-range indices panic in the region; a message may carry stale ones
            let len = manager.find_dock(&dock).map_or(0, |d| d.groups().len());
            if from >= len || to >= len {
                tracing::warn!(dock = %dock, from, to, len, "Ignoring out-of-range group move");
                return Ok(None);
            }
            manager.move_group(&dock, from, to)?;
        }
    }
    Ok(Some(Cmd::Relayout))
}
