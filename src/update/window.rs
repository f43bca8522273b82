//! Floating window host callbacks

use crate::commands::Cmd;
use crate::error::Result;
use crate::manager::Manager;
use crate::messages::WindowMsg;

/// Update function for window host messages
pub fn update_window(manager: &mut Manager, msg: WindowMsg) -> Result<Option<Cmd>> {
    match msg {
        WindowMsg::Closed { panel, placement } => {
            if !manager.is_panel_floating(panel.as_str()) {
                tracing::debug!(panel = %panel, "Close callback for a window that is not tracked");
                return Ok(None);
            }
            manager.window_closed(panel.as_str(), placement);
            Ok(Some(Cmd::Relayout))
        }
    }
}
