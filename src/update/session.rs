//! Save/restore update handlers

use crate::commands::Cmd;
use crate::error::Result;
use crate::manager::Manager;
use crate::messages::SessionMsg;

/// Update function for session messages
pub fn update_session(manager: &mut Manager, msg: SessionMsg) -> Result<Option<Cmd>> {
    match msg {
        SessionMsg::Save => Ok(Some(Cmd::SaveLayout(Box::new(manager.create_snapshot())))),
        SessionMsg::Restore(snapshot) => {
            let report = manager.restore(&snapshot);
            if report.is_clean() {
                return Ok(Some(Cmd::Relayout));
            }
            // Persist the repaired layout so stale keys do not linger on disk
            Ok(Some(Cmd::batch(vec![
                Cmd::Relayout,
                Cmd::SaveLayout(Box::new(manager.create_snapshot())),
            ])))
        }
    }
}
