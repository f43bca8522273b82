//! Update functions for the Elm-style architecture
//!
//! All layout changes requested through messages flow through these functions.

mod panel;
mod session;
mod window;

use tracing::{debug, span, Level};

use crate::commands::Cmd;
use crate::error::Result;
use crate::manager::Manager;
use crate::messages::{msg_type_name, Msg};

pub use panel::update_panel;
pub use session::update_session;
pub use window::update_window;

/// Main update function - dispatches to sub-handlers
///
/// Errors are returned to the caller unchanged; the manager is left consistent
/// either way. Debug builds check placement invariants after every message.
pub fn update(manager: &mut Manager, msg: Msg) -> Result<Option<Cmd>> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let result = match msg {
        Msg::Panel(m) => update_panel(manager, m),
        Msg::Window(m) => update_window(manager, m),
        Msg::Session(m) => update_session(manager, m),
    };

    manager.assert_invariants();
    if let Err(e) = &result {
        debug!(target: "message", msg = %msg_name, error = %e, "rejected");
    }
    result
}
