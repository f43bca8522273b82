//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that the host should perform after an update.

use crate::snapshot::LayoutSnapshot;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Docked or floating state changed; drain dock events and re-arrange
    Relayout,
    /// Persist this snapshot
    SaveLayout(Box<LayoutSnapshot>),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires the renderers to sync
    pub fn needs_relayout(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Relayout => true,
            Cmd::SaveLayout(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::needs_relayout),
        }
    }

    /// The snapshot to persist, if any (first one wins in a batch)
    pub fn snapshot(&self) -> Option<&LayoutSnapshot> {
        match self {
            Cmd::SaveLayout(snapshot) => Some(snapshot),
            Cmd::Batch(cmds) => cmds.iter().find_map(Cmd::snapshot),
            _ => None,
        }
    }
}
