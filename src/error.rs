//! Error types for the docking engine
//!
//! Dock-relative operations surface these to the caller. Persistence restore
//! never produces them: stale snapshot data is dropped with a warning instead.

use thiserror::Error;

use crate::panel::{DockKey, GroupId, PanelKey};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DockError {
    /// The panel is not registered, or is not a member of any tracked group
    #[error("panel '{0}' is not registered in any dock region")]
    NotRegistered(PanelKey),

    /// The panel already has a group in the target region
    #[error("panel '{panel}' is already placed in dock '{dock}'")]
    AlreadyPlaced { panel: PanelKey, dock: DockKey },

    #[error("dock region '{0}' is not registered")]
    UnknownDock(DockKey),

    #[error("group {0:?} does not exist in dock '{1}'")]
    UnknownGroup(GroupId, DockKey),

    /// A panel or dock key was registered twice
    #[error("key '{0}' is already registered")]
    DuplicateKey(String),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Failures reported by a [`crate::floating::WindowHost`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("failed to create window for panel '{0}': {1}")]
    Create(PanelKey, String),

    #[error("window geometry is unavailable: {0}")]
    Geometry(String),
}

pub type Result<T> = std::result::Result<T, DockError>;
