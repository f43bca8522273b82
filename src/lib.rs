//! Dockyard - docking and floating layout engine for tool panels
//!
//! Panels are stacked vertically in named dock regions, grouped into tabs,
//! floated into their own windows and persisted as JSON snapshots. State
//! changes flow through an Elm-style `Msg`/`update`/`Cmd` loop or directly
//! through [`Manager`] methods.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod floating;
pub mod layout;
pub mod manager;
pub mod messages;
pub mod panel;
pub mod snapshot;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::LayoutConfig;
pub use error::{DockError, HostError, Result};
pub use floating::{HeadlessHost, WindowHandle, WindowHost};
pub use layout::{LayoutRenderer, Rect};
pub use manager::{Manager, PanelState};
pub use messages::Msg;
pub use snapshot::{JsonFileStore, LayoutSnapshot, SnapshotStore};
