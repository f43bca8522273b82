//! Message types for the Elm-style architecture
//!
//! All layout changes requested by a host flow through these message types.

use crate::panel::{PanelKey, Placement};
use crate::snapshot::LayoutSnapshot;

/// Panel placement messages (show, hide, float, re-dock)
#[derive(Debug, Clone, PartialEq)]
pub enum PanelMsg {
    /// Show a panel the way it was last shown
    Open(PanelKey),
    /// Hide a panel, closing its window if floating
    Close(PanelKey),
    /// Close if selected or floating, open otherwise
    Toggle(PanelKey),
    /// Float a panel, optionally at an explicit placement
    Float {
        panel: PanelKey,
        placement: Option<Placement>,
    },
    /// Dock a panel and select its group
    Dock(PanelKey),
    /// Split a panel out of its group
    StandAlone(PanelKey),
    /// Move a panel (or the group it leads) to `index` in `dock`
    Move {
        panel: PanelKey,
        dock: String,
        index: usize,
    },
    /// Reorder the groups of a dock
    MoveGroup {
        dock: String,
        from: usize,
        to: usize,
    },
}

/// Floating window host callbacks
#[derive(Debug, Clone, PartialEq)]
pub enum WindowMsg {
    /// The host closed a window on its own (e.g. the user clicked its close button)
    Closed {
        panel: PanelKey,
        placement: Option<Placement>,
    },
}

/// Whole-layout messages
#[derive(Debug, Clone, PartialEq)]
pub enum SessionMsg {
    /// Capture the current layout for persisting
    Save,
    /// Replace the current layout with a saved one
    Restore(Box<LayoutSnapshot>),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Panel placement messages
    Panel(PanelMsg),
    /// Floating window host messages
    Window(WindowMsg),
    /// Save/restore messages
    Session(SessionMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn open(panel: impl Into<PanelKey>) -> Self {
        Msg::Panel(PanelMsg::Open(panel.into()))
    }

    pub fn close(panel: impl Into<PanelKey>) -> Self {
        Msg::Panel(PanelMsg::Close(panel.into()))
    }

    pub fn toggle(panel: impl Into<PanelKey>) -> Self {
        Msg::Panel(PanelMsg::Toggle(panel.into()))
    }

    pub fn float(panel: impl Into<PanelKey>) -> Self {
        Msg::Panel(PanelMsg::Float {
            panel: panel.into(),
            placement: None,
        })
    }

    pub fn window_closed(panel: impl Into<PanelKey>, placement: Option<Placement>) -> Self {
        Msg::Window(WindowMsg::Closed {
            panel: panel.into(),
            placement,
        })
    }

    pub fn restore(snapshot: LayoutSnapshot) -> Self {
        Msg::Session(SessionMsg::Restore(Box::new(snapshot)))
    }
}

/// Short name of a message for tracing
pub fn msg_type_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::Panel(m) => match m {
            PanelMsg::Open(_) => "Panel::Open",
            PanelMsg::Close(_) => "Panel::Close",
            PanelMsg::Toggle(_) => "Panel::Toggle",
            PanelMsg::Float { .. } => "Panel::Float",
            PanelMsg::Dock(_) => "Panel::Dock",
            PanelMsg::StandAlone(_) => "Panel::StandAlone",
            PanelMsg::Move { .. } => "Panel::Move",
            PanelMsg::MoveGroup { .. } => "Panel::MoveGroup",
        },
        Msg::Window(WindowMsg::Closed { .. }) => "Window::Closed",
        Msg::Session(m) => match m {
            SessionMsg::Save => "Session::Save",
            SessionMsg::Restore(_) => "Session::Restore",
        },
    }
}
