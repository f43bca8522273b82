//! Command-line interface for inspecting and editing a saved layout
//!
//! Each invocation loads the config and saved layout, applies one action
//! against a headless window host, prints the result and saves it back.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::layout::{LayoutMetrics, LayoutRenderer, Rect};
use crate::manager::Manager;
use crate::messages::{Msg, PanelMsg};
use crate::panel::{PanelKey, Placement};

/// Dock and float tool panels
#[derive(Parser, Debug)]
#[command(name = "dockyard", version, about = "Dock and float tool panels")]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/dockyard/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Saved layout file (defaults to ~/.config/dockyard/layout.json)
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,

    /// Do not write the resulting layout back
    #[arg(long)]
    pub dry_run: bool,

    /// Width of each dock region when printing geometry
    #[arg(long, default_value_t = 240.0)]
    pub width: f32,

    /// Height of each dock region when printing geometry
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    #[command(subcommand)]
    pub action: Action,
}

/// What to do to the layout
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Action {
    /// Print the layout without changing it
    Show,
    /// Show a panel the way it was last shown
    Open { panel: String },
    /// Hide a panel
    Close { panel: String },
    /// Show a hidden panel, hide a shown one
    Toggle { panel: String },
    /// Float a panel in its own window
    Float {
        panel: String,
        /// Window rectangle as X,Y,WIDTH,HEIGHT
        #[arg(long, value_parser = parse_placement)]
        at: Option<Placement>,
    },
    /// Dock a panel and select it
    Dock { panel: String },
    /// Split a panel out of its tab group
    Standalone { panel: String },
    /// Move a panel (or the group it leads) to a position in a dock
    Move {
        panel: String,
        dock: String,
        index: usize,
    },
    /// Forget the saved layout and start from the config defaults
    Reset,
}

impl Action {
    /// The message this action dispatches, if any
    pub fn to_msg(&self) -> Option<Msg> {
        let msg = match self {
            Action::Show | Action::Reset => return None,
            Action::Open { panel } => PanelMsg::Open(PanelKey::from(panel.as_str())),
            Action::Close { panel } => PanelMsg::Close(PanelKey::from(panel.as_str())),
            Action::Toggle { panel } => PanelMsg::Toggle(PanelKey::from(panel.as_str())),
            Action::Float { panel, at } => PanelMsg::Float {
                panel: PanelKey::from(panel.as_str()),
                placement: *at,
            },
            Action::Dock { panel } => PanelMsg::Dock(PanelKey::from(panel.as_str())),
            Action::Standalone { panel } => PanelMsg::StandAlone(PanelKey::from(panel.as_str())),
            Action::Move { panel, dock, index } => PanelMsg::Move {
                panel: PanelKey::from(panel.as_str()),
                dock: dock.clone(),
                index: *index,
            },
        };
        Some(Msg::Panel(msg))
    }
}

/// Parse `X,Y,WIDTH,HEIGHT` into a normal-state placement
pub fn parse_placement(s: &str) -> Result<Placement, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("Invalid number in '{}': {}", s, e))?;

    let [x, y, width, height] = parts[..] else {
        return Err(format!("Expected X,Y,WIDTH,HEIGHT, got '{}'", s));
    };
    let placement = Placement::new(x, y, width, height);
    if !placement.is_valid() {
        return Err(format!("Window size must be positive, got '{}'", s));
    }
    Ok(placement)
}

/// Print every region's slots with computed geometry, then the floating windows
pub fn render_layout(manager: &Manager, metrics: LayoutMetrics, bounds: Rect) -> String {
    let mut out = String::new();
    let dock_keys: Vec<_> = manager.docks().iter().map(|d| d.key().clone()).collect();

    for key in dock_keys {
        let mut renderer = LayoutRenderer::new(key.clone(), metrics);
        renderer.refresh(manager);
        renderer.arrange(bounds, manager);

        let _ = writeln!(out, "{}", key);
        let Some(dock) = manager.find_dock(key.as_str()) else {
            continue;
        };
        if renderer.slots().is_empty() {
            let _ = writeln!(out, "  (empty)");
        }
        for slot in renderer.slots() {
            let selected = if dock.selected() == Some(slot.group()) { '*' } else { ' ' };
            let tabs = dock
                .group(slot.group())
                .map(|g| {
                    g.panels()
                        .iter()
                        .map(PanelKey::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            let _ = writeln!(
                out,
                " {} {:<16} y={:<7.1} h={:<7.1} [{}]",
                selected,
                slot.panel(),
                slot.rect.y,
                slot.rect.height,
                tabs
            );
        }
    }

    let floating: Vec<_> = manager.windows().open_panels().cloned().collect();
    if !floating.is_empty() {
        let _ = writeln!(out, "floating");
        for key in floating {
            let placement = manager.find_panel(key.as_str()).and_then(|p| p.float_placement);
            match placement {
                Some(p) => {
                    let _ = writeln!(
                        out,
                        "   {:<16} x={} y={} {}x{}",
                        key, p.x, p.y, p.width, p.height
                    );
                }
                None => {
                    let _ = writeln!(out, "   {}", key);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floating::HeadlessHost;
    use crate::panel::{ContentHandle, Panel};

    fn manager() -> Manager {
        let mut manager = Manager::new(Box::new(HeadlessHost::default()));
        manager.register_dock("left").unwrap();
        manager.register_dock("right").unwrap();
        for (key, dock) in [("folders", "left"), ("bookmarks", "left"), ("history", "right")] {
            manager
                .register_panel(Panel::new(key, key, ContentHandle::default()), dock)
                .unwrap();
        }
        manager
    }

    #[test]
    fn test_parse_args_for_move() {
        let args = CliArgs::try_parse_from(["dockyard", "move", "folders", "right", "0"]).unwrap();
        assert_eq!(
            args.action,
            Action::Move {
                panel: "folders".into(),
                dock: "right".into(),
                index: 0
            }
        );
        assert!(!args.dry_run);
    }

    #[test]
    fn test_show_and_reset_dispatch_nothing() {
        assert_eq!(Action::Show.to_msg(), None);
        assert_eq!(Action::Reset.to_msg(), None);
        assert_eq!(
            Action::Toggle { panel: "a".into() }.to_msg(),
            Some(Msg::toggle("a"))
        );
    }

    #[test]
    fn test_parse_placement() {
        let placement = parse_placement("10, 20, 300, 400").unwrap();
        assert_eq!(placement, Placement::new(10.0, 20.0, 300.0, 400.0));
        assert!(parse_placement("10,20,300").is_err());
        assert!(parse_placement("10,20,0,400").is_err());
        assert!(parse_placement("a,b,c,d").is_err());
    }

    #[test]
    fn test_float_action_takes_placement() {
        let args = CliArgs::try_parse_from(["dockyard", "float", "history", "--at", "1,2,3,4"]).unwrap();
        let Some(Msg::Panel(PanelMsg::Float { placement, .. })) = args.action.to_msg() else {
            panic!("expected float message");
        };
        assert_eq!(placement, Some(Placement::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_render_layout_lists_slots_and_windows() {
        let mut manager = manager();
        manager.open_dock("folders").unwrap();
        manager.open_window("history", None).unwrap();

        let out = render_layout(
            &manager,
            LayoutMetrics::default(),
            Rect::new(0.0, 0.0, 200.0, 405.0),
        );
        assert!(out.contains("left"));
        assert!(out.contains(" * folders"));
        assert!(out.contains("h=200.0"));
        assert!(out.contains("  (empty)"));
        assert!(out.contains("floating\n   history"));
    }

    #[test]
    fn test_render_layout_keeps_remembered_placement() {
        let mut manager = manager();
        let window = Placement::new(10.0, 20.0, 300.0, 200.0);
        manager.open_window("history", Some(window)).unwrap();
        manager.close("history").unwrap();

        let out = render_layout(
            &manager,
            LayoutMetrics::default(),
            Rect::new(0.0, 0.0, 200.0, 405.0),
        );

        assert!(out.contains("history"));
        assert_eq!(manager.find_panel("history").unwrap().float_placement, Some(window));
    }
}
