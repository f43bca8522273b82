//! Floating window management
//!
//! Tracks the top-level windows hosting floating panels, at most one per panel.
//! Native window work is delegated to a `WindowHost`; this module only decides
//! placement and keeps each panel's remembered geometry up to date.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HostError, Result};
use crate::layout::Rect;
use crate::panel::{Panel, PanelKey, Placement};

/// Handle to a native window created by a `WindowHost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowHandle(pub u64);

/// Native window backend
///
/// Implementations create, focus and close real top-level windows. When a window
/// is closed from outside (the user clicks its close button), the host reports it
/// back through `Manager::window_closed`.
pub trait WindowHost {
    /// Create, show and focus a window bound to `panel`'s content
    fn create(&mut self, panel: &Panel, placement: Placement)
        -> std::result::Result<WindowHandle, HostError>;

    /// Bring an existing window to the front and focus it
    fn activate(&mut self, window: WindowHandle);

    /// Current geometry and show state of a window
    fn capture_placement(
        &mut self,
        window: WindowHandle,
    ) -> std::result::Result<Placement, HostError>;

    /// Close a window. The host must not call back into the manager for closes it was asked to do.
    fn close(&mut self, window: WindowHandle);

    /// Bounds of the owning main window, used to position new windows
    fn owner_bounds(&self) -> Option<Rect> {
        None
    }
}

/// Default geometry for windows opened without a usable placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatingOptions {
    /// Offset from the owner window's top-left corner
    #[serde(default = "default_offset")]
    pub offset: (f32, f32),
    #[serde(default = "default_size")]
    pub default_size: (f32, f32),
}

fn default_offset() -> (f32, f32) {
    (32.0, 32.0)
}

fn default_size() -> (f32, f32) {
    (320.0, 480.0)
}

impl Default for FloatingOptions {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            default_size: default_size(),
        }
    }
}

/// Owner of all open floating windows
pub struct FloatingWindowManager {
    host: Box<dyn WindowHost>,
    windows: Vec<(PanelKey, WindowHandle)>,
    options: FloatingOptions,
}

impl FloatingWindowManager {
    pub fn new(host: Box<dyn WindowHost>, options: FloatingOptions) -> Self {
        Self {
            host,
            windows: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &FloatingOptions {
        &self.options
    }

    pub fn is_open(&self, panel: &str) -> bool {
        self.window(panel).is_some()
    }

    pub fn window(&self, panel: &str) -> Option<WindowHandle> {
        self.windows
            .iter()
            .find(|(key, _)| key.as_str() == panel)
            .map(|(_, handle)| *handle)
    }

    /// Panels with an open window, in opening order
    pub fn open_panels(&self) -> impl Iterator<Item = &PanelKey> + '_ {
        self.windows.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Open a window for `panel`, or focus the one already open.
    ///
    /// Placement precedence: `placement` if valid, then the panel's remembered
    /// placement, then a default offset from the owner window.
    pub fn open(&mut self, panel: &Panel, placement: Option<Placement>) -> Result<WindowHandle> {
        if let Some(handle) = self.window(panel.key().as_str()) {
            tracing::debug!(panel = %panel.key(), "Activating existing floating window");
            self.host.activate(handle);
            return Ok(handle);
        }

        let placement = placement
            .filter(Placement::is_valid)
            .or(panel.float_placement.filter(Placement::is_valid))
            .unwrap_or_else(|| self.default_placement());

        let handle = self.host.create(panel, placement)?;
        self.windows.push((panel.key().clone(), handle));
        tracing::debug!(panel = %panel.key(), ?handle, ?placement, "Opened floating window");
        Ok(handle)
    }

    fn default_placement(&self) -> Placement {
        let origin = self
            .host
            .owner_bounds()
            .map(|r| (r.x, r.y))
            .unwrap_or((0.0, 0.0));
        let (dx, dy) = self.options.offset;
        let (width, height) = self.options.default_size;
        Placement::new(origin.0 + dx, origin.1 + dy, width, height)
    }

    /// Capture the window's placement into `panel`, logging capture failures
    fn capture(host: &mut dyn WindowHost, handle: WindowHandle, panel: Option<&mut Panel>) {
        let Some(panel) = panel else {
            return;
        };
        match host.capture_placement(handle) {
            Ok(placement) if placement.is_valid() => panel.float_placement = Some(placement),
            Ok(placement) => {
                tracing::warn!(panel = %panel.key(), ?placement, "Ignoring invalid window placement")
            }
            Err(e) => tracing::warn!(panel = %panel.key(), "Failed to capture window placement: {}", e),
        }
    }

    /// Close the window for `panel`, remembering its placement.
    ///
    /// Returns whether a window was open.
    pub fn close(&mut self, panel: &str, panels: &mut BTreeMap<PanelKey, Panel>) -> bool {
        let Some(index) = self.windows.iter().position(|(key, _)| key.as_str() == panel) else {
            return false;
        };
        let (key, handle) = self.windows.remove(index);
        Self::capture(self.host.as_mut(), handle, panels.get_mut(key.as_str()));
        self.host.close(handle);
        tracing::debug!(panel = %key, ?handle, "Closed floating window");
        true
    }

    /// Close every open window
    pub fn close_all(&mut self, panels: &mut BTreeMap<PanelKey, Panel>) {
        for (key, handle) in std::mem::take(&mut self.windows) {
            Self::capture(self.host.as_mut(), handle, panels.get_mut(key.as_str()));
            self.host.close(handle);
        }
    }

    /// Host callback: a window was closed by any means.
    ///
    /// Stores `placement` if it is valid. Returns whether the panel was tracked.
    pub fn closed(
        &mut self,
        panel: &str,
        placement: Option<Placement>,
        panels: &mut BTreeMap<PanelKey, Panel>,
    ) -> bool {
        let Some(index) = self.windows.iter().position(|(key, _)| key.as_str() == panel) else {
            return false;
        };
        self.windows.remove(index);
        if let (Some(placement), Some(panel)) = (placement.filter(Placement::is_valid), panels.get_mut(panel)) {
            panel.float_placement = Some(placement);
        }
        true
    }

    /// Capture the current placement of every open window into its panel
    pub fn snapshot_all(&mut self, panels: &mut BTreeMap<PanelKey, Panel>) {
        for (key, handle) in &self.windows {
            Self::capture(self.host.as_mut(), *handle, panels.get_mut(key.as_str()));
        }
    }
}

impl std::fmt::Debug for FloatingWindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatingWindowManager")
            .field("windows", &self.windows)
            .field("options", &self.options)
            .finish()
    }
}

// ============================================================================
// Headless host
// ============================================================================

/// In-memory window host with no native windows
///
/// Used by the command-line tool, where floating windows exist only as
/// remembered geometry.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_id: u64,
    windows: BTreeMap<WindowHandle, Placement>,
    owner: Option<Rect>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(owner: Rect) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }
}

impl WindowHost for HeadlessHost {
    fn create(
        &mut self,
        _panel: &Panel,
        placement: Placement,
    ) -> std::result::Result<WindowHandle, HostError> {
        self.next_id += 1;
        let handle = WindowHandle(self.next_id);
        self.windows.insert(handle, placement);
        Ok(handle)
    }

    fn activate(&mut self, _window: WindowHandle) {}

    fn capture_placement(
        &mut self,
        window: WindowHandle,
    ) -> std::result::Result<Placement, HostError> {
        self.windows
            .get(&window)
            .copied()
            .ok_or_else(|| HostError::Geometry(format!("unknown window {:?}", window)))
    }

    fn close(&mut self, window: WindowHandle) {
        self.windows.remove(&window);
    }

    fn owner_bounds(&self) -> Option<Rect> {
        self.owner
    }
}
