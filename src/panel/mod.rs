//! Panel system - docking panel data model
//!
//! Panels are tabbed together into groups, and groups are stacked inside named
//! dock regions. A panel can also float in its own top-level window, in which
//! case it keeps its last dock membership for when it is docked again.
//!
//! ## Architecture
//!
//! - `Panel`: identity, title, content handle, weight, remembered window placement
//! - `PanelGroup`: ordered tab set of panel keys sharing one dock slot
//! - `DockRegion`: named region holding groups plus a selected group pointer
//! - `Placement`: floating window geometry and state
//!
//! ## Integration
//!
//! The model integrates with:
//! - Slot layout via `LayoutRenderer` in `layout/mod.rs`
//! - Drag and drop via `SlotView` in `layout/drop_target.rs`
//! - Orchestration via `Manager` in `manager.rs`

mod dock;
mod group;
mod item;
mod placement;

pub use dock::{DockEvent, DockKey, DockRegion};
pub use group::{GroupId, PanelGroup};
pub use item::{ContentHandle, Panel, PanelKey, DEFAULT_WEIGHT};
pub use placement::{Placement, WindowState};
