//! Floating window placement

use serde::{Deserialize, Serialize};

use crate::layout::Rect;

/// Show state of a floating window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// Geometry and show state of a floating window, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    #[serde(default)]
    pub state: WindowState,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            state: WindowState::Normal,
            x,
            y,
            width,
            height,
        }
    }

    pub fn with_state(mut self, state: WindowState) -> Self {
        self.state = state;
        self
    }

    /// A placement is usable when its position is finite and its size positive
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_validity() {
        assert!(Placement::new(10.0, 20.0, 300.0, 200.0).is_valid());
        assert!(Placement::new(-50.0, -50.0, 1.0, 1.0).is_valid());
        assert!(!Placement::new(0.0, 0.0, 0.0, 200.0).is_valid());
        assert!(!Placement::new(0.0, 0.0, 300.0, -1.0).is_valid());
        assert!(!Placement::new(f32::NAN, 0.0, 300.0, 200.0).is_valid());
        assert!(!Placement::new(0.0, 0.0, f32::INFINITY, 200.0).is_valid());
    }

    #[test]
    fn test_placement_state_defaults_to_normal_when_missing() {
        let json = r#"{"x":1.0,"y":2.0,"width":3.0,"height":4.0}"#;
        let placement: Placement = serde_json::from_str(json).unwrap();
        assert_eq!(placement.state, WindowState::Normal);
        assert_eq!(placement.rect().width, 3.0);
    }
}
