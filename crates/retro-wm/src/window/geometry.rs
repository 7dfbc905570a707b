//! On-screen box of a window

use serde::{Deserialize, Serialize};

use crate::math::{Size, Vec2};

/// Visual constants of the window frame used for hit testing
#[derive(Clone, Copy, Debug)]
pub struct FrameStyle {
    /// Height of the draggable title bar
    pub title_bar_height: f32,
    /// Height of the menu bar, when the window has menus
    pub menu_bar_height: f32,
    /// Thickness of the right and bottom resize strips
    pub resize_handle_size: f32,
}

/// Default frame style
pub const FRAME_STYLE: FrameStyle = FrameStyle {
    title_bar_height: 18.0,
    menu_bar_height: 20.0,
    resize_handle_size: 6.0,
};

/// Position and size of a window on screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Top-left corner
    pub position: Vec2,
    /// Outer dimensions
    pub size: Size,
}

impl Geometry {
    /// Create a geometry
    #[inline]
    pub const fn new(position: Vec2, size: Size) -> Self {
        Self { position, size }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }

    /// Check if a point lies inside the box (right/bottom edges exclusive)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.position.x
            && point.x < self.right()
            && point.y >= self.position.y
            && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_edges() {
        let g = Geometry::new(Vec2::new(10.0, 20.0), Size::new(100.0, 50.0));
        assert!((g.right() - 110.0).abs() < 0.001);
        assert!((g.bottom() - 70.0).abs() < 0.001);
    }

    #[test]
    fn test_geometry_contains() {
        let g = Geometry::new(Vec2::new(0.0, 0.0), Size::new(100.0, 50.0));
        assert!(g.contains(Vec2::new(0.0, 0.0)));
        assert!(g.contains(Vec2::new(99.0, 49.0)));
        assert!(!g.contains(Vec2::new(100.0, 10.0)));
        assert!(!g.contains(Vec2::new(-1.0, 10.0)));
    }
}
