//! Window region for pointer routing

use serde::Serialize;

use crate::input::ResizeDirection;
use crate::math::Vec2;
use super::{Geometry, FRAME_STYLE};

/// Region of a window a pointer-down landed on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowRegion {
    /// Title bar area (drag handle)
    TitleBar,
    /// Menu bar strip below the title bar
    MenuBar,
    /// Content area
    Content,
    /// Right edge resize strip
    ResizeRight,
    /// Bottom edge resize strip
    ResizeBottom,
    /// Bottom-right corner
    ResizeBottomRight,
}

impl WindowRegion {
    /// Resize direction driven by this region, if it is a resize handle
    pub fn resize_direction(&self) -> Option<ResizeDirection> {
        match self {
            WindowRegion::ResizeRight => Some(ResizeDirection::Right),
            WindowRegion::ResizeBottom => Some(ResizeDirection::Bottom),
            WindowRegion::ResizeBottomRight => Some(ResizeDirection::BottomRight),
            _ => None,
        }
    }

    /// Get CSS cursor style for this region
    pub fn cursor(&self) -> &'static str {
        match self {
            WindowRegion::TitleBar => "move",
            WindowRegion::MenuBar | WindowRegion::Content => "default",
            WindowRegion::ResizeRight => "ew-resize",
            WindowRegion::ResizeBottom => "ns-resize",
            WindowRegion::ResizeBottomRight => "nwse-resize",
        }
    }

    /// Parse a region name as sent by a host bridge
    pub fn from_name(name: &str) -> Option<WindowRegion> {
        match name {
            "title_bar" => Some(WindowRegion::TitleBar),
            "menu_bar" => Some(WindowRegion::MenuBar),
            "content" => Some(WindowRegion::Content),
            "resize_right" => Some(WindowRegion::ResizeRight),
            "resize_bottom" => Some(WindowRegion::ResizeBottom),
            "resize_bottom_right" => Some(WindowRegion::ResizeBottomRight),
            _ => None,
        }
    }
}

/// Find which region of a window is at `pos`.
///
/// Resize handles are only reported for resizable windows and take priority
/// over the title bar so the corner grab always wins.
pub fn hit_test(geometry: &Geometry, pos: Vec2, resizable: bool, has_menu: bool) -> Option<WindowRegion> {
    if !geometry.contains(pos) {
        return None;
    }

    if resizable {
        let handle = FRAME_STYLE.resize_handle_size;
        let in_right = pos.x >= geometry.right() - handle;
        let in_bottom = pos.y >= geometry.bottom() - handle;
        match (in_right, in_bottom) {
            (true, true) => return Some(WindowRegion::ResizeBottomRight),
            (true, false) => return Some(WindowRegion::ResizeRight),
            (false, true) => return Some(WindowRegion::ResizeBottom),
            (false, false) => {}
        }
    }

    let title_bottom = geometry.position.y + FRAME_STYLE.title_bar_height;
    if pos.y < title_bottom {
        return Some(WindowRegion::TitleBar);
    }

    if has_menu && pos.y < title_bottom + FRAME_STYLE.menu_bar_height {
        return Some(WindowRegion::MenuBar);
    }

    Some(WindowRegion::Content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;

    fn window() -> Geometry {
        Geometry::new(Vec2::new(100.0, 100.0), Size::new(300.0, 200.0))
    }

    #[test]
    fn test_hit_title_and_content() {
        let g = window();
        assert_eq!(hit_test(&g, Vec2::new(200.0, 105.0), false, false), Some(WindowRegion::TitleBar));
        assert_eq!(hit_test(&g, Vec2::new(200.0, 200.0), false, false), Some(WindowRegion::Content));
        assert_eq!(hit_test(&g, Vec2::new(50.0, 50.0), false, false), None);
    }

    #[test]
    fn test_hit_menu_bar() {
        let g = window();
        assert_eq!(hit_test(&g, Vec2::new(200.0, 125.0), false, true), Some(WindowRegion::MenuBar));
        assert_eq!(hit_test(&g, Vec2::new(200.0, 125.0), false, false), Some(WindowRegion::Content));
    }

    #[test]
    fn test_hit_resize_handles_only_when_resizable() {
        let g = window();
        let corner = Vec2::new(398.0, 298.0);
        assert_eq!(hit_test(&g, corner, true, false), Some(WindowRegion::ResizeBottomRight));
        assert_eq!(hit_test(&g, corner, false, false), Some(WindowRegion::Content));

        assert_eq!(hit_test(&g, Vec2::new(398.0, 200.0), true, false), Some(WindowRegion::ResizeRight));
        assert_eq!(hit_test(&g, Vec2::new(200.0, 298.0), true, false), Some(WindowRegion::ResizeBottom));
    }

    #[test]
    fn test_region_directions() {
        assert_eq!(WindowRegion::ResizeBottom.resize_direction(), Some(ResizeDirection::Bottom));
        assert_eq!(WindowRegion::TitleBar.resize_direction(), None);
        assert_eq!(WindowRegion::ResizeBottomRight.cursor(), "nwse-resize");
        assert_eq!(WindowRegion::from_name("resize_right"), Some(WindowRegion::ResizeRight));
    }
}
