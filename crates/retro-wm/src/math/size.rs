//! 2D size type for window dimensions

use serde::{Deserialize, Serialize};

/// 2D size for width and height
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Raise each dimension to at least the matching floor
    #[inline]
    pub fn at_least(self, floor: Size) -> Self {
        Self::new(self.width.max(floor.width), self.height.max(floor.height))
    }

    /// Round both dimensions to whole pixels
    #[inline]
    pub fn round(self) -> Self {
        Self::new(self.width.round(), self.height.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_at_least() {
        let s = Size::new(50.0, 500.0);
        let floored = s.at_least(Size::new(140.0, 80.0));
        assert!((floored.width - 140.0).abs() < 0.001);
        assert!((floored.height - 500.0).abs() < 0.001);
    }

    #[test]
    fn test_size_round() {
        let s = Size::new(140.4, 80.6).round();
        assert!((s.width - 140.0).abs() < 0.001);
        assert!((s.height - 81.0).abs() < 0.001);
    }
}
