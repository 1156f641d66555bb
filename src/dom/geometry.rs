//! Viewport geometry

use serde::{Deserialize, Serialize};

/// Width and height in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Viewport-relative bounding rectangle, as `getBoundingClientRect` reports it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        [self.top, self.left, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(20.0, 10.0));
        assert!(rect.contains(119.9, 59.9));
        assert!(!rect.contains(120.0, 30.0));
        assert!(!rect.contains(50.0, 60.0));
        assert!(!rect.contains(19.9, 30.0));
    }

    #[test]
    fn test_zero_sized_rect_contains_nothing() {
        let rect = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert!(!rect.contains(0.0, 0.0));
    }

    #[test]
    fn test_well_formed() {
        assert!(Rect::new(-5.0, -5.0, 10.0, 10.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, -1.0, 10.0).is_well_formed());
        assert!(!Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_well_formed());
    }
}
