//! Integer geometry in desktop (virtual-screen) coordinates.
//!
//! `Rect` follows the Win32 convention: `left`/`top` are inclusive,
//! `right`/`bottom` are exclusive, so `width = right - left`.

use serde::{Deserialize, Serialize};

/// A point in desktop coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle with `right >= left` and `bottom >= top`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Builds a rectangle from two corner coordinates, normalizing them so
    /// the invariant `right >= left`, `bottom >= top` always holds.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Builds a rectangle from an origin and a size.
    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add(width as i32),
            bottom: y.saturating_add(height as i32),
        }
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// True when the point lies inside the rectangle (exclusive right/bottom).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// The overlapping area of two rectangles; empty when they are disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if right < left || bottom < top {
            Rect::from_xywh(left.min(right), top.min(bottom), 0, 0)
        } else {
            Rect {
                left,
                top,
                right,
                bottom,
            }
        }
    }

    /// Shifts the rectangle by the given offsets.
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

#[cfg(windows)]
mod win32 {
    use super::{Point, Rect};
    use windows::Win32::Foundation::{POINT, RECT};

    impl From<RECT> for Rect {
        fn from(r: RECT) -> Self {
            Rect::new(r.left, r.top, r.right, r.bottom)
        }
    }

    impl From<Rect> for RECT {
        fn from(r: Rect) -> Self {
            RECT {
                left: r.left,
                top: r.top,
                right: r.right,
                bottom: r.bottom,
            }
        }
    }

    impl From<POINT> for Point {
        fn from(p: POINT) -> Self {
            Point::new(p.x, p.y)
        }
    }

    impl From<Point> for POINT {
        fn from(p: Point) -> Self {
            POINT { x: p.x, y: p.y }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_corners() {
        let r = Rect::new(10, 20, 5, 15);
        assert_eq!(r, Rect::new(5, 15, 10, 20));
        assert_eq!(r.width(), 5);
        assert_eq!(r.height(), 5);
    }

    #[test]
    fn test_from_xywh() {
        let r = Rect::from_xywh(-3, 7, 10, 4);
        assert_eq!(r.left, -3);
        assert_eq!(r.right, 7);
        assert_eq!(r.width(), 10);
        assert_eq!(r.height(), 4);
    }

    #[test]
    fn test_zero_area_is_empty() {
        assert!(Rect::from_xywh(0, 0, 0, 0).is_empty());
        assert!(Rect::from_xywh(5, 5, 10, 0).is_empty());
        assert!(!Rect::from_xywh(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_contains_excludes_right_bottom_edge() {
        let r = Rect::from_xywh(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 9)));
        assert!(!r.contains(Point::new(9, 10)));
    }

    #[test]
    fn test_intersect_overlapping() {
        let a = Rect::from_xywh(0, 0, 10, 10);
        let b = Rect::from_xywh(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::from_xywh(5, 5, 5, 5));
    }

    #[test]
    fn test_intersect_disjoint_is_empty() {
        let a = Rect::from_xywh(0, 0, 10, 10);
        let b = Rect::from_xywh(20, 20, 5, 5);
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn test_translate() {
        let r = Rect::from_xywh(1, 2, 3, 4).translate(-1, -2);
        assert_eq!(r, Rect::from_xywh(0, 0, 3, 4));
    }
}
